// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory reference host runtime.
//!
//! [`Catalog`] registers classes and protocols by name and resolves them for
//! descriptor construction. [`CatalogObject`] is a property-bag instance that
//! emulates key-value access and getter/setter selector dispatch.
//!
//! Classes and protocols must be registered after everything they reference:
//! superclasses and adopted protocols are resolved at registration time.
//! [`CatalogLoader`] (feature `catalog-loaders`) orders YAML definitions
//! accordingly.

mod object;
#[cfg(feature = "catalog-loaders")]
mod yaml;

pub use object::CatalogObject;
#[cfg(feature = "catalog-loaders")]
pub use yaml::{CatalogDocument, CatalogLoader, ClassEntry, ProtocolEntry};

use crate::host::{ClassHandle, HostClass, HostProtocol, HostRuntime, ProtocolHandle};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Catalog construction and loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "catalog-loaders")]
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} is already registered")]
    Duplicate(String),

    #[error("{referenced_by} references unknown class {name}")]
    UnknownClass { name: String, referenced_by: String },

    #[error("{referenced_by} references unknown protocol {name}")]
    UnknownProtocol { name: String, referenced_by: String },

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

struct CatalogClass {
    name: String,
    superclass: Option<ClassHandle>,
    protocols: Vec<ProtocolHandle>,
}

impl HostClass for CatalogClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn superclass(&self) -> Option<ClassHandle> {
        self.superclass.clone()
    }

    fn protocols(&self) -> Vec<ProtocolHandle> {
        self.protocols.clone()
    }
}

struct CatalogProtocol {
    name: String,
    inherited: Vec<ProtocolHandle>,
}

impl HostProtocol for CatalogProtocol {
    fn name(&self) -> &str {
        &self.name
    }

    fn inherited(&self) -> Vec<ProtocolHandle> {
        self.inherited.clone()
    }
}

/// Name-indexed class and protocol registry.
#[derive(Default)]
pub struct Catalog {
    classes: HashMap<String, ClassHandle>,
    protocols: HashMap<String, ProtocolHandle>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the common Foundation/UIKit hierarchy.
    pub fn with_foundation() -> Self {
        let mut catalog = Self::new();
        for (name, inherits) in FOUNDATION_PROTOCOLS {
            catalog.insert_protocol(name, inherits);
        }
        for (name, superclass, protocols) in FOUNDATION_CLASSES {
            catalog.insert_class(name, *superclass, protocols);
        }
        catalog
    }

    /// Register a protocol inheriting from already-registered protocols.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Duplicate`] if the name is taken,
    /// [`CatalogError::UnknownProtocol`] for unresolved parents.
    pub fn add_protocol(
        &mut self,
        name: &str,
        inherits: &[&str],
    ) -> Result<ProtocolHandle, CatalogError> {
        if self.protocols.contains_key(name) {
            return Err(CatalogError::Duplicate(name.to_string()));
        }
        let inherited = self.resolve_protocols(name, inherits)?;
        let handle = ProtocolHandle::new(Arc::new(CatalogProtocol {
            name: name.to_string(),
            inherited,
        }));
        self.protocols.insert(name.to_string(), handle.clone());
        log::trace!("[catalog] registered protocol {}", name);
        Ok(handle)
    }

    /// Register a class.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Duplicate`] if the name is taken,
    /// [`CatalogError::UnknownClass`] / [`CatalogError::UnknownProtocol`] for
    /// unresolved references.
    pub fn add_class(
        &mut self,
        name: &str,
        superclass: Option<&str>,
        protocols: &[&str],
    ) -> Result<ClassHandle, CatalogError> {
        if self.classes.contains_key(name) {
            return Err(CatalogError::Duplicate(name.to_string()));
        }
        let superclass = superclass
            .map(|parent| {
                self.classes
                    .get(parent)
                    .cloned()
                    .ok_or_else(|| CatalogError::UnknownClass {
                        name: parent.to_string(),
                        referenced_by: name.to_string(),
                    })
            })
            .transpose()?;
        let protocols = self.resolve_protocols(name, protocols)?;
        let handle = ClassHandle::new(Arc::new(CatalogClass {
            name: name.to_string(),
            superclass,
            protocols,
        }));
        self.classes.insert(name.to_string(), handle.clone());
        log::trace!("[catalog] registered class {}", name);
        Ok(handle)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn has_protocol(&self, name: &str) -> bool {
        self.protocols.contains_key(name)
    }

    /// Registered class names, unordered.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Registered protocol names, unordered.
    pub fn protocol_names(&self) -> impl Iterator<Item = &str> {
        self.protocols.keys().map(String::as_str)
    }

    fn resolve_protocols(
        &self,
        referenced_by: &str,
        names: &[&str],
    ) -> Result<Vec<ProtocolHandle>, CatalogError> {
        names
            .iter()
            .map(|name| {
                self.protocols
                    .get(*name)
                    .cloned()
                    .ok_or_else(|| CatalogError::UnknownProtocol {
                        name: (*name).to_string(),
                        referenced_by: referenced_by.to_string(),
                    })
            })
            .collect()
    }

    // Builtin tables are ordered so every reference resolves.
    fn insert_protocol(&mut self, name: &str, inherits: &[&str]) {
        if let Err(err) = self.add_protocol(name, inherits) {
            log::debug!("[catalog] skipped builtin protocol {}: {}", name, err);
        }
    }

    fn insert_class(&mut self, name: &str, superclass: Option<&str>, protocols: &[&str]) {
        if let Err(err) = self.add_class(name, superclass, protocols) {
            log::debug!("[catalog] skipped builtin class {}: {}", name, err);
        }
    }
}

impl HostRuntime for Catalog {
    fn class_named(&self, name: &str) -> Option<ClassHandle> {
        self.classes.get(name).cloned()
    }

    fn protocol_named(&self, name: &str) -> Option<ProtocolHandle> {
        self.protocols.get(name).cloned()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("classes", &self.classes.len())
            .field("protocols", &self.protocols.len())
            .finish()
    }
}

const FOUNDATION_PROTOCOLS: &[(&str, &[&str])] = &[
    ("NSObject", &[]),
    ("NSCopying", &[]),
    ("NSCoding", &[]),
    ("UIAppearance", &["NSObject"]),
    ("UIScrollViewDelegate", &["NSObject"]),
    ("UITableViewDelegate", &["UIScrollViewDelegate"]),
    ("UITableViewDataSource", &["NSObject"]),
];

const FOUNDATION_CLASSES: &[(&str, Option<&str>, &[&str])] = &[
    ("NSObject", None, &["NSObject"]),
    ("NSString", Some("NSObject"), &["NSCopying", "NSCoding"]),
    ("NSNumber", Some("NSObject"), &["NSCopying", "NSCoding"]),
    ("UIColor", Some("NSObject"), &["NSCopying", "NSCoding"]),
    ("UIImage", Some("NSObject"), &["NSCoding"]),
    ("UIFont", Some("NSObject"), &["NSCopying", "NSCoding"]),
    ("UIResponder", Some("NSObject"), &[]),
    ("UIView", Some("UIResponder"), &["NSCoding", "UIAppearance"]),
    ("UIScrollView", Some("UIView"), &[]),
    ("UITableView", Some("UIScrollView"), &[]),
    ("UIViewController", Some("UIResponder"), &["NSCoding"]),
    (
        "UITableViewController",
        Some("UIViewController"),
        &["UITableViewDelegate", "UITableViewDataSource"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foundation_hierarchy() {
        let catalog = Catalog::with_foundation();
        let table = catalog.class_named("UITableView").unwrap();
        let view = catalog.class_named("UIView").unwrap();
        let appearance = catalog.protocol_named("UIAppearance").unwrap();
        let root = catalog.protocol_named("NSObject").unwrap();

        assert!(table.is_subclass_of(&view));
        assert!(table.conforms_to(&appearance));

        let controller = catalog.class_named("UITableViewController").unwrap();
        assert!(controller.conforms_to(&root));
        assert_eq!(catalog.class_names().count(), FOUNDATION_CLASSES.len());
        assert_eq!(catalog.protocol_names().count(), FOUNDATION_PROTOCOLS.len());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut catalog = Catalog::with_foundation();
        assert!(matches!(
            catalog.add_class("UIView", Some("NSObject"), &[]),
            Err(CatalogError::Duplicate(name)) if name == "UIView"
        ));
        assert!(matches!(
            catalog.add_protocol("NSCopying", &[]),
            Err(CatalogError::Duplicate(_))
        ));
    }

    #[test]
    fn test_unresolved_references() {
        let mut catalog = Catalog::new();
        let err = catalog.add_class("Button", Some("Control"), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Button references unknown class Control");

        let err = catalog.add_protocol("Delegate", &["Base"]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownProtocol { .. }));
        assert!(!catalog.has_protocol("Delegate"));
    }
}
