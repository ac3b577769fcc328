// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML catalog loader.
//!
//! # Example YAML
//!
//! ```yaml
//! # catalog.yaml
//! protocols:
//!   - name: UIScrollViewDelegate
//!   - name: UITableViewDelegate
//!     inherits: [UIScrollViewDelegate]
//!
//! classes:
//!   - name: UIView
//!     superclass: NSObject
//!     protocols: [UIAppearance]
//! ```
//!
//! Entries may appear in any order; references to names already present in
//! the base catalog (for example [`Catalog::with_foundation`]) resolve too.

use super::{Catalog, CatalogError};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// YAML catalog loader.
pub struct CatalogLoader;

/// Root YAML document structure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub protocols: Vec<ProtocolEntry>,
    pub classes: Vec<ClassEntry>,
}

/// Protocol definition.
#[derive(Debug, Deserialize)]
pub struct ProtocolEntry {
    pub name: String,
    #[serde(default)]
    pub inherits: Vec<String>,
}

/// Class definition.
#[derive(Debug, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
}

impl CatalogLoader {
    /// Load a catalog document from a YAML file.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Io`] or [`CatalogError::Yaml`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<CatalogDocument, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse YAML content.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Yaml`] on malformed documents.
    pub fn parse_yaml(content: &str) -> Result<CatalogDocument, CatalogError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Register every entry of `doc` into `catalog`.
    ///
    /// Protocols are registered before classes; within each group an entry is
    /// registered once all of its references are known.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Duplicate`] for names defined twice,
    /// [`CatalogError::UnknownClass`] / [`CatalogError::UnknownProtocol`]
    /// for references that never resolve, and [`CatalogError::Invalid`] for
    /// inheritance cycles.
    pub fn build(doc: &CatalogDocument, catalog: &mut Catalog) -> Result<(), CatalogError> {
        Self::check_duplicates(doc)?;
        Self::register_protocols(doc, catalog)?;
        Self::register_classes(doc, catalog)?;
        log::debug!(
            "[catalog] loaded {} protocols, {} classes",
            doc.protocols.len(),
            doc.classes.len()
        );
        Ok(())
    }

    /// Load a file on top of the Foundation catalog.
    ///
    /// # Errors
    ///
    /// See [`load_from_file`](Self::load_from_file) and [`build`](Self::build).
    pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
        let doc = Self::load_from_file(path)?;
        let mut catalog = Catalog::with_foundation();
        Self::build(&doc, &mut catalog)?;
        Ok(catalog)
    }

    fn check_duplicates(doc: &CatalogDocument) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for name in doc.protocols.iter().map(|p| &p.name) {
            if !seen.insert(name.as_str()) {
                return Err(CatalogError::Duplicate(name.clone()));
            }
        }
        seen.clear();
        for name in doc.classes.iter().map(|c| &c.name) {
            if !seen.insert(name.as_str()) {
                return Err(CatalogError::Duplicate(name.clone()));
            }
        }
        Ok(())
    }

    fn register_protocols(doc: &CatalogDocument, catalog: &mut Catalog) -> Result<(), CatalogError> {
        let mut pending: Vec<&ProtocolEntry> = doc.protocols.iter().collect();
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            for entry in pending {
                let defined_later = |name: &String| {
                    !catalog.has_protocol(name) && doc.protocols.iter().any(|p| &p.name == name)
                };
                if entry.inherits.iter().any(defined_later) {
                    deferred.push(entry);
                    continue;
                }
                let inherits: Vec<&str> = entry.inherits.iter().map(String::as_str).collect();
                catalog.add_protocol(&entry.name, &inherits)?;
            }
            if deferred.len() == before {
                return Err(CatalogError::Invalid(format!(
                    "protocol inheritance cycle involving {}",
                    deferred[0].name
                )));
            }
            pending = deferred;
        }
        Ok(())
    }

    fn register_classes(doc: &CatalogDocument, catalog: &mut Catalog) -> Result<(), CatalogError> {
        let mut pending: Vec<&ClassEntry> = doc.classes.iter().collect();
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();
            for entry in pending {
                let waits_on_parent = entry.superclass.as_ref().is_some_and(|parent| {
                    !catalog.has_class(parent) && doc.classes.iter().any(|c| &c.name == parent)
                });
                if waits_on_parent {
                    deferred.push(entry);
                    continue;
                }
                let protocols: Vec<&str> = entry.protocols.iter().map(String::as_str).collect();
                catalog.add_class(&entry.name, entry.superclass.as_deref(), &protocols)?;
            }
            if deferred.len() == before {
                return Err(CatalogError::Invalid(format!(
                    "superclass cycle involving {}",
                    deferred[0].name
                )));
            }
            pending = deferred;
        }
        Ok(())
    }
}
