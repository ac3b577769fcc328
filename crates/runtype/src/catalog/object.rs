// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property-bag host object.

use crate::error::HostError;
use crate::host::{ClassHandle, HostObject, ObjectRef};
use crate::value::{OpaqueHandle, Selector, Value};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Host object backed by a property map.
///
/// Selectors are dispatched by convention: `key` with no arguments reads
/// property `key`, `setKey:` with one argument writes property `key`.
/// Key-value writes accept any key; reads of a missing key fail.
pub struct CatalogObject {
    class: ClassHandle,
    properties: Mutex<HashMap<String, Value>>,
    handles: HashMap<String, OpaqueHandle>,
    description: Option<String>,
}

impl CatalogObject {
    pub fn new(class: ClassHandle) -> Self {
        Self {
            class,
            properties: Mutex::new(HashMap::new()),
            handles: HashMap::new(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_property(self, key: &str, value: Value) -> Self {
        self.properties.lock().insert(key.to_string(), value);
        self
    }

    /// Attach an opaque handle reported by [`HostObject::backing_handle`].
    #[must_use]
    pub fn with_backing_handle(mut self, handle: OpaqueHandle) -> Self {
        self.handles.insert(handle.type_name().to_string(), handle);
        self
    }

    /// Override the default `<ClassName>` description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Current value of a property.
    pub fn property(&self, key: &str) -> Option<Value> {
        self.properties.lock().get(key).cloned()
    }

    pub fn into_ref(self) -> ObjectRef {
        ObjectRef::new(Arc::new(self))
    }

    fn unrecognized(&self, selector: &Selector) -> HostError {
        HostError::UnrecognizedSelector {
            class: self.class.name().to_string(),
            selector: selector.name().to_string(),
        }
    }
}

/// `setFoo:` -> `foo`
fn setter_key(selector: &str) -> Option<String> {
    let rest = selector.strip_prefix("set")?.strip_suffix(':')?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    Some(first.to_lowercase().chain(chars).collect())
}

impl HostObject for CatalogObject {
    fn class(&self) -> ClassHandle {
        self.class.clone()
    }

    fn description(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => format!("<{}>", self.class.name()),
        }
    }

    fn value_for_key(&self, key: &str) -> Result<Value, HostError> {
        self.property(key).ok_or_else(|| HostError::UnknownKey {
            class: self.class.name().to_string(),
            key: key.to_string(),
        })
    }

    fn set_value_for_key(&self, key: &str, value: Value) -> Result<(), HostError> {
        self.properties.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn perform(&self, selector: &Selector, args: &[Value]) -> Result<Option<Value>, HostError> {
        match args {
            [] => self
                .property(selector.name())
                .map(Some)
                .ok_or_else(|| self.unrecognized(selector)),
            [value] => {
                let key = setter_key(selector.name()).ok_or_else(|| self.unrecognized(selector))?;
                self.properties.lock().insert(key, value.clone());
                Ok(None)
            }
            _ => Err(self.unrecognized(selector)),
        }
    }

    fn backing_handle(&self, handle_type: &str) -> Option<OpaqueHandle> {
        self.handles.get(handle_type).cloned()
    }
}

impl std::fmt::Debug for CatalogObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogObject")
            .field("class", &self.class)
            .field("properties", &*self.properties.lock())
            .finish()
    }
}
