// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host object-runtime interface.
//!
//! The descriptor engine never talks to a concrete object system. It consumes
//! the traits below:
//!
//! - [`HostRuntime`] resolves class and protocol names (construction only).
//! - [`HostClass`] / [`HostProtocol`] expose the hierarchy used for subclass
//!   and conformance tests.
//! - [`HostObject`] is an instance: generic key-value access, selector
//!   invocation and access to backing opaque handles.
//!
//! Class and protocol identities are carried by [`ClassHandle`] and
//! [`ProtocolHandle`], cheap clonable wrappers compared by name (names are
//! unique within one host runtime).

use crate::error::HostError;
use crate::value::{OpaqueHandle, Selector, Value};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Name resolution against the host runtime.
pub trait HostRuntime {
    /// Resolve a class by name.
    fn class_named(&self, name: &str) -> Option<ClassHandle>;

    /// Resolve a protocol by name.
    fn protocol_named(&self, name: &str) -> Option<ProtocolHandle>;
}

/// A class known to the host runtime.
pub trait HostClass: Send + Sync {
    /// Class name.
    fn name(&self) -> &str;

    /// Direct superclass, `None` for root classes.
    fn superclass(&self) -> Option<ClassHandle>;

    /// Protocols adopted directly by this class (not by its superclasses).
    fn protocols(&self) -> Vec<ProtocolHandle>;
}

/// A protocol known to the host runtime.
pub trait HostProtocol: Send + Sync {
    /// Protocol name.
    fn name(&self) -> &str;

    /// Protocols this protocol inherits from.
    fn inherited(&self) -> Vec<ProtocolHandle>;
}

/// An instance living in the host runtime.
///
/// Host objects are reference types: setters take `&self` and implementations
/// use interior mutability.
pub trait HostObject: Send + Sync {
    /// Runtime class of the object.
    fn class(&self) -> ClassHandle;

    /// Textual description, as the host would print it.
    fn description(&self) -> String {
        format!("<{}>", self.class().name())
    }

    /// Generic key-value read.
    fn value_for_key(&self, key: &str) -> Result<Value, HostError>;

    /// Generic key-value write.
    fn set_value_for_key(&self, key: &str, value: Value) -> Result<(), HostError>;

    /// Invoke the method implementation bound to `selector`.
    ///
    /// Returns `Ok(None)` for methods without a result.
    fn perform(&self, selector: &Selector, args: &[Value]) -> Result<Option<Value>, HostError>;

    /// Opaque handle of type `handle_type` backing this object, if any
    /// (for example the `CGColor` behind a color object).
    fn backing_handle(&self, _handle_type: &str) -> Option<OpaqueHandle> {
        None
    }
}

/// Runtime that resolves nothing.
///
/// Enough for decoding primitive, struct and pointer encodings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedRuntime;

impl HostRuntime for DetachedRuntime {
    fn class_named(&self, _name: &str) -> Option<ClassHandle> {
        None
    }

    fn protocol_named(&self, _name: &str) -> Option<ProtocolHandle> {
        None
    }
}

/// Class identity.
#[derive(Clone)]
pub struct ClassHandle(Arc<dyn HostClass>);

impl ClassHandle {
    pub fn new(class: Arc<dyn HostClass>) -> Self {
        Self(class)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn superclass(&self) -> Option<ClassHandle> {
        self.0.superclass()
    }

    /// True if `self` is `other` or inherits from it.
    pub fn is_subclass_of(&self, other: &ClassHandle) -> bool {
        let mut current = Some(self.clone());
        while let Some(class) = current {
            if class == *other {
                return true;
            }
            current = class.superclass();
        }
        false
    }

    /// True if this class or any superclass adopts `protocol`, directly or
    /// through protocol inheritance.
    pub fn conforms_to(&self, protocol: &ProtocolHandle) -> bool {
        let mut current = Some(self.clone());
        while let Some(class) = current {
            if class.0.protocols().iter().any(|p| p.includes(protocol)) {
                return true;
            }
            current = class.superclass();
        }
        false
    }
}

impl PartialEq for ClassHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.name() == other.name()
    }
}

impl Eq for ClassHandle {}

impl Hash for ClassHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Debug for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassHandle").field(&self.name()).finish()
    }
}

impl fmt::Display for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Protocol identity.
#[derive(Clone)]
pub struct ProtocolHandle(Arc<dyn HostProtocol>);

impl ProtocolHandle {
    pub fn new(protocol: Arc<dyn HostProtocol>) -> Self {
        Self(protocol)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn inherited(&self) -> Vec<ProtocolHandle> {
        self.0.inherited()
    }

    /// True if `self` is `other` or inherits from it.
    pub fn includes(&self, other: &ProtocolHandle) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![self.clone()];
        while let Some(protocol) = pending.pop() {
            if protocol == *other {
                return true;
            }
            if seen.insert(protocol.name().to_string()) {
                pending.extend(protocol.inherited());
            }
        }
        false
    }
}

impl PartialEq for ProtocolHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.name() == other.name()
    }
}

impl Eq for ProtocolHandle {}

impl Hash for ProtocolHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Debug for ProtocolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProtocolHandle").field(&self.name()).finish()
    }
}

impl fmt::Display for ProtocolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared reference to a host object. Compared by identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn HostObject>);

impl ObjectRef {
    pub fn new(object: Arc<dyn HostObject>) -> Self {
        Self(object)
    }

    pub fn as_object(&self) -> &dyn HostObject {
        self.0.as_ref()
    }
}

impl std::ops::Deref for ObjectRef {
    type Target = dyn HostObject;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.0.description()).finish()
    }
}
