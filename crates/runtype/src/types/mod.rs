// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-kind taxonomy.
//!
//! [`TypeKind`] is the closed set of type categories a descriptor can
//! represent. Each kind renders a canonical textual description used for
//! equality, hashing and diagnostics:
//!
//! | Kind | Description |
//! |------|-------------|
//! | `Any(T)`, `Enum(T, _)` | `T`'s name |
//! | `Class(C)` | `C.Type` |
//! | `Struct(N)`, `Pointer(N)` | `N` |
//! | `Protocol(P)` | `<P>` |

mod well_known;

pub use well_known::{well_known_names, well_known_type};

use crate::host::{ClassHandle, ProtocolHandle};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Opaque color handle type name.
pub const COLOR_HANDLE: &str = "CGColor";
/// Opaque image handle type name.
pub const IMAGE_HANDLE: &str = "CGImage";
/// Opaque path handle type name.
pub const PATH_HANDLE: &str = "CGPath";

/// Foreign string class remapped to [`Primitive::String`].
pub(crate) const FOREIGN_STRING: &str = "NSString";

/// Built-in native value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Accepts every value.
    Any,
    Bool,
    Int,
    UInt,
    Float,
    Double,
    CGFloat,
    /// Boxed number of any width.
    Number,
    String,
    AttributedString,
    Selector,
    /// `char *`
    BytePointer,
}

impl Primitive {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::UInt => "UInt",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::CGFloat => "CGFloat",
            Self::Number => "NSNumber",
            Self::String => "String",
            Self::AttributedString => "NSAttributedString",
            Self::Selector => "Selector",
            Self::BytePointer => "UnsafePointer<Int8>",
        }
    }
}

/// Native type identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    Primitive(Primitive),
    /// Named value type (geometry struct, enumeration, opaque handle).
    Named(Arc<str>),
    /// Instances of a class.
    Class(ClassHandle),
}

impl NativeType {
    pub fn named(name: impl AsRef<str>) -> Self {
        Self::Named(Arc::from(name.as_ref()))
    }

    /// Qualified name.
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => p.name(),
            Self::Named(name) => name,
            Self::Class(class) => class.name(),
        }
    }

    pub fn as_class(&self) -> Option<&ClassHandle> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }
}

impl From<Primitive> for NativeType {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<ClassHandle> for NativeType {
    fn from(class: ClassHandle) -> Self {
        Self::Class(class)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symbolic name to value mapping of an enumeration.
///
/// Keys are unique; lookups by value scan in key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumCases {
    values: BTreeMap<String, Value>,
    raw_type: Option<NativeType>,
}

impl EnumCases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw representation of [`EnumValue`](crate::EnumValue) members.
    #[must_use]
    pub fn with_raw_type(mut self, raw_type: NativeType) -> Self {
        self.raw_type = Some(raw_type);
        self
    }

    /// Add a case, replacing any case with the same name.
    #[must_use]
    pub fn case(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// First case equal to `value`.
    pub fn find(&self, value: &Value) -> Option<&Value> {
        self.values.values().find(|v| *v == value)
    }

    /// First enumeration member whose raw value equals `raw`.
    pub fn find_raw(&self, raw: &Value) -> Option<&Value> {
        self.values
            .values()
            .find(|v| matches!(v, Value::Enum(e) if e.raw() == raw))
    }

    pub fn raw_type(&self) -> Option<&NativeType> {
        self.raw_type.as_ref()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for EnumCases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            raw_type: None,
        }
    }
}

/// Closed set of representable type categories.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Native value type or class instances, matched by identity or name.
    Any(NativeType),
    /// Class values: the class itself or a subclass.
    Class(ClassHandle),
    /// Composite value type, by sanitized name.
    Struct(Arc<str>),
    /// Opaque handle type, by name.
    Pointer(Arc<str>),
    /// Objects conforming to a protocol.
    Protocol(ProtocolHandle),
    /// Enumeration over an underlying representation.
    Enum(NativeType, EnumCases),
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any(ty) | Self::Enum(ty, _) => f.write_str(ty.name()),
            Self::Class(class) => write!(f, "{}.Type", class.name()),
            Self::Struct(name) | Self::Pointer(name) => f.write_str(name),
            Self::Protocol(protocol) => write!(f, "<{}>", protocol.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::host::HostRuntime;

    #[test]
    fn test_kind_descriptions() {
        let catalog = Catalog::with_foundation();
        let view = catalog.class_named("UIView").unwrap();
        let copying = catalog.protocol_named("NSCopying").unwrap();

        assert_eq!(TypeKind::Any(Primitive::Double.into()).to_string(), "Double");
        assert_eq!(TypeKind::Any(view.clone().into()).to_string(), "UIView");
        assert_eq!(TypeKind::Class(view).to_string(), "UIView.Type");
        assert_eq!(TypeKind::Struct("CGRect".into()).to_string(), "CGRect");
        assert_eq!(TypeKind::Pointer("CGColor".into()).to_string(), "CGColor");
        assert_eq!(TypeKind::Protocol(copying).to_string(), "<NSCopying>");
        assert_eq!(
            TypeKind::Enum(NativeType::named("NSTextAlignment"), EnumCases::new()).to_string(),
            "NSTextAlignment"
        );
    }

    #[test]
    fn test_enum_cases_lookup() {
        let cases: EnumCases = [("left", 0i64), ("right", 1)].into_iter().collect();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases.get("right"), Some(&Value::Int(1)));
        assert_eq!(cases.find(&Value::Int(0)), Some(&Value::Int(0)));
        assert!(cases.find(&Value::Int(2)).is_none());
        assert!(cases.raw_type().is_none());
        assert_eq!(cases.names().collect::<Vec<_>>(), ["left", "right"]);
        let pairs: Vec<_> = cases.iter().collect();
        assert_eq!(pairs, [("left", &Value::Int(0)), ("right", &Value::Int(1))]);
    }

    #[test]
    fn test_duplicate_case_name_replaces() {
        let cases = EnumCases::new().case("a", 1i64).case("a", 2i64);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases.get("a"), Some(&Value::Int(2)));
    }
}
