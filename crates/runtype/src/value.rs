// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime value model.
//!
//! A [`Value`] is what an expression layer hands to a descriptor: a native
//! scalar, a boxed number of unknown width, a boxed composite carrying its
//! type encoding, an opaque handle, or a reference into the host runtime.

use crate::encoding::sanitized_struct_name;
use crate::host::{ClassHandle, ObjectRef};
use crate::types::{NativeType, Primitive};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A dynamically-typed runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    CGFloat(f64),
    /// Boxed number of unspecified representation.
    Number(Number),
    String(String),
    AttributedString(AttributedString),
    Selector(Selector),
    /// Raw byte buffer (`char *`).
    Bytes(Vec<u8>),
    /// Boxed composite value.
    Struct(StructValue),
    /// Opaque handle such as a `CGColor`.
    Pointer(OpaqueHandle),
    /// Typed enumeration member.
    Enum(EnumValue),
    /// Host object instance.
    Object(ObjectRef),
    /// Class used as a value.
    Class(ClassHandle),
    /// Optional container; `None` is nil.
    Optional(Option<Box<Value>>),
}

impl Value {
    /// Value with all optional layers removed, `None` for nil.
    pub fn flatten_optional(&self) -> Option<&Value> {
        let mut current = self;
        while let Self::Optional(inner) = current {
            current = inner.as_deref()?;
        }
        Some(current)
    }

    /// Native type identity of this value's representation.
    pub fn runtime_type(&self) -> NativeType {
        match self {
            Self::Bool(_) => Primitive::Bool.into(),
            Self::Int(_) => Primitive::Int.into(),
            Self::UInt(_) => Primitive::UInt.into(),
            Self::Float(_) => Primitive::Float.into(),
            Self::Double(_) => Primitive::Double.into(),
            Self::CGFloat(_) => Primitive::CGFloat.into(),
            Self::Number(_) => Primitive::Number.into(),
            Self::String(_) => Primitive::String.into(),
            Self::AttributedString(_) => Primitive::AttributedString.into(),
            Self::Selector(_) => Primitive::Selector.into(),
            Self::Bytes(_) => Primitive::BytePointer.into(),
            Self::Struct(s) => NativeType::named(s.name()),
            Self::Pointer(h) => NativeType::named(h.type_name()),
            Self::Enum(e) => NativeType::named(e.type_name()),
            Self::Object(o) => NativeType::Class(o.class()),
            Self::Class(c) => NativeType::named(format!("{}.Type", c.name())),
            Self::Optional(_) => NativeType::named("Optional"),
        }
    }

    /// Numeric payload of any numeric representation.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(v) => Some(Number::Bool(*v)),
            Self::Int(v) => Some(Number::Int(*v)),
            Self::UInt(v) => Some(Number::UInt(*v)),
            Self::Float(v) => Some(Number::Float(*v)),
            Self::Double(v) | Self::CGFloat(v) => Some(Number::Double(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        self.flatten_optional().is_none()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:?}", v),
            Self::Double(v) | Self::CGFloat(v) => write!(f, "{:?}", v),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
            Self::AttributedString(s) => f.write_str(s.string()),
            Self::Selector(s) => f.write_str(s.name()),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::Struct(s) => write!(f, "{}", s),
            Self::Pointer(h) => f.write_str(h.description()),
            Self::Enum(e) => write!(f, "{}", e),
            Self::Object(o) => f.write_str(&o.description()),
            Self::Class(c) => f.write_str(c.name()),
            Self::Optional(Some(inner)) => write!(f, "Optional({})", inner),
            Self::Optional(None) => f.write_str("nil"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Selector> for Value {
    fn from(v: Selector) -> Self {
        Self::Selector(v)
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Self::Optional(v.map(|inner| Box::new(inner.into())))
    }
}

/// Boxed number of unspecified width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Bool(v) => f64::from(u8::from(v)),
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Float(v) => f64::from(v),
            Self::Double(v) => v,
        }
    }

    pub fn to_f32(self) -> f32 {
        match self {
            Self::Float(v) => v,
            other => other.to_f64() as f32,
        }
    }

    /// Truncating conversion.
    ///
    /// `UInt` values above `i64::MAX` wrap to negative integers.
    pub fn to_i64(self) -> i64 {
        match self {
            Self::Bool(v) => i64::from(v),
            Self::Int(v) => v,
            Self::UInt(v) => v as i64,
            Self::Float(v) => v as i64,
            Self::Double(v) => v as i64,
        }
    }

    /// Truncating conversion.
    pub fn to_u64(self) -> u64 {
        match self {
            Self::Bool(v) => u64::from(v),
            Self::Int(v) => v as u64,
            Self::UInt(v) => v,
            Self::Float(v) => v as u64,
            Self::Double(v) => v as u64,
        }
    }

    pub fn is_nonzero(self) -> bool {
        match self {
            Self::Bool(v) => v,
            Self::Int(v) => v != 0,
            Self::UInt(v) => v != 0,
            Self::Float(v) => v != 0.0,
            Self::Double(v) => v != 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", u8::from(*v)),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
        }
    }
}

/// Method selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(Arc<str>);

impl Selector {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Conventional setter selector for `key`: `set<Key>:`.
    pub fn setter_for(key: &str) -> Self {
        let mut chars = key.chars();
        let name = match chars.next() {
            Some(first) => format!("set{}{}:", first.to_uppercase(), chars.as_str()),
            None => "set:".to_string(),
        };
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// String with attribute runs collapsed to a single attribute map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributedString {
    string: String,
    attributes: BTreeMap<String, String>,
}

impl AttributedString {
    pub fn plain(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Plain text content.
    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Boxed composite value (`NSValue` equivalent).
///
/// The type encoding travels with the value; its sanitized name is the only
/// type information available for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    encoding: Arc<str>,
    members: Vec<f64>,
}

impl StructValue {
    pub fn new(encoding: &str, members: Vec<f64>) -> Self {
        Self {
            encoding: Arc::from(encoding),
            members,
        }
    }

    /// Type encoding, e.g. `{CGPoint=dd}`.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Sanitized composite name, e.g. `CGPoint`.
    pub fn name(&self) -> String {
        sanitized_struct_name(&self.encoding)
    }

    /// Flattened scalar members.
    pub fn members(&self) -> &[f64] {
        &self.members
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", member)?;
        }
        f.write_str(")")
    }
}

/// Opaque handle (`CGColorRef`, `CGPathRef`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueHandle {
    type_name: Arc<str>,
    address: usize,
    description: Arc<str>,
}

impl OpaqueHandle {
    /// Handle with the host's default description: `Path 0x..` for paths,
    /// `<Name 0x..>` otherwise.
    pub fn new(type_name: &str, address: usize) -> Self {
        let description = if type_name == crate::types::PATH_HANDLE {
            format!("Path {:#x}", address)
        } else {
            format!("<{} {:#x}>", type_name, address)
        };
        Self::with_description(type_name, address, description)
    }

    pub fn with_description(type_name: &str, address: usize, description: impl Into<String>) -> Self {
        Self {
            type_name: Arc::from(type_name),
            address,
            description: Arc::from(description.into()),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Member of a raw-representable enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    type_name: Arc<str>,
    raw: Box<Value>,
}

impl EnumValue {
    pub fn new(type_name: &str, raw: Value) -> Self {
        Self {
            type_name: Arc::from(type_name),
            raw: Box::new(raw),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(rawValue: {})", self.type_name, self.raw)
    }
}
