// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cast/coercion engine.
//!
//! Each target representation owns an ordered list of coercion rules. Rules
//! are tried top to bottom and the first one producing a value wins:
//!
//! ```text
//! target            rules (in order)
//! NSNumber          number | any numeric
//! CGFloat           CGFloat | Double | any numeric
//! Double            Double | any numeric
//! Float             Float | Double | any numeric
//! Int               Int | Double (truncate) | any numeric (truncate)
//! UInt              UInt | Double (truncate) | any numeric (truncate)
//! Bool              Bool | Double != 0 | any numeric != 0
//! String            String | attributed text | description
//! NSAttributedString  attributed | description
//! class C           instance of C or a subclass
//! Any               everything
//! other             boxed struct with same name | same runtime type or name
//! ```

use crate::host::ProtocolHandle;
use crate::types::{
    EnumCases, NativeType, Primitive, TypeKind, COLOR_HANDLE, IMAGE_HANDLE, PATH_HANDLE,
};
use crate::value::{AttributedString, Number, Value};

type Rule = fn(&Value) -> Option<Value>;

/// Description prefix of path handles.
const PATH_PREFIX: &str = "Path";

/// Cast `value` to the representation expected by `kind`.
pub(crate) fn cast_kind(kind: &TypeKind, value: &Value) -> Option<Value> {
    let value = value.flatten_optional()?;
    match kind {
        TypeKind::Any(target) => coerce(value, target),
        TypeKind::Class(target) => match value {
            Value::Class(class) if class.is_subclass_of(target) => Some(value.clone()),
            _ => None,
        },
        TypeKind::Struct(name) => match value {
            Value::Struct(s) if s.name() == **name => Some(value.clone()),
            _ => None,
        },
        TypeKind::Pointer(name) => cast_pointer(name, value),
        TypeKind::Protocol(protocol) => cast_protocol(protocol, value),
        TypeKind::Enum(underlying, cases) => cast_enum(underlying, cases, value),
    }
}

/// Coerce `value` to the native type `target`.
pub(crate) fn coerce(value: &Value, target: &NativeType) -> Option<Value> {
    match target {
        NativeType::Primitive(Primitive::Any) => Some(value.clone()),
        NativeType::Primitive(primitive) => match rules_for(*primitive) {
            Some(rules) => rules.iter().find_map(|rule| rule(value)),
            None => same_type(value, target),
        },
        NativeType::Class(class) => match value {
            Value::Object(object) if object.class().is_subclass_of(class) => Some(value.clone()),
            _ => None,
        },
        NativeType::Named(name) => match value {
            Value::Struct(s) if s.name() == **name => Some(value.clone()),
            _ => same_type(value, target),
        },
    }
}

fn rules_for(target: Primitive) -> Option<&'static [Rule]> {
    let rules: &'static [Rule] = match target {
        Primitive::Number => &[number_identity, number_from_numeric],
        Primitive::CGFloat => &[cgfloat_identity, cgfloat_from_double, cgfloat_from_numeric],
        Primitive::Double => &[double_identity, double_from_numeric],
        Primitive::Float => &[float_identity, float_from_double, float_from_numeric],
        Primitive::Int => &[int_identity, int_from_double, int_from_numeric],
        Primitive::UInt => &[uint_identity, uint_from_double, uint_from_numeric],
        Primitive::Bool => &[bool_identity, bool_from_double, bool_from_numeric],
        Primitive::String => &[string_identity, string_from_attributed, string_from_description],
        Primitive::AttributedString => &[attributed_identity, attributed_from_description],
        Primitive::Any | Primitive::Selector | Primitive::BytePointer => return None,
    };
    Some(rules)
}

/// Default rule: identical runtime type, or identical type name.
fn same_type(value: &Value, target: &NativeType) -> Option<Value> {
    let actual = value.runtime_type();
    (actual == *target || actual.name() == target.name()).then(|| value.clone())
}

fn number_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::Number(_)).then(|| value.clone())
}

fn number_from_numeric(value: &Value) -> Option<Value> {
    value.as_number().map(Value::Number)
}

fn cgfloat_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::CGFloat(_)).then(|| value.clone())
}

fn cgfloat_from_double(value: &Value) -> Option<Value> {
    match value {
        Value::Double(v) => Some(Value::CGFloat(*v)),
        _ => None,
    }
}

fn cgfloat_from_numeric(value: &Value) -> Option<Value> {
    value.as_number().map(|n| Value::CGFloat(n.to_f64()))
}

fn double_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::Double(_)).then(|| value.clone())
}

fn double_from_numeric(value: &Value) -> Option<Value> {
    value.as_number().map(|n| Value::Double(n.to_f64()))
}

fn float_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::Float(_)).then(|| value.clone())
}

fn float_from_double(value: &Value) -> Option<Value> {
    match value {
        Value::Double(v) => Some(Value::Float(*v as f32)),
        _ => None,
    }
}

fn float_from_numeric(value: &Value) -> Option<Value> {
    value.as_number().map(|n| Value::Float(n.to_f32()))
}

fn int_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::Int(_)).then(|| value.clone())
}

fn int_from_double(value: &Value) -> Option<Value> {
    match value {
        Value::Double(v) => Some(Value::Int(*v as i64)),
        _ => None,
    }
}

fn int_from_numeric(value: &Value) -> Option<Value> {
    value.as_number().map(|n| Value::Int(n.to_i64()))
}

fn uint_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::UInt(_)).then(|| value.clone())
}

fn uint_from_double(value: &Value) -> Option<Value> {
    match value {
        Value::Double(v) => Some(Value::UInt(*v as u64)),
        _ => None,
    }
}

fn uint_from_numeric(value: &Value) -> Option<Value> {
    value.as_number().map(|n| Value::UInt(n.to_u64()))
}

fn bool_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::Bool(_)).then(|| value.clone())
}

fn bool_from_double(value: &Value) -> Option<Value> {
    match value {
        Value::Double(v) => Some(Value::Bool(*v != 0.0)),
        _ => None,
    }
}

fn bool_from_numeric(value: &Value) -> Option<Value> {
    value
        .as_number()
        .map(|n: Number| Value::Bool(n.is_nonzero()))
}

fn string_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::String(_)).then(|| value.clone())
}

fn string_from_attributed(value: &Value) -> Option<Value> {
    match value {
        Value::AttributedString(s) => Some(Value::String(s.string().to_string())),
        _ => None,
    }
}

fn string_from_description(value: &Value) -> Option<Value> {
    Some(Value::String(value.to_string()))
}

fn attributed_identity(value: &Value) -> Option<Value> {
    matches!(value, Value::AttributedString(_)).then(|| value.clone())
}

fn attributed_from_description(value: &Value) -> Option<Value> {
    Some(Value::AttributedString(AttributedString::plain(
        value.to_string(),
    )))
}

/// Opaque handles can only be validated heuristically.
fn cast_pointer(name: &str, value: &Value) -> Option<Value> {
    match name {
        COLOR_HANDLE | IMAGE_HANDLE => {
            if let Value::Object(object) = value {
                if let Some(handle) = object.backing_handle(name) {
                    return Some(Value::Pointer(handle));
                }
            }
            described_as_handle(name, value)
        }
        PATH_HANDLE => {
            if value.to_string().starts_with(PATH_PREFIX) {
                return Some(value.clone());
            }
            described_as_handle(name, value)
        }
        // No way to validate other handle types at this layer.
        _ => Some(value.clone()),
    }
}

fn described_as_handle(name: &str, value: &Value) -> Option<Value> {
    let description = value.to_string();
    let looks_like = description
        .strip_prefix('<')
        .is_some_and(|rest| rest.starts_with(name));
    looks_like.then(|| value.clone())
}

fn cast_protocol(protocol: &ProtocolHandle, value: &Value) -> Option<Value> {
    match value {
        Value::Object(object) if object.class().conforms_to(protocol) => Some(value.clone()),
        // Class objects answer conformance too.
        Value::Class(class) if class.conforms_to(protocol) => Some(value.clone()),
        _ => None,
    }
}

fn cast_enum(underlying: &NativeType, cases: &EnumCases, value: &Value) -> Option<Value> {
    if let Some(case) = value.as_str().and_then(|key| cases.get(key)) {
        return Some(case.clone());
    }
    if let Some(coerced) = coerce(value, underlying) {
        if let Some(case) = cases.find(&coerced) {
            return Some(case.clone());
        }
    }
    if let Some(raw_type) = cases.raw_type() {
        if let Some(case) = coerce(value, raw_type).and_then(|raw| cases.find_raw(&raw)) {
            return Some(case.clone());
        }
    }
    if value.runtime_type() != *underlying {
        return None;
    }
    Some(value.clone())
}
