// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Synthesized accessors for kinds that bypass generic key-value access.

use super::{Getter, Setter};
use crate::cast::coerce;
use crate::host::HostObject;
use crate::types::{EnumCases, NativeType};
use crate::value::{EnumValue, Selector, Value};

/// Reads a selector-typed attribute by invoking the method named after it.
pub(super) fn selector_getter() -> Getter {
    Box::new(|object: &dyn HostObject, key: &str| {
        let result = object.perform(&Selector::new(key), &[])?;
        Ok(match result {
            Some(value @ Value::Selector(_)) => value,
            _ => Value::Optional(None),
        })
    })
}

/// Writes a selector-typed attribute through `set<Key>:`.
///
/// Non-selector values are ignored.
pub(super) fn selector_setter() -> Setter {
    Box::new(|object: &dyn HostObject, key: &str, value: &Value| {
        let Some(selector @ Value::Selector(_)) = value.flatten_optional() else {
            log::trace!("[descriptor] ignoring non-selector value for {}", key);
            return Ok(());
        };
        object.perform(&Selector::setter_for(key), std::slice::from_ref(selector))?;
        Ok(())
    })
}

/// Reads the stored raw value and maps it back to an enumeration member.
///
/// Raw values without a matching case are wrapped as a member of
/// `type_name` anyway.
pub(super) fn raw_enum_getter(type_name: &str, raw_type: NativeType, cases: EnumCases) -> Getter {
    let type_name = type_name.to_string();
    Box::new(move |object: &dyn HostObject, key: &str| {
        let stored = object.value_for_key(key)?;
        let raw = coerce(&stored, &raw_type).unwrap_or(stored);
        Ok(match cases.find_raw(&raw) {
            Some(member) => member.clone(),
            None => Value::Enum(EnumValue::new(&type_name, raw)),
        })
    })
}

/// Stores an enumeration member as its raw value.
pub(super) fn raw_enum_setter(raw_type: NativeType) -> Setter {
    Box::new(move |object: &dyn HostObject, key: &str, value: &Value| {
        let raw = match value.flatten_optional() {
            Some(Value::Enum(member)) => member.raw(),
            Some(other) => other,
            None => return object.set_value_for_key(key, Value::Optional(None)),
        };
        let raw = coerce(raw, &raw_type).unwrap_or_else(|| raw.clone());
        object.set_value_for_key(key, raw)
    })
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Catalog, CatalogObject};
    use crate::descriptor::Descriptor;
    use crate::error::{AccessError, HostError};
    use crate::host::{DetachedRuntime, HostRuntime};
    use crate::types::{EnumCases, Primitive};
    use crate::value::{EnumValue, Number, Selector, Value};

    fn button() -> CatalogObject {
        let catalog = Catalog::with_foundation();
        let class = catalog.class_named("UIView").unwrap();
        CatalogObject::new(class)
    }

    #[test]
    fn test_selector_round_trip() {
        let object = button();
        let desc = Descriptor::from_encoding(":", &DetachedRuntime).unwrap();

        desc.set_value(&object, "action", &Value::Selector(Selector::new("tapped:")))
            .unwrap();
        assert_eq!(object.property("action"), Some(Value::Selector(Selector::new("tapped:"))));
        assert_eq!(
            desc.get_value(&object, "action").unwrap(),
            Value::Selector(Selector::new("tapped:"))
        );
    }

    #[test]
    fn test_selector_getter_without_selector_result() {
        let object = button().with_property("action", Value::Int(3));
        let desc = Descriptor::from_encoding(":", &DetachedRuntime).unwrap();
        assert_eq!(desc.get_value(&object, "action").unwrap(), Value::Optional(None));
    }

    #[test]
    fn test_selector_setter_ignores_other_values() {
        let object = button();
        let desc = Descriptor::from_encoding(":", &DetachedRuntime).unwrap();
        let setter = desc.setter().unwrap();
        setter(&object, "action", &Value::Int(1)).unwrap();
        assert_eq!(object.property("action"), None);
    }

    #[test]
    fn test_selector_getter_propagates_host_error() {
        let object = button();
        let desc = Descriptor::from_encoding(":", &DetachedRuntime).unwrap();
        assert!(matches!(
            desc.get_value(&object, "missing"),
            Err(HostError::UnrecognizedSelector { .. })
        ));
    }

    fn alignment() -> Descriptor {
        let member = |raw: i64| Value::Enum(EnumValue::new("NSTextAlignment", Value::Int(raw)));
        let cases = EnumCases::new()
            .case("left", member(0))
            .case("center", member(1))
            .case("right", member(2));
        Descriptor::raw_enumeration("NSTextAlignment", Primitive::Int.into(), cases)
    }

    #[test]
    fn test_raw_enum_stores_raw_value() {
        let object = button();
        let desc = alignment();

        desc.set_value(&object, "textAlignment", &Value::from("center"))
            .unwrap();
        assert_eq!(object.property("textAlignment"), Some(Value::Int(1)));

        let read = desc.get_value(&object, "textAlignment").unwrap();
        assert_eq!(read, Value::Enum(EnumValue::new("NSTextAlignment", Value::Int(1))));
    }

    #[test]
    fn test_raw_enum_reads_boxed_and_unknown_raw_values() {
        let desc = alignment();

        let boxed = button().with_property("textAlignment", Value::Number(Number::Int(2)));
        assert_eq!(
            desc.get_value(&boxed, "textAlignment").unwrap(),
            Value::Enum(EnumValue::new("NSTextAlignment", Value::Int(2)))
        );

        let unknown = button().with_property("textAlignment", Value::Int(7));
        assert_eq!(
            desc.get_value(&unknown, "textAlignment").unwrap(),
            Value::Enum(EnumValue::new("NSTextAlignment", Value::Int(7)))
        );
    }

    #[test]
    fn test_raw_enum_rejects_foreign_values() {
        let object = button();
        let err = alignment()
            .set_value(&object, "textAlignment", &Value::from("justified"))
            .unwrap_err();
        assert!(matches!(err, AccessError::Cast(_)));
        assert_eq!(object.property("textAlignment"), None);
    }
}
