// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Well-known symbolic type names.
//!
//! Built once on first use and read-only afterwards.

use super::{NativeType, Primitive, COLOR_HANDLE, FOREIGN_STRING, IMAGE_HANDLE, PATH_HANDLE};
use std::collections::HashMap;
use std::sync::OnceLock;

static WELL_KNOWN: OnceLock<HashMap<&'static str, NativeType>> = OnceLock::new();

const PRIMITIVES: &[(&str, Primitive)] = &[
    ("Any", Primitive::Any),
    ("Bool", Primitive::Bool),
    ("Int", Primitive::Int),
    ("UInt", Primitive::UInt),
    ("Float", Primitive::Float),
    ("Double", Primitive::Double),
    ("CGFloat", Primitive::CGFloat),
    ("NSNumber", Primitive::Number),
    ("String", Primitive::String),
    ("NSAttributedString", Primitive::AttributedString),
    ("Selector", Primitive::Selector),
];

const VALUE_TYPES: &[&str] = &[
    "CGPoint",
    "CGSize",
    "CGRect",
    "CGVector",
    "CGAffineTransform",
    "CATransform3D",
    "UIEdgeInsets",
    "UIOffset",
    "NSRange",
    COLOR_HANDLE,
    IMAGE_HANDLE,
    PATH_HANDLE,
    FOREIGN_STRING,
];

fn table() -> &'static HashMap<&'static str, NativeType> {
    WELL_KNOWN.get_or_init(|| {
        let mut map = HashMap::with_capacity(PRIMITIVES.len() + VALUE_TYPES.len());
        for (name, primitive) in PRIMITIVES {
            map.insert(*name, NativeType::Primitive(*primitive));
        }
        for name in VALUE_TYPES {
            map.insert(*name, NativeType::named(name));
        }
        map
    })
}

/// Native type registered under `name`, if any.
pub fn well_known_type(name: &str) -> Option<&'static NativeType> {
    table().get(name)
}

/// All well-known names.
pub fn well_known_names() -> impl Iterator<Item = &'static str> {
    table().keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_names_resolve() {
        assert_eq!(
            well_known_type("CGFloat"),
            Some(&NativeType::Primitive(Primitive::CGFloat))
        );
        assert_eq!(
            well_known_type("Selector"),
            Some(&NativeType::Primitive(Primitive::Selector))
        );
    }

    #[test]
    fn test_value_types_are_named() {
        assert_eq!(well_known_type("UIEdgeInsets"), Some(&NativeType::named("UIEdgeInsets")));
        assert_eq!(well_known_type("CGPath"), Some(&NativeType::named("CGPath")));
        assert!(well_known_type("UIView").is_none());
    }

    #[test]
    fn test_names_cover_handles() {
        let names: Vec<_> = well_known_names().collect();
        for handle in [COLOR_HANDLE, IMAGE_HANDLE, PATH_HANDLE] {
            assert!(names.contains(&handle));
        }
    }
}
