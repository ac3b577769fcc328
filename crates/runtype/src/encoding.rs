// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-encoding decoder.
//!
//! Decodes the compact Objective-C type encodings reported for properties
//! and boxed values into descriptors.
//!
//! # Supported Encodings
//!
//! ```text
//! B                 Bool
//! c                 Bool (signed-char BOOL hosts) or Int
//! i s l q           Int
//! C I S L Q         UInt
//! f d               Float, Double
//! *                 char pointer
//! @"Name"           instances of class Name (NSString -> String)
//! @"<Proto>"        objects conforming to Proto
//! :                 Selector (with synthesized accessors)
//! {Name=...}        composite value Name
//! ^{Name=...}       pointer to composite Name (also r^{...})
//! ```
//!
//! Everything else (`@`, `@?`, `#`, `v`, `[..]`, `(..)`, unresolved names)
//! has no descriptor.

use crate::config::{BoolEncoding, DecoderConfig};
use crate::descriptor::{Availability, Descriptor};
use crate::error::DescriptorError;
use crate::host::HostRuntime;
use crate::types::{NativeType, Primitive, TypeKind, FOREIGN_STRING};
use std::sync::Arc;

/// Decodes type-encoding strings into descriptors.
#[derive(Debug, Clone, Default)]
pub struct EncodingDecoder {
    config: DecoderConfig,
}

impl EncodingDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `encoding` into a descriptor.
    ///
    /// # Errors
    ///
    /// [`DescriptorError::UnsupportedEncoding`] when the encoding has no
    /// descriptor representation, [`DescriptorError::EmptyEncoding`] for an
    /// empty string (which also trips a debug assertion).
    pub fn decode(
        &self,
        encoding: &str,
        availability: Availability,
        runtime: &dyn HostRuntime,
    ) -> Result<Descriptor, DescriptorError> {
        let result = self.decode_kind(encoding, availability, runtime);
        if let Err(ref err) = result {
            log::debug!("[encoding] no descriptor: {}", err);
        }
        result
    }

    fn decode_kind(
        &self,
        encoding: &str,
        availability: Availability,
        runtime: &dyn HostRuntime,
    ) -> Result<Descriptor, DescriptorError> {
        let Some(tag) = encoding.chars().next() else {
            debug_assert!(false, "empty type encoding");
            return Err(DescriptorError::EmptyEncoding);
        };

        let primitive = match tag {
            'B' => Primitive::Bool,
            'c' if self.config.bool_encoding == BoolEncoding::SignedChar => Primitive::Bool,
            'c' | 'i' | 's' | 'l' | 'q' => Primitive::Int,
            'C' | 'I' | 'S' | 'L' | 'Q' => Primitive::UInt,
            'f' => Primitive::Float,
            'd' => Primitive::Double,
            '*' => Primitive::BytePointer,
            ':' => return Ok(Descriptor::selector_with(availability)),
            '@' => {
                let kind = self.decode_object(encoding, runtime)?;
                return Ok(Descriptor::from_kind(kind, availability));
            }
            '#' => {
                return Err(DescriptorError::unsupported(
                    encoding,
                    "class objects do not encode their subclass",
                ))
            }
            '{' => {
                let name = sanitized_struct_name(encoding);
                return Ok(Descriptor::from_kind(
                    TypeKind::Struct(Arc::from(name)),
                    availability,
                ));
            }
            '^' | 'r' if is_struct_pointer(encoding) => {
                let name = sanitized_struct_name(encoding);
                return Ok(Descriptor::from_kind(
                    TypeKind::Pointer(Arc::from(name)),
                    availability,
                ));
            }
            _ => return Err(DescriptorError::unsupported(encoding, "unsupported type tag")),
        };
        Ok(Descriptor::from_kind(
            TypeKind::Any(primitive.into()),
            availability,
        ))
    }

    /// `@"Name"` or `@"<Protocol>"`.
    fn decode_object(
        &self,
        encoding: &str,
        runtime: &dyn HostRuntime,
    ) -> Result<TypeKind, DescriptorError> {
        let name = encoding
            .strip_prefix("@\"")
            .and_then(|rest| rest.strip_suffix('"'))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                DescriptorError::unsupported(encoding, "object type carries no class name")
            })?;

        if name.len() > self.config.max_name_len {
            return Err(DescriptorError::unsupported(
                encoding,
                "embedded type name exceeds the configured limit",
            ));
        }

        if let Some(protocol) = name.strip_prefix('<').and_then(|n| n.strip_suffix('>')) {
            return match runtime.protocol_named(protocol) {
                Some(handle) => Ok(TypeKind::Protocol(handle)),
                None => {
                    log::trace!("[encoding] unresolved protocol {}", protocol);
                    Err(DescriptorError::unsupported(encoding, "unknown protocol"))
                }
            };
        }

        if name == FOREIGN_STRING {
            return Ok(TypeKind::Any(Primitive::String.into()));
        }

        match runtime.class_named(name) {
            Some(class) => Ok(TypeKind::Any(NativeType::Class(class))),
            None => {
                log::trace!("[encoding] unresolved class {}", name);
                Err(DescriptorError::unsupported(encoding, "unknown class"))
            }
        }
    }
}

fn is_struct_pointer(encoding: &str) -> bool {
    encoding.starts_with("^{") || encoding.starts_with("r^{")
}

/// Bare composite name of a struct (or struct pointer) encoding.
///
/// `{CGRect={CGPoint=dd}{CGSize=dd}}` becomes `CGRect`; `_NSRange` is
/// reported under its public name `NSRange`. Encodings without a field list
/// are returned unchanged.
pub fn sanitized_struct_name(encoding: &str) -> String {
    let (Some(brace), Some(equal)) = (encoding.find('{'), encoding.find('=')) else {
        return encoding.to_string();
    };
    if equal < brace {
        return encoding.to_string();
    }
    match &encoding[brace + 1..equal] {
        "_NSRange" => "NSRange".to_string(),
        name => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::host::DetachedRuntime;

    fn decode(encoding: &str) -> Result<Descriptor, DescriptorError> {
        EncodingDecoder::default().decode(encoding, Availability::Available, &DetachedRuntime)
    }

    fn kind_of(encoding: &str) -> TypeKind {
        decode(encoding).expect("decodable").kind().clone()
    }

    #[test]
    fn test_sanitized_names() {
        assert_eq!(sanitized_struct_name("{CGRect={CGPoint=dd}{CGSize=dd}}"), "CGRect");
        assert_eq!(sanitized_struct_name("{_NSRange=QQ}"), "NSRange");
        assert_eq!(sanitized_struct_name("^{CGColor=}"), "CGColor");
        assert_eq!(sanitized_struct_name("r^{CGPath=}"), "CGPath");
        assert_eq!(sanitized_struct_name("{CGPoint}"), "{CGPoint}");
        assert_eq!(sanitized_struct_name("CGRect"), "CGRect");
    }

    #[test]
    fn test_integer_tags() {
        for tag in ["i", "s", "l", "q"] {
            assert_eq!(kind_of(tag), TypeKind::Any(Primitive::Int.into()), "tag {tag}");
        }
        for tag in ["C", "I", "S", "L", "Q"] {
            assert_eq!(kind_of(tag), TypeKind::Any(Primitive::UInt.into()), "tag {tag}");
        }
    }

    #[test]
    fn test_signed_char_follows_bool_encoding() {
        let native = EncodingDecoder::new(
            DecoderConfig::default().with_bool_encoding(BoolEncoding::Native),
        );
        let signed = EncodingDecoder::new(
            DecoderConfig::default().with_bool_encoding(BoolEncoding::SignedChar),
        );
        let native = native.decode("c", Availability::Available, &DetachedRuntime).unwrap();
        let signed = signed.decode("c", Availability::Available, &DetachedRuntime).unwrap();
        assert_eq!(native.kind(), &TypeKind::Any(Primitive::Int.into()));
        assert_eq!(signed.kind(), &TypeKind::Any(Primitive::Bool.into()));
        assert_eq!(kind_of("B"), TypeKind::Any(Primitive::Bool.into()));
    }

    #[test]
    fn test_floating_and_bytes() {
        assert_eq!(kind_of("f"), TypeKind::Any(Primitive::Float.into()));
        assert_eq!(kind_of("d"), TypeKind::Any(Primitive::Double.into()));
        assert_eq!(kind_of("*"), TypeKind::Any(Primitive::BytePointer.into()));
    }

    #[test]
    fn test_struct_and_pointer_tags() {
        assert_eq!(kind_of("{CGRect={CGPoint=dd}{CGSize=dd}}"), TypeKind::Struct("CGRect".into()));
        assert_eq!(kind_of("{_NSRange=QQ}"), TypeKind::Struct("NSRange".into()));
        assert_eq!(kind_of("^{CGColor=}"), TypeKind::Pointer("CGColor".into()));
        assert_eq!(kind_of("r^{CGPath=}"), TypeKind::Pointer("CGPath".into()));
    }

    #[test]
    fn test_selector_has_accessors() {
        let desc = decode(":").unwrap();
        assert_eq!(desc.kind(), &TypeKind::Any(Primitive::Selector.into()));
        assert!(desc.getter().is_some());
        assert!(desc.setter().is_some());
    }

    #[test]
    fn test_object_encodings() {
        let catalog = Catalog::with_foundation();
        let decoder = EncodingDecoder::default();
        let decode = |e: &str| decoder.decode(e, Availability::Available, &catalog);

        let view = decode("@\"UIView\"").unwrap();
        assert_eq!(view.to_string(), "UIView");
        assert!(matches!(view.kind(), TypeKind::Any(NativeType::Class(_))));

        let string = decode("@\"NSString\"").unwrap();
        assert_eq!(string.kind(), &TypeKind::Any(Primitive::String.into()));

        let delegate = decode("@\"<UITableViewDelegate>\"").unwrap();
        assert_eq!(delegate.to_string(), "<UITableViewDelegate>");

        assert!(decode("@").is_err());
        assert!(decode("@?").is_err());
        assert!(decode("@\"\"").is_err());
        assert!(decode("@\"NoSuchClass\"").is_err());
        assert!(decode("@\"<NoSuchProtocol>\"").is_err());
    }

    #[test]
    fn test_name_length_limit() {
        let catalog = Catalog::with_foundation();
        let decoder = EncodingDecoder::new(DecoderConfig::default().with_max_name_len(4));
        let err = decoder
            .decode("@\"UIView\"", Availability::Available, &catalog)
            .unwrap_err();
        assert!(matches!(err, DescriptorError::UnsupportedEncoding { .. }));
    }

    #[test]
    fn test_unsupported_tags() {
        for encoding in ["#", "v", "[4i]", "(u=if)", "^i", "^v", "r*", "b4", "?", "x"] {
            assert!(
                matches!(decode(encoding), Err(DescriptorError::UnsupportedEncoding { .. })),
                "{encoding} should not decode"
            );
        }
    }

    #[test]
    fn test_availability_is_preserved() {
        let desc = EncodingDecoder::default()
            .decode(
                "d",
                Availability::unavailable(Some("iOS 11 only")),
                &DetachedRuntime,
            )
            .unwrap();
        assert!(!desc.is_available());
        assert_eq!(desc.to_string(), "<unavailable>");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "empty type encoding")]
    fn test_empty_encoding_asserts_in_debug() {
        let _ = decode("");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_empty_encoding_errors_in_release() {
        assert_eq!(decode("").unwrap_err(), DescriptorError::EmptyEncoding);
    }
}
