// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for descriptor construction, casting and host access.

use thiserror::Error;

/// Why a descriptor could not be built.
///
/// Callers treat every variant as "type not supported" and may skip the
/// attribute or warn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Symbolic name is neither well-known nor a class or protocol.
    #[error("Unknown type name: {0}")]
    UnknownTypeName(String),

    /// Encoding is valid but has no descriptor representation.
    #[error("Unsupported type encoding '{encoding}': {reason}")]
    UnsupportedEncoding {
        encoding: String,
        reason: &'static str,
    },

    /// Encoding string was empty.
    #[error("Empty type encoding")]
    EmptyEncoding,
}

impl DescriptorError {
    pub(crate) fn unsupported(encoding: &str, reason: &'static str) -> Self {
        Self::UnsupportedEncoding {
            encoding: encoding.to_string(),
            reason,
        }
    }
}

/// A value was rejected for an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    /// Value does not match (and cannot be coerced to) the expected type.
    #[error("{attribute} expects a value of type {expected}, found {found}")]
    Mismatch {
        attribute: String,
        expected: String,
        found: String,
    },

    /// Attribute exists but is not supported on this host.
    #[error("{attribute} is not available: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Unavailable {
        attribute: String,
        reason: Option<String>,
    },
}

/// Failure reported by the host object runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Generic key-value access on a key the object does not have.
    #[error("{class} is not key value coding-compliant for the key {key}")]
    UnknownKey { class: String, key: String },

    /// Object does not implement the selector.
    #[error("unrecognized selector -[{class} {selector}]")]
    UnrecognizedSelector { class: String, selector: String },

    /// Value cannot be stored through this access path.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Failure of [`Descriptor::set_value`](crate::Descriptor::set_value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    Host(#[from] HostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message_names_attribute_and_type() {
        let err = CastError::Mismatch {
            attribute: "alpha".into(),
            expected: "CGFloat".into(),
            found: "hello".into(),
        };
        assert_eq!(
            err.to_string(),
            "alpha expects a value of type CGFloat, found hello"
        );
    }

    #[test]
    fn test_unavailable_message_without_reason() {
        let err = CastError::Unavailable {
            attribute: "contentInsetAdjustmentBehavior".into(),
            reason: None,
        };
        assert!(err.to_string().ends_with("no reason given"));
    }

    #[test]
    fn test_access_error_wraps_host_error() {
        let host = HostError::UnknownKey {
            class: "UIView".into(),
            key: "bogus".into(),
        };
        let err: AccessError = host.clone().into();
        assert_eq!(err.to_string(), host.to_string());
    }
}
