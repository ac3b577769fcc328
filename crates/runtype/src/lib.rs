// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # runtype - runtime type descriptors and value coercion
//!
//! Builds immutable [`Descriptor`]s from native type identities, symbolic
//! names, or Objective-C style type-encoding strings, then uses them to
//! validate and coerce dynamically-typed [`Value`]s before they are assigned
//! to host objects.
//!
//! ## Quick Start
//!
//! ```rust
//! use runtype::{Catalog, Descriptor, Number, Primitive, Value};
//!
//! let runtime = Catalog::with_foundation();
//!
//! // From a symbolic name
//! let alpha = Descriptor::named("CGFloat", &runtime).expect("well-known name");
//! assert_eq!(alpha.cast(&Value::Int(1)), Some(Value::CGFloat(1.0)));
//!
//! // From a type encoding
//! let hidden = Descriptor::from_encoding("B", &runtime).expect("bool encoding");
//! assert_eq!(hidden.cast(&Value::Double(0.0)), Some(Value::Bool(false)));
//!
//! // From a native identity
//! let count = Descriptor::of(Primitive::Int);
//! assert_eq!(count.cast(&Value::Number(Number::Double(2.9))), Some(Value::Int(2)));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                 consumer (expression / layout layer)                |
//! +---------------------------------------------------------------------+
//! |  Descriptor  -- constructors | cast | matches | accessors | Eq/Hash |
//! +---------------------------------------------------------------------+
//! |  TypeKind taxonomy | EncodingDecoder | well-known name table        |
//! +---------------------------------------------------------------------+
//! |  HostRuntime / HostClass / HostProtocol / HostObject (traits)       |
//! |  Catalog: in-memory reference runtime (+ YAML loader)               |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`descriptor`] - the `Descriptor` type and its constructors
//! - [`encoding`] - type-encoding decoder
//! - [`types`] - type kinds and native identities
//! - [`value`] - runtime value model
//! - [`host`] - host object-runtime interface
//! - [`catalog`] - reference host runtime

/// In-memory reference implementation of the host runtime traits.
pub mod catalog;
/// Decoder configuration.
pub mod config;
/// Descriptor type, constructors, equality and matching.
pub mod descriptor;
/// Type-encoding decoder.
pub mod encoding;
/// Error types.
pub mod error;
/// Host object-runtime interface.
pub mod host;
/// Type-kind taxonomy and native type identities.
pub mod types;
/// Runtime value model.
pub mod value;

mod cast;

pub use catalog::{Catalog, CatalogError, CatalogObject};
#[cfg(feature = "catalog-loaders")]
pub use catalog::{CatalogDocument, CatalogLoader};
pub use config::{BoolEncoding, DecoderConfig};
pub use descriptor::{Availability, Descriptor, Getter, Setter};
pub use encoding::{sanitized_struct_name, EncodingDecoder};
pub use error::{AccessError, CastError, DescriptorError, HostError};
pub use host::{
    ClassHandle, DetachedRuntime, HostClass, HostObject, HostProtocol, HostRuntime, ObjectRef,
    ProtocolHandle,
};
pub use types::{EnumCases, NativeType, Primitive, TypeKind};
pub use value::{AttributedString, EnumValue, Number, OpaqueHandle, Selector, StructValue, Value};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
