// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoder configuration.
//!
//! The Objective-C `BOOL` type is encoded differently depending on the
//! target: 64-bit runtimes encode it as `B` (C99 `bool`), 32-bit runtimes as
//! `c` (`signed char`). [`DecoderConfig::default`] follows the compiling
//! target; override it when decoding encodings captured on another host.
//!
//! # Example
//!
//! ```
//! use runtype::{BoolEncoding, DecoderConfig};
//!
//! let config = DecoderConfig::default().with_bool_encoding(BoolEncoding::SignedChar);
//! assert_eq!(config.bool_encoding, BoolEncoding::SignedChar);
//! ```

#[cfg(feature = "catalog-loaders")]
use serde::{Deserialize, Serialize};

/// Upper bound on the class/protocol name embedded in an object encoding.
pub const DEFAULT_MAX_NAME_LEN: usize = 256;

/// How the host encodes `BOOL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "catalog-loaders", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "catalog-loaders", serde(rename_all = "snake_case"))]
pub enum BoolEncoding {
    /// `BOOL` is `bool` (`B`); `c` is a plain integer.
    Native,
    /// `BOOL` is `signed char`, so `c` decodes as a boolean.
    SignedChar,
}

impl BoolEncoding {
    /// Encoding used by the compiling target.
    pub const fn host() -> Self {
        if cfg!(target_pointer_width = "64") {
            Self::Native
        } else {
            Self::SignedChar
        }
    }
}

impl Default for BoolEncoding {
    fn default() -> Self {
        Self::host()
    }
}

/// Configuration for [`EncodingDecoder`](crate::EncodingDecoder).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "catalog-loaders", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "catalog-loaders", serde(default))]
pub struct DecoderConfig {
    /// Interpretation of the `c` tag.
    pub bool_encoding: BoolEncoding,
    /// Longest class or protocol name accepted in an `@"..."` payload.
    pub max_name_len: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            bool_encoding: BoolEncoding::host(),
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl DecoderConfig {
    /// Set the `BOOL` encoding.
    #[must_use]
    pub fn with_bool_encoding(mut self, bool_encoding: BoolEncoding) -> Self {
        self.bool_encoding = bool_encoding;
        self
    }

    /// Set the maximum embedded name length.
    #[must_use]
    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }
}
