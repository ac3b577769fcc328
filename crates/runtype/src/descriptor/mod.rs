// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type descriptors.
//!
//! A [`Descriptor`] pairs a [`TypeKind`] with an [`Availability`] flag and,
//! for kinds that cannot use generic key-value access, a synthesized getter
//! and setter. Descriptors are built once per attribute declaration and then
//! used to validate and coerce values:
//!
//! ```text
//! Value --cast()--> Option<Value> --set_value()--> HostObject
//!                                 <--get_value()--
//! ```
//!
//! Descriptors are immutable, `Send + Sync`, and compared and hashed by
//! their textual description. Share them as `Arc<Descriptor>`.

mod accessors;

use crate::cast;
use crate::encoding::EncodingDecoder;
use crate::error::{AccessError, CastError, DescriptorError, HostError};
use crate::host::{ClassHandle, HostObject, HostRuntime, ProtocolHandle};
use crate::types::{
    well_known_type, EnumCases, NativeType, Primitive, TypeKind, COLOR_HANDLE, FOREIGN_STRING,
    IMAGE_HANDLE, PATH_HANDLE,
};
use crate::value::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Placeholder description of unavailable descriptors.
const UNAVAILABLE: &str = "<unavailable>";

/// Synthesized attribute reader.
pub type Getter = Box<dyn Fn(&dyn HostObject, &str) -> Result<Value, HostError> + Send + Sync>;

/// Synthesized attribute writer.
pub type Setter =
    Box<dyn Fn(&dyn HostObject, &str, &Value) -> Result<(), HostError> + Send + Sync>;

/// Whether a descriptor can be used on the current host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Availability {
    #[default]
    Available,
    /// Never matches or casts anything.
    Unavailable { reason: Option<String> },
}

impl Availability {
    pub fn unavailable(reason: Option<&str>) -> Self {
        Self::Unavailable {
            reason: reason.map(str::to_string),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Immutable type-matching and casting unit.
pub struct Descriptor {
    kind: TypeKind,
    availability: Availability,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl Descriptor {
    /// Descriptor for `kind`, with selector accessors attached when the kind
    /// is the selector type.
    pub(crate) fn from_kind(kind: TypeKind, availability: Availability) -> Self {
        let (getter, setter) = match &kind {
            TypeKind::Any(NativeType::Primitive(Primitive::Selector)) => {
                (Some(accessors::selector_getter()), Some(accessors::selector_setter()))
            }
            _ => (None, None),
        };
        Self {
            kind,
            availability,
            getter,
            setter,
        }
    }

    pub(crate) fn selector_with(availability: Availability) -> Self {
        Self::from_kind(TypeKind::Any(Primitive::Selector.into()), availability)
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Descriptor for a native type identity.
    ///
    /// Opaque handle types become pointer kinds and the foreign string class
    /// is treated as [`Primitive::String`].
    pub fn of(native: impl Into<NativeType>) -> Self {
        Self::of_with(native, Availability::Available)
    }

    pub fn of_with(native: impl Into<NativeType>, availability: Availability) -> Self {
        let native = native.into();
        let kind = match native.name() {
            COLOR_HANDLE | IMAGE_HANDLE | PATH_HANDLE if native.as_class().is_none() => {
                TypeKind::Pointer(Arc::from(native.name()))
            }
            FOREIGN_STRING => TypeKind::Any(Primitive::String.into()),
            _ => TypeKind::Any(native),
        };
        Self::from_kind(kind, availability)
    }

    /// Descriptor matching the class itself or any subclass, used as a value.
    pub fn class(class: ClassHandle) -> Self {
        Self::class_with(class, Availability::Available)
    }

    pub fn class_with(class: ClassHandle, availability: Availability) -> Self {
        Self::from_kind(TypeKind::Class(class), availability)
    }

    /// Descriptor matching objects conforming to `protocol`.
    pub fn protocol(protocol: ProtocolHandle) -> Self {
        Self::protocol_with(protocol, Availability::Available)
    }

    pub fn protocol_with(protocol: ProtocolHandle, availability: Availability) -> Self {
        Self::from_kind(TypeKind::Protocol(protocol), availability)
    }

    /// Descriptor for a symbolic type name.
    ///
    /// Well-known names win; otherwise the name is resolved as a class, then
    /// as a protocol.
    ///
    /// # Errors
    ///
    /// [`DescriptorError::UnknownTypeName`] if nothing resolves.
    pub fn named(name: &str, runtime: &dyn HostRuntime) -> Result<Self, DescriptorError> {
        Self::named_with(name, runtime, Availability::Available)
    }

    pub fn named_with(
        name: &str,
        runtime: &dyn HostRuntime,
        availability: Availability,
    ) -> Result<Self, DescriptorError> {
        if let Some(native) = well_known_type(name) {
            return Ok(Self::of_with(native.clone(), availability));
        }
        if let Some(class) = runtime.class_named(name) {
            return Ok(Self::of_with(class, availability));
        }
        if let Some(protocol) = runtime.protocol_named(name) {
            return Ok(Self::protocol_with(protocol, availability));
        }
        log::debug!("[descriptor] unknown type name {}", name);
        Err(DescriptorError::UnknownTypeName(name.to_string()))
    }

    /// Descriptor for a type encoding, decoded with the default
    /// [`EncodingDecoder`].
    ///
    /// # Errors
    ///
    /// See [`EncodingDecoder::decode`].
    pub fn from_encoding(
        encoding: &str,
        runtime: &dyn HostRuntime,
    ) -> Result<Self, DescriptorError> {
        Self::from_encoding_with(encoding, runtime, Availability::Available)
    }

    pub fn from_encoding_with(
        encoding: &str,
        runtime: &dyn HostRuntime,
        availability: Availability,
    ) -> Result<Self, DescriptorError> {
        EncodingDecoder::default().decode(encoding, availability, runtime)
    }

    /// Enumeration over `underlying` with symbolic `cases`.
    ///
    /// Uses generic key-value access.
    pub fn enumeration(underlying: impl Into<NativeType>, cases: EnumCases) -> Self {
        Self::enumeration_with(underlying, cases, Availability::Available)
    }

    pub fn enumeration_with(
        underlying: impl Into<NativeType>,
        cases: EnumCases,
        availability: Availability,
    ) -> Self {
        Self::from_kind(TypeKind::Enum(underlying.into(), cases), availability)
    }

    /// Raw-representable enumeration named `type_name`.
    ///
    /// Case values are expected to be [`EnumValue`](crate::EnumValue)s.
    /// Attributes are stored on the host as their raw value (of `raw_type`);
    /// the synthesized accessors convert in both directions.
    pub fn raw_enumeration(type_name: &str, raw_type: NativeType, cases: EnumCases) -> Self {
        Self::raw_enumeration_with(type_name, raw_type, cases, Availability::Available)
    }

    pub fn raw_enumeration_with(
        type_name: &str,
        raw_type: NativeType,
        cases: EnumCases,
        availability: Availability,
    ) -> Self {
        let cases = cases.with_raw_type(raw_type.clone());
        let getter = accessors::raw_enum_getter(type_name, raw_type.clone(), cases.clone());
        let setter = accessors::raw_enum_setter(raw_type);
        Self {
            kind: TypeKind::Enum(NativeType::named(type_name), cases),
            availability,
            getter: Some(getter),
            setter: Some(setter),
        }
    }

    /// Placeholder for an attribute that does not exist on this host.
    pub fn unavailable(reason: Option<&str>) -> Self {
        Self::from_kind(
            TypeKind::Any(Primitive::Any.into()),
            Availability::unavailable(reason),
        )
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    pub fn getter(&self) -> Option<&Getter> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&Setter> {
        self.setter.as_ref()
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Coerce `value` to this descriptor's representation.
    ///
    /// Returns `None` when the value cannot be represented or the descriptor
    /// is unavailable.
    pub fn cast(&self, value: &Value) -> Option<Value> {
        if !self.is_available() {
            return None;
        }
        cast::cast_kind(&self.kind, value)
    }

    /// [`cast`](Self::cast) with a validation error naming `attribute`.
    ///
    /// # Errors
    ///
    /// [`CastError::Unavailable`] for unavailable descriptors,
    /// [`CastError::Mismatch`] when the value is rejected.
    pub fn try_cast(&self, value: &Value, attribute: &str) -> Result<Value, CastError> {
        if let Availability::Unavailable { reason } = &self.availability {
            return Err(CastError::Unavailable {
                attribute: attribute.to_string(),
                reason: reason.clone(),
            });
        }
        self.cast(value).ok_or_else(|| CastError::Mismatch {
            attribute: attribute.to_string(),
            expected: self.to_string(),
            found: value.to_string(),
        })
    }

    /// True if [`cast`](Self::cast) would succeed.
    pub fn matches(&self, value: &Value) -> bool {
        self.cast(value).is_some()
    }

    /// True if values of `native` are accepted as-is.
    ///
    /// Only native kinds answer; class, struct, pointer, protocol and
    /// enumeration kinds always report `false`.
    pub fn matches_type(&self, native: &NativeType) -> bool {
        if !self.is_available() {
            return false;
        }
        let TypeKind::Any(target) = &self.kind else {
            return false;
        };
        match (native, target) {
            (NativeType::Class(candidate), NativeType::Class(target)) => {
                candidate.is_subclass_of(target)
            }
            _ => native == target || native.name() == target.name(),
        }
    }

    // ========================================================================
    // Host access
    // ========================================================================

    /// Read attribute `key` from `object`.
    ///
    /// # Errors
    ///
    /// Whatever the host reports for the underlying access.
    pub fn get_value(&self, object: &dyn HostObject, key: &str) -> Result<Value, HostError> {
        match &self.getter {
            Some(getter) => getter(object, key),
            None => object.value_for_key(key),
        }
    }

    /// Cast `value` and write it to attribute `key` of `object`.
    ///
    /// # Errors
    ///
    /// [`AccessError::Cast`] if the value is rejected, [`AccessError::Host`]
    /// if the host refuses the write.
    pub fn set_value(
        &self,
        object: &dyn HostObject,
        key: &str,
        value: &Value,
    ) -> Result<(), AccessError> {
        let value = self.try_cast(value, key)?;
        match &self.setter {
            Some(setter) => setter(object, key, &value)?,
            None => object.set_value_for_key(key, value)?,
        }
        Ok(())
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.availability {
            Availability::Available => write!(f, "{}", self.kind),
            Availability::Unavailable { .. } => f.write_str(UNAVAILABLE),
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("kind", &self.kind)
            .field("availability", &self.availability)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        match (&self.availability, &other.availability) {
            (Availability::Available, Availability::Available) => {
                self.kind.to_string() == other.kind.to_string()
            }
            (Availability::Unavailable { reason: a }, Availability::Unavailable { reason: b }) => {
                a == b
            }
            _ => false,
        }
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::host::DetachedRuntime;
    use crate::value::{Number, StructValue};
    use std::collections::HashSet;

    #[test]
    fn test_of_special_cases_handles_and_strings() {
        assert_eq!(
            Descriptor::of(NativeType::named("CGColor")).kind(),
            &TypeKind::Pointer("CGColor".into())
        );
        assert_eq!(
            Descriptor::of(NativeType::named("CGPath")).kind(),
            &TypeKind::Pointer("CGPath".into())
        );
        assert_eq!(
            Descriptor::of(NativeType::named("NSString")).kind(),
            &TypeKind::Any(Primitive::String.into())
        );
        assert_eq!(
            Descriptor::of(Primitive::Double).kind(),
            &TypeKind::Any(Primitive::Double.into())
        );
    }

    #[test]
    fn test_named_resolution_order() {
        let catalog = Catalog::with_foundation();
        let font = Descriptor::named("UIFont", &catalog).unwrap();
        assert!(matches!(font.kind(), TypeKind::Any(NativeType::Class(_))));

        let delegate = Descriptor::named("UITableViewDelegate", &catalog).unwrap();
        assert!(matches!(delegate.kind(), TypeKind::Protocol(_)));

        let insets = Descriptor::named("UIEdgeInsets", &catalog).unwrap();
        assert_eq!(insets.to_string(), "UIEdgeInsets");

        let image = Descriptor::named("CGImage", &DetachedRuntime).unwrap();
        assert_eq!(image.kind(), &TypeKind::Pointer("CGImage".into()));

        assert_eq!(
            Descriptor::named("Nope", &catalog).unwrap_err(),
            DescriptorError::UnknownTypeName("Nope".into())
        );
    }

    #[test]
    fn test_selector_named_gets_accessors() {
        let sel = Descriptor::named("Selector", &DetachedRuntime).unwrap();
        assert!(sel.getter().is_some());
        assert!(Descriptor::of(Primitive::Int).getter().is_none());
    }

    #[test]
    fn test_unavailable_never_matches() {
        let desc = Descriptor::of_with(Primitive::Any, Availability::unavailable(None));
        assert_eq!(desc.cast(&Value::Int(1)), None);
        assert!(!desc.matches(&Value::from("x")));
        assert!(!desc.matches_type(&Primitive::Any.into()));
        assert_eq!(desc.to_string(), "<unavailable>");
        assert!(matches!(
            desc.try_cast(&Value::Int(1), "tint"),
            Err(CastError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_equality_and_hash() {
        let a = Descriptor::of(Primitive::CGFloat);
        let b = Descriptor::named("CGFloat", &DetachedRuntime).unwrap();
        assert_eq!(a, b);

        let gone_a = Descriptor::unavailable(Some("iOS 13"));
        let gone_b = Descriptor::unavailable(Some("iOS 14"));
        let gone_c = Descriptor::of_with(Primitive::Int, Availability::unavailable(Some("iOS 13")));
        assert_ne!(gone_a, gone_b);
        assert_eq!(gone_a, gone_c);
        assert_ne!(a, Descriptor::of_with(Primitive::CGFloat, Availability::unavailable(None)));

        let set: HashSet<Descriptor> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_matches_type() {
        let catalog = Catalog::with_foundation();
        let view = catalog.class_named("UIView").unwrap();
        let table = catalog.class_named("UITableView").unwrap();
        let desc = Descriptor::of(view.clone());

        assert!(desc.matches_type(&table.clone().into()));
        assert!(desc.matches_type(&NativeType::named("UIView")));
        assert!(!Descriptor::of(table).matches_type(&view.clone().into()));
        assert!(Descriptor::of(Primitive::Double).matches_type(&Primitive::Double.into()));
        assert!(!Descriptor::of(Primitive::Double).matches_type(&Primitive::Float.into()));
        assert!(!Descriptor::class(view.clone()).matches_type(&view.into()));
    }

    #[test]
    fn test_try_cast_reports_mismatch() {
        let desc = Descriptor::of(Primitive::Double);
        assert_eq!(
            desc.try_cast(&Value::Number(Number::Int(2)), "alpha"),
            Ok(Value::Double(2.0))
        );
        let err = desc.try_cast(&Value::from("big"), "alpha").unwrap_err();
        assert_eq!(err.to_string(), "alpha expects a value of type Double, found big");
    }

    #[test]
    fn test_struct_descriptor_from_encoding() {
        let desc = Descriptor::from_encoding("{CGRect={CGPoint=dd}{CGSize=dd}}", &DetachedRuntime)
            .unwrap();
        let rect = Value::Struct(StructValue::new("{CGRect={CGPoint=dd}{CGSize=dd}}", vec![0.0; 4]));
        let point = Value::Struct(StructValue::new("{CGPoint=dd}", vec![0.0; 2]));
        assert!(desc.matches(&rect));
        assert!(!desc.matches(&point));
    }

    #[test]
    fn test_debug_omits_closures() {
        let debug = format!("{:?}", Descriptor::selector_with(Availability::Available));
        assert!(debug.contains("getter: true"));
    }
}
