//! Read-only entity descriptors produced by discovery.
//!
//! Entities are materialized once by a [`Location`](crate::discovery::Location)
//! entry and then shared through `Arc` handles. Equality and hashing follow
//! the entity's qualified identity rather than pointer identity, so the same
//! type surfaced by two locations collapses to one element of a result set.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::modifiers;

/// Scope separator used in qualified type names.
pub const SCOPE_SEPARATOR: &str = "::";

/// True when `scope` equals `prefix` or is nested below it.
pub(crate) fn scope_is_under(scope: &str, prefix: &str) -> bool {
    scope == prefix
        || scope
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(SCOPE_SEPARATOR))
}

/// Shared handle to a materialized type.
pub type TypeHandle = Arc<TypeInfo>;
/// Shared handle to a materialized method.
pub type MethodHandle = Arc<MethodInfo>;
/// Shared handle to a materialized field.
pub type FieldHandle = Arc<FieldInfo>;

/// Qualified type path such as `app::model::User`.
///
/// Also used for type references (parameter, return and field types), where
/// builtin names like `i32` or `String` simply have an empty scope.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(Arc<str>);

impl TypeName {
    /// Build a name, trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref().trim()))
    }

    /// The name as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last `::`, or `""` for a top-level name.
    pub fn scope(&self) -> &str {
        self.0
            .rsplit_once(SCOPE_SEPARATOR)
            .map_or("", |(scope, _)| scope)
    }

    /// The last path segment.
    pub fn simple_name(&self) -> &str {
        self.0
            .rsplit_once(SCOPE_SEPARATOR)
            .map_or(&*self.0, |(_, name)| name)
    }

    /// True when this name is declared directly in `scope` (not in a nested scope).
    pub fn is_declared_in(&self, scope: &str) -> bool {
        self.scope() == scope
    }

    /// True when this name lives in `prefix` or any scope nested under it.
    pub fn is_under(&self, prefix: &str) -> bool {
        scope_is_under(self.scope(), prefix)
    }

    /// A qualified entity name must have no empty segments.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .split(SCOPE_SEPARATOR)
                .all(|segment| !segment.is_empty() && !segment.contains(char::is_whitespace))
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&TypeName> for TypeName {
    fn from(value: &TypeName) -> Self {
        value.clone()
    }
}

impl From<&TypeInfo> for TypeName {
    fn from(value: &TypeInfo) -> Self {
        value.name.clone()
    }
}

impl From<&TypeHandle> for TypeName {
    fn from(value: &TypeHandle) -> Self {
        value.name.clone()
    }
}

/// An annotation applied to a type, method or field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The annotation's own type; the only thing `tagged` compares
    #[serde(rename = "type")]
    pub annotation_type: TypeName,
    /// Attribute values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Annotation {
    /// An annotation of the given type with no attributes.
    pub fn new(annotation_type: impl Into<TypeName>) -> Self {
        Self {
            annotation_type: annotation_type.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Attach an attribute. Attributes never affect matching.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Structural category of a declared type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    /// Neither an interface nor an enumeration.
    Class,
    /// A pure contract; always abstract.
    Interface,
    /// An enumeration.
    Enum,
}

/// Attributes shared by every entity kind.
pub trait Member {
    /// Name used by `name()` filters: qualified for types, simple for members.
    fn name(&self) -> &str;

    /// Modifier bitmask (see [`crate::core::modifiers`]).
    fn modifiers(&self) -> u32;

    /// Annotations applied directly to this entity.
    fn annotations(&self) -> &[Annotation];

    /// Annotation presence by type; attribute values are not compared.
    fn is_annotated_with(&self, annotation_type: &TypeName) -> bool {
        self.annotations()
            .iter()
            .any(|annotation| &annotation.annotation_type == annotation_type)
    }
}

impl<T: Member + ?Sized> Member for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn modifiers(&self) -> u32 {
        (**self).modifiers()
    }

    fn annotations(&self) -> &[Annotation] {
        (**self).annotations()
    }
}

/// A declared type with its members.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub(crate) name: TypeName,
    pub(crate) kind: TypeKind,
    pub(crate) modifiers: u32,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) supertypes: BTreeSet<TypeName>,
    pub(crate) methods: Vec<MethodHandle>,
    pub(crate) fields: Vec<FieldHandle>,
}

impl TypeInfo {
    /// Fully qualified name.
    pub fn qualified_name(&self) -> &TypeName {
        &self.name
    }

    /// Class, interface or enum.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Every supertype of this type, transitively.
    pub fn supertypes(&self) -> &BTreeSet<TypeName> {
        &self.supertypes
    }

    /// Methods declared directly by this type.
    pub fn methods(&self) -> &[MethodHandle] {
        &self.methods
    }

    /// Fields declared directly by this type.
    pub fn fields(&self) -> &[FieldHandle] {
        &self.fields
    }

    /// True for interface types.
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// True for enumerations.
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    /// Carries the `ABSTRACT` bit. Always true for interfaces.
    pub fn is_abstract(&self) -> bool {
        modifiers::has_flags(self.modifiers, modifiers::ABSTRACT)
    }

    /// A value of this type can be used where `target` is expected.
    pub fn is_assignable_to(&self, target: &TypeName) -> bool {
        &self.name == target || self.supertypes.contains(target)
    }
}

impl Member for TypeInfo {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn modifiers(&self) -> u32 {
        self.modifiers
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A method declared by a type.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub(crate) declaring_type: TypeName,
    pub(crate) name: String,
    pub(crate) modifiers: u32,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) parameter_types: Vec<TypeName>,
    pub(crate) return_type: TypeName,
}

impl MethodInfo {
    /// The type that declares this member.
    pub fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    /// Declared parameter types, in order.
    pub fn parameter_types(&self) -> &[TypeName] {
        &self.parameter_types
    }

    /// Declared return type; `()` when none was given.
    pub fn return_type(&self) -> &TypeName {
        &self.return_type
    }
}

impl Member for MethodInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> u32 {
        self.modifiers
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl PartialEq for MethodInfo {
    fn eq(&self, other: &Self) -> bool {
        self.declaring_type == other.declaring_type
            && self.name == other.name
            && self.parameter_types == other.parameter_types
    }
}

impl Eq for MethodInfo {}

impl Hash for MethodInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring_type.hash(state);
        self.name.hash(state);
        self.parameter_types.hash(state);
    }
}

/// A field declared by a type.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub(crate) declaring_type: TypeName,
    pub(crate) name: String,
    pub(crate) modifiers: u32,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) field_type: TypeName,
}

impl FieldInfo {
    /// The type that declares this member.
    pub fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    /// Declared type of the field.
    pub fn field_type(&self) -> &TypeName {
        &self.field_type
    }
}

impl Member for FieldInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> u32 {
        self.modifiers
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl PartialEq for FieldInfo {
    fn eq(&self, other: &Self) -> bool {
        self.declaring_type == other.declaring_type && self.name == other.name
    }
}

impl Eq for FieldInfo {}

impl Hash for FieldInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring_type.hash(state);
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_splits_scope_and_simple_name() {
        let name = TypeName::new("app::model::User");
        assert_eq!(name.scope(), "app::model");
        assert_eq!(name.simple_name(), "User");

        let top = TypeName::new("i32");
        assert_eq!(top.scope(), "");
        assert_eq!(top.simple_name(), "i32");
    }

    #[test]
    fn declared_in_is_not_recursive() {
        let direct = TypeName::new("pkg1::Foo");
        let nested = TypeName::new("pkg1::sub::Bar");
        assert!(direct.is_declared_in("pkg1"));
        assert!(!nested.is_declared_in("pkg1"));
        assert!(nested.is_under("pkg1"));
    }

    #[test]
    fn is_under_respects_segment_boundaries() {
        let name = TypeName::new("stdx::Thing");
        assert!(!name.is_under("std"));
        assert!(TypeName::new("std::io::Error").is_under("std"));
    }

    #[test]
    fn well_formed_rejects_empty_segments() {
        assert!(TypeName::new("a::b::C").is_well_formed());
        assert!(!TypeName::new("a::::C").is_well_formed());
        assert!(!TypeName::new("").is_well_formed());
        assert!(!TypeName::new("a::B C").is_well_formed());
    }

    #[test]
    fn annotation_presence_ignores_attributes() {
        let field = FieldInfo {
            declaring_type: TypeName::new("app::Config"),
            name: "port".to_string(),
            modifiers: 0,
            annotations: vec![Annotation::new("serde::Default").with_attribute("value", "80")],
            field_type: TypeName::new("u16"),
        };
        assert!(field.is_annotated_with(&TypeName::new("serde::Default")));
        assert!(!field.is_annotated_with(&TypeName::new("serde::Rename")));
    }

    #[test]
    fn method_identity_includes_parameters() {
        let base = MethodInfo {
            declaring_type: TypeName::new("app::Io"),
            name: "write".to_string(),
            modifiers: 0,
            annotations: Vec::new(),
            parameter_types: vec![TypeName::new("String")],
            return_type: TypeName::new("()"),
        };
        let mut overload = base.clone();
        overload.parameter_types.push(TypeName::new("i32"));
        let mut same = base.clone();
        same.modifiers = modifiers::STATIC;

        assert_ne!(base, overload);
        assert_eq!(base, same);
    }
}
