//! Serializable type descriptors and their materialization into entities.
//!
//! Descriptors are what locations store: in-memory modules build them with
//! the builder methods below, manifest files deserialize them from YAML or
//! JSON. [`TypeDescriptor::materialize`] validates a descriptor and produces
//! the read-only [`TypeInfo`] that filters operate on.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SiftError};
use crate::core::model::{
    Annotation, FieldInfo, MethodInfo, TypeInfo, TypeKind, TypeName,
};
use crate::core::modifiers;

/// Modifier bits, written either as a raw integer or as keyword names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierSpec {
    /// Raw bits, e.g. `9`
    Bits(u32),
    /// Keyword names, e.g. `[public, static]`
    Names(Vec<String>),
}

impl Default for ModifierSpec {
    fn default() -> Self {
        Self::Bits(0)
    }
}

impl ModifierSpec {
    /// Resolve to a bitmask, failing on unknown keywords.
    pub fn resolve(&self) -> Result<u32> {
        match self {
            Self::Bits(bits) => Ok(*bits),
            Self::Names(names) => names.iter().try_fold(0, |mask, name| {
                modifiers::from_name(name).map(|bits| mask | bits).ok_or_else(|| {
                    SiftError::validation_field(format!("unknown modifier '{name}'"), "modifiers")
                })
            }),
        }
    }
}

/// An annotation as written in a descriptor: a bare type name or a full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationSpec {
    /// Just the annotation type
    Name(String),
    /// Type plus attributes
    Full {
        /// Annotation type
        #[serde(rename = "type")]
        annotation_type: String,
        /// Attribute values, carried but never matched
        #[serde(default)]
        attributes: BTreeMap<String, String>,
    },
}

impl AnnotationSpec {
    fn resolve(&self) -> Result<Annotation> {
        let (annotation_type, attributes) = match self {
            Self::Name(name) => (TypeName::new(name), BTreeMap::new()),
            Self::Full {
                annotation_type,
                attributes,
            } => (TypeName::new(annotation_type), attributes.clone()),
        };
        if !annotation_type.is_well_formed() {
            return Err(SiftError::validation_field(
                format!("invalid annotation type '{annotation_type}'"),
                "annotations",
            ));
        }
        Ok(Annotation {
            annotation_type,
            attributes,
        })
    }
}

fn resolve_annotations(specs: &[AnnotationSpec]) -> Result<Vec<Annotation>> {
    specs.iter().map(AnnotationSpec::resolve).collect()
}

fn type_reference(raw: &str, field: &str) -> Result<TypeName> {
    let name = TypeName::new(raw);
    if name.as_str().is_empty() {
        return Err(SiftError::validation_field("empty type reference", field));
    }
    Ok(name)
}

/// Descriptor of a declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDescriptor {
    /// Qualified name, e.g. `app::model::User`
    pub name: String,
    /// Defaults to `class`
    #[serde(default)]
    pub kind: TypeKind,
    /// Modifier bits or names
    #[serde(default)]
    pub modifiers: ModifierSpec,
    /// Annotations on the type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSpec>,
    /// Every supertype, transitively. Assignability checks do not walk the catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<String>,
    /// Declared methods
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDescriptor>,
    /// Declared fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// A descriptor with no modifiers, annotations, supertypes or members.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Shorthand for `new(name, TypeKind::Class)`.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// Shorthand for `new(name, TypeKind::Interface)`.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Shorthand for `new(name, TypeKind::Enum)`.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Enum)
    }

    /// Set the modifier bits.
    pub fn modifiers(mut self, bits: u32) -> Self {
        self.modifiers = ModifierSpec::Bits(bits);
        self
    }

    /// Add an annotation by type name.
    pub fn annotated(mut self, annotation_type: impl Into<String>) -> Self {
        self.annotations
            .push(AnnotationSpec::Name(annotation_type.into()));
        self
    }

    /// Add a supertype. List every ancestor, not just the direct parent.
    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Declare a method.
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate the descriptor and build the entity it describes.
    ///
    /// Interfaces always carry the `INTERFACE` and `ABSTRACT` bits, whatever
    /// the descriptor says.
    pub fn materialize(&self) -> Result<TypeInfo> {
        let name = TypeName::new(&self.name);
        if !name.is_well_formed() {
            return Err(SiftError::resolution(
                &self.name,
                "type name must be a non-empty `::` separated path",
            ));
        }

        self.build(name.clone())
            .map_err(|err| SiftError::resolution(name.as_str(), err.to_string()))
    }

    fn build(&self, name: TypeName) -> Result<TypeInfo> {
        let mut bits = self.modifiers.resolve()?;
        if self.kind == TypeKind::Interface {
            bits |= modifiers::INTERFACE | modifiers::ABSTRACT;
        }

        let supertypes = self
            .supertypes
            .iter()
            .map(|raw| type_reference(raw, "supertypes"))
            .filter(|parsed| !matches!(parsed, Ok(supertype) if *supertype == name))
            .collect::<Result<BTreeSet<_>>>()?;

        let methods = self
            .methods
            .iter()
            .map(|method| method.materialize(&name).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let fields = self
            .fields
            .iter()
            .map(|field| field.materialize(&name).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        Ok(TypeInfo {
            annotations: resolve_annotations(&self.annotations)?,
            name,
            kind: self.kind,
            modifiers: bits,
            supertypes,
            methods,
            fields,
        })
    }
}

fn default_return_type() -> String {
    "()".to_string()
}

/// Descriptor of a method declared by a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDescriptor {
    /// Simple method name
    pub name: String,
    /// Modifier bits or names
    #[serde(default)]
    pub modifiers: ModifierSpec,
    /// Annotations on the method
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSpec>,
    /// Parameter types, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    /// Return type, `()` by default
    #[serde(default = "default_return_type")]
    pub returns: String,
}

impl MethodDescriptor {
    /// A method taking nothing and returning `()`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: ModifierSpec::default(),
            annotations: Vec::new(),
            params: Vec::new(),
            returns: default_return_type(),
        }
    }

    /// Set the modifier bits.
    pub fn modifiers(mut self, bits: u32) -> Self {
        self.modifiers = ModifierSpec::Bits(bits);
        self
    }

    /// Add an annotation by type name.
    pub fn annotated(mut self, annotation_type: impl Into<String>) -> Self {
        self.annotations
            .push(AnnotationSpec::Name(annotation_type.into()));
        self
    }

    /// Set the parameter types.
    pub fn params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Set the return type.
    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.returns = return_type.into();
        self
    }

    fn materialize(&self, declaring_type: &TypeName) -> Result<MethodInfo> {
        if self.name.trim().is_empty() {
            return Err(SiftError::validation_field("method without a name", "methods"));
        }

        Ok(MethodInfo {
            declaring_type: declaring_type.clone(),
            name: self.name.trim().to_string(),
            modifiers: self.modifiers.resolve()?,
            annotations: resolve_annotations(&self.annotations)?,
            parameter_types: self
                .params
                .iter()
                .map(|raw| type_reference(raw, "params"))
                .collect::<Result<_>>()?,
            return_type: type_reference(&self.returns, "returns")?,
        })
    }
}

/// Descriptor of a field declared by a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Simple field name
    pub name: String,
    /// Declared type, written `type`
    #[serde(rename = "type")]
    pub field_type: String,
    /// Modifier bits or names
    #[serde(default)]
    pub modifiers: ModifierSpec,
    /// Annotations on the field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSpec>,
}

impl FieldDescriptor {
    /// A field with no modifiers.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            modifiers: ModifierSpec::default(),
            annotations: Vec::new(),
        }
    }

    /// Set the modifier bits.
    pub fn modifiers(mut self, bits: u32) -> Self {
        self.modifiers = ModifierSpec::Bits(bits);
        self
    }

    /// Add an annotation by type name.
    pub fn annotated(mut self, annotation_type: impl Into<String>) -> Self {
        self.annotations
            .push(AnnotationSpec::Name(annotation_type.into()));
        self
    }

    fn materialize(&self, declaring_type: &TypeName) -> Result<FieldInfo> {
        if self.name.trim().is_empty() {
            return Err(SiftError::validation_field("field without a name", "fields"));
        }

        Ok(FieldInfo {
            declaring_type: declaring_type.clone(),
            name: self.name.trim().to_string(),
            modifiers: self.modifiers.resolve()?,
            annotations: resolve_annotations(&self.annotations)?,
            field_type: type_reference(&self.field_type, "type")?,
        })
    }
}
