//! Filters over declared fields.

use std::collections::HashSet;

use crate::core::model::{FieldHandle, TypeName};
use crate::discovery::Discovery;

use super::stage::{EntityKind, Filter};

/// Entity kind: fields declared by discovered types.
#[derive(Debug, Clone, Copy)]
pub struct Fields;

impl EntityKind for Fields {
    type Entity = FieldHandle;

    const LABEL: &'static str = "field";

    fn accumulate(discovery: &Discovery) -> HashSet<FieldHandle> {
        discovery
            .types()
            .iter()
            .flat_map(|ty| ty.fields().iter().cloned())
            .collect()
    }
}

/// A filter stage over declared fields.
pub type FieldFilter = Filter<Fields>;

impl Filter<Fields> {
    /// Keep fields declared with exactly `field_type`.
    pub fn of_type(&self, field_type: impl Into<TypeName>) -> Self {
        let field_type = field_type.into();
        self.derive(move |field| field.field_type() == &field_type)
    }
}
