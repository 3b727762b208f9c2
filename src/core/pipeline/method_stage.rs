//! Filters over declared methods.

use std::collections::HashSet;

use crate::core::model::{MethodHandle, TypeName};
use crate::discovery::Discovery;

use super::stage::{EntityKind, Filter};

/// Entity kind: methods declared by discovered types.
#[derive(Debug, Clone, Copy)]
pub struct Methods;

impl EntityKind for Methods {
    type Entity = MethodHandle;

    const LABEL: &'static str = "method";

    fn accumulate(discovery: &Discovery) -> HashSet<MethodHandle> {
        discovery
            .types()
            .iter()
            .flat_map(|ty| ty.methods().iter().cloned())
            .collect()
    }
}

/// A filter stage over declared methods.
pub type MethodFilter = Filter<Methods>;

impl Filter<Methods> {
    /// Keep methods whose parameter types equal `types` exactly, in order.
    pub fn params<I, T>(&self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        let expected: Vec<TypeName> = types.into_iter().map(Into::into).collect();
        self.derive(move |method| method.parameter_types() == expected.as_slice())
    }

    /// Keep methods whose return type is exactly `return_type`.
    pub fn returns(&self, return_type: impl Into<TypeName>) -> Self {
        let return_type = return_type.into();
        self.derive(move |method| method.return_type() == &return_type)
    }
}
