//! Filters over declared types.

use std::collections::HashSet;

use crate::core::model::{TypeHandle, TypeInfo, TypeName};
use crate::discovery::Discovery;

use super::stage::{EntityKind, Filter};

/// Entity kind: declared types.
#[derive(Debug, Clone, Copy)]
pub struct Types;

impl EntityKind for Types {
    type Entity = TypeHandle;

    const LABEL: &'static str = "type";

    fn accumulate(discovery: &Discovery) -> HashSet<TypeHandle> {
        discovery.types()
    }
}

/// A filter stage over declared types.
pub type TypeFilter = Filter<Types>;

impl Filter<Types> {
    /// Keep types that are neither interfaces nor enums.
    pub fn classes(&self) -> Self {
        self.derive(|ty| !ty.is_interface() && !ty.is_enum())
    }

    /// Keep enumerations.
    pub fn enums(&self) -> Self {
        self.derive(|ty| ty.is_enum())
    }

    /// Keep interfaces.
    pub fn interfaces(&self) -> Self {
        self.derive(|ty| ty.is_interface())
    }

    /// Keep instantiable types: not an interface and not marked abstract.
    pub fn non_abstract(&self) -> Self {
        self.derive(|ty| !(ty.is_interface() || ty.is_abstract()))
    }

    /// Keep types assignable to `supertype` (the type itself or a subtype).
    pub fn extending(&self, supertype: impl Into<TypeName>) -> Self {
        let supertype = supertype.into();
        self.derive(move |ty| ty.is_assignable_to(&supertype))
    }

    /// Keep types `child` is assignable to (`child` itself or a supertype).
    pub fn supering(&self, child: &TypeInfo) -> Self {
        let child_name = child.qualified_name().clone();
        let child_supertypes = child.supertypes().clone();
        self.derive(move |ty| {
            ty.qualified_name() == &child_name || child_supertypes.contains(ty.qualified_name())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::TypeDescriptor;
    use crate::core::model::Member;
    use crate::core::modifiers::{ABSTRACT, PUBLIC};
    use crate::discovery::{LoadContext, Module};

    fn catalog() -> TypeFilter {
        let module = Module::new("zoo")
            .declare(TypeDescriptor::interface("zoo::Animal").modifiers(PUBLIC))
            .declare(
                TypeDescriptor::class("zoo::Mammal")
                    .modifiers(PUBLIC | ABSTRACT)
                    .extends("zoo::Animal"),
            )
            .declare(
                TypeDescriptor::class("zoo::Dog")
                    .modifiers(PUBLIC)
                    .extends("zoo::Mammal")
                    .extends("zoo::Animal")
                    .annotated("zoo::Tame"),
            )
            .declare(TypeDescriptor::enumeration("zoo::Diet").modifiers(PUBLIC));
        let context = LoadContext::new("zoo").with_location(module).into_shared();
        Filter::root(Discovery::context(context))
    }

    fn names(filter: &TypeFilter) -> Vec<String> {
        let mut names: Vec<_> = filter.find().iter().map(|t| t.name().to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn structural_kinds_partition_types() {
        let all = catalog();
        assert_eq!(names(&all.classes()), vec!["zoo::Dog", "zoo::Mammal"]);
        assert_eq!(names(&all.interfaces()), vec!["zoo::Animal"]);
        assert_eq!(names(&all.enums()), vec!["zoo::Diet"]);
    }

    #[test]
    fn non_abstract_excludes_interfaces_and_abstract_classes() {
        assert_eq!(
            names(&catalog().non_abstract()),
            vec!["zoo::Diet", "zoo::Dog"]
        );
    }

    #[test]
    fn extending_includes_the_type_itself() {
        assert_eq!(
            names(&catalog().extending("zoo::Mammal")),
            vec!["zoo::Dog", "zoo::Mammal"]
        );
        assert_eq!(
            names(&catalog().extending("zoo::Animal")),
            vec!["zoo::Animal", "zoo::Dog", "zoo::Mammal"]
        );
    }

    #[test]
    fn supering_walks_up_from_the_child() {
        let all = catalog();
        let dog = all
            .name("zoo::Dog")
            .find()
            .iter()
            .next()
            .cloned()
            .expect("dog is declared");

        assert_eq!(
            names(&all.supering(&dog)),
            vec!["zoo::Animal", "zoo::Dog", "zoo::Mammal"]
        );
        assert_eq!(
            names(&all.classes().supering(&dog)),
            vec!["zoo::Dog", "zoo::Mammal"]
        );
    }

    #[test]
    fn tagged_and_name_compose_with_kind_predicates() {
        let all = catalog();
        assert_eq!(names(&all.tagged(["zoo::Tame"])), vec!["zoo::Dog"]);
        assert!(!all.tagged(["zoo::Tame", "zoo::Wild"]).is_match());
        assert!(all.name("zoo::Diet").enums().is_match());
        assert!(!all.name("Diet").is_match());
    }
}
