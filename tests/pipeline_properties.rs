use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use typesift::modifiers::{ABSTRACT, FINAL, PRIVATE, PUBLIC, STATIC};
use typesift::{
    fields_in, methods_in, types_in, FieldDescriptor, LoadContext, MethodDescriptor, Module,
    TypeDescriptor, TypeFilter,
};

const MODIFIER_CYCLE: [u32; 5] = [PUBLIC, PUBLIC | STATIC, PRIVATE, PUBLIC | FINAL, PUBLIC | ABSTRACT];

fn catalog_module(id: &str) -> Module {
    (0..24).fold(Module::new(id), |module, i| {
        let mut descriptor = TypeDescriptor::class(format!("cat::T{i:02}"))
            .modifiers(MODIFIER_CYCLE[i % MODIFIER_CYCLE.len()]);
        if i % 3 == 0 {
            descriptor = descriptor.annotated("cat::Marker");
        }
        if i % 4 == 0 {
            descriptor = descriptor.extends("cat::Base");
        }
        module.declare(descriptor)
    })
}

fn catalog() -> Arc<LoadContext> {
    LoadContext::new("catalog")
        .with_location(catalog_module("cat"))
        .into_shared()
}

fn apply(filter: &TypeFilter, predicate: usize) -> TypeFilter {
    match predicate {
        0 => filter.mask(PUBLIC),
        1 => filter.mods(&[STATIC]),
        2 => filter.tagged(["cat::Marker"]),
        3 => filter.matching(|ty| ty.qualified_name().simple_name() < "T12"),
        _ => filter.extending("cat::Base"),
    }
}

fn names(filter: &TypeFilter) -> Vec<String> {
    let mut names: Vec<_> = filter
        .find()
        .iter()
        .map(|ty| ty.qualified_name().to_string())
        .collect();
    names.sort();
    names
}

proptest! {
    #[test]
    fn conjunction_is_order_independent(
        order in Just((0..5usize).collect::<Vec<_>>()).prop_shuffle(),
        len in 1usize..=5,
    ) {
        let root = types_in(&catalog());
        let chosen = &order[..len];

        let shuffled = chosen.iter().fold(root.clone(), |f, &p| apply(&f, p));
        let mut canonical_order = chosen.to_vec();
        canonical_order.sort_unstable();
        let canonical = canonical_order.iter().fold(root, |f, &p| apply(&f, p));

        prop_assert_eq!(names(&shuffled), names(&canonical));
    }

    #[test]
    fn find_is_the_intersection_of_single_predicates(
        chosen in proptest::sample::subsequence((0..5usize).collect::<Vec<_>>(), 0..=5),
    ) {
        let root = types_in(&catalog());
        let chain = chosen.iter().fold(root.clone(), |f, &p| apply(&f, p));

        let mut expected: HashSet<String> = names(&root).into_iter().collect();
        for &p in &chosen {
            let single: HashSet<String> = names(&apply(&root, p)).into_iter().collect();
            expected = expected.intersection(&single).cloned().collect();
        }

        let actual: HashSet<String> = names(&chain).into_iter().collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(chain.is_match(), !chain.find().is_empty());
    }
}

#[test]
fn same_type_in_two_locations_is_reported_once() {
    let parent = LoadContext::new("parent")
        .with_location(catalog_module("cat-a"))
        .into_shared();
    let child = LoadContext::new("child")
        .with_location(catalog_module("cat-b"))
        .with_parent(parent)
        .into_shared();

    assert_eq!(types_in(&child).find().len(), 24);
    assert_eq!(types_in(&child).name("cat::T05").find().len(), 1);
}

#[test]
fn mask_semantics_on_three_entities() {
    let context = LoadContext::new("masks")
        .with_location(
            Module::new("masks")
                .declare(TypeDescriptor::class("m::A").modifiers(PUBLIC | STATIC))
                .declare(TypeDescriptor::class("m::B").modifiers(PUBLIC))
                .declare(TypeDescriptor::class("m::C").modifiers(PRIVATE)),
        )
        .into_shared();
    let root = types_in(&context);

    assert_eq!(names(&root.mask(PUBLIC)), vec!["m::A", "m::B"]);
    assert_eq!(names(&root.mask(PUBLIC | STATIC)), vec!["m::A"]);
    assert_eq!(names(&root.mask(PRIVATE)), vec!["m::C"]);
    assert_eq!(names(&root.mask(0)).len(), 3);
}

#[test]
fn returns_and_params_match_exactly() {
    let context = LoadContext::new("sigs")
        .with_location(
            Module::new("sigs").declare(
                TypeDescriptor::class("sig::Codec")
                    .method(MethodDescriptor::new("size").returns("i32"))
                    .method(MethodDescriptor::new("len").returns("i64"))
                    .method(MethodDescriptor::new("encode").params(["String"]).returns("Vec<u8>"))
                    .method(
                        MethodDescriptor::new("encode")
                            .params(["String", "i32"])
                            .returns("Vec<u8>"),
                    ),
            ),
        )
        .into_shared();

    let int_returning = methods_in(&context).returns("i32");
    assert_eq!(int_returning.find().len(), 1);
    assert!(int_returning.find().iter().all(|m| m.return_type().as_str() == "i32"));

    let one_string = methods_in(&context).params(["String"]);
    assert_eq!(one_string.find().len(), 1);
    assert!(!methods_in(&context).params(["i32", "String"]).is_match());
}

#[test]
fn field_roots_see_fields_of_context_types() {
    let context = LoadContext::new("fields")
        .with_location(
            Module::new("fields").declare(
                TypeDescriptor::class("f::Limits")
                    .field(FieldDescriptor::new("MAX", "usize").modifiers(PUBLIC | STATIC | FINAL))
                    .field(FieldDescriptor::new("current", "usize").modifiers(PRIVATE)),
            ),
        )
        .into_shared();

    let constants = fields_in(&context).mods(&[STATIC, FINAL]).of_type("usize");
    assert_eq!(constants.find().len(), 1);
    assert!(constants.find().iter().all(|f| f.declaring_type().as_str() == "f::Limits"));
}

#[test]
fn nine_of_ten_resolvable_entries_are_found() {
    let module = (0..9)
        .fold(Module::new("flaky"), |module, i| {
            module.declare(TypeDescriptor::class(format!("flaky::Ok{i}")))
        })
        .declare(TypeDescriptor::class("flaky::Bad").extends("").modifiers(PUBLIC));
    let context = LoadContext::new("flaky").with_location(module).into_shared();

    let root = types_in(&context);
    assert_eq!(root.find().len(), 9);
    assert!(!root.name("flaky::Bad").is_match());
}
