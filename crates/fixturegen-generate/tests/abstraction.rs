use fixturegen_core::{
    Constraint, ConstraintSet, GenericDefinition, Member, ObjectShape, Shape, Value,
};
use fixturegen_generate::providers::{AbstractionProvider, GenericAbstractionProvider};
use fixturegen_generate::{Engine, GenerationError, GenerationSettings};

fn planet() -> Shape {
    ObjectShape::builder("Planet")
        .default_constructor()
        .member(Member::new("Moons", Shape::U8))
        .build()
        .into()
}

#[test]
fn explicit_mapping_generates_the_concrete_shape() {
    let mut engine = Engine::seeded(GenerationSettings::default(), 5);
    let provider = AbstractionProvider::new()
        .with_mapping(Shape::abstraction("IPlanet"), planet())
        .unwrap();
    engine.registry_mut().insert(0, Box::new(provider)).unwrap();

    for _ in 0..50 {
        let value = engine
            .generate(&Shape::abstraction("IPlanet"), &ConstraintSet::new())
            .unwrap();
        let object = value.as_object().expect("object value");
        assert_eq!(object.type_name(), "Planet");
        assert!(matches!(object.get("Moons"), Some(Value::U8(_))));
    }
}

#[test]
fn unmapped_abstractions_have_no_provider() {
    let engine = Engine::seeded(GenerationSettings::default(), 5);
    assert!(matches!(
        engine.generate(&Shape::abstraction("IMoon"), &ConstraintSet::new()),
        Err(GenerationError::NoProvider(_))
    ));
}

#[test]
fn mapping_a_concrete_source_is_rejected() {
    let mut provider = AbstractionProvider::new();
    assert!(matches!(
        provider.map(planet(), planet()),
        Err(GenerationError::NotAbstract(_))
    ));
    assert!(matches!(
        provider.map(Shape::list(Shape::I32), Shape::list(Shape::I32)),
        Err(GenerationError::NotAbstract(_))
    ));
    assert!(provider.is_empty());
    provider
        .map(Shape::list_interface(Shape::I32), Shape::array(Shape::I32))
        .unwrap();
    assert_eq!(provider.len(), 1);
}

#[test]
fn explicit_mapping_forwards_constraints() {
    let mut engine = Engine::seeded(GenerationSettings::default(), 8);
    let provider = AbstractionProvider::new()
        .with_mapping(Shape::abstraction("IName"), Shape::String)
        .unwrap();
    engine.registry_mut().push(Box::new(provider));
    let constraints = ConstraintSet::required()
        .with(Constraint::MinLength(0))
        .with(Constraint::MaxLength(4));
    for _ in 0..200 {
        let value = engine
            .generate(&Shape::abstraction("IName"), &constraints)
            .unwrap();
        assert!(value.len().unwrap() < 4);
    }
}

#[test]
fn generic_interfaces_resolve_to_concrete_definitions() {
    let engine = Engine::seeded(GenerationSettings::default(), 12);
    let list = engine
        .generate(&Shape::list_interface(Shape::I32), &ConstraintSet::new())
        .unwrap();
    assert!(matches!(list, Value::List(_)));

    let map = engine
        .generate(
            &Shape::map_interface(Shape::U8, Shape::String),
            &ConstraintSet::new(),
        )
        .unwrap();
    let Value::Map(map) = map else {
        panic!("expected a map");
    };
    assert!(map.iter().all(|(key, value)| {
        matches!(key, Value::U8(_)) && matches!(value, Value::String(_))
    }));
}

#[test]
fn generic_mappings_are_extendable() {
    let mut engine = Engine::seeded(GenerationSettings::default(), 12);
    let mut provider = GenericAbstractionProvider::new();
    provider
        .map_definition(GenericDefinition::ListInterface, GenericDefinition::Sequence)
        .unwrap();
    engine.registry_mut().insert(0, Box::new(provider)).unwrap();
    let value = engine
        .generate(&Shape::list_interface(Shape::BOOL), &ConstraintSet::new())
        .unwrap();
    assert!(matches!(value, Value::Sequence(_)));
}

#[test]
fn generic_mapping_rejects_concrete_sources_and_arity_changes() {
    let mut provider = GenericAbstractionProvider::new();
    assert!(matches!(
        provider.map_definition(GenericDefinition::List, GenericDefinition::List),
        Err(GenerationError::NotAbstract(_))
    ));
    assert!(matches!(
        provider.map_definition(GenericDefinition::MapInterface, GenericDefinition::List),
        Err(GenerationError::ArityMismatch { .. })
    ));
}
