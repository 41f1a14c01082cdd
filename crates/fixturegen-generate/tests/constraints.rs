use fixturegen_core::{Constraint, ConstraintSet, Percentage, Shape, Value};
use fixturegen_generate::{CharEncoding, Engine, GenerationError, GenerationSettings};

const SAMPLES: usize = 1_000;

fn engine_with(settings: GenerationSettings) -> Engine {
    Engine::seeded(settings, 2024)
}

#[test]
fn string_lengths_honor_bounds() {
    let engine = engine_with(GenerationSettings::default());
    let constraints = ConstraintSet::new()
        .with(Constraint::MinLength(3))
        .with(Constraint::MaxLength(24));
    for _ in 0..SAMPLES {
        let value = engine.generate(&Shape::String, &constraints).unwrap();
        let length = value.len().expect("string value");
        assert!((3..24).contains(&length), "length {length} out of range");
    }
}

#[test]
fn default_string_bounds_apply_without_markers() {
    let settings = GenerationSettings {
        encoding: CharEncoding::Latin1,
        min_string_length: 4,
        max_string_length: 9,
        ..GenerationSettings::default()
    };
    let engine = engine_with(settings);
    for _ in 0..SAMPLES {
        let value = engine.generate(&Shape::String, &ConstraintSet::new()).unwrap();
        assert!((4..9).contains(&value.len().unwrap()));
    }
}

#[test]
fn equal_bounds_yield_exact_length() {
    let engine = engine_with(GenerationSettings::default());
    let constraints = ConstraintSet::new()
        .with(Constraint::MinLength(5))
        .with(Constraint::MaxLength(5));
    let value = engine.generate(&Shape::String, &constraints).unwrap();
    assert_eq!(value.len(), Some(5));
    let value = engine.generate(&Shape::list(Shape::U8), &constraints).unwrap();
    assert_eq!(value.len(), Some(5));
}

#[test]
fn inverted_bounds_are_rejected() {
    let engine = engine_with(GenerationSettings::default());
    let constraints = ConstraintSet::new()
        .with(Constraint::MinLength(10))
        .with(Constraint::MaxLength(4));
    for shape in [
        Shape::String,
        Shape::array(Shape::I32),
        Shape::list(Shape::I32),
        Shape::sequence(Shape::I32),
        Shape::map(Shape::I32, Shape::I32),
    ] {
        let err = engine.generate(&shape, &constraints).unwrap_err();
        assert!(
            matches!(err, GenerationError::InvalidBounds { min: 10, max: 4, .. }),
            "{shape}: {err}"
        );
    }
}

#[test]
fn map_sizes_honor_markers() {
    let engine = engine_with(GenerationSettings::default());
    let constraints = ConstraintSet::new()
        .with(Constraint::MinLength(4))
        .with(Constraint::MaxLength(8));
    let shape = Shape::map(Shape::I64, Shape::String);
    for _ in 0..SAMPLES {
        let value = engine.generate(&shape, &constraints).unwrap();
        let size = value.len().unwrap();
        assert!((4..8).contains(&size), "size {size} out of range");
    }
}

fn sequence_shapes() -> [Shape; 4] {
    [
        Shape::array(Shape::I32),
        Shape::list(Shape::I32),
        Shape::list_interface(Shape::I32),
        Shape::sequence(Shape::I32),
    ]
}

#[test]
fn sequence_sizes_honor_min_length() {
    let engine = engine_with(GenerationSettings::default());
    let constraints = ConstraintSet::new().with(Constraint::MinLength(4));
    for shape in sequence_shapes() {
        for _ in 0..SAMPLES {
            let size = engine.generate(&shape, &constraints).unwrap().len().unwrap();
            assert!((4..32).contains(&size), "{shape}: size {size} out of range");
        }
    }
}

#[test]
fn sequence_sizes_honor_max_length() {
    let engine = engine_with(GenerationSettings::default());
    let constraints = ConstraintSet::new()
        .with(Constraint::MinLength(0))
        .with(Constraint::MaxLength(8));
    for shape in sequence_shapes() {
        for _ in 0..SAMPLES {
            let size = engine.generate(&shape, &constraints).unwrap().len().unwrap();
            assert!(size < 8, "{shape}: size {size} out of range");
        }
    }
}

#[test]
fn map_keys_are_never_null() {
    let settings = GenerationSettings {
        null_chance: Percentage::ALWAYS,
        ..GenerationSettings::default()
    };
    let engine = engine_with(settings);
    let constraints = ConstraintSet::new()
        .with(Constraint::MinLength(5))
        .with(Constraint::MaxLength(6));
    for shape in [
        Shape::map(Shape::String, Shape::U8),
        Shape::map(Shape::optional(Shape::I32), Shape::U8),
    ] {
        for _ in 0..100 {
            let Value::Map(map) = engine.generate(&shape, &constraints).unwrap() else {
                panic!("expected a map for {shape}");
            };
            assert!(map.iter().all(|(key, _)| !key.is_null()));
        }
    }
}

#[test]
fn container_sizes_use_sequence_defaults() {
    let engine = engine_with(GenerationSettings::default());
    for shape in [Shape::array(Shape::BOOL), Shape::sequence(Shape::U16)] {
        for _ in 0..200 {
            let size = engine
                .generate(&shape, &ConstraintSet::new())
                .unwrap()
                .len()
                .unwrap();
            assert!((8..32).contains(&size));
        }
    }
}

#[test]
fn markers_do_not_leak_into_elements() {
    let engine = engine_with(GenerationSettings::default());
    let constraints = ConstraintSet::new()
        .with(Constraint::MinLength(1))
        .with(Constraint::MaxLength(3));
    let value = engine.generate(&Shape::list(Shape::String), &constraints).unwrap();
    for item in value.as_items().unwrap() {
        assert!(item.len().unwrap() >= 16);
    }
}

#[test]
fn required_never_yields_null() {
    let settings = GenerationSettings {
        null_chance: Percentage::ALWAYS,
        ..GenerationSettings::default()
    };
    let engine = engine_with(settings);
    for shape in [Shape::String, Shape::optional(Shape::I32)] {
        for _ in 0..SAMPLES {
            let value = engine.generate(&shape, &ConstraintSet::required()).unwrap();
            assert!(!value.is_null());
        }
        let value = engine.generate(&shape, &ConstraintSet::new()).unwrap();
        assert!(value.is_null());
    }
}

#[test]
fn null_frequency_tracks_chance() {
    let mut engine = engine_with(GenerationSettings::default());
    engine.set_null_chance(Percentage::from_int(50).unwrap());
    let nulls = (0..2_000)
        .filter(|_| {
            engine
                .generate(&Shape::optional(Shape::U8), &ConstraintSet::new())
                .unwrap()
                .is_null()
        })
        .count();
    assert!((800..1_200).contains(&nulls), "{nulls} nulls out of 2000");
}

#[test]
fn optional_strings_take_a_single_null_draw() {
    let mut engine = engine_with(GenerationSettings::default());
    engine.set_null_chance(Percentage::from_int(50).unwrap());
    let shape = Shape::optional(Shape::String);
    let nulls = (0..4_000)
        .filter(|_| {
            engine
                .generate(&shape, &ConstraintSet::new())
                .unwrap()
                .is_null()
        })
        .count();
    assert!((1_700..2_300).contains(&nulls), "{nulls} nulls out of 4000");
}

#[test]
fn value_shapes_never_roll() {
    let settings = GenerationSettings {
        null_chance: Percentage::ALWAYS,
        ..GenerationSettings::default()
    };
    let engine = engine_with(settings);
    for shape in [Shape::I32, Shape::list(Shape::U8), Shape::pair(Shape::U8, Shape::U8)] {
        assert!(!engine.generate(&shape, &ConstraintSet::new()).unwrap().is_null());
    }
}

#[test]
fn per_provider_null_chance_overrides_global() {
    let mut engine = engine_with(GenerationSettings::default());
    engine.set_null_chance_for("string", Percentage::ALWAYS);
    let value = engine.generate(&Shape::String, &ConstraintSet::new()).unwrap();
    assert_eq!(value, Value::Null);
    let optional = Shape::optional(Shape::String);
    for _ in 0..100 {
        let value = engine.generate(&optional, &ConstraintSet::new()).unwrap();
        assert!(!value.is_null());
    }
    engine.set_null_chance_for("nullable", Percentage::ALWAYS);
    let value = engine.generate(&optional, &ConstraintSet::new()).unwrap();
    assert_eq!(value, Value::Null);

    engine.reset_null_chance_for("string");
    let value = engine.generate(&Shape::String, &ConstraintSet::new()).unwrap();
    assert!(!value.is_null());
}
