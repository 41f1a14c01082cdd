use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDateTime};
use fixturegen_core::Percentage;
use fixturegen_generate::{Engine, GenerationSettings};
use uuid::Uuid;

#[test]
fn generates_typed_values() {
    let engine = Engine::seeded(GenerationSettings::default(), 31);
    let id: Uuid = engine.generate_fixture().unwrap();
    assert_eq!(id.get_version_num(), 4);

    let when: NaiveDateTime = engine.generate_fixture().unwrap();
    assert!((1..10_000).contains(&when.year()));

    let words: Vec<String> = engine.generate_fixture().unwrap();
    assert!((8..32).contains(&words.len()));

    let lookup: HashMap<i64, bool> = engine.generate_fixture().unwrap();
    assert!(!lookup.is_empty());

    let ordered: BTreeMap<u32, (u8, char)> = engine.generate_fixture().unwrap();
    assert!(!ordered.is_empty());
}

#[test]
fn top_level_fixtures_are_required() {
    let settings = GenerationSettings {
        null_chance: Percentage::ALWAYS,
        ..GenerationSettings::default()
    };
    let engine = Engine::seeded(settings, 31);
    let names: Vec<String> = engine.generate_fixtures(20).unwrap();
    assert_eq!(names.len(), 20);

    let maybe: Option<u8> = engine.generate_fixture().unwrap();
    assert_eq!(maybe, None);
}

#[test]
fn only_option_positions_can_be_null() {
    let settings = GenerationSettings {
        null_chance: Percentage::ALWAYS,
        ..GenerationSettings::default()
    };
    let engine = Engine::seeded(settings, 31);
    let words: Vec<String> = engine.generate_fixture().unwrap();
    assert!(!words.is_empty());
    assert!(words.iter().all(|word| word.chars().count() >= 16));

    let lookup: HashMap<String, Vec<String>> = engine.generate_fixture().unwrap();
    assert!(!lookup.is_empty());

    let items: Vec<Option<String>> = engine.generate_fixture().unwrap();
    assert!(items.iter().all(Option::is_none));
}

#[test]
fn string_containers_survive_partial_null_chance() {
    let settings = GenerationSettings {
        null_chance: Percentage::from_int(10).unwrap(),
        ..GenerationSettings::default()
    };
    let engine = Engine::seeded(settings, 7);
    let batches: Vec<Vec<String>> = engine.generate_fixtures(50).unwrap();
    assert_eq!(batches.len(), 50);

    let maybe: Vec<Option<String>> = engine.generate_fixtures(200).unwrap();
    assert!(maybe.iter().any(Option::is_none));
    assert!(maybe.iter().any(Option::is_some));
}
