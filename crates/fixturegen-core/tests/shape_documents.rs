use fixturegen_core::{Error, GenericDefinition, Shape, ShapeDocument, Value};

const PEOPLE: &str = r#"
[[enums]]
name = "Size"
variants = ["Small", "Medium", "Large"]

[[abstractions]]
name = "IPlanet"

[[objects]]
name = "Planet"
members = [
  { name = "Name", shape = "string", required = true },
]

[[objects]]
name = "Person"

[[objects.constructors]]
parameters = [
  { name = "Home", shape = "Planet" },
  { name = "Shirt", shape = "Size" },
]

[[objects.members]]
name = "Alias"
shape = "string"
max_length = 16

[[objects.members]]
name = "Name"
shape = "string"
required = true
max_length = 24

[[objects.members]]
name = "Tags"
shape = "ilist<string>"

[[mappings]]
from = "IPlanet"
to = "Planet"
"#;

#[test]
fn resolves_objects_in_dependency_order() {
    let document = ShapeDocument::from_toml_str(PEOPLE).expect("parse document");
    let catalog = document.resolve().expect("resolve document");

    let Some(Shape::Object(person)) = catalog.get("Person") else {
        panic!("Person should resolve to an object shape");
    };
    assert_eq!(person.constructors().len(), 1);
    let parameters = person.constructors()[0].parameters();
    assert_eq!(parameters[0].shape, *catalog.get("Planet").expect("planet"));
    assert_eq!(parameters[1].shape, Shape::enumeration("Size", ["Small"]));

    let name = &person.members()[1];
    assert!(name.constraints.is_required());
    assert_eq!(name.constraints.max_length(), Some(24));
    assert_eq!(
        person.members()[2].shape.generic_definition(),
        Some(GenericDefinition::ListInterface)
    );

    let Some(Shape::Object(planet)) = catalog.get("Planet") else {
        panic!("Planet should resolve to an object shape");
    };
    assert_eq!(planet.constructors().len(), 1);
    assert!(planet.constructors()[0].parameters().is_empty());

    assert_eq!(catalog.mappings().len(), 1);
    assert_eq!(catalog.mappings()[0].0, Shape::abstraction("IPlanet"));
}

#[test]
fn catalog_resolves_expressions_over_builtins_and_user_shapes() {
    let catalog = ShapeDocument::from_toml_str(PEOPLE)
        .and_then(|document| document.resolve())
        .expect("resolve document");

    assert_eq!(
        catalog.shape("map<string, list<i32?>>").expect("builtin expression"),
        Shape::map(Shape::String, Shape::list(Shape::optional(Shape::I32)))
    );
    assert_eq!(
        catalog.shape("Size[]").expect("enum array"),
        Shape::array(Shape::enumeration("Size", Vec::<String>::new()))
    );
    assert!(matches!(
        catalog.shape("Unknown"),
        Err(Error::InvalidDocument(_))
    ));
    assert!(catalog.shape("map<string>").is_err());
}

#[test]
fn rejects_cyclic_object_references() {
    let input = r#"
[[objects]]
name = "Node"
members = [{ name = "Next", shape = "Edge" }]

[[objects]]
name = "Edge"
members = [{ name = "Target", shape = "Node" }]
"#;
    let document = ShapeDocument::from_toml_str(input).expect("parse document");
    let err = document.resolve().expect_err("cycle should be rejected");
    assert!(err.to_string().contains("cyclic object reference"));
}

#[test]
fn rejects_duplicate_and_builtin_names() {
    let duplicate = r#"
[[enums]]
name = "Color"
variants = ["Red"]

[[objects]]
name = "Color"
"#;
    let document = ShapeDocument::from_toml_str(duplicate).expect("parse document");
    assert!(document.resolve().is_err());

    let builtin = r#"
[[abstractions]]
name = "i32"
"#;
    let document = ShapeDocument::from_toml_str(builtin).expect("parse document");
    assert!(document.resolve().is_err());
}

#[test]
fn rejects_out_of_range_member_lengths() {
    let input = r#"
[[objects]]
name = "Widget"
members = [{ name = "Label", shape = "string", max_length = 0 }]
"#;
    let document = ShapeDocument::from_toml_str(input).expect("parse document");
    assert!(matches!(document.resolve(), Err(Error::InvalidLength(_))));
}

#[test]
fn loads_json_documents() {
    let input = r#"{
  "objects": [
    {
      "name": "Point",
      "constructors": [
        { "parameters": [{ "name": "X", "shape": "i32" }, { "name": "Y", "shape": "i32" }] },
        { "parameters": [], "public": false }
      ]
    }
  ]
}"#;
    let catalog = ShapeDocument::from_json_str(input)
        .and_then(|document| document.resolve())
        .expect("resolve json document");
    let Some(Shape::Object(point)) = catalog.get("Point") else {
        panic!("Point should resolve to an object shape");
    };
    assert!(point.constructors()[0].is_public());
    assert!(!point.constructors()[1].is_public());

    let object = point.constructors()[0]
        .invoke(vec![Value::I32(1), Value::I32(2)])
        .expect("construct point");
    assert_eq!(object.get("Y"), Some(&Value::I32(2)));
}

#[test]
fn json_schema_describes_document_sections() {
    let schema = schemars::schema_for!(ShapeDocument);
    let schema = serde_json::to_value(&schema).expect("serialize json schema");
    let properties = schema["properties"].as_object().expect("root properties");
    for section in ["enums", "abstractions", "objects", "mappings"] {
        assert!(properties.contains_key(section), "missing {section}");
    }
}
