use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;
use crate::error::{Error, Result};
use crate::expr::{ShapeExpr, parse_shape_expr};
use crate::shape::{
    Constructor, GenericDefinition, Member, ObjectShape, Parameter, ScalarKind, Shape,
};

/// Declarative description of user shapes, loaded from TOML or JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ShapeDocument {
    /// Enumerations with their declared variants.
    pub enums: Vec<EnumDecl>,
    /// Abstract shapes that must be mapped before they can be generated.
    pub abstractions: Vec<AbstractionDecl>,
    /// Complex shapes with constructors and members.
    pub objects: Vec<ObjectDecl>,
    /// Abstract shape to concrete shape mappings.
    pub mappings: Vec<MappingDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EnumDecl {
    pub name: String,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AbstractionDecl {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ObjectDecl {
    pub name: String,
    /// Declared constructors. When empty a public parameterless constructor
    /// is assumed.
    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default = "default_true")]
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParameterDecl {
    pub name: String,
    /// Shape expression, e.g. `list<string>`.
    pub shape: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MemberDecl {
    pub name: String,
    /// Shape expression, e.g. `string` or `i32?`.
    pub shape: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<i64>,
    #[serde(default)]
    pub max_length: Option<i64>,
    #[serde(default = "default_true")]
    pub writable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MappingDecl {
    /// Shape expression of the abstraction.
    pub from: String,
    /// Shape expression of the concrete shape.
    pub to: String,
}

fn default_true() -> bool {
    true
}

impl ShapeDocument {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|err| Error::InvalidDocument(err.to_string()))
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|err| Error::InvalidDocument(err.to_string()))
    }

    /// Resolve every declared shape into a catalog.
    pub fn resolve(&self) -> Result<ShapeCatalog> {
        let mut resolver = Resolver {
            objects: HashMap::new(),
            shapes: HashMap::new(),
            visiting: Vec::new(),
        };

        for decl in &self.enums {
            resolver.declare(&decl.name, Shape::enumeration(&decl.name, decl.variants.clone()))?;
        }
        for decl in &self.abstractions {
            resolver.declare(&decl.name, Shape::abstraction(&decl.name))?;
        }
        for decl in &self.objects {
            check_name(&decl.name)?;
            if resolver.shapes.contains_key(&decl.name)
                || resolver.objects.insert(decl.name.clone(), decl).is_some()
            {
                return Err(Error::InvalidDocument(format!(
                    "duplicate shape name '{}'",
                    decl.name
                )));
            }
        }
        for decl in &self.objects {
            resolver.object(&decl.name)?;
        }

        let mut mappings = Vec::with_capacity(self.mappings.len());
        for mapping in &self.mappings {
            let from = resolver.resolve(&parse_shape_expr(&mapping.from)?)?;
            let to = resolver.resolve(&parse_shape_expr(&mapping.to)?)?;
            mappings.push((from, to));
        }

        Ok(ShapeCatalog {
            shapes: resolver.shapes,
            mappings,
        })
    }
}

/// Named shapes resolved from a document.
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    shapes: HashMap<String, Shape>,
    mappings: Vec<(Shape, Shape)>,
}

impl ShapeCatalog {
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// Parse and resolve a shape expression against this catalog.
    pub fn shape(&self, expr: &str) -> Result<Shape> {
        self.resolve(&parse_shape_expr(expr)?)
    }

    pub fn resolve(&self, expr: &ShapeExpr) -> Result<Shape> {
        resolve_with(expr, &mut |name| {
            self.shapes
                .get(name)
                .cloned()
                .ok_or_else(|| unknown_name(name))
        })
    }

    pub fn mappings(&self) -> &[(Shape, Shape)] {
        &self.mappings
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }
}

struct Resolver<'a> {
    objects: HashMap<String, &'a ObjectDecl>,
    shapes: HashMap<String, Shape>,
    visiting: Vec<String>,
}

impl Resolver<'_> {
    fn declare(&mut self, name: &str, shape: Shape) -> Result<()> {
        check_name(name)?;
        if self.shapes.insert(name.to_string(), shape).is_some() {
            return Err(Error::InvalidDocument(format!(
                "duplicate shape name '{name}'"
            )));
        }
        Ok(())
    }

    fn lookup(&mut self, name: &str) -> Result<Shape> {
        if let Some(shape) = self.shapes.get(name) {
            return Ok(shape.clone());
        }
        if self.objects.contains_key(name) {
            return self.object(name);
        }
        Err(unknown_name(name))
    }

    fn resolve(&mut self, expr: &ShapeExpr) -> Result<Shape> {
        resolve_with(expr, &mut |name| self.lookup(name))
    }

    fn object(&mut self, name: &str) -> Result<Shape> {
        if let Some(shape) = self.shapes.get(name) {
            return Ok(shape.clone());
        }
        if self.visiting.iter().any(|visiting| visiting == name) {
            let mut path = self.visiting.clone();
            path.push(name.to_string());
            return Err(Error::InvalidDocument(format!(
                "cyclic object reference: {}",
                path.join(" -> ")
            )));
        }
        let decl = *self.objects.get(name).ok_or_else(|| unknown_name(name))?;
        self.visiting.push(name.to_string());

        let mut builder = ObjectShape::builder(&decl.name);
        if decl.constructors.is_empty() {
            builder = builder.default_constructor();
        }
        for ctor in &decl.constructors {
            let mut parameters = Vec::with_capacity(ctor.parameters.len());
            for param in &ctor.parameters {
                parameters.push(Parameter {
                    name: param.name.clone(),
                    shape: self.resolve(&parse_shape_expr(&param.shape)?)?,
                });
            }
            let mut constructor = Constructor::assigning(&decl.name, parameters);
            if !ctor.public {
                constructor = constructor.non_public();
            }
            builder = builder.add_constructor(constructor);
        }
        for member in &decl.members {
            builder = builder.member(self.member(member)?);
        }

        self.visiting.pop();
        let shape = Shape::Object(builder.build());
        self.shapes.insert(decl.name.clone(), shape.clone());
        Ok(shape)
    }

    fn member(&mut self, decl: &MemberDecl) -> Result<Member> {
        let mut member = Member::new(&decl.name, self.resolve(&parse_shape_expr(&decl.shape)?)?);
        if decl.required {
            member = member.with(Constraint::Required);
        }
        if let Some(length) = decl.min_length {
            member = member.with(Constraint::min_length(length)?);
        }
        if let Some(length) = decl.max_length {
            member = member.with(Constraint::max_length(length)?);
        }
        if !decl.writable {
            member = member.read_only();
        }
        Ok(member)
    }
}

fn resolve_with(
    expr: &ShapeExpr,
    lookup: &mut dyn FnMut(&str) -> Result<Shape>,
) -> Result<Shape> {
    match expr {
        ShapeExpr::Named(name) => {
            if name == "string" {
                Ok(Shape::String)
            } else if let Some(kind) = ScalarKind::from_name(name) {
                Ok(Shape::Scalar(kind))
            } else {
                lookup(name)
            }
        }
        ShapeExpr::Generic { name, arguments } => {
            let definition = GenericDefinition::from_name(name).ok_or_else(|| {
                Error::InvalidDocument(format!("unknown generic definition '{name}'"))
            })?;
            let arguments = arguments
                .iter()
                .map(|argument| resolve_with(argument, lookup))
                .collect::<Result<Vec<_>>>()?;
            Shape::generic(definition, arguments)
        }
        ShapeExpr::Array(element) => Ok(Shape::array(resolve_with(element, lookup)?)),
        ShapeExpr::Optional(inner) => Ok(Shape::optional(resolve_with(inner, lookup)?)),
    }
}

fn check_name(name: &str) -> Result<()> {
    if name == "string"
        || ScalarKind::from_name(name).is_some()
        || GenericDefinition::from_name(name).is_some()
    {
        return Err(Error::InvalidDocument(format!(
            "'{name}' is a built-in shape name"
        )));
    }
    Ok(())
}

fn unknown_name(name: &str) -> Error {
    Error::InvalidDocument(format!("unknown shape '{name}'"))
}
