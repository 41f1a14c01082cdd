use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::constraint::{Constraint, ConstraintSet};
use crate::error::{Error, Result};
use crate::value::{ObjectValue, Value};

/// Primitive kinds produced directly from the random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    Char,
    Uuid,
    DateTime,
    DateTimeOffset,
    TimeSpan,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 17] = [
        ScalarKind::Bool,
        ScalarKind::U8,
        ScalarKind::I8,
        ScalarKind::I16,
        ScalarKind::U16,
        ScalarKind::I32,
        ScalarKind::U32,
        ScalarKind::I64,
        ScalarKind::U64,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::Decimal,
        ScalarKind::Char,
        ScalarKind::Uuid,
        ScalarKind::DateTime,
        ScalarKind::DateTimeOffset,
        ScalarKind::TimeSpan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::U8 => "u8",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::U16 => "u16",
            ScalarKind::I32 => "i32",
            ScalarKind::U32 => "u32",
            ScalarKind::I64 => "i64",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Char => "char",
            ScalarKind::Uuid => "uuid",
            ScalarKind::DateTime => "datetime",
            ScalarKind::DateTimeOffset => "datetimeoffset",
            ScalarKind::TimeSpan => "timespan",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Generic type definitions a shape can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericDefinition {
    List,
    Map,
    Sequence,
    KeyValuePair,
    ListInterface,
    MapInterface,
}

impl GenericDefinition {
    pub const ALL: [GenericDefinition; 6] = [
        GenericDefinition::List,
        GenericDefinition::Map,
        GenericDefinition::Sequence,
        GenericDefinition::KeyValuePair,
        GenericDefinition::ListInterface,
        GenericDefinition::MapInterface,
    ];

    pub fn arity(&self) -> usize {
        match self {
            GenericDefinition::List
            | GenericDefinition::Sequence
            | GenericDefinition::ListInterface => 1,
            GenericDefinition::Map
            | GenericDefinition::KeyValuePair
            | GenericDefinition::MapInterface => 2,
        }
    }

    /// Interfaces cannot be instantiated; `Sequence` is an interface that
    /// providers still produce directly.
    pub fn is_interface(&self) -> bool {
        matches!(
            self,
            GenericDefinition::ListInterface
                | GenericDefinition::MapInterface
                | GenericDefinition::Sequence
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            GenericDefinition::List => "list",
            GenericDefinition::Map => "map",
            GenericDefinition::Sequence => "seq",
            GenericDefinition::KeyValuePair => "pair",
            GenericDefinition::ListInterface => "ilist",
            GenericDefinition::MapInterface => "imap",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|def| def.name() == name)
    }
}

/// A descriptor identifying what kind of value to generate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar(ScalarKind),
    String,
    Optional(Box<Shape>),
    Enum(EnumShape),
    Array(Box<Shape>),
    Generic(GenericShape),
    Object(ObjectShape),
    Abstract(AbstractShape),
}

impl Shape {
    pub const BOOL: Shape = Shape::Scalar(ScalarKind::Bool);
    pub const U8: Shape = Shape::Scalar(ScalarKind::U8);
    pub const I8: Shape = Shape::Scalar(ScalarKind::I8);
    pub const I16: Shape = Shape::Scalar(ScalarKind::I16);
    pub const U16: Shape = Shape::Scalar(ScalarKind::U16);
    pub const I32: Shape = Shape::Scalar(ScalarKind::I32);
    pub const U32: Shape = Shape::Scalar(ScalarKind::U32);
    pub const I64: Shape = Shape::Scalar(ScalarKind::I64);
    pub const U64: Shape = Shape::Scalar(ScalarKind::U64);
    pub const F32: Shape = Shape::Scalar(ScalarKind::F32);
    pub const F64: Shape = Shape::Scalar(ScalarKind::F64);
    pub const DECIMAL: Shape = Shape::Scalar(ScalarKind::Decimal);
    pub const CHAR: Shape = Shape::Scalar(ScalarKind::Char);
    pub const UUID: Shape = Shape::Scalar(ScalarKind::Uuid);
    pub const DATE_TIME: Shape = Shape::Scalar(ScalarKind::DateTime);
    pub const DATE_TIME_OFFSET: Shape = Shape::Scalar(ScalarKind::DateTimeOffset);
    pub const TIME_SPAN: Shape = Shape::Scalar(ScalarKind::TimeSpan);

    pub fn optional(inner: Shape) -> Shape {
        Shape::Optional(Box::new(inner))
    }

    pub fn array(element: Shape) -> Shape {
        Shape::Array(Box::new(element))
    }

    pub fn list(element: Shape) -> Shape {
        Shape::Generic(GenericShape::unary(GenericDefinition::List, element))
    }

    pub fn list_interface(element: Shape) -> Shape {
        Shape::Generic(GenericShape::unary(GenericDefinition::ListInterface, element))
    }

    pub fn sequence(element: Shape) -> Shape {
        Shape::Generic(GenericShape::unary(GenericDefinition::Sequence, element))
    }

    pub fn map(key: Shape, value: Shape) -> Shape {
        Shape::Generic(GenericShape::binary(GenericDefinition::Map, key, value))
    }

    pub fn map_interface(key: Shape, value: Shape) -> Shape {
        Shape::Generic(GenericShape::binary(GenericDefinition::MapInterface, key, value))
    }

    pub fn pair(key: Shape, value: Shape) -> Shape {
        Shape::Generic(GenericShape::binary(GenericDefinition::KeyValuePair, key, value))
    }

    /// Build a generic shape, checking the argument count.
    pub fn generic(definition: GenericDefinition, arguments: Vec<Shape>) -> Result<Shape> {
        GenericShape::new(definition, arguments).map(Shape::Generic)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, variants: I) -> Shape
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Shape::Enum(EnumShape::new(name, variants))
    }

    pub fn abstraction(name: impl Into<String>) -> Shape {
        Shape::Abstract(AbstractShape::new(name))
    }

    /// Abstract shapes and interface definitions cannot be instantiated.
    pub fn is_abstract(&self) -> bool {
        match self {
            Shape::Abstract(_) => true,
            Shape::Generic(generic) => generic.definition().is_interface(),
            _ => false,
        }
    }

    /// Whether generation for this shape may short-circuit to null.
    pub fn is_null_capable(&self) -> bool {
        matches!(
            self,
            Shape::String | Shape::Optional(_) | Shape::Object(_) | Shape::Abstract(_)
        )
    }

    pub fn optional_inner(&self) -> Option<&Shape> {
        match self {
            Shape::Optional(inner) => Some(inner),
            _ => None,
        }
    }

    /// Element shape of an array or a single-argument generic.
    pub fn element_shape(&self) -> Option<&Shape> {
        match self {
            Shape::Array(element) => Some(element),
            Shape::Generic(generic) if generic.definition().arity() == 1 => {
                generic.arguments().first()
            }
            _ => None,
        }
    }

    pub fn generic_definition(&self) -> Option<GenericDefinition> {
        match self {
            Shape::Generic(generic) => Some(generic.definition()),
            _ => None,
        }
    }

    pub fn generic_arguments(&self) -> &[Shape] {
        match self {
            Shape::Generic(generic) => generic.arguments(),
            _ => &[],
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(kind) => f.write_str(kind.name()),
            Shape::String => f.write_str("string"),
            Shape::Optional(inner) => write!(f, "{inner}?"),
            Shape::Enum(shape) => f.write_str(shape.name()),
            Shape::Array(element) => write!(f, "{element}[]"),
            Shape::Generic(generic) => {
                write!(f, "{}<", generic.definition().name())?;
                for (idx, argument) in generic.arguments().iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
            Shape::Object(shape) => f.write_str(shape.name()),
            Shape::Abstract(shape) => f.write_str(shape.name()),
        }
    }
}

/// A generic definition bound to its type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericShape {
    definition: GenericDefinition,
    arguments: Vec<Shape>,
}

impl GenericShape {
    pub fn new(definition: GenericDefinition, arguments: Vec<Shape>) -> Result<Self> {
        if arguments.len() != definition.arity() {
            return Err(Error::InvalidExpression {
                expr: definition.name().to_string(),
                message: format!(
                    "expected {} type argument(s), got {}",
                    definition.arity(),
                    arguments.len()
                ),
            });
        }
        Ok(Self {
            definition,
            arguments,
        })
    }

    fn unary(definition: GenericDefinition, element: Shape) -> Self {
        Self {
            definition,
            arguments: vec![element],
        }
    }

    fn binary(definition: GenericDefinition, key: Shape, value: Shape) -> Self {
        Self {
            definition,
            arguments: vec![key, value],
        }
    }

    pub fn definition(&self) -> GenericDefinition {
        self.definition
    }

    pub fn arguments(&self) -> &[Shape] {
        &self.arguments
    }

    /// The same type arguments applied to another definition.
    pub fn rebind(&self, definition: GenericDefinition) -> Result<Self> {
        Self::new(definition, self.arguments.clone())
    }
}

/// Named enumeration with declared variants; identity is the name.
#[derive(Debug, Clone)]
pub struct EnumShape(Arc<EnumDef>);

#[derive(Debug)]
struct EnumDef {
    name: String,
    variants: Vec<String>,
}

impl EnumShape {
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(EnumDef {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn variants(&self) -> &[String] {
        &self.0.variants
    }
}

impl PartialEq for EnumShape {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for EnumShape {}

impl Hash for EnumShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

/// Named abstract or interface shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbstractShape(Arc<str>);

impl AbstractShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Builds an object from positional constructor arguments.
pub type Factory = Arc<dyn Fn(Vec<Value>) -> Result<ObjectValue> + Send + Sync>;

/// A named constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub shape: Shape,
}

/// A declared constructor of a complex shape.
#[derive(Clone)]
pub struct Constructor {
    parameters: Vec<Parameter>,
    factory: Factory,
    public: bool,
}

impl Constructor {
    pub fn new(parameters: Vec<Parameter>, factory: Factory) -> Self {
        Self {
            parameters,
            factory,
            public: true,
        }
    }

    /// Constructor assigning each argument to the field named after its
    /// parameter.
    pub fn assigning(type_name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        let type_name = type_name.into();
        let names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();
        let factory: Factory = Arc::new(move |args: Vec<Value>| {
            if args.len() != names.len() {
                return Err(Error::Construction(format!(
                    "{type_name} expects {} argument(s), got {}",
                    names.len(),
                    args.len()
                )));
            }
            let mut object = ObjectValue::new(type_name.clone());
            for (name, value) in names.iter().zip(args) {
                object.set(name.clone(), value);
            }
            Ok(object)
        });
        Self::new(parameters, factory)
    }

    pub fn non_public(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn invoke(&self, args: Vec<Value>) -> Result<ObjectValue> {
        (self.factory)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("parameters", &self.parameters)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// A settable member of a complex shape with its own constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub shape: Shape,
    pub constraints: ConstraintSet,
    pub writable: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            constraints: ConstraintSet::new(),
            writable: true,
        }
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

/// Concrete complex shape; identity is the name.
///
/// Two definitions sharing a name are the same shape to every cache keyed on
/// it, so names must be unique within one engine.
#[derive(Debug, Clone)]
pub struct ObjectShape(Arc<ObjectDef>);

#[derive(Debug)]
struct ObjectDef {
    name: String,
    constructors: Vec<Constructor>,
    members: Vec<Member>,
}

impl ObjectShape {
    pub fn builder(name: impl Into<String>) -> ObjectShapeBuilder {
        ObjectShapeBuilder {
            name: name.into(),
            constructors: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.0.constructors
    }

    pub fn members(&self) -> &[Member] {
        &self.0.members
    }
}

impl PartialEq for ObjectShape {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for ObjectShape {}

impl Hash for ObjectShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl From<ObjectShape> for Shape {
    fn from(shape: ObjectShape) -> Self {
        Shape::Object(shape)
    }
}

pub struct ObjectShapeBuilder {
    name: String,
    constructors: Vec<Constructor>,
    members: Vec<Member>,
}

impl ObjectShapeBuilder {
    /// Add a constructor that assigns its arguments to same-named fields.
    pub fn constructor<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (S, Shape)>,
        S: Into<String>,
    {
        let parameters = collect_parameters(parameters);
        self.constructors
            .push(Constructor::assigning(self.name.clone(), parameters));
        self
    }

    /// Add a parameterless constructor.
    pub fn default_constructor(self) -> Self {
        self.constructor(Vec::<(String, Shape)>::new())
    }

    /// Add a constructor with a custom factory.
    pub fn constructor_with<I, S, F>(mut self, parameters: I, factory: F) -> Self
    where
        I: IntoIterator<Item = (S, Shape)>,
        S: Into<String>,
        F: Fn(Vec<Value>) -> Result<ObjectValue> + Send + Sync + 'static,
    {
        let parameters = collect_parameters(parameters);
        self.constructors
            .push(Constructor::new(parameters, Arc::new(factory)));
        self
    }

    pub fn add_constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn build(self) -> ObjectShape {
        ObjectShape(Arc::new(ObjectDef {
            name: self.name,
            constructors: self.constructors,
            members: self.members,
        }))
    }
}

fn collect_parameters<I, S>(parameters: I) -> Vec<Parameter>
where
    I: IntoIterator<Item = (S, Shape)>,
    S: Into<String>,
{
    parameters
        .into_iter()
        .map(|(name, shape)| Parameter {
            name: name.into(),
            shape,
        })
        .collect()
}
