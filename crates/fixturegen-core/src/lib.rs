//! Core contracts for fixturegen.
//!
//! This crate defines shapes (what to generate), constraint markers, the
//! generated value tree, and the declarative shape documents consumed by the
//! CLI. Generation itself lives in `fixturegen-generate`.

pub mod constraint;
pub mod document;
pub mod error;
pub mod expr;
pub mod percentage;
pub mod shape;
pub mod value;

pub use constraint::{Constraint, ConstraintSet, MAX_LENGTH_LIMIT};
pub use document::{
    AbstractionDecl, ConstructorDecl, EnumDecl, MappingDecl, MemberDecl, ObjectDecl,
    ParameterDecl, ShapeCatalog, ShapeDocument,
};
pub use error::{Error, Result};
pub use expr::{ShapeExpr, parse_shape_expr};
pub use percentage::Percentage;
pub use shape::{
    AbstractShape, Constructor, EnumShape, Factory, GenericDefinition, GenericShape, Member,
    ObjectShape, ObjectShapeBuilder, Parameter, ScalarKind, Shape,
};
pub use value::{MapValue, ObjectValue, Value};
