use std::collections::HashMap;

use fixturegen_core::{GenericDefinition, Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::{ValueProvider, mismatch};

/// Resolves explicitly mapped abstract shapes to concrete ones.
#[derive(Debug, Default)]
pub struct AbstractionProvider {
    mappings: HashMap<Shape, Shape>,
}

impl AbstractionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `abstraction` to `concrete`, replacing an earlier mapping.
    pub fn map(&mut self, abstraction: Shape, concrete: Shape) -> Result<(), GenerationError> {
        if !abstraction.is_abstract() {
            return Err(GenerationError::NotAbstract(abstraction.to_string()));
        }
        self.mappings.insert(abstraction, concrete);
        Ok(())
    }

    pub fn with_mapping(
        mut self,
        abstraction: Shape,
        concrete: Shape,
    ) -> Result<Self, GenerationError> {
        self.map(abstraction, concrete)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl ValueProvider for AbstractionProvider {
    fn id(&self) -> &'static str {
        "abstraction.explicit"
    }

    fn matches(&self, shape: &Shape) -> bool {
        shape.is_abstract() && self.mappings.contains_key(shape)
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let concrete = self
            .mappings
            .get(ctx.shape())
            .ok_or_else(|| mismatch(self.id(), ctx))?;
        ctx.generate(concrete, ctx.constraints())
    }
}

/// Rebinds generic interface definitions to concrete definitions, keeping the
/// type arguments.
#[derive(Debug)]
pub struct GenericAbstractionProvider {
    definitions: HashMap<GenericDefinition, GenericDefinition>,
}

impl Default for GenericAbstractionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GenericAbstractionProvider {
    /// Provider with `ilist -> list` and `imap -> map`.
    pub fn new() -> Self {
        let definitions = HashMap::from([
            (GenericDefinition::ListInterface, GenericDefinition::List),
            (GenericDefinition::MapInterface, GenericDefinition::Map),
        ]);
        Self { definitions }
    }

    pub fn map_definition(
        &mut self,
        interface: GenericDefinition,
        concrete: GenericDefinition,
    ) -> Result<(), GenerationError> {
        if !interface.is_interface() {
            return Err(GenerationError::NotAbstract(interface.name().to_string()));
        }
        if interface.arity() != concrete.arity() {
            return Err(GenerationError::ArityMismatch {
                from: interface.name(),
                to: concrete.name(),
            });
        }
        self.definitions.insert(interface, concrete);
        Ok(())
    }
}

impl ValueProvider for GenericAbstractionProvider {
    fn id(&self) -> &'static str {
        "abstraction.generic"
    }

    fn matches(&self, shape: &Shape) -> bool {
        shape
            .generic_definition()
            .is_some_and(|definition| self.definitions.contains_key(&definition))
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let Shape::Generic(generic) = ctx.shape() else {
            return Err(mismatch(self.id(), ctx));
        };
        let concrete = self
            .definitions
            .get(&generic.definition())
            .ok_or_else(|| mismatch(self.id(), ctx))?;
        let rebound = Shape::Generic(generic.rebind(*concrete)?);
        ctx.generate(&rebound, ctx.constraints())
    }
}
