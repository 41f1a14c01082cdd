use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use fixturegen_core::{Constraint, ConstraintSet, Percentage, Shape, Value};

use crate::context::{GenerationContext, ValueGenerator};
use crate::errors::GenerationError;
use crate::fixture::Fixture;
use crate::random::{ChaChaSource, RandomSource};
use crate::registry::ProviderRegistry;
use crate::settings::GenerationSettings;

/// Dispatches generation requests to the first matching provider.
///
/// Generation takes `&self` and may run concurrently; registry edits and
/// null-chance changes take `&mut self`.
pub struct Engine {
    registry: ProviderRegistry,
    settings: GenerationSettings,
    null_overrides: HashMap<&'static str, Percentage>,
    random: Arc<dyn RandomSource>,
}

impl Engine {
    pub fn new(
        registry: ProviderRegistry,
        settings: GenerationSettings,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            registry,
            settings,
            null_overrides: HashMap::new(),
            random,
        }
    }

    /// Default providers over an entropy-seeded source.
    pub fn with_defaults(settings: GenerationSettings) -> Self {
        Self::new(
            ProviderRegistry::with_defaults(),
            settings,
            Arc::new(ChaChaSource::from_entropy()),
        )
    }

    /// Default providers over a seeded source.
    pub fn seeded(settings: GenerationSettings, seed: u64) -> Self {
        Self::new(
            ProviderRegistry::with_defaults(),
            settings,
            Arc::new(ChaChaSource::seeded(seed)),
        )
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.registry
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn set_null_chance(&mut self, chance: Percentage) {
        self.settings.null_chance = chance;
    }

    /// Override the null chance for the provider registered as `id`.
    pub fn set_null_chance_for(&mut self, id: &'static str, chance: Percentage) {
        self.null_overrides.insert(id, chance);
    }

    pub fn reset_null_chance_for(&mut self, id: &str) {
        self.null_overrides.remove(id);
    }

    /// Null chance applied to calls handled by provider `id`.
    pub fn null_chance_for(&self, id: &str) -> Percentage {
        self.null_overrides
            .get(id)
            .copied()
            .unwrap_or(self.settings.null_chance)
    }

    pub fn generate(
        &self,
        shape: &Shape,
        constraints: &ConstraintSet,
    ) -> Result<Value, GenerationError> {
        self.dispatch(shape, constraints, self)
    }

    /// Dispatch with `generator` handling nested calls.
    fn dispatch(
        &self,
        shape: &Shape,
        constraints: &ConstraintSet,
        generator: &dyn ValueGenerator,
    ) -> Result<Value, GenerationError> {
        let Some(provider) = self.registry.resolve(shape) else {
            debug!(shape = %shape, "no provider matched");
            return Err(GenerationError::NoProvider(shape.clone()));
        };
        trace!(shape = %shape, provider = provider.id(), "dispatching");
        let ctx = GenerationContext::new(
            shape,
            constraints,
            &self.settings,
            self.null_chance_for(provider.id()),
            generator,
            self.random.as_ref(),
        );
        provider.provide(&ctx)
    }

    /// Lazily generate `count` values in call order.
    pub fn generate_many<'a>(
        &'a self,
        shape: &'a Shape,
        constraints: &'a ConstraintSet,
        count: usize,
    ) -> impl Iterator<Item = Result<Value, GenerationError>> + 'a {
        (0..count).map(move |_| self.generate(shape, constraints))
    }

    /// Generate a typed value.
    ///
    /// Only `Option` positions may come out null; every other shape in the
    /// tree, nested elements included, is generated as `Required`.
    pub fn generate_fixture<T: Fixture>(&self) -> Result<T, GenerationError> {
        let generator = FixtureGenerator { engine: self };
        T::from_value(generator.generate(&T::shape(), &ConstraintSet::new())?)
    }

    pub fn generate_fixtures<T: Fixture>(&self, count: usize) -> Result<Vec<T>, GenerationError> {
        let generator = FixtureGenerator { engine: self };
        let shape = T::shape();
        (0..count)
            .map(|_| {
                generator
                    .generate(&shape, &ConstraintSet::new())
                    .and_then(T::from_value)
            })
            .collect()
    }
}

impl ValueGenerator for Engine {
    fn generate(
        &self,
        shape: &Shape,
        constraints: &ConstraintSet,
    ) -> Result<Value, GenerationError> {
        Engine::generate(self, shape, constraints)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .field("null_overrides", &self.null_overrides)
            .finish_non_exhaustive()
    }
}

/// Nested-call handler for typed fixtures.
struct FixtureGenerator<'a> {
    engine: &'a Engine,
}

impl ValueGenerator for FixtureGenerator<'_> {
    fn generate(
        &self,
        shape: &Shape,
        constraints: &ConstraintSet,
    ) -> Result<Value, GenerationError> {
        if shape.optional_inner().is_some() || constraints.is_required() {
            return self.engine.dispatch(shape, constraints, self);
        }
        let constraints = constraints.clone().with(Constraint::Required);
        self.engine.dispatch(shape, &constraints, self)
    }
}
