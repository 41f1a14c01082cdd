use fixturegen_core::{ConstraintSet, Percentage, Shape, Value};

use crate::errors::GenerationError;
use crate::random::RandomSource;
use crate::settings::GenerationSettings;

/// Entry point providers use to generate sub-shapes through full dispatch.
pub trait ValueGenerator: Send + Sync {
    fn generate(
        &self,
        shape: &Shape,
        constraints: &ConstraintSet,
    ) -> Result<Value, GenerationError>;
}

/// Everything a provider needs for one generation call.
///
/// Built fresh by the engine for every dispatch and never shared between
/// calls.
pub struct GenerationContext<'a> {
    shape: &'a Shape,
    constraints: &'a ConstraintSet,
    settings: &'a GenerationSettings,
    null_chance: Percentage,
    generator: &'a dyn ValueGenerator,
    random: &'a dyn RandomSource,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        shape: &'a Shape,
        constraints: &'a ConstraintSet,
        settings: &'a GenerationSettings,
        null_chance: Percentage,
        generator: &'a dyn ValueGenerator,
        random: &'a dyn RandomSource,
    ) -> Self {
        Self {
            shape,
            constraints,
            settings,
            null_chance,
            generator,
            random,
        }
    }

    pub fn shape(&self) -> &'a Shape {
        self.shape
    }

    pub fn constraints(&self) -> &'a ConstraintSet {
        self.constraints
    }

    pub fn settings(&self) -> &'a GenerationSettings {
        self.settings
    }

    /// Effective null chance for the provider handling this call.
    pub fn null_chance(&self) -> Percentage {
        self.null_chance
    }

    pub fn random(&self) -> &'a dyn RandomSource {
        self.random
    }

    /// Generate a sub-shape through the engine's registry.
    pub fn generate(
        &self,
        shape: &Shape,
        constraints: &ConstraintSet,
    ) -> Result<Value, GenerationError> {
        self.generator.generate(shape, constraints)
    }

    pub fn generate_unconstrained(&self, shape: &Shape) -> Result<Value, GenerationError> {
        self.generator.generate(shape, &ConstraintSet::new())
    }

    /// Whether this call should short-circuit to null.
    ///
    /// `Required` suppresses the roll entirely, so no randomness is consumed.
    pub fn roll_for_null(&self) -> bool {
        if self.constraints.is_required() {
            return false;
        }
        let draw = self.random.next_in_range(0, 100);
        (draw as f64) < self.null_chance.percent()
    }

    /// Length bounds for strings, `[min, max)`.
    pub fn string_bounds(&self) -> Result<(usize, usize), GenerationError> {
        self.bounds(
            self.settings.min_string_length,
            self.settings.max_string_length,
        )
    }

    /// Size bounds for arrays, lists, maps and sequences, `[min, max)`.
    pub fn sequence_bounds(&self) -> Result<(usize, usize), GenerationError> {
        self.bounds(
            self.settings.min_sequence_length,
            self.settings.max_sequence_length,
        )
    }

    /// Uniform size in `[min, max)`; `min` when the range is empty.
    pub fn draw_size(&self, min: usize, max: usize) -> usize {
        self.random.next_in_range(min as i64, max as i64) as usize
    }

    fn bounds(
        &self,
        default_min: usize,
        default_max: usize,
    ) -> Result<(usize, usize), GenerationError> {
        let min = self.constraints.min_length().unwrap_or(default_min);
        let max = self.constraints.max_length().unwrap_or(default_max);
        if min > max {
            return Err(GenerationError::InvalidBounds {
                shape: self.shape.clone(),
                min,
                max,
            });
        }
        Ok((min, max))
    }
}
