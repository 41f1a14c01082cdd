use fixturegen_core::{Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::{self, DelegatedProvider, ValueProvider};

/// Ordered providers; earlier entries take priority.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn ValueProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry wired with every built-in provider in standard order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        providers::register_defaults(&mut registry);
        registry
    }

    pub fn push(&mut self, provider: Box<dyn ValueProvider>) {
        self.providers.push(provider);
    }

    /// Register a closure producing values for exactly `shape`.
    pub fn push_fn<F>(&mut self, id: &'static str, shape: Shape, produce: F)
    where
        F: Fn(&GenerationContext<'_>) -> Result<Value, GenerationError> + Send + Sync + 'static,
    {
        self.push(Box::new(DelegatedProvider::new(id, shape, produce)));
    }

    pub fn insert(
        &mut self,
        index: usize,
        provider: Box<dyn ValueProvider>,
    ) -> Result<(), GenerationError> {
        if index > self.providers.len() {
            return Err(GenerationError::InvalidPosition {
                index,
                len: self.providers.len(),
            });
        }
        self.providers.insert(index, provider);
        Ok(())
    }

    /// Remove the first provider with `id`.
    pub fn remove(&mut self, id: &str) -> Option<Box<dyn ValueProvider>> {
        let index = self.position(id)?;
        Some(self.providers.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Box<dyn ValueProvider>, GenerationError> {
        if index >= self.providers.len() {
            return Err(GenerationError::InvalidPosition {
                index,
                len: self.providers.len(),
            });
        }
        Ok(self.providers.remove(index))
    }

    /// Move the first provider with `id` so it ends up at `index`.
    pub fn move_to(&mut self, id: &str, index: usize) -> Result<(), GenerationError> {
        let from = self
            .position(id)
            .ok_or_else(|| GenerationError::UnknownProvider(id.to_string()))?;
        if index >= self.providers.len() {
            return Err(GenerationError::InvalidPosition {
                index,
                len: self.providers.len(),
            });
        }
        let provider = self.providers.remove(from);
        self.providers.insert(index, provider);
        Ok(())
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.providers.iter().position(|provider| provider.id() == id)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// First provider whose predicate accepts `shape`.
    pub fn resolve(&self, shape: &Shape) -> Option<&dyn ValueProvider> {
        self.providers
            .iter()
            .find(|provider| provider.matches(shape))
            .map(Box::as_ref)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}
