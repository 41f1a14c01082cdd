use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use fixturegen_core::{Constructor, ObjectShape, Parameter, Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::{ValueProvider, mismatch};

/// The constructor chosen for an object shape.
#[derive(Debug)]
pub struct ConstructorPlan {
    constructor: Constructor,
}

impl ConstructorPlan {
    /// Public constructor with the most parameters; the first declared wins
    /// ties.
    pub fn select(shape: &ObjectShape) -> Result<Self, GenerationError> {
        let mut chosen: Option<&Constructor> = None;
        for constructor in shape.constructors().iter().filter(|c| c.is_public()) {
            let longer = chosen
                .is_none_or(|best| constructor.parameters().len() > best.parameters().len());
            if longer {
                chosen = Some(constructor);
            }
        }
        let constructor = chosen
            .ok_or_else(|| GenerationError::NoPublicConstructor(Shape::Object(shape.clone())))?;
        Ok(Self {
            constructor: constructor.clone(),
        })
    }

    pub fn parameters(&self) -> &[Parameter] {
        self.constructor.parameters()
    }

    pub fn constructor(&self) -> &Constructor {
        &self.constructor
    }

    /// Whether a parameter assigns the member named `name`.
    pub fn covers(&self, name: &str) -> bool {
        self.parameters().iter().any(|parameter| parameter.name == name)
    }
}

/// Memoized constructor plans, computed at most once per shape name.
#[derive(Debug, Default)]
pub struct ConstructorPlanCache {
    plans: RwLock<HashMap<ObjectShape, Arc<ConstructorPlan>>>,
    computations: AtomicUsize,
}

impl ConstructorPlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan_for(&self, shape: &ObjectShape) -> Result<Arc<ConstructorPlan>, GenerationError> {
        {
            let plans = self.plans.read();
            if let Some(plan) = plans.get(shape) {
                return Ok(Arc::clone(plan));
            }
        }

        let mut plans = self.plans.write();
        if let Some(plan) = plans.get(shape) {
            return Ok(Arc::clone(plan));
        }
        let plan = Arc::new(ConstructorPlan::select(shape)?);
        self.computations.fetch_add(1, Ordering::Relaxed);
        debug!(
            shape = shape.name(),
            parameters = plan.parameters().len(),
            "computed constructor plan"
        );
        plans.insert(shape.clone(), Arc::clone(&plan));
        Ok(plan)
    }

    /// Number of plans computed so far.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.read().is_empty()
    }
}

/// Builds objects through their widest public constructor, then fills the
/// remaining writable members.
#[derive(Debug, Default)]
pub struct ComplexObjectProvider {
    cache: Arc<ConstructorPlanCache>,
}

impl ComplexObjectProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: Arc<ConstructorPlanCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<ConstructorPlanCache> {
        &self.cache
    }
}

impl ValueProvider for ComplexObjectProvider {
    fn id(&self) -> &'static str {
        "object.complex"
    }

    fn matches(&self, shape: &Shape) -> bool {
        matches!(shape, Shape::Object(_))
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let Shape::Object(shape) = ctx.shape() else {
            return Err(mismatch(self.id(), ctx));
        };
        if ctx.roll_for_null() {
            return Ok(Value::Null);
        }

        let plan = self.cache.plan_for(shape)?;
        let args = plan
            .parameters()
            .iter()
            .map(|parameter| ctx.generate_unconstrained(&parameter.shape))
            .collect::<Result<Vec<_>, _>>()?;
        let mut object = plan
            .constructor()
            .invoke(args)
            .map_err(|err| GenerationError::Construction {
                shape: ctx.shape().clone(),
                message: err.to_string(),
            })?;

        for member in shape.members() {
            if !member.writable || plan.covers(&member.name) {
                continue;
            }
            let value = ctx.generate(&member.shape, &member.constraints)?;
            object.set(member.name.clone(), value);
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_widest_public_constructor_first_declared() {
        let shape = ObjectShape::builder("Point")
            .constructor([("X", Shape::I32)])
            .constructor([("X", Shape::I32), ("Y", Shape::I32)])
            .constructor([("A", Shape::I32), ("B", Shape::I32)])
            .add_constructor(
                Constructor::assigning(
                    "Point",
                    vec![
                        Parameter {
                            name: "X".to_string(),
                            shape: Shape::I32,
                        },
                        Parameter {
                            name: "Y".to_string(),
                            shape: Shape::I32,
                        },
                        Parameter {
                            name: "Z".to_string(),
                            shape: Shape::I32,
                        },
                    ],
                )
                .non_public(),
            )
            .build();
        let plan = ConstructorPlan::select(&shape).unwrap();
        let names: Vec<_> = plan.parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["X", "Y"]);
        assert!(plan.covers("Y"));
        assert!(!plan.covers("A"));
    }

    #[test]
    fn cache_computes_each_plan_once() {
        let cache = ConstructorPlanCache::new();
        let shape = ObjectShape::builder("Empty").default_constructor().build();
        let first = cache.plan_for(&shape).unwrap();
        let second = cache.plan_for(&shape).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.computations(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn plans_are_keyed_by_shape_name() {
        let cache = ConstructorPlanCache::new();
        let first = ObjectShape::builder("Point")
            .constructor([("X", Shape::I32)])
            .build();
        let redefined = ObjectShape::builder("Point")
            .constructor([("X", Shape::I32), ("Y", Shape::I32)])
            .build();
        cache.plan_for(&first).unwrap();
        let plan = cache.plan_for(&redefined).unwrap();
        assert_eq!(plan.parameters().len(), 1);
        assert!(!plan.covers("Y"));
        assert_eq!(cache.computations(), 1);
    }

    #[test]
    fn missing_public_constructor_is_not_cached() {
        let cache = ConstructorPlanCache::new();
        let shape = ObjectShape::builder("Sealed").build();
        assert!(matches!(
            cache.plan_for(&shape),
            Err(GenerationError::NoPublicConstructor(_))
        ));
        assert!(cache.is_empty());
    }
}
