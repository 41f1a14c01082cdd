use crate::error::{Error, Result};

/// Largest length a constraint may carry; sizes are drawn as 32-bit values.
pub const MAX_LENGTH_LIMIT: usize = i32::MAX as usize;

/// A per-call marker narrowing how a provider behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Suppresses the null roll.
    Required,
    /// Inclusive lower bound on string length or container size.
    MinLength(usize),
    /// Exclusive upper bound on string length or container size.
    MaxLength(usize),
}

impl Constraint {
    pub fn min_length(length: i64) -> Result<Self> {
        if length < 0 || length as u64 > MAX_LENGTH_LIMIT as u64 {
            return Err(Error::InvalidLength(format!(
                "min length must be between 0 and {MAX_LENGTH_LIMIT}, got {length}"
            )));
        }
        Ok(Constraint::MinLength(length as usize))
    }

    pub fn max_length(length: i64) -> Result<Self> {
        if length < 1 || length as u64 > MAX_LENGTH_LIMIT as u64 {
            return Err(Error::InvalidLength(format!(
                "max length must be between 1 and {MAX_LENGTH_LIMIT}, got {length}"
            )));
        }
        Ok(Constraint::MaxLength(length as usize))
    }
}

/// Ordered constraint markers attached to one generation call.
///
/// When a kind appears more than once, the first declared marker wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self {
            constraints: vec![Constraint::Required],
        }
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn is_required(&self) -> bool {
        self.constraints.contains(&Constraint::Required)
    }

    pub fn min_length(&self) -> Option<usize> {
        self.constraints.iter().find_map(|constraint| match constraint {
            Constraint::MinLength(length) => Some(*length),
            _ => None,
        })
    }

    pub fn max_length(&self) -> Option<usize> {
        self.constraints.iter().find_map(|constraint| match constraint {
            Constraint::MaxLength(length) => Some(*length),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }
}

impl From<Vec<Constraint>> for ConstraintSet {
    fn from(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }
}

impl FromIterator<Constraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}
