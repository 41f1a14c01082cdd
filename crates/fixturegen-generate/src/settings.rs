use std::path::Path;

use serde::{Deserialize, Serialize};

use fixturegen_core::{MAX_LENGTH_LIMIT, Percentage};

use crate::errors::GenerationError;

/// Encoding used to decode random character units into strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharEncoding {
    #[default]
    Utf16,
    Utf8,
    Latin1,
}

impl CharEncoding {
    /// Bytes drawn per character unit.
    pub fn unit_size(&self) -> usize {
        match self {
            CharEncoding::Utf16 => 2,
            CharEncoding::Utf8 | CharEncoding::Latin1 => 1,
        }
    }

    /// Decode one unit lossily; undecodable units become U+FFFD.
    pub fn decode_unit(&self, unit: &[u8]) -> char {
        match (self, unit) {
            (CharEncoding::Utf16, [lo, hi]) => {
                char::from_u32(u32::from(u16::from_le_bytes([*lo, *hi])))
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            (CharEncoding::Utf8, [byte]) if byte.is_ascii() => char::from(*byte),
            (CharEncoding::Latin1, [byte]) => char::from(*byte),
            _ => char::REPLACEMENT_CHARACTER,
        }
    }
}

/// Global sizing, encoding and null policy for one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub encoding: CharEncoding,
    pub min_string_length: usize,
    pub max_string_length: usize,
    pub min_sequence_length: usize,
    pub max_sequence_length: usize,
    pub null_chance: Percentage,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            encoding: CharEncoding::Utf16,
            min_string_length: 16,
            max_string_length: 256,
            min_sequence_length: 8,
            max_sequence_length: 32,
            null_chance: Percentage::ZERO,
        }
    }
}

impl GenerationSettings {
    pub fn from_toml_str(input: &str) -> Result<Self, GenerationError> {
        let settings: GenerationSettings = toml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, GenerationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        check_pair(
            "string",
            self.min_string_length,
            self.max_string_length,
        )?;
        check_pair(
            "sequence",
            self.min_sequence_length,
            self.max_sequence_length,
        )
    }
}

fn check_pair(label: &str, min: usize, max: usize) -> Result<(), GenerationError> {
    if min > max {
        return Err(GenerationError::InvalidSettings(format!(
            "min_{label}_length ({min}) must be <= max_{label}_length ({max})"
        )));
    }
    if max > MAX_LENGTH_LIMIT {
        return Err(GenerationError::InvalidSettings(format!(
            "max_{label}_length must be <= {MAX_LENGTH_LIMIT}"
        )));
    }
    Ok(())
}
