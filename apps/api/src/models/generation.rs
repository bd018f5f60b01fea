//! Sampling parameters forwarded to the completion API and echoed into the
//! envelope's `generation_config` block.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.9;
pub const DEFAULT_FREQUENCY_PENALTY: f64 = 0.0;
pub const DEFAULT_PRESENCE_PENALTY: f64 = 0.0;

/// Inclusive range accepted by the input surface for `max_tokens`.
pub const MAX_TOKENS_RANGE: (u32, u32) = (100, 4000);
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
pub const TOP_P_RANGE: (f64, f64) = (0.0, 1.0);
pub const PENALTY_RANGE: (f64, f64) = (0.0, 2.0);

/// Field order is the order of the `generation_config` block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default)]
    pub frequency_penalty: f64,
    #[serde(default)]
    pub presence_penalty: f64,
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_top_p() -> f64 {
    DEFAULT_TOP_P
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            frequency_penalty: DEFAULT_FREQUENCY_PENALTY,
            presence_penalty: DEFAULT_PRESENCE_PENALTY,
        }
    }
}

impl GenerationConfig {
    /// Pulls every field into the range the input surface offers.
    /// Non-finite floats fall back to the field default.
    ///
    /// Only the HTTP layer clamps. The assembler forwards whatever it gets and
    /// leaves rejection to the remote API.
    pub fn clamped(self) -> Self {
        Self {
            max_tokens: self.max_tokens.clamp(MAX_TOKENS_RANGE.0, MAX_TOKENS_RANGE.1),
            temperature: clamp_f64(self.temperature, TEMPERATURE_RANGE, DEFAULT_TEMPERATURE),
            top_p: clamp_f64(self.top_p, TOP_P_RANGE, DEFAULT_TOP_P),
            frequency_penalty: clamp_f64(
                self.frequency_penalty,
                PENALTY_RANGE,
                DEFAULT_FREQUENCY_PENALTY,
            ),
            presence_penalty: clamp_f64(
                self.presence_penalty,
                PENALTY_RANGE,
                DEFAULT_PRESENCE_PENALTY,
            ),
        }
    }
}

fn clamp_f64(value: f64, (min, max): (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
