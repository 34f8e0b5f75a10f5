//! Configuration schema types for `anime4k.toml`

use crate::upscale::{UpscaleOptions, DEFAULT_SCALE};
use serde::{Deserialize, Serialize};

/// Resize and push settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpscaleConfig {
    /// Output size relative to the input
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Color push intensity (1.0 = full), derived from scale when absent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub push_strength: Option<f32>,
    /// Gradient push intensity (1.0 = full), derived from scale when absent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub push_grad_strength: Option<f32>,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self { scale: default_scale(), push_strength: None, push_grad_strength: None }
    }
}

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

/// Execution settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Worker threads, 0 = one per core
    #[serde(default)]
    pub threads: usize,
}

/// Root configuration structure for `anime4k.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anime4kConfig {
    #[serde(default)]
    pub upscale: UpscaleConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "upscale.scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anime4k.toml: '{}' {}", self.field, self.message)
    }
}

impl Anime4kConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !self.upscale.scale.is_finite() || self.upscale.scale <= 0.0 {
            errors.push(ConfigValidationError {
                field: "upscale.scale".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        let strengths = [
            ("upscale.push_strength", self.upscale.push_strength),
            ("upscale.push_grad_strength", self.upscale.push_grad_strength),
        ];
        for (field, value) in strengths {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    errors.push(ConfigValidationError {
                        field: field.to_string(),
                        message: "must be a non-negative number".to_string(),
                    });
                }
            }
        }

        errors
    }

    /// Upscale options described by this configuration.
    pub fn upscale_options(&self) -> UpscaleOptions {
        UpscaleOptions {
            scale: self.upscale.scale,
            push_strength: self.upscale.push_strength,
            push_grad_strength: self.upscale.push_grad_strength,
            threads: self.runtime.threads,
            dump_dir: None,
        }
    }
}
