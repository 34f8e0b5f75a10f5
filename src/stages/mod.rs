//! The four per-pixel stages of the push pipeline.
//!
//! # Module Structure
//!
//! - [`luminance`] - lightness into the auxiliary channel (in place)
//! - [`push`] - directional push kernels, shared by both push stages
//! - [`gradient`] - Sobel magnitude of the auxiliary channel
//!
//! Apart from luminance, every stage reads an immutable input buffer and
//! returns a new one of the same size.

pub mod gradient;
pub mod luminance;
pub mod push;

pub use gradient::compute_gradient;
pub use luminance::compute_luminance;
pub use push::{push_color, push_gradient, PushMode};

use serde::Serialize;

/// Identifies a stage, for observers and timing reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Luminance,
    PushColor,
    Gradient,
    PushGradient,
}

impl Stage {
    /// Stages in execution order within one pass.
    pub const ORDER: [Stage; 4] =
        [Stage::Luminance, Stage::PushColor, Stage::Gradient, Stage::PushGradient];

    /// Short name used in file names and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Luminance => "luminance",
            Stage::PushColor => "push-color",
            Stage::Gradient => "gradient",
            Stage::PushGradient => "push-gradient",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
