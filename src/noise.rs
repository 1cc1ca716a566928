// src/noise.rs

use crate::error::ModelError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Index into the measurement-noise profile. One entry per quantity that can
/// be observed or noise-injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseChannel {
    PositionX = 0,
    PositionY = 1,
    YawRate = 2,
    Acceleration = 3,
}

/// Per-channel standard deviations, shared read-only across all model calls.
#[derive(Debug, Clone)]
pub struct NoiseProfile {
    stds: [f64; 4],
}

impl NoiseProfile {
    pub const CHANNELS: usize = 4;

    /// Builds a profile from a slice in the order
    /// position-x, position-y, yaw-rate, acceleration.
    ///
    /// A slice shorter than four channels is a shape error; extra entries are
    /// also rejected rather than silently dropped.
    pub fn from_slice(stds: &[f64]) -> Result<Self, ModelError> {
        if stds.len() != Self::CHANNELS {
            return Err(ModelError::shape(
                "measurement noise profile",
                Self::CHANNELS,
                stds.len(),
            ));
        }
        if let Some(bad) = stds.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(ModelError::Configuration(format!(
                "noise standard deviations must be finite and non-negative, got {bad}"
            )));
        }
        Ok(Self {
            stds: [stds[0], stds[1], stds[2], stds[3]],
        })
    }

    pub fn std(&self, channel: NoiseChannel) -> f64 {
        self.stds[channel as usize]
    }

    /// Draws one zero-mean Gaussian sample for the given channel.
    pub fn sample(&self, channel: NoiseChannel, rng: &mut ModelRng) -> f64 {
        let std = self.std(channel);
        if std == 0.0 {
            return 0.0;
        }
        // Standard deviations were validated at construction, so Normal::new
        // cannot fail here.
        let dist = Normal::new(0.0, std).unwrap();
        dist.sample(&mut rng.0)
    }
}

impl Default for NoiseProfile {
    fn default() -> Self {
        Self {
            stds: [0.1, 0.1, 0.01, 0.02],
        }
    }
}

/// A newtype wrapper around `ChaCha8Rng`.
/// This is the model's deterministic pseudo-random number generator: owned by
/// the vehicle instance, never hidden global state, so tests can fix the seed.
#[derive(Debug, Clone)]
pub struct ModelRng(pub ChaCha8Rng);

impl ModelRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
