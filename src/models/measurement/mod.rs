// src/models/measurement/mod.rs

use crate::config::StateLayout;
use crate::error::ModelError;
use crate::noise::NoiseChannel;
use crate::types::{Control, State};
use nalgebra::{DMatrix, DVector};
use std::fmt::Debug;

// --- MEASUREMENT MODEL TRAIT ---
// Represents the mathematical model of a sensor: `z = h(x, u) + v`.
// Implementations are pure projections; the vehicle facade owns the noise
// draw and adds it per channel on top of `predict`.
pub trait Measurement: Debug + Send + Sync {
    /// Number of rows in the measurement vector `z`.
    fn dim(&self) -> usize;

    /// Predicts the ideal measurement `z = h(x, u)`, noise-free.
    fn predict(&self, x: &State, u: &Control) -> Result<DVector<f64>, ModelError>;

    /// The observation Jacobian `G = ∂h/∂x` (dim x state_dim). For these
    /// models the mapping is already linear in the state, so the observation
    /// matrix doubles as the Jacobian.
    fn jacobian(&self) -> DMatrix<f64>;

    /// Which noise-profile channel feeds each measurement row.
    fn noise_channels(&self) -> &'static [NoiseChannel];
}

fn check_dims(layout: StateLayout, x: &State, u: &Control) -> Result<(), ModelError> {
    if x.nrows() != layout.state_dim() {
        return Err(ModelError::shape("state vector", layout.state_dim(), x.nrows()));
    }
    if u.nrows() != layout.control_dim() {
        return Err(ModelError::shape(
            "control vector",
            layout.control_dim(),
            u.nrows(),
        ));
    }
    Ok(())
}

/// Direct observation of planar position `[x, y]`, e.g. a GNSS fix.
#[derive(Debug, Clone, Copy)]
pub struct PositionObservation {
    pub layout: StateLayout,
}

impl Measurement for PositionObservation {
    fn dim(&self) -> usize {
        2
    }

    fn predict(&self, x: &State, u: &Control) -> Result<DVector<f64>, ModelError> {
        check_dims(self.layout, x, u)?;
        Ok(DVector::from_vec(vec![x[0], x[1]]))
    }

    fn jacobian(&self) -> DMatrix<f64> {
        // Selector of the first two state components.
        let mut g = DMatrix::zeros(2, self.layout.state_dim());
        g[(0, 0)] = 1.0;
        g[(1, 1)] = 1.0;
        g
    }

    fn noise_channels(&self) -> &'static [NoiseChannel] {
        &[NoiseChannel::PositionX, NoiseChannel::PositionY]
    }
}

/// Direct observation of the applied control input `[a|v, omega]`, e.g. an
/// IMU-style rate/acceleration channel. Independent of the state.
#[derive(Debug, Clone, Copy)]
pub struct RateAccelObservation {
    pub layout: StateLayout,
}

impl Measurement for RateAccelObservation {
    fn dim(&self) -> usize {
        2
    }

    fn predict(&self, x: &State, u: &Control) -> Result<DVector<f64>, ModelError> {
        check_dims(self.layout, x, u)?;
        Ok(DVector::from_vec(vec![u[0], u[1]]))
    }

    fn jacobian(&self) -> DMatrix<f64> {
        // All-zero with respect to state: the reading passes the input
        // straight through.
        DMatrix::zeros(2, self.layout.state_dim())
    }

    fn noise_channels(&self) -> &'static [NoiseChannel] {
        &[NoiseChannel::Acceleration, NoiseChannel::YawRate]
    }
}

/// Stacked observation: position rows over input-pass-through rows.
#[derive(Debug, Clone, Copy)]
pub struct CombinedObservation {
    pub layout: StateLayout,
}

impl Measurement for CombinedObservation {
    fn dim(&self) -> usize {
        4
    }

    fn predict(&self, x: &State, u: &Control) -> Result<DVector<f64>, ModelError> {
        check_dims(self.layout, x, u)?;
        Ok(DVector::from_vec(vec![x[0], x[1], u[0], u[1]]))
    }

    fn jacobian(&self) -> DMatrix<f64> {
        // Position selector on top, zero rows below (the input rows carry no
        // state dependence).
        let mut g = DMatrix::zeros(4, self.layout.state_dim());
        g[(0, 0)] = 1.0;
        g[(1, 1)] = 1.0;
        g
    }

    fn noise_channels(&self) -> &'static [NoiseChannel] {
        &[
            NoiseChannel::PositionX,
            NoiseChannel::PositionY,
            NoiseChannel::Acceleration,
            NoiseChannel::YawRate,
        ]
    }
}
