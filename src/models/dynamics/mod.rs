// src/models/dynamics/mod.rs

pub mod discretization;
pub mod unicycle;

pub use discretization::{Discretization, ExactExponential, ZeroOrderHold};
pub use unicycle::UnicycleKinematics;
