// src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::models::dynamics::Discretization;
pub use crate::models::measurement::Measurement;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::config::{DiscretizationStrategy, StateLayout, VehicleConfig};
pub use crate::error::ModelError;
pub use crate::history::HistoryLog;
pub use crate::noise::{ModelRng, NoiseChannel, NoiseProfile};
pub use crate::types::{wrap_angle, Control, State};
pub use crate::vehicle::Vehicle;

// --- Concrete Model Implementations (Export common ones for convenience) ---
pub use crate::models::dynamics::{ExactExponential, UnicycleKinematics, ZeroOrderHold};
pub use crate::models::measurement::{
    CombinedObservation, PositionObservation, RateAccelObservation,
};
