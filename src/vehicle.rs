// src/vehicle.rs

use crate::config::{DiscretizationStrategy, VehicleConfig};
use crate::error::ModelError;
use crate::history::HistoryLog;
use crate::models::dynamics::{
    Discretization, ExactExponential, UnicycleKinematics, ZeroOrderHold,
};
use crate::models::measurement::{
    CombinedObservation, Measurement, PositionObservation, RateAccelObservation,
};
use crate::noise::{ModelRng, NoiseChannel, NoiseProfile};
use crate::types::{wrap_angle, Control, State};
use nalgebra::{DMatrix, DVector};

/// Plant and sensor model of a mobile ground vehicle, as consumed by an
/// external state estimator (EKF) and simulation driver.
///
/// One instance owns its current state, current input, sample time, noise
/// profile, random source, and history log; nothing is shared across
/// instances. Per tick the driver calls [`Vehicle::f`] for the next state,
/// [`Vehicle::state_jacobian`] for the covariance prediction, one of the
/// `observe_*` functions for the filter update, and [`Vehicle::record`] to
/// log the transition.
#[derive(Debug)]
pub struct Vehicle {
    kinematics: UnicycleKinematics,
    strategy: Box<dyn Discretization>,
    sample_time: f64,
    noise_profile: NoiseProfile,
    process_noise: bool,
    observation_noise: bool,
    rng: ModelRng,
    state: State,
    input: Control,
    history: HistoryLog,
}

impl Vehicle {
    /// Builds a vehicle from a validated configuration and an explicit,
    /// caller-seeded random source.
    pub fn new(config: VehicleConfig, rng: ModelRng) -> Result<Self, ModelError> {
        if !config.sample_time.is_finite() || config.sample_time <= 0.0 {
            return Err(ModelError::Configuration(format!(
                "sample time must be strictly positive, got {}",
                config.sample_time
            )));
        }
        let noise_profile = NoiseProfile::from_slice(&config.measurement_stds)?;

        let kinematics = UnicycleKinematics::new(config.layout);
        let mut state = State::from_vec(config.initial_state);
        let input = Control::from_vec(config.initial_input);
        kinematics.check_dims(&state, &input)?;
        state[2] = wrap_angle(state[2]);

        let strategy: Box<dyn Discretization> = match config.discretization {
            DiscretizationStrategy::ZeroOrderHold => Box::new(ZeroOrderHold),
            DiscretizationStrategy::ExactExponential => Box::new(ExactExponential),
        };

        Ok(Self {
            kinematics,
            strategy,
            sample_time: config.sample_time,
            noise_profile,
            process_noise: config.process_noise,
            observation_noise: config.observation_noise,
            rng,
            state,
            input,
            history: HistoryLog::new(),
        })
    }

    /// Convenience constructor seeding the random source from a single value.
    pub fn with_seed(config: VehicleConfig, seed: u64) -> Result<Self, ModelError> {
        Self::new(config, ModelRng::seeded(seed))
    }

    // =====================================================================
    // == Dynamics ==
    // =====================================================================

    /// Next discrete-time state: `x_next = f(x, u)` under the configured
    /// discretization strategy. The heading component of the result is
    /// normalized into `[0, 2π)`.
    ///
    /// With `enable_noise` (and the construction-time process-noise flag) the
    /// control input is perturbed before propagation: the speed/acceleration
    /// channel by the profile's acceleration entry, the yaw-rate channel by
    /// its yaw-rate entry. With noise disabled the call is fully
    /// deterministic, which finite-difference Jacobian checks rely on.
    pub fn f(&mut self, x: &State, u: &Control, enable_noise: bool) -> Result<State, ModelError> {
        self.kinematics.check_dims(x, u)?;

        let u_applied = if enable_noise && self.process_noise {
            Control::from_vec(vec![
                u[0] + self.noise_profile.sample(NoiseChannel::Acceleration, &mut self.rng),
                u[1] + self.noise_profile.sample(NoiseChannel::YawRate, &mut self.rng),
            ])
        } else {
            u.clone()
        };

        let mut x_next = self
            .strategy
            .step(&self.kinematics, x, &u_applied, self.sample_time)?;
        x_next[2] = wrap_angle(x_next[2]);
        Ok(x_next)
    }

    /// State Jacobian `F = ∂f/∂x` of the zero-order-hold discrete dynamics,
    /// evaluated at `x` with the input held at the vehicle's current value
    /// and noise at zero. Consumed by the external estimator to propagate
    /// covariance.
    pub fn state_jacobian(&self, x: &State) -> Result<DMatrix<f64>, ModelError> {
        self.kinematics
            .discrete_state_jacobian(x, &self.input, self.sample_time)
    }

    // =====================================================================
    // == Observations ==
    // =====================================================================

    fn observe(
        &mut self,
        model: &dyn Measurement,
        x: &State,
        u: &Control,
        enable_noise: bool,
    ) -> Result<(DVector<f64>, DMatrix<f64>), ModelError> {
        let mut z = model.predict(x, u)?;
        if enable_noise && self.observation_noise {
            for (row, channel) in model.noise_channels().iter().enumerate() {
                z[row] += self.noise_profile.sample(*channel, &mut self.rng);
            }
        }
        Ok((z, model.jacobian()))
    }

    /// Position measurement `[x, y]` and its observation Jacobian.
    pub fn observe_position(
        &mut self,
        x: &State,
        u: &Control,
        enable_noise: bool,
    ) -> Result<(DVector<f64>, DMatrix<f64>), ModelError> {
        let obs = PositionObservation {
            layout: self.kinematics.layout,
        };
        self.observe(&obs, x, u, enable_noise)
    }

    /// Rate/acceleration measurement (the raw control input) and its
    /// observation Jacobian, which is zero with respect to the state.
    pub fn observe_rate_accel(
        &mut self,
        x: &State,
        u: &Control,
        enable_noise: bool,
    ) -> Result<(DVector<f64>, DMatrix<f64>), ModelError> {
        let obs = RateAccelObservation {
            layout: self.kinematics.layout,
        };
        self.observe(&obs, x, u, enable_noise)
    }

    /// Stacked measurement: position rows over input-pass-through rows, with
    /// the correspondingly stacked observation Jacobian.
    pub fn observe_combined(
        &mut self,
        x: &State,
        u: &Control,
        enable_noise: bool,
    ) -> Result<(DVector<f64>, DMatrix<f64>), ModelError> {
        let obs = CombinedObservation {
            layout: self.kinematics.layout,
        };
        self.observe(&obs, x, u, enable_noise)
    }

    // =====================================================================
    // == History & bookkeeping ==
    // =====================================================================

    /// Replaces the current `(state, input)` pair and appends it to the
    /// history log. Shape validation happens before any mutation, so a
    /// failed call never corrupts the log.
    pub fn record(&mut self, x: State, u: Control) -> Result<(), ModelError> {
        self.kinematics.check_dims(&x, &u)?;
        let mut x = x;
        x[2] = wrap_angle(x[2]);
        self.state = x.clone();
        self.input = u.clone();
        self.history.push(x, u);
        Ok(())
    }

    /// One full simulation tick: propagates the current state under `u`,
    /// records the transition, and returns the new state.
    pub fn advance(&mut self, u: &Control, enable_noise: bool) -> Result<&State, ModelError> {
        let x = self.state.clone();
        let x_next = self.f(&x, u, enable_noise)?;
        self.record(x_next, u.clone())?;
        Ok(&self.state)
    }

    /// Read-only access to the accumulated `(state, input)` series, in
    /// chronological order.
    pub fn history(&self) -> (&[State], &[Control]) {
        (self.history.states(), self.history.inputs())
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn input(&self) -> &Control {
        &self.input
    }

    pub fn sample_time(&self) -> f64 {
        self.sample_time
    }

    pub fn kinematics(&self) -> &UnicycleKinematics {
        &self.kinematics
    }

    pub fn noise_profile(&self) -> &NoiseProfile {
        &self.noise_profile
    }
}
