// src/models/dynamics/unicycle.rs

use crate::config::StateLayout;
use crate::error::ModelError;
use crate::types::{Control, State};
use nalgebra::DMatrix;

/// Kinematic unicycle model for a mobile ground vehicle.
///
/// The vehicle moves along its heading at a controlled speed while turning at
/// a controlled yaw rate. Depending on the layout, speed is either part of
/// the control input or a state variable driven by an acceleration input:
///
/// - `PoseOnly`: state `[x, y, theta]`, control `[v, omega]`,
///   `x_dot = [v*cos(theta), v*sin(theta), omega]`
/// - `PoseAndSpeed`: state `[x, y, theta, v]`, control `[a, omega]`,
///   `x_dot = [v*cos(theta), v*sin(theta), omega, a]`
#[derive(Debug, Clone, Copy)]
pub struct UnicycleKinematics {
    pub layout: StateLayout,
}

impl UnicycleKinematics {
    pub fn new(layout: StateLayout) -> Self {
        Self { layout }
    }

    pub fn state_dim(&self) -> usize {
        self.layout.state_dim()
    }

    pub fn control_dim(&self) -> usize {
        self.layout.control_dim()
    }

    pub(crate) fn check_dims(&self, x: &State, u: &Control) -> Result<(), ModelError> {
        if x.nrows() != self.state_dim() {
            return Err(ModelError::shape("state vector", self.state_dim(), x.nrows()));
        }
        if u.nrows() != self.control_dim() {
            return Err(ModelError::shape(
                "control vector",
                self.control_dim(),
                u.nrows(),
            ));
        }
        Ok(())
    }

    /// Forward speed at the operating point. For `PoseOnly` the speed is the
    /// first control component, for `PoseAndSpeed` it is the fourth state.
    fn speed(&self, x: &State, u: &Control) -> f64 {
        match self.layout {
            StateLayout::PoseOnly => u[0],
            StateLayout::PoseAndSpeed => x[3],
        }
    }

    /// Computes the time derivative of the state vector: `x_dot = f(x, u)`.
    pub fn derivatives(&self, x: &State, u: &Control) -> Result<State, ModelError> {
        self.check_dims(x, u)?;
        let theta = x[2];
        let v = self.speed(x, u);
        let omega = u[1];

        Ok(match self.layout {
            StateLayout::PoseOnly => {
                State::from_vec(vec![v * theta.cos(), v * theta.sin(), omega])
            }
            StateLayout::PoseAndSpeed => {
                let a = u[0];
                State::from_vec(vec![v * theta.cos(), v * theta.sin(), omega, a])
            }
        })
    }

    /// Continuous-time linearization at `(x, u)`:
    /// `A = ∂x_dot/∂x`, `B = ∂x_dot/∂u`.
    pub fn continuous_jacobians(
        &self,
        x: &State,
        u: &Control,
    ) -> Result<(DMatrix<f64>, DMatrix<f64>), ModelError> {
        self.check_dims(x, u)?;
        let n = self.state_dim();
        let theta = x[2];
        let v = self.speed(x, u);

        let mut a_mat = DMatrix::<f64>::zeros(n, n);
        // Position rows couple to heading in both layouts.
        a_mat[(0, 2)] = -v * theta.sin();
        a_mat[(1, 2)] = v * theta.cos();

        let mut b_mat = DMatrix::<f64>::zeros(n, 2);
        match self.layout {
            StateLayout::PoseOnly => {
                b_mat[(0, 0)] = theta.cos();
                b_mat[(1, 0)] = theta.sin();
                b_mat[(2, 1)] = 1.0;
            }
            StateLayout::PoseAndSpeed => {
                // Position rows also couple to the speed state.
                a_mat[(0, 3)] = theta.cos();
                a_mat[(1, 3)] = theta.sin();
                b_mat[(2, 1)] = 1.0;
                b_mat[(3, 0)] = 1.0;
            }
        }

        Ok((a_mat, b_mat))
    }

    /// The kinematics are input-affine, `x_dot = drift(x) + B(x) * u`. This
    /// returns the combined coupling `[B(x) | drift(x)]` (n x 3) so that
    /// `x_dot = affine_coupling(x) * [u; 1]`, which lets the discretizers
    /// treat the drift as one more held-constant input channel.
    pub fn affine_coupling(&self, x: &State) -> Result<DMatrix<f64>, ModelError> {
        if x.nrows() != self.state_dim() {
            return Err(ModelError::shape("state vector", self.state_dim(), x.nrows()));
        }
        let n = self.state_dim();
        let theta = x[2];

        let mut c = DMatrix::<f64>::zeros(n, 3);
        match self.layout {
            StateLayout::PoseOnly => {
                // No drift: everything enters through the input.
                c[(0, 0)] = theta.cos();
                c[(1, 0)] = theta.sin();
                c[(2, 1)] = 1.0;
            }
            StateLayout::PoseAndSpeed => {
                let v = x[3];
                c[(2, 1)] = 1.0;
                c[(3, 0)] = 1.0;
                // Drift column: the vehicle coasts along its heading at the
                // stored speed even under zero input.
                c[(0, 2)] = v * theta.cos();
                c[(1, 2)] = v * theta.sin();
            }
        }
        Ok(c)
    }

    /// Analytic Jacobian of the zero-order-hold discrete step
    /// `x_next = x + dt * x_dot(x, u)` with respect to the state, evaluated
    /// at `(x, u)`. This is the `F` an EKF uses to propagate covariance; it
    /// must track the discretization in `ZeroOrderHold::step`.
    pub fn discrete_state_jacobian(
        &self,
        x: &State,
        u: &Control,
        dt: f64,
    ) -> Result<DMatrix<f64>, ModelError> {
        self.check_dims(x, u)?;
        let n = self.state_dim();
        let theta = x[2];
        let v = self.speed(x, u);

        let mut f_jac = DMatrix::<f64>::identity(n, n);
        f_jac[(0, 2)] = -v * dt * theta.sin();
        f_jac[(1, 2)] = v * dt * theta.cos();
        if self.layout == StateLayout::PoseAndSpeed {
            f_jac[(0, 3)] = dt * theta.cos();
            f_jac[(1, 3)] = dt * theta.sin();
        }
        Ok(f_jac)
    }
}
