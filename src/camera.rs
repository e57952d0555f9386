use nalgebra::{Matrix3, Vector3};

pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 20.0;

/// Radians of orbit per pixel of drag.
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Wheel delta to zoom multiplier: multiplier = 1 + delta * rate.
pub const WHEEL_ZOOM_RATE: f32 = -0.001;

pub const ZOOM_IN_STEP: f32 = 0.9;
pub const ZOOM_OUT_STEP: f32 = 1.1;

/// Orbit camera parameterized by two angles and a radial distance, always
/// aimed at the origin. Angles are unbounded; the trig reconstruction each
/// frame makes wrap-around harmless.
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Eye starts on the (1,1,1) diagonal, matching an initial view
        // from (5,5,5).
        Self {
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: (1.0 / 3.0f32.sqrt()).asin(),
            distance: 75.0f32.sqrt(),
        }
    }
}

impl OrbitCamera {
    pub fn apply_drag(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += delta_x * DRAG_SENSITIVITY;
        self.pitch += delta_y * DRAG_SENSITIVITY;
    }

    /// Multiplicative zoom. Steps that would leave [MIN_DISTANCE,
    /// MAX_DISTANCE] are dropped without changing state.
    pub fn apply_zoom(&mut self, multiplier: f32) {
        let next = self.distance * multiplier;
        if (MIN_DISTANCE..=MAX_DISTANCE).contains(&next) {
            self.distance = next;
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn position(&self) -> Vector3<f32> {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.distance * Vector3::new(sy * cp, sp, cy * cp)
    }

    /// World-to-view rotation: rows are the camera's right, up and eye axes.
    /// Rebuilt from the angles every frame, so the camera re-aims at the
    /// origin by construction.
    pub fn view_matrix(&self) -> Matrix3<f32> {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Matrix3::new(
            cy, 0.0, -sy, //
            -sy * sp, cp, -cy * sp, //
            sy * cp, sp, cy * cp,
        )
    }
}
