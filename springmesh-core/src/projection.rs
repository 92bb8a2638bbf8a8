/// Camera and projection utilities
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transform::Matrix4;
use crate::vector::{Axis, Vector3};

/// Factor applied to the frustum half-width per zoom step
pub const ZOOM_FACTOR: f64 = 1.1;
/// Degrees added or removed per orientation step
pub const ANGLE_STEP: f64 = 1.0;

/// Everything that defines where the camera is and what it sees.
///
/// Angles are in degrees and accumulate without wrapping. The eye sits
/// `mid` away from `target`; `near`/`far` bound the frustum and `side` is
/// its half-width at the near plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewParameters {
    pub target: Vector3,
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub side: f64,
    pub near: f64,
    pub mid: f64,
    pub far: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            target: Vector3::new(0.5, 0.5, 0.5),
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            side: 3.0,
            near: 90.0,
            mid: 100.0,
            far: 150.0,
            viewport_width: 500.0,
            viewport_height: 500.0,
        }
    }
}

impl ViewParameters {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("side", self.side),
            ("near", self.near),
            ("mid", self.mid),
            ("far", self.far),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidView(format!("{} must be positive, got {}", name, value)));
            }
        }
        if self.far <= self.near {
            return Err(Error::InvalidView(format!(
                "far ({}) must lie beyond near ({})",
                self.far, self.near
            )));
        }
        let angles = [self.pitch, self.yaw, self.roll];
        if !self.target.is_finite() || angles.iter().any(|a| !a.is_finite()) {
            return Err(Error::InvalidView("target and angles must be finite".to_string()));
        }
        Ok(())
    }

    /// Apply pitch about X, then yaw about Y, then roll about Z.
    fn orient(&self, v: Vector3) -> Vector3 {
        v.rotate(self.pitch, Axis::X)
            .rotate(self.yaw, Axis::Y)
            .rotate(self.roll, Axis::Z)
    }

    /// Eye position: `mid` along +Z from the target, rotated into place.
    pub fn eye(&self) -> Vector3 {
        self.target + self.orient(Vector3::new(0.0, 0.0, self.mid))
    }

    pub fn up(&self) -> Vector3 {
        self.orient(Vector3::new(0.0, 1.0, 0.0))
    }
}

/// A virtual camera mapping world points to viewport pixels.
///
/// The stage matrices are rebuilt from scratch whenever the view
/// parameters change.
#[derive(Debug, Clone)]
pub struct Camera {
    params: ViewParameters,
    world_to_camera: Matrix4,
    projection: Matrix4,
    viewport: Matrix4,
    transform: Matrix4,
}

impl Camera {
    pub fn new(params: ViewParameters) -> Result<Self> {
        let mut camera = Self::underived(params);
        camera.derive_transform()?;
        Ok(camera)
    }

    fn underived(params: ViewParameters) -> Self {
        Self {
            params,
            world_to_camera: Matrix4::identity(),
            projection: Matrix4::identity(),
            viewport: Matrix4::identity(),
            transform: Matrix4::identity(),
        }
    }

    /// Recompute every stage matrix from the current view parameters.
    pub fn derive_transform(&mut self) -> Result<()> {
        let p = &self.params;
        p.validate()?;

        let eye = p.eye();
        let up = p.up();
        let world_to_camera = Matrix4::look_at(eye, p.target, up)?;
        let projection = Matrix4::perspective(p.near, p.far, -p.side, p.side, -p.side, p.side);
        let viewport = Matrix4::viewport(p.viewport_width, p.viewport_height);
        let transform = viewport.mul(&projection).mul(&world_to_camera);

        log::debug!("camera eye = ({}), target = ({}), up = ({})", eye, p.target, up);
        log::trace!("world to camera\n{}", world_to_camera);
        log::trace!("projection\n{}", projection);
        log::trace!("viewport\n{}", viewport);
        log::trace!("transform\n{}", transform);

        self.world_to_camera = world_to_camera;
        self.projection = projection;
        self.viewport = viewport;
        self.transform = transform;
        Ok(())
    }

    pub fn params(&self) -> &ViewParameters {
        &self.params
    }

    /// Replace the view parameters, keeping the old ones if they fail to
    /// derive a transform.
    pub fn set_params(&mut self, params: ViewParameters) -> Result<()> {
        let previous = std::mem::replace(&mut self.params, params);
        if let Err(e) = self.derive_transform() {
            self.params = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn world_to_camera(&self) -> &Matrix4 {
        &self.world_to_camera
    }

    pub fn projection(&self) -> &Matrix4 {
        &self.projection
    }

    pub fn viewport(&self) -> &Matrix4 {
        &self.viewport
    }

    /// Composed world-to-screen transform.
    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    /// Project a world point to screen coordinates.
    pub fn project(&self, point: Vector3) -> Result<(f64, f64)> {
        let screen = self.transform.transform(point)?;
        Ok((screen.x, screen.y))
    }

    /// Zoom in for `direction >= 0`, out otherwise.
    pub fn zoom(&mut self, direction: i32) -> Result<()> {
        let mut params = self.params;
        if direction < 0 {
            params.side *= ZOOM_FACTOR;
        } else {
            params.side /= ZOOM_FACTOR;
        }
        self.set_params(params)
    }

    pub fn adjust_pitch(&mut self, direction: i32) -> Result<()> {
        let mut params = self.params;
        params.pitch += step(direction);
        self.set_params(params)
    }

    pub fn adjust_yaw(&mut self, direction: i32) -> Result<()> {
        let mut params = self.params;
        params.yaw += step(direction);
        self.set_params(params)
    }

    pub fn adjust_roll(&mut self, direction: i32) -> Result<()> {
        let mut params = self.params;
        params.roll += step(direction);
        self.set_params(params)
    }
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self::underived(ViewParameters::default());
        if let Err(e) = camera.derive_transform() {
            log::error!("default camera failed to derive: {}", e);
        }
        camera
    }
}

fn step(direction: i32) -> f64 {
    if direction < 0 {
        -ANGLE_STEP
    } else {
        ANGLE_STEP
    }
}
