//! Orbit camera for the pseudo-3D system view.

/// Distance of the eye from the projection plane.
const FOCAL_LENGTH: f64 = 300.0;
/// Radians of rotation per unit of drag.
const DRAG_SENSITIVITY: f64 = 0.01;

pub const ZOOM_STEP: f64 = 0.2;
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;

/// A point in model space. `y` grows downwards, as on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A projected point with its perspective scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Multiply sizes by this to draw them at the point's depth.
    pub scale: f64,
}

/// View rotation and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Pitch (radians).
    pub rot_x: f64,
    /// Yaw (radians).
    pub rot_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            rot_x: 0.0,
            rot_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Rotates by a drag of `(dx, dy)`: horizontal drag yaws, vertical pitches.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.rot_x += dy * DRAG_SENSITIVITY;
        self.rot_y += dx * DRAG_SENSITIVITY;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rotates `p` about the y axis, then the x axis, and projects it.
    ///
    /// Returns screen-space offsets from the view centre, zoom applied.
    pub fn project(&self, p: Point3) -> Projected {
        let (sin_y, cos_y) = self.rot_y.sin_cos();
        let (sin_x, cos_x) = self.rot_x.sin_cos();

        let rx = p.x * cos_y - p.z * sin_y;
        let rz = p.x * sin_y + p.z * cos_y;
        let ry = p.y * cos_x - rz * sin_x;

        let perspective = FOCAL_LENGTH / (FOCAL_LENGTH + rz);
        Projected {
            x: rx * perspective * self.zoom,
            y: ry * perspective * self.zoom,
            scale: perspective * self.zoom,
        }
    }
}
