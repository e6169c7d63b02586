//! Orbit camera around a fixed focus point.
//!
//! The eye is stored relative to the focus point with `+Z` up. Dragging
//! changes only the eye's direction, scrolling only its distance. Each
//! handler computes a candidate position and either accepts it whole or
//! leaves the camera untouched; a rejection is a normal outcome, not an error.

use glam::{EulerRot, Mat4, Vec3};
use relief_core::constants::{DRAG_GAIN, MIN_ZOOM_RADIUS, POLE_RATIO_LIMIT, SCROLL_DAMPING};
use relief_core::types::{GridResolution, Viewport};

/// Point the camera orbits and looks at.
pub const FOCUS_POINT: Vec3 = Vec3::ZERO;

/// World up direction.
pub const UP: Vec3 = Vec3::Z;

/// Pointer drag in pixels, with the viewport it happened in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInput {
    pub dx: f32,
    pub dy: f32,
    pub viewport: Viewport,
    /// Aspect ratio the view is rendered at (width / height).
    pub aspect_ratio: f32,
}

impl DragInput {
    /// Drag deltas in device-independent units: a full viewport span is 2.
    pub fn scaled_deltas(&self) -> Option<(f32, f32)> {
        let fitted = self.viewport.fit_to_aspect(self.aspect_ratio);
        if !(fitted.width > 0.0 && fitted.height > 0.0) {
            return None;
        }
        Some((self.dx * 2.0 / fitted.width, self.dy * 2.0 / fitted.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    eye: Vec3,
    /// Hard floor for the eye height, in world units.
    sea_level: Option<f32>,
}

impl OrbitCamera {
    pub fn new(eye: Vec3) -> Self {
        Self {
            eye,
            sea_level: None,
        }
    }

    /// Starting position for a grid: behind the `(0, 0)` corner, raised by a
    /// third of the grid's combined extent.
    pub fn for_grid(resolution: GridResolution) -> Self {
        let x = resolution.x_range as f32;
        let y = resolution.y_range as f32;
        Self::new(Vec3::new(-x * 3.0 / 4.0, -y * 3.0 / 4.0, (x + y) / 3.0))
    }

    /// `for_grid` with a sea floor. When the default eye is at or below the
    /// floor it is scaled along its direction until it sits a third of the
    /// grid's combined extent above it.
    pub fn for_terrain(resolution: GridResolution, sea_level: Option<f32>) -> Self {
        let camera = Self::for_grid(resolution).with_sea_level(sea_level);
        match sea_level {
            Some(floor) if camera.eye.z <= floor => {
                let lift = (floor + camera.eye.z) / camera.eye.z;
                Self::new(camera.eye * lift).with_sea_level(sea_level)
            }
            _ => camera,
        }
    }

    pub fn with_sea_level(mut self, sea_level: Option<f32>) -> Self {
        self.sea_level = sea_level;
        self
    }

    /// Eye position relative to `FOCUS_POINT`.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn sea_level(&self) -> Option<f32> {
        self.sea_level
    }

    pub fn radius(&self) -> f32 {
        self.eye.length()
    }

    /// Horizontal angle of the eye, measured from `+X` toward `+Y`.
    pub fn azimuth(&self) -> f32 {
        self.eye.y.atan2(self.eye.x)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(FOCUS_POINT + self.eye, FOCUS_POINT, UP)
    }

    /// Eye position after `drag`, or `None` if the move must be rejected.
    ///
    /// Horizontal motion spins the eye about `Z`; vertical motion tilts it
    /// about the horizontal axis perpendicular to its azimuth. Rejected when
    /// the eye sits on the focus point, when either the current eye or the
    /// candidate has a horizontal radius of `POLE_RATIO_LIMIT` of the eye
    /// distance or less (the azimuth is undefined at the zenith and the view
    /// would flip), or when the candidate ends at or below the sea floor.
    pub fn dragged(&self, drag: &DragInput) -> Option<Vec3> {
        let (sdx, sdy) = drag.scaled_deltas()?;
        let r = self.radius();
        if !(r > 0.0) {
            return None;
        }
        if self.eye.truncate().length() / r <= POLE_RATIO_LIMIT {
            return None;
        }

        let theta = self.azimuth();
        let rotation = Mat4::from_euler(
            EulerRot::ZYX,
            DRAG_GAIN * sdx,
            DRAG_GAIN * theta.cos() * sdy,
            -DRAG_GAIN * theta.sin() * sdy,
        );
        let candidate = rotation.transform_point3(self.eye);

        if candidate.truncate().length() / r <= POLE_RATIO_LIMIT {
            return None;
        }
        if self.sea_level.is_some_and(|floor| candidate.z <= floor) {
            return None;
        }
        Some(candidate)
    }

    /// Eye position after a scroll of `y_offset`, or `None` if rejected.
    ///
    /// Positive offsets zoom in. The radius becomes `r * (1 - y_offset / 2)`
    /// and must stay at or above `MIN_ZOOM_RADIUS`. With a sea floor the
    /// height is scaled relative to the floor, so zooming never crosses it;
    /// the resulting eye must also keep `MIN_ZOOM_RADIUS` from the focus.
    pub fn scrolled(&self, y_offset: f32) -> Option<Vec3> {
        let factor = 1.0 - y_offset * SCROLL_DAMPING;
        let new_radius = self.radius() * factor;
        if !(new_radius >= MIN_ZOOM_RADIUS) {
            return None;
        }

        let candidate = match self.sea_level {
            Some(floor) => Vec3::new(
                self.eye.x * factor,
                self.eye.y * factor,
                floor + (self.eye.z - floor) * factor,
            ),
            None => self.eye * factor,
        };

        if !(candidate.length() >= MIN_ZOOM_RADIUS) {
            return None;
        }
        if self.sea_level.is_some_and(|floor| candidate.z <= floor) {
            return None;
        }
        Some(candidate)
    }

    /// Apply a drag. Returns whether the camera moved.
    pub fn on_drag(&mut self, drag: &DragInput) -> bool {
        match self.dragged(drag) {
            Some(eye) => {
                self.eye = eye;
                true
            }
            None => {
                log::debug!("Rejected drag ({}, {}) at eye {:?}", drag.dx, drag.dy, self.eye);
                false
            }
        }
    }

    /// Apply a scroll. Returns whether the camera moved.
    pub fn on_scroll(&mut self, y_offset: f32) -> bool {
        match self.scrolled(y_offset) {
            Some(eye) => {
                self.eye = eye;
                true
            }
            None => {
                log::debug!("Rejected scroll {y_offset} at radius {}", self.radius());
                false
            }
        }
    }
}
