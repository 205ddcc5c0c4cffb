//! Orbit camera looking at the origin.

use crate::math::{multiply_matrices, multiply_matrix_vector, rotation_x, rotation_y, Mat3, Vec3};
use std::f64::consts::FRAC_PI_2;

const PITCH_LIMIT: f64 = FRAC_PI_2 - 0.01;
/// Depth below which points are treated as behind the camera
pub const NEAR_PLANE: f64 = 0.1;

/// Limits and defaults for the orbit camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Vertical field of view in degrees
    pub fov_degrees: f64,
    /// Initial pitch, so that equatorial rings are not seen edge-on
    pub elevation: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            distance: 20.0,
            min_distance: 5.0,
            max_distance: 50.0,
            fov_degrees: 75.0,
            elevation: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    settings: CameraSettings,
    pub yaw: f64,
    pub pitch: f64,
    pub distance: f64,
}

impl OrbitCamera {
    pub fn new(settings: CameraSettings) -> Self {
        let distance = settings
            .distance
            .clamp(settings.min_distance, settings.max_distance);
        OrbitCamera {
            settings,
            yaw: 0.0,
            pitch: settings.elevation.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
        }
    }

    /// Restores the initial orientation and distance
    pub fn reset(&mut self) {
        *self = OrbitCamera::new(self.settings);
    }

    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Multiplies the distance by `factor`, kept within the configured limits
    pub fn zoom(&mut self, factor: f64) {
        self.distance = (self.distance * factor)
            .clamp(self.settings.min_distance, self.settings.max_distance);
    }

    pub fn zoom_ratio(&self) -> f64 {
        self.settings.distance / self.distance
    }

    /// World to camera rotation
    pub fn rotation(&self) -> Mat3 {
        multiply_matrices(&rotation_x(self.pitch), &rotation_y(self.yaw))
    }

    /// Transforms a world point into camera space, camera looking down -Z
    pub fn to_view(&self, rotation: &Mat3, point: &Vec3) -> Vec3 {
        let rotated = multiply_matrix_vector(rotation, point);
        [rotated[0], rotated[1], rotated[2] - self.distance]
    }

    /// Focal length in pixels for a viewport `height` pixels tall
    pub fn focal_length(&self, height: f64) -> f64 {
        (height / 2.0) / (self.settings.fov_degrees.to_radians() / 2.0).tan()
    }

    /// Extents `(width, height)` of the world plane through the origin as seen
    /// from the default distance, for a viewport with the given aspect ratio
    pub fn reference_extents(&self, aspect: f64) -> (f64, f64) {
        let height = 2.0 * self.settings.distance * (self.settings.fov_degrees.to_radians() / 2.0).tan();
        (height * aspect, height)
    }
}

/// Projects camera space points onto a pixel viewport
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub center: [f64; 2],
    pub focal: f64,
}

impl Projection {
    pub fn new(camera: &OrbitCamera, width: usize, height: usize) -> Self {
        Projection {
            center: [width as f64 / 2.0, height as f64 / 2.0],
            focal: camera.focal_length(height as f64),
        }
    }

    /// Screen position and depth, or `None` behind the near plane
    pub fn project(&self, view: &Vec3) -> Option<([f64; 2], f64)> {
        let depth = -view[2];
        if depth < NEAR_PLANE {
            return None;
        }
        let x = self.center[0] + view[0] / depth * self.focal;
        let y = self.center[1] - view[1] / depth * self.focal;
        Some(([x, y], depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> CameraSettings {
        CameraSettings {
            elevation: 0.0,
            ..CameraSettings::default()
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = OrbitCamera::new(CameraSettings::default());
        camera.zoom(0.01);
        assert_eq!(camera.distance, 5.0);
        camera.zoom(1000.0);
        assert_eq!(camera.distance, 50.0);
        camera.reset();
        assert_eq!(camera.distance, 20.0);
        assert_eq!(camera.zoom_ratio(), 1.0);
    }

    #[test]
    fn pitch_stops_short_of_the_poles() {
        let mut camera = OrbitCamera::new(level());
        camera.orbit(0.5, 10.0);
        assert!(camera.pitch < FRAC_PI_2);
        camera.orbit(0.0, -20.0);
        assert!(camera.pitch > -FRAC_PI_2);
        assert_eq!(camera.yaw, 0.5);
    }

    #[test]
    fn origin_projects_to_viewport_center() {
        let camera = OrbitCamera::new(CameraSettings::default());
        let projection = Projection::new(&camera, 80, 48);
        let view = camera.to_view(&camera.rotation(), &[0.0, 0.0, 0.0]);
        let (screen, depth) = projection.project(&view).expect("in front of camera");
        assert_eq!(screen, [40.0, 24.0]);
        assert_eq!(depth, 20.0);
    }

    #[test]
    fn reference_plane_fills_the_viewport() {
        let camera = OrbitCamera::new(level());
        let (_, height) = camera.reference_extents(1.0);
        let projection = Projection::new(&camera, 100, 100);
        let top = camera.to_view(&camera.rotation(), &[0.0, height / 2.0, 0.0]);
        let (screen, _) = projection.project(&top).expect("in front of camera");
        assert!(screen[1].abs() < 1e-9);
    }

    #[test]
    fn points_behind_the_camera_are_rejected() {
        let camera = OrbitCamera::new(level());
        let projection = Projection::new(&camera, 10, 10);
        let view = camera.to_view(&camera.rotation(), &[0.0, 0.0, 25.0]);
        assert!(projection.project(&view).is_none());
    }
}
