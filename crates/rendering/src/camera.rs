use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use serde::{Deserialize, Serialize};

use simulation::config::{
    HALF_EXTENT, INITIAL_ZOOM, MAX_PITCH_DEG, MAX_ZOOM, MIN_PITCH_DEG, MIN_ZOOM,
};

use crate::camera_smoothing::exp_lerp_factor;

/// Camera position relative to the pivot before yaw/pitch are applied.
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 45.0, 45.0);

/// Below this the projection is considered to have reached `target_zoom`.
const ZOOM_SETTLE_EPSILON: f32 = 1e-3;

/// Input tunables for the camera rig.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Degrees of yaw/pitch per pixel of secondary-button drag.
    pub rotate_deg_per_px: f32,
    /// World units per pixel of primary drag at `INITIAL_ZOOM`.
    pub pan_per_px: f32,
    /// Zoom change per wheel line.
    pub wheel_step: f32,
    /// Zoom change per pixel of pinch-distance change.
    pub pinch_step: f32,
    /// Exponential smoothing speed of the projection height.
    pub zoom_smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotate_deg_per_px: 0.3,
            pan_per_px: 0.05,
            wheel_step: 5.0,
            pinch_step: 0.1,
            zoom_smoothing: 10.0,
        }
    }
}

/// Orbit rig: the camera sits at `CAMERA_OFFSET` from a pivot on the ground
/// and always looks at it. Yaw and pitch rotate the whole rig; zoom is the
/// vertical extent of the orthographic projection.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraRig {
    /// Degrees around the world Y axis.
    pub pivot_yaw: f32,
    /// Degrees, clamped to `[MIN_PITCH_DEG, MAX_PITCH_DEG]`.
    pub pivot_pitch: f32,
    pub current_zoom: f32,
    pub target_zoom: f32,
    /// Pivot position on the ground plane.
    pub pan_offset: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            pivot_yaw: 0.0,
            pivot_pitch: 0.0,
            current_zoom: INITIAL_ZOOM,
            target_zoom: INITIAL_ZOOM,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Secondary drag: horizontal motion spins, vertical motion tilts.
    pub fn orbit(&mut self, delta: Vec2, config: &CameraConfig) {
        if !delta.is_finite() {
            return;
        }
        self.pivot_yaw = (self.pivot_yaw - delta.x * config.rotate_deg_per_px).rem_euclid(360.0);
        self.pivot_pitch = (self.pivot_pitch + delta.y * config.rotate_deg_per_px)
            .clamp(MIN_PITCH_DEG, MAX_PITCH_DEG);
    }

    /// Primary drag: move the pivot opposite to the pointer in the rig's
    /// ground frame, so the map follows the finger. Faster when zoomed out.
    pub fn pan(&mut self, delta: Vec2, config: &CameraConfig) {
        if !delta.is_finite() {
            return;
        }
        let scale = config.pan_per_px * self.current_zoom / INITIAL_ZOOM;
        let local = Vec3::new(-delta.x, 0.0, -delta.y) * scale;
        let world = Quat::from_rotation_y(self.pivot_yaw.to_radians()) * local;
        self.pan_offset.x = (self.pan_offset.x + world.x).clamp(-HALF_EXTENT, HALF_EXTENT);
        self.pan_offset.z = (self.pan_offset.z + world.z).clamp(-HALF_EXTENT, HALF_EXTENT);
    }

    /// Positive `delta` zooms out. The result is clamped; the projection
    /// catches up through `smooth_zoom`.
    pub fn zoom_by(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.target_zoom = (self.target_zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_settled(&self) -> bool {
        (self.target_zoom - self.current_zoom).abs() <= ZOOM_SETTLE_EPSILON
    }

    pub fn smooth_zoom(&mut self, speed: f32, dt: f32) {
        if self.zoom_settled() {
            self.current_zoom = self.target_zoom;
            return;
        }
        let t = exp_lerp_factor(speed, dt);
        self.current_zoom += (self.target_zoom - self.current_zoom) * t;
        if self.zoom_settled() {
            self.current_zoom = self.target_zoom;
        }
    }

    /// World transform of the camera: the rig rotation applied to the
    /// offset camera, which looks at the pivot.
    pub fn camera_transform(&self) -> Transform {
        let rig = Transform {
            translation: self.pan_offset,
            rotation: Quat::from_euler(
                EulerRot::YXZ,
                self.pivot_yaw.to_radians(),
                -self.pivot_pitch.to_radians(),
                0.0,
            ),
            scale: Vec3::ONE,
        };
        let local = Transform::from_translation(CAMERA_OFFSET).looking_at(Vec3::ZERO, Vec3::Y);
        rig.mul_transform(local)
    }
}

/// Marker for the single city camera.
#[derive(Component)]
pub struct CityCamera;

pub fn orthographic_projection(zoom: f32) -> Projection {
    Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::FixedVertical {
            viewport_height: zoom,
        },
        ..OrthographicProjection::default_3d()
    })
}

pub fn setup_camera(mut commands: Commands, rig: Res<CameraRig>) {
    commands.spawn((
        CityCamera,
        Camera3d::default(),
        orthographic_projection(rig.current_zoom),
        rig.camera_transform(),
    ));
}

/// System: ease the projection height toward `target_zoom`.
pub fn smooth_camera_zoom(time: Res<Time>, config: Res<CameraConfig>, mut rig: ResMut<CameraRig>) {
    if rig.current_zoom == rig.target_zoom {
        return;
    }
    rig.smooth_zoom(config.zoom_smoothing, time.delta_secs());
}

/// System: apply the rig to the camera transform and projection.
pub fn apply_camera_rig(
    rig: Res<CameraRig>,
    mut query: Query<(&mut Transform, &mut Projection), With<CityCamera>>,
) {
    if !rig.is_changed() {
        return;
    }
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };
    *transform = rig.camera_transform();
    if let Projection::Orthographic(ortho) = projection.as_mut() {
        ortho.scaling_mode = ScalingMode::FixedVertical {
            viewport_height: rig.current_zoom,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_looks_at_origin_from_offset() {
        let rig = CameraRig::default();
        let t = rig.camera_transform();
        assert!((t.translation - CAMERA_OFFSET).length() < 1e-3);
        let forward = *t.forward();
        let expected = (-CAMERA_OFFSET).normalize();
        assert!((forward - expected).length() < 1e-3);
    }

    #[test]
    fn test_camera_keeps_distance_under_yaw_and_pitch() {
        let rig = CameraRig {
            pivot_yaw: 135.0,
            pivot_pitch: 30.0,
            pan_offset: Vec3::new(10.0, 0.0, -4.0),
            ..default()
        };
        let t = rig.camera_transform();
        let distance = (t.translation - rig.pan_offset).length();
        assert!((distance - CAMERA_OFFSET.length()).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::default();
        rig.orbit(Vec2::new(0.0, 10_000.0), &config);
        assert_eq!(rig.pivot_pitch, MAX_PITCH_DEG);
        rig.orbit(Vec2::new(0.0, -10_000.0), &config);
        assert_eq!(rig.pivot_pitch, MIN_PITCH_DEG);
    }

    #[test]
    fn test_zoom_target_is_clamped() {
        let mut rig = CameraRig::default();
        for _ in 0..100 {
            rig.zoom_by(7.0);
        }
        assert_eq!(rig.target_zoom, MAX_ZOOM);
        for _ in 0..100 {
            rig.zoom_by(-3.0);
        }
        assert_eq!(rig.target_zoom, MIN_ZOOM);
        rig.zoom_by(f32::NAN);
        assert_eq!(rig.target_zoom, MIN_ZOOM);
    }

    #[test]
    fn test_zoom_smoothing_approaches_without_overshoot() {
        let mut rig = CameraRig::default();
        rig.zoom_by(20.0);
        let mut previous = rig.current_zoom;
        for _ in 0..30 {
            rig.smooth_zoom(10.0, 1.0 / 60.0);
            assert!(rig.current_zoom >= previous);
            assert!(rig.current_zoom <= rig.target_zoom);
            previous = rig.current_zoom;
        }
        for _ in 0..600 {
            rig.smooth_zoom(10.0, 1.0 / 60.0);
        }
        assert_eq!(rig.current_zoom, rig.target_zoom);
    }

    #[test]
    fn test_pan_moves_against_drag_and_scales_with_zoom() {
        let config = CameraConfig::default();
        let mut near = CameraRig::default();
        near.pan(Vec2::new(20.0, 0.0), &config);
        assert!(near.pan_offset.x < 0.0);

        let mut far = CameraRig {
            current_zoom: MAX_ZOOM,
            ..default()
        };
        far.pan(Vec2::new(20.0, 0.0), &config);
        assert!(far.pan_offset.x < near.pan_offset.x);
    }

    #[test]
    fn test_pan_is_bounded_to_map() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::default();
        rig.pan(Vec2::new(1e6, -1e6), &config);
        assert_eq!(rig.pan_offset.x, -HALF_EXTENT);
        assert_eq!(rig.pan_offset.z, HALF_EXTENT);
    }
}
