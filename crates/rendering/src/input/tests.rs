use bevy::prelude::*;

use simulation::config::{MAX_ZOOM, MIN_ZOOM};
use simulation::grid::GridPos;

use super::*;
// Shadows the picking `PointerButton` in the Bevy prelude.
use super::PointerButton;
use crate::camera::{CameraConfig, CameraRig};

fn setup() -> (CameraController, CameraRig, CameraConfig) {
    (
        CameraController::default(),
        CameraRig::default(),
        CameraConfig::default(),
    )
}

// ---------------------------------------------------------------------------
// Click vs. drag
// ---------------------------------------------------------------------------

#[test]
fn test_short_press_release_is_a_tile_select() {
    let (mut ctl, mut rig, config) = setup();
    let start = Vec2::new(100.0, 100.0);
    assert_eq!(ctl.press(PointerButton::Primary, start, false), None);
    let end = start + Vec2::new(3.0, 2.0);
    ctl.move_to(end, &mut rig, &config);
    assert_eq!(
        ctl.release(PointerButton::Primary, end),
        Some(ControllerAction::SelectTile { at: end })
    );
    assert_eq!(ctl.gesture(), Gesture::Idle);
}

#[test]
fn test_drag_beyond_threshold_emits_nothing() {
    let (mut ctl, mut rig, config) = setup();
    let start = Vec2::new(100.0, 100.0);
    ctl.press(PointerButton::Primary, start, false);
    let end = start + Vec2::new(5.0, 0.0);
    ctl.move_to(end, &mut rig, &config);
    assert_eq!(ctl.release(PointerButton::Primary, end), None);
}

#[test]
fn test_drag_returning_to_start_still_counts_as_click() {
    // Displacement is measured from the press point, not accumulated.
    let (mut ctl, mut rig, config) = setup();
    let start = Vec2::new(50.0, 50.0);
    ctl.press(PointerButton::Primary, start, false);
    ctl.move_to(start + Vec2::new(40.0, 0.0), &mut rig, &config);
    ctl.move_to(start + Vec2::new(1.0, 0.0), &mut rig, &config);
    assert!(matches!(
        ctl.release(PointerButton::Primary, start + Vec2::new(1.0, 0.0)),
        Some(ControllerAction::SelectTile { .. })
    ));
}

#[test]
fn test_primary_drag_pans_the_pivot() {
    let (mut ctl, mut rig, config) = setup();
    ctl.press(PointerButton::Primary, Vec2::ZERO, false);
    ctl.move_to(Vec2::new(0.0, 40.0), &mut rig, &config);
    assert!(rig.pan_offset.z < 0.0);
    assert_eq!(rig.pivot_yaw, 0.0);
}

#[test]
fn test_threshold_boundary() {
    assert!(is_click(Vec2::ZERO, Vec2::new(4.9, 0.0)));
    assert!(!is_click(Vec2::ZERO, Vec2::new(5.0, 0.0)));
    assert!(!is_click(Vec2::ZERO, Vec2::new(f32::NAN, 0.0)));
}

// ---------------------------------------------------------------------------
// Secondary button
// ---------------------------------------------------------------------------

#[test]
fn test_secondary_with_active_build_cancels() {
    let (mut ctl, _, _) = setup();
    assert_eq!(
        ctl.press(PointerButton::Secondary, Vec2::ZERO, true),
        Some(ControllerAction::CancelBuild)
    );
    assert_eq!(ctl.gesture(), Gesture::Idle);
    assert_eq!(ctl.release(PointerButton::Secondary, Vec2::ZERO), None);
}

#[test]
fn test_secondary_without_build_rotates() {
    let (mut ctl, mut rig, config) = setup();
    assert_eq!(ctl.press(PointerButton::Secondary, Vec2::ZERO, false), None);
    assert!(matches!(ctl.gesture(), Gesture::Rotating { .. }));
    ctl.move_to(Vec2::new(-30.0, 20.0), &mut rig, &config);
    assert!((rig.pivot_yaw - 9.0).abs() < 1e-4);
    assert!((rig.pivot_pitch - 6.0).abs() < 1e-4);
    assert_eq!(ctl.release(PointerButton::Secondary, Vec2::ZERO), None);
    assert_eq!(ctl.gesture(), Gesture::Idle);
}

#[test]
fn test_rotation_release_never_selects() {
    let (mut ctl, _, _) = setup();
    ctl.press(PointerButton::Secondary, Vec2::ZERO, false);
    assert_eq!(ctl.release(PointerButton::Primary, Vec2::ZERO), None);
    assert!(matches!(ctl.gesture(), Gesture::Rotating { .. }));
}

#[test]
fn test_release_outside_window_ends_pan_without_select() {
    let (mut ctl, mut rig, config) = setup();
    ctl.press(PointerButton::Primary, Vec2::new(100.0, 100.0), false);
    ctl.release_without_position(PointerButton::Primary);
    assert_eq!(ctl.gesture(), Gesture::Idle);

    // Hovering back in with no button held must not drag the pivot.
    ctl.move_to(Vec2::new(300.0, 100.0), &mut rig, &config);
    ctl.move_to(Vec2::new(500.0, 100.0), &mut rig, &config);
    assert_eq!(rig.pan_offset, Vec3::ZERO);

    // And the next press starts a fresh gesture.
    ctl.press(PointerButton::Primary, Vec2::new(10.0, 10.0), false);
    assert!(matches!(ctl.gesture(), Gesture::Panning { .. }));
}

#[test]
fn test_release_outside_window_of_other_button_keeps_gesture() {
    let (mut ctl, _, _) = setup();
    ctl.press(PointerButton::Secondary, Vec2::ZERO, false);
    ctl.release_without_position(PointerButton::Primary);
    assert!(matches!(ctl.gesture(), Gesture::Rotating { .. }));
    ctl.release_without_position(PointerButton::Secondary);
    assert_eq!(ctl.gesture(), Gesture::Idle);
}

#[test]
fn test_hover_pick_frozen_while_orbiting() {
    let (mut ctl, _, _) = setup();
    assert!(ctl.tracks_hover());
    ctl.press(PointerButton::Secondary, Vec2::ZERO, false);
    assert!(!ctl.tracks_hover());
    ctl.release(PointerButton::Secondary, Vec2::ZERO);
    assert!(ctl.tracks_hover());

    // Panning keeps the cursor live.
    ctl.press(PointerButton::Primary, Vec2::ZERO, false);
    assert!(ctl.tracks_hover());
}

#[test]
fn test_hover_pick_frozen_while_suppressed() {
    let (mut ctl, _, _) = setup();
    ctl.set_input_suppressed(true);
    assert!(!ctl.tracks_hover());
}

// ---------------------------------------------------------------------------
// Suppression
// ---------------------------------------------------------------------------

#[test]
fn test_suppressed_press_is_swallowed_until_release() {
    let (mut ctl, mut rig, config) = setup();
    ctl.set_input_suppressed(true);
    assert_eq!(ctl.press(PointerButton::Primary, Vec2::ZERO, false), None);
    assert_eq!(ctl.gesture(), Gesture::Ignored);

    // Leaving the overlay mid-gesture does not revive it.
    ctl.set_input_suppressed(false);
    ctl.move_to(Vec2::new(30.0, 0.0), &mut rig, &config);
    assert_eq!(rig.pan_offset, Vec3::ZERO);
    assert_eq!(ctl.release(PointerButton::Primary, Vec2::ZERO), None);
    assert_eq!(ctl.gesture(), Gesture::Idle);

    // The next gesture is handled normally.
    ctl.press(PointerButton::Primary, Vec2::ZERO, false);
    assert!(ctl.release(PointerButton::Primary, Vec2::ZERO).is_some());
}

#[test]
fn test_suppressed_secondary_does_not_cancel() {
    let (mut ctl, _, _) = setup();
    ctl.set_input_suppressed(true);
    assert_eq!(ctl.press(PointerButton::Secondary, Vec2::ZERO, true), None);
}

#[test]
fn test_suppression_does_not_cut_a_running_gesture() {
    let (mut ctl, mut rig, config) = setup();
    ctl.press(PointerButton::Primary, Vec2::ZERO, false);
    ctl.set_input_suppressed(true);
    ctl.move_to(Vec2::new(20.0, 0.0), &mut rig, &config);
    assert!(rig.pan_offset.x < 0.0);
}

#[test]
fn test_suppressed_wheel_is_ignored() {
    let (mut ctl, mut rig, config) = setup();
    ctl.set_input_suppressed(true);
    ctl.wheel(3.0, &mut rig, &config);
    assert_eq!(rig.target_zoom, CameraRig::default().target_zoom);
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_wheel_zoom_stays_clamped() {
    let (mut ctl, mut rig, config) = setup();
    let deltas = [1.0, 40.0, -3.0, -1000.0, 7.5, 0.25, 1e9, -1e9, 2.0];
    for d in deltas {
        ctl.wheel(d, &mut rig, &config);
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&rig.target_zoom));
    }
}

#[test]
fn test_wheel_up_zooms_in() {
    let (mut ctl, mut rig, config) = setup();
    let before = rig.target_zoom;
    ctl.wheel(1.0, &mut rig, &config);
    assert_eq!(rig.target_zoom, before - config.wheel_step);
}

#[test]
fn test_pinch_overrides_pan_and_never_selects() {
    let (mut ctl, mut rig, config) = setup();
    ctl.press(PointerButton::Primary, Vec2::ZERO, false);
    ctl.pinch(100.0, &mut rig, &config);
    assert!(matches!(ctl.gesture(), Gesture::Pinching { .. }));

    // Spreading fingers zooms in.
    let before = rig.target_zoom;
    ctl.pinch(150.0, &mut rig, &config);
    assert!(rig.target_zoom < before);

    // A stray single-finger press while pinching is ignored.
    assert_eq!(ctl.press(PointerButton::Primary, Vec2::ZERO, false), None);
    assert_eq!(ctl.release(PointerButton::Primary, Vec2::ZERO), None);
    assert_eq!(ctl.gesture(), Gesture::Idle);
}

#[test]
fn test_pinch_zoom_stays_clamped() {
    let (mut ctl, mut rig, config) = setup();
    ctl.pinch(10.0, &mut rig, &config);
    for d in [5000.0, 1.0, 9000.0, 0.0] {
        ctl.pinch(d, &mut rig, &config);
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&rig.target_zoom));
    }
}

// ---------------------------------------------------------------------------
// Picking
// ---------------------------------------------------------------------------

#[test]
fn test_straight_down_ray_hits_centre_cell() {
    let outcome = pick_cell(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
    assert_eq!(outcome, PickOutcome::Cell(GridPos::new(24, 24)));
}

#[test]
fn test_hit_point_snaps_to_nearest_cell() {
    // Ground point (1.1, -47.2) snaps to world (2, -48).
    let origin = Vec3::new(1.1, 5.0, -47.2);
    assert_eq!(
        pick_cell(origin, Vec3::NEG_Y),
        PickOutcome::Cell(GridPos::new(25, 0))
    );
}

#[test]
fn test_off_map_hit_disables_cursor() {
    let mut picked = PickedCell {
        cell: Some(GridPos::new(3, 3)),
    };
    picked.apply(pick_cell(Vec3::new(60.0, 10.0, 0.0), Vec3::NEG_Y));
    assert_eq!(picked.cell, None);
}

#[test]
fn test_near_parallel_ray_keeps_previous_cell() {
    let previous = GridPos::new(7, 9);
    let mut picked = PickedCell {
        cell: Some(previous),
    };
    let direction = Vec3::new(1.0, 1e-6, 0.0).normalize();
    let outcome = pick_cell(Vec3::new(0.0, 20.0, 0.0), direction);
    assert_eq!(outcome, PickOutcome::Unchanged);
    picked.apply(outcome);
    assert_eq!(picked.cell, Some(previous));
}

#[test]
fn test_ray_pointing_away_from_ground_is_ignored() {
    assert_eq!(ground_hit(Vec3::new(0.0, 10.0, 0.0), Vec3::Y), None);
    assert_eq!(
        pick_cell(Vec3::new(0.0, 10.0, 0.0), Vec3::Y),
        PickOutcome::Unchanged
    );
}

#[test]
fn test_non_finite_ray_is_ignored() {
    assert_eq!(
        pick_cell(Vec3::new(f32::NAN, 10.0, 0.0), Vec3::NEG_Y),
        PickOutcome::Unchanged
    );
}
