use crate::components::{Player, Position};
use bevy::prelude::*;

/// Camera follow speed constant - interpolation factor
const CAMERA_FOLLOW_SPEED: f32 = 3.0;

/// Target viewport dimensions in game units
const TARGET_VIEWPORT_WIDTH: f32 = 1000.0;
const TARGET_VIEWPORT_HEIGHT: f32 = 650.0;

/// Camera plugin - follows the player, clamped so the viewport never
/// scrolls past the map's left or bottom edge
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(PostUpdate, (camera_follow_system, update_camera_projection));
    }
}

/// Camera marker component
#[derive(Component)]
pub struct GameCamera;

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), GameCamera));
}

/// Smoothly center the camera on the player with lag, clamping at the
/// map's left and bottom edges
fn camera_follow_system(
    time: Res<Time>,
    player_query: Query<&Position, With<Player>>,
    mut camera_query: Query<&mut Transform, With<GameCamera>>,
) {
    let Ok(player_pos) = player_query.get_single() else {
        return;
    };

    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };

    let delta = time.delta_seconds();
    let lerp_factor = 1.0 - (-CAMERA_FOLLOW_SPEED * delta).exp();

    let new_x = camera_transform.translation.x
        + (player_pos.x - camera_transform.translation.x) * lerp_factor;
    let new_y = camera_transform.translation.y
        + (player_pos.y - camera_transform.translation.y) * lerp_factor;

    // Never show anything left of x=0 or below y=0
    camera_transform.translation.x = new_x.max(TARGET_VIEWPORT_WIDTH / 2.0);
    camera_transform.translation.y = new_y.max(TARGET_VIEWPORT_HEIGHT / 2.0);
}

/// Keep the projection scale consistent across window sizes
fn update_camera_projection(
    windows: Query<&Window>,
    mut camera_query: Query<&mut OrthographicProjection, With<GameCamera>>,
) {
    let Ok(mut projection) = camera_query.get_single_mut() else {
        return;
    };

    let (window_width, window_height) = match windows.iter().next() {
        Some(win) => (win.width(), win.height()),
        None => (TARGET_VIEWPORT_WIDTH, TARGET_VIEWPORT_HEIGHT),
    };

    // Scale so the visible extent never exceeds the target viewport;
    // otherwise the edge clamp in camera_follow_system cannot hold
    let scale_x = TARGET_VIEWPORT_WIDTH / window_width;
    let scale_y = TARGET_VIEWPORT_HEIGHT / window_height;
    projection.scale = scale_x.min(scale_y);
}
