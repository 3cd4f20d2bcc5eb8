use aeon_core::FRAME_HEIGHT;
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

/// Orthographic 2D camera showing exactly the scene frame height
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: FRAME_HEIGHT as f32,
            },
            ..OrthographicProjection::default_2d()
        },
    ));
    info!("Camera spawned, frame height {FRAME_HEIGHT}");
}
