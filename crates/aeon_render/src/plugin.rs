use bevy::prelude::*;

use super::camera;
use super::elements;
use super::playback;
use super::strokes;
use super::ui;

/// Plays the scene held in the [`playback::ScenePlayback`] resource
pub struct AeonRenderPlugin;

impl Plugin for AeonRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (camera::spawn_camera, ui::spawn_hud, elements::spawn_elements),
        )
        .add_systems(
            Update,
            (
                playback::playback_control_system,
                playback::advance_playback.after(playback::playback_control_system),
                elements::sync_elements.after(playback::advance_playback),
                strokes::draw_strokes.after(playback::advance_playback),
                ui::update_hud.after(playback::advance_playback),
            ),
        );
    }
}
