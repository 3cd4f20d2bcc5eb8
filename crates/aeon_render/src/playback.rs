use aeon_scene::{Choreography, Player, SceneKind};
use bevy::prelude::*;

/// The scene being shown and how fast it is played
#[derive(Resource)]
pub struct ScenePlayback {
    pub kind: SceneKind,
    pub player: Player,
    pub paused: bool,
    pub speed: f64,
}

impl ScenePlayback {
    pub fn new(kind: SceneKind, script: Choreography) -> Self {
        Self {
            kind,
            player: Player::new(script),
            paused: false,
            speed: 1.0,
        }
    }

    /// Rewind to the first step
    pub fn restart(&mut self) {
        self.player = Player::new(self.player.script().clone());
    }
}

/// Advance the player by the frame time
pub fn advance_playback(time: Res<Time>, mut playback: ResMut<ScenePlayback>) {
    if playback.paused || playback.player.is_finished() {
        return;
    }
    let dt = time.delta_secs_f64() * playback.speed;
    let before = playback.player.current_step();
    playback.player.advance(dt);
    if playback.player.current_step() != before {
        match playback.player.current_step() {
            Some(step) => info!("{}: step {}", playback.kind, step),
            None => info!("{}: finished at {:.1}s", playback.kind, playback.player.time()),
        }
    }
}

/// Space pauses, R restarts, End jumps to the final frame, 1/2/3 pick half,
/// normal or double speed
pub fn playback_control_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut playback: ResMut<ScenePlayback>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        playback.paused = !playback.paused;
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        playback.restart();
        info!("{}: restarted", playback.kind);
    }
    if keyboard.just_pressed(KeyCode::End) && !playback.player.is_finished() {
        playback.player.finish();
        info!("{}: skipped to the end", playback.kind);
    }
    if keyboard.just_pressed(KeyCode::Digit1) {
        playback.speed = 0.5;
    }
    if keyboard.just_pressed(KeyCode::Digit2) {
        playback.speed = 1.0;
    }
    if keyboard.just_pressed(KeyCode::Digit3) {
        playback.speed = 2.0;
    }
}
