use bevy::prelude::*;

use crate::playback::ScenePlayback;

/// Marker for the HUD text
#[derive(Component)]
pub struct HudText;

/// Spawn the HUD overlay
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.8, 0.8, 0.8, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            right: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

/// Scene name, playhead and cursor age
pub fn update_hud(playback: Res<ScenePlayback>, mut query: Query<&mut Text, With<HudText>>) {
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };
    let player = &playback.player;
    let script = player.script();

    let mut line = format!(
        "{}  {:.1}/{:.1}s",
        playback.kind,
        player.time(),
        script.total_duration()
    );
    match player.current_step() {
        Some(step) => line.push_str(&format!("  step {}/{}", step + 1, script.steps.len())),
        None => line.push_str("  done"),
    }
    for binding in &script.cursors {
        if let Some(t) = player.cursor_progress(binding.cursor) {
            line.push_str(&format!("  t={t:.2} Gyr"));
            if t >= binding.tracker.t_now() {
                line.push_str(" (today)");
            }
        }
    }
    if playback.paused {
        line.push_str("  [paused]");
    } else if playback.speed != 1.0 {
        line.push_str(&format!("  x{}", playback.speed));
    }

    if text.0 != line {
        text.0 = line;
    }
}
