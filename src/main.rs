use aeon_core::SceneConfig;
use aeon_render::playback::ScenePlayback;
use aeon_render::plugin::AeonRenderPlugin;
use aeon_scene::SceneKind;
use bevy::prelude::*;

fn main() {
    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| SceneKind::ScaleFactorTimeline.name().to_string());
    let config = SceneConfig::default();

    let built = SceneKind::from_name(&name)
        .and_then(|kind| kind.build(&config).map(|script| (kind, script)));
    let (kind, script) = match built {
        Ok(built) => built,
        Err(e) => {
            eprintln!("{e}");
            let names: Vec<_> = SceneKind::ALL.iter().map(|k| k.name()).collect();
            eprintln!("Available scenes: {}", names.join(", "));
            std::process::exit(2);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: format!("Aeon: {kind}"),
                resolution: (1920.0, 1080.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(ScenePlayback::new(kind, script))
        .add_plugins(AeonRenderPlugin)
        .run();
}
