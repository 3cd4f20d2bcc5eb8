//! Headless recording of the scenes.
//! Builds each scene, logs every step and writes `scripts/<scene>.bin`.

use aeon_core::{Result, SceneConfig};
use aeon_scene::{SceneKind, TraceSink};
use aeon_storage::{SceneScript, save_script};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let names: Vec<String> = std::env::args().skip(1).collect();
    let kinds: Vec<SceneKind> = if names.is_empty() {
        SceneKind::ALL.to_vec()
    } else {
        match names.iter().map(|n| SceneKind::from_name(n)).collect() {
            Ok(kinds) => kinds,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        }
    };

    let config = SceneConfig::default();
    let out_dir = PathBuf::from("scripts");
    eprintln!("Recording {} scenes...", kinds.len());

    let mut rows = Vec::new();
    let mut failures = 0;
    for kind in kinds {
        match record(kind, &config, &out_dir) {
            Ok((script, path)) => rows.push((kind, script, path)),
            Err(e) => {
                eprintln!("  {kind}: {e}");
                failures += 1;
            }
        }
    }

    println!();
    println!("{:<24} {:>8} {:>6} {:>9}  file", "scene", "elements", "steps", "duration");
    for (kind, script, path) in &rows {
        println!(
            "{:<24} {:>8} {:>6} {:>8.1}s  {}",
            kind.name(),
            script.elements.len(),
            script.steps.len(),
            script.total_duration,
            path.display()
        );
    }

    if failures > 0 {
        eprintln!("{failures} scene(s) failed");
        std::process::exit(1);
    }
}

fn record(kind: SceneKind, config: &SceneConfig, out_dir: &Path) -> Result<(SceneScript, PathBuf)> {
    let choreography = kind.build(config)?;
    choreography.perform(&mut TraceSink::new());

    let script = SceneScript::record(&choreography);
    let path = out_dir.join(format!("{}.bin", kind.name()));
    save_script(&script, &path)?;
    info!(scene = %kind, path = %path.display(), "script saved");
    Ok((script, path))
}
