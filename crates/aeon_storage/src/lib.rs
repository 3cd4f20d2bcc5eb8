use aeon_core::{AeonError, ElementSpec, Result, Step};
use aeon_scene::{Choreography, RenderSink};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A step together with its start time in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedStep {
    pub start: f64,
    pub step: Step,
}

/// Complete recorded scene for save/load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneScript {
    pub scene: String,
    pub elements: Vec<ElementSpec>,
    pub steps: Vec<RecordedStep>,
    pub total_duration: f64,
}

impl SceneScript {
    /// Record a choreography by performing it into a [`ScriptRecorder`]
    pub fn record(choreography: &Choreography) -> Self {
        let mut recorder = ScriptRecorder::default();
        choreography.perform(&mut recorder);
        recorder.finish()
    }
}

/// Render sink that keeps everything it is asked to draw
#[derive(Debug, Default)]
pub struct ScriptRecorder {
    script: SceneScript,
}

impl ScriptRecorder {
    pub fn finish(self) -> SceneScript {
        self.script
    }
}

impl RenderSink for ScriptRecorder {
    fn begin_scene(&mut self, name: &str) {
        self.script = SceneScript {
            scene: name.to_string(),
            ..SceneScript::default()
        };
    }

    fn construct(&mut self, element: &ElementSpec) {
        self.script.elements.push(element.clone());
    }

    fn play(&mut self, _index: usize, start: f64, step: &Step) {
        self.script.steps.push(RecordedStep {
            start,
            step: step.clone(),
        });
    }

    fn end_scene(&mut self, total_duration: f64) {
        self.script.total_duration = total_duration;
    }
}

/// Save a script to disk as bincode
pub fn save_script(script: &SceneScript, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = bincode::serialize(script)
        .map_err(|e| AeonError::Serialization(format!("Serialize error: {e}")))?;
    fs::write(path, data)?;
    Ok(())
}

/// Load a script from disk
pub fn load_script(path: &Path) -> Result<SceneScript> {
    let data = fs::read(path)?;
    let script = bincode::deserialize(&data)
        .map_err(|e| AeonError::Serialization(format!("Deserialize error: {e}")))?;
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::SceneConfig;
    use aeon_scene::SceneKind;

    #[test]
    fn test_recorder_keeps_order_and_timing() {
        let choreography = SceneKind::BigBang.build(&SceneConfig::default()).unwrap();
        let script = SceneScript::record(&choreography);
        assert_eq!(script.scene, "big-bang");
        assert_eq!(script.elements, choreography.elements);
        assert_eq!(script.steps.len(), choreography.steps.len());
        let starts: Vec<f64> = script.steps.iter().map(|s| s.start).collect();
        assert_eq!(starts, choreography.step_starts());
        assert_eq!(script.total_duration, choreography.total_duration());
    }

    #[test]
    fn test_save_load_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/scripts/scale-factor-timeline.bin");
        let choreography = SceneKind::ScaleFactorTimeline
            .build(&SceneConfig::default())
            .unwrap();
        let script = SceneScript::record(&choreography);

        save_script(&script, &path).unwrap();
        let loaded = load_script(&path).unwrap();
        assert_eq!(loaded, script);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_script(&dir.path().join("missing.bin")).unwrap_err();
        assert!(matches!(missing, AeonError::Io(_)));

        let garbage = dir.path().join("garbage.bin");
        fs::write(&garbage, [0xff, 0xff, 0xff]).unwrap();
        let err = load_script(&garbage).unwrap_err();
        assert!(matches!(err, AeonError::Serialization(_)));
    }
}
