use aeon_core::{ElementSpec, Step};
use tracing::info;

/// Rendering collaborator that receives a finished script: construction
/// requests for every element, then the steps in playback order.
pub trait RenderSink {
    fn begin_scene(&mut self, _name: &str) {}

    fn construct(&mut self, element: &ElementSpec);

    /// Step `index` starting `start` seconds into the scene
    fn play(&mut self, index: usize, start: f64, step: &Step);

    fn end_scene(&mut self, _total_duration: f64) {}
}

/// Logs every request instead of drawing it
#[derive(Debug, Default)]
pub struct TraceSink {
    scene: String,
    constructed: usize,
    played: usize,
}

impl TraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constructed(&self) -> usize {
        self.constructed
    }

    pub fn played(&self) -> usize {
        self.played
    }
}

impl RenderSink for TraceSink {
    fn begin_scene(&mut self, name: &str) {
        self.scene = name.to_string();
        self.constructed = 0;
        self.played = 0;
        info!(scene = %name, "scene started");
    }

    fn construct(&mut self, element: &ElementSpec) {
        self.constructed += 1;
        info!(
            scene = %self.scene,
            id = element.id.0,
            kind = element.shape.kind_name(),
            x = element.position[0],
            y = element.position[1],
            "construct"
        );
    }

    fn play(&mut self, index: usize, start: f64, step: &Step) {
        self.played += 1;
        if step.is_wait() {
            info!(scene = %self.scene, index, start, duration = step.duration, "wait");
            return;
        }
        for animation in &step.animations {
            info!(
                scene = %self.scene,
                index,
                start,
                duration = step.duration,
                kind = animation.kind.name(),
                targets = animation.targets.len(),
                "play"
            );
        }
    }

    fn end_scene(&mut self, total_duration: f64) {
        info!(
            scene = %self.scene,
            elements = self.constructed,
            steps = self.played,
            total_duration,
            "scene finished"
        );
    }
}
