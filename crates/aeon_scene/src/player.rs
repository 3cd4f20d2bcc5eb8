//! Frame-by-frame evaluation of a [`Choreography`]. The player owns the
//! mutable visual state of every element; renderers only read it.

use std::collections::HashMap;

use aeon_core::{
    AnimationKind, CompositionTransform, ElementId, Step, lagged_fraction,
};

use crate::choreography::Choreography;
use crate::cursor::TimeCursorState;

/// What an element looks like at the current instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementVisual {
    pub shown: bool,
    /// Animation opacity, multiplied into the element's own style
    pub opacity: f32,
    /// Portion of the outline or text drawn so far
    pub reveal: f64,
    /// Grow-from-centre factor
    pub grow: f64,
    pub position: [f64; 2],
    /// Scale relative to the construction layout
    pub scale: f64,
}

impl ElementVisual {
    fn hidden_at(position: [f64; 2]) -> Self {
        Self {
            shown: false,
            opacity: 0.0,
            reveal: 0.0,
            grow: 1.0,
            position,
            scale: 1.0,
        }
    }

    fn show(&mut self) {
        self.shown = true;
        self.opacity = 1.0;
        self.reveal = 1.0;
        self.grow = 1.0;
    }
}

#[derive(Debug)]
pub struct Player {
    script: Choreography,
    visuals: Vec<ElementVisual>,
    cursors: Vec<TimeCursorState>,
    step: usize,
    elapsed: f64,
    clock: f64,
    started: bool,
    /// Position and scale of moving targets when the current step began
    snapshot: HashMap<ElementId, ([f64; 2], f64)>,
}

impl Player {
    pub fn new(script: Choreography) -> Self {
        let visuals = script
            .elements
            .iter()
            .map(|e| ElementVisual::hidden_at(e.position))
            .collect();
        let cursors = vec![TimeCursorState::default(); script.cursors.len()];
        let mut player = Self {
            script,
            visuals,
            cursors,
            step: 0,
            elapsed: 0.0,
            clock: 0.0,
            started: false,
            snapshot: HashMap::new(),
        };
        player.redraw_cursors();
        player
    }

    pub fn script(&self) -> &Choreography {
        &self.script
    }

    /// Seconds of the scene played so far
    pub fn time(&self) -> f64 {
        self.clock
    }

    /// Index of the step in progress, `None` once finished
    pub fn current_step(&self) -> Option<usize> {
        (self.step < self.script.steps.len()).then_some(self.step)
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.script.steps.len()
    }

    pub fn visual(&self, id: ElementId) -> Option<&ElementVisual> {
        self.visuals.get(id.0 as usize)
    }

    pub fn visuals(&self) -> &[ElementVisual] {
        &self.visuals
    }

    /// Current time-progress (Gyr) of a tracked cursor
    pub fn cursor_progress(&self, cursor: ElementId) -> Option<f64> {
        self.script
            .cursors
            .iter()
            .position(|b| b.cursor == cursor)
            .map(|i| self.cursors[i].progress())
    }

    /// Transform currently applied to `id` relative to its construction layout
    pub fn composition_of(&self, id: ElementId) -> Option<CompositionTransform> {
        let spec = self.script.element(id)?;
        let visual = self.visuals.get(id.0 as usize)?;
        Some(CompositionTransform {
            scale: visual.scale,
            translation: [
                visual.position[0] - visual.scale * spec.position[0],
                visual.position[1] - visual.scale * spec.position[1],
            ],
        })
    }

    /// Move the scene forward by `dt` seconds. Time left over when a step
    /// ends carries into the next one; zero-length steps complete at once.
    pub fn advance(&mut self, dt: f64) {
        let mut remaining = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        while self.step < self.script.steps.len() {
            if !self.started {
                self.begin_step();
            }
            let duration = self.script.steps[self.step].duration;
            let left = duration - self.elapsed;
            if remaining < left {
                self.elapsed += remaining;
                self.clock += remaining;
                self.apply_step(self.elapsed / duration);
                break;
            }
            remaining -= left;
            self.complete_step();
        }
        self.redraw_cursors();
    }

    /// Play the rest of the scene instantly. Every remaining step is applied
    /// in full, so the terminal state does not depend on accumulated clock error.
    pub fn finish(&mut self) {
        while self.step < self.script.steps.len() {
            if !self.started {
                self.begin_step();
            }
            self.complete_step();
        }
        self.clock = self.script.total_duration();
        self.redraw_cursors();
    }

    /// Apply the current step at its end and move to the next one
    fn complete_step(&mut self) {
        self.clock += self.script.steps[self.step].duration - self.elapsed;
        self.apply_step(1.0);
        self.step += 1;
        self.elapsed = 0.0;
        self.started = false;
    }

    fn begin_step(&mut self) {
        self.started = true;
        self.snapshot.clear();
        let step = &self.script.steps[self.step];
        for animation in &step.animations {
            if matches!(
                animation.kind,
                AnimationKind::Transform(_) | AnimationKind::Arrange { .. }
            ) {
                for &id in &animation.targets {
                    let v = &self.visuals[id.0 as usize];
                    self.snapshot.insert(id, (v.position, v.scale));
                }
            }
        }
    }

    fn apply_step(&mut self, alpha: f64) {
        let Step {
            animations, easing, ..
        } = &self.script.steps[self.step];
        let eased = easing.apply(alpha);
        for animation in animations {
            let targets = &animation.targets;
            match &animation.kind {
                AnimationKind::Create | AnimationKind::Write => {
                    for &id in targets {
                        let v = &mut self.visuals[id.0 as usize];
                        v.show();
                        v.reveal = eased;
                    }
                }
                AnimationKind::FadeIn => {
                    for &id in targets {
                        let v = &mut self.visuals[id.0 as usize];
                        v.show();
                        v.opacity = eased as f32;
                    }
                }
                AnimationKind::GrowFromCenter => {
                    for &id in targets {
                        let v = &mut self.visuals[id.0 as usize];
                        v.show();
                        v.grow = eased;
                    }
                }
                AnimationKind::LaggedFadeIn { lag_ratio } => {
                    let count = targets.len();
                    for (index, &id) in targets.iter().enumerate() {
                        let v = &mut self.visuals[id.0 as usize];
                        v.show();
                        v.opacity = lagged_fraction(eased, index, count, *lag_ratio) as f32;
                    }
                }
                AnimationKind::Add => {
                    for &id in targets {
                        self.visuals[id.0 as usize].show();
                    }
                }
                AnimationKind::FadeOut => {
                    for &id in targets {
                        let v = &mut self.visuals[id.0 as usize];
                        v.opacity = (1.0 - eased) as f32;
                        v.shown = eased < 1.0;
                    }
                }
                AnimationKind::Transform(op) => {
                    for &id in targets {
                        if let Some(&(from, scale)) = self.snapshot.get(&id) {
                            let to = op.apply(from);
                            let v = &mut self.visuals[id.0 as usize];
                            v.position = lerp(from, to, eased);
                            v.scale = scale + (scale * op.scale - scale) * eased;
                        }
                    }
                }
                AnimationKind::Arrange { placements, scale: k } => {
                    for placement in placements {
                        if let Some(&(from, scale)) = self.snapshot.get(&placement.id) {
                            let v = &mut self.visuals[placement.id.0 as usize];
                            v.position = lerp(from, placement.to, eased);
                            v.scale = scale + (scale * k - scale) * eased;
                        }
                    }
                }
                AnimationKind::Track(drive) => {
                    if let Some(i) = self
                        .script
                        .cursors
                        .iter()
                        .position(|b| b.cursor == drive.cursor)
                    {
                        self.cursors[i].drive(drive, eased);
                    }
                }
            }
        }
    }

    /// Recompute every cursor from its progress and the current layout of
    /// the element it follows. Nothing from the previous frame is reused.
    fn redraw_cursors(&mut self) {
        for (i, binding) in self.script.cursors.iter().enumerate() {
            let composition = binding
                .follows
                .and_then(|axes| self.composition_of(axes))
                .unwrap_or(CompositionTransform::IDENTITY);
            let position = binding.tracker.position_in(&self.cursors[i], &composition);
            if let Some(v) = self.visuals.get_mut(binding.cursor.0 as usize) {
                v.position = position;
            }
        }
    }
}

fn lerp(a: [f64; 2], b: [f64; 2], f: f64) -> [f64; 2] {
    [a[0] + (b[0] - a[0]) * f, a[1] + (b[1] - a[1]) * f]
}
