use aeon_core::{CompositionTransform, CursorDrive};
use aeon_physics::ScaleFactorModel;
use serde::{Deserialize, Serialize};

use crate::mapper::CoordinateMapper;

/// Current time-progress of a cursor (Gyr). Written by the step that drives
/// the cursor, read by the tracker on every redraw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeCursorState {
    progress: f64,
}

impl TimeCursorState {
    /// Progress is never negative; NaN reads as the Big Bang
    pub fn new(progress: f64) -> Self {
        Self {
            progress: progress.max(0.0),
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Set progress from the fraction of the driving step that has elapsed
    pub fn drive(&mut self, drive: &CursorDrive, fraction: f64) {
        self.progress = drive.progress_at(fraction);
    }
}

/// Marker whose position is recomputed from the cursor state on every read.
/// Nothing is cached between reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeCursorTracker {
    model: ScaleFactorModel,
    mapper: CoordinateMapper,
}

impl TimeCursorTracker {
    pub fn new(model: ScaleFactorModel, mapper: CoordinateMapper) -> Self {
        Self { model, mapper }
    }

    /// Age at which a cursor sweep must stop
    pub fn t_now(&self) -> f64 {
        self.model.t_now()
    }

    /// Position on the curve in the axes' construction layout
    pub fn position(&self, state: &TimeCursorState) -> [f64; 2] {
        self.mapper.map_scale_factor(&self.model, state.progress())
    }

    /// Position once the axes have been moved by `composition`
    pub fn position_in(
        &self,
        state: &TimeCursorState,
        composition: &CompositionTransform,
    ) -> [f64; 2] {
        composition.apply(self.position(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::{AxisSpec, ElementId, GroupTransform, T_NOW};

    fn tracker() -> TimeCursorTracker {
        TimeCursorTracker::new(
            ScaleFactorModel::new(),
            CoordinateMapper::new(AxisSpec::default()).unwrap(),
        )
    }

    #[test]
    fn test_position_follows_progress() {
        let tracker = tracker();
        let mut state = TimeCursorState::default();
        let start = tracker.position(&state);
        state = TimeCursorState::new(6.9);
        let mid = tracker.position(&state);
        state = TimeCursorState::new(T_NOW);
        let end = tracker.position(&state);
        assert!(start[0] < mid[0] && mid[0] < end[0]);
        assert!(start[1] < mid[1] && mid[1] < end[1]);
        let mapper = CoordinateMapper::new(AxisSpec::default()).unwrap();
        let today = mapper.map(T_NOW, 1.0);
        assert!((end[0] - today[0]).abs() < 1e-9 && (end[1] - today[1]).abs() < 1e-9);
    }

    #[test]
    fn test_drive_is_linear_and_terminal() {
        let drive = CursorDrive {
            cursor: ElementId(3),
            start: 0.0,
            end: T_NOW,
        };
        let mut state = TimeCursorState::default();
        state.drive(&drive, 0.25);
        assert!((state.progress() - T_NOW / 4.0).abs() < 1e-12);
        state.drive(&drive, 1.0);
        assert_eq!(state.progress(), drive.end);
        state.drive(&drive, 1.5);
        assert_eq!(state.progress(), T_NOW);
    }

    #[test]
    fn test_state_never_before_big_bang() {
        assert_eq!(TimeCursorState::new(-5.0).progress(), 0.0);
        assert_eq!(TimeCursorState::new(f64::NAN).progress(), 0.0);
        assert_eq!(tracker().t_now(), T_NOW);
    }

    #[test]
    fn test_position_in_follows_composition() {
        let tracker = tracker();
        let state = TimeCursorState::new(4.5);
        let op = GroupTransform {
            scale: 1.5,
            pivot: [0.0, 0.0],
            shift: [1.0, -1.0],
        };
        let moved = tracker.position_in(&state, &CompositionTransform::IDENTITY.then(&op));
        let expected = op.apply(tracker.position(&state));
        assert!((moved[0] - expected[0]).abs() < 1e-12);
        assert!((moved[1] - expected[1]).abs() < 1e-12);
    }
}
