//! Declarative animation steps: what the choreographer emits and the
//! rendering collaborator executes.

use serde::{Deserialize, Serialize};

use crate::types::ElementId;

/// Pacing function mapping linear step progress to eased progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Sigmoid ease-in-out; default pacing for every non-tracking step
    #[default]
    Smooth,
}

impl Easing {
    /// Eased progress for `alpha` in [0, 1]; exact at both ends
    pub fn apply(&self, alpha: f64) -> f64 {
        let alpha = alpha.clamp(0.0, 1.0);
        match self {
            Self::Linear => alpha,
            Self::Smooth => {
                const INFLECTION: f64 = 10.0;
                let sigmoid = |x: f64| 1.0 / (1.0 + (-x).exp());
                let lo = sigmoid(-INFLECTION / 2.0);
                let hi = sigmoid(INFLECTION / 2.0);
                let y = (sigmoid(INFLECTION * (alpha - 0.5)) - lo) / (hi - lo);
                y.clamp(0.0, 1.0)
            }
        }
    }
}

/// Progress of member `index` of a lagged reveal over `count` members.
///
/// Members start `lag_ratio` of a member's duration apart and the whole
/// reveal spans exactly the step.
pub fn lagged_fraction(alpha: f64, index: usize, count: usize, lag_ratio: f64) -> f64 {
    if count <= 1 {
        return alpha.clamp(0.0, 1.0);
    }
    let member = 1.0 / (1.0 + lag_ratio * (count - 1) as f64);
    let start = index as f64 * lag_ratio * member;
    ((alpha - start) / member).clamp(0.0, 1.0)
}

/// A uniform scale about `pivot` followed by a translation by `shift`.
///
/// One instance is applied to every member of a group in the same step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupTransform {
    pub scale: f64,
    pub pivot: [f64; 2],
    pub shift: [f64; 2],
}

impl GroupTransform {
    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        [
            self.scale * (p[0] - self.pivot[0]) + self.pivot[0] + self.shift[0],
            self.scale * (p[1] - self.pivot[1]) + self.pivot[1] + self.shift[1],
        ]
    }
}

/// Aggregate scale + translation currently applied to a visual group,
/// relative to the group's construction layout: `p' = scale * p + translation`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionTransform {
    pub scale: f64,
    pub translation: [f64; 2],
}

impl CompositionTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: [0.0, 0.0],
    };

    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        [
            self.scale * p[0] + self.translation[0],
            self.scale * p[1] + self.translation[1],
        ]
    }

    /// Composition after additionally applying `op`
    pub fn then(&self, op: &GroupTransform) -> Self {
        let moved = op.apply(self.translation);
        Self {
            scale: self.scale * op.scale,
            translation: moved,
        }
    }

    /// Linear blend between two compositions. Blending the parameters gives
    /// the same point as blending the transformed points.
    pub fn lerp(&self, other: &Self, f: f64) -> Self {
        Self {
            scale: self.scale + (other.scale - self.scale) * f,
            translation: [
                self.translation[0] + (other.translation[0] - self.translation[0]) * f,
                self.translation[1] + (other.translation[1] - self.translation[1]) * f,
            ],
        }
    }
}

impl Default for CompositionTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Drives a time cursor from `start` to `end` (Gyr) over one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorDrive {
    pub cursor: ElementId,
    pub start: f64,
    pub end: f64,
}

impl CursorDrive {
    /// Progress value after `fraction` of the step; never passes `end`
    pub fn progress_at(&self, fraction: f64) -> f64 {
        let f = fraction.clamp(0.0, 1.0);
        if f >= 1.0 {
            return self.end;
        }
        self.start + (self.end - self.start) * f
    }
}

/// Per-element destination of an arrangement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: ElementId,
    pub to: [f64; 2],
}

/// What an animation does to its targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Stroke the outline progressively
    Create,
    FadeIn,
    FadeOut,
    /// Write text glyph by glyph
    Write,
    GrowFromCenter,
    /// Fade targets in one after another, overlapping by `lag_ratio`
    LaggedFadeIn { lag_ratio: f64 },
    /// Uniform zoom/reposition of a whole group
    Transform(GroupTransform),
    /// Move each target to its own destination, scaling it by `scale`
    Arrange { placements: Vec<Placement>, scale: f64 },
    /// Make targets visible instantly
    Add,
    /// Advance a time cursor
    Track(CursorDrive),
}

impl AnimationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::FadeIn => "fade-in",
            Self::FadeOut => "fade-out",
            Self::Write => "write",
            Self::GrowFromCenter => "grow",
            Self::LaggedFadeIn { .. } => "lagged-fade-in",
            Self::Transform(_) => "transform",
            Self::Arrange { .. } => "arrange",
            Self::Add => "add",
            Self::Track(_) => "track",
        }
    }

    /// Whether this animation brings hidden targets on screen
    pub fn reveals(&self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::FadeIn
                | Self::Write
                | Self::GrowFromCenter
                | Self::LaggedFadeIn { .. }
                | Self::Add
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub kind: AnimationKind,
    pub targets: Vec<ElementId>,
}

impl Animation {
    pub fn new(kind: AnimationKind, targets: impl Into<Vec<ElementId>>) -> Self {
        Self {
            kind,
            targets: targets.into(),
        }
    }
}

/// One declarative unit of animated change. All animations of a step run
/// together over `duration`; an empty step is a wait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub animations: Vec<Animation>,
    pub duration: f64,
    pub easing: Easing,
}

impl Step {
    pub fn wait(duration: f64) -> Self {
        Self {
            animations: Vec::new(),
            duration,
            easing: Easing::Linear,
        }
    }

    pub fn is_wait(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.animations.iter().flat_map(|a| a.targets.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_easing_endpoints_exact() {
        assert_eq!(Easing::Smooth.apply(0.0), 0.0);
        assert_eq!(Easing::Smooth.apply(1.0), 1.0);
        assert!((Easing::Smooth.apply(0.5) - 0.5).abs() < 1e-12);
        assert!(Easing::Smooth.apply(0.25) < 0.25);
    }

    #[test]
    fn test_lagged_fraction_spans_step() {
        let n = 40;
        assert_eq!(lagged_fraction(0.0, 0, n, 0.02), 0.0);
        assert_eq!(lagged_fraction(1.0, n - 1, n, 0.02), 1.0);
        // Later members never lead earlier ones
        for i in 1..n {
            assert!(lagged_fraction(0.5, i, n, 0.02) <= lagged_fraction(0.5, i - 1, n, 0.02));
        }
    }

    #[test]
    fn test_composition_follows_group_transform() {
        let op = GroupTransform {
            scale: 1.5,
            pivot: [1.0, 2.0],
            shift: [-3.0, 0.5],
        };
        let comp = CompositionTransform::IDENTITY.then(&op);
        let p = [4.0, -1.0];
        let direct = op.apply(p);
        let composed = comp.apply(p);
        assert!((direct[0] - composed[0]).abs() < 1e-12);
        assert!((direct[1] - composed[1]).abs() < 1e-12);

        let op2 = GroupTransform {
            scale: 0.5,
            pivot: [0.0, 0.0],
            shift: [2.0, 2.0],
        };
        let twice = comp.then(&op2);
        let expected = op2.apply(op.apply(p));
        let got = twice.apply(p);
        assert!((expected[0] - got[0]).abs() < 1e-12);
        assert!((expected[1] - got[1]).abs() < 1e-12);
    }

    #[test]
    fn test_cursor_drive_clamps_at_end() {
        let drive = CursorDrive {
            cursor: ElementId(0),
            start: 0.0,
            end: 13.8,
        };
        assert_eq!(drive.progress_at(0.0), 0.0);
        assert_eq!(drive.progress_at(1.0), 13.8);
        assert_eq!(drive.progress_at(1.7), 13.8);
        assert!((drive.progress_at(0.5) - 6.9).abs() < 1e-12);
    }
}
