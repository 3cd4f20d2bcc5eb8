//! Scene choreography: declares elements and records the ordered list of
//! animation steps played on them. Nothing here draws; the finished
//! [`Choreography`] is handed to a [`RenderSink`] or a [`Player`].
//!
//! [`Player`]: crate::player::Player

use std::collections::HashSet;

use aeon_core::{
    AeonError, Animation, AnimationKind, CompositionTransform, CursorDrive, Easing, ElementId,
    ElementSpec, GroupTransform, Placement, Result, Shape, Step, Style,
};
use tracing::debug;

use crate::cursor::TimeCursorTracker;
use crate::layout::{self, Bounds, Target};
use crate::sink::RenderSink;

/// Handle to a fixed set of elements transformed together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

/// A cursor element and the tracker that positions it. When `follows` is
/// set, the cursor moves with that element's transforms (the axes it is
/// plotted on).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorBinding {
    pub cursor: ElementId,
    pub tracker: TimeCursorTracker,
    pub follows: Option<ElementId>,
}

#[derive(Debug, Clone)]
struct Group {
    members: Vec<ElementId>,
    composition: CompositionTransform,
}

/// Current layout of one element while the script is being built
#[derive(Debug, Clone, Copy)]
struct Layout {
    visible: bool,
    position: [f64; 2],
    scale: f64,
}

/// Finished, immutable script of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct Choreography {
    pub name: String,
    pub elements: Vec<ElementSpec>,
    pub steps: Vec<Step>,
    pub cursors: Vec<CursorBinding>,
}

impl Choreography {
    pub fn element(&self, id: ElementId) -> Option<&ElementSpec> {
        self.elements.get(id.0 as usize)
    }

    /// Start time of every step
    pub fn step_starts(&self) -> Vec<f64> {
        self.steps
            .iter()
            .scan(0.0, |clock, step| {
                let start = *clock;
                *clock += step.duration;
                Some(start)
            })
            .collect()
    }

    pub fn total_duration(&self) -> f64 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Index of the first step that brings `id` on screen
    pub fn reveal_step(&self, id: ElementId) -> Option<usize> {
        self.steps.iter().position(|step| {
            step.animations
                .iter()
                .any(|a| a.kind.reveals() && a.targets.contains(&id))
        })
    }

    /// First element whose shape is text with exactly this content
    pub fn find_text(&self, content: &str) -> Option<ElementId> {
        self.elements.iter().find_map(|e| match &e.shape {
            Shape::Text { content: c, .. } if c == content => Some(e.id),
            _ => None,
        })
    }

    /// Hand the whole script to a rendering collaborator: every construction
    /// request first, then every step in order.
    pub fn perform(&self, sink: &mut impl RenderSink) {
        sink.begin_scene(&self.name);
        for element in &self.elements {
            sink.construct(element);
        }
        for (index, (step, start)) in self.steps.iter().zip(self.step_starts()).enumerate() {
            sink.play(index, start, step);
        }
        sink.end_scene(self.total_duration());
    }
}

/// Builds a [`Choreography`], checking every step against the current
/// visibility of its targets.
#[derive(Debug)]
pub struct Choreographer {
    name: String,
    elements: Vec<ElementSpec>,
    layouts: Vec<Layout>,
    groups: Vec<Group>,
    steps: Vec<Step>,
    cursors: Vec<CursorBinding>,
}

impl Choreographer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
            layouts: Vec::new(),
            groups: Vec::new(),
            steps: Vec::new(),
            cursors: Vec::new(),
        }
    }

    /// Declare an element. It stays hidden until a step reveals it.
    pub fn add(&mut self, shape: Shape, position: [f64; 2], style: Style) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(ElementSpec {
            id,
            shape,
            position,
            style,
        });
        self.layouts.push(Layout {
            visible: false,
            position,
            scale: 1.0,
        });
        id
    }

    /// Current bounds of a declared element
    pub fn bounds(&self, id: ElementId) -> Result<Bounds> {
        let spec = self.spec(id)?;
        let layout = self.layouts[id.0 as usize];
        Ok(Bounds::of_shape(&spec.shape, layout.position, layout.scale))
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.layouts
            .get(id.0 as usize)
            .is_some_and(|layout| layout.visible)
    }

    /// Fix a group's membership. Later transforms apply to exactly these members.
    pub fn group(&mut self, members: impl IntoIterator<Item = ElementId>) -> Result<GroupId> {
        let members: Vec<ElementId> = members.into_iter().collect();
        if members.is_empty() {
            return Err(AeonError::choreography("a group needs at least one member"));
        }
        for &id in &members {
            self.spec(id)?;
        }
        self.groups.push(Group {
            members,
            composition: CompositionTransform::IDENTITY,
        });
        Ok(GroupId(self.groups.len() - 1))
    }

    pub fn members(&self, group: GroupId) -> Result<&[ElementId]> {
        Ok(&self.group_ref(group)?.members)
    }

    /// Aggregate transform applied to a group so far
    pub fn composition(&self, group: GroupId) -> Result<CompositionTransform> {
        Ok(self.group_ref(group)?.composition)
    }

    /// Current bounds of a whole group
    pub fn group_bounds(&self, group: GroupId) -> Result<Bounds> {
        let group = self.group_ref(group)?;
        let mut bounds = self.bounds(group.members[0])?;
        for &id in &group.members[1..] {
            bounds = bounds.union(&self.bounds(id)?);
        }
        Ok(bounds)
    }

    /// Play animations together with the default smooth pacing
    pub fn play(&mut self, animations: Vec<Animation>, duration: f64) -> Result<()> {
        self.play_with(animations, duration, Easing::Smooth)
    }

    pub fn play_with(
        &mut self,
        animations: Vec<Animation>,
        duration: f64,
        easing: Easing,
    ) -> Result<()> {
        check_duration(duration)?;
        if animations.is_empty() {
            return Err(AeonError::choreography("use wait() for a step without animations"));
        }

        // Validate against a scratch copy so a rejected step leaves no trace
        let mut layouts = self.layouts.clone();
        let mut groups = self.groups.clone();
        for animation in &animations {
            self.apply(animation, &mut layouts, &mut groups)?;
        }
        self.layouts = layouts;
        self.groups = groups;

        let step = Step {
            animations,
            duration,
            easing,
        };
        debug!(
            scene = %self.name,
            index = self.steps.len(),
            kinds = ?step.animations.iter().map(|a| a.kind.name()).collect::<Vec<_>>(),
            duration,
            "step recorded"
        );
        self.steps.push(step);
        Ok(())
    }

    pub fn wait(&mut self, duration: f64) -> Result<()> {
        check_duration(duration)?;
        self.steps.push(Step::wait(duration));
        Ok(())
    }

    /// Zoom/reposition every member of `group` with one uniform transform:
    /// scale by `scale` about the group's centre, then move the group to `target`.
    pub fn transform_group(
        &mut self,
        group: GroupId,
        scale: f64,
        target: Target,
        duration: f64,
    ) -> Result<GroupTransform> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(AeonError::choreography(format!(
                "zoom factor must be positive, got {scale}"
            )));
        }
        let bounds = self.group_bounds(group)?;
        let scaled = bounds.scaled(scale);
        let destination = layout::resolve(&scaled, target);
        let op = GroupTransform {
            scale,
            pivot: bounds.center,
            shift: [
                destination[0] - bounds.center[0],
                destination[1] - bounds.center[1],
            ],
        };
        let members = self.members(group)?.to_vec();
        self.play(
            vec![Animation::new(AnimationKind::Transform(op), members)],
            duration,
        )?;
        Ok(op)
    }

    /// Lay the members of `group` out on a `rows x cols` grid around the
    /// group's centre, cells separated by `buff`, then scale the grid by `scale`.
    pub fn arrange_grid(
        &mut self,
        group: GroupId,
        rows: usize,
        cols: usize,
        buff: f64,
        scale: f64,
        duration: f64,
    ) -> Result<()> {
        let members = self.members(group)?.to_vec();
        if rows * cols < members.len() {
            return Err(AeonError::choreography(format!(
                "{} members do not fit a {rows}x{cols} grid",
                members.len()
            )));
        }
        let center = self.group_bounds(group)?.center;
        let mut cell = [0.0f64, 0.0f64];
        for &id in &members {
            let b = self.bounds(id)?;
            cell = [cell[0].max(2.0 * b.half[0]), cell[1].max(2.0 * b.half[1])];
        }
        let pitch = [cell[0] + buff, cell[1] + buff];
        let placements = members
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let (row, col) = (i / cols, i % cols);
                let x = (col as f64 - (cols - 1) as f64 / 2.0) * pitch[0];
                let y = ((rows - 1) as f64 / 2.0 - row as f64) * pitch[1];
                Placement {
                    id,
                    to: [center[0] + scale * x, center[1] + scale * y],
                }
            })
            .collect();
        self.play(
            vec![Animation::new(
                AnimationKind::Arrange { placements, scale },
                members,
            )],
            duration,
        )
    }

    /// Sweep a visible cursor forward from `start` to `end` with linear
    /// pacing. The sweep stays within `[0, t_now]` of the tracker's model.
    pub fn track(
        &mut self,
        cursor: ElementId,
        tracker: TimeCursorTracker,
        follows: Option<ElementId>,
        start: f64,
        end: f64,
        duration: f64,
    ) -> Result<()> {
        if let Some(axes) = follows {
            self.spec(axes)?;
        }
        let t_now = tracker.t_now();
        if !(0.0 <= start && start <= end && end <= t_now) {
            return Err(AeonError::choreography(format!(
                "cursor sweep {start} -> {end} must run forward within [0, {t_now}]"
            )));
        }
        if let Some(bound) = self.cursors.iter().find(|b| b.cursor == cursor) {
            if bound.tracker != tracker || bound.follows != follows {
                return Err(AeonError::choreography(format!(
                    "cursor {} is already bound to another tracker",
                    cursor.0
                )));
            }
        }
        let drive = CursorDrive { cursor, start, end };
        self.play_with(
            vec![Animation::new(AnimationKind::Track(drive), [cursor])],
            duration,
            Easing::Linear,
        )?;
        if !self.cursors.iter().any(|b| b.cursor == cursor) {
            self.cursors.push(CursorBinding {
                cursor,
                tracker,
                follows,
            });
        }
        Ok(())
    }

    pub fn finish(self) -> Choreography {
        Choreography {
            name: self.name,
            elements: self.elements,
            steps: self.steps,
            cursors: self.cursors,
        }
    }

    fn spec(&self, id: ElementId) -> Result<&ElementSpec> {
        self.elements
            .get(id.0 as usize)
            .ok_or_else(|| AeonError::choreography(format!("unknown element {}", id.0)))
    }

    fn group_ref(&self, group: GroupId) -> Result<&Group> {
        self.groups
            .get(group.0)
            .ok_or_else(|| AeonError::choreography(format!("unknown group {}", group.0)))
    }

    fn apply(
        &self,
        animation: &Animation,
        layouts: &mut [Layout],
        groups: &mut [Group],
    ) -> Result<()> {
        if animation.targets.is_empty() {
            return Err(AeonError::choreography(format!(
                "{} has no targets",
                animation.kind.name()
            )));
        }
        for &id in &animation.targets {
            self.spec(id)?;
        }
        let kind = animation.kind.name();
        let require_visible = |layouts: &[Layout], id: ElementId| -> Result<()> {
            if layouts[id.0 as usize].visible {
                Ok(())
            } else {
                Err(AeonError::choreography(format!(
                    "{kind} targets element {} before it is on screen",
                    id.0
                )))
            }
        };

        match &animation.kind {
            AnimationKind::Create
            | AnimationKind::FadeIn
            | AnimationKind::Write
            | AnimationKind::GrowFromCenter
            | AnimationKind::LaggedFadeIn { .. }
            | AnimationKind::Add => {
                for &id in &animation.targets {
                    let layout = &mut layouts[id.0 as usize];
                    if layout.visible {
                        return Err(AeonError::choreography(format!(
                            "{kind} reveals element {} twice",
                            id.0
                        )));
                    }
                    layout.visible = true;
                }
            }
            AnimationKind::FadeOut => {
                for &id in &animation.targets {
                    require_visible(layouts, id)?;
                    layouts[id.0 as usize].visible = false;
                }
            }
            AnimationKind::Transform(op) => {
                let mut targets = animation.targets.clone();
                targets.sort();
                let group = groups
                    .iter_mut()
                    .find(|g| {
                        let mut members = g.members.clone();
                        members.sort();
                        members == targets
                    })
                    .ok_or_else(|| {
                        AeonError::choreography(
                            "a transform must cover exactly the members of one group",
                        )
                    })?;
                for &id in &group.members {
                    require_visible(layouts, id)?;
                    let layout = &mut layouts[id.0 as usize];
                    layout.position = op.apply(layout.position);
                    layout.scale *= op.scale;
                }
                group.composition = group.composition.then(op);
            }
            AnimationKind::Arrange { placements, scale } => {
                let placed: HashSet<ElementId> = placements.iter().map(|p| p.id).collect();
                let targets: HashSet<ElementId> = animation.targets.iter().copied().collect();
                if placed != targets {
                    return Err(AeonError::choreography(
                        "every arranged target needs exactly one placement",
                    ));
                }
                for placement in placements {
                    require_visible(layouts, placement.id)?;
                    let layout = &mut layouts[placement.id.0 as usize];
                    layout.position = placement.to;
                    layout.scale *= scale;
                }
            }
            AnimationKind::Track(drive) => {
                if animation.targets != [drive.cursor] {
                    return Err(AeonError::choreography("a track step targets its cursor only"));
                }
                if !(drive.start.is_finite() && drive.end.is_finite()) {
                    return Err(AeonError::choreography("cursor range must be finite"));
                }
                if drive.start < 0.0 || drive.start > drive.end {
                    return Err(AeonError::choreography(
                        "cursor range must run forward from the Big Bang or later",
                    ));
                }
                require_visible(layouts, drive.cursor)?;
            }
        }
        Ok(())
    }
}

fn check_duration(duration: f64) -> Result<()> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(AeonError::choreography(format!(
            "step duration must be finite and non-negative, got {duration}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::{AxisSpec, Color};
    use aeon_physics::ScaleFactorModel;

    use crate::layout::Direction;
    use crate::mapper::CoordinateMapper;

    fn dot(c: &mut Choreographer, x: f64) -> ElementId {
        c.add(Shape::Dot { radius: 0.1 }, [x, 0.0], Style::new(Color::Yellow))
    }

    #[test]
    fn test_steps_and_starts() {
        let mut c = Choreographer::new("test");
        let a = dot(&mut c, 0.0);
        c.play(vec![Animation::new(AnimationKind::FadeIn, [a])], 1.0).unwrap();
        c.wait(0.5).unwrap();
        c.play(vec![Animation::new(AnimationKind::FadeOut, [a])], 2.0).unwrap();
        let script = c.finish();
        assert_eq!(script.step_starts(), vec![0.0, 1.0, 1.5]);
        assert_eq!(script.total_duration(), 3.5);
        assert_eq!(script.reveal_step(a), Some(0));
        assert!(script.steps[1].is_wait());
    }

    #[test]
    fn test_rejects_unknown_and_hidden_targets() {
        let mut c = Choreographer::new("test");
        let a = dot(&mut c, 0.0);
        let err = c
            .play(vec![Animation::new(AnimationKind::FadeOut, [a])], 1.0)
            .unwrap_err();
        assert!(matches!(err, AeonError::Choreography(_)));
        assert!(
            c.play(vec![Animation::new(AnimationKind::FadeIn, [ElementId(9)])], 1.0)
                .is_err()
        );
        // Failed steps leave nothing behind
        assert!(!c.is_visible(a));
        assert!(c.finish().steps.is_empty());
    }

    #[test]
    fn test_rejects_double_reveal_and_bad_duration() {
        let mut c = Choreographer::new("test");
        let a = dot(&mut c, 0.0);
        assert!(
            c.play(
                vec![
                    Animation::new(AnimationKind::FadeIn, [a]),
                    Animation::new(AnimationKind::Write, [a]),
                ],
                1.0,
            )
            .is_err()
        );
        assert!(c.play(vec![Animation::new(AnimationKind::FadeIn, [a])], -1.0).is_err());
        assert!(c.wait(f64::NAN).is_err());
    }

    #[test]
    fn test_transform_requires_whole_visible_group() {
        let mut c = Choreographer::new("test");
        let a = dot(&mut c, -1.0);
        let b = dot(&mut c, 1.0);
        let group = c.group([a, b]).unwrap();
        c.play(vec![Animation::new(AnimationKind::FadeIn, [a])], 1.0).unwrap();
        // b is not on screen yet
        assert!(c.transform_group(group, 2.0, Target::Keep, 1.0).is_err());

        c.play(vec![Animation::new(AnimationKind::FadeIn, [b])], 1.0).unwrap();
        let op = GroupTransform {
            scale: 2.0,
            pivot: [0.0, 0.0],
            shift: [0.0, 0.0],
        };
        // Partial application is refused
        assert!(
            c.play(vec![Animation::new(AnimationKind::Transform(op), [a])], 1.0)
                .is_err()
        );
        c.transform_group(group, 2.0, Target::Keep, 1.0).unwrap();
        assert_eq!(c.bounds(a).unwrap().center, [-2.0, 0.0]);
        assert_eq!(c.bounds(b).unwrap().center, [2.0, 0.0]);
        assert_eq!(c.composition(group).unwrap().scale, 2.0);
    }

    #[test]
    fn test_transform_to_edge_preserves_relative_layout() {
        let mut c = Choreographer::new("test");
        let a = dot(&mut c, -1.0);
        let b = dot(&mut c, 2.0);
        c.play(vec![Animation::new(AnimationKind::FadeIn, [a, b])], 1.0).unwrap();
        let group = c.group([a, b]).unwrap();
        let before = [c.bounds(a).unwrap().center, c.bounds(b).unwrap().center];
        let op = c
            .transform_group(group, 0.5, Target::Edge(Direction::Left), 2.0)
            .unwrap();
        let after = [c.bounds(a).unwrap().center, c.bounds(b).unwrap().center];
        let gap_before = before[1][0] - before[0][0];
        let gap_after = after[1][0] - after[0][0];
        assert!((gap_after - 0.5 * gap_before).abs() < 1e-12);
        let left = c.group_bounds(group).unwrap().left();
        assert!((left - (-aeon_core::FRAME_WIDTH / 2.0 + aeon_core::EDGE_BUFF)).abs() < 1e-9);
        assert_eq!(op.scale, 0.5);
    }

    #[test]
    fn test_arrange_grid_places_every_member() {
        let mut c = Choreographer::new("test");
        let ids: Vec<_> = (0..6).map(|i| dot(&mut c, i as f64)).collect();
        c.play(
            vec![Animation::new(AnimationKind::LaggedFadeIn { lag_ratio: 0.1 }, ids.clone())],
            1.0,
        )
        .unwrap();
        let group = c.group(ids.clone()).unwrap();
        assert!(c.arrange_grid(group, 1, 5, 1.0, 1.0, 1.0).is_err());
        c.arrange_grid(group, 2, 3, 1.0, 1.5, 1.0).unwrap();
        let first = c.bounds(ids[0]).unwrap();
        let second = c.bounds(ids[1]).unwrap();
        // pitch = cell 0.2 + buff 1.0, scaled by 1.5
        assert!((second.center[0] - first.center[0] - 1.8).abs() < 1e-12);
        assert!((first.half[0] - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_track_needs_visible_cursor_and_runs_linear() {
        let mapper = CoordinateMapper::new(AxisSpec::default()).unwrap();
        let tracker = TimeCursorTracker::new(ScaleFactorModel::new(), mapper);
        let mut c = Choreographer::new("test");
        let cursor = dot(&mut c, 0.0);
        assert!(c.track(cursor, tracker, None, 0.0, 13.8, 8.0).is_err());
        c.play(vec![Animation::new(AnimationKind::Add, [cursor])], 0.0).unwrap();
        c.track(cursor, tracker, None, 0.0, 13.8, 8.0).unwrap();
        let script = c.finish();
        let last = script.steps.last().unwrap();
        assert_eq!(last.easing, Easing::Linear);
        assert_eq!(last.duration, 8.0);
        assert_eq!(script.cursors.len(), 1);
    }

    #[test]
    fn test_track_rejects_sweeps_outside_big_bang_to_today() {
        let mapper = CoordinateMapper::new(AxisSpec::default()).unwrap();
        let tracker = TimeCursorTracker::new(ScaleFactorModel::new(), mapper);
        let mut c = Choreographer::new("test");
        let cursor = dot(&mut c, 0.0);
        c.play(vec![Animation::new(AnimationKind::Add, [cursor])], 0.0).unwrap();
        let steps = c.steps.len();
        let bad = [(0.0, 40.0), (13.8, -5.0), (-1.0, 5.0), (8.0, 2.0), (0.0, f64::NAN)];
        for (start, end) in bad {
            let err = c.track(cursor, tracker, None, start, end, 8.0).unwrap_err();
            assert!(matches!(err, AeonError::Choreography(_)), "{start} -> {end}");
        }
        assert_eq!(c.steps.len(), steps);
        assert!(c.cursors.is_empty());
        c.track(cursor, tracker, None, 2.0, 2.0, 1.0).unwrap();
        assert_eq!(c.finish().cursors.len(), 1);
    }

    #[test]
    fn test_track_keeps_one_tracker_per_cursor() {
        let mapper = CoordinateMapper::new(AxisSpec::default()).unwrap();
        let tracker = TimeCursorTracker::new(ScaleFactorModel::new(), mapper);
        let younger =
            TimeCursorTracker::new(ScaleFactorModel::with_present_age(10.0).unwrap(), mapper);
        let mut c = Choreographer::new("test");
        let cursor = dot(&mut c, 0.0);
        c.play(vec![Animation::new(AnimationKind::Add, [cursor])], 0.0).unwrap();
        c.track(cursor, tracker, None, 0.0, 6.0, 4.0).unwrap();
        assert!(c.track(cursor, younger, None, 6.0, 8.0, 4.0).is_err());
        c.track(cursor, tracker, None, 6.0, 13.8, 4.0).unwrap();
        let script = c.finish();
        assert_eq!(script.cursors.len(), 1);
        assert_eq!(script.cursors[0].tracker, tracker);
    }
}
