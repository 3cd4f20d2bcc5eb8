//! Expansion of the universe on a(t) axes: the curve, the milestones of
//! cosmic history placed on it, a cursor sweeping from the Big Bang to
//! today and two zooms on the whole plot.

use aeon_core::{
    Animation, AnimationKind, Color, DOT_RADIUS, ElementId, Result, SceneConfig, Shape, Style,
};
use aeon_physics::{ScaleFactorModel, cosmology};
use tracing::debug;

use super::{BEAT, SceneKind, play_one};
use crate::choreography::{Choreographer, Choreography};
use crate::cursor::{TimeCursorState, TimeCursorTracker};
use crate::layout::{self, Bounds, Direction, Target};
use crate::mapper::CoordinateMapper;
use crate::timeline::EventTimeline;

pub const TIME_LABEL: &str = "Temps (Gyr)";
pub const VALUE_LABEL: &str = "a(t)";
pub const INFLATION: &str = "Inflation";
pub const CONCLUSION: &str = "Expansion accélérée aujourd'hui";

/// Offset (Gyr) of the redshift and temperature scales outside the time range
const DERIVED_OFFSET: f64 = 0.8;
const DERIVED_TICKS: usize = 5;
const DERIVED_STEP: f64 = 0.2;
const SMALL_TEXT: f64 = 24.0;

pub fn build(config: &SceneConfig) -> Result<Choreography> {
    build_with(config, &EventTimeline::cosmic_history(), &ScaleFactorModel::new())
}

/// Build the scene for an arbitrary timeline and expansion model
pub fn build_with(
    config: &SceneConfig,
    timeline: &EventTimeline,
    model: &ScaleFactorModel,
) -> Result<Choreography> {
    let mapper = CoordinateMapper::new(config.axes)?;
    let spec = *mapper.spec();
    let mut c = Choreographer::new(SceneKind::ScaleFactorTimeline.name());

    // Axes and their labels
    let axes = c.add(mapper.axes_shape(), spec.center(), Style::new(Color::White));
    let time_label = place_text(
        &mut c,
        TIME_LABEL,
        SMALL_TEXT,
        Color::White,
        mapper.map(spec.time_range.max, spec.value_range.min),
        Direction::Down,
    );
    let value_label = place_text(
        &mut c,
        VALUE_LABEL,
        SMALL_TEXT,
        Color::White,
        mapper.map(spec.time_range.min, spec.value_range.max),
        Direction::Up,
    );
    c.play(
        vec![
            Animation::new(AnimationKind::Create, [axes]),
            Animation::new(AnimationKind::Write, [time_label, value_label]),
        ],
        BEAT,
    )?;

    let (curve, at) = mapper.curve(|t| model.a_of_t(t));
    let curve = c.add(curve, at, Style::new(Color::Blue));
    play_one(&mut c, AnimationKind::Create, [curve], config.curve_draw)?;

    let mut plot = vec![axes, time_label, value_label, curve];

    if config.derived_axes {
        let ticks: Vec<f64> = (1..=DERIVED_TICKS).map(|i| i as f64 * DERIVED_STEP).collect();

        let mut redshifts = Vec::with_capacity(ticks.len());
        for &a in &ticks {
            let z = cosmology::z_of_a(a)?;
            let at = mapper.map(spec.time_range.min - DERIVED_OFFSET, a);
            redshifts.push(c.add(
                Shape::text(format!("z={z:.0}"), SMALL_TEXT),
                at,
                Style::new(Color::White),
            ));
        }
        play_one(&mut c, AnimationKind::Write, redshifts.clone(), BEAT)?;

        let mut temperatures = Vec::with_capacity(ticks.len());
        for &a in &ticks {
            let temperature = cosmology::temperature_of_a(a)?;
            let at = mapper.map(spec.time_range.max + DERIVED_OFFSET, a);
            temperatures.push(c.add(
                Shape::text(format!("T={temperature:.0}K"), SMALL_TEXT),
                at,
                Style::new(Color::White),
            ));
        }
        play_one(&mut c, AnimationKind::Write, temperatures.clone(), BEAT)?;

        plot.extend(redshifts);
        plot.extend(temperatures);
    }

    // Milestones, strictly one after another in chronological order
    for plotted in timeline.plot(model, &mapper) {
        let dot = c.add(
            Shape::Dot { radius: DOT_RADIUS },
            plotted.position,
            Style::new(Color::Yellow),
        );
        let label = place_text(
            &mut c,
            &plotted.event.label,
            SMALL_TEXT,
            Color::White,
            plotted.position,
            Direction::Up,
        );
        c.play(
            vec![
                Animation::new(AnimationKind::FadeIn, [dot]),
                Animation::new(AnimationKind::Write, [label]),
            ],
            config.event_reveal,
        )?;
        debug!(
            event = %plotted.event.label,
            t = plotted.event.time,
            a = plotted.scale_factor,
            "event placed"
        );
        plot.extend([dot, label]);
    }

    // Cursor sweeping the curve from the Big Bang to today
    let tracker = TimeCursorTracker::new(*model, mapper);
    let cursor = c.add(
        Shape::Dot { radius: DOT_RADIUS },
        tracker.position(&TimeCursorState::default()),
        Style::new(Color::Red),
    );
    play_one(&mut c, AnimationKind::Add, [cursor], 0.0)?;
    c.track(cursor, tracker, Some(axes), 0.0, model.t_now(), config.cursor_sweep)?;

    // Zoom in on the whole plot, then shrink it against the left edge
    let group = c.group(plot)?;
    c.wait(0.5)?;
    c.transform_group(group, 1.5, Target::Origin, config.zoom)?;
    c.wait(0.5)?;
    c.transform_group(group, 0.5, Target::Edge(Direction::Left), config.zoom)?;

    let inflation = Shape::text(INFLATION, 28.0);
    let at = layout::shape_to_edge(&inflation, Direction::Right);
    let inflation = c.add(inflation, at, Style::new(Color::Red));
    play_one(&mut c, AnimationKind::Write, [inflation], BEAT)?;
    c.wait(1.0)?;

    let conclusion = Shape::text(CONCLUSION, 30.0);
    let at = layout::shape_to_edge(&conclusion, Direction::Down);
    let conclusion = c.add(conclusion, at, Style::new(Color::Green));
    play_one(&mut c, AnimationKind::Write, [conclusion], BEAT)?;
    c.wait(2.0)?;

    Ok(c.finish())
}

/// Declare a text element next to a point
fn place_text(
    c: &mut Choreographer,
    content: &str,
    font_size: f64,
    color: Color,
    anchor: [f64; 2],
    direction: Direction,
) -> ElementId {
    let shape = Shape::text(content, font_size);
    let half = shape.half_extent();
    let point = Bounds::new(anchor, [DOT_RADIUS, DOT_RADIUS]);
    let at = layout::next_to(&point, half, direction);
    c.add(shape, at, Style::new(color))
}
