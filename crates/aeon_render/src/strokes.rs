//! Outlined shapes (rings, lines, boxes, axes, curves) are drawn every frame
//! with gizmos straight from the player state; they have no entities.

use aeon_core::{Color as PaletteColor, Shape};
use bevy::prelude::*;

use crate::playback::ScenePlayback;

const CIRCLE_SEGMENTS: usize = 96;
const TICK_LENGTH: f64 = 0.1;

/// Polylines (local coordinates) making up the stroked outline of `shape`.
/// Filled shapes and text have none.
pub fn outline(shape: &Shape) -> Vec<Vec<[f64; 2]>> {
    match shape {
        Shape::Circle { radius } => {
            let ring = (0..=CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
                    [radius * angle.cos(), radius * angle.sin()]
                })
                .collect();
            vec![ring]
        }
        Shape::Line { from, to } => vec![vec![*from, *to]],
        Shape::Rect { width, height } => {
            let (hw, hh) = (width / 2.0, height / 2.0);
            vec![vec![[-hw, -hh], [hw, -hh], [hw, hh], [-hw, hh], [-hw, -hh]]]
        }
        Shape::Axes {
            width,
            height,
            x_ticks,
            y_ticks,
        } => {
            let origin = [-width / 2.0, -height / 2.0];
            let mut lines = vec![
                vec![origin, [origin[0] + width, origin[1]]],
                vec![origin, [origin[0], origin[1] + height]],
            ];
            let half = TICK_LENGTH / 2.0;
            lines.extend(x_ticks.iter().map(|x| {
                vec![
                    [origin[0] + x, origin[1] - half],
                    [origin[0] + x, origin[1] + half],
                ]
            }));
            lines.extend(y_ticks.iter().map(|y| {
                vec![
                    [origin[0] - half, origin[1] + y],
                    [origin[0] + half, origin[1] + y],
                ]
            }));
            lines
        }
        Shape::Curve { points } => vec![points.clone()],
        Shape::Dot { .. } | Shape::Star { .. } | Shape::Text { .. } => Vec::new(),
    }
}

/// Leading part of a polyline covering `fraction` of its length
pub fn partial(points: &[[f64; 2]], fraction: f64) -> Vec<[f64; 2]> {
    let fraction = fraction.clamp(0.0, 1.0);
    if points.len() < 2 || fraction >= 1.0 {
        return points.to_vec();
    }
    let segment = |a: [f64; 2], b: [f64; 2]| ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt();
    let total: f64 = points.windows(2).map(|w| segment(w[0], w[1])).sum();
    let mut budget = total * fraction;
    let mut out = vec![points[0]];
    for w in points.windows(2) {
        let len = segment(w[0], w[1]);
        if len >= budget {
            let f = if len > 0.0 { budget / len } else { 0.0 };
            out.push([w[0][0] + (w[1][0] - w[0][0]) * f, w[0][1] + (w[1][1] - w[0][1]) * f]);
            break;
        }
        budget -= len;
        out.push(w[1]);
    }
    out
}

pub fn palette_color(color: PaletteColor, alpha: f32) -> Color {
    let [r, g, b, a] = color.rgba();
    Color::srgba(r, g, b, a * alpha)
}

/// Draw every visible outlined element
pub fn draw_strokes(playback: Res<ScenePlayback>, mut gizmos: Gizmos) {
    let player = &playback.player;
    for element in &player.script().elements {
        let Some(visual) = player.visual(element.id) else {
            continue;
        };
        if !visual.shown {
            continue;
        }
        let alpha = element.style.stroke_opacity * visual.opacity;
        if alpha <= 0.0 {
            continue;
        }
        let color = palette_color(element.style.color, alpha);
        let k = visual.scale * visual.grow;
        for line in outline(&element.shape) {
            let drawn = partial(&line, visual.reveal);
            gizmos.linestrip_2d(
                drawn.iter().map(|p| {
                    Vec2::new(
                        (visual.position[0] + k * p[0]) as f32,
                        (visual.position[1] + k * p[1]) as f32,
                    )
                }),
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stops_midway() {
        let line = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        let half = partial(&line, 0.5);
        assert_eq!(half, vec![[0.0, 0.0], [1.0, 0.0]]);
        let quarter = partial(&line, 0.25);
        assert_eq!(quarter, vec![[0.0, 0.0], [0.5, 0.0]]);
        assert_eq!(partial(&line, 1.0), line.to_vec());
        assert_eq!(partial(&line, 0.0), vec![[0.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn test_axes_outline_has_axes_and_ticks() {
        let shape = Shape::Axes {
            width: 10.0,
            height: 5.0,
            x_ticks: vec![0.0, 5.0, 10.0],
            y_ticks: vec![0.0, 2.5],
        };
        let lines = outline(&shape);
        assert_eq!(lines.len(), 2 + 3 + 2);
        assert_eq!(lines[0], vec![[-5.0, -2.5], [5.0, -2.5]]);
        assert!(outline(&Shape::text("a(t)", 24.0)).is_empty());
    }

    #[test]
    fn test_circle_outline_is_closed() {
        let ring = &outline(&Shape::Circle { radius: 3.0 })[0];
        let (first, last) = (ring[0], ring[ring.len() - 1]);
        assert!((first[0] - last[0]).abs() < 1e-9 && (first[1] - last[1]).abs() < 1e-9);
    }
}
