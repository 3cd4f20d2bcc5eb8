use aeon_core::{Animation, AnimationKind, Color, DOT_RADIUS, Result, SceneConfig, Shape, Style};

use super::{BEAT, SceneKind, play_one};
use crate::choreography::{Choreographer, Choreography};
use crate::layout::{self, Bounds, Direction};

/// (date, caption) pairs, evenly spaced regardless of the real durations
const MILESTONES: [(&str, &str); 8] = [
    ("0 s", "Big Bang"),
    ("10⁻³⁶ s", "Inflation"),
    ("10⁻⁶ s", "Particules"),
    ("3 min", "Nucléosynthèse"),
    ("380 000 ans", "CMB"),
    ("400 M années", "Galaxies"),
    ("9 Ga", "Soleil"),
    ("13,8 Ga", "Aujourd’hui"),
];

const LINE_HALF: f64 = 6.0;
const SPREAD: f64 = 5.5;
const HIGHLIGHT_BUFF: f64 = 0.1;

/// Ordinal history of the universe along a straight line
pub fn build(config: &SceneConfig) -> Result<Choreography> {
    let mut c = Choreographer::new(SceneKind::HistoryTimeline.name());

    let title = Shape::text("Histoire de l'univers", 48.0);
    let at = layout::shape_to_edge(&title, Direction::Up);
    let title = c.add(title, at, Style::new(Color::White));
    play_one(&mut c, AnimationKind::Write, [title], BEAT)?;

    let line = c.add(
        Shape::Line {
            from: [-LINE_HALF, 0.0],
            to: [LINE_HALF, 0.0],
        },
        [0.0, 0.0],
        Style::new(Color::Gray),
    );
    play_one(&mut c, AnimationKind::Create, [line], BEAT)?;

    let last = (MILESTONES.len() - 1) as f64;
    for (i, (date, caption)) in MILESTONES.into_iter().enumerate() {
        let x = -SPREAD + 2.0 * SPREAD * i as f64 / last;
        let dot = c.add(Shape::Dot { radius: DOT_RADIUS }, [x, 0.0], Style::new(Color::White));
        let anchor = c.bounds(dot)?;

        let date = Shape::text(date, 24.0);
        let below = layout::next_to(&anchor, date.half_extent(), Direction::Down);
        let date = c.add(date, below, Style::new(Color::Yellow));

        let caption = Shape::text(caption, 26.0);
        let above = layout::next_to(&anchor, caption.half_extent(), Direction::Up);
        let caption = c.add(caption, above, Style::new(Color::Blue));

        c.play(
            vec![
                Animation::new(AnimationKind::FadeIn, [dot]),
                Animation::new(AnimationKind::Write, [date]),
                Animation::new(AnimationKind::Write, [caption]),
            ],
            config.milestone_reveal,
        )?;
    }
    c.wait(2.0)?;

    let around: Bounds = c.bounds(line)?;
    let highlight = c.add(
        Shape::Rect {
            width: 2.0 * (around.half[0] + HIGHLIGHT_BUFF),
            height: 2.0 * (around.half[1] + HIGHLIGHT_BUFF),
        },
        around.center,
        Style::new(Color::Blue),
    );
    play_one(&mut c, AnimationKind::Create, [highlight], BEAT)?;
    c.wait(2.0)?;

    Ok(c.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestones_are_evenly_spaced_in_order() {
        let script = build(&SceneConfig::default()).unwrap();
        let dots: Vec<_> = script
            .elements
            .iter()
            .filter(|e| matches!(e.shape, Shape::Dot { .. }))
            .collect();
        assert_eq!(dots.len(), MILESTONES.len());
        assert_eq!(dots[0].position[0], -SPREAD);
        assert!((dots[7].position[0] - SPREAD).abs() < 1e-12);
        let gaps: Vec<f64> = dots.windows(2).map(|w| w[1].position[0] - w[0].position[0]).collect();
        assert!(gaps.iter().all(|g| (g - gaps[0]).abs() < 1e-12));

        let steps: Vec<_> = dots.iter().map(|d| script.reveal_step(d.id).unwrap()).collect();
        assert!(steps.windows(2).all(|w| w[0] < w[1]));
        for &s in &steps {
            assert_eq!(script.steps[s].duration, 0.8);
        }
    }

    #[test]
    fn test_dates_below_captions_above() {
        let script = build(&SceneConfig::default()).unwrap();
        let date = script.find_text("380 000 ans").unwrap();
        let caption = script.find_text("CMB").unwrap();
        assert!(script.element(date).unwrap().position[1] < 0.0);
        assert!(script.element(caption).unwrap().position[1] > 0.0);
        assert_eq!(script.element(date).unwrap().style.color, Color::Yellow);
    }

    #[test]
    fn test_last_caption_uses_typographic_apostrophe() {
        let script = build(&SceneConfig::default()).unwrap();
        assert!(script.find_text("Aujourd’hui").is_some());
        assert!(script.find_text("Aujourd'hui").is_none());
    }

    #[test]
    fn test_highlight_surrounds_line() {
        let script = build(&SceneConfig::default()).unwrap();
        let Shape::Rect { width, height } = script.elements.last().unwrap().shape else {
            panic!("expected the highlight rectangle last");
        };
        assert!((width - 12.2).abs() < 1e-12);
        assert!((height - 0.2).abs() < 1e-12);
    }
}
