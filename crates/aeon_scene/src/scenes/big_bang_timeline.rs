use aeon_core::{AnimationKind, Color, Result, SceneConfig, Shape, Style};
use aeon_physics::procgen::{self, PLASMA_COLORS};

use super::{BEAT, SceneKind, play_one};
use crate::choreography::{Choreographer, Choreography};
use crate::layout::Target;

const PARTICLES: usize = 40;
const PARTICLE_RADIUS: f64 = 0.05;
const CMB_RADIUS: f64 = 7.5;
pub(crate) const CLOSING_TEXT: &str = "Prochaine étape : formation des galaxies...";

/// From the first point of light to the cosmic microwave background
pub fn build(config: &SceneConfig) -> Result<Choreography> {
    let mut c = Choreographer::new(SceneKind::BigBangTimeline.name());

    let origin = c.add(Shape::Dot { radius: 0.1 }, [0.0, 0.0], Style::new(Color::Yellow));
    play_one(&mut c, AnimationKind::FadeIn, [origin], BEAT)?;
    c.wait(0.5)?;

    let expansion = c.add(Shape::Circle { radius: 0.1 }, [0.0, 0.0], Style::new(Color::Blue));
    play_one(&mut c, AnimationKind::GrowFromCenter, [expansion], 1.0)?;
    let bubble = c.group([expansion])?;
    c.transform_group(bubble, 8.0, Target::Keep, 2.0)?;

    let particles: Vec<_> = procgen::scatter(config.seed, PARTICLES, 5.0, 3.0, &PLASMA_COLORS)
        .into_iter()
        .map(|p| {
            c.add(
                Shape::Dot {
                    radius: PARTICLE_RADIUS,
                },
                p.position,
                Style::new(p.color),
            )
        })
        .collect();
    play_one(
        &mut c,
        AnimationKind::LaggedFadeIn { lag_ratio: 0.02 },
        particles.clone(),
        2.0,
    )?;
    c.wait(1.0)?;

    let cmb = c.add(
        Shape::Circle { radius: CMB_RADIUS },
        [0.0, 0.0],
        Style::new(Color::White).with_stroke(0.3).with_fill(0.1),
    );
    play_one(&mut c, AnimationKind::FadeIn, [cmb], 1.0)?;
    c.wait(1.0)?;

    let mut everything = vec![origin, expansion];
    everything.extend(particles);
    everything.push(cmb);
    play_one(&mut c, AnimationKind::FadeOut, everything, BEAT)?;
    c.wait(1.0)?;

    let closing = c.add(Shape::text(CLOSING_TEXT, 36.0), [0.0, 0.0], Style::new(Color::White));
    play_one(&mut c, AnimationKind::Write, [closing], BEAT)?;
    c.wait(2.0)?;

    Ok(c.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_grows_eightfold() {
        let script = build(&SceneConfig::default()).unwrap();
        let zoom = script
            .steps
            .iter()
            .flat_map(|s| &s.animations)
            .find_map(|a| match a.kind {
                AnimationKind::Transform(op) => Some(op),
                _ => None,
            })
            .unwrap();
        assert_eq!(zoom.scale, 8.0);
        assert_eq!(zoom.shift, [0.0, 0.0]);
    }

    #[test]
    fn test_everything_fades_before_closing_text() {
        let script = build(&SceneConfig::default()).unwrap();
        let fade = script
            .steps
            .iter()
            .position(|s| {
                s.animations
                    .iter()
                    .any(|a| a.kind == AnimationKind::FadeOut)
            })
            .unwrap();
        // dot, circle, particles and the CMB disc leave together
        assert_eq!(script.steps[fade].animations[0].targets.len(), PARTICLES + 3);
        let closing = script.find_text(CLOSING_TEXT).unwrap();
        assert!(script.reveal_step(closing).unwrap() > fade);
    }
}
