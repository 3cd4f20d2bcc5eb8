use aeon_core::{AnimationKind, Color, DOT_RADIUS, Result, SceneConfig, Shape, Style};
use aeon_physics::procgen;

use super::{BEAT, SceneKind, play_one};
use crate::choreography::{Choreographer, Choreography};

const PARTICLES: usize = 10;

/// A point of light, a sudden expansion, then the first particles
pub fn build(config: &SceneConfig) -> Result<Choreography> {
    let mut c = Choreographer::new(SceneKind::BigBang.name());

    let origin = c.add(Shape::Dot { radius: 0.1 }, [0.0, 0.0], Style::new(Color::Yellow));
    play_one(&mut c, AnimationKind::FadeIn, [origin], BEAT)?;
    c.wait(1.0)?;

    let expansion = c.add(Shape::Circle { radius: 3.0 }, [0.0, 0.0], Style::new(Color::Blue));
    play_one(&mut c, AnimationKind::GrowFromCenter, [expansion], BEAT)?;
    c.wait(1.0)?;

    let particles: Vec<_> = procgen::scatter(config.seed, PARTICLES, 3.0, 3.0, &[Color::Red])
        .into_iter()
        .map(|p| c.add(Shape::Dot { radius: DOT_RADIUS }, p.position, Style::new(p.color)))
        .collect();
    play_one(&mut c, AnimationKind::FadeIn, particles, BEAT)?;
    c.wait(2.0)?;

    Ok(c.finish())
}
