use aeon_core::{AnimationKind, Color, Result, SceneConfig, Shape, Style};
use aeon_physics::procgen;

use super::{BEAT, SceneKind, play_one};
use crate::choreography::{Choreographer, Choreography};
use crate::layout::{self, Direction};

const GALAXIES: usize = 20;
const ROWS: usize = 4;
const COLS: usize = 5;
const GRID_BUFF: f64 = 1.5;

/// Galaxies appear one after another and settle into a lattice
pub fn build(config: &SceneConfig) -> Result<Choreography> {
    let mut c = Choreographer::new(SceneKind::GalaxiesFormation.name());

    let title = Shape::text("Formation des premières galaxies", 42.0);
    let at = layout::shape_to_edge(&title, Direction::Up);
    let title = c.add(title, at, Style::new(Color::White));
    play_one(&mut c, AnimationKind::Write, [title], BEAT)?;
    c.wait(1.0)?;

    let star = Style::new(Color::White).with_stroke(0.0).with_fill(0.8);
    let galaxies: Vec<_> = procgen::scatter(config.seed, GALAXIES, 6.0, 3.0, &[Color::White])
        .into_iter()
        .map(|p| c.add(Shape::Star { outer_radius: 0.2 }, p.position, star))
        .collect();
    play_one(
        &mut c,
        AnimationKind::LaggedFadeIn { lag_ratio: 0.1 },
        galaxies.clone(),
        3.0,
    )?;
    c.wait(1.0)?;

    let cluster = c.group(galaxies)?;
    c.arrange_grid(cluster, ROWS, COLS, GRID_BUFF, 1.5, 3.0)?;
    c.wait(1.0)?;
    c.arrange_grid(cluster, ROWS, COLS, GRID_BUFF, 1.2, 3.0)?;

    let conclusion = Shape::text("Apparition des structures cosmiques", 36.0);
    let at = layout::shape_to_edge(&conclusion, Direction::Down);
    let conclusion = c.add(conclusion, at, Style::new(Color::Blue));
    play_one(&mut c, AnimationKind::Write, [conclusion], BEAT)?;
    c.wait(2.0)?;

    Ok(c.finish())
}
