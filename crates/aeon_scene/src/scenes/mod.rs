//! The narrated scenes. Each one is a function from [`SceneConfig`] to a
//! validated [`Choreography`].

mod big_bang;
mod big_bang_timeline;
mod galaxies;
mod history_timeline;
pub mod scale_factor;

use aeon_core::{AeonError, Animation, AnimationKind, ElementId, Result, SceneConfig};

use crate::choreography::{Choreographer, Choreography};

/// Default run time of a single write/create/fade
const BEAT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    BigBang,
    BigBangTimeline,
    GalaxiesFormation,
    HistoryTimeline,
    ScaleFactorTimeline,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        Self::BigBang,
        Self::BigBangTimeline,
        Self::GalaxiesFormation,
        Self::HistoryTimeline,
        Self::ScaleFactorTimeline,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BigBang => "big-bang",
            Self::BigBangTimeline => "big-bang-timeline",
            Self::GalaxiesFormation => "galaxies-formation",
            Self::HistoryTimeline => "history-timeline",
            Self::ScaleFactorTimeline => "scale-factor-timeline",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| AeonError::UnknownScene(name.to_string()))
    }

    pub fn build(&self, config: &SceneConfig) -> Result<Choreography> {
        match self {
            Self::BigBang => big_bang::build(config),
            Self::BigBangTimeline => big_bang_timeline::build(config),
            Self::GalaxiesFormation => galaxies::build(config),
            Self::HistoryTimeline => history_timeline::build(config),
            Self::ScaleFactorTimeline => scale_factor::build(config),
        }
    }
}

impl std::fmt::Display for SceneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Play a single animation kind on `targets`
fn play_one(
    c: &mut Choreographer,
    kind: AnimationKind,
    targets: impl Into<Vec<ElementId>>,
    duration: f64,
) -> Result<()> {
    c.play(vec![Animation::new(kind, targets)], duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    #[test]
    fn test_names_round_trip() {
        for kind in SceneKind::ALL {
            assert_eq!(SceneKind::from_name(kind.name()).unwrap(), kind);
        }
        let err = SceneKind::from_name("steady-state").unwrap_err();
        assert!(matches!(err, AeonError::UnknownScene(_)));
    }

    #[test]
    fn test_every_scene_builds_and_plays_out() {
        let config = SceneConfig::default();
        for kind in SceneKind::ALL {
            let script = kind.build(&config).unwrap();
            assert_eq!(script.name, kind.name());
            assert!(script.total_duration() > 0.0);
            let mut player = Player::new(script);
            player.finish();
            assert!(player.is_finished(), "{kind} did not finish");
        }
    }

    #[test]
    fn test_bad_config_is_rejected() {
        let config = SceneConfig {
            zoom: -1.0,
            ..SceneConfig::default()
        };
        let err = SceneKind::ScaleFactorTimeline.build(&config).unwrap_err();
        assert!(matches!(err, AeonError::Choreography(_)));
    }

    #[test]
    fn test_runaway_tick_count_is_a_configuration_error() {
        let mut config = SceneConfig::default();
        config.axes.time_range = aeon_core::AxisRange::new(0.0, 14.0, 1e-300);
        assert!(config.axes.validate().is_err());
        let err = SceneKind::ScaleFactorTimeline.build(&config).unwrap_err();
        assert!(matches!(err, AeonError::Configuration(_)));
    }
}
