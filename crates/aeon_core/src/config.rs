use serde::{Deserialize, Serialize};

use crate::types::AxisSpec;

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Axis box of the scale-factor plot
    pub axes: AxisSpec,
    /// Reveal time of one event marker + label on the scale-factor plot
    pub event_reveal: f64,
    /// Reveal time of one milestone on the ordinal history timeline
    pub milestone_reveal: f64,
    /// Time taken to draw the a(t) curve
    pub curve_draw: f64,
    /// Time taken by the cursor to sweep from the Big Bang to today
    pub cursor_sweep: f64,
    /// Duration of each zoom/reposition of the plot
    pub zoom: f64,
    /// Random seed for particle and galaxy scatter
    pub seed: u64,
    /// Draw the redshift and temperature scales beside the plot
    pub derived_axes: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            axes: AxisSpec::default(),
            event_reveal: 0.5,
            milestone_reveal: 0.8,
            curve_draw: 3.0,
            cursor_sweep: 8.0,
            zoom: 2.0,
            seed: 42,
            derived_axes: true,
        }
    }
}
