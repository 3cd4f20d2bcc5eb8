use serde::{Deserialize, Serialize};

use crate::constants::{CHAR_WIDTH_PER_POINT, MAX_TICKS, TEXT_HEIGHT_PER_POINT};
use crate::error::{AeonError, Result};

/// A milestone of cosmic history: age in Gyr plus the caption shown next to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub time: f64,
    pub label: String,
}

impl Event {
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }
}

/// One axis of an [`AxisSpec`]: `[min, max]` with tick spacing `step`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Normalised position of `v` along the range (0 at min, 1 at max, unclamped)
    pub fn fraction(&self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }

    /// Tick values from min to max inclusive, at most `MAX_TICKS + 1` of them
    pub fn ticks(&self) -> Vec<f64> {
        let count = ((self.span() / self.step + 1e-9).floor() as usize).min(MAX_TICKS);
        (0..=count).map(|i| self.min + i as f64 * self.step).collect()
    }

    fn validate(&self, axis: &str) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(AeonError::configuration(format!(
                "{axis} range must be finite, got ({}, {}, {})",
                self.min, self.max, self.step
            )));
        }
        if self.min >= self.max {
            return Err(AeonError::configuration(format!(
                "{axis} range is degenerate: min {} >= max {}",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(AeonError::configuration(format!(
                "{axis} tick step must be positive, got {}",
                self.step
            )));
        }
        if self.span() / self.step > MAX_TICKS as f64 {
            return Err(AeonError::configuration(format!(
                "{axis} tick step {} gives more than {MAX_TICKS} ticks over {}",
                self.step,
                self.span()
            )));
        }
        Ok(())
    }
}

/// Axis box configuration. Immutable once validated; every coordinate
/// mapping in a scene is relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub time_range: AxisRange,
    pub value_range: AxisRange,
    /// Box width in scene units
    pub pixel_width: f64,
    /// Box height in scene units
    pub pixel_height: f64,
    /// Scene position of the corner (time_range.min, value_range.min)
    pub anchor: [f64; 2],
}

impl AxisSpec {
    /// Build and validate an axis box anchored so that it is centred on the origin
    pub fn centered(
        time_range: AxisRange,
        value_range: AxisRange,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Result<Self> {
        Self::new(
            time_range,
            value_range,
            pixel_width,
            pixel_height,
            [-pixel_width / 2.0, -pixel_height / 2.0],
        )
    }

    pub fn new(
        time_range: AxisRange,
        value_range: AxisRange,
        pixel_width: f64,
        pixel_height: f64,
        anchor: [f64; 2],
    ) -> Result<Self> {
        let spec = Self {
            time_range,
            value_range,
            pixel_width,
            pixel_height,
            anchor,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Fail fast on degenerate ranges or box sizes
    pub fn validate(&self) -> Result<()> {
        self.time_range.validate("time")?;
        self.value_range.validate("value")?;
        if !(self.pixel_width > 0.0 && self.pixel_height > 0.0) {
            return Err(AeonError::configuration(format!(
                "axis box must have positive size, got {} x {}",
                self.pixel_width, self.pixel_height
            )));
        }
        if !(self.anchor[0].is_finite() && self.anchor[1].is_finite()) {
            return Err(AeonError::configuration("axis anchor must be finite"));
        }
        Ok(())
    }

    /// Scene position of the box centre
    pub fn center(&self) -> [f64; 2] {
        [
            self.anchor[0] + self.pixel_width / 2.0,
            self.anchor[1] + self.pixel_height / 2.0,
        ]
    }
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            time_range: AxisRange::new(0.0, 14.0, 2.0),
            value_range: AxisRange::new(0.0, 1.2, 0.2),
            pixel_width: 10.0,
            pixel_height: 5.0,
            anchor: [-5.0, -2.5],
        }
    }
}

/// Opaque handle to a visual element, allocated by the choreographer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Named palette used by the scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
    Gray,
    Yellow,
    Blue,
    Red,
    Green,
    Orange,
    Purple,
}

impl Color {
    /// Color as [r, g, b, a]
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            Self::White => [1.0, 1.0, 1.0, 1.0],
            Self::Black => [0.0, 0.0, 0.0, 1.0],
            Self::Gray => [0.53, 0.53, 0.53, 1.0],
            Self::Yellow => [1.0, 1.0, 0.0, 1.0],
            Self::Blue => [0.35, 0.77, 0.87, 1.0],
            Self::Red => [0.99, 0.38, 0.33, 1.0],
            Self::Green => [0.51, 0.76, 0.4, 1.0],
            Self::Orange => [1.0, 0.53, 0.18, 1.0],
            Self::Purple => [0.6, 0.45, 0.67, 1.0],
        }
    }
}

/// Stroke/fill appearance of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    pub stroke_opacity: f32,
    pub fill_opacity: f32,
}

impl Style {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            stroke_opacity: 1.0,
            fill_opacity: 1.0,
        }
    }

    pub fn with_stroke(mut self, opacity: f32) -> Self {
        self.stroke_opacity = opacity;
        self
    }

    pub fn with_fill(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity;
        self
    }
}

/// Geometry of a scene-graph element, local to the element's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled disc
    Dot { radius: f64 },
    /// Stroked ring
    Circle { radius: f64 },
    /// Five-pointed filled star
    Star { outer_radius: f64 },
    Line { from: [f64; 2], to: [f64; 2] },
    /// Stroked rectangle centred on the position
    Rect { width: f64, height: f64 },
    Text { content: String, font_size: f64 },
    /// Axis box: origin corner at (-width/2, -height/2), ticks measured from it
    Axes {
        width: f64,
        height: f64,
        x_ticks: Vec<f64>,
        y_ticks: Vec<f64>,
    },
    /// Polyline through local points
    Curve { points: Vec<[f64; 2]> },
}

impl Shape {
    pub fn text(content: impl Into<String>, font_size: f64) -> Self {
        Self::Text {
            content: content.into(),
            font_size,
        }
    }

    /// Half width and half height of the element's bounding box at scale 1
    pub fn half_extent(&self) -> [f64; 2] {
        match self {
            Self::Dot { radius } | Self::Circle { radius } => [*radius, *radius],
            Self::Star { outer_radius } => [*outer_radius, *outer_radius],
            Self::Line { from, to } => [
                from[0].abs().max(to[0].abs()),
                from[1].abs().max(to[1].abs()),
            ],
            Self::Rect { width, height } | Self::Axes { width, height, .. } => {
                [width / 2.0, height / 2.0]
            }
            Self::Text { content, font_size } => [
                content.chars().count() as f64 * font_size * CHAR_WIDTH_PER_POINT / 2.0,
                font_size * TEXT_HEIGHT_PER_POINT / 2.0,
            ],
            Self::Curve { points } => points.iter().fold([0.0, 0.0], |acc, p| {
                [acc[0].max(p[0].abs()), acc[1].max(p[1].abs())]
            }),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Dot { .. } => "dot",
            Self::Circle { .. } => "circle",
            Self::Star { .. } => "star",
            Self::Line { .. } => "line",
            Self::Rect { .. } => "rect",
            Self::Text { .. } => "text",
            Self::Axes { .. } => "axes",
            Self::Curve { .. } => "curve",
        }
    }
}

/// Scene-graph construction request handed to the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub id: ElementId,
    pub shape: Shape,
    /// Scene position of the element's local origin
    pub position: [f64; 2],
    pub style: Style,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_time_range_rejected() {
        let err = AxisSpec::centered(
            AxisRange::new(5.0, 5.0, 1.0),
            AxisRange::new(0.0, 1.2, 0.2),
            10.0,
            5.0,
        )
        .unwrap_err();
        assert!(matches!(err, AeonError::Configuration(_)), "{err}");
    }

    #[test]
    fn test_inverted_value_range_rejected() {
        let err = AxisSpec::centered(
            AxisRange::new(0.0, 14.0, 2.0),
            AxisRange::new(1.2, 0.0, 0.2),
            10.0,
            5.0,
        )
        .unwrap_err();
        assert!(matches!(err, AeonError::Configuration(_)));
    }

    #[test]
    fn test_bad_step_and_size_rejected() {
        let t = AxisRange::new(0.0, 14.0, 2.0);
        let v = AxisRange::new(0.0, 1.2, 0.2);
        assert!(AxisSpec::centered(AxisRange::new(0.0, 14.0, 0.0), v, 10.0, 5.0).is_err());
        assert!(AxisSpec::centered(t, v, 0.0, 5.0).is_err());
        assert!(AxisSpec::centered(t, AxisRange::new(0.0, f64::NAN, 0.2), 10.0, 5.0).is_err());
    }

    #[test]
    fn test_tiny_step_rejected_before_ticking() {
        let v = AxisRange::new(0.0, 1.2, 0.2);
        let err = AxisSpec::centered(AxisRange::new(0.0, 14.0, 1e-300), v, 10.0, 5.0).unwrap_err();
        assert!(matches!(err, AeonError::Configuration(_)));
        let dense = AxisRange::new(0.0, 1.0, 0.01);
        AxisSpec::centered(dense, v, 10.0, 5.0).unwrap();
    }

    #[test]
    fn test_default_axis_is_valid_and_centered() {
        let spec = AxisSpec::default();
        spec.validate().unwrap();
        assert_eq!(spec.center(), [0.0, 0.0]);
        let centered = AxisSpec::centered(spec.time_range, spec.value_range, 10.0, 5.0).unwrap();
        assert_eq!(centered, spec);
    }

    #[test]
    fn test_ticks_include_both_ends() {
        let ticks = AxisRange::new(0.0, 14.0, 2.0).ticks();
        assert_eq!(ticks.len(), 8);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[7], 14.0);
        // 1.2 / 0.2 lands just under 6 in floating point
        assert_eq!(AxisRange::new(0.0, 1.2, 0.2).ticks().len(), 7);
    }

    #[test]
    fn test_text_extent_grows_with_content() {
        let short = Shape::text("CMB", 24.0).half_extent();
        let long = Shape::text("Réaccélération", 24.0).half_extent();
        assert!(long[0] > short[0]);
        assert_eq!(long[1], short[1]);
    }
}
