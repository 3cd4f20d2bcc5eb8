use aeon_core::{AxisSpec, CURVE_SAMPLES, Result, Shape};
use aeon_physics::ScaleFactorModel;
use serde::{Deserialize, Serialize};

/// Maps (time, value) pairs into the scene coordinates of an axis box.
///
/// Affine in both coordinates and never clamps: values outside the
/// configured ranges extrapolate past the box edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    spec: AxisSpec,
}

impl CoordinateMapper {
    pub fn new(spec: AxisSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    pub fn spec(&self) -> &AxisSpec {
        &self.spec
    }

    /// Offset of (t, value) from the axis anchor, in `[0, w] x [0, h]` inside the box
    pub fn local(&self, t: f64, value: f64) -> [f64; 2] {
        [
            self.spec.time_range.fraction(t) * self.spec.pixel_width,
            self.spec.value_range.fraction(value) * self.spec.pixel_height,
        ]
    }

    /// Scene position of (t, value)
    pub fn map(&self, t: f64, value: f64) -> [f64; 2] {
        let [x, y] = self.local(t, value);
        [self.spec.anchor[0] + x, self.spec.anchor[1] + y]
    }

    /// Scene position of the point (t, a(t)) on the expansion curve
    pub fn map_scale_factor(&self, model: &ScaleFactorModel, t: f64) -> [f64; 2] {
        self.map(t, model.a_of_t(t))
    }

    /// Axes shape to be placed at [`AxisSpec::center`]
    pub fn axes_shape(&self) -> Shape {
        let tick_offsets = |ticks: Vec<f64>, range: &aeon_core::AxisRange, length: f64| {
            ticks
                .into_iter()
                .map(|v| range.fraction(v) * length)
                .collect::<Vec<_>>()
        };
        Shape::Axes {
            width: self.spec.pixel_width,
            height: self.spec.pixel_height,
            x_ticks: tick_offsets(
                self.spec.time_range.ticks(),
                &self.spec.time_range,
                self.spec.pixel_width,
            ),
            y_ticks: tick_offsets(
                self.spec.value_range.ticks(),
                &self.spec.value_range,
                self.spec.pixel_height,
            ),
        }
    }

    /// Sample `f` across the time range. Returns the curve shape and the
    /// position it must be placed at (the box centre) so that every sample
    /// lands where [`Self::map`] puts it.
    pub fn curve(&self, f: impl Fn(f64) -> f64) -> (Shape, [f64; 2]) {
        let center = self.spec.center();
        let range = self.spec.time_range;
        let last = (CURVE_SAMPLES - 1) as f64;
        let points = (0..CURVE_SAMPLES)
            .map(|i| {
                let t = range.min + range.span() * i as f64 / last;
                let [x, y] = self.map(t, f(t));
                [x - center[0], y - center[1]]
            })
            .collect();
        (Shape::Curve { points }, center)
    }
}
