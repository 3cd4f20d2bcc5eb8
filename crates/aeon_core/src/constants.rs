// Units: time in Gyr (billions of years), positions in scene units.
// The scene frame is 8 units tall with a 16:9 aspect ratio, origin at centre.

/// Present age of the universe (Gyr); the scale factor is normalised to 1 here
pub const T_NOW: f64 = 13.8;

/// CMB temperature today (Kelvin)
pub const T_CMB_TODAY: f64 = 2.725;

/// Visible frame height in scene units
pub const FRAME_HEIGHT: f64 = 8.0;

/// Visible frame width in scene units (16:9)
pub const FRAME_WIDTH: f64 = FRAME_HEIGHT * 16.0 / 9.0;

/// Gap kept between a group and the frame edge by edge placement
pub const EDGE_BUFF: f64 = 0.5;

/// Gap between an element and a neighbour placed next to it
pub const NEXT_TO_BUFF: f64 = 0.25;

/// Glyph box height per font point (scene units)
pub const TEXT_HEIGHT_PER_POINT: f64 = 0.012;

/// Average glyph advance per font point (scene units)
pub const CHAR_WIDTH_PER_POINT: f64 = 0.0065;

/// Radius of a default dot marker
pub const DOT_RADIUS: f64 = 0.08;

/// Most ticks a single axis may carry
pub const MAX_TICKS: usize = 1000;

/// Number of samples taken when plotting a curve across the time range
pub const CURVE_SAMPLES: usize = 200;

/// Tolerance used when comparing mapped coordinates
pub const COORD_EPSILON: f64 = 1e-9;
