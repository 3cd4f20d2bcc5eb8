pub mod camera;
pub mod elements;
pub mod playback;
pub mod plugin;
pub mod strokes;
pub mod ui;
