pub mod cosmology;
pub mod procgen;

pub use cosmology::{ScaleFactorModel, temperature_of_a, z_of_a};
