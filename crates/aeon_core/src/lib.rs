pub mod config;
pub mod constants;
pub mod error;
pub mod step;
pub mod types;

pub use config::SceneConfig;
pub use constants::*;
pub use error::{AeonError, Result};
pub use step::*;
pub use types::*;
