pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod vector;

pub use config::SimConfig;
pub use constants::*;
pub use error::{SimError, SimResult};
pub use types::*;
pub use vector::Vector2;
