pub mod bridge;
pub mod geometry;
pub mod model;
pub mod settings;
pub mod store;

pub use bridge::{BridgeConfig, to_dataset, to_tasks};
pub use geometry::{GeometryError, PercentBox, PixelBox, to_percent, to_pixels};
pub use model::*;
pub use settings::*;
pub use store::{load_dataset, save_dataset};
