pub mod color;
pub mod draw;
pub mod error;
pub mod settings;

pub use color::Color;
pub use draw::{DrawBatch, DrawCommand, RecordingBatch};
pub use error::{CollisionError, Result};
pub use settings::CollisionSettings;
