// src/audio/mod.rs
//! Audio module - playback, the sample tap, metadata, and the visualizer.

pub mod metadata;
pub mod player;
pub mod tap;
pub mod visualizer;

// Re-export commonly used types
pub use metadata::{display_title, load_metadata, TrackMetadata};
pub use player::Player;
pub use tap::TapSource;
pub use visualizer::{TraceSurface, Visualizer};
