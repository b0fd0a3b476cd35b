pub mod camera;
pub mod clock_face;
pub mod engine;
pub mod error;
pub mod glyphs;
pub mod precipitation;
pub mod resources;
pub mod scheduler;
pub mod sky;
pub mod weather_state;

pub use engine::{EngineConfig, FrameReport, SceneUpdateEngine, SceneView, SubUpdate};
pub use error::SceneError;
