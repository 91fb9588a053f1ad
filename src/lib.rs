pub mod config;
pub mod display;
pub mod document;
pub mod math;
pub mod resources;
pub mod scene_graph;

pub use config::ModelConfig;
pub use resources::ResourceTracker;
