pub mod drag;
pub mod scene;
