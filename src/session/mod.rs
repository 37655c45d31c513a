pub mod commands;
pub mod model;
pub mod scaling;
pub mod transforms;
