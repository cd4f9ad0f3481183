pub mod body;
pub mod bodies;

pub use body::{Body, MAX_ANGULAR_SPEED};
pub use bodies::Bodies;
