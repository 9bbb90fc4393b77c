pub mod annotated;
pub mod viewport;
