//! HTTP handlers for entity dispatch.

pub mod entity;
pub use entity::*;
