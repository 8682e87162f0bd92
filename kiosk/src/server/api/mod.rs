//! REST API handlers.

pub mod show;
