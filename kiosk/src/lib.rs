//! Kiosk e-ink display server.
//!
//! Renders QR codes with optional labels and a true-size measuring scale
//! onto a monochrome e-paper panel, driven by a small HTTP API.

pub mod app;
pub mod config;
pub mod server;
pub mod services;

/// Application name reported by `/version` and drawn on the boot splash.
pub const APP_NAME: &str = "Kiosk E-Ink Display Server";
