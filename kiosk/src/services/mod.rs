//! Background workers and startup routines.

pub mod display;
pub mod splash;
