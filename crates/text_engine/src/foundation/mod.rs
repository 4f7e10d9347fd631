//! Foundation module - Core utilities and types
//!
//! Fundamental utilities used throughout the engine:
//! - Math type aliases
//! - Color types and the terminal palette
//! - Logging utilities

pub mod color;
pub mod logging;
pub mod math;
