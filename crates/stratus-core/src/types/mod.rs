//! Type definitions for Stratus runtime configuration

mod runtime_config;

pub use runtime_config::*;
