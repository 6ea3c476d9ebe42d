//! CLI library components for the E2 preset controller.

pub mod cli;
pub mod commands;
pub mod logging;
mod tables;
