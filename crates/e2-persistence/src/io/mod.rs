//! File I/O operations for the state file.
//!
//! This module handles:
//! - Saving state with atomic writes
//! - Loading state with format validation

mod load;
mod save;

pub use load::load_state_file;
pub use save::save_state_file;
