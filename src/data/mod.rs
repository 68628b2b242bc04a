//! Data layer - static tables and layout constants
//!
//! This module contains all static data used by the renderer and viewport:
//! - The command allow-list and its arities
//! - Preamble command set
//! - Zoom/pan and page layout constants

pub mod constants;

// Re-export commonly used items
pub use constants::{command_arity, CommandKind, COMMANDS, PREAMBLE_COMMANDS};
