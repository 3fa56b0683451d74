//! CLI command handlers
//!
//! This module contains all the command handlers for the notify-rank CLI.
//! Each subcommand is implemented in its own module.

pub mod config;
pub mod helpers;
pub mod predict;
pub mod reset;
pub mod serve;
pub mod settings;
pub mod train;
