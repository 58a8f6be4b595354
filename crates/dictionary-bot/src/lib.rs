//! Matrix dictionary bot.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
