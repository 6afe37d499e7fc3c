//! Command-line front end for the caredesk table renderer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
