//! CLI library components for `xwalk`.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
