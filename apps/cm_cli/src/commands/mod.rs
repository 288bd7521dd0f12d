// apps/cm_cli/src/commands/mod.rs

//! 子命令

pub mod build;
pub mod elements;
pub mod generate;
