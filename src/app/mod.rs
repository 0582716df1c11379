#[cfg(feature = "cli")]
pub mod commands;
pub mod console;
pub mod shell;
