mod commands;
mod context;

use thiserror::Error;

use crate::error::CanvasError;

pub use commands::Command;
pub use context::CommandContext;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command continues a gesture that was never started
    #[error("{0} without a gesture in progress")]
    InvalidState(&'static str),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
