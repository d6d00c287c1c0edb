//! Two-phase confirmation for mutating commands.
//!
//! A command is staged first and dispatched only on an explicit confirm.
//! At most one command is pending at a time; staging another replaces it
//! (last write wins, not a queue). Confirm hands the command out exactly
//! once; cancel discards it without a dispatch.

use crate::model::ShutdownMode;
use std::fmt;

/// A mutating action the operator can stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FlexUp { profile: String, instances: u32 },
    FlexDown { profile: String, instances: u32 },
    Shutdown { mode: ShutdownMode },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::FlexUp { profile, instances } => {
                write!(f, "flex up {} instance(s) of profile '{}'", instances, profile)
            }
            Command::FlexDown { profile, instances } => {
                write!(f, "flex down {} instance(s) of profile '{}'", instances, profile)
            }
            Command::Shutdown { mode } => write!(f, "shutdown ({})", mode),
        }
    }
}

/// Holds at most one staged command awaiting confirmation.
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<Command>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Stage a command for confirmation.
    ///
    /// Returns the command that was displaced, if one was already pending.
    pub fn stage(&mut self, command: Command) -> Option<Command> {
        let displaced = self.pending.replace(command);
        if let Some(ref old) = displaced {
            tracing::debug!(%old, "Replaced pending command");
        }
        displaced
    }

    /// Confirm the pending command, handing it out for dispatch.
    ///
    /// The gate is empty afterwards; a second confirm yields nothing.
    pub fn confirm(&mut self) -> Option<Command> {
        self.pending.take()
    }

    /// Discard the pending command without dispatching it.
    pub fn cancel(&mut self) -> Option<Command> {
        self.pending.take()
    }

    /// The currently staged command, if any.
    pub fn pending(&self) -> Option<&Command> {
        self.pending.as_ref()
    }
}
