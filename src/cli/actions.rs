//! One-shot mutating commands (flexup, flexdown, shutdown).
//!
//! The same confirm-then-execute workflow as the interactive console: the
//! command is staged in a gate and dispatched only when the operator
//! confirms (or passed `--yes`). Unlike the interactive console, the call
//! is awaited so the exit code reflects the scheduler's answer.

use crate::cli::{FlexArgs, ShutdownArgs};
use crate::client::{Ack, SchedulerClient};
use crate::console::{Command, ConfirmationGate};
use std::io::Write;

/// Flex direction for the shared flex handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Up,
    Down,
}

fn prompt_confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N]: ", question);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn accepted(ack: Ack) -> String {
    format!(
        "Accepted (HTTP {}). Watch the tasks view for the effect.",
        ack.status
    )
}

/// Stage, confirm, and dispatch a flex command.
pub async fn handle_flex(
    direction: FlexDirection,
    args: &FlexArgs,
    client: &SchedulerClient,
) -> anyhow::Result<String> {
    let command = match direction {
        FlexDirection::Up => Command::FlexUp {
            profile: args.profile.clone(),
            instances: args.instances,
        },
        FlexDirection::Down => Command::FlexDown {
            profile: args.profile.clone(),
            instances: args.instances,
        },
    };
    let question = format!("About to {}", command);

    let mut gate = ConfirmationGate::new();
    gate.stage(command);

    if !args.yes && !prompt_confirm(&question)? {
        gate.cancel();
        return Ok("Cancelled.".to_string());
    }

    let Some(command) = gate.confirm() else {
        return Ok("Cancelled.".to_string());
    };

    let ack = match command {
        Command::FlexUp { profile, instances } => client.flex_up(&profile, instances).await?,
        Command::FlexDown { profile, instances } => client.flex_down(&profile, instances).await?,
        Command::Shutdown { mode } => client.shutdown(mode).await?,
    };

    Ok(accepted(ack))
}

/// Stage, confirm, and dispatch a framework shutdown.
pub async fn handle_shutdown(
    args: &ShutdownArgs,
    client: &SchedulerClient,
) -> anyhow::Result<String> {
    let mut gate = ConfirmationGate::new();
    gate.stage(Command::Shutdown { mode: args.mode });

    if !args.yes {
        println!("{}", args.mode.describe());
        if !prompt_confirm(&format!("Shut down the framework ({})?", args.mode))? {
            gate.cancel();
            return Ok("Cancelled.".to_string());
        }
    }

    let Some(Command::Shutdown { mode }) = gate.confirm() else {
        return Ok("Cancelled.".to_string());
    };

    let ack = client.shutdown(mode).await?;
    Ok(accepted(ack))
}
