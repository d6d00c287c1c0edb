//! Interactive console root.
//!
//! Wires navigation, the confirmation gate, and the dispatcher around the
//! shared state store. Operator input is line-oriented; every handled line
//! is followed by a render of the active view.

pub mod dispatch;
pub mod gate;
pub mod route;
pub mod views;

pub use dispatch::ActionDispatcher;
pub use gate::{Command, ConfirmationGate};
pub use route::Route;

use crate::model::ShutdownMode;
use crate::store::StateStore;
use std::str::FromStr;
use std::sync::Arc;

/// What the input loop should do after a handled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Quit,
}

/// Console root: navigation state plus the command workflow.
pub struct Console {
    store: Arc<StateStore>,
    gate: ConfirmationGate,
    dispatcher: ActionDispatcher,
    route: Route,
    notice: Option<String>,
}

impl Console {
    pub fn new(store: Arc<StateStore>, dispatcher: ActionDispatcher) -> Self {
        Self {
            store,
            gate: ConfirmationGate::new(),
            dispatcher,
            route: Route::default(),
            notice: None,
        }
    }

    /// Currently active route.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Currently staged command, if any.
    pub fn pending(&self) -> Option<&Command> {
        self.gate.pending()
    }

    /// Navigate to a route.
    ///
    /// Entering a shutdown route stages the matching shutdown command as
    /// part of the mount, so the confirmation prompt opens immediately.
    pub fn navigate(&mut self, route: Route) {
        self.route = route;
        if let Route::Shutdown(mode) = route {
            self.gate.stage(Command::Shutdown { mode });
        }
    }

    /// Stage a command for confirmation.
    pub fn stage(&mut self, command: Command) {
        self.gate.stage(command);
    }

    /// Confirm the pending command; dispatch it and navigate to tasks.
    ///
    /// Returns whether a command was actually dispatched.
    pub fn confirm(&mut self) -> bool {
        match self.gate.confirm() {
            Some(command) => {
                self.route = self.dispatcher.dispatch(command);
                true
            }
            None => {
                self.notice = Some("Nothing pending to confirm".to_string());
                false
            }
        }
    }

    /// Cancel the pending command without dispatching.
    ///
    /// Cancelling out of a shutdown confirmation returns to the task view.
    pub fn cancel(&mut self) -> bool {
        let had_pending = self.gate.cancel().is_some();
        if matches!(self.route, Route::Shutdown(_)) {
            self.route = Route::Tasks;
        }
        had_pending
    }

    /// Render the active view from the latest state snapshot.
    pub fn render(&mut self) -> String {
        let snapshot = self.store.snapshot();
        let mut output = views::render(self.route, &snapshot, self.gate.pending());
        if let Some(notice) = self.notice.take() {
            output.push_str(&format!("\n{}\n", notice));
        }
        output
    }

    fn parse_flex(&mut self, direction: &str, args: &[&str]) {
        let (profile, instances) = match args {
            [profile, count] => match count.parse::<u32>() {
                Ok(n) => (profile.to_string(), n),
                Err(_) => {
                    self.notice = Some(format!("Not an instance count: {}", count));
                    return;
                }
            },
            _ => {
                self.notice = Some(format!("Usage: {} <profile> <instances>", direction));
                return;
            }
        };

        let command = if direction == "flexup" {
            Command::FlexUp { profile, instances }
        } else {
            Command::FlexDown { profile, instances }
        };

        self.route = Route::Flex;
        self.gate.stage(command);
    }

    /// Handle one line of operator input.
    pub fn handle_line(&mut self, line: &str) -> LineOutcome {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => {}
            ["quit"] | ["exit"] | ["q"] => return LineOutcome::Quit,
            ["y"] | ["yes"] | ["confirm"] => {
                self.confirm();
            }
            ["n"] | ["no"] | ["cancel"] => {
                self.cancel();
            }
            ["go", path] => self.navigate(Route::parse(path)),
            ["about"] | ["flex"] | ["tasks"] | ["config"] | ["help"] => {
                self.navigate(Route::parse(tokens[0]));
            }
            ["flexup", rest @ ..] => self.parse_flex("flexup", rest),
            ["flexdown", rest @ ..] => self.parse_flex("flexdown", rest),
            ["shutdown", mode] => match ShutdownMode::from_str(mode) {
                Ok(mode) => self.navigate(Route::Shutdown(mode)),
                Err(message) => self.notice = Some(message),
            },
            _ => {
                self.notice = Some(format!(
                    "Unknown input: {} (try 'help')",
                    tokens.join(" ")
                ));
            }
        }

        LineOutcome::Continue
    }
}
