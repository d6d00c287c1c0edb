//! Navigation routes.
//!
//! The route set is closed: every navigation target is a variant here and
//! view selection is an explicit match, never a dynamic lookup. Unknown
//! paths fall back to the default route.

use crate::model::ShutdownMode;
use std::fmt;

/// One navigable surface of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Default/fallback route
    About,
    /// Flex up/down forms
    Flex,
    /// Four-group task listing
    Tasks,
    /// Profile listing plus raw config document
    Config,
    /// Static help text
    Help,
    /// Shutdown confirmation, one route per variant
    Shutdown(ShutdownMode),
}

impl Route {
    /// Map a path to a route. Unknown paths fall back to [`Route::About`].
    pub fn parse(path: &str) -> Route {
        match path.trim().trim_start_matches('/').trim_end_matches('/') {
            "" | "about" => Route::About,
            "flex" => Route::Flex,
            "tasks" => Route::Tasks,
            "config" => Route::Config,
            "help" => Route::Help,
            "shutdown/rm" => Route::Shutdown(ShutdownMode::RmOnly),
            "shutdown/framework" => Route::Shutdown(ShutdownMode::FrameworkGraceful),
            "shutdown/abort" => Route::Shutdown(ShutdownMode::FrameworkAbort),
            _ => Route::About,
        }
    }

    /// Canonical path for this route, suitable for deep links.
    pub fn path(&self) -> String {
        match self {
            Route::About => "/about".to_string(),
            Route::Flex => "/flex".to_string(),
            Route::Tasks => "/tasks".to_string(),
            Route::Config => "/config".to_string(),
            Route::Help => "/help".to_string(),
            Route::Shutdown(mode) => format!("/shutdown/{}", mode.path_segment()),
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::About
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
