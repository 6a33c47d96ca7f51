//! Navigation boundary used by the session actions.

use parking_lot::Mutex;

pub const HOME_PATH: &str = "/";

/// What the store may ask of the router.
pub trait Navigator: Send + Sync {
    /// Reload the current route from scratch.
    fn go(&self);

    /// Navigate to `path`.
    fn push(&self, path: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RouterState {
    history: Vec<String>,
    reloads: u64,
}

/// In-process router that records where the session has been.
pub struct Router {
    state: Mutex<RouterState>,
}

impl Router {
    pub fn new(initial: &str) -> Self {
        Self {
            state: Mutex::new(RouterState {
                history: vec![initial.to_string()],
                reloads: 0,
            }),
        }
    }

    pub fn current(&self) -> String {
        self.state
            .lock()
            .history
            .last()
            .cloned()
            .unwrap_or_else(|| HOME_PATH.to_string())
    }

    /// Every path visited, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.state.lock().history.clone()
    }

    /// How many times the current route has been reloaded.
    pub fn reloads(&self) -> u64 {
        self.state.lock().reloads
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

impl Navigator for Router {
    fn go(&self) {
        let mut state = self.state.lock();
        state.reloads += 1;
        tracing::info!(
            path = state.history.last().map(String::as_str).unwrap_or(HOME_PATH),
            "Reloading route"
        );
    }

    fn push(&self, path: &str) {
        tracing::info!(path, "Navigating");
        self.state.lock().history.push(path.to_string());
    }
}
