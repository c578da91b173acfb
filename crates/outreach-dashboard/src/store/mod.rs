//! Application state store.
//!
//! All state lives in one [`AppState`] owned by a [`Store`]. The only way to
//! change it is [`Store::dispatch`], which runs the pure [`reduce`] function.

mod action;
mod state;

pub use action::{reduce, Action};
pub use state::{AppState, ConnectionStatus};

/// Owner of the application state.
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Store seeded with the demo dataset, as the dashboard starts.
    pub fn initial() -> Self {
        Self::new(AppState::initial())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(action = action.name(), "Dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }
}
