//! One-shot readiness gate for startup.

use std::sync::{Arc, Mutex, PoisonError};

type ReadyCallback = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct GateState {
    ready: bool,
    callbacks: Vec<ReadyCallback>,
}

/// Signals that the surrounding context (e.g. the API client) is initialised.
///
/// Callbacks registered with [`on_ready`](Self::on_ready) run exactly once:
/// on the transition to ready, or immediately if the gate is already open.
#[derive(Clone, Default)]
pub struct ReadinessGate {
    state: Arc<Mutex<GateState>>,
}

impl std::fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl ReadinessGate {
    /// A gate that is not ready yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate that is already open.
    pub fn ready() -> Self {
        let gate = Self::new();
        gate.mark_ready();
        gate
    }

    /// Whether the context is initialised.
    pub fn is_ready(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).ready
    }

    /// Open the gate and run pending callbacks. Later calls do nothing.
    pub fn mark_ready(&self) {
        let callbacks = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.ready {
                return;
            }
            state.ready = true;
            std::mem::take(&mut state.callbacks)
        };
        // Run outside the lock so callbacks may query the gate
        for callback in callbacks {
            callback();
        }
    }

    /// Run `callback` once the gate is open.
    pub fn on_ready(&self, callback: impl FnOnce() + Send + 'static) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !state.ready {
                state.callbacks.push(Box::new(callback));
                return;
            }
        }
        callback();
    }
}
