//! One-shot single-flight initialization gate.
//!
//! Guarantees that an expensive shared computation runs at most once, no
//! matter how many threads race to trigger it. The first caller claims the
//! build and runs it; every other caller blocks on a condition variable
//! until the gate resolves to Ready or Failed, or until its wait bound
//! elapses. The published value is handed out as an `Arc` to a structure
//! that is never mutated afterwards, so late callers get it without
//! blocking at all.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

use crate::types::{LookupError, LookupResult};

/// Gate state machine. InProgress is the only state waiters can observe
/// transiently; Ready and Failed are terminal.
enum GateState<T> {
    NotStarted,
    InProgress,
    Ready(Arc<T>),
    Failed(String),
}

/// A single-flight gate around a lazily-built value.
///
/// The claim NotStarted→InProgress happens under the state mutex, so exactly
/// one caller ever runs the initializer; the build itself runs with the lock
/// released. Initialization is not cancellable once claimed, and a failure
/// is permanent: the gate never retries, since the underlying input is
/// static for the process lifetime.
///
/// If the initializing thread panics, the gate stays InProgress and waiters
/// surface [`LookupError::InitTimeout`] once their bound elapses.
pub struct InitGate<T> {
    state: Mutex<GateState<T>>,
    resolved: Condvar,
}

impl<T> Default for InitGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InitGate<T> {
    /// Creates a gate in the NotStarted state.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState::NotStarted),
            resolved: Condvar::new(),
        }
    }

    /// Returns the value, running `init` if no execution has claimed the
    /// build yet.
    ///
    /// Exactly one caller runs `init`; concurrent callers block until the
    /// gate resolves, for at most `timeout`. Terminal states are returned
    /// directly: Ready yields a cheap `Arc` clone, Failed yields
    /// [`LookupError::InitializationFailed`] carrying the original build
    /// error.
    pub fn get_or_init<F>(&self, timeout: Duration, init: F) -> LookupResult<Arc<T>>
    where
        F: FnOnce() -> LookupResult<T>,
    {
        {
            let mut state = self.lock();
            match &*state {
                GateState::Ready(value) => return Ok(Arc::clone(value)),
                GateState::Failed(message) => {
                    return Err(LookupError::InitializationFailed {
                        message: message.clone(),
                    })
                }
                GateState::InProgress => return self.wait(state, timeout),
                GateState::NotStarted => {}
            }
            // Claim the build; the lock guard drops before init runs.
            *state = GateState::InProgress;
        }

        match init() {
            Ok(value) => {
                let value = Arc::new(value);
                let mut state = self.lock();
                *state = GateState::Ready(Arc::clone(&value));
                self.resolved.notify_all();
                Ok(value)
            }
            Err(err) => {
                let mut state = self.lock();
                *state = GateState::Failed(err.to_string());
                self.resolved.notify_all();
                Err(err)
            }
        }
    }

    /// Returns the value if the gate already resolved to Ready.
    pub fn get(&self) -> Option<Arc<T>> {
        match &*self.lock() {
            GateState::Ready(value) => Some(Arc::clone(value)),
            _ => None,
        }
    }

    /// Blocks until the gate leaves InProgress, then reads the terminal state.
    fn wait(
        &self,
        guard: MutexGuard<'_, GateState<T>>,
        timeout: Duration,
    ) -> LookupResult<Arc<T>> {
        let (state, wait_result) = self
            .resolved
            .wait_timeout_while(guard, timeout, |state| {
                matches!(state, GateState::InProgress)
            })
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if wait_result.timed_out() && matches!(&*state, GateState::InProgress) {
            return Err(LookupError::InitTimeout(timeout));
        }

        match &*state {
            GateState::Ready(value) => Ok(Arc::clone(value)),
            GateState::Failed(message) => Err(LookupError::InitializationFailed {
                message: message.clone(),
            }),
            // Only the claiming thread moves the state out of InProgress,
            // and it never moves it back to NotStarted.
            GateState::InProgress | GateState::NotStarted => {
                Err(LookupError::InitTimeout(timeout))
            }
        }
    }

    /// Locks the state, recovering from poisoning.
    ///
    /// The critical sections only assign the state enum; a panic inside them
    /// cannot leave the value torn, so the poisoned guard is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, GateState<T>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
