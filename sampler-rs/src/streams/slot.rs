use std::sync::{Mutex, MutexGuard, PoisonError};

struct SlotState<T> {
    value: T,
    accepting: bool,
}

/// Single value holder written by a push callback and read on every tick.
///
/// Writes are only accepted while the slot is open. Closing happens under the same lock
/// as writes, so once `close` returns no callback can alter the value.
pub(crate) struct Slot<T> {
    inner: Mutex<SlotState<T>>,
}

impl<T: Clone> Slot<T> {
    pub(crate) fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(SlotState {
                value: initial,
                accepting: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn open(&self) {
        self.lock().accepting = true;
    }

    pub(crate) fn close(&self) {
        self.lock().accepting = false;
    }

    /// Replaces the held value. Returns false if the slot is closed.
    pub(crate) fn store(&self, value: T) -> bool {
        let mut state = self.lock();
        if !state.accepting {
            return false;
        }
        state.value = value;
        true
    }

    pub(crate) fn peek(&self) -> T {
        self.lock().value.clone()
    }
}
