//! Non-fatal warnings.
//!
//! Invalid configuration values never fail an operation; they are replaced
//! by a fallback and reported here. Every warning is logged at `warn` level
//! and recorded by the innermost [`WarningCapture`] active on the emitting
//! thread, if any.
//!
//! ```
//! use predictably::warnings::{capture_warnings, emit};
//!
//! let ((), messages) = capture_warnings(|| emit("value out of range"));
//! assert_eq!(messages, vec!["value out of range".to_string()]);
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;

use log::warn;

thread_local! {
    static CAPTURES: RefCell<Vec<Vec<String>>> = const { RefCell::new(Vec::new()) };
}

/// Emits a warning.
pub fn emit(message: &str) {
    warn!("{message}");
    CAPTURES.with(|captures| {
        if let Some(current) = captures.borrow_mut().last_mut() {
            current.push(message.to_string());
        }
    });
}

/// Records the warnings emitted on the current thread while it is alive.
///
/// Captures nest; a warning is recorded only by the innermost one.
#[must_use = "warnings are only recorded while the capture is alive"]
pub struct WarningCapture {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl WarningCapture {
    /// Starts capturing on the current thread.
    pub fn start() -> Self {
        let depth = CAPTURES.with(|captures| {
            let mut captures = captures.borrow_mut();
            captures.push(Vec::new());
            captures.len()
        });
        Self {
            depth,
            _not_send: PhantomData,
        }
    }

    /// Warnings recorded so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        CAPTURES.with(|captures| {
            captures
                .borrow()
                .get(self.depth - 1)
                .cloned()
                .unwrap_or_default()
        })
    }

    /// Stops capturing and returns the recorded warnings.
    #[must_use]
    pub fn finish(self) -> Vec<String> {
        self.messages()
    }
}

impl Drop for WarningCapture {
    fn drop(&mut self) {
        CAPTURES.with(|captures| captures.borrow_mut().truncate(self.depth - 1));
    }
}

/// Runs `f` and returns its result together with the warnings it emitted.
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let capture = WarningCapture::start();
    let result = f();
    (result, capture.finish())
}
