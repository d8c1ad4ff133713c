//! Warning sink handed to the generator.
use std::cell::RefCell;

pub trait Logger {
    fn warn(&self, message: &str);
}

/// Forwards every warning to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "json_example", "{message}");
    }
}

/// Keeps a copy of every warning (and still forwards it to `tracing`).
#[derive(Debug, Default)]
pub struct RecordingLogger {
    warnings: RefCell<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.warnings.borrow().len()
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, message: &str) {
        TracingLogger.warn(message);
        self.warnings.borrow_mut().push(message.to_string());
    }
}
