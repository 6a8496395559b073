//! The channel through which parsers report recoverable anomalies.
//!
//! Fatal problems are never reported here: they are returned as errors.
//! A [`WarningSink`] is passed explicitly to each parse call,
//! so it is owned by the caller for the duration of the parse.

/// A consumer of warning messages.
pub trait WarningSink {
    fn warn(&mut self, message: &str);
}

impl<F: FnMut(&str)> WarningSink for F {
    fn warn(&mut self, message: &str) {
        self(message)
    }
}

/// Collect warnings as strings.
impl WarningSink for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_string())
    }
}

/// Forward warnings to the [`log`] facade, at the `warn` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWarnings;

impl WarningSink for LogWarnings {
    fn warn(&mut self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Discard all warnings.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreWarnings;

impl WarningSink for IgnoreWarnings {
    fn warn(&mut self, _message: &str) {}
}
