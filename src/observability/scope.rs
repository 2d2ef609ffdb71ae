//! ObservationScope for begin/complete logging around batch work
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` when completed
//! - Logs `{name}_ERROR` when failed, or when dropped without completion

use std::time::Instant;

use super::logger::Logger;

/// A scope that logs its start and outcome
///
/// ```ignore
/// let scope = ObservationScope::with_fields("IMPORT", &[("file", "facteurs.json")]);
/// // ... do work ...
/// scope.complete_with_fields(&[("inserted", "42")]);
/// ```
///
/// Completion and failure events carry the scope's fields plus
/// `duration_ms`.
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: bool,
    fields: Vec<(&'a str, String)>,
    started: Instant,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a scope whose fields are repeated on every event it logs
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: false,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Logs `{name}_COMPLETE` at INFO level with extra fields
    pub fn complete_with_fields(mut self, extra_fields: &[(&str, &str)]) {
        self.completed = true;
        let duration = self.elapsed_ms();
        let mut all_fields = self.field_refs();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("duration_ms", duration.as_str()));
        Logger::info(&format!("{}_COMPLETE", self.name), &all_fields);
    }

    /// Logs `{name}_ERROR` at ERROR level
    pub fn fail(mut self, reason: &str) {
        self.completed = true;
        self.log_error(reason);
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    fn log_error(&self, reason: &str) {
        let duration = self.elapsed_ms();
        let mut all_fields = self.field_refs();
        all_fields.push(("reason", reason));
        all_fields.push(("duration_ms", duration.as_str()));
        Logger::error(&format!("{}_ERROR", self.name), &all_fields);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.log_error("scope dropped without completion");
        }
    }
}
