//! Run provenance attached to every output file.

/// `strftime` pattern of the run timestamp, e.g. `Friday, Oct 16, 2026 09:14:03`.
pub const TIMESTAMP_FORMAT: &str = "%A, %b %d, %Y %H:%M:%S";

/// Provenance of one sweep. Fixed at construction.
///
/// The parameter spec as given is stored as `parameter_spec` so that it
/// cannot be confused with the `parameters` dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    timestamp: String,
    model: String,
    parameter_spec: String,
    knum: usize,
    command: String,
}

impl RunMetadata {
    /// Metadata stamped with the current local time.
    pub fn new(
        model: impl Into<String>,
        parameter_spec: impl Into<String>,
        knum: usize,
        command: impl Into<String>,
    ) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_timestamp(timestamp, model, parameter_spec, knum, command)
    }

    pub fn with_timestamp(
        timestamp: impl Into<String>,
        model: impl Into<String>,
        parameter_spec: impl Into<String>,
        knum: usize,
        command: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            model: model.into(),
            parameter_spec: parameter_spec.into(),
            knum,
            command: command.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn parameter_spec(&self) -> &str {
        &self.parameter_spec
    }

    pub fn knum(&self) -> usize {
        self.knum
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// `(name, value)` pairs in output order.
    pub fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("timestamp", self.timestamp.clone()),
            ("model", self.model.clone()),
            ("parameter_spec", self.parameter_spec.clone()),
            ("knum", self.knum.to_string()),
            ("command", self.command.clone()),
        ]
    }
}
