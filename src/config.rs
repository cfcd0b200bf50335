//! Pipeline options.
//!
//! Options only affect diagnostics; they never change what a query returns.

/// Options attached to a [`Pipeline`](crate::Pipeline) at construction time.
///
/// ```
/// use ironquery::{Pipeline, PipelineOptions};
///
/// let p = Pipeline::with_options(PipelineOptions::default().name("orders").trace_stages(true));
/// assert_eq!(p.options().name, "orders");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Name attached to every log span emitted for this pipeline.
    pub name: String,
    /// Emit a `trace` event with input and output sizes whenever a blocking
    /// stage materializes.
    pub trace_stages: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            name: "pipeline".to_string(),
            trace_stages: false,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn trace_stages(mut self, on: bool) -> Self {
        self.trace_stages = on;
        self
    }
}
