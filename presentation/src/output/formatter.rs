//! Output formatter trait

use debate_domain::{DebateResult, OutputFormat};

/// Trait for formatting debate results
pub trait OutputFormatter {
    /// Format every round in detail
    fn format(&self, result: &DebateResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &DebateResult) -> String;

    /// Format the winner, scores and rationale only
    fn format_summary(&self, result: &DebateResult) -> String;

    /// Dispatch on the selected format
    fn render(&self, result: &DebateResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(result),
            OutputFormat::Summary => self.format_summary(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
