use std::io::Write;

use fieldcmp_types::ComparisonResult;

use crate::error::ReportResult;

/// Renders a [`ComparisonResult`] for some audience.
///
/// Reporters are pure consumers: they never change the result.
pub trait Reporter {
    /// Render the whole result as a string.
    fn render(&self, result: &ComparisonResult) -> ReportResult<String>;

    /// Render the result and write it to `out`.
    fn write(&self, result: &ComparisonResult, out: &mut dyn Write) -> ReportResult<()> {
        let rendered = self.render(result)?;
        out.write_all(rendered.as_bytes())?;
        Ok(())
    }
}
