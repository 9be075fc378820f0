use std::fmt::Write as _;

use fieldcmp_types::ComparisonResult;

use crate::error::ReportResult;
use crate::reporter::Reporter;

/// One line per difference, suited to logs and CI output.
#[derive(Clone, Copy, Debug, Default)]
pub struct SummaryReporter;

impl Reporter for SummaryReporter {
    fn render(&self, result: &ComparisonResult) -> ReportResult<String> {
        let mut out = String::new();
        if !result.has_diff {
            let _ = writeln!(out, "{}: no differences", result.case_name);
            return Ok(out);
        }
        let _ = writeln!(out, "{}: {} difference(s)", result.case_name, result.len());
        for diff in &result.differences {
            let path = diff.path().map(|p| p.as_str()).unwrap_or_default();
            let _ = writeln!(out, "  {:<11} {:<24} {}", diff.kind.as_str(), path, diff.message);
        }
        Ok(out)
    }
}
