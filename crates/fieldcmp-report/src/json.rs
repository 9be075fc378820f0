use fieldcmp_types::ComparisonResult;

use crate::error::ReportResult;
use crate::reporter::Reporter;

/// Full result as JSON, for tooling.
#[derive(Clone, Debug, Default)]
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Reporter for JsonReporter {
    fn render(&self, result: &ComparisonResult) -> ReportResult<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(rendered)
    }
}
