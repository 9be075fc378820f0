use tracing::debug;

use fieldcmp_diff::{ComparisonOptions, DiffEngine};
use fieldcmp_inspect::Inspect;
use fieldcmp_types::ComparisonResult;
use fieldcmp_walk::walk;

use crate::config::ComparisonConfig;
use crate::error::ConfigResult;

/// Case name used by [`StructuralComparator::compare`].
pub const DEFAULT_CASE_NAME: &str = "comparison";

/// Compares two values of possibly different types for structural
/// equivalence.
///
/// A comparator owns its options and keeps no state between calls, so one
/// instance can be shared freely across threads.
#[derive(Clone, Debug, Default)]
pub struct StructuralComparator {
    options: ComparisonOptions,
}

impl StructuralComparator {
    pub fn new(options: ComparisonOptions) -> Self {
        Self { options }
    }

    /// Build a comparator from a loaded configuration.
    pub fn from_config(config: ComparisonConfig) -> ConfigResult<Self> {
        Ok(Self::new(config.into_options()?))
    }

    pub fn options(&self) -> &ComparisonOptions {
        &self.options
    }

    pub fn compare(&self, left: &dyn Inspect, right: &dyn Inspect) -> ComparisonResult {
        self.compare_named(DEFAULT_CASE_NAME, left, right)
    }

    /// Walk both values and diff them, labelling the result `case_name`.
    pub fn compare_named(
        &self,
        case_name: &str,
        left: &dyn Inspect,
        right: &dyn Inspect,
    ) -> ComparisonResult {
        let left = walk(left);
        let right = walk(right);
        debug!(
            case = case_name,
            left_fields = left.len(),
            right_fields = right.len(),
            "comparing"
        );

        let result = DiffEngine::new(&self.options).compare(case_name, left, right);
        debug!(
            case = case_name,
            has_diff = result.has_diff,
            differences = result.len(),
            "comparison finished"
        );
        result
    }
}

/// One-off comparison with the given options.
pub fn compare(
    left: &dyn Inspect,
    right: &dyn Inspect,
    options: &ComparisonOptions,
) -> ComparisonResult {
    let result = DiffEngine::new(options).compare(DEFAULT_CASE_NAME, walk(left), walk(right));
    debug!(differences = result.len(), "comparison finished");
    result
}
