use serde::{Deserialize, Serialize};

use fieldcmp_types::FieldPath;

use crate::error::{MappingError, MappingResult};
use crate::pattern::WildcardPattern;

/// Rename rule applied to the right-hand field map before comparison.
///
/// `source` is matched against right-hand paths; a match is moved to
/// `target` with the captured indices substituted in order. Both patterns
/// must carry the same number of `[]` wildcards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldMapping", into = "RawFieldMapping")]
pub struct FieldMapping {
    source: WildcardPattern,
    target: WildcardPattern,
}

impl FieldMapping {
    pub fn new(source: &str, target: &str) -> MappingResult<Self> {
        let source = WildcardPattern::parse(source)?;
        let target = WildcardPattern::parse(target)?;
        if source.wildcard_count() != target.wildcard_count() {
            return Err(MappingError::WildcardCountMismatch {
                source_pattern: source.as_str().to_string(),
                source_count: source.wildcard_count(),
                target_pattern: target.as_str().to_string(),
                target_count: target.wildcard_count(),
            });
        }
        Ok(Self { source, target })
    }

    pub fn source(&self) -> &WildcardPattern {
        &self.source
    }

    pub fn target(&self) -> &WildcardPattern {
        &self.target
    }

    /// New location of `path` under this mapping, if the mapping applies.
    pub fn map_path(&self, path: &FieldPath) -> Option<FieldPath> {
        let indices = self.source.matches(path.as_str())?;
        self.target.substitute(&indices)
    }
}

/// Serialized form, accepting the historical `SourcePath`/`TargetPath` keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawFieldMapping {
    #[serde(alias = "SourcePath", alias = "source_path")]
    source: String,
    #[serde(alias = "TargetPath", alias = "target_path")]
    target: String,
}

impl TryFrom<RawFieldMapping> for FieldMapping {
    type Error = MappingError;

    fn try_from(raw: RawFieldMapping) -> Result<Self, Self::Error> {
        Self::new(&raw.source, &raw.target)
    }
}

impl From<FieldMapping> for RawFieldMapping {
    fn from(mapping: FieldMapping) -> Self {
        Self {
            source: mapping.source.as_str().to_string(),
            target: mapping.target.as_str().to_string(),
        }
    }
}
