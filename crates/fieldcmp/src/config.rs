use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fieldcmp_diff::{numeric, string_form, time_tolerance, ComparisonOptions, CustomTypeComparer};
use fieldcmp_mapping::FieldMapping;

use crate::error::{ConfigError, ConfigResult};

/// Comparator settings as read from a TOML or JSON file.
///
/// ```toml
/// pointer_agnostic = true
/// ignore_fields = ["UpdatedAt"]
///
/// [[field_mappings]]
/// source = "Items[].Qty"
/// target = "Lines[].Quantity"
///
/// [[comparers]]
/// name = "clock"
/// kind = "time_tolerance"
/// types = ["DateTime<Utc>", "String"]
/// tolerance_secs = 60
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    #[serde(alias = "FieldMappings")]
    pub field_mappings: Vec<MappingEntry>,
    #[serde(alias = "PointerAgnosticMode", alias = "IgnorePointerValueDiff")]
    pub pointer_agnostic: bool,
    #[serde(alias = "IgnoreFields")]
    pub ignore_fields: Vec<String>,
    #[serde(alias = "CustomTypeComparers")]
    pub comparers: Vec<ComparerEntry>,
}

/// One `source -> target` rename, validated when the options are built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    #[serde(alias = "SourcePath", alias = "source_path")]
    pub source: String,
    #[serde(alias = "TargetPath", alias = "target_path")]
    pub target: String,
}

/// One built-in comparer registered under `name`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparerEntry {
    pub name: String,
    pub types: Vec<String>,
    /// Overrides the comparer's own cross-type default when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_cross_type: Option<bool>,
    #[serde(flatten)]
    pub kind: ComparerKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparerKind {
    TimeTolerance { tolerance_secs: f64 },
    Numeric,
    StringForm,
}

impl ComparisonConfig {
    /// Load a config file. `.json` files are parsed as JSON, anything else
    /// as TOML.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), json = is_json, "loading comparison config");

        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the config and build the options it describes.
    pub fn into_options(self) -> ConfigResult<ComparisonOptions> {
        let mut options = ComparisonOptions::new().with_pointer_agnostic(self.pointer_agnostic);

        for entry in &self.field_mappings {
            options = options.with_mapping(FieldMapping::new(&entry.source, &entry.target)?);
        }
        options.ignore_fields = self.ignore_fields.into_iter().collect::<BTreeSet<_>>();

        for entry in self.comparers {
            if options.custom_comparers.get(&entry.name).is_some() {
                return Err(ConfigError::InvalidComparer(format!(
                    "duplicate comparer name '{}'",
                    entry.name
                )));
            }
            let name = entry.name.clone();
            let comparer = entry.build()?;
            options.custom_comparers.register(name, comparer);
        }

        debug!(
            mappings = options.field_mappings.len(),
            comparers = options.custom_comparers.len(),
            ignored = options.ignore_fields.len(),
            pointer_agnostic = options.pointer_agnostic,
            "built comparison options"
        );
        Ok(options)
    }
}

impl ComparerEntry {
    fn build(self) -> ConfigResult<CustomTypeComparer> {
        if self.types.is_empty() {
            return Err(ConfigError::InvalidComparer(format!(
                "comparer '{}' lists no types",
                self.name
            )));
        }

        let comparer = match self.kind {
            ComparerKind::TimeTolerance { tolerance_secs } => {
                let tolerance = Duration::try_from_secs_f64(tolerance_secs).map_err(|_| {
                    ConfigError::InvalidComparer(format!(
                        "comparer '{}' has invalid tolerance {}",
                        self.name, tolerance_secs
                    ))
                })?;
                time_tolerance(self.types, tolerance)
            }
            ComparerKind::Numeric => numeric(self.types),
            ComparerKind::StringForm => string_form(self.types),
        };

        Ok(match self.allow_cross_type {
            Some(allow) => comparer.with_cross_type(allow),
            None => comparer,
        })
    }
}
