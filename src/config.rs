//! Inference options.

use serde::Deserialize;
use thiserror::Error;

/// How a junction table's many-to-many link is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManyToManyMode {
    /// One record, first referenced table to second.
    #[default]
    Single,
    /// Two records, one per direction.
    Directional,
}

impl ManyToManyMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single" | "bidirectional" => Some(Self::Single),
            "directional" | "both" => Some(Self::Directional),
            _ => None,
        }
    }
}

/// Turns the stem of a `<stem>_id` column into a candidate table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameVariant {
    Stem,
    Append(String),
    /// Only applies when the stem ends with the suffix.
    StripSuffix(String),
    /// Only applies when the stem ends with `from`.
    ReplaceSuffix { from: String, to: String },
}

impl NameVariant {
    /// `category` -> `categories`.
    pub fn english_ies() -> Self {
        Self::ReplaceSuffix {
            from: "y".into(),
            to: "ies".into(),
        }
    }

    /// Parse `from:to` into a suffix replacement.
    pub fn parse_replacement(spec: &str) -> Option<Self> {
        let (from, to) = spec.split_once(':')?;
        if from.is_empty() {
            return None;
        }
        Some(Self::ReplaceSuffix {
            from: from.to_lowercase(),
            to: to.to_lowercase(),
        })
    }

    pub fn apply(&self, stem: &str) -> Option<String> {
        match self {
            Self::Stem => Some(stem.to_string()),
            Self::Append(suffix) => Some(format!("{stem}{suffix}")),
            Self::StripSuffix(suffix) => stem
                .strip_suffix(suffix.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            Self::ReplaceSuffix { from, to } => stem
                .strip_suffix(from.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| format!("{s}{to}")),
        }
    }

    /// English plurals plus the Portuguese/Spanish `-a`/`-as` forms.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::Stem,
            Self::Append("s".into()),
            Self::Append("es".into()),
            Self::StripSuffix("s".into()),
            Self::Append("a".into()),
            Self::Append("as".into()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub many_to_many: ManyToManyMode,
    pub name_variants: Vec<NameVariant>,
    /// Run the naming-convention pass.
    pub infer_conventions: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            many_to_many: ManyToManyMode::Single,
            name_variants: NameVariant::defaults(),
            infer_conventions: true,
        }
    }
}

impl InferenceConfig {
    /// Candidate table names for `stem`, in variant order, without repeats.
    pub fn candidate_tables(&self, stem: &str) -> Vec<String> {
        let stem = stem.to_lowercase();
        let mut names: Vec<String> = Vec::new();
        for variant in &self.name_variants {
            if let Some(name) = variant.apply(&stem) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown many-to-many mode: {0}")]
    UnknownManyToManyMode(String),
    #[error("invalid suffix replacement (expected FROM:TO): {0}")]
    InvalidReplacement(String),
}

/// Settings as given by the CLI or the JS binding, before validation.
///
/// ```json
/// { "manyToMany": "directional", "suffixes": ["en"], "replaceSuffixes": ["y:ies"],
///   "conventions": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceOptions {
    pub many_to_many: Option<String>,
    /// Appended to `<stem>` on top of the default variants.
    pub suffixes: Vec<String>,
    pub replace_suffixes: Vec<String>,
    pub conventions: Option<bool>,
}

impl InferenceOptions {
    pub fn into_config(self) -> Result<InferenceConfig, ConfigError> {
        let mut config = InferenceConfig::default();

        if let Some(mode) = self.many_to_many {
            config.many_to_many = ManyToManyMode::from_str(&mode)
                .ok_or(ConfigError::UnknownManyToManyMode(mode))?;
        }
        for suffix in self.suffixes {
            config
                .name_variants
                .push(NameVariant::Append(suffix.to_lowercase()));
        }
        for spec in self.replace_suffixes {
            let variant = NameVariant::parse_replacement(&spec)
                .ok_or(ConfigError::InvalidReplacement(spec))?;
            config.name_variants.push(variant);
        }
        if let Some(conventions) = self.conventions {
            config.infer_conventions = conventions;
        }
        Ok(config)
    }
}
