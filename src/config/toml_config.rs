use crate::core::export::DEFAULT_TITLE;
use crate::core::sniffer::{DEFAULT_SAMPLE_BYTES, MAX_SAMPLE_BYTES, MIN_SAMPLE_BYTES};
use crate::core::ConfigProvider;
use crate::domain::vocabulary::{Vocabulary, VocabularyOverride};
use crate::utils::error::{PriceError, Result};
use crate::utils::validation::{
    validate_extension, validate_non_empty_string, validate_path, validate_range,
    validate_synonyms, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub vocabulary: VocabularyOverride,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(skip)]
    resolved_vocabulary: Vocabulary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub directory: String,
    pub marker: String,
    pub extension: String,
    pub sample_bytes: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            marker: "price".to_string(),
            extension: "csv".to_string(),
            sample_bytes: DEFAULT_SAMPLE_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "output.html".to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PriceError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| PriceError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.resolved_vocabulary = config.vocabulary.resolve();
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PriceError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("source.directory", &self.source.directory)?;
        validate_non_empty_string("source.marker", &self.source.marker)?;
        validate_extension("source.extension", &self.source.extension)?;
        validate_range(
            "source.sample_bytes",
            self.source.sample_bytes,
            MIN_SAMPLE_BYTES,
            MAX_SAMPLE_BYTES,
        )?;
        validate_path("export.output_path", &self.export.output_path)?;

        validate_synonyms("vocabulary.name", &self.resolved_vocabulary.name)?;
        validate_synonyms("vocabulary.price", &self.resolved_vocabulary.price)?;
        validate_synonyms("vocabulary.weight", &self.resolved_vocabulary.weight)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn prices_dir(&self) -> &str {
        &self.source.directory
    }

    fn file_marker(&self) -> &str {
        &self.source.marker
    }

    fn file_extension(&self) -> &str {
        &self.source.extension
    }

    fn sample_bytes(&self) -> usize {
        self.source.sample_bytes
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn export_title(&self) -> &str {
        &self.export.title
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.resolved_vocabulary
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
