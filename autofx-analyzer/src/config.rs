//! Optional per-package configuration (autofx.toml)

use crate::conformance::MatchMode;
use crate::constructors::PrefixConvention;
use crate::error::{AnalyzerError, AnalyzerResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the package directory
pub const FILE_NAME: &str = "autofx.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub analysis: AnalysisSettings,
    pub generate: GenerateSettings,
}

/// [analysis] section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    pub constructor_prefix: String,
    pub match_mode: MatchMode,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            constructor_prefix: PrefixConvention::default().0,
            match_mode: MatchMode::default(),
        }
    }
}

/// [generate] section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSettings {
    /// Module file path, relative to the package directory
    pub output: String,
    /// Generate into a separate package that imports the analysed one
    pub qualify_package: bool,
    /// Import path of the analysed package; required when qualifying
    pub import_path: Option<String>,
    /// Package clause of a qualified module file, `<name>fx` when unset
    pub target_package: Option<String>,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            output: "module.go".to_string(),
            qualify_package: false,
            import_path: None,
            target_package: None,
        }
    }
}

impl AnalyzerConfig {
    /// Read `autofx.toml` from a package directory; defaults when absent
    pub fn load_from_directory(package_dir: &Path) -> AnalyzerResult<Self> {
        let config_path = package_dir.join(FILE_NAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            AnalyzerError::package_load(
                config_path.display().to_string(),
                format!("Failed to read configuration: {e}"),
            )
        })?;

        Self::from_toml_str(&content).map_err(|reason| {
            AnalyzerError::package_load(config_path.display().to_string(), reason)
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid configuration: {e}"))
    }

    pub fn convention(&self) -> PrefixConvention {
        PrefixConvention::new(self.analysis.constructor_prefix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AnalyzerConfig::from_toml_str("").unwrap();

        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.analysis.constructor_prefix, "New");
        assert_eq!(config.generate.output, "module.go");
    }

    #[test]
    fn test_partial_sections() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
[analysis]
match_mode = "multiset"

[generate]
qualify_package = true
import_path = "github.com/acme/app/example"
"#,
        )
        .unwrap();

        assert_eq!(config.analysis.match_mode, MatchMode::Multiset);
        assert_eq!(config.analysis.constructor_prefix, "New");
        assert!(config.generate.qualify_package);
        assert_eq!(
            config.generate.import_path.as_deref(),
            Some("github.com/acme/app/example")
        );
        assert_eq!(config.generate.target_package, None);
        assert_eq!(config.generate.output, "module.go");
    }

    #[test]
    fn test_unknown_match_mode_rejected() {
        let error = AnalyzerConfig::from_toml_str("[analysis]\nmatch_mode = \"fuzzy\"\n").unwrap_err();
        assert!(error.starts_with("Invalid configuration"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalyzerConfig::load_from_directory(dir.path()).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_malformed_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FILE_NAME), "[analysis\n").unwrap();

        let error = AnalyzerConfig::load_from_directory(dir.path()).unwrap_err();
        assert!(error.is_load_failure());
    }
}
