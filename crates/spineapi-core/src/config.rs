use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.spineapi.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpineConfig {
    /// Spec path used when the CLI gets no `--input`.
    pub input: String,
    pub inspect: InspectConfig,
    pub enhance: EnhanceConfig,
}

impl Default for SpineConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            inspect: InspectConfig::default(),
            enhance: EnhanceConfig::default(),
        }
    }
}

/// Defaults for `spineapi inspect`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    pub format: OutputFormat,
    /// Only list endpoints carrying this tag.
    pub tag: Option<String>,
}

/// Serialization used when dumping the IR summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Post-generation enhancement settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Program and arguments. Generated text is piped through its stdin.
    pub command: Option<Vec<String>>,
    /// File extensions (without the dot) that are passed to the enhancer.
    pub extensions: Vec<String>,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            command: None,
            extensions: vec!["py".to_string()],
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".spineapi.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SpineConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    // An empty file is a valid, all-defaults config.
    if content.trim().is_empty() {
        return Ok(Some(SpineConfig::default()));
    }
    let config: SpineConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# spineapi configuration
input: openapi.yaml

inspect:
  format: yaml          # yaml | json
  # tag: items          # only list endpoints with this tag

enhance:
  # command: [ruff, format, -]    # generated text is piped through stdin
  extensions: [py]
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpineConfig::default();
        assert_eq!(config.input, "openapi.yaml");
        assert_eq!(config.inspect.format, OutputFormat::Yaml);
        assert!(config.inspect.tag.is_none());
        assert!(config.enhance.command.is_none());
        assert_eq!(config.enhance.extensions, ["py"]);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: api/spec.json
inspect:
  format: json
  tag: items
enhance:
  command: [ruff, format, "-"]
  extensions: [py, pyi]
"#;
        let config: SpineConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api/spec.json");
        assert_eq!(config.inspect.format, OutputFormat::Json);
        assert_eq!(config.inspect.tag.as_deref(), Some("items"));
        assert_eq!(
            config.enhance.command,
            Some(vec!["ruff".to_string(), "format".to_string(), "-".to_string()])
        );
        assert_eq!(config.enhance.extensions, ["py", "pyi"]);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: SpineConfig = serde_yaml_ng::from_str("input: api.yaml\n").unwrap();
        assert_eq!(config.input, "api.yaml");
        assert_eq!(config.inspect, InspectConfig::default());
        assert_eq!(config.enhance, EnhanceConfig::default());
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config: SpineConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config, SpineConfig::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "inspect: [not, a, mapping]\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.starts_with("failed to parse config"));
        assert!(err.contains(CONFIG_FILE_NAME));
    }
}
