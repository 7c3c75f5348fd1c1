//! Organizer configuration: output names and engine-config loading.

use std::path::Path;

use coursemap_engine::EngineConfig;

use crate::error::Result;

/// Default output file for serialized degree requirements.
pub const DEGREES_FILE: &str = "degrees";

/// Default output file for the group/elective registry.
pub const GROUPS_FILE: &str = "groups";

/// Wrap width for free-text diagnostics in the report.
pub const REPORT_WRAP_WIDTH: usize = 100;

/// Load the engine configuration from a YAML file, or defaults when no
/// path is given. Course-code patterns and match cutoffs vary per catalog
/// vendor, so deployments override them per school.
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_yaml_ng::from_str(&text)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_without_path() {
        let config = load_engine_config(None).unwrap();
        assert_eq!(config.similarity_cutoff, 70);
    }

    #[test]
    fn test_load_config_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "similarity_cutoff: 85").unwrap();
        writeln!(file, "dept_pattern: \"[A-Z]{{2,5}}\"").unwrap();

        let config = load_engine_config(Some(file.path())).unwrap();
        assert_eq!(config.similarity_cutoff, 85);
        assert_eq!(config.dept_pattern, "[A-Z]{2,5}");
        // Unspecified fields keep their defaults.
        assert_eq!(config.varies_max_credits, 120.0);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let result = load_engine_config(Some(Path::new("/nonexistent/config.yaml")));
        assert!(result.is_err());
    }
}
