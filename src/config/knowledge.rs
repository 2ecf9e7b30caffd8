//! Swappable data files: FAQ catalog, intent rules, response templates

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::domain::foundation::ValidationError;
use crate::domain::intent::{ResponseGenerator, RuleBasedIntentClassifier};
use crate::domain::knowledge::KnowledgeBase;

/// Paths to YAML data files. Any path left unset uses the built-in data.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct KnowledgeConfig {
    /// YAML file with `entries: [{question, answer}]`
    pub faq_catalog_path: Option<PathBuf>,

    /// YAML file with `rules: [{intent, triggers}]`, in priority order
    pub intent_rules_path: Option<PathBuf>,

    /// YAML file overriding some or all response templates
    pub responses_path: Option<PathBuf>,
}

impl KnowledgeConfig {
    /// Load the FAQ catalog
    pub fn load_catalog(&self) -> Result<KnowledgeBase, ConfigError> {
        match &self.faq_catalog_path {
            Some(path) => parse_file(path, KnowledgeBase::from_yaml),
            None => Ok(KnowledgeBase::default()),
        }
    }

    /// Load the intent classifier rules
    pub fn load_classifier(&self) -> Result<RuleBasedIntentClassifier, ConfigError> {
        match &self.intent_rules_path {
            Some(path) => parse_file(path, RuleBasedIntentClassifier::from_yaml),
            None => Ok(RuleBasedIntentClassifier::default()),
        }
    }

    /// Load the response templates
    pub fn load_responses(&self) -> Result<ResponseGenerator, ConfigError> {
        match &self.responses_path {
            Some(path) => parse_file(path, ResponseGenerator::from_yaml),
            None => Ok(ResponseGenerator::default()),
        }
    }
}

fn parse_file<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse(&contents).map_err(|source| ConfigError::Data {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded assistant data file");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::{Intent, IntentClassifier};
    use std::io::Write;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_use_builtin_data() {
        let config = KnowledgeConfig::default();
        assert_eq!(config.load_catalog().unwrap().len(), 6);
        assert_eq!(config.load_classifier().unwrap().rules().len(), 4);
        assert_eq!(config.load_responses().unwrap(), ResponseGenerator::default());
    }

    #[test]
    fn test_loads_catalog_file() {
        let file = yaml_file("entries:\n  - question: \"Q1\"\n    answer: \"A1\"\n");
        let config = KnowledgeConfig {
            faq_catalog_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries(None)[0].answer(), "A1");
    }

    #[test]
    fn test_loads_rules_file() {
        let file = yaml_file("rules:\n  - intent: refund_request\n    triggers: [\"chargeback\"]\n");
        let config = KnowledgeConfig {
            intent_rules_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let classifier = config.load_classifier().unwrap();
        assert_eq!(classifier.classify("Chargeback!"), Intent::RefundRequest);
        assert_eq!(classifier.classify("password"), Intent::Unknown);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let config = KnowledgeConfig {
            responses_path: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..Default::default()
        };
        assert!(matches!(config.load_responses(), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_data_names_the_file() {
        let file = yaml_file("entries: []\n");
        let config = KnowledgeConfig {
            faq_catalog_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        match config.load_catalog() {
            Err(ConfigError::Data { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected data error, got {:?}", other.map(|kb| kb.len())),
        }
    }
}
