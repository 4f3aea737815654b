use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use log::info;

pub const EMERGENCY: &str = "emergency";
pub const SAFETY: &str = "safety";
pub const POLICE: &str = "police";

const EMERGENCY_RESPONSE: &str =
    "🚨 Remember: If you need help, call 911! This number will connect you to police, fire, or ambulance services. Always tell them your name and where you are!";
const SAFETY_RESPONSE: &str =
    "🛡️ Safety Tips:\n1. Always stay with a trusted adult\n2. Never talk to strangers\n3. Know your address and phone number\n4. If you feel unsafe, tell someone you trust!";
const POLICE_RESPONSE: &str =
    "👮 Police officers are your friends! They help keep everyone safe and protect our community. If you need help, you can always ask a police officer!";
const DEFAULT_GREETING: &str =
    "Hi there! 👋 I'm your police friend! What would you like to learn about today? You can ask me about safety tips, emergency numbers, or anything else!";

#[derive(Debug)]
pub enum KeywordError {
    CategoryNotFound(String),
    EmptyKeyword(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl fmt::Display for KeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordError::CategoryNotFound(key) => write!(f, "Keyword category '{}' not found", key),
            KeywordError::EmptyKeyword(key) =>
                write!(f, "Keyword category '{}' contains an empty keyword", key),
            KeywordError::IoError(e) => write!(f, "Keyword file IO error: {}", e),
            KeywordError::JsonError(e) => write!(f, "Keyword JSON parsing error: {}", e),
        }
    }
}

impl Error for KeywordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KeywordError::IoError(e) => Some(e),
            KeywordError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KeywordError {
    fn from(err: std::io::Error) -> Self {
        KeywordError::IoError(err)
    }
}

impl From<serde_json::Error> for KeywordError {
    fn from(err: serde_json::Error) -> Self {
        KeywordError::JsonError(err)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: String,
    pub keywords: Vec<String>,
    pub response: String,
}

impl KeywordRule {
    fn new(category: &str, keywords: &[&str], response: &str) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords
                .iter()
                .map(|k| k.to_string())
                .collect(),
            response: response.to_string(),
        }
    }

    /// `lower_text` must already be lowercased.
    pub fn matches(&self, lower_text: &str) -> bool {
        self.keywords.iter().any(|keyword| lower_text.contains(keyword.as_str()))
    }
}

/// Kids-mode keyword table. Rules are checked in order; `emergency_check` is the
/// priority override evaluated before any rule.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeywordConfig {
    pub rules: Vec<KeywordRule>,
    pub emergency_check: Vec<String>,
    pub default_response: String,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                KeywordRule::new(EMERGENCY, &["emergency", "help", "danger", "911"], EMERGENCY_RESPONSE),
                KeywordRule::new(SAFETY, &["safety", "safe", "danger", "stranger"], SAFETY_RESPONSE),
                KeywordRule::new(POLICE, &["police", "officer", "cop", "law"], POLICE_RESPONSE)
            ],
            emergency_check: vec!["emergency".into(), "help".into(), "danger".into()],
            default_response: DEFAULT_GREETING.to_string(),
        }
    }
}

impl KeywordConfig {
    pub fn rule(&self, category: &str) -> Result<&KeywordRule, KeywordError> {
        self.rules
            .iter()
            .find(|rule| rule.category == category)
            .ok_or_else(|| KeywordError::CategoryNotFound(category.to_string()))
    }

    /// Keywords are matched against lowercased text, so they are lowercased here once.
    fn normalize(mut self) -> Self {
        for rule in &mut self.rules {
            for keyword in &mut rule.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        for keyword in &mut self.emergency_check {
            *keyword = keyword.to_lowercase();
        }
        self
    }

    fn validate(&self) -> Result<(), KeywordError> {
        for category in [EMERGENCY, SAFETY] {
            self.rule(category)?;
        }
        for rule in &self.rules {
            if rule.keywords.iter().any(|k| k.is_empty()) {
                return Err(KeywordError::EmptyKeyword(rule.category.clone()));
            }
        }
        if self.emergency_check.iter().any(|k| k.is_empty()) {
            return Err(KeywordError::EmptyKeyword("emergency_check".to_string()));
        }
        Ok(())
    }
}

pub fn load_keywords<P: AsRef<Path>>(path: P) -> Result<Arc<KeywordConfig>, KeywordError> {
    let path = path.as_ref();
    let file_content = fs::read_to_string(path)?;
    let config: KeywordConfig = serde_json::from_str(&file_content)?;
    let config = config.normalize();
    config.validate()?;
    info!("Loaded {} keyword rules from {}", config.rules.len(), path.display());
    Ok(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_table_is_ordered() {
        let config = KeywordConfig::default();
        let categories: Vec<_> = config.rules
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(categories, vec![EMERGENCY, SAFETY, POLICE]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_and_lowercases_keywords() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "rules": [
                    {{"category": "emergency", "keywords": ["SOS"], "response": "Call 911"}},
                    {{"category": "safety", "keywords": ["Safe"], "response": "Stay safe"}}
                ],
                "emergency_check": ["SOS"],
                "default_response": "Hello"
            }}"#
        ).unwrap();

        let config = load_keywords(file.path()).unwrap();
        assert_eq!(config.rule(EMERGENCY).unwrap().keywords, vec!["sos"]);
        assert_eq!(config.emergency_check, vec!["sos"]);
        assert_eq!(config.default_response, "Hello");
    }

    #[test]
    fn rejects_missing_safety_category() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "rules": [{{"category": "emergency", "keywords": ["sos"], "response": "Call 911"}}],
                "emergency_check": [],
                "default_response": "Hello"
            }}"#
        ).unwrap();

        match load_keywords(file.path()) {
            Err(KeywordError::CategoryNotFound(category)) => assert_eq!(category, SAFETY),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_keywords("/nonexistent/keywords.json");
        assert!(matches!(result, Err(KeywordError::IoError(_))));
    }
}
