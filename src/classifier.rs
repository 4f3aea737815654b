use crate::config::keywords::KeywordConfig;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Matched rule category, `None` for the default greeting.
    pub category: Option<String>,
    pub response: String,
    pub is_emergency: bool,
}

/// Local, kids-mode keyword lookup. Never consulted for server dispatch.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    config: Arc<KeywordConfig>,
}

impl KeywordClassifier {
    pub fn new(config: Arc<KeywordConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeywordConfig {
        &self.config
    }

    pub fn is_emergency(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.config.emergency_check.iter().any(|keyword| lower.contains(keyword.as_str()))
    }

    pub fn classify(&self, text: &str) -> Classification {
        let lower = text.to_lowercase();

        if self.is_emergency(&lower) {
            if let Ok(rule) = self.config.rule(crate::config::keywords::EMERGENCY) {
                return Classification {
                    category: Some(rule.category.clone()),
                    response: rule.response.clone(),
                    is_emergency: true,
                };
            }
        }

        // A rule hit here is never flagged, even for the emergency category.
        if let Some(rule) = self.config.rules.iter().find(|rule| rule.matches(&lower)) {
            return Classification {
                category: Some(rule.category.clone()),
                response: rule.response.clone(),
                is_emergency: false,
            };
        }

        Classification {
            category: None,
            response: self.config.default_response.clone(),
            is_emergency: false,
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(Arc::new(KeywordConfig::default()))
    }
}
