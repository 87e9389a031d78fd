//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the taxdoc pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxdocConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Advice generation configuration.
    pub advice: AdviceConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try to extract embedded text before falling back to OCR.
    pub prefer_embedded_text: bool,

    /// Minimum text length to consider PDF as text-based.
    pub min_text_length: usize,

    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            prefer_embedded_text: true,
            min_text_length: 50,
            max_pages: 10,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Below this score the extraction is flagged as low confidence.
    pub low_confidence: f32,

    /// At or above this score the extraction counts as high confidence.
    pub high_confidence: f32,

    /// Apply the fallback estimation rules after keyword extraction.
    pub apply_fallbacks: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            low_confidence: 0.5,
            high_confidence: 0.8,
            apply_fallbacks: true,
        }
    }
}

/// Advice generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,

    /// Model name sent with each request.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Minimum seconds between successful calls.
    pub cooldown_secs: u64,

    /// Seconds a cached response stays valid.
    pub cache_ttl_secs: u64,

    /// Maximum number of cached responses.
    pub cache_capacity: usize,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.perplexity.ai/chat/completions".to_string(),
            model: "sonar".to_string(),
            api_key_env: "PERPLEXITY_API_KEY".to_string(),
            cooldown_secs: 60,
            cache_ttl_secs: 3600,
            cache_capacity: 32,
        }
    }
}

impl TaxdocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = ExtractionConfig::default();
        assert!(config.low_confidence < config.high_confidence);
        assert!(config.apply_fallbacks);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = TaxdocConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: TaxdocConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.advice.cooldown_secs, config.advice.cooldown_secs);
        assert_eq!(back.pdf.min_text_length, config.pdf.min_text_length);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TaxdocConfig =
            serde_json::from_str(r#"{"extraction":{"low_confidence":0.3}}"#).unwrap();
        assert_eq!(config.extraction.low_confidence, 0.3);
        assert_eq!(config.extraction.high_confidence, 0.8);
        assert_eq!(config.advice.cooldown_secs, 60);
    }
}
