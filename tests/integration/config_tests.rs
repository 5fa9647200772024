//! Configuration integration tests
//!
//! Load configuration from YAML files, validate it, and build gateways from it.

#[cfg(test)]
mod tests {
    use ai_control_plane::config::{
        Config, GatewayConfig, ProviderConfig, RateLimitConfig, SecurityFeatures, Validate,
    };
    use ai_control_plane::{Gateway, UserContext};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_YAML: &str = r#"
providers:
  - name: gemini
  - name: openai
    rate_limit:
      requests_per_minute: 5
      requests_per_hour: 100
      requests_per_day: 1000
rate_limit:
  requests_per_minute: 30
  requests_per_hour: 500
  requests_per_day: 5000
rate_limiter:
  enforce_daily_limit: true
security:
  pii_detection: false
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // ==================== Loading ====================

    #[tokio::test]
    async fn test_load_from_file() {
        let file = write_config(SAMPLE_YAML);
        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.providers().len(), 2);
        assert_eq!(config.rate_limit().requests_per_minute, 30);
        assert!(config.gateway.rate_limiter.enforce_daily_limit);
        assert!(!config.security().pii_detection);
        assert!(config.security().threat_detection);
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let result = Config::from_file("/nonexistent/gateway.yaml").await;
        assert!(result.unwrap_err().is_config_error());
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let file = write_config(
            r#"
providers:
  - name: gemini
    rate_limit:
      requests_per_minute: 100
      requests_per_hour: 10
"#,
        );

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Provider gemini"));
    }

    #[tokio::test]
    async fn test_gateway_from_loaded_config() {
        let file = write_config(SAMPLE_YAML);
        let config = Config::from_file(file.path()).await.unwrap();
        let gateway = Gateway::from_config(&config).unwrap();

        let limiter = gateway.rate_limiter();
        assert_eq!(limiter.config_for("gemini").requests_per_minute, 30);
        assert_eq!(limiter.config_for("openai").requests_per_minute, 5);
        assert_eq!(limiter.horizon(), std::time::Duration::from_secs(24 * 60 * 60));

        // PII rules are off in this config
        let verdict = gateway.assess_request_security("my password", &UserContext::anonymous());
        assert!(verdict.detected_threats.is_empty());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.security(), &SecurityFeatures::default());
    }

    // ==================== Validation ====================

    #[test]
    fn test_valid_gateway_config() {
        let config = GatewayConfig {
            providers: vec![ProviderConfig::new("gemini"), ProviderConfig::new("openai")],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_providers() {
        let config = GatewayConfig {
            providers: vec![ProviderConfig::new("gemini"), ProviderConfig::new("gemini")],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().contains("Duplicate"));
    }

    #[test]
    fn test_zero_minute_quota() {
        let config = GatewayConfig {
            rate_limit: RateLimitConfig::new(0, 10, 100),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().contains("Default rate limit"));
    }

    #[test]
    fn test_disabled_quota_skips_bounds() {
        let config = GatewayConfig {
            rate_limit: RateLimitConfig {
                enabled: false,
                ..RateLimitConfig::new(0, 0, 0)
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    // ==================== Serialization ====================

    #[test]
    fn test_yaml_round_trip() {
        let config = Config::from_yaml_str(SAMPLE_YAML).unwrap();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(Config::from_yaml_str(&yaml).unwrap(), config);

        let json = config.to_json().unwrap();
        assert!(json.contains("\"enforce_daily_limit\": true"));
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = Config::from_yaml_str(SAMPLE_YAML).unwrap();
        let mut overlay = Config::default();
        overlay.gateway.providers = vec![ProviderConfig::new("openai")];

        let merged = base.merge(overlay);
        let names: Vec<&str> = merged.providers().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["gemini", "openai"]);
        assert!(merged.providers()[1].rate_limit.is_none());
    }
}
