//! 共通設定管理モジュール

use serde::{Deserialize, Serialize};
use std::env;
use crate::error::{DrawingError, Result};

/// サーバー設定
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// バインドするホストアドレス
    pub host: String,

    /// ポート番号
    pub port: u16,

    /// ワーカースレッド数
    pub workers: Option<usize>,

    /// CORS許可オリジン
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 18090,
            workers: None,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// ロギング設定
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// ログレベル
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

/// ストア設定
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 起動時に読み込む描画のJSON配列ファイル
    pub seed_file: Option<String>,
}

/// アプリケーション設定
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// サーバー設定
    #[serde(default)]
    pub server: ServerConfig,

    /// ロギング設定
    #[serde(default)]
    pub logging: LoggingConfig,

    /// ストア設定
    #[serde(default)]
    pub store: StoreConfig,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    /// 設定を読み込む
    ///
    /// 読み込み優先順位：
    /// 1. 環境変数
    /// 2. 設定ファイル（CONFIG_FILE）
    /// 3. デフォルト値
    pub fn new() -> Result<Self> {
        let mut settings = Self::default();

        if let Ok(config_path) = env::var("CONFIG_FILE") {
            settings = Self::from_file(&config_path)?;
        }

        settings.override_from_env();

        Ok(settings)
    }

    /// 設定ファイルから読み込む
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DrawingError::Config(format!("Failed to read config file: {}", e)))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .map_err(|e| DrawingError::Config(format!("Failed to parse JSON config: {}", e)))
        } else if path.ends_with(".toml") {
            toml::from_str(&content)
                .map_err(|e| DrawingError::Config(format!("Failed to parse TOML config: {}", e)))
        } else if path.ends_with(".yaml") || path.ends_with(".yml") {
            serde_yaml::from_str(&content)
                .map_err(|e| DrawingError::Config(format!("Failed to parse YAML config: {}", e)))
        } else {
            Err(DrawingError::Config("Unsupported config file format".to_string()))
        }
    }

    /// 環境変数で設定を上書き
    fn override_from_env(&mut self) {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(workers) = env::var("WORKERS") {
            if let Ok(workers) = workers.parse() {
                self.server.workers = Some(workers);
            }
        }
        if let Ok(cors_origins) = env::var("CORS_ORIGINS") {
            self.server.cors_origins = cors_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .collect();
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.logging.level = log_level;
        }

        if let Ok(seed_file) = env::var("SEED_FILE") {
            self.store.seed_file = Some(seed_file);
        }
    }

    /// 設定を検証
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(DrawingError::Config("Invalid port number: 0".to_string()));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(DrawingError::Config(format!(
                "Unknown log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// 設定をファイルに保存
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| DrawingError::Config(format!("Failed to serialize to JSON: {}", e)))?
        } else if path.ends_with(".toml") {
            toml::to_string_pretty(self)
                .map_err(|e| DrawingError::Config(format!("Failed to serialize to TOML: {}", e)))?
        } else if path.ends_with(".yaml") || path.ends_with(".yml") {
            serde_yaml::to_string(self)
                .map_err(|e| DrawingError::Config(format!("Failed to serialize to YAML: {}", e)))?
        } else {
            return Err(DrawingError::Config("Unsupported config file format".to_string()));
        };

        std::fs::write(path, content)
            .map_err(|e| DrawingError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.store.seed_file.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.logging.level = "loud".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.logging.level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.server.port = 9999;
        settings.store.seed_file = Some("drawings.json".to_string());

        for ext in ["json", "toml", "yaml"] {
            let path = dir.path().join(format!("settings.{}", ext));
            let path = path.to_str().unwrap();
            settings.save_to_file(path).unwrap();

            let loaded = Settings::from_file(path).unwrap();
            assert_eq!(loaded.server.port, 9999);
            assert_eq!(loaded.store.seed_file.as_deref(), Some("drawings.json"));
        }
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let loaded = Settings::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.server.port, ServerConfig::default().port);
    }

    #[test]
    fn test_partial_section_keeps_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("port-only.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let loaded = Settings::from_file(path.to_str().unwrap()).unwrap();
        let defaults = ServerConfig::default();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.server.host, defaults.host);
        assert_eq!(loaded.server.cors_origins, defaults.cors_origins);
        assert_eq!(loaded.logging.level, "info");
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let settings = Settings::default();
        assert!(settings.save_to_file("/tmp/settings.ini").is_err());
        assert!(Settings::from_file("/tmp/does-not-exist.ini").is_err());
    }
}
