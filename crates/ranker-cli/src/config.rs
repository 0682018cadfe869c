//! CLI 설정.
//!
//! TOML 설정 파일과 `RANKER__` 접두사 환경 변수를 합쳐 [`AppConfig`]를 만듭니다.
//!
//! ```bash
//! RANKER__SCAN__TOP_N=10 RANKER__LOGGING__LEVEL=debug ranker rank --data-dir data
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use ranker_analytics::{ForecastParams, ScoringParams};
use ranker_core::{LoggingConfig, ScanConfig};

/// `--config`가 없을 때 찾는 설정 파일 (없어도 됨).
pub const DEFAULT_CONFIG_PATH: &str = "config/ranker.toml";

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "RANKER";

/// 전체 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub scan: ScanConfig,
    pub scoring: ScoringParams,
    pub forecast: ForecastParams,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// `path`를 지정하면 파일이 반드시 있어야 하고,
    /// 지정하지 않으면 [`DEFAULT_CONFIG_PATH`]가 있을 때만 읽습니다.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(p) => config::File::from(p),
            None => config::File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 기본 설정을 TOML 문자열로 출력합니다.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("ranker-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = temp_dir("partial");
        let path = dir.join("ranker.toml");
        fs::write(
            &path,
            r#"
[scan]
top_n = 3

[scoring.weights]
rsi = 0.5

[forecast]
z95 = 1.96
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.scan.top_n, 3);
        assert_eq!(config.scan.horizon_days, 14);
        assert_eq!(config.scoring.weights.rsi, 0.5);
        assert_eq!(config.scoring.weights.macd, 0.25);
        assert_eq!(config.forecast.z95, 1.96);
        assert_eq!(config.forecast.z80, 1.28);
        assert_eq!(config.logging.level, "info");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = temp_dir("missing").join("nope.toml");
        assert!(AppConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_default_toml_round_trips() {
        let dir = temp_dir("defaults");
        let path = dir.join("ranker.toml");
        fs::write(&path, AppConfig::default_toml().unwrap()).unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.scoring, ScoringParams::default());
        assert_eq!(config.forecast, ForecastParams::default());

        fs::remove_dir_all(dir).ok();
    }
}
