//! 환경변수 기반 설정 모듈.

use crate::error::CollectorError;
use crate::Result;
use fund_data::provider::{FetcherConfig, FundApiConfig};
use fund_data::storage::InfluxConfig;
use std::time::Duration;

/// Collector 전체 설정
#[derive(Debug, Clone, Default)]
pub struct CollectorConfig {
    /// 펀드 API 엔드포인트
    pub api: FundApiConfig,
    /// HTTP 요청 헤더 / 재시도
    pub http: FetcherConfig,
    /// InfluxDB 연결
    pub influx: InfluxConfig,
    /// NAV 수집 설정
    pub nav_collect: NavCollectConfig,
    /// 데몬 모드 설정
    pub daemon: DaemonConfig,
}

/// NAV 수집 설정
#[derive(Debug, Clone)]
pub struct NavCollectConfig {
    /// 종목 간 대기 시간 (밀리초)
    pub request_delay_ms: u64,
}

impl Default for NavCollectConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
        }
    }
}

/// 데몬 모드 설정
#[derive(Debug, Clone, Default)]
pub struct DaemonConfig {
    /// 사이클 사이 대기 시간 (초, 0이면 즉시 재시작)
    pub cycle_delay_secs: u64,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드 (`.env` 파일 포함)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로 설정 로드. 없는 키는 기본값을 사용합니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            api: FundApiConfig {
                catalog_url: lookup("CATALOG_URL").unwrap_or(defaults.api.catalog_url),
                history_url: lookup("HISTORY_URL").unwrap_or(defaults.api.history_url),
                page_size: parse_var(&lookup, "HISTORY_PAGE_SIZE", defaults.api.page_size)?,
            },
            http: FetcherConfig {
                referer: lookup("HTTP_REFERER").unwrap_or(defaults.http.referer),
                user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.http.user_agent),
                max_attempts: parse_var(
                    &lookup,
                    "HTTP_MAX_ATTEMPTS",
                    defaults.http.max_attempts,
                )?,
            },
            influx: InfluxConfig {
                url: lookup("INFLUX_URL").unwrap_or(defaults.influx.url),
                database: lookup("INFLUX_DATABASE").unwrap_or(defaults.influx.database),
                username: lookup("INFLUX_USERNAME").filter(|v| !v.is_empty()),
                password: lookup("INFLUX_PASSWORD").filter(|v| !v.is_empty()),
            },
            nav_collect: NavCollectConfig {
                request_delay_ms: parse_var(
                    &lookup,
                    "REQUEST_DELAY_MS",
                    defaults.nav_collect.request_delay_ms,
                )?,
            },
            daemon: DaemonConfig {
                cycle_delay_secs: parse_var(
                    &lookup,
                    "DAEMON_CYCLE_DELAY_SECS",
                    defaults.daemon.cycle_delay_secs,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<()> {
        for (key, url) in [
            ("CATALOG_URL", &self.api.catalog_url),
            ("HISTORY_URL", &self.api.history_url),
            ("INFLUX_URL", &self.influx.url),
        ] {
            reqwest::Url::parse(url).map_err(|e| {
                CollectorError::Config(format!("{} 형식이 잘못되었습니다: {} ({})", key, url, e))
            })?;
        }

        if self.api.page_size == 0 {
            return Err(CollectorError::Config(
                "HISTORY_PAGE_SIZE는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.http.max_attempts == 0 {
            return Err(CollectorError::Config(
                "HTTP_MAX_ATTEMPTS는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.influx.database.is_empty() {
            return Err(CollectorError::Config(
                "INFLUX_DATABASE가 비어 있습니다".to_string(),
            ));
        }

        Ok(())
    }
}

impl NavCollectConfig {
    /// 종목 간 대기 시간을 Duration으로 반환
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl DaemonConfig {
    /// 사이클 사이 대기 시간을 Duration으로 반환
    pub fn cycle_delay(&self) -> Duration {
        Duration::from_secs(self.cycle_delay_secs)
    }
}

/// 값을 파싱 (없으면 기본값, 형식이 틀리면 설정 에러)
fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v.trim().parse().map_err(|_| {
            CollectorError::Config(format!("{} 값을 해석할 수 없습니다: {:?}", key, v))
        }),
        None => Ok(default),
    }
}
