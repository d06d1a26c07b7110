//! Fund NAV collector.
//!
//! 이 crate는 펀드 NAV를 주기적으로 수집하는 바이너리를 제공합니다:
//! - 종목 카탈로그 조회
//! - 종목별 NAV 이력 조회 및 측정 포인트 변환
//! - InfluxDB 배치 쓰기
//! - 취소 가능한 데몬 루프

pub mod config;
pub mod daemon;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use daemon::run_daemon;
pub use error::{CollectorError, Result};
pub use modules::NavCollector;
pub use stats::CollectionStats;
