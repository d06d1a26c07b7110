//! 에러 타입 정의.

use fund_data::DataError;
use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 데이터 수집/저장 에러
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 로깅 초기화 에러
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
