//! # Fund Core
//!
//! 펀드 NAV 수집기의 핵심 도메인 타입을 제공합니다:
//! - 종목 카탈로그 레코드 (`InstrumentRecord`)
//! - NAV 이력 API 응답 (`HistoryResponse`, `HistoryPoint`)
//! - 시계열 측정 포인트 (`MeasurementPoint`, `BatchPoints`)
//! - 로깅 초기화

pub mod domain;
pub mod logging;

pub use domain::*;
pub use logging::*;
