//! 펀드 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - 고정 헤더와 재시도를 적용하는 HTTP 클라이언트
//! - 종목 카탈로그 / NAV 이력 응답 파서
//! - NAV 레코드 → 측정 포인트 변환 (숫자 필드 관용 파싱)
//! - InfluxDB 배치 쓰기 저장소

pub mod error;
pub mod normalize;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

pub use normalize::{build_point, build_points, parse_float, parse_nav_date};

pub use provider::{FetcherConfig, FundApiClient, FundApiConfig, FundDataProvider, HttpFetcher};

pub use storage::{write_points, InfluxConfig, InfluxSink, PointSink};
