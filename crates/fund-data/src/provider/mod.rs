//! 데이터 Provider 모듈.
//!
//! ## HTTP
//! - `HttpFetcher`: 고정 헤더 + 호출당 3회 재시도 GET 클라이언트
//!
//! ## 펀드 API
//! - `catalog`: `var r = [[...]]` 형태의 종목 카탈로그 파서
//! - `history`: JSONP 형태의 NAV 이력 응답 파서, 요청 URL 생성
//! - `FundApiClient`: 위 구성요소를 묶은 `FundDataProvider` 구현

pub mod api;
pub mod catalog;
pub mod history;
pub mod http;

pub use api::{
    FundApiClient, FundApiConfig, FundDataProvider, DEFAULT_CATALOG_URL, DEFAULT_HISTORY_URL,
};
pub use catalog::parse_catalog;
pub use history::{ensure_success, history_url, parse_history, DEFAULT_PAGE_SIZE};
pub use http::{
    FetcherConfig, HttpFetcher, DEFAULT_MAX_ATTEMPTS, DEFAULT_REFERER, DEFAULT_USER_AGENT,
};
