//! 펀드 카탈로그/NAV 이력 API 클라이언트.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use fund_data::provider::{FetcherConfig, FundApiClient, FundApiConfig, HttpFetcher};
//!
//! let fetcher = HttpFetcher::new(FetcherConfig::default())?;
//! let client = FundApiClient::new(fetcher, FundApiConfig::default());
//!
//! let funds = client.fetch_catalog().await?;
//! let history = client.fetch_history(&funds[0]).await?;
//! ```

use super::catalog::parse_catalog;
use super::history::{cache_buster, ensure_success, history_url, parse_history, DEFAULT_PAGE_SIZE};
use super::http::HttpFetcher;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use chrono::Utc;
use fund_core::{HistoryResponse, InstrumentRecord};

/// 기본 카탈로그 URL.
pub const DEFAULT_CATALOG_URL: &str = "http://fund.eastmoney.com/js/fundcode_search.js";

/// 기본 NAV 이력 URL.
pub const DEFAULT_HISTORY_URL: &str = "http://api.fund.eastmoney.com/f10/lsjz";

/// 펀드 데이터 Provider trait.
#[async_trait]
pub trait FundDataProvider: Send + Sync {
    /// 전체 종목 카탈로그 조회.
    async fn fetch_catalog(&self) -> Result<Vec<InstrumentRecord>>;

    /// 종목 하나의 최근 NAV 이력 조회.
    ///
    /// API가 오류 코드를 반환하면 [`DataError::Api`]를 반환합니다.
    async fn fetch_history(&self, fund: &InstrumentRecord) -> Result<HistoryResponse>;
}

/// API 엔드포인트 설정.
#[derive(Debug, Clone)]
pub struct FundApiConfig {
    /// 카탈로그 URL
    pub catalog_url: String,
    /// NAV 이력 URL (쿼리 제외)
    pub history_url: String,
    /// 이력 페이지 크기
    pub page_size: u32,
}

impl Default for FundApiConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            history_url: DEFAULT_HISTORY_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// HTTP 기반 펀드 API 클라이언트.
#[derive(Debug, Clone)]
pub struct FundApiClient {
    fetcher: HttpFetcher,
    config: FundApiConfig,
}

impl FundApiClient {
    pub fn new(fetcher: HttpFetcher, config: FundApiConfig) -> Self {
        Self { fetcher, config }
    }
}

#[async_trait]
impl FundDataProvider for FundApiClient {
    async fn fetch_catalog(&self) -> Result<Vec<InstrumentRecord>> {
        let body = self.fetcher.get_text(&self.config.catalog_url).await?;
        tracing::debug!(bytes = body.len(), "카탈로그 응답 수신");

        let funds = parse_catalog(&body)?;
        tracing::info!(count = funds.len(), "펀드 카탈로그 조회 완료");

        Ok(funds)
    }

    async fn fetch_history(&self, fund: &InstrumentRecord) -> Result<HistoryResponse> {
        if fund.code.is_empty() {
            return Err(DataError::InvalidData("empty fund code".to_string()));
        }

        let url = history_url(
            &self.config.history_url,
            &fund.code,
            self.config.page_size,
            cache_buster(Utc::now()),
        )?;

        let body = self.fetcher.get_text(url.as_str()).await?;
        tracing::debug!(code = %fund.code, name = %fund.name, "NAV 이력 응답 수신");

        let response = ensure_success(parse_history(&body)?)?;
        tracing::debug!(
            code = %fund.code,
            records = response.records().len(),
            total_count = response.total_count,
            "NAV 이력 파싱 완료"
        );

        Ok(response)
    }
}
