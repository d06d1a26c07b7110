//! 재시도를 포함한 HTTP GET 클라이언트.
//!
//! 펀드 API는 기본 User-Agent 요청을 거부하므로 모든 요청에
//! 브라우저 형태의 `User-Agent`와 고정 `Referer` 헤더를 붙입니다.
//! 전송 오류나 200이 아닌 응답은 지연 없이 즉시 재시도하며,
//! 호출마다 새 시도 횟수를 받습니다.

use crate::error::{DataError, Result};
use reqwest::header::{REFERER, USER_AGENT};
use reqwest::{StatusCode, Url};

/// 기본 Referer 헤더.
pub const DEFAULT_REFERER: &str = "http://fund.eastmoney.com/f10/jjjz_519961.html";

/// 기본 User-Agent 헤더.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36";

/// 호출당 기본 시도 횟수.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// HTTP 요청 설정.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// 모든 요청의 Referer 헤더
    pub referer: String,
    /// 모든 요청의 User-Agent 헤더
    pub user_agent: String,
    /// 호출당 최대 시도 횟수 (최소 1)
    pub max_attempts: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            referer: DEFAULT_REFERER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// 고정 헤더와 재시도를 적용하는 HTTP 클라이언트.
///
/// 내부 `reqwest::Client`는 프로세스 시작 시 한 번 생성되어 재사용됩니다.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// 새 HTTP 클라이언트를 생성합니다.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DataError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// GET 요청을 보내고 200 응답을 반환합니다.
    ///
    /// 최대 `max_attempts`번 시도하며, 모두 실패하면 마지막 오류를 반환합니다.
    /// 응답 본문은 호출자가 끝까지 읽어야 합니다.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let parsed =
            Url::parse(url).map_err(|e| DataError::InvalidUrl(format!("{} - {}", url, e)))?;
        let max_attempts = self.config.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;

            let err = match self
                .client
                .get(parsed.clone())
                .header(REFERER, self.config.referer.as_str())
                .header(USER_AGENT, self.config.user_agent.as_str())
                .send()
                .await
            {
                Ok(response) if response.status() == StatusCode::OK => return Ok(response),
                Ok(response) => DataError::HttpStatus {
                    url: url.to_string(),
                    status: response.status().as_u16(),
                },
                Err(e) => DataError::Http {
                    url: url.to_string(),
                    source: e,
                },
            };

            tracing::warn!(
                attempt = attempt,
                max_attempts = max_attempts,
                url = url,
                error = %err,
                "HTTP 요청 실패"
            );

            if attempt >= max_attempts {
                return Err(err);
            }
        }
    }

    /// GET 요청 후 응답 본문 전체를 문자열로 읽습니다.
    ///
    /// 본문 읽기 실패는 재시도하지 않습니다.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;

        response.text().await.map_err(|e| DataError::Http {
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.referer, DEFAULT_REFERER);
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_retried() {
        let fetcher = HttpFetcher::new(FetcherConfig::default()).unwrap();

        let err = fetcher.get("not a url").await.unwrap_err();
        assert!(matches!(err, DataError::InvalidUrl(_)));
    }
}
