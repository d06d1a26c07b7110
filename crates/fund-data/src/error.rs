//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 수집/저장 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 전송 오류 (재시도 소진 후)
    #[error("HTTP request error: url=[{url}], err=[{source}]")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 200이 아닌 HTTP 상태 코드 (재시도 소진 후)
    #[error("HTTP status error: code=[{status}], url=[{url}]")]
    HttpStatus { url: String, status: u16 },

    /// HTTP 클라이언트 생성 실패
    #[error("HTTP client build error: {0}")]
    ClientBuild(String),

    /// URL 생성/파싱 오류
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// 예상한 형태가 아닌 응답 본문
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// API가 보고한 오류 (재시도하지 않음)
    #[error("Fund API error: code=[{code}], msg=[{message}], index=[{page_index}], size=[{page_size}]")]
    Api {
        code: i64,
        message: String,
        page_index: i64,
        page_size: i64,
    },

    /// 날짜 파싱 실패
    #[error("Date parse error: {value:?}")]
    DateParse { value: String },

    /// 시계열 저장소 쓰기 실패
    #[error("Sink write error: {0}")]
    Sink(String),

    /// 잘못된 입력 데이터
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
