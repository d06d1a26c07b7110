//! 펀드 NAV 이력 응답 파서.
//!
//! 이력 엔드포인트는 JSONP 형태(`jQuer({...})`)로 응답합니다.
//! 첫 `{` 부터 JSON 값 하나만 디코딩하고 뒤따르는 문자는 무시합니다.

use crate::error::{DataError, Result};
use chrono::{DateTime, Utc};
use fund_core::HistoryResponse;
use rand::Rng;
use reqwest::Url;
use serde::Deserialize;

/// JSONP 콜백 이름.
pub const CALLBACK_NAME: &str = "jQuer";

/// 요청하는 페이지 번호 (첫 페이지만 조회).
pub const HISTORY_PAGE_INDEX: u32 = 1;

/// 기본 페이지 크기.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// 이력 응답 본문을 파싱합니다.
///
/// `ErrCode` 검사는 하지 않습니다. [`ensure_success`]를 사용하세요.
pub fn parse_history(body: &str) -> Result<HistoryResponse> {
    let start = body.find('{').ok_or_else(|| {
        DataError::MalformedResponse("이력 응답에 JSON 객체가 없습니다".to_string())
    })?;

    // Deserializer::end()를 호출하지 않으므로 JSON 값 뒤의 문자는 검사하지 않는다
    let mut de = serde_json::Deserializer::from_str(&body[start..]);
    let response = HistoryResponse::deserialize(&mut de)?;

    Ok(response)
}

/// API 오류 코드가 0이 아니면 재시도 불가 오류로 변환합니다.
pub fn ensure_success(response: HistoryResponse) -> Result<HistoryResponse> {
    if response.is_success() {
        return Ok(response);
    }

    Err(DataError::Api {
        code: response.err_code,
        message: response.err_msg,
        page_index: response.page_index,
        page_size: response.page_size,
    })
}

/// 이력 요청 URL을 생성합니다.
///
/// 날짜 범위는 비워 두며, `_` 파라미터는 캐시 방지용 타임스탬프입니다.
pub fn history_url(
    base_url: &str,
    fund_code: &str,
    page_size: u32,
    cache_buster: i64,
) -> Result<Url> {
    let page_index = HISTORY_PAGE_INDEX.to_string();
    let page_size = page_size.to_string();
    let cache_buster = cache_buster.to_string();

    Url::parse_with_params(
        base_url,
        &[
            ("callback", CALLBACK_NAME),
            ("fundCode", fund_code),
            ("pageIndex", page_index.as_str()),
            ("pageSize", page_size.as_str()),
            ("startDate", ""),
            ("endDate", ""),
            ("_", cache_buster.as_str()),
        ],
    )
    .map_err(|e| DataError::InvalidUrl(format!("{} - {}", base_url, e)))
}

/// 캐시 방지 타임스탬프 (밀리초).
///
/// 현재 시각 2초 전에서 0~999ms를 무작위로 뺀 값입니다.
pub fn cache_buster(now: DateTime<Utc>) -> i64 {
    let jitter: i64 = rand::thread_rng().gen_range(0..1000);
    (now.timestamp() - 2) * 1000 - jitter
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"jQuery123({"ErrCode":0,"ErrMsg":"","TotalCount":1,"Data":{"LSJZList":[{"FSRQ":"2024-01-02","DWJZ":"1.234","LJJZ":"2.345","JZZZL":"0.12"}]}})"#;

    #[test]
    fn test_parse_jsonp_envelope() {
        let resp = parse_history(SAMPLE).unwrap();

        assert_eq!(resp.err_code, 0);
        assert_eq!(resp.total_count, 1);
        let records = resp.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2024-01-02");
        assert_eq!(records[0].unit_nav, "1.234");
        assert_eq!(records[0].cumulative_nav, "2.345");
        assert_eq!(records[0].growth_rate, "0.12");
    }

    #[test]
    fn test_trailing_garbage_is_ignored() {
        let body = format!("/**/ \n{};\n<!-- cached -->", SAMPLE);
        let resp = parse_history(&body).unwrap();
        assert_eq!(resp.records().len(), 1);
    }

    #[test]
    fn test_null_envelope_values_are_tolerated() {
        let resp = parse_history(
            r#"jQuery({"Data":{"LSJZList":[{"FSRQ":"2024-01-02","DWJZ":"1.234"}],"isNewType":null},"ErrCode":0,"ErrMsg":null,"TotalCount":null,"PageSize":null,"PageIndex":1})"#,
        )
        .unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.total_count, 0);
        assert_eq!(resp.records().len(), 1);

        let resp = parse_history(
            r#"jQuery({"Data":{"LSJZList":null,"isNewType":null},"ErrCode":0,"TotalCount":0})"#,
        )
        .unwrap();
        assert!(resp.records().is_empty());
    }

    #[test]
    fn test_no_object_is_malformed() {
        let err = parse_history("jQuery123(null)").unwrap_err();
        assert!(matches!(err, DataError::MalformedResponse(_)));
    }

    #[test]
    fn test_broken_json_fails() {
        let err = parse_history(r#"jQuery({"ErrCode":0,"Data":{"LSJZList":[{"FSRQ":}]}})"#)
            .unwrap_err();
        assert!(matches!(err, DataError::Serialization(_)));
    }

    #[test]
    fn test_ensure_success_reports_api_error() {
        let resp = parse_history(
            r#"jQuery({"Data":null,"ErrCode":-999,"ErrMsg":"系统繁忙","PageSize":20,"PageIndex":1})"#,
        )
        .unwrap();

        match ensure_success(resp).unwrap_err() {
            DataError::Api {
                code,
                message,
                page_index,
                page_size,
            } => {
                assert_eq!(code, -999);
                assert_eq!(message, "系统繁忙");
                assert_eq!(page_index, 1);
                assert_eq!(page_size, 20);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_history_url_params() {
        let url = history_url("http://api.fund.eastmoney.com/f10/lsjz", "000001", 20, 42)
            .unwrap();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(
            query,
            vec![
                ("callback".to_string(), "jQuer".to_string()),
                ("fundCode".to_string(), "000001".to_string()),
                ("pageIndex".to_string(), "1".to_string()),
                ("pageSize".to_string(), "20".to_string()),
                ("startDate".to_string(), String::new()),
                ("endDate".to_string(), String::new()),
                ("_".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn test_cache_buster_range() {
        let now = Utc::now();
        let base = (now.timestamp() - 2) * 1000;
        for _ in 0..50 {
            let ts = cache_buster(now);
            assert!(ts <= base && ts > base - 1000);
        }
    }
}
