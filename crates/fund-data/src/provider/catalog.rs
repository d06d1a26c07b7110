//! 펀드 종목 카탈로그 파서.
//!
//! 카탈로그 엔드포인트는 JSON이 아니라 스크립트 변수 할당을 반환합니다:
//!
//! ```text
//! var r = [["000001","HXCZHH","华夏成长混合","混合型","HUAXIACHENGZHANGHUNHE"],...];
//! ```
//!
//! 각 튜플은 코드, 약칭, 이름, 유형, 병음 순서의 5개 필드입니다.
//! 필드 수가 맞지 않는 튜플은 경고 로그만 남기고 건너뜁니다.

use crate::error::{DataError, Result};
use fund_core::InstrumentRecord;

/// 튜플 구분자.
const TUPLE_SEPARATOR: &str = "],";

/// 필드 구분자.
const FIELD_SEPARATOR: &str = "\",\"";

/// 튜플당 필드 수.
const FIELDS_PER_TUPLE: usize = 5;

/// 필드 양끝에서 제거할 문자.
const FIELD_TRIM: &[char] = &['"', '[', ']'];

/// 카탈로그 본문을 종목 목록으로 파싱합니다.
///
/// 출현 순서를 유지합니다.
pub fn parse_catalog(body: &str) -> Result<Vec<InstrumentRecord>> {
    let eq = body
        .find('=')
        .ok_or_else(|| DataError::MalformedResponse("카탈로그에 '=' 가 없습니다".to_string()))?;

    let payload = body[eq + 1..].trim();

    // 앞의 '[' 한 글자와 끝의 "]];" 세 글자를 제거
    let inner = payload
        .len()
        .checked_sub(3)
        .filter(|&end| end >= 1)
        .and_then(|end| payload.get(1..end))
        .ok_or_else(|| {
            DataError::MalformedResponse(format!(
                "카탈로그 배열 형식이 아닙니다: {}",
                truncate(payload, 64)
            ))
        })?;

    if inner.trim_matches(FIELD_TRIM).trim().is_empty() {
        tracing::warn!("카탈로그가 비어 있습니다");
        return Ok(Vec::new());
    }

    let mut funds = Vec::new();
    for tuple in inner.split(TUPLE_SEPARATOR) {
        match parse_tuple(tuple) {
            Some(fund) => funds.push(fund),
            None => tracing::warn!(tuple = tuple, "잘못된 카탈로그 항목, 건너뜀"),
        }
    }

    Ok(funds)
}

/// 튜플 하나를 파싱합니다. 필드가 5개가 아니면 `None`.
fn parse_tuple(tuple: &str) -> Option<InstrumentRecord> {
    let fields: Vec<&str> = tuple
        .split(FIELD_SEPARATOR)
        .map(|f| f.trim_matches(FIELD_TRIM))
        .collect();

    match fields.as_slice() {
        [code, abridge, name, fund_type, pinyin] => Some(InstrumentRecord::new(
            *code, *abridge, *name, *fund_type, *pinyin,
        )),
        _ => {
            tracing::debug!(
                expected = FIELDS_PER_TUPLE,
                actual = fields.len(),
                "카탈로그 필드 수 불일치"
            );
            None
        }
    }
}

/// 로그용 문자열 자르기 (문자 경계 기준).
fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// 테스트 중 출력된 로그를 모으는 writer.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_parse_well_formed_catalog() {
        let body = r#"var r = [["001","A","Alpha","T1","a"],["002","B","Beta","T2","b"]];"#;

        let funds = parse_catalog(body).unwrap();
        assert_eq!(
            funds,
            vec![
                InstrumentRecord::new("001", "A", "Alpha", "T1", "a"),
                InstrumentRecord::new("002", "B", "Beta", "T2", "b"),
            ]
        );
    }

    #[test]
    fn test_skips_tuple_with_wrong_field_count() {
        let body = concat!(
            r#"var r = [["001","A","Alpha","T1","a"],"#,
            r#"["002","B","Beta","T2"],"#,
            r#"["003","C","Gamma","T3","c"]];"#
        );

        let funds = parse_catalog(body).unwrap();
        let codes: Vec<&str> = funds.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["001", "003"]);
        assert_eq!(funds[1].pinyin, "c");
    }

    #[test]
    fn test_skipped_tuple_logs_warning() {
        let body = r#"var r = [["001","A","Alpha","T1","a"],["002","B","Beta","T2"]];"#;

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let funds = tracing::subscriber::with_default(subscriber, || parse_catalog(body).unwrap());
        assert_eq!(funds.len(), 1);

        let output = logs.contents();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "logs: {output}");
        assert!(warnings[0].contains("잘못된 카탈로그 항목"));
        assert!(warnings[0].contains("002"));
    }

    #[test]
    fn test_handles_whitespace_and_unicode() {
        let body = "\u{feff}var r =  \n[[\"000001\",\"HXCZHH\",\"华夏成长混合\",\"混合型-偏股\",\"HUAXIACHENGZHANGHUNHE\"]];\n";

        let funds = parse_catalog(body).unwrap();
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].name, "华夏成长混合");
        assert_eq!(funds[0].fund_type, "混合型-偏股");
        assert_eq!(funds[0].pinyin, "HUAXIACHENGZHANGHUNHE");
    }

    #[test]
    fn test_missing_assignment_is_malformed() {
        let err = parse_catalog("<html>blocked</html>").unwrap_err();
        assert!(matches!(err, DataError::MalformedResponse(_)));
    }

    #[test]
    fn test_too_short_payload_is_malformed() {
        assert!(matches!(
            parse_catalog("var r = ;").unwrap_err(),
            DataError::MalformedResponse(_)
        ));
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_catalog("var r = [[]];").unwrap().is_empty());
    }
}
