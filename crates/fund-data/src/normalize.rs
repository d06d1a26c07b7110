//! NAV 레코드를 측정 포인트로 변환.
//!
//! 숫자 필드(`DWJZ`, `LJJZ`, `JZZZL`)는 파싱에 성공한 경우에만 포함합니다.
//! 빈 문자열이나 "--" 같은 자리표시자는 오류가 아니라 필드 생략입니다.
//! 상태 문자열(`NAVTYPE`, `SGZT`, `SHZT`)은 항상 원문 그대로 포함합니다.
//!
//! 날짜 파싱에 실패하면 해당 종목의 배치 전체를 버립니다.

use crate::error::{DataError, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use fund_core::{HistoryPoint, InstrumentRecord, MeasurementPoint, FUND_MEASUREMENT};
use std::collections::BTreeMap;

/// 단위 NAV 필드 키.
pub const FIELD_UNIT_NAV: &str = "DWJZ";
/// 누적 NAV 필드 키.
pub const FIELD_CUMULATIVE_NAV: &str = "LJJZ";
/// 증감률 필드 키.
pub const FIELD_GROWTH_RATE: &str = "JZZZL";
/// NAV 유형 필드 키.
pub const FIELD_NAV_TYPE: &str = "NAVTYPE";
/// 매수 상태 필드 키.
pub const FIELD_SUBSCRIPTION: &str = "SGZT";
/// 환매 상태 필드 키.
pub const FIELD_REDEMPTION: &str = "SHZT";

/// 시각이 포함된 날짜 형식.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y%m%d %H:%M:%S",
    "%Y%m%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

/// 날짜만 있는 형식.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%Y.%m.%d", "%m/%d/%Y"];

/// 날짜 문자열을 파싱합니다.
///
/// 오프셋이 없는 값은 로컬 시간대로 해석합니다.
pub fn parse_nav_date(value: &str) -> Result<DateTime<Utc>> {
    let s = value.trim();
    let err = || DataError::DateParse {
        value: value.to_string(),
    };

    if s.is_empty() {
        return Err(err());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(err)?;

    // DST 전환으로 모호하거나 존재하지 않는 시각은 가장 이른 해석을 사용
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(err)
}

/// 10진 부동소수점 파싱. 실패하거나 유한하지 않으면 `None`.
pub fn parse_float(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 레코드 하나를 측정 포인트로 변환합니다.
pub fn build_point(
    tags: &BTreeMap<String, String>,
    record: &HistoryPoint,
) -> Result<MeasurementPoint> {
    let timestamp = parse_nav_date(&record.date)?;

    let mut point = MeasurementPoint::new(FUND_MEASUREMENT, tags.clone(), timestamp)
        .with_field(FIELD_NAV_TYPE, record.nav_type.as_str())
        .with_field(FIELD_SUBSCRIPTION, record.subscription_status.as_str())
        .with_field(FIELD_REDEMPTION, record.redemption_status.as_str());

    for (key, raw) in [
        (FIELD_UNIT_NAV, &record.unit_nav),
        (FIELD_CUMULATIVE_NAV, &record.cumulative_nav),
        (FIELD_GROWTH_RATE, &record.growth_rate),
    ] {
        if let Some(v) = parse_float(raw) {
            point = point.with_field(key, v);
        }
    }

    Ok(point)
}

/// 종목의 레코드 목록을 같은 순서의 포인트 목록으로 변환합니다.
///
/// 하나라도 날짜 파싱에 실패하면 이미 만든 포인트를 버리고 오류를 반환합니다.
pub fn build_points(
    fund: &InstrumentRecord,
    records: &[HistoryPoint],
) -> Result<Vec<MeasurementPoint>> {
    let tags = fund.tags();

    records
        .iter()
        .map(|record| build_point(&tags, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn fund() -> InstrumentRecord {
        InstrumentRecord::new("000001", "HXCZHH", "华夏成长混合", "混合型", "HXCZ")
    }

    fn record(date: &str, unit: &str, cumulative: &str, growth: &str) -> HistoryPoint {
        HistoryPoint {
            date: date.to_string(),
            unit_nav: unit.to_string(),
            cumulative_nav: cumulative.to_string(),
            growth_rate: growth.to_string(),
            nav_type: "1".to_string(),
            subscription_status: "开放申购".to_string(),
            redemption_status: "开放赎回".to_string(),
            ..Default::default()
        }
    }

    fn local_midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, 0, 0, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_parse_nav_date_formats() {
        let expected = local_midnight(2024, 1, 2);
        for s in [
            "2024-01-02",
            "2024/01/02",
            "20240102",
            "2024.01.02",
            "01/02/2024",
            " 2024-01-02 ",
        ] {
            assert_eq!(parse_nav_date(s).unwrap(), expected, "format: {s}");
        }

        for s in ["2024-01-02 15:30:00", "2024/01/02 15:30", "20240102 15:30"] {
            let with_time = parse_nav_date(s).unwrap();
            assert_eq!(with_time.with_timezone(&Local).hour(), 15, "format: {s}");
        }

        let rfc = parse_nav_date("2024-01-02T00:00:00+08:00").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-01-01T16:00:00+00:00");
    }

    #[test]
    fn test_parse_nav_date_rejects_garbage() {
        for s in ["", "--", "2024-13-40", "yesterday"] {
            assert!(matches!(parse_nav_date(s), Err(DataError::DateParse { .. })));
        }
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("1.234"), Some(1.234));
        assert_eq!(parse_float("-0.52"), Some(-0.52));
        assert_eq!(parse_float("1"), Some(1.0));
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("n/a"), None);
        assert_eq!(parse_float("--"), None);
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("inf"), None);
    }

    #[test]
    fn test_build_point_full_fields() {
        let tags = fund().tags();
        let point = build_point(&tags, &record("2024-01-02", "1.234", "2.345", "0.12")).unwrap();

        assert_eq!(point.measurement, "fund");
        assert_eq!(point.tags, tags);
        assert_eq!(point.timestamp, local_midnight(2024, 1, 2));
        assert_eq!(point.fields.len(), 6);
        assert_eq!(point.field("DWJZ").and_then(|v| v.as_f64()), Some(1.234));
        assert_eq!(point.field("LJJZ").and_then(|v| v.as_f64()), Some(2.345));
        assert_eq!(point.field("JZZZL").and_then(|v| v.as_f64()), Some(0.12));
        assert_eq!(point.field("SGZT").and_then(|v| v.as_str()), Some("开放申购"));
    }

    #[test]
    fn test_unparseable_numbers_are_omitted() {
        let tags = fund().tags();
        let point = build_point(&tags, &record("2024-01-02", "", "n/a", "")).unwrap();

        assert!(point.field("DWJZ").is_none());
        assert!(point.field("LJJZ").is_none());
        assert!(point.field("JZZZL").is_none());
        assert_eq!(point.field("NAVTYPE").and_then(|v| v.as_str()), Some("1"));
        assert_eq!(point.field("SGZT").and_then(|v| v.as_str()), Some("开放申购"));
        assert_eq!(point.field("SHZT").and_then(|v| v.as_str()), Some("开放赎回"));
        assert_eq!(point.fields.len(), 3);
        assert_eq!(point.timestamp, local_midnight(2024, 1, 2));
    }

    #[test]
    fn test_build_points_keeps_order() {
        let records = vec![
            record("2024-01-03", "1.3", "2.3", "0.5"),
            record("2024-01-02", "1.2", "2.2", "-0.1"),
        ];

        let points = build_points(&fund(), &records).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp, local_midnight(2024, 1, 3));
        assert_eq!(points[1].timestamp, local_midnight(2024, 1, 2));
    }

    #[test]
    fn test_bad_date_fails_whole_batch() {
        let records = vec![
            record("2024-01-03", "1.3", "2.3", "0.5"),
            record("not-a-date", "1.2", "2.2", "-0.1"),
            record("2024-01-01", "1.1", "2.1", "0.0"),
        ];

        let err = build_points(&fund(), &records).unwrap_err();
        match err {
            DataError::DateParse { value } => assert_eq!(value, "not-a-date"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
