//! 시계열 저장소에 기록되는 측정 포인트.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 모든 NAV 포인트가 공유하는 측정(measurement) 이름.
pub const FUND_MEASUREMENT: &str = "fund";

/// 포인트 필드 값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 부동소수점 값
    Float(f64),
    /// 문자열 값 (API 원문 그대로)
    Str(String),
}

impl FieldValue {
    /// 부동소수점 값이면 반환합니다.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Str(_) => None,
        }
    }

    /// 문자열 값이면 반환합니다.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Float(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

/// 태그와 필드, 타임스탬프를 가진 측정 포인트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    /// 측정 이름
    pub measurement: String,
    /// 태그 (키 순서로 정렬)
    pub tags: BTreeMap<String, String>,
    /// 필드 (키 순서로 정렬)
    pub fields: BTreeMap<String, FieldValue>,
    /// 포인트 시각
    pub timestamp: DateTime<Utc>,
}

impl MeasurementPoint {
    /// 필드가 비어 있는 새 포인트를 생성합니다.
    pub fn new(
        measurement: impl Into<String>,
        tags: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            measurement: measurement.into(),
            tags,
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    /// 필드를 추가합니다.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// 필드를 조회합니다.
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

/// 한 번의 쓰기 호출로 기록되는 포인트 묶음.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPoints {
    /// 대상 데이터베이스
    pub database: String,
    /// 포인트 목록 (입력 순서 유지)
    pub points: Vec<MeasurementPoint>,
}

impl BatchPoints {
    /// 빈 배치를 생성합니다.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            points: Vec::new(),
        }
    }

    /// 포인트를 추가합니다.
    pub fn add_point(&mut self, point: MeasurementPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
