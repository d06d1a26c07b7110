//! InfluxDB 1.x HTTP 쓰기 저장소.
//!
//! 배치를 line protocol로 인코딩해 `/write` 엔드포인트에 한 번 POST 합니다.
//!
//! ```text
//! fund,abridge=HXCZHH,code=000001,name=华夏成长混合,pinyin=HXCZ,type=混合型 DWJZ=1.234,NAVTYPE="1",SGZT="开放申购",SHZT="开放赎回" 1704124800000000000
//! ```

use super::PointSink;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use fund_core::{BatchPoints, FieldValue, MeasurementPoint};
use std::fmt::Write as _;

/// 기본 InfluxDB URL.
pub const DEFAULT_INFLUX_URL: &str = "http://localhost:8086";

/// 기본 데이터베이스 이름.
pub const DEFAULT_DATABASE: &str = "fund";

/// InfluxDB 연결 설정.
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    /// 서버 URL (예: http://localhost:8086)
    pub url: String,
    /// 데이터베이스 이름
    pub database: String,
    /// 사용자 이름 (선택)
    pub username: Option<String>,
    /// 비밀번호 (선택)
    pub password: Option<String>,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INFLUX_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            username: None,
            password: None,
        }
    }
}

/// InfluxDB 쓰기 클라이언트.
#[derive(Debug, Clone)]
pub struct InfluxSink {
    client: reqwest::Client,
    config: InfluxConfig,
}

impl InfluxSink {
    /// 새 저장소 클라이언트를 생성합니다.
    pub fn new(config: InfluxConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DataError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn write_url(&self) -> String {
        format!("{}/write", self.config.url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PointSink for InfluxSink {
    fn database(&self) -> &str {
        &self.config.database
    }

    async fn write(&self, batch: BatchPoints) -> Result<()> {
        let body = encode_batch(&batch)?;

        let mut query: Vec<(&str, &str)> =
            vec![("db", batch.database.as_str()), ("precision", "ns")];
        if let Some(user) = &self.config.username {
            query.push(("u", user.as_str()));
        }
        if let Some(password) = &self.config.password {
            query.push(("p", password.as_str()));
        }

        let response = self
            .client
            .post(self.write_url())
            .query(&query)
            .body(body)
            .send()
            .await
            .map_err(|e| DataError::Sink(format!("InfluxDB 요청 실패: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Sink(format!(
                "InfluxDB 쓰기 실패 [{}]: {}",
                status,
                text.trim()
            )));
        }

        tracing::debug!(
            database = %batch.database,
            points = batch.len(),
            "InfluxDB 쓰기 완료"
        );

        Ok(())
    }
}

/// 배치 전체를 line protocol로 인코딩합니다 (줄바꿈 구분).
pub fn encode_batch(batch: &BatchPoints) -> Result<String> {
    let mut out = String::new();
    for (i, point) in batch.points.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        encode_point(point, &mut out)?;
    }
    Ok(out)
}

/// 포인트 하나를 line protocol 한 줄로 인코딩합니다.
///
/// 값이 빈 태그는 생략합니다. 필드가 하나도 없거나, 줄바꿈 문자 또는
/// 역슬래시로 끝나는 이름/태그가 있으면 오류입니다.
pub fn encode_point(point: &MeasurementPoint, out: &mut String) -> Result<()> {
    if point.fields.is_empty() {
        return Err(DataError::InvalidData(format!(
            "필드가 없는 포인트: {}",
            point.measurement
        )));
    }

    let timestamp = point.timestamp.timestamp_nanos_opt().ok_or_else(|| {
        DataError::InvalidData(format!("타임스탬프 범위 초과: {}", point.timestamp))
    })?;

    escape_into(out, &point.measurement, &[',', ' '])?;

    for (key, value) in point.tags.iter().filter(|(_, v)| !v.is_empty()) {
        out.push(',');
        escape_into(out, key, &[',', '=', ' '])?;
        out.push('=');
        escape_into(out, value, &[',', '=', ' '])?;
    }

    for (i, (key, value)) in point.fields.iter().enumerate() {
        out.push(if i == 0 { ' ' } else { ',' });
        escape_into(out, key, &[',', '=', ' '])?;
        out.push('=');
        match value {
            FieldValue::Float(v) if v.is_finite() => {
                let _ = write!(out, "{}", v);
            }
            FieldValue::Float(v) => {
                return Err(DataError::InvalidData(format!(
                    "유한하지 않은 필드 값: {}={}",
                    key, v
                )));
            }
            FieldValue::Str(s) => {
                out.push('"');
                escape_into(out, s, &['"', '\\'])?;
                out.push('"');
            }
        }
    }

    let _ = write!(out, " {}", timestamp);
    Ok(())
}

/// 지정한 문자 앞에 역슬래시를 붙여 기록합니다.
///
/// 줄바꿈은 레코드 구분자이므로 허용하지 않습니다. 역슬래시를 이스케이프하지 않는
/// 위치에서는 끝의 역슬래시가 뒤따르는 구분자를 이스케이프하므로 역시 거부합니다.
fn escape_into(out: &mut String, s: &str, special: &[char]) -> Result<()> {
    if s.contains(['\n', '\r']) {
        return Err(DataError::InvalidData(format!("줄바꿈이 포함된 값: {:?}", s)));
    }
    if !special.contains(&'\\') && s.ends_with('\\') {
        return Err(DataError::InvalidData(format!("역슬래시로 끝나는 값: {:?}", s)));
    }

    for c in s.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    Ok(())
}
