//! 펀드 순자산가치(NAV) 이력 응답 타입.
//!
//! 원격 API는 숫자를 포함한 모든 값을 문자열로 내려주며,
//! 값이 없을 때는 빈 문자열 또는 `null`을 사용합니다.
//! `null`과 누락된 키는 모두 타입의 기본값(빈 문자열, 0, 빈 목록)으로 역직렬화합니다.

use serde::{Deserialize, Deserializer, Serialize};

/// `null`을 기본값으로 취급하는 역직렬화 헬퍼.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// 일별 NAV 레코드 (API 원본).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// 기준일 (FSRQ)
    #[serde(rename = "FSRQ", default, deserialize_with = "null_as_default")]
    pub date: String,
    /// 단위 NAV (DWJZ)
    #[serde(rename = "DWJZ", default, deserialize_with = "null_as_default")]
    pub unit_nav: String,
    /// 누적 NAV (LJJZ)
    #[serde(rename = "LJJZ", default, deserialize_with = "null_as_default")]
    pub cumulative_nav: String,
    #[serde(rename = "SDATE", default, deserialize_with = "null_as_default")]
    pub sdate: String,
    #[serde(rename = "ACTUALSYI", default, deserialize_with = "null_as_default")]
    pub actual_syi: String,
    /// NAV 유형 (NAVTYPE)
    #[serde(rename = "NAVTYPE", default, deserialize_with = "null_as_default")]
    pub nav_type: String,
    /// 일간 증감률 % (JZZZL)
    #[serde(rename = "JZZZL", default, deserialize_with = "null_as_default")]
    pub growth_rate: String,
    /// 매수(申购) 상태 (SGZT)
    #[serde(rename = "SGZT", default, deserialize_with = "null_as_default")]
    pub subscription_status: String,
    /// 환매(赎回) 상태 (SHZT)
    #[serde(rename = "SHZT", default, deserialize_with = "null_as_default")]
    pub redemption_status: String,
    #[serde(rename = "FHFCZ", default, deserialize_with = "null_as_default")]
    pub fhfcz: String,
    #[serde(rename = "FHFCBZ", default, deserialize_with = "null_as_default")]
    pub fhfcbz: String,
    #[serde(rename = "DTYPE", default, deserialize_with = "null_as_default")]
    pub dtype: String,
    /// 분배 내역 (FHSP)
    #[serde(rename = "FHSP", default, deserialize_with = "null_as_default")]
    pub dividend: String,
}

/// 응답의 `Data` 블록.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    /// 일별 레코드 목록 (최신순)
    #[serde(rename = "LSJZList", default, deserialize_with = "null_as_default")]
    pub records: Vec<HistoryPoint>,
    #[serde(rename = "FundType", default, deserialize_with = "null_as_default")]
    pub fund_type: String,
    #[serde(rename = "SYType", default, deserialize_with = "null_as_default")]
    pub sy_type: String,
    #[serde(rename = "isNewType", default, deserialize_with = "null_as_default")]
    pub is_new_type: bool,
    #[serde(rename = "Feature", default, deserialize_with = "null_as_default")]
    pub feature: String,
}

/// NAV 이력 API 응답 봉투.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// 응답 데이터 (오류 응답에서는 `null`)
    #[serde(rename = "Data", default)]
    pub data: Option<HistoryData>,
    /// 오류 코드 (0 = 성공)
    #[serde(rename = "ErrCode", default, deserialize_with = "null_as_default")]
    pub err_code: i64,
    /// 오류 메시지
    #[serde(rename = "ErrMsg", default, deserialize_with = "null_as_default")]
    pub err_msg: String,
    /// 전체 레코드 수
    #[serde(rename = "TotalCount", default, deserialize_with = "null_as_default")]
    pub total_count: i64,
    #[serde(rename = "Expansion", default)]
    pub expansion: serde_json::Value,
    /// 페이지 크기
    #[serde(rename = "PageSize", default, deserialize_with = "null_as_default")]
    pub page_size: i64,
    /// 페이지 번호 (1부터 시작)
    #[serde(rename = "PageIndex", default, deserialize_with = "null_as_default")]
    pub page_index: i64,
}

impl HistoryResponse {
    /// API가 성공을 보고했는지 여부.
    pub fn is_success(&self) -> bool {
        self.err_code == 0
    }

    /// 이 페이지의 일별 레코드.
    pub fn records(&self) -> &[HistoryPoint] {
        self.data
            .as_ref()
            .map(|d| d.records.as_slice())
            .unwrap_or_default()
    }
}
