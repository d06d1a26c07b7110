//! 펀드 종목 정보.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 종목 카탈로그의 펀드 한 건.
///
/// 수집 주기마다 카탈로그에서 새로 파싱되며, 이후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// 펀드 코드 (예: "000001")
    pub code: String,
    /// 약칭 코드
    pub abridge: String,
    /// 펀드명
    pub name: String,
    /// 펀드 유형 (예: "混合型")
    pub fund_type: String,
    /// 병음 표기 (검색용)
    pub pinyin: String,
}

impl InstrumentRecord {
    /// 새 종목 정보를 생성합니다.
    pub fn new(
        code: impl Into<String>,
        abridge: impl Into<String>,
        name: impl Into<String>,
        fund_type: impl Into<String>,
        pinyin: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            abridge: abridge.into(),
            name: name.into(),
            fund_type: fund_type.into(),
            pinyin: pinyin.into(),
        }
    }

    /// 측정 포인트에 붙일 태그 집합.
    ///
    /// 태그 키는 `code`, `abridge`, `name`, `type`, `pinyin` 입니다.
    pub fn tags(&self) -> BTreeMap<String, String> {
        [
            ("code", &self.code),
            ("abridge", &self.abridge),
            ("name", &self.name),
            ("type", &self.fund_type),
            ("pinyin", &self.pinyin),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }
}
