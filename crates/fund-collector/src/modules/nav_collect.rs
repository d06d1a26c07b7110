//! 펀드 NAV 수집 모듈.
//!
//! 한 사이클의 흐름:
//!
//! ```text
//! 카탈로그 조회 → (종목별) 이력 조회 → 파싱 → API 오류 검사 → 포인트 변환 → 배치 쓰기 → 대기
//! ```
//!
//! 카탈로그 조회 실패는 사이클 전체를 중단시키지만, 종목별 실패는
//! 로그만 남기고 다음 종목으로 넘어갑니다. 종목 사이에는 성공/실패와
//! 관계없이 고정 시간만큼 대기합니다.

use crate::config::{CollectorConfig, NavCollectConfig};
use crate::{CollectionStats, Result};
use fund_core::{fund_span, InstrumentRecord};
use fund_data::provider::{FundApiClient, FundDataProvider, HttpFetcher};
use fund_data::storage::{write_points, InfluxSink, PointSink};
use fund_data::build_points;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// NAV 수집기.
///
/// 데이터 Provider와 저장소는 시작 시 한 번 생성되어 주입되며,
/// 프로세스 수명 동안 재사용됩니다.
pub struct NavCollector {
    provider: Arc<dyn FundDataProvider>,
    sink: Arc<dyn PointSink>,
    request_delay: Duration,
}

impl NavCollector {
    /// 새 수집기 생성.
    pub fn new(
        provider: Arc<dyn FundDataProvider>,
        sink: Arc<dyn PointSink>,
        config: &NavCollectConfig,
    ) -> Self {
        Self {
            provider,
            sink,
            request_delay: config.request_delay(),
        }
    }

    /// 설정으로부터 HTTP 클라이언트와 InfluxDB 저장소를 구성합니다.
    pub fn from_config(config: &CollectorConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.http.clone())?;
        let provider = FundApiClient::new(fetcher, config.api.clone());
        let sink = InfluxSink::new(config.influx.clone())?;

        tracing::info!(
            catalog_url = %config.api.catalog_url,
            influx_url = %config.influx.url,
            database = %config.influx.database,
            "수집기 구성 완료"
        );

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(sink),
            &config.nav_collect,
        ))
    }

    /// 종목 하나의 NAV 이력을 조회해 기록합니다.
    ///
    /// 기록한 포인트 수를 반환합니다. 레코드가 없으면 쓰기 없이 0을 반환합니다.
    pub async fn collect_fund(&self, fund: &InstrumentRecord) -> fund_data::Result<usize> {
        let history = self.provider.fetch_history(fund).await?;

        let points = build_points(fund, history.records())?;
        if points.is_empty() {
            return Ok(0);
        }

        let written = write_points(self.sink.as_ref(), points).await?;
        tracing::debug!(
            code = %fund.code,
            name = %fund.name,
            count = written,
            "저장 완료"
        );

        Ok(written)
    }

    /// 수집 사이클 한 번 실행.
    ///
    /// 카탈로그 조회에 실패하면 에러를 반환합니다. 종목별 실패는 통계에만 반영됩니다.
    /// 취소되면 진행 중인 종목까지만 처리하고 반환합니다.
    pub async fn run_cycle(&self, shutdown: &CancellationToken) -> Result<CollectionStats> {
        let start = Instant::now();
        let mut stats = CollectionStats::new();

        tracing::info!("NAV 수집 시작");

        let funds = self.provider.fetch_catalog().await?;
        if funds.is_empty() {
            tracing::warn!("수집할 펀드가 없습니다");
            stats.elapsed = start.elapsed();
            return Ok(stats);
        }

        for (idx, fund) in funds.iter().enumerate() {
            if shutdown.is_cancelled() {
                tracing::info!(processed = idx, "종료 신호 수신, 사이클 중단");
                break;
            }

            stats.total += 1;

            tracing::debug!(
                code = %fund.code,
                progress = format!("{}/{}", idx + 1, funds.len()),
                "수집 시작"
            );

            match self
                .collect_fund(fund)
                .instrument(fund_span!("collect_fund", fund.code, fund.name))
                .await
            {
                Ok(0) => {
                    stats.empty += 1;
                    tracing::debug!(code = %fund.code, name = %fund.name, "데이터 없음");
                }
                Ok(count) => {
                    stats.success += 1;
                    stats.total_points += count;
                }
                Err(e) => {
                    stats.errors += 1;
                    tracing::error!(
                        code = %fund.code,
                        name = %fund.name,
                        error = %e,
                        "NAV 수집 실패"
                    );
                }
            }

            // Rate limiting
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("종료 신호 수신, 사이클 중단");
                    break;
                }
                _ = tokio::time::sleep(self.request_delay) => {}
            }
        }

        stats.elapsed = start.elapsed();
        Ok(stats)
    }
}
