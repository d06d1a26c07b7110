//! 데몬 루프.
//!
//! 취소될 때까지 수집 사이클을 반복합니다. 사이클 실패(카탈로그 조회 실패 등)는
//! 로그만 남기고 다음 사이클을 시작합니다.

use crate::config::DaemonConfig;
use crate::modules::NavCollector;
use tokio_util::sync::CancellationToken;

/// 취소될 때까지 수집 사이클을 반복 실행합니다.
///
/// 시작한 사이클 수를 반환합니다.
pub async fn run_daemon(
    collector: &NavCollector,
    config: &DaemonConfig,
    shutdown: CancellationToken,
) -> u64 {
    let cycle_delay = config.cycle_delay();
    let mut cycles: u64 = 0;

    tracing::info!(
        cycle_delay_secs = config.cycle_delay_secs,
        "=== 데몬 모드 시작 ==="
    );

    while !shutdown.is_cancelled() {
        cycles += 1;
        tracing::info!(cycle = cycles, "=== 수집 사이클 시작 ===");

        match collector.run_cycle(&shutdown).await {
            Ok(stats) => stats.log_summary("NAV 수집"),
            Err(e) => tracing::error!(cycle = cycles, error = %e, "수집 사이클 실패"),
        }

        if cycle_delay.is_zero() {
            continue;
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(cycle_delay) => {}
        }
    }

    tracing::info!(cycles = cycles, "종료 신호 수신, 데몬 종료");
    cycles
}
