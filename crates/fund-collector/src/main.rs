//! Fund NAV collector CLI.

use clap::{Parser, Subcommand};
use fund_collector::{run_daemon, CollectorConfig, CollectorError, NavCollector};
use fund_core::logging::{init_logging, LogConfig, LogFormat};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "fund-collector")]
#[command(about = "Fund NAV Collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// 데몬 모드: 취소될 때까지 수집 사이클 반복 (기본값)
    Daemon,

    /// 수집 사이클 한 번 실행 후 종료
    RunOnce,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    let level = format!("fund_collector={0},fund_data={0}", cli.log_level);
    init_logging(LogConfig::new(level).with_format(cli.log_format))
        .map_err(|e| CollectorError::Logging(e.to_string()))?;

    tracing::info!("Fund NAV Collector 시작");

    // 설정 로드
    let config = CollectorConfig::from_env()?;
    tracing::debug!(
        catalog_url = %config.api.catalog_url,
        history_url = %config.api.history_url,
        request_delay_ms = config.nav_collect.request_delay_ms,
        "설정 로드 완료"
    );

    let collector = NavCollector::from_config(&config)?;

    // Ctrl-C → 취소
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("종료 신호 수신, 정리 중...");
                shutdown.cancel();
            }
        });
    }

    match cli.command.unwrap_or(Commands::Daemon) {
        Commands::Daemon => {
            run_daemon(&collector, &config.daemon, shutdown).await;
        }
        Commands::RunOnce => {
            let stats = collector.run_cycle(&shutdown).await?;
            stats.log_summary("NAV 수집");
        }
    }

    tracing::info!("Fund NAV Collector 종료");

    Ok(())
}
