//! 시계열 저장소 모듈.
//!
//! 저장소는 `PointSink` trait 뒤에 있으며, 종목 하나의 포인트를
//! 하나의 배치로 묶어 한 번에 기록합니다. 재시도는 하지 않습니다.

pub mod influx;

use crate::error::Result;
use async_trait::async_trait;
use fund_core::{BatchPoints, MeasurementPoint};

pub use influx::{InfluxConfig, InfluxSink, DEFAULT_DATABASE, DEFAULT_INFLUX_URL};

/// 배치 쓰기 대상.
#[async_trait]
pub trait PointSink: Send + Sync {
    /// 배치를 기록할 논리 데이터베이스 이름.
    fn database(&self) -> &str;

    /// 배치를 한 번의 호출로 기록합니다.
    async fn write(&self, batch: BatchPoints) -> Result<()>;
}

/// 종목 하나의 포인트를 배치로 묶어 한 번 기록합니다.
///
/// 기록한 포인트 수를 반환합니다.
pub async fn write_points(sink: &dyn PointSink, points: Vec<MeasurementPoint>) -> Result<usize> {
    let mut batch = BatchPoints::new(sink.database());
    for point in points {
        batch.add_point(point);
    }

    let count = batch.len();
    sink.write(batch).await?;

    Ok(count)
}
