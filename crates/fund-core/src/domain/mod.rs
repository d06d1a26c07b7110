//! 펀드 수집 파이프라인의 도메인 모델.

mod instrument;
mod nav;
mod point;

pub use instrument::*;
pub use nav::*;
pub use point::*;
