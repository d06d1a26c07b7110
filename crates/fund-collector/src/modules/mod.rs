//! 데이터 수집 모듈.

pub mod nav_collect;

pub use nav_collect::NavCollector;
