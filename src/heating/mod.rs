//! CWU(온수) 가열비 계산 모듈 모음.

pub mod audit;
pub mod cost;
pub mod demand;
pub mod price;

pub use audit::*;
pub use cost::*;
pub use demand::*;
pub use price::*;

/// 가열비/배관 손실 계산 오류를 표현한다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// 입력값이 잘못된 경우
    #[error("입력 오류: {0}")]
    InvalidInput(&'static str),
}

/// 모든 값이 유한한지 확인한다.
pub(crate) fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}
