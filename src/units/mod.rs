//! 단위 정의 및 변환 모듈 모음.

pub mod energy;
pub mod length;

pub use energy::{price_per_gj, EnergyPriceUnit, UnknownEnergyUnit};
pub use length::{convert_length, LengthUnit};
