use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 열요금이 고시되는 에너지 단위. 내부 기준은 GJ이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnergyPriceUnit {
    /// zł/GJ 기준 요금 (기본값)
    #[default]
    #[serde(rename = "GJ", alias = "gj", alias = "Gj")]
    Gigajoule,
    /// zł/MJ 기준 요금
    #[serde(rename = "MJ", alias = "mj", alias = "Mj")]
    Megajoule,
}

/// 단위 문자열을 해석하지 못했을 때의 오류.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("알 수 없는 에너지 단위: {0}")]
pub struct UnknownEnergyUnit(pub String);

impl EnergyPriceUnit {
    /// 1 GJ 안에 이 단위가 몇 개 들어가는지 반환한다.
    pub fn units_per_gj(self) -> f64 {
        match self {
            EnergyPriceUnit::Gigajoule => 1.0,
            EnergyPriceUnit::Megajoule => 1000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyPriceUnit::Gigajoule => "GJ",
            EnergyPriceUnit::Megajoule => "MJ",
        }
    }
}

impl fmt::Display for EnergyPriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyPriceUnit {
    type Err = UnknownEnergyUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GJ" => Ok(EnergyPriceUnit::Gigajoule),
            "MJ" => Ok(EnergyPriceUnit::Megajoule),
            _ => Err(UnknownEnergyUnit(s.to_string())),
        }
    }
}

/// 에너지 단위당 단가를 GJ당 단가로 환산한다.
pub fn price_per_gj(price_per_unit: f64, unit: EnergyPriceUnit) -> f64 {
    price_per_unit * unit.units_per_gj()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("gj".parse::<EnergyPriceUnit>(), Ok(EnergyPriceUnit::Gigajoule));
        assert_eq!(" Mj ".parse::<EnergyPriceUnit>(), Ok(EnergyPriceUnit::Megajoule));
        assert!("kWh".parse::<EnergyPriceUnit>().is_err());
    }

    #[test]
    fn megajoule_price_scales_by_thousand() {
        assert_eq!(price_per_gj(0.07369, EnergyPriceUnit::Megajoule), 0.07369 * 1000.0);
        assert_eq!(price_per_gj(73.69, EnergyPriceUnit::Gigajoule), 73.69);
    }
}
