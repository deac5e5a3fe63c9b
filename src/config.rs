use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::heating::BillingInput;
use crate::tariffs::{TariffTable, DEFAULT_CITY, DEFAULT_CITY_PRICE};
use crate::units::EnergyPriceUnit;

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력 화면/CLI 플래그의 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// 청구 단가 [zł/m³]
    pub bill: f64,
    pub city: String,
    /// 순 열요금 [zł/GJ 또는 zł/MJ]
    pub heat_price: f64,
    pub unit: EnergyPriceUnit,
    /// 부가세율 [%]
    pub vat: f64,
    /// 세대당 월 사용량 [m³]
    pub month_m3: f64,
    /// 가열 온도차 [°C]
    #[serde(rename = "dT")]
    pub dt: f64,
    /// 세대 수
    pub units: u32,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            bill: 49.00,
            city: DEFAULT_CITY.to_string(),
            heat_price: DEFAULT_CITY_PRICE,
            unit: EnergyPriceUnit::Gigajoule,
            vat: 23.0,
            month_m3: 7.42,
            dt: 45.0,
            units: 65,
        }
    }
}

impl FormDefaults {
    pub fn to_billing_input(&self) -> BillingInput {
        BillingInput {
            bill_rate: self.bill,
            heat_price_net: self.heat_price,
            price_unit: self.unit,
            vat_percent: self.vat,
            monthly_consumption_m3: self.month_m3,
            delta_t: self.dt,
            dwelling_count: self.units,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/pl/en/ko)
    pub language: String,
    /// 언어팩 디렉터리. 없으면 locales/ 와 내장 문자열을 쓴다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    pub defaults: FormDefaults,
    pub tariffs: TariffTable,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            defaults: FormDefaults::default(),
            tariffs: TariffTable::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        cfg
    } else {
        let cfg = Config::default();
        save_to(&cfg, path)?;
        info!(path = %path.display(), "created default config");
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

/// 설정을 지정한 경로에 저장한다.
pub fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 로드했던 경로(없으면 config.toml)에 설정을 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_to(self, &path)
    }

    /// 설정된 요금표에서 기본 도시의 요금을 골라 입력 기본값에 반영한다.
    pub fn select_city(&mut self, city: &str) -> f64 {
        let price = self.tariffs.price_or_default(city);
        self.defaults.city = city.trim().to_string();
        self.defaults.heat_price = price;
        self.defaults.unit = EnergyPriceUnit::Gigajoule;
        price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_uses_defaults() {
        let cfg: Config = toml::from_str("language = \"pl\"\n").expect("parse");
        assert_eq!(cfg.language, "pl");
        assert_eq!(cfg.defaults, FormDefaults::default());
        assert_eq!(cfg.tariffs.get("Lublin"), Some(65.50));
    }

    #[test]
    fn select_city_updates_price() {
        let mut cfg = Config::default();
        assert_eq!(cfg.select_city("Warszawa"), 85.00);
        assert_eq!(cfg.defaults.city, "Warszawa");
        assert_eq!(cfg.defaults.heat_price, 85.00);
    }
}
