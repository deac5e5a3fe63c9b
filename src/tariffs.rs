use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 도시를 찾지 못했을 때 사용하는 기본 도시.
pub const DEFAULT_CITY: &str = "Kraków";
/// 기본 도시의 순 열요금 [zł/GJ]
pub const DEFAULT_CITY_PRICE: f64 = 73.69;

/// 도시별 순 열요금 [zł/GJ] 표.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TariffTable {
    prices: BTreeMap<String, f64>,
}

impl Default for TariffTable {
    fn default() -> Self {
        let prices = [
            (DEFAULT_CITY, DEFAULT_CITY_PRICE),
            ("Warszawa", 85.00),
            ("Lublin", 65.50),
            ("Katowice", 70.00),
        ]
        .into_iter()
        .map(|(city, price)| (city.to_string(), price))
        .collect();
        Self { prices }
    }
}

impl TariffTable {
    pub fn new(prices: BTreeMap<String, f64>) -> Self {
        Self { prices }
    }

    /// 도시 이름(대소문자 무시)으로 요금을 찾는다.
    pub fn get(&self, city: &str) -> Option<f64> {
        let wanted = city.trim().to_lowercase();
        self.prices
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, price)| *price)
    }

    /// 요금을 찾고, 없으면 기본 도시 요금으로 폴백한다.
    ///
    /// 기본 도시도 표에 없으면 내장 기본표의 값을 쓴다.
    pub fn price_or_default(&self, city: &str) -> f64 {
        self.get(city)
            .or_else(|| self.get(DEFAULT_CITY))
            .unwrap_or(DEFAULT_CITY_PRICE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
