use crate::units::{price_per_gj, EnergyPriceUnit};

/// 순 열요금을 VAT 포함 GJ당 요금으로 환산한다.
///
/// MJ 기준 요금은 1000배 하여 GJ 기준으로 맞춘 뒤 `(1 + vat/100)`을 곱한다.
/// 유한하지 않은 입력은 그대로 전파된다.
pub fn price_gj_gross(price_net: f64, unit: EnergyPriceUnit, vat_percent: f64) -> f64 {
    price_per_gj(price_net, unit) * (1.0 + vat_percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_vat_markup() {
        let gross = price_gj_gross(73.69, EnergyPriceUnit::Gigajoule, 23.0);
        assert!((gross - 90.6387).abs() < 1e-9);
    }

    #[test]
    fn zero_vat_keeps_net_price() {
        assert_eq!(price_gj_gross(50.0, EnergyPriceUnit::Gigajoule, 0.0), 50.0);
    }

    #[test]
    fn megajoule_equals_thousand_gigajoule() {
        let p = 0.08123;
        let mj = price_gj_gross(p, EnergyPriceUnit::Megajoule, 8.0);
        let gj = price_gj_gross(p * 1000.0, EnergyPriceUnit::Gigajoule, 8.0);
        assert_eq!(mj, gj);
    }
}
