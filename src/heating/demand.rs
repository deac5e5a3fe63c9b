/// 물 1 m³의 질량 [kg]
pub const WATER_MASS_PER_M3_KG: f64 = 1000.0;
/// 물의 비열 [kJ/(kg·K)]
pub const WATER_CP_KJ_PER_KG_K: f64 = 4.19;
/// kJ -> GJ 환산 계수
pub const KJ_PER_GJ: f64 = 1_000_000.0;

/// 물 1 m³를 ΔT 만큼 데우는 데 필요한 열량 [GJ/m³].
///
/// Q = m·c·ΔT, m = 1000 kg, c = 4.19 kJ/(kg·K)
pub fn q_gj_per_m3(delta_t: f64) -> f64 {
    WATER_MASS_PER_M3_KG * WATER_CP_KJ_PER_KG_K * delta_t / KJ_PER_GJ
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_delta_t() {
        assert!((q_gj_per_m3(45.0) - 0.18855).abs() < 1e-12);
    }

    #[test]
    fn strictly_increasing() {
        let mut prev = q_gj_per_m3(0.0);
        for dt in 1..=80 {
            let q = q_gj_per_m3(dt as f64);
            assert!(q > prev);
            prev = q;
        }
    }
}
