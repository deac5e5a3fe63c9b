use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{all_finite, price_gj_gross, q_gj_per_m3, CalcError};
use crate::units::EnergyPriceUnit;

/// 월 사용량을 연간으로 환산하는 개월 수
pub const MONTHS_PER_YEAR: f64 = 12.0;
/// 비교 시나리오에 사용하는 목표 효율
pub const TARGET_EFFICIENCIES: [f64; 2] = [0.70, 0.80];

/// 가열비 계산 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingInput {
    /// 청구된 온수 가열 단가 [zł/m³]
    pub bill_rate: f64,
    /// 순 열요금 [zł/단위]
    pub heat_price_net: f64,
    pub price_unit: EnergyPriceUnit,
    /// 부가세율 [%]
    pub vat_percent: f64,
    /// 세대당 월 온수 사용량 [m³]
    pub monthly_consumption_m3: f64,
    /// 가열 온도차 [°C]
    pub delta_t: f64,
    /// 건물 내 세대 수
    pub dwelling_count: u32,
}

impl BillingInput {
    fn validate(&self) -> Result<(), CalcError> {
        if !all_finite(&[
            self.bill_rate,
            self.heat_price_net,
            self.vat_percent,
            self.monthly_consumption_m3,
            self.delta_t,
        ]) {
            return Err(CalcError::InvalidInput("모든 입력값은 유한한 숫자여야 합니다."));
        }
        if self.dwelling_count == 0 {
            return Err(CalcError::InvalidInput("세대 수는 0보다 커야 합니다."));
        }
        Ok(())
    }
}

/// m³당 금액을 세대/건물, 월/연 단위로 확장한 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledAmount {
    /// [zł/m³]
    pub per_m3: f64,
    /// 세대 월간 [zł]
    pub flat_monthly: f64,
    /// 건물 월간 [zł]
    pub building_monthly: f64,
    /// 건물 연간 [zł]
    pub building_yearly: f64,
}

impl ScaledAmount {
    pub fn scale(per_m3: f64, monthly_consumption_m3: f64, dwelling_count: u32) -> Self {
        let flat_monthly = per_m3 * monthly_consumption_m3;
        let building_monthly = flat_monthly * f64::from(dwelling_count);
        Self {
            per_m3,
            flat_monthly,
            building_monthly,
            building_yearly: building_monthly * MONTHS_PER_YEAR,
        }
    }

    pub fn is_finite(&self) -> bool {
        all_finite(&[
            self.per_m3,
            self.flat_monthly,
            self.building_monthly,
            self.building_yearly,
        ])
    }
}

/// 목표 효율 달성 시의 단가와 절감액.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsScenario {
    /// 목표 효율 (0~1)
    pub target_efficiency: f64,
    /// 목표 효율에서의 가열 단가 [zł/m³]
    pub cost_per_m3: f64,
    /// 절감액. 음수가 되지 않도록 0에서 하한을 둔다.
    pub savings: ScaledAmount,
}

/// 가열비 계산 결과. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub input: BillingInput,
    /// VAT 포함 열요금 [zł/GJ]
    pub price_gj_gross: f64,
    /// m³당 필요 열량 [GJ/m³]
    pub q_gj_per_m3: f64,
    /// 이론 가열 단가 [zł/m³]
    pub cost_theoretical: f64,
    /// 효율 η (0~1)
    pub efficiency: f64,
    /// 손실(청구 단가 - 이론 단가). 음수면 손실이 없다는 뜻이다.
    pub loss: ScaledAmount,
    pub save70: SavingsScenario,
    pub save80: SavingsScenario,
}

impl CalculationResult {
    pub fn scenarios(&self) -> [&SavingsScenario; 2] {
        [&self.save70, &self.save80]
    }

    /// 유한한 입력이라도 곱셈 중에 넘칠 수 있으므로 파생값 전체를 확인한다.
    fn check_finite(&self) -> Result<(), CalcError> {
        let scalars_ok = all_finite(&[
            self.price_gj_gross,
            self.q_gj_per_m3,
            self.cost_theoretical,
            self.efficiency,
            self.save70.cost_per_m3,
            self.save80.cost_per_m3,
        ]);
        if scalars_ok
            && self.loss.is_finite()
            && self.save70.savings.is_finite()
            && self.save80.savings.is_finite()
        {
            Ok(())
        } else {
            Err(CalcError::InvalidInput(
                "입력값이 너무 커서 계산 결과가 유한하지 않습니다.",
            ))
        }
    }
}

/// 청구 단가와 이론 단가로 효율을 계산한다.
///
/// 청구 단가가 0 이하이면 비율을 정의할 수 없으므로 0을 반환한다.
pub fn efficiency_ratio(cost_theoretical: f64, bill_rate: f64) -> f64 {
    if bill_rate > 0.0 {
        (cost_theoretical / bill_rate).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// 목표 효율에서의 단가와 절감액을 계산한다.
pub fn savings_at(
    target_efficiency: f64,
    q_gj_per_m3: f64,
    price_gj_gross: f64,
    input: &BillingInput,
) -> SavingsScenario {
    let cost_per_m3 = q_gj_per_m3 / target_efficiency * price_gj_gross;
    let per_m3 = (input.bill_rate - cost_per_m3).max(0.0);
    SavingsScenario {
        target_efficiency,
        cost_per_m3,
        savings: ScaledAmount::scale(per_m3, input.monthly_consumption_m3, input.dwelling_count),
    }
}

/// 이론 단가, 효율, 손실, 70%/80% 절감 시나리오를 한 번에 계산한다.
pub fn compute_all(input: &BillingInput) -> Result<CalculationResult, CalcError> {
    if let Err(e) = input.validate() {
        warn!(error = %e, "rejected billing input");
        return Err(e);
    }
    debug!(?input, "computing heating cost");

    let price_gross = price_gj_gross(input.heat_price_net, input.price_unit, input.vat_percent);
    let q = q_gj_per_m3(input.delta_t);
    let cost_theoretical = q * price_gross;
    if input.bill_rate <= 0.0 {
        warn!(bill_rate = input.bill_rate, "non-positive bill rate, efficiency set to 0");
    }
    let efficiency = efficiency_ratio(cost_theoretical, input.bill_rate);

    let loss = ScaledAmount::scale(
        input.bill_rate - cost_theoretical,
        input.monthly_consumption_m3,
        input.dwelling_count,
    );
    let [e70, e80] = TARGET_EFFICIENCIES;

    let result = CalculationResult {
        input: input.clone(),
        price_gj_gross: price_gross,
        q_gj_per_m3: q,
        cost_theoretical,
        efficiency,
        loss,
        save70: savings_at(e70, q, price_gross, input),
        save80: savings_at(e80, q, price_gross, input),
    };
    if let Err(e) = result.check_finite() {
        warn!(error = %e, ?input, "derived values overflowed");
        return Err(e);
    }
    Ok(result)
}
