use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use super::{all_finite, CalcError};
use crate::units::{convert_length, LengthUnit};

/// 단열 배관 구간의 열손실 계산 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSegment {
    /// 설비 출력 [kW]. 참고용으로만 보관하고 손실식에는 쓰지 않는다.
    pub power_kw: f64,
    /// 배관 길이 [m]
    pub length_m: f64,
    /// 배관 내경(단열재 안쪽 지름) [mm]
    pub diameter_mm: f64,
    /// 단열재 열전도율 λ [W/(m·K)]
    pub lambda_w_per_mk: f64,
    /// 공급 온도 [°C]
    pub t_supply_c: f64,
    /// 환수 온도 [°C]
    pub t_return_c: f64,
    /// 주위 온도 [°C]
    pub t_ambient_c: f64,
    /// 단열 두께 [mm]
    pub insulation_thickness_mm: f64,
    /// 연간 운전 시간 [h/년]
    pub operating_hours_per_year: f64,
}

/// 기존/개선 배관 손실 비교 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// 기존 배관 연간 열손실 [kWh/년]
    pub loss_old_kwh: f64,
    /// 개선 배관 연간 열손실 [kWh/년]
    pub loss_new_kwh: f64,
    /// 절감량 [kWh/년]
    pub savings_kwh: f64,
    /// 절감률 [%]
    pub savings_percent: f64,
}

impl PipeSegment {
    fn validate(&self) -> Result<(), CalcError> {
        if !all_finite(&[
            self.power_kw,
            self.length_m,
            self.diameter_mm,
            self.lambda_w_per_mk,
            self.t_supply_c,
            self.t_return_c,
            self.t_ambient_c,
            self.insulation_thickness_mm,
            self.operating_hours_per_year,
        ]) {
            return Err(CalcError::InvalidInput("모든 배관 입력값은 유한한 숫자여야 합니다."));
        }
        if self.diameter_mm <= 0.0 || self.inner_diameter_m() <= 0.0 {
            return Err(CalcError::InvalidInput("배관 내경은 0보다 커야 합니다."));
        }
        if self.outer_diameter_m() <= self.inner_diameter_m() {
            return Err(CalcError::InvalidInput(
                "단열 외경은 배관 내경보다 커야 합니다 (단열 두께 > 0).",
            ));
        }
        Ok(())
    }

    pub fn inner_diameter_m(&self) -> f64 {
        convert_length(self.diameter_mm, LengthUnit::Millimeter, LengthUnit::Meter)
    }

    pub fn outer_diameter_m(&self) -> f64 {
        self.inner_diameter_m()
            + 2.0
                * convert_length(
                    self.insulation_thickness_mm,
                    LengthUnit::Millimeter,
                    LengthUnit::Meter,
                )
    }

    /// 공급/환수 평균 온도 [°C]
    pub fn mean_temperature_c(&self) -> f64 {
        (self.t_supply_c + self.t_return_c) / 2.0
    }
}

/// 원통 단열재 정상상태 전도식으로 단위 길이당 열손실을 계산한다 [W/m].
///
/// q = 2π·λ·(T_mean - T_amb) / ln(d_out / d_in)
pub fn linear_heat_loss_w_per_m(segment: &PipeSegment) -> Result<f64, CalcError> {
    segment.validate()?;
    let log_ratio = (segment.outer_diameter_m() / segment.inner_diameter_m()).ln();
    if !log_ratio.is_finite() || log_ratio <= 0.0 {
        return Err(CalcError::InvalidInput(
            "단열 외경/내경 비가 계산 가능한 범위를 벗어났습니다.",
        ));
    }
    finite_or_overflow(
        2.0 * PI * segment.lambda_w_per_mk * (segment.mean_temperature_c() - segment.t_ambient_c)
            / log_ratio,
    )
}

/// 배관 구간의 연간 열손실을 계산한다 [kWh/년].
pub fn annual_heat_loss_kwh(segment: &PipeSegment) -> Result<f64, CalcError> {
    let q = linear_heat_loss_w_per_m(segment)?;
    finite_or_overflow(q * segment.length_m * segment.operating_hours_per_year / 1000.0)
}

fn finite_or_overflow(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput(
            "입력값이 너무 커서 열손실이 유한하지 않습니다.",
        ))
    }
}

/// 기존 배관과 개선 배관의 연간 손실을 비교한다.
pub fn compute_audit(old: &PipeSegment, new: &PipeSegment) -> Result<AuditResult, CalcError> {
    let loss_old_kwh = annual_heat_loss_kwh(old)?;
    let loss_new_kwh = annual_heat_loss_kwh(new)?;
    let savings_kwh = finite_or_overflow(loss_old_kwh - loss_new_kwh)?;
    let savings_percent = if loss_old_kwh != 0.0 {
        finite_or_overflow(100.0 * savings_kwh / loss_old_kwh)?
    } else {
        0.0
    };
    debug!(loss_old_kwh, loss_new_kwh, savings_percent, "pipe audit computed");
    Ok(AuditResult {
        loss_old_kwh,
        loss_new_kwh,
        savings_kwh,
        savings_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(lambda: f64, ins: f64) -> PipeSegment {
        PipeSegment {
            power_kw: 100.0,
            length_m: 50.0,
            diameter_mm: 32.0,
            lambda_w_per_mk: lambda,
            t_supply_c: 60.0,
            t_return_c: 40.0,
            t_ambient_c: 20.0,
            insulation_thickness_mm: ins,
            operating_hours_per_year: 2000.0,
        }
    }

    #[test]
    fn zero_diameter_is_rejected() {
        let s = PipeSegment {
            diameter_mm: 0.0,
            ..segment(0.035, 10.0)
        };
        assert!(matches!(
            annual_heat_loss_kwh(&s),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn missing_insulation_is_rejected() {
        let s = segment(0.035, 0.0);
        assert!(linear_heat_loss_w_per_m(&s).is_err());
        let s = segment(0.035, -20.0);
        assert!(linear_heat_loss_w_per_m(&s).is_err());
    }

    #[test]
    fn subnormal_diameter_is_rejected() {
        let s = PipeSegment {
            diameter_mm: 5e-324,
            ..segment(0.035, 10.0)
        };
        assert_eq!(s.inner_diameter_m(), 0.0);
        assert!(matches!(
            linear_heat_loss_w_per_m(&s),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn overflowing_loss_is_rejected() {
        let mut s = segment(1e300, 10.0);
        s.length_m = 1e300;
        s.operating_hours_per_year = 1e300;
        assert!(annual_heat_loss_kwh(&s).is_err());
        assert!(compute_audit(&s, &segment(0.025, 30.0)).is_err());
    }

    #[test]
    fn linear_loss_reference() {
        // ln(52/32) ≈ 0.48551, 2π·0.035·30 / 0.48551 ≈ 13.588 W/m
        let q = linear_heat_loss_w_per_m(&segment(0.035, 10.0)).expect("q");
        assert!((q - 13.5885).abs() < 1e-3, "q={q}");
    }

    #[test]
    fn zero_old_loss_reports_zero_percent() {
        let mut old = segment(0.035, 10.0);
        old.operating_hours_per_year = 0.0;
        let res = compute_audit(&old, &segment(0.025, 30.0)).expect("audit");
        assert_eq!(res.loss_old_kwh, 0.0);
        assert_eq!(res.savings_percent, 0.0);
    }
}
