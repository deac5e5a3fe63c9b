//! 외부 프런트엔드와 주고받는 JSON 요청/응답 형식.
//!
//! 필드 이름은 기존 웹/데스크톱 화면이 쓰던 키를 그대로 유지한다.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::heating::{self, AuditResult, BillingInput, CalcError, CalculationResult, PipeSegment};
use crate::units::EnergyPriceUnit;

/// 요청 처리 중 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// JSON 파싱/직렬화 오류
    #[error("JSON 오류: {0}")]
    Json(#[from] serde_json::Error),
    /// 계산 입력 오류
    #[error(transparent)]
    Calc(#[from] CalcError),
}

fn default_vat() -> f64 {
    23.0
}

/// 세대 수는 정수, 소수부가 0인 실수(65.0), 정수 문자열("65")을 모두 받는다.
fn de_dwelling_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(u32),
        Float(f64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Int(n) => Ok(n),
        Count::Float(v) if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) => {
            Ok(v as u32)
        }
        Count::Float(v) => Err(D::Error::custom(format!(
            "units must be a whole non-negative number, got {v}"
        ))),
        Count::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| D::Error::custom(format!("units must be a whole number, got {s:?}"))),
    }
}

/// 가열비 계산 요청.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcRequest {
    pub bill: f64,
    pub heat_price: f64,
    #[serde(default)]
    pub unit: EnergyPriceUnit,
    #[serde(default = "default_vat")]
    pub vat: f64,
    pub month_m3: f64,
    #[serde(deserialize_with = "de_dwelling_count")]
    pub units: u32,
    #[serde(rename = "dT")]
    pub dt: f64,
}

impl From<CalcRequest> for BillingInput {
    fn from(r: CalcRequest) -> Self {
        BillingInput {
            bill_rate: r.bill,
            heat_price_net: r.heat_price,
            price_unit: r.unit,
            vat_percent: r.vat,
            monthly_consumption_m3: r.month_m3,
            delta_t: r.dt,
            dwelling_count: r.units,
        }
    }
}

/// 가열비 계산 응답. 입력값을 함께 돌려준다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResponse {
    pub bill: f64,
    pub heat_price: f64,
    pub unit: EnergyPriceUnit,
    pub vat: f64,
    #[serde(rename = "dT")]
    pub dt: f64,
    pub month_m3: f64,
    pub units: u32,
    #[serde(rename = "price_GJ_brutto")]
    pub price_gj_brutto: f64,
    pub q_per_m3: f64,
    pub cost_theor: f64,
    pub eta: f64,
    pub loss_per_m3: f64,
    pub loss_flat_m: f64,
    pub loss_build_m: f64,
    pub loss_build_y: f64,
    pub cost70: f64,
    pub cost80: f64,
    pub save70_m3: f64,
    pub save80_m3: f64,
    pub save70_flat_m: f64,
    pub save80_flat_m: f64,
    pub save70_build_m: f64,
    pub save80_build_m: f64,
    pub save70_build_y: f64,
    pub save80_build_y: f64,
}

impl From<&CalculationResult> for CalcResponse {
    fn from(r: &CalculationResult) -> Self {
        let s70 = &r.save70.savings;
        let s80 = &r.save80.savings;
        CalcResponse {
            bill: r.input.bill_rate,
            heat_price: r.input.heat_price_net,
            unit: r.input.price_unit,
            vat: r.input.vat_percent,
            dt: r.input.delta_t,
            month_m3: r.input.monthly_consumption_m3,
            units: r.input.dwelling_count,
            price_gj_brutto: r.price_gj_gross,
            q_per_m3: r.q_gj_per_m3,
            cost_theor: r.cost_theoretical,
            eta: r.efficiency,
            loss_per_m3: r.loss.per_m3,
            loss_flat_m: r.loss.flat_monthly,
            loss_build_m: r.loss.building_monthly,
            loss_build_y: r.loss.building_yearly,
            cost70: r.save70.cost_per_m3,
            cost80: r.save80.cost_per_m3,
            save70_m3: s70.per_m3,
            save80_m3: s80.per_m3,
            save70_flat_m: s70.flat_monthly,
            save80_flat_m: s80.flat_monthly,
            save70_build_m: s70.building_monthly,
            save80_build_m: s80.building_monthly,
            save70_build_y: s70.building_yearly,
            save80_build_y: s80.building_yearly,
        }
    }
}

/// 배관 구간 파라미터 (감사 요청용).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeParams {
    /// 출력 [kW]
    #[serde(rename = "Q")]
    pub q: f64,
    /// 길이 [m]
    #[serde(rename = "L")]
    pub l: f64,
    /// 내경 [mm]
    pub d: f64,
    pub lambda: f64,
    pub t_in: f64,
    pub t_out: f64,
    pub t_amb: f64,
    /// 단열 두께 [mm]
    pub ins_thick: f64,
    /// 연간 운전 시간 [h]
    pub czas_pracy: f64,
}

impl From<&PipeParams> for PipeSegment {
    fn from(p: &PipeParams) -> Self {
        PipeSegment {
            power_kw: p.q,
            length_m: p.l,
            diameter_mm: p.d,
            lambda_w_per_mk: p.lambda,
            t_supply_c: p.t_in,
            t_return_c: p.t_out,
            t_ambient_c: p.t_amb,
            insulation_thickness_mm: p.ins_thick,
            operating_hours_per_year: p.czas_pracy,
        }
    }
}

/// 기존/개선 배관 비교 요청.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub old: PipeParams,
    pub new: PipeParams,
}

/// 배관 비교 응답.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditResponse {
    #[serde(rename = "Q_loss_old")]
    pub q_loss_old: f64,
    #[serde(rename = "Q_loss_new")]
    pub q_loss_new: f64,
    #[serde(rename = "oszczednosc_kWh")]
    pub oszczednosc_kwh: f64,
    pub oszczednosc_proc: f64,
}

impl From<AuditResult> for AuditResponse {
    fn from(r: AuditResult) -> Self {
        AuditResponse {
            q_loss_old: r.loss_old_kwh,
            q_loss_new: r.loss_new_kwh,
            oszczednosc_kwh: r.savings_kwh,
            oszczednosc_proc: r.savings_percent,
        }
    }
}

/// 요청을 계산하여 응답을 만든다.
pub fn compute(request: CalcRequest) -> Result<CalcResponse, CalcError> {
    let input = BillingInput::from(request);
    let result = heating::compute_all(&input)?;
    Ok(CalcResponse::from(&result))
}

/// JSON 문자열 요청을 받아 JSON 응답을 반환한다.
pub fn compute_json(body: &str) -> Result<String, WireError> {
    let request: CalcRequest = serde_json::from_str(body)?;
    let response = compute(request)?;
    Ok(serde_json::to_string(&response)?)
}

/// 배관 비교 요청을 계산한다.
pub fn audit(request: &AuditRequest) -> Result<AuditResponse, CalcError> {
    let old = PipeSegment::from(&request.old);
    let new = PipeSegment::from(&request.new);
    Ok(heating::compute_audit(&old, &new)?.into())
}

/// JSON 문자열 배관 비교 요청을 받아 JSON 응답을 반환한다.
pub fn audit_json(body: &str) -> Result<String, WireError> {
    let request: AuditRequest = serde_json::from_str(body)?;
    let response = audit(&request)?;
    Ok(serde_json::to_string(&response)?)
}
