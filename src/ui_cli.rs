use std::fmt::Write as _;
use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::heating::{self, AuditResult, CalculationResult, PipeSegment};
use crate::i18n::{keys, Translator};
use crate::tariffs::TariffTable;
use crate::units::EnergyPriceUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculation,
    Audit,
    Tariffs,
    Settings,
    Tips,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_CALCULATION,
        keys::MAIN_MENU_AUDIT,
        keys::MAIN_MENU_TARIFFS,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_TIPS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculation),
            "2" => return Ok(MenuChoice::Audit),
            "3" => return Ok(MenuChoice::Tariffs),
            "4" => return Ok(MenuChoice::Settings),
            "5" => return Ok(MenuChoice::Tips),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 가열비 계산 메뉴를 처리한다. 엔터만 누르면 설정의 기본값을 쓴다.
pub fn handle_calculation(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CALC_HEADING));
    let d = &cfg.defaults;
    let bill = read_f64_or(tr, tr.t(keys::PROMPT_BILL), d.bill)?;
    let city = read_line(&format!("{} [{}]: ", tr.t(keys::PROMPT_CITY), d.city))?;
    let (price_default, unit_default) = if city.trim().is_empty() {
        (d.heat_price, d.unit)
    } else {
        (cfg.tariffs.price_or_default(&city), EnergyPriceUnit::Gigajoule)
    };
    let heat_price = read_f64_or(tr, tr.t(keys::PROMPT_HEAT_PRICE), price_default)?;
    let unit = read_unit_or(tr, unit_default)?;
    let vat = read_f64_or(tr, tr.t(keys::PROMPT_VAT), d.vat)?;
    let month_m3 = read_f64_or(tr, tr.t(keys::PROMPT_MONTH_M3), d.month_m3)?;
    let dt = read_f64_or(tr, tr.t(keys::PROMPT_DELTA_T), d.dt)?;
    let units = read_u32_or(tr, tr.t(keys::PROMPT_DWELLINGS), d.units)?;

    let input = heating::BillingInput {
        bill_rate: bill,
        heat_price_net: heat_price,
        price_unit: unit,
        vat_percent: vat,
        monthly_consumption_m3: month_m3,
        delta_t: dt,
        dwelling_count: units,
    };
    let result = heating::compute_all(&input)?;
    print!("{}", render_calculation(tr, &result));
    Ok(())
}

/// 배관 단열 감사 메뉴를 처리한다. 개선 설비 입력은 기존 설비 값을 기본값으로 쓴다.
pub fn handle_audit(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::AUDIT_HEADING));
    println!("{}", tr.t(keys::AUDIT_OLD));
    let old = read_segment(tr, &example_segment())?;
    println!("{}", tr.t(keys::AUDIT_NEW));
    let new = read_segment(tr, &old)?;
    let result = heating::compute_audit(&old, &new)?;
    print!("{}", render_audit(tr, &result));
    Ok(())
}

/// 도시별 열요금 표를 출력한다.
pub fn handle_tariffs(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    print!("{}", render_tariffs(tr, &cfg.tariffs));
    Ok(())
}

/// 온수 설비 절감 요령을 출력한다.
pub fn handle_tips(tr: &Translator) -> Result<(), AppError> {
    print!("{}", render_tips(tr));
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 true를 반환한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_CITY), cfg.defaults.city);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    match sel.trim() {
        "" => Ok(false),
        "1" => {
            let code = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let code = code.trim().to_lowercase();
            if !matches!(code.as_str(), "auto" | "pl" | "en" | "ko") {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(false);
            }
            cfg.language = code;
            println!("{}", tr.t(keys::SETTINGS_SAVED));
            Ok(true)
        }
        "2" => {
            let city = read_line(tr.t(keys::SETTINGS_PROMPT_CITY))?;
            if city.trim().is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(false);
            }
            let price = cfg.select_city(&city);
            println!("{} {} ({price:.2} zł/GJ)", tr.t(keys::SETTINGS_SAVED), cfg.defaults.city);
            Ok(false)
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            Ok(false)
        }
    }
}

/// 가열비 계산 결과를 사람이 읽을 수 있는 요약문으로 만든다.
pub fn render_calculation(tr: &Translator, r: &CalculationResult) -> String {
    let mut out = String::new();
    let month = tr.t(keys::RESULT_PER_MONTH);
    let year = tr.t(keys::RESULT_PER_YEAR);
    let _ = writeln!(out, "{}", tr.t(keys::RESULT_HEADING));
    let _ = writeln!(
        out,
        "{} {:.2} zł/m³ | {} {:.2} zł/GJ | ΔT: {:.0}°C",
        tr.t(keys::RESULT_BILL),
        r.input.bill_rate,
        tr.t(keys::RESULT_PRICE_GROSS),
        r.price_gj_gross,
        r.input.delta_t
    );
    let _ = writeln!(
        out,
        "{} {:.5} GJ/m³ -> {} {:.2} zł/m³ | {} {:.1}%",
        tr.t(keys::RESULT_DEMAND),
        r.q_gj_per_m3,
        tr.t(keys::RESULT_COST_THEORETICAL),
        r.cost_theoretical,
        tr.t(keys::RESULT_EFFICIENCY),
        r.efficiency * 100.0
    );
    let _ = writeln!(
        out,
        "{} {:.2} zł/m³ | {} ({:.2} m³): {:.2} zł/{month} | {} ({}): {:.2} zł/{month}; {:.2} zł/{year}",
        tr.t(keys::RESULT_LOSS),
        r.loss.per_m3,
        tr.t(keys::RESULT_FLAT),
        r.input.monthly_consumption_m3,
        r.loss.flat_monthly,
        tr.t(keys::RESULT_BUILDING),
        r.input.dwelling_count,
        r.loss.building_monthly,
        r.loss.building_yearly
    );
    for s in r.scenarios() {
        let _ = writeln!(
            out,
            "{} {:.0}%: {} {:.2} zł/m³ -> {} {:.2} zł/m³ | {} {:.2} zł/{month}; {:.2} zł/{year}",
            tr.t(keys::RESULT_SCENARIO),
            s.target_efficiency * 100.0,
            tr.t(keys::RESULT_SCENARIO_COST),
            s.cost_per_m3,
            tr.t(keys::RESULT_SCENARIO_SAVING),
            s.savings.per_m3,
            tr.t(keys::RESULT_BUILDING),
            s.savings.building_monthly,
            s.savings.building_yearly
        );
    }
    out
}

/// 배관 감사 결과 요약문을 만든다.
pub fn render_audit(tr: &Translator, r: &AuditResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::RESULT_HEADING));
    let _ = writeln!(out, "{} {:.1} kWh", tr.t(keys::RESULT_LOSS_OLD), r.loss_old_kwh);
    let _ = writeln!(out, "{} {:.1} kWh", tr.t(keys::RESULT_LOSS_NEW), r.loss_new_kwh);
    let _ = writeln!(
        out,
        "{} {:.1} kWh ({:.1}%)",
        tr.t(keys::RESULT_AUDIT_SAVINGS),
        r.savings_kwh,
        r.savings_percent
    );
    out
}

/// 요금표 출력문을 만든다.
pub fn render_tariffs(tr: &Translator, table: &TariffTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::TARIFFS_HEADING));
    for (city, price) in table.iter() {
        let _ = writeln!(out, "{city:<12} {price:>8.2} zł/GJ");
    }
    out
}

pub fn render_tips(tr: &Translator) -> String {
    format!("{}\n{}\n", tr.t(keys::TIPS_HEADING), tr.t(keys::TIPS_BODY))
}

/// 대화형 감사 입력의 초기값 (DN32 배관, 10 mm 단열).
fn example_segment() -> PipeSegment {
    PipeSegment {
        power_kw: 100.0,
        length_m: 50.0,
        diameter_mm: 32.0,
        lambda_w_per_mk: 0.035,
        t_supply_c: 60.0,
        t_return_c: 40.0,
        t_ambient_c: 20.0,
        insulation_thickness_mm: 10.0,
        operating_hours_per_year: 2000.0,
    }
}

fn read_segment(tr: &Translator, d: &PipeSegment) -> Result<PipeSegment, AppError> {
    Ok(PipeSegment {
        power_kw: read_f64_or(tr, tr.t(keys::PROMPT_POWER), d.power_kw)?,
        length_m: read_f64_or(tr, tr.t(keys::PROMPT_PIPE_LENGTH), d.length_m)?,
        diameter_mm: read_f64_or(tr, tr.t(keys::PROMPT_PIPE_DIAMETER), d.diameter_mm)?,
        lambda_w_per_mk: read_f64_or(tr, tr.t(keys::PROMPT_LAMBDA), d.lambda_w_per_mk)?,
        t_supply_c: read_f64_or(tr, tr.t(keys::PROMPT_T_SUPPLY), d.t_supply_c)?,
        t_return_c: read_f64_or(tr, tr.t(keys::PROMPT_T_RETURN), d.t_return_c)?,
        t_ambient_c: read_f64_or(tr, tr.t(keys::PROMPT_T_AMBIENT), d.t_ambient_c)?,
        insulation_thickness_mm: read_f64_or(
            tr,
            tr.t(keys::PROMPT_INSULATION),
            d.insulation_thickness_mm,
        )?,
        operating_hours_per_year: read_f64_or(
            tr,
            tr.t(keys::PROMPT_HOURS),
            d.operating_hours_per_year,
        )?,
    })
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

/// 소수점 구분자로 쉼표도 받아들인다 ("7,42").
fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok()
}

fn read_f64_or(tr: &Translator, label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match parse_decimal(&s) {
            Some(v) => return Ok(v),
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_u32_or(tr: &Translator, label: &str, default: u32) -> Result<u32, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_unit_or(tr: &Translator, default: EnergyPriceUnit) -> Result<EnergyPriceUnit, AppError> {
    loop {
        let s = read_line(&format!("{} [{default}]: ", tr.t(keys::PROMPT_UNIT)))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.parse::<EnergyPriceUnit>() {
            Ok(unit) => return Ok(unit),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_UNIT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heating::BillingInput;

    fn reference_result() -> CalculationResult {
        heating::compute_all(&BillingInput {
            bill_rate: 49.0,
            heat_price_net: 73.69,
            price_unit: EnergyPriceUnit::Gigajoule,
            vat_percent: 23.0,
            monthly_consumption_m3: 7.42,
            delta_t: 45.0,
            dwelling_count: 65,
        })
        .expect("calc")
    }

    #[test]
    fn calculation_summary_contains_key_figures() {
        let text = render_calculation(&Translator::new("en"), &reference_result());
        assert!(text.contains("90.64 zł/GJ"), "{text}");
        assert!(text.contains("0.18855 GJ/m³"), "{text}");
        assert!(text.contains("17.09 zł/m³"), "{text}");
        assert!(text.contains("34.9%"), "{text}");
        assert!(text.contains("Target efficiency 70%"), "{text}");
        assert!(text.contains("Target efficiency 80%"), "{text}");
    }

    #[test]
    fn polish_summary_uses_polish_labels() {
        let text = render_calculation(&Translator::new("pl"), &reference_result());
        assert!(text.contains("Sprawność η: 34.9%"), "{text}");
    }

    #[test]
    fn tariff_listing_has_every_city() {
        let text = render_tariffs(&Translator::new("en"), &TariffTable::default());
        for city in ["Kraków", "Warszawa", "Lublin", "Katowice"] {
            assert!(text.contains(city));
        }
        assert!(text.contains("85.00 zł/GJ"));
    }

    #[test]
    fn tips_are_translated() {
        let text = render_tips(&Translator::new("pl"));
        assert!(text.contains("Porady oszczędności"), "{text}");
        assert!(text.contains("anty-Legionella"), "{text}");
        let text = render_tips(&Translator::new("en"));
        assert!(text.contains("circulation pipes"), "{text}");
    }

    #[test]
    fn decimal_comma_is_accepted() {
        assert_eq!(parse_decimal("7,42\n"), Some(7.42));
        assert_eq!(parse_decimal("abc"), None);
    }
}
