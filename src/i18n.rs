use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CALCULATION: &str = "main_menu.calculation";
    pub const MAIN_MENU_AUDIT: &str = "main_menu.audit";
    pub const MAIN_MENU_TARIFFS: &str = "main_menu.tariffs";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_TIPS: &str = "main_menu.tips";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const CALC_HEADING: &str = "calc.heading";
    pub const PROMPT_BILL: &str = "prompt.bill";
    pub const PROMPT_CITY: &str = "prompt.city";
    pub const PROMPT_HEAT_PRICE: &str = "prompt.heat_price";
    pub const PROMPT_UNIT: &str = "prompt.unit";
    pub const PROMPT_VAT: &str = "prompt.vat";
    pub const PROMPT_MONTH_M3: &str = "prompt.month_m3";
    pub const PROMPT_DELTA_T: &str = "prompt.delta_t";
    pub const PROMPT_DWELLINGS: &str = "prompt.dwellings";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_BILL: &str = "result.bill";
    pub const RESULT_PRICE_GROSS: &str = "result.price_gross";
    pub const RESULT_DEMAND: &str = "result.demand";
    pub const RESULT_COST_THEORETICAL: &str = "result.cost_theoretical";
    pub const RESULT_EFFICIENCY: &str = "result.efficiency";
    pub const RESULT_LOSS: &str = "result.loss";
    pub const RESULT_FLAT: &str = "result.flat";
    pub const RESULT_BUILDING: &str = "result.building";
    pub const RESULT_PER_MONTH: &str = "result.per_month";
    pub const RESULT_PER_YEAR: &str = "result.per_year";
    pub const RESULT_SCENARIO: &str = "result.scenario";
    pub const RESULT_SCENARIO_COST: &str = "result.scenario_cost";
    pub const RESULT_SCENARIO_SAVING: &str = "result.scenario_saving";

    pub const AUDIT_HEADING: &str = "audit.heading";
    pub const AUDIT_OLD: &str = "audit.old";
    pub const AUDIT_NEW: &str = "audit.new";
    pub const PROMPT_POWER: &str = "prompt.power";
    pub const PROMPT_PIPE_LENGTH: &str = "prompt.pipe_length";
    pub const PROMPT_PIPE_DIAMETER: &str = "prompt.pipe_diameter";
    pub const PROMPT_LAMBDA: &str = "prompt.lambda";
    pub const PROMPT_T_SUPPLY: &str = "prompt.t_supply";
    pub const PROMPT_T_RETURN: &str = "prompt.t_return";
    pub const PROMPT_T_AMBIENT: &str = "prompt.t_ambient";
    pub const PROMPT_INSULATION: &str = "prompt.insulation";
    pub const PROMPT_HOURS: &str = "prompt.hours";
    pub const RESULT_LOSS_OLD: &str = "result.loss_old";
    pub const RESULT_LOSS_NEW: &str = "result.loss_new";
    pub const RESULT_AUDIT_SAVINGS: &str = "result.audit_savings";

    pub const TARIFFS_HEADING: &str = "tariffs.heading";

    pub const TIPS_HEADING: &str = "tips.heading";
    pub const TIPS_BODY: &str = "tips.body";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_CURRENT_CITY: &str = "settings.current_city";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_CITY: &str = "settings.prompt_city";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INVALID_UNIT: &str = "error.invalid_unit";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Pl,
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("pl") {
            Language::Pl
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Pl => "pl",
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(pl/en/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 > 내장 문자열 > 영어 순으로 찾고, 없으면 키를 그대로 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let built_in = match self.lang {
            Language::Pl => pl(key),
            Language::Ko => ko(key),
            Language::En => None,
        };
        match built_in.or_else(|| en(key)) {
            Some(s) => s,
            None => key,
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("pl") => Some("pl".into()),
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "pl" | "en" | "ko" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Hot water heating cost ===",
        MAIN_MENU_CALCULATION => "1) Heating cost and efficiency",
        MAIN_MENU_AUDIT => "2) Pipe insulation audit",
        MAIN_MENU_TARIFFS => "3) City heat tariffs",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_TIPS => "5) Energy-saving tips",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        CALC_HEADING => "\n-- Heating cost --",
        PROMPT_BILL => "Billed rate [zł/m³]",
        PROMPT_CITY => "City (tariff preset)",
        PROMPT_HEAT_PRICE => "Net heat price [zł/unit]",
        PROMPT_UNIT => "Price unit (GJ/MJ)",
        PROMPT_VAT => "VAT [%]",
        PROMPT_MONTH_M3 => "Monthly consumption per flat [m³]",
        PROMPT_DELTA_T => "Temperature rise ΔT [°C]",
        PROMPT_DWELLINGS => "Number of flats in the building",
        RESULT_HEADING => "\n-- Result --",
        RESULT_BILL => "Billed rate:",
        RESULT_PRICE_GROSS => "Gross heat price:",
        RESULT_DEMAND => "Heat demand Q:",
        RESULT_COST_THEORETICAL => "Theoretical cost:",
        RESULT_EFFICIENCY => "Efficiency η:",
        RESULT_LOSS => "Loss:",
        RESULT_FLAT => "flat",
        RESULT_BUILDING => "building",
        RESULT_PER_MONTH => "month",
        RESULT_PER_YEAR => "year",
        RESULT_SCENARIO => "Target efficiency",
        RESULT_SCENARIO_COST => "cost",
        RESULT_SCENARIO_SAVING => "saving",
        AUDIT_HEADING => "\n-- Pipe insulation audit --",
        AUDIT_OLD => "[existing installation]",
        AUDIT_NEW => "[new installation]",
        PROMPT_POWER => "Power [kW]",
        PROMPT_PIPE_LENGTH => "Pipe length [m]",
        PROMPT_PIPE_DIAMETER => "Pipe diameter [mm]",
        PROMPT_LAMBDA => "Insulation conductivity λ [W/(m·K)]",
        PROMPT_T_SUPPLY => "Supply temperature [°C]",
        PROMPT_T_RETURN => "Return temperature [°C]",
        PROMPT_T_AMBIENT => "Ambient temperature [°C]",
        PROMPT_INSULATION => "Insulation thickness [mm]",
        PROMPT_HOURS => "Operating hours per year [h]",
        RESULT_LOSS_OLD => "Annual loss, existing:",
        RESULT_LOSS_NEW => "Annual loss, new:",
        RESULT_AUDIT_SAVINGS => "Savings:",
        TARIFFS_HEADING => "\n-- City heat tariffs (net) --",
        TIPS_HEADING => "\n-- Energy-saving tips --",
        TIPS_BODY => "\
• Keep hot water at 55–60°C with anti-Legionella control.
• Insulate distribution and circulation pipes.
• Use thermostatic valves and balance the circulation; check riser balance.
• Control pumps by return temperature or a schedule.
• Service the heat exchangers and substation controls; eliminate overheating.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_CURRENT_CITY => "Default city:",
        SETTINGS_OPTIONS => "1) Language  2) Default city",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/pl/en/ko): ",
        SETTINGS_PROMPT_CITY => "City: ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings updated.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_INVALID_UNIT => "Enter GJ or MJ.",
        _ => return None,
    })
}

fn pl(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Błąd",
        APP_EXIT => "Zamykanie programu.",
        MAIN_MENU_TITLE => "\n=== Koszt podgrzania CWU ===",
        MAIN_MENU_CALCULATION => "1) Koszt i sprawność podgrzania",
        MAIN_MENU_AUDIT => "2) Audyt izolacji przewodów",
        MAIN_MENU_TARIFFS => "3) Ceny ciepła w miastach",
        MAIN_MENU_SETTINGS => "4) Ustawienia",
        MAIN_MENU_TIPS => "5) Porady oszczędności",
        MAIN_MENU_EXIT => "0) Wyjście",
        PROMPT_MENU_SELECT => "Wybierz opcję: ",
        INVALID_SELECTION_RETRY => "Nieprawidłowy wybór. Spróbuj ponownie.",
        CALC_HEADING => "\n-- Koszt podgrzania --",
        PROMPT_BILL => "Stawka z rachunku [zł/m³]",
        PROMPT_CITY => "Miasto (cena ciepła)",
        PROMPT_HEAT_PRICE => "Cena ciepła netto [zł/jedn.]",
        PROMPT_UNIT => "Jednostka ceny (GJ/MJ)",
        PROMPT_VAT => "VAT [%]",
        PROMPT_MONTH_M3 => "Miesięczne zużycie mieszkania [m³]",
        PROMPT_DELTA_T => "Przyrost temperatury ΔT [°C]",
        PROMPT_DWELLINGS => "Liczba mieszkań w budynku",
        RESULT_HEADING => "\n-- Wynik --",
        RESULT_BILL => "Rachunek:",
        RESULT_PRICE_GROSS => "Cena ciepła brutto:",
        RESULT_DEMAND => "Q_teor:",
        RESULT_COST_THEORETICAL => "Koszt teoretyczny:",
        RESULT_EFFICIENCY => "Sprawność η:",
        RESULT_LOSS => "Strata:",
        RESULT_FLAT => "mieszkanie",
        RESULT_BUILDING => "budynek",
        RESULT_PER_MONTH => "m-c",
        RESULT_PER_YEAR => "rok",
        RESULT_SCENARIO => "Sprawność docelowa",
        RESULT_SCENARIO_COST => "koszt",
        RESULT_SCENARIO_SAVING => "oszczędność",
        AUDIT_HEADING => "\n-- Audyt izolacji przewodów --",
        AUDIT_OLD => "[instalacja istniejąca]",
        AUDIT_NEW => "[instalacja nowa]",
        PROMPT_POWER => "Moc [kW]",
        PROMPT_PIPE_LENGTH => "Długość przewodów [m]",
        PROMPT_PIPE_DIAMETER => "Średnica [mm]",
        PROMPT_LAMBDA => "Współczynnik przewodzenia izolacji λ [W/(m·K)]",
        PROMPT_T_SUPPLY => "Temperatura zasilania [°C]",
        PROMPT_T_RETURN => "Temperatura powrotu [°C]",
        PROMPT_T_AMBIENT => "Temperatura otoczenia [°C]",
        PROMPT_INSULATION => "Grubość izolacji [mm]",
        PROMPT_HOURS => "Czas pracy [h/rok]",
        RESULT_LOSS_OLD => "Strata roczna, stara instalacja:",
        RESULT_LOSS_NEW => "Strata roczna, nowa instalacja:",
        RESULT_AUDIT_SAVINGS => "Oszczędność:",
        TARIFFS_HEADING => "\n-- Ceny ciepła netto --",
        TIPS_HEADING => "\n-- Porady oszczędności --",
        TIPS_BODY => "\
• Temp. CWU 55–60°C; kontrola anty-Legionella.
• Docieplenie przewodów rozprowadzających i cyrkulacyjnych.
• Zawory termostatyczne, równoważenie cyrkulacji; bilans pionów.
• Sterowanie pomp wg temp. powrotu lub harmonogramu.
• Przegląd wymienników i automatyki węzła; eliminacja przegrzewów.",
        SETTINGS_HEADING => "\n-- Ustawienia --",
        SETTINGS_CURRENT_LANGUAGE => "Bieżący język:",
        SETTINGS_CURRENT_CITY => "Domyślne miasto:",
        SETTINGS_OPTIONS => "1) Język  2) Domyślne miasto",
        SETTINGS_PROMPT_LANGUAGE => "Kod języka (auto/pl/en/ko): ",
        SETTINGS_PROMPT_CITY => "Miasto: ",
        SETTINGS_INVALID => "Nieprawidłowa wartość; ustawienia bez zmian.",
        SETTINGS_SAVED => "Ustawienia zapisane.",
        ERROR_INVALID_NUMBER => "Podaj liczbę.",
        ERROR_INVALID_UNIT => "Podaj GJ lub MJ.",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 온수 가열비 계산기 ===",
        MAIN_MENU_CALCULATION => "1) 가열비/효율 계산",
        MAIN_MENU_AUDIT => "2) 배관 단열 감사",
        MAIN_MENU_TARIFFS => "3) 도시별 열요금",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_TIPS => "5) 절감 요령",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        CALC_HEADING => "\n-- 가열비 계산 --",
        PROMPT_BILL => "청구 단가 [zł/m³]",
        PROMPT_CITY => "도시 (요금 프리셋)",
        PROMPT_HEAT_PRICE => "순 열요금 [zł/단위]",
        PROMPT_UNIT => "요금 단위 (GJ/MJ)",
        PROMPT_VAT => "부가세 [%]",
        PROMPT_MONTH_M3 => "세대 월 사용량 [m³]",
        PROMPT_DELTA_T => "가열 온도차 ΔT [°C]",
        PROMPT_DWELLINGS => "건물 세대 수",
        RESULT_HEADING => "\n-- 계산 결과 --",
        RESULT_BILL => "청구 단가:",
        RESULT_PRICE_GROSS => "VAT 포함 열요금:",
        RESULT_DEMAND => "필요 열량 Q:",
        RESULT_COST_THEORETICAL => "이론 단가:",
        RESULT_EFFICIENCY => "효율 η:",
        RESULT_LOSS => "손실:",
        RESULT_FLAT => "세대",
        RESULT_BUILDING => "건물",
        RESULT_PER_MONTH => "월",
        RESULT_PER_YEAR => "년",
        RESULT_SCENARIO => "목표 효율",
        RESULT_SCENARIO_COST => "단가",
        RESULT_SCENARIO_SAVING => "절감",
        AUDIT_HEADING => "\n-- 배관 단열 감사 --",
        AUDIT_OLD => "[기존 설비]",
        AUDIT_NEW => "[개선 설비]",
        PROMPT_POWER => "출력 [kW]",
        PROMPT_PIPE_LENGTH => "배관 길이 [m]",
        PROMPT_PIPE_DIAMETER => "배관 내경 [mm]",
        PROMPT_LAMBDA => "단열재 열전도율 λ [W/(m·K)]",
        PROMPT_T_SUPPLY => "공급 온도 [°C]",
        PROMPT_T_RETURN => "환수 온도 [°C]",
        PROMPT_T_AMBIENT => "주위 온도 [°C]",
        PROMPT_INSULATION => "단열 두께 [mm]",
        PROMPT_HOURS => "연간 운전 시간 [h]",
        RESULT_LOSS_OLD => "기존 연간 손실:",
        RESULT_LOSS_NEW => "개선 연간 손실:",
        RESULT_AUDIT_SAVINGS => "절감:",
        TARIFFS_HEADING => "\n-- 도시별 순 열요금 --",
        TIPS_HEADING => "\n-- 절감 요령 --",
        TIPS_BODY => "\
• 온수 온도 55–60°C 유지, 레지오넬라 방지 운전.
• 분배 배관과 순환 배관 단열 보강.
• 온도조절 밸브와 순환 유량 평형, 입상관 밸런싱.
• 환수 온도나 시간표에 따른 펌프 제어.
• 열교환기와 기계실 자동제어 점검, 과열 제거.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_CURRENT_CITY => "기본 도시:",
        SETTINGS_OPTIONS => "1) 언어  2) 기본 도시",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (auto/pl/en/ko): ",
        SETTINGS_PROMPT_CITY => "도시: ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_INVALID_UNIT => "GJ 또는 MJ를 입력하세요.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins() {
        assert_eq!(resolve_language("pl-PL", Some("ko")), "pl");
        assert_eq!(resolve_language("auto", Some("ko")), "ko");
    }

    #[test]
    fn unknown_key_is_returned_as_is() {
        let tr = Translator::new("pl");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert_eq!(tr.t(keys::MAIN_MENU_EXIT), "0) Wyjście");
    }

    #[test]
    fn locale_strings_are_normalized() {
        assert_eq!(normalize_locale_string("pl_PL.UTF-8").as_deref(), Some("pl"));
        assert_eq!(normalize_locale_string("de_DE.UTF-8"), None);
    }

    #[test]
    fn pack_values_override_built_in() {
        let map = parse_toml_to_map("[main_menu]\nexit = \"0) Koniec\"\n").expect("map");
        let tr = Translator {
            lang: Language::Pl,
            overrides: Some(map),
        };
        assert_eq!(tr.t(keys::MAIN_MENU_EXIT), "0) Koniec");
        assert_eq!(tr.language_code(), "pl");
    }

    #[test]
    fn tips_exist_in_every_language() {
        for code in ["pl", "en", "ko"] {
            let tr = Translator::new(code);
            assert_ne!(tr.t(keys::TIPS_BODY), keys::TIPS_BODY);
            assert!(tr.t(keys::TIPS_BODY).contains("55–60°C"), "{code}");
        }
    }
}
