//! JSON 요청/응답 키 호환성 테스트.
use cwu_cost_toolbox::wire::{self, CalcRequest};

const RESPONSE_KEYS: [&str; 25] = [
    "bill",
    "heat_price",
    "unit",
    "vat",
    "dT",
    "month_m3",
    "units",
    "price_GJ_brutto",
    "q_per_m3",
    "cost_theor",
    "eta",
    "loss_per_m3",
    "loss_flat_m",
    "loss_build_m",
    "loss_build_y",
    "cost70",
    "cost80",
    "save70_m3",
    "save80_m3",
    "save70_flat_m",
    "save80_flat_m",
    "save70_build_m",
    "save80_build_m",
    "save70_build_y",
    "save80_build_y",
];

#[test]
fn response_has_every_legacy_key() {
    let out = wire::compute_json(
        r#"{"bill": 49.0, "heat_price": 73.69, "unit": "GJ", "vat": 23,
            "month_m3": 7.42, "units": 65, "dT": 45}"#,
    )
    .expect("compute");
    let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
    let obj = value.as_object().expect("object");
    for key in RESPONSE_KEYS {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(obj.len(), RESPONSE_KEYS.len());
    assert_eq!(value["unit"], "GJ");
    assert_eq!(value["units"], 65);
}

#[test]
fn megajoule_request_gives_same_result() {
    let gj = wire::compute(CalcRequest {
        bill: 49.0,
        heat_price: 73.69,
        unit: "GJ".parse().expect("unit"),
        vat: 23.0,
        month_m3: 7.42,
        units: 65,
        dt: 45.0,
    })
    .expect("gj");
    let mj = wire::compute(CalcRequest {
        heat_price: 0.07369,
        unit: "MJ".parse().expect("unit"),
        bill: 49.0,
        vat: 23.0,
        month_m3: 7.42,
        units: 65,
        dt: 45.0,
    })
    .expect("mj");
    assert!((gj.price_gj_brutto - mj.price_gj_brutto).abs() < 1e-9);
    assert!((gj.eta - mj.eta).abs() < 1e-12);
}

#[test]
fn overflow_never_serializes_null() {
    let res = wire::compute_json(
        r#"{"bill": 1e300, "heat_price": 73.69, "unit": "GJ", "vat": 23,
            "month_m3": 1e300, "units": 65, "dT": 45}"#,
    );
    match res {
        Err(wire::WireError::Calc(_)) => {}
        Err(other) => panic!("expected calc error, got {other}"),
        Ok(body) => panic!("overflow leaked into response: {body}"),
    }
}

#[test]
fn whole_number_units_in_any_form() {
    for units in ["65", "65.0", "\"65\""] {
        let body = format!(
            r#"{{"bill": 49.0, "heat_price": 73.69, "month_m3": 7.42, "units": {units}, "dT": 45}}"#
        );
        let out = wire::compute_json(&body).expect("compute");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["units"], 65, "{units}");
    }
}

#[test]
fn unknown_unit_is_rejected() {
    let res = wire::compute_json(
        r#"{"bill": 49.0, "heat_price": 73.69, "unit": "kWh",
            "month_m3": 7.42, "units": 65, "dT": 45}"#,
    );
    assert!(res.is_err());
}
