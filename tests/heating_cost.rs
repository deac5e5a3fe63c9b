//! 가열비 계산 회귀 테스트. 크라쿠프 기준 요금(73.69 zł/GJ, VAT 23%) 예제를 사용한다.
use cwu_cost_toolbox::heating::{
    compute_all, price_gj_gross, q_gj_per_m3, BillingInput, CalcError,
};
use cwu_cost_toolbox::units::EnergyPriceUnit;

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn reference_input() -> BillingInput {
    BillingInput {
        bill_rate: 49.0,
        heat_price_net: 73.69,
        price_unit: EnergyPriceUnit::Gigajoule,
        vat_percent: 23.0,
        monthly_consumption_m3: 7.42,
        delta_t: 45.0,
        dwelling_count: 65,
    }
}

#[test]
fn reference_building() {
    let r = compute_all(&reference_input()).expect("calc");
    assert_close("price", r.price_gj_gross, 90.64, 1e-4);
    assert_close("q", r.q_gj_per_m3, 0.18855, 1e-9);
    assert_close("cost", r.cost_theoretical, 17.09, 1e-3);
    assert_close("eta", r.efficiency, 0.349, 1e-3);
    assert_close("loss_m3", r.loss.per_m3, 31.91, 1e-4);
    assert_close("loss_flat_m", r.loss.flat_monthly, 236.77, 1e-4);
    assert_close("loss_build_y", r.loss.building_yearly, 184_682.74, 1e-6);
}

#[test]
fn reference_savings_scenarios() {
    let r = compute_all(&reference_input()).expect("calc");
    // 70%: 0.18855 / 0.7 · 90.6387 ≈ 24.414 zł/m³
    assert_close("cost70", r.save70.cost_per_m3, 24.414_181, 1e-6);
    assert_close("save70", r.save70.savings.per_m3, 24.585_819, 1e-6);
    assert_close("cost80", r.save80.cost_per_m3, 21.362_409, 1e-6);
    assert_close("save80", r.save80.savings.per_m3, 27.637_591, 1e-6);
    assert_close("save70_y", r.save70.savings.building_yearly, 142_292.88, 1e-6);
}

#[test]
fn scaling_laws_hold() {
    for (month_m3, units) in [(7.42, 65), (3.0, 1), (12.5, 240)] {
        let input = BillingInput {
            monthly_consumption_m3: month_m3,
            dwelling_count: units,
            ..reference_input()
        };
        let r = compute_all(&input).expect("calc");
        let expected_m = r.loss.per_m3 * month_m3 * f64::from(units);
        assert_close("loss_build_m", r.loss.building_monthly, expected_m, 1e-12);
        assert_close("loss_build_y", r.loss.building_yearly, r.loss.building_monthly * 12.0, 1e-12);
        for s in r.scenarios() {
            assert_close(
                "save_build_y",
                s.savings.building_yearly,
                s.savings.per_m3 * month_m3 * f64::from(units) * 12.0,
                1e-9,
            );
        }
    }
}

#[test]
fn efficiency_and_savings_stay_in_range() {
    for bill in [-10.0, 0.0, 0.5, 10.0, 17.0, 24.0, 49.0, 200.0] {
        for dt in [0.0, 10.0, 45.0, 70.0] {
            let input = BillingInput {
                bill_rate: bill,
                delta_t: dt,
                ..reference_input()
            };
            let r = compute_all(&input).expect("calc");
            assert!((0.0..=1.0).contains(&r.efficiency), "bill={bill} dt={dt}");
            assert!(r.save70.savings.per_m3 >= 0.0);
            assert!(r.save80.savings.per_m3 >= 0.0);
        }
    }
}

#[test]
fn cost_rises_with_delta_t() {
    let mut prev = None;
    for dt in [10.0, 20.0, 35.0, 45.0, 55.0] {
        let r = compute_all(&BillingInput {
            delta_t: dt,
            ..reference_input()
        })
        .expect("calc");
        if let Some((q, cost)) = prev {
            assert!(r.q_gj_per_m3 > q);
            assert!(r.cost_theoretical > cost);
        }
        prev = Some((r.q_gj_per_m3, r.cost_theoretical));
    }
    assert!(q_gj_per_m3(46.0) > q_gj_per_m3(45.0));
}

#[test]
fn megajoule_tariff_matches_gigajoule() {
    assert_eq!(
        price_gj_gross(0.07369, EnergyPriceUnit::Megajoule, 23.0),
        price_gj_gross(0.07369 * 1000.0, EnergyPriceUnit::Gigajoule, 23.0)
    );
}

#[test]
fn repeated_calls_are_identical() {
    let input = reference_input();
    let a = compute_all(&input).expect("calc");
    let b = compute_all(&input).expect("calc");
    assert_eq!(a, b);
    assert_eq!(a.efficiency.to_bits(), b.efficiency.to_bits());
    assert_eq!(
        a.loss.building_yearly.to_bits(),
        b.loss.building_yearly.to_bits()
    );
}

#[test]
fn finite_inputs_that_overflow_are_rejected() {
    let cases = [
        BillingInput {
            bill_rate: 1e300,
            monthly_consumption_m3: 1e300,
            ..reference_input()
        },
        BillingInput {
            heat_price_net: 1e306,
            vat_percent: 1e306,
            ..reference_input()
        },
        BillingInput {
            delta_t: f64::MAX,
            ..reference_input()
        },
    ];
    for input in cases {
        assert!(
            matches!(compute_all(&input), Err(CalcError::InvalidInput(_))),
            "{input:?}"
        );
    }
}

#[test]
fn accepted_results_are_always_finite() {
    for scale in [1.0, 1e3, 1e6, 1e9] {
        let input = BillingInput {
            bill_rate: 49.0 * scale,
            monthly_consumption_m3: 7.42 * scale,
            ..reference_input()
        };
        let r = compute_all(&input).expect("calc");
        assert!(r.loss.building_yearly.is_finite());
        for s in r.scenarios() {
            assert!(s.cost_per_m3.is_finite());
            assert!(s.savings.building_yearly.is_finite());
        }
    }
}
