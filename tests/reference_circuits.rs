//! End-to-end checks against the reference circuits.

use std::f64::consts::PI;
use std::sync::Arc;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use dipole_core::dsl;
use dipole_core::sweep::{magnitude_db, phase_deg};
use dipole_core::{
    voltage_divider, BodeDiagram, DipoleError, Element, Filter, ParallelFilter, RcFilter, RcKind,
    RlcFilter, RlcKind, SeriesFilter, SweepConfig,
};

fn res(name: &str, ohms: f64) -> Element {
    Element::resistor(name, ohms).expect("valid resistor")
}

// ── Element trees ─────────────────────────────────────────────────

#[test]
fn test_series_of_parallels_voltage() {
    let p1 = Element::parallel("P1", [res("R1", 100.0), res("R2", 1000.0), res("R3", 700.0)]).unwrap();
    let p2 = Element::parallel("P2", [res("R4", 800.0), res("R5", 1200.0)]).unwrap();
    let circuit = Element::series("S1", [p1, p2, res("R6", 1100.0)]).unwrap();

    assert_relative_eq!(circuit.dc_voltage(0.2), 332.0, max_relative = 1e-3);
    assert_eq!(
        circuit.to_string(),
        "Ser(S1, Par(P1, Res(R1, 100 Ω), Res(R2, 1000 Ω), Res(R3, 700 Ω)), \
         Par(P2, Res(R4, 800 Ω), Res(R5, 1200 Ω)), Res(R6, 1100 Ω))"
    );
}

#[test]
fn test_voltage_divider_synthesis() {
    let divider = voltage_divider(9.0, 6.0, 1000.0).unwrap();
    assert_relative_eq!(divider.resistance(), 3000.0, max_relative = 1e-12);
    // output taken across R2
    let current = 9.0 / divider.resistance();
    assert_relative_eq!(divider.children()[1].dc_voltage(current), 6.0, max_relative = 1e-12);
}

#[test]
fn test_shared_subtree() {
    let shared = Arc::new(res("R1", 1000.0));
    let a = Element::series("A", [shared.clone(), Arc::new(res("R2", 1.0))]).unwrap();
    let b = Element::parallel("B", [shared.clone(), shared]).unwrap();
    assert_relative_eq!(a.resistance(), 1001.0, max_relative = 1e-12);
    assert_relative_eq!(b.resistance(), 500.0, max_relative = 1e-12);
}

#[test]
fn test_open_and_short_circuits() {
    let open = Element::series("S", [res("R", 10.0), Element::capacitor("C", 1e-6).unwrap()]).unwrap();
    assert_eq!(open.resistance(), f64::INFINITY);

    let shorted = Element::parallel("P", [res("R", 10.0), Element::inductor("L", 1e-3).unwrap()]).unwrap();
    assert_eq!(shorted.resistance(), 0.0);
}

#[test]
fn test_blank_names_rejected() {
    for name in ["", "   ", "\t\n"] {
        assert!(matches!(
            Element::resistor(name, 1.0),
            Err(DipoleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Element::series(name, [res("R", 1.0)]),
            Err(DipoleError::InvalidArgument { .. })
        ));
    }
    assert!(matches!(
        Element::series("S", Vec::<Element>::new()),
        Err(DipoleError::InvalidArgument { .. })
    ));
}

// ── Filters ───────────────────────────────────────────────────────

#[test]
fn test_rc_cutoff() {
    let rc = RcFilter::new(1000.0, 100e-9, RcKind::Lowpass);
    assert_relative_eq!(
        rc.characteristic_frequencies()[0],
        1591.5494309189535,
        max_relative = 1e-12
    );

    let h = rc.transfer_function(rc.cutoff_frequency());
    assert_relative_eq!(magnitude_db(h), -3.0103, epsilon = 1e-3);
    assert_relative_eq!(phase_deg(h), -45.0, epsilon = 1e-9);
}

#[test]
fn test_rc_inverse_design() {
    for (target, farads) in [(4560.0, 330e-9), (50.0, 1e-6), (20e3, 2.2e-9)] {
        for kind in [RcKind::Lowpass, RcKind::Highpass] {
            let rc = RcFilter::for_cutoff_frequency(target, farads, kind);
            let freqs = rc.characteristic_frequencies();
            assert_eq!(freqs.len(), 1);
            assert_relative_eq!(freqs[0], target, max_relative = 1e-12);
        }
    }
    let rc = RcFilter::for_cutoff_frequency(4560.0, 330e-9, RcKind::Highpass);
    assert_relative_eq!(rc.resistance(), 105.7648478813765, max_relative = 1e-12);
}

#[test]
fn test_cascade_at_shared_cutoff() {
    let stage = RcFilter::new(1000.0, 100e-9, RcKind::Lowpass);
    let f0 = stage.cutoff_frequency();
    let shared: Arc<dyn Filter> = Arc::new(stage.clone());
    let cascade = SeriesFilter::new([shared.clone(), shared]).unwrap();

    let single = stage.transfer_function(f0);
    let h = cascade.transfer_function(f0);
    assert_relative_eq!(h.norm(), 0.5, max_relative = 1e-12);
    assert_relative_eq!(phase_deg(h), -90.0, epsilon = 1e-9);
    assert_relative_eq!(h.re, (single * single).re, epsilon = 1e-15);
    assert!(cascade.characteristic_frequencies().is_empty());
}

#[test]
fn test_complementary_sum_is_flat() {
    let lp: Arc<dyn Filter> = Arc::new(RcFilter::new(1000.0, 100e-9, RcKind::Lowpass));
    let hp: Arc<dyn Filter> = Arc::new(RcFilter::new(1000.0, 100e-9, RcKind::Highpass));
    let sum = ParallelFilter::new([lp, hp]).unwrap();
    for f in [10.0, 100.0, 1591.5, 1e4, 1e5] {
        let h = sum.transfer_function(f);
        assert_abs_diff_eq!(h.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h.im, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_rlc_band_filters_at_resonance() {
    let (r, c, l): (f64, f64, f64) = (100.0, 1e-6, 10e-3);
    let f0 = 1.0 / (2.0 * PI * (l * c).sqrt());

    let bandpass = RlcFilter::new(r, c, l, RlcKind::Bandpass);
    assert_relative_eq!(bandpass.transfer_function(f0).norm(), 1.0, max_relative = 1e-9);

    let bandcut = RlcFilter::new(r, c, l, RlcKind::Bandcut);
    assert!(bandcut.transfer_function(f0).norm() < 1e-9);

    let freqs = bandpass.characteristic_frequencies();
    assert_relative_eq!(freqs[0], f0, max_relative = 1e-12);
    assert!(freqs[1] > f0 && freqs[2] < f0);
}

#[test]
fn test_unknown_kind_rejected() {
    assert!(matches!(
        "allpass".parse::<RcKind>(),
        Err(DipoleError::InvalidArgument { .. })
    ));
    assert!(matches!(
        "shelf".parse::<RlcKind>(),
        Err(DipoleError::InvalidArgument { .. })
    ));
}

// ── Notation and sweeps ───────────────────────────────────────────

#[test]
fn test_notation_matches_constructed_filters() {
    let parsed = dsl::parse_filter("Cascade(RC(1k, 100n, lowpass), RLC(100 Ω, 1u F, 10m H, bandcut))").unwrap();
    let built = SeriesFilter::new([
        Arc::new(RcFilter::new(1e3, 100e-9, RcKind::Lowpass)) as Arc<dyn Filter>,
        Arc::new(RlcFilter::new(100.0, 1e-6, 10e-3, RlcKind::Bandcut)) as Arc<dyn Filter>,
    ])
    .unwrap();
    for f in SweepConfig::new().with_points(25).frequencies().unwrap() {
        let (a, b) = (parsed.transfer_function(f), built.transfer_function(f));
        assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
        assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
    }
}

#[test]
fn test_default_bode_sweep() {
    let filter = RlcFilter::new(100.0, 1e-6, 10e-3, RlcKind::Lowpass);
    let bode = BodeDiagram::sample("RLC lowpass", &filter, &SweepConfig::default()).unwrap();
    assert_eq!(bode.points.len(), 400);
    assert_relative_eq!(bode.points[0].frequency_hz, 10.0, max_relative = 1e-12);
    assert_eq!(bode.markers.len(), 1);
    // second-order rolloff: -40 dB/decade well above f0
    let mags = bode.magnitudes_db();
    assert!(mags[399] < -60.0);
}

#[test]
fn test_concurrent_evaluation() {
    let filter: Arc<dyn Filter> = dsl::parse_filter("Sum(RC(1k, 100n, lp), RC(1k, 100n, hp))").unwrap();
    let freqs = SweepConfig::default().frequencies().unwrap();
    std::thread::scope(|s| {
        for chunk in freqs.chunks(100) {
            let filter = Arc::clone(&filter);
            s.spawn(move || {
                for &f in chunk {
                    assert_abs_diff_eq!(filter.transfer_function(f).norm(), 1.0, epsilon = 1e-12);
                }
            });
        }
    });
}
