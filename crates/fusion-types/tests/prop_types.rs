// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Property-Based Tests (proptest) for fusion-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for fusion-types using proptest.
//!
//! Covers: SampleLattice construction invariants, LayerSpec validation,
//! configuration serialization roundtrip.

use fusion_types::config::{BlanketConfig, LayerSpec, RunSettings, SourceConfig};
use fusion_types::grid::SampleLattice;
use proptest::prelude::*;

fn layer_spec() -> impl Strategy<Value = LayerSpec> {
    (
        (1.0f64..500.0, 1.0f64..200.0, 1.0f64..1000.0),
        (1.0f64..100.0, 1.0f64..100.0, 0.5f64..50.0),
        (0.5f64..50.0, 0.5f64..50.0, 0.5f64..50.0),
    )
        .prop_map(|((ibr, bt, bh), (lbt, ubt, gap), (uvv, vv, lvv))| LayerSpec {
            inner_blanket_radius: ibr,
            blanket_thickness: bt,
            blanket_height: bh,
            lower_blanket_thickness: lbt,
            upper_blanket_thickness: ubt,
            blanket_vv_gap: gap,
            upper_vv_thickness: uvv,
            vv_thickness: vv,
            lower_vv_thickness: lvv,
        })
}

// ── SampleLattice Construction Invariants ────────────────────────────

proptest! {
    /// Axis lengths match constructor arguments.
    #[test]
    fn lattice_dimensions_match(
        nxy in 2usize..40,
        nz in 2usize..40,
    ) {
        let lattice = SampleLattice::new(nxy, nz, 10.0, -5.0, 5.0);

        prop_assert_eq!(lattice.x.len(), nxy);
        prop_assert_eq!(lattice.y.len(), nxy);
        prop_assert_eq!(lattice.z.len(), nz);
        prop_assert_eq!(lattice.len(), nxy * nxy * nz);
        prop_assert_eq!(lattice.points().count(), lattice.len());
    }

    /// Lattice endpoints hit the requested bounds.
    #[test]
    fn lattice_boundary_values(
        nxy in 3usize..32,
        nz in 3usize..32,
        half_width in 0.1f64..500.0,
        z_min in -100.0f64..0.0,
    ) {
        let z_max = z_min + 250.0;
        let lattice = SampleLattice::new(nxy, nz, half_width, z_min, z_max);

        prop_assert!((lattice.x[0] + half_width).abs() < 1e-9);
        prop_assert!((lattice.x[nxy - 1] - half_width).abs() < 1e-9);
        prop_assert!((lattice.z[0] - z_min).abs() < 1e-9);
        prop_assert!((lattice.z[nz - 1] - z_max).abs() < 1e-9);
    }

    /// Z coordinates are strictly monotonically increasing.
    #[test]
    fn lattice_z_monotone(nz in 3usize..64) {
        let lattice = SampleLattice::new(4, nz, 1.0, 0.0, 9.0);
        for i in 1..nz {
            prop_assert!(lattice.z[i] > lattice.z[i - 1],
                "Z not monotone at {}: {} <= {}", i, lattice.z[i], lattice.z[i - 1]);
        }
    }
}

// ── LayerSpec Validation ─────────────────────────────────────────────

proptest! {
    /// Any strictly positive, finite layer set is accepted.
    #[test]
    fn positive_layers_validate(spec in layer_spec()) {
        prop_assert!(spec.validate().is_ok());
    }

    /// Driving any single field to zero or below is rejected and the message
    /// names that field.
    #[test]
    fn non_positive_field_rejected(
        spec in layer_spec(),
        field in 0usize..9,
        value in -50.0f64..=0.0,
    ) {
        let mut bad = spec;
        let name = spec.fields()[field].0;
        match field {
            0 => bad.inner_blanket_radius = value,
            1 => bad.blanket_thickness = value,
            2 => bad.blanket_height = value,
            3 => bad.lower_blanket_thickness = value,
            4 => bad.upper_blanket_thickness = value,
            5 => bad.blanket_vv_gap = value,
            6 => bad.upper_vv_thickness = value,
            7 => bad.vv_thickness = value,
            _ => bad.lower_vv_thickness = value,
        }
        let err = bad.validate().unwrap_err();
        prop_assert!(err.to_string().contains(name), "{} not in {}", name, err);
    }

    /// JSON roundtrip preserves the layer stack exactly.
    #[test]
    fn config_json_roundtrip(spec in layer_spec(), fraction in 0.0f64..=1.0) {
        let cfg = BlanketConfig {
            name: "prop".into(),
            layers: spec,
            source: SourceConfig { fractional_height: fraction, ..SourceConfig::default() },
            settings: RunSettings::default(),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: BlanketConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.layers, spec);
        prop_assert_eq!(back.source.fractional_height, fraction);
    }
}
