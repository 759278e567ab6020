//! Integration tests for single-configuration simulation.
//!
//! Tests verify that:
//! - The uniform activator scenario decomposes into the expected factors
//! - The VioE gate collapses yield to exactly zero with an explanatory note
//! - A weak VioC opens the shunt leak
//! - Sensitivities are normalized to a maximum of 1 (or all zero)
//! - Identical inputs give bit-identical outputs

use vioflux::{
    config::{Parameters, SimulationParameters},
    simulate, Configuration, Error, Gene, Module, PathwayModel,
};

const GENES: [&str; 5] = ["VioA", "VioB", "VioE", "VioD", "VioC"];

fn model_with(baseline_k: [f64; 5], burden_w: [f64; 5]) -> PathwayModel {
    let genes = GENES
        .iter()
        .zip(baseline_k)
        .zip(burden_w)
        .map(|((id, k), w)| Gene::new(*id, k, w))
        .collect();
    let modules = vec![
        Module::activator("CRISPRa_Ec", 0.5, 2.0, 3.0),
        Module::repressor("CRISPRi_dCas9", 0.3, 2.0, 0.1, 0.0),
        Module::binary("Methylation", 0.0),
        Module::neutral("Neutral"),
    ];
    PathwayModel::new(genes, modules, &Parameters::default().rules).unwrap()
}

fn unit_model() -> PathwayModel {
    model_with([1.0; 5], [1.0; 5])
}

// ============================================================================
// Worked Scenario
// ============================================================================

#[test]
fn test_uniform_activator_scenario() {
    let model = unit_model();
    let params = Parameters::default();
    let config = Configuration::uniform("CRISPRa_Ec", 0.5, 5);

    let result = simulate(&model, &config, &params).unwrap();

    // fold = 1 + 2 × hill(0.5, 0.5, 2) = 2 for every gene
    for &a in &result.activities {
        assert!((a - 2.0).abs() < 1e-12, "activity should be 2.0, got {}", a);
    }

    // Five equal activities a give Fcore = a × 5^(-1/p), below the supply cap
    let fcore = 2.0 * 5f64.powf(-1.0 / 6.0);
    assert!((result.flux.fcore - fcore).abs() < 1e-12);
    assert_eq!(result.flux.flux, result.flux.fcore);

    // No gene exceeds 2 × Fcore
    assert_eq!(result.imbalance_penalty, 1.0);

    // φ = 10, Q = 1 / (1 + 0.05 × 25)
    assert!((result.burden.phi - 10.0).abs() < 1e-12);
    assert!((result.burden.penalty - 1.0 / 2.25).abs() < 1e-12);

    // VioC at the median: no shunt
    assert_eq!(result.leak, 0.0);
    assert!(result.notes.is_empty());

    let expected = fcore / 2.25;
    assert!(
        (result.yield_value - expected).abs() < 1e-9,
        "yield {} should be {}",
        result.yield_value,
        expected
    );

    // All tied: first gene is the bottleneck
    assert_eq!(result.flux.bottleneck_gene, "VioA");
}

#[test]
fn test_supply_cap_limits_flux() {
    let model = model_with([3.0; 5], [0.0; 5]);
    let params = Parameters::default();
    let config = Configuration::uniform("Neutral", 0.5, 5);

    let result = simulate(&model, &config, &params).unwrap();
    assert!(result.flux.fcore > 2.0);
    assert_eq!(result.flux.flux, 2.0);
}

// ============================================================================
// Pathway Rules
// ============================================================================

#[test]
fn test_vioe_gate_zeroes_yield() {
    let model = unit_model();
    let params = Parameters::default();
    let mut config = Configuration::uniform("CRISPRa_Ec", 0.5, 5);
    // Binary OFF with no leak: VioE activity 0
    config.modules[2] = "Methylation".to_string();
    config.levels[2] = 0.0;

    let result = simulate(&model, &config, &params).unwrap();

    assert_eq!(result.yield_value, 0.0);
    assert_eq!(result.flux.flux, 0.0);
    assert!(result.flux.fcore > 0.0, "Fcore is still reported");
    assert!(!result.notes.is_empty());
    assert!(result.notes[0].contains("VioE"));
    assert!(result.sensitivities.iter().all(|s| s.influence == 0.0));
    assert_eq!(result.sensitivities.len(), 5);
}

#[test]
fn test_low_baseline_trips_gate() {
    let model = model_with([1.0, 1.0, 0.05, 1.0, 1.0], [1.0; 5]);
    let params = Parameters::default();
    let config = Configuration::uniform("Neutral", 0.5, 5);

    let result = simulate(&model, &config, &params).unwrap();
    assert_eq!(result.yield_value, 0.0);
    assert!(!result.notes.is_empty());
}

#[test]
fn test_weak_vioc_opens_shunt() {
    let model = unit_model();
    let params = Parameters::default();
    let mut config = Configuration::uniform("CRISPRa_Ec", 0.5, 5);
    config.modules[4] = "CRISPRi_dCas9".to_string();
    config.levels[4] = 1.0;

    let result = simulate(&model, &config, &params).unwrap();

    // VioC ≈ 0.17 against a median of 2.0 saturates the shunt
    assert!((result.leak - 0.35).abs() < 1e-6, "leak {}", result.leak);
    assert!(result.yield_value > 0.0);
    assert_eq!(result.flux.bottleneck_gene, "VioC");
    assert!(result.notes.iter().any(|n| n.contains("VioC")));
}

#[test]
fn test_disabled_rules_never_gate() {
    let genes = GENES.iter().map(|id| Gene::new(*id, 1.0, 1.0)).collect();
    let mut params = Parameters::default();
    params.rules.gate_gene_id = None;
    params.rules.shunt_gene_id = None;
    let model =
        PathwayModel::new(genes, vec![Module::binary("Methylation", 0.0)], &params.rules).unwrap();

    let result = simulate(&model, &Configuration::uniform("Methylation", 0.0, 5), &params).unwrap();
    assert!(result.notes.is_empty());
    assert_eq!(result.leak, 0.0);
}

// ============================================================================
// Sensitivities
// ============================================================================

#[test]
fn test_sensitivity_normalized() {
    let model = unit_model();
    let params = Parameters::default();
    let levels = vec![0.9, 0.3, 0.7, 0.5, 0.6];
    let config = Configuration::new(vec!["CRISPRa_Ec".to_string(); 5], levels);

    let result = simulate(&model, &config, &params).unwrap();
    let values: Vec<f64> = result.sensitivities.iter().map(|s| s.influence).collect();
    let max = values.iter().copied().fold(0.0, f64::max);

    assert!(max == 1.0 || values.iter().all(|&v| v == 0.0));
    assert!(values.iter().all(|&v| (0.0..=1.0).contains(&v)));

    let genes: Vec<&str> = result.sensitivities.iter().map(|s| s.gene.as_str()).collect();
    assert_eq!(genes, GENES);
}

#[test]
fn test_gated_down_branch_counts_as_zero() {
    // VioE sits just above the gate; its 5% down step (0.0988) trips it
    let model = model_with([1.0, 1.0, 0.104, 1.0, 1.0], [1.0; 5]);
    let params = Parameters::default();
    let config = Configuration::uniform("Neutral", 0.5, 5);

    let result = simulate(&model, &config, &params).unwrap();
    assert!(result.yield_value > 0.0);
    assert!(result.notes.iter().all(|n| !n.contains("VioE")));

    let values: Vec<f64> = result.sensitivities.iter().map(|s| s.influence).collect();
    assert_eq!(values[2], 1.0);
    for (i, &v) in values.iter().enumerate() {
        assert!((0.0..=1.0).contains(&v), "gene {} influence {}", i, v);
    }
}

#[test]
fn test_symmetric_pathway_has_equal_influence() {
    let model = unit_model();
    let params = Parameters {
        simulation: SimulationParameters {
            gamma_burden: 0.0,
            ..SimulationParameters::default()
        },
        ..Parameters::default()
    };
    let config = Configuration::uniform("CRISPRa_Ec", 0.5, 5);

    let result = simulate(&model, &config, &params).unwrap();
    let values: Vec<f64> = result.sensitivities.iter().map(|s| s.influence).collect();

    assert_eq!(values.iter().copied().fold(0.0, f64::max), 1.0);
    for v in values {
        assert!((v - 1.0).abs() < 1e-6, "symmetric genes should tie, got {}", v);
    }
}

#[test]
fn test_burden_dominated_scenario_has_no_positive_influence() {
    // At φ = 10 the burden penalty falls faster than flux rises
    let model = unit_model();
    let params = Parameters::default();
    let config = Configuration::uniform("CRISPRa_Ec", 0.5, 5);

    let result = simulate(&model, &config, &params).unwrap();
    assert!(result.sensitivities.iter().all(|s| s.influence == 0.0));
}

// ============================================================================
// Inputs and Determinism
// ============================================================================

#[test]
fn test_levels_are_clipped() {
    let model = unit_model();
    let params = Parameters::default();
    let modules = vec!["CRISPRa_Ec".to_string(); 5];

    let clipped = simulate(
        &model,
        &Configuration::new(modules.clone(), vec![1.0, 0.0, 1.0, 0.0, 1.0]),
        &params,
    )
    .unwrap();
    let raw = simulate(
        &model,
        &Configuration::new(modules, vec![1.7, -0.4, 3.0, -2.0, 1.01]),
        &params,
    )
    .unwrap();

    assert_eq!(clipped.yield_value, raw.yield_value);
    assert_eq!(clipped.activities, raw.activities);
}

#[test]
fn test_unknown_module_is_rejected() {
    let model = unit_model();
    let mut config = Configuration::uniform("CRISPRa_Ec", 0.5, 5);
    config.modules[1] = "TALE_KRAB".to_string();

    match simulate(&model, &config, &Parameters::default()) {
        Err(Error::UnknownModule(id)) => assert_eq!(id, "TALE_KRAB"),
        other => panic!("expected UnknownModule, got {:?}", other),
    }
}

#[test]
fn test_length_mismatch_is_rejected() {
    let model = unit_model();
    let config = Configuration::new(vec!["CRISPRa_Ec".to_string(); 5], vec![0.5; 3]);
    assert!(matches!(
        simulate(&model, &config, &Parameters::default()),
        Err(Error::LengthMismatch { .. })
    ));
}

#[test]
fn test_repeated_calls_are_bit_identical() {
    let model = model_with([1.0, 0.8, 1.2, 0.9, 1.1], [1.0, 1.0, 1.0, 1.0, 1.2]);
    let params = Parameters::default();
    let config = Configuration::new(
        vec![
            "CRISPRa_Ec".to_string(),
            "CRISPRi_dCas9".to_string(),
            "CRISPRa_Ec".to_string(),
            "Neutral".to_string(),
            "CRISPRa_Ec".to_string(),
        ],
        vec![0.8, 0.2, 0.6, 0.5, 0.35],
    );

    let first = simulate(&model, &config, &params).unwrap();
    for _ in 0..5 {
        let again = simulate(&model, &config, &params).unwrap();
        assert_eq!(first.yield_value.to_bits(), again.yield_value.to_bits());
        assert_eq!(first, again);
    }
}

#[test]
fn test_bottleneck_is_hard_minimum() {
    let model = model_with([1.0, 0.999, 1.0, 1.0, 1.0], [1.0; 5]);
    let params = Parameters::default();
    let result = simulate(&model, &Configuration::uniform("Neutral", 0.5, 5), &params).unwrap();

    assert_eq!(result.flux.bottleneck_gene, "VioB");
    assert!(result.flux.fcore < 0.999);
}
