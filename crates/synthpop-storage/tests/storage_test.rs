use synthpop_core::errors::{StorageError, SynthpopError};
use synthpop_core::models::{
    AggregatedOutcomes, LatentTraits, OutcomeCounts, SimulationConfig, SimulationRun,
    SimulationStatus, SynthOutcome,
};
use synthpop_core::traits::{IScorecardStore, ISimulationStore, ISynthStore, RunFilter};
use synthpop_storage::migrations::LATEST_VERSION;
use synthpop_storage::StorageEngine;

fn sim_config() -> SimulationConfig {
    SimulationConfig {
        n_executions: 100,
        sigma: 0.1,
        seed: 42,
    }
}

fn completed_run(scorecard_id: &str, scenario_id: &str, synth_ids: Vec<String>) -> SimulationRun {
    let mut run = SimulationRun::new(scorecard_id, scenario_id, synth_ids, sim_config());
    run.start().unwrap();
    run.complete(
        AggregatedOutcomes {
            did_not_try_rate: 0.2,
            failed_rate: 0.3,
            success_rate: 0.5,
        },
        vec!["small-003".to_string()],
        0.25,
    )
    .unwrap();
    run
}

fn failed_run(scorecard_id: &str) -> SimulationRun {
    let mut run = SimulationRun::new(scorecard_id, "baseline", vec![], sim_config());
    run.fail("unknown scenario", 0.0).unwrap();
    run
}

fn outcomes_for(run_id: &str, count: usize) -> Vec<SynthOutcome> {
    (0..count)
        .map(|i| {
            let failed = (i % 4) as u32;
            SynthOutcome::from_counts(
                run_id,
                format!("synth-{i:03}"),
                OutcomeCounts {
                    did_not_try: 1,
                    failed,
                    success: 9 - failed,
                },
                LatentTraits {
                    capability_mean: i as f64 / count as f64,
                    trust_mean: 0.5,
                    friction_tolerance_mean: 0.25,
                    exploration_prob: 0.75,
                },
            )
        })
        .collect()
}

// --- Lifecycle ---

#[test]
fn in_memory_engine_is_migrated() {
    let storage = StorageEngine::open_in_memory().unwrap();
    assert_eq!(storage.schema_version().unwrap(), LATEST_VERSION);
    assert!(storage.path().is_none());
    assert_eq!(storage.count_synths().unwrap(), 0);
}

#[test]
fn file_database_uses_wal_and_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synthpop.db");
    let synths = test_fixtures::small_population();
    let scorecard = test_fixtures::moderate_scorecard();

    {
        let storage = StorageEngine::open(&path).unwrap();
        assert!(storage.is_wal().unwrap());
        assert_eq!(storage.path(), Some(path.as_path()));
        storage.insert_synths(&synths).unwrap();
        storage.create_scorecard(&scorecard).unwrap();
    }

    let reopened = StorageEngine::open(&path).unwrap();
    assert_eq!(reopened.schema_version().unwrap(), LATEST_VERSION);
    assert_eq!(reopened.count_synths().unwrap(), synths.len());
    assert_eq!(reopened.get_scorecard(&scorecard.id).unwrap(), Some(scorecard));
}

// --- Synths ---

#[test]
fn insert_synths_skips_existing_ids() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let synths = test_fixtures::small_population();

    assert_eq!(storage.insert_synths(&synths).unwrap(), 20);
    assert_eq!(storage.insert_synths(&synths[..5]).unwrap(), 0);
    assert_eq!(storage.count_synths().unwrap(), 20);
}

#[test]
fn corrupt_synths_are_stored_not_dropped() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let good = test_fixtures::small_population().remove(0);
    let mut nan = good.clone();
    nan.id = "synth-nan".into();
    nan.observables.motor_ability = f64::NAN;
    let mut out_of_range = good.clone();
    out_of_range.id = "synth-high".into();
    out_of_range.observables.digital_literacy = 1.4;

    let batch = vec![good.clone(), nan.clone(), out_of_range.clone()];
    assert_eq!(storage.insert_synths(&batch).unwrap(), 3);
    assert_eq!(storage.count_synths().unwrap(), 3);

    let loaded = storage.get_synth("synth-nan").unwrap().unwrap();
    assert!(loaded.observables.motor_ability.is_nan());
    assert!(!loaded.observables.is_valid());
    assert_eq!(loaded.observables.digital_literacy, nan.observables.digital_literacy);
    assert_eq!(storage.get_synth("synth-high").unwrap().unwrap(), out_of_range);
    assert_eq!(storage.get_synth(&good.id).unwrap().unwrap(), good);
}

#[test]
fn synth_lookup_preserves_requested_order() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let synths = test_fixtures::small_population();
    storage.insert_synths(&synths).unwrap();

    let ids = vec![
        synths[7].id.clone(),
        "missing".to_string(),
        synths[2].id.clone(),
    ];
    let found = storage.get_synths(&ids).unwrap();
    assert_eq!(found, vec![synths[7].clone(), synths[2].clone()]);

    assert_eq!(storage.get_synth(&synths[0].id).unwrap(), Some(synths[0].clone()));
    assert_eq!(storage.get_synth("missing").unwrap(), None);
}

#[test]
fn first_synths_follows_insertion_order() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let synths = test_fixtures::small_population();
    storage.insert_synths(&synths).unwrap();

    let first = storage.first_synths(5).unwrap();
    assert_eq!(first, synths[..5].to_vec());
    assert_eq!(storage.first_synths(100).unwrap().len(), 20);
}

// --- Scorecards ---

#[test]
fn scorecards_list_in_creation_order() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let a = test_fixtures::scorecard(0.1, 0.2, 0.3, 0.4);
    let b = test_fixtures::scorecard(0.9, 0.8, 0.7, 0.6);
    storage.create_scorecard(&a).unwrap();
    storage.create_scorecard(&b).unwrap();

    assert_eq!(storage.list_scorecards().unwrap(), vec![a, b]);
}

#[test]
fn duplicate_scorecard_is_a_duplicate_key_error() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let scorecard = test_fixtures::moderate_scorecard();
    storage.create_scorecard(&scorecard).unwrap();

    match storage.create_scorecard(&scorecard) {
        Err(SynthpopError::StorageError(StorageError::DuplicateKey { table, id })) => {
            assert_eq!(table, "scorecards");
            assert_eq!(id, scorecard.id);
        }
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

// --- Runs ---

#[test]
fn completed_run_round_trips() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = completed_run("sc-1", "baseline", vec!["small-001".into(), "small-003".into()]);
    storage.insert_run(&run).unwrap();

    let loaded = storage.get_run(&run.id).unwrap().unwrap();
    assert_eq!(loaded.status, SimulationStatus::Completed);
    assert_eq!(loaded.config, run.config);
    assert_eq!(loaded.synth_ids, run.synth_ids);
    assert_eq!(loaded.aggregated_outcomes, run.aggregated_outcomes);
    assert_eq!(loaded.excluded_synths, 1);
    assert_eq!(loaded.excluded_synth_ids, vec!["small-003".to_string()]);
    assert_eq!(loaded.created_at, run.created_at);
    assert_eq!(loaded.completed_at, run.completed_at);
    assert_eq!(loaded, run);
}

#[test]
fn failed_run_keeps_reason_and_no_aggregates() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = failed_run("sc-1");
    storage.insert_run(&run).unwrap();

    let loaded = storage.get_run(&run.id).unwrap().unwrap();
    assert_eq!(loaded.status, SimulationStatus::Failed);
    assert_eq!(loaded.failure_reason.as_deref(), Some("unknown scenario"));
    assert!(loaded.aggregated_outcomes.is_none());
    assert!(loaded.started_at.is_none());
}

#[test]
fn missing_run_is_none() {
    let storage = StorageEngine::open_in_memory().unwrap();
    assert!(storage.get_run("nope").unwrap().is_none());
}

#[test]
fn list_runs_is_newest_first_and_filters() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let first = completed_run("sc-1", "baseline", vec![]);
    let second = completed_run("sc-2", "crisis", vec![]);
    let third = failed_run("sc-1");
    for run in [&first, &second, &third] {
        storage.insert_run(run).unwrap();
    }

    let all: Vec<String> = storage
        .list_runs(&RunFilter::default())
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(all, vec![third.id.clone(), second.id.clone(), first.id.clone()]);

    let by_scorecard = storage
        .list_runs(&RunFilter {
            scorecard_id: Some("sc-1".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(by_scorecard.len(), 2);

    let completed_sc1 = storage
        .list_runs(&RunFilter {
            scorecard_id: Some("sc-1".into()),
            status: Some(SimulationStatus::Completed),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(completed_sc1.len(), 1);
    assert_eq!(completed_sc1[0].id, first.id);

    let crisis = storage
        .list_runs(&RunFilter {
            scenario_id: Some("crisis".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(crisis.len(), 1);
    assert_eq!(crisis[0].id, second.id);
}

#[test]
fn duplicate_run_id_is_rejected() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = completed_run("sc-1", "baseline", vec![]);
    storage.insert_run(&run).unwrap();
    assert!(matches!(
        storage.insert_run(&run),
        Err(SynthpopError::StorageError(StorageError::DuplicateKey { .. }))
    ));
}

// --- Outcomes ---

#[test]
fn outcomes_page_in_population_order() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = completed_run("sc-1", "baseline", vec![]);
    storage.insert_run(&run).unwrap();
    let outcomes = outcomes_for(&run.id, 12);
    assert_eq!(storage.insert_outcomes(&outcomes).unwrap(), 12);

    assert_eq!(storage.count_outcomes(&run.id).unwrap(), 12);
    assert_eq!(storage.get_outcomes(&run.id, None, 0).unwrap(), outcomes);
    assert_eq!(storage.get_outcomes(&run.id, Some(5), 0).unwrap(), outcomes[..5]);
    assert_eq!(storage.get_outcomes(&run.id, Some(5), 10).unwrap(), outcomes[10..]);
    assert!(storage.get_outcomes(&run.id, Some(5), 50).unwrap().is_empty());
    assert!(storage.get_outcomes("other", None, 0).unwrap().is_empty());
}

#[test]
fn outcomes_appended_later_keep_order() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = completed_run("sc-1", "baseline", vec![]);
    storage.insert_run(&run).unwrap();
    let outcomes = outcomes_for(&run.id, 6);
    storage.insert_outcomes(&outcomes[..3]).unwrap();
    storage.insert_outcomes(&outcomes[3..]).unwrap();

    assert_eq!(storage.get_outcomes(&run.id, None, 0).unwrap(), outcomes);
}

#[test]
fn outcomes_require_an_existing_run() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let outcomes = outcomes_for("no-such-run", 2);
    assert!(storage.insert_outcomes(&outcomes).is_err());
    assert_eq!(storage.count_outcomes("no-such-run").unwrap(), 0);
}

#[test]
fn duplicate_outcome_rolls_back_the_batch() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = completed_run("sc-1", "baseline", vec![]);
    storage.insert_run(&run).unwrap();
    let mut outcomes = outcomes_for(&run.id, 3);
    outcomes.push(outcomes[0].clone());

    assert!(matches!(
        storage.insert_outcomes(&outcomes),
        Err(SynthpopError::StorageError(StorageError::DuplicateKey { .. }))
    ));
    assert_eq!(storage.count_outcomes(&run.id).unwrap(), 0);
}

#[test]
fn execution_is_written_with_its_outcomes() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = completed_run("sc-1", "baseline", vec![]);
    let outcomes = outcomes_for(&run.id, 5);

    storage.insert_execution(&run, &outcomes).unwrap();
    assert_eq!(storage.get_run(&run.id).unwrap().unwrap(), run);
    assert_eq!(storage.get_outcomes(&run.id, None, 0).unwrap(), outcomes);
}

#[test]
fn failed_outcome_write_leaves_no_run_behind() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = completed_run("sc-1", "baseline", vec![]);
    let mut outcomes = outcomes_for(&run.id, 4);
    outcomes.push(outcomes[1].clone());

    assert!(matches!(
        storage.insert_execution(&run, &outcomes),
        Err(SynthpopError::StorageError(StorageError::DuplicateKey { .. }))
    ));
    assert!(storage.get_run(&run.id).unwrap().is_none());
    assert_eq!(storage.count_outcomes(&run.id).unwrap(), 0);
    assert!(storage.list_runs(&RunFilter::default()).unwrap().is_empty());
}

#[test]
fn execution_rejects_outcomes_of_another_run() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = completed_run("sc-1", "baseline", vec![]);
    let outcomes = outcomes_for("someone-else", 2);

    assert!(matches!(
        storage.insert_execution(&run, &outcomes),
        Err(SynthpopError::ValidationError { .. })
    ));
    assert!(storage.get_run(&run.id).unwrap().is_none());
}

#[test]
fn failed_execution_without_outcomes_is_stored() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let run = failed_run("sc-1");
    storage.insert_execution(&run, &[]).unwrap();
    assert_eq!(storage.get_run(&run.id).unwrap().unwrap(), run);
}

// --- Float fidelity ---

/// Mean of per-synth rates over 20 synths at n = 100, the shape the engine
/// produces. These means rarely have short decimal forms.
fn population_mean(variant: u64) -> (AggregatedOutcomes, Vec<SynthOutcome>) {
    let outcomes: Vec<SynthOutcome> = (0..20u64)
        .map(|j| {
            let failed = ((variant * 37 + j * 11) % 61) as u32;
            let did_not_try = ((variant * 13 + j * 29) % 40) as u32;
            SynthOutcome::from_counts(
                "pending",
                format!("synth-{j:03}"),
                OutcomeCounts {
                    did_not_try,
                    failed,
                    success: 100 - failed - did_not_try,
                },
                LatentTraits {
                    capability_mean: (j + 1) as f64 / 7.0,
                    trust_mean: (variant % 97) as f64 / 97.0,
                    friction_tolerance_mean: 0.1 * j as f64 / 3.0,
                    exploration_prob: 1.0 / (variant + 3) as f64,
                },
            )
        })
        .collect();
    let n = outcomes.len() as f64;
    let mut sums = (0.0, 0.0, 0.0);
    for o in &outcomes {
        sums.0 += o.did_not_try_rate;
        sums.1 += o.failed_rate;
        sums.2 += o.success_rate;
    }
    let aggregated = AggregatedOutcomes {
        did_not_try_rate: sums.0 / n,
        failed_rate: sums.1 / n,
        success_rate: sums.2 / n,
    };
    (aggregated, outcomes)
}

#[test]
fn stored_floats_come_back_bit_identical() {
    let storage = StorageEngine::open_in_memory().unwrap();
    for variant in 0..500 {
        let (aggregated, outcomes) = population_mean(variant);
        let mut run = SimulationRun::new(
            "sc-1",
            "baseline",
            Vec::new(),
            SimulationConfig {
                n_executions: 100,
                sigma: 1.0 / (variant + 7) as f64,
                seed: variant,
            },
        );
        run.start().unwrap();
        run.complete(aggregated, Vec::new(), 0.1 * variant as f64 / 3.0)
            .unwrap();
        let outcomes: Vec<SynthOutcome> = outcomes
            .into_iter()
            .map(|o| SynthOutcome {
                simulation_id: run.id.clone(),
                ..o
            })
            .collect();

        storage.insert_execution(&run, &outcomes).unwrap();
        let loaded = storage.get_run(&run.id).unwrap().unwrap();
        assert_eq!(loaded, run, "variant {variant}");
        assert_eq!(
            storage.get_outcomes(&run.id, None, 0).unwrap(),
            outcomes,
            "variant {variant}"
        );
    }
}
