//! Paging through stored outcomes reproduces the slice of the full list.

use proptest::prelude::*;
use synthpop_core::models::{
    LatentTraits, OutcomeCounts, SimulationConfig, SimulationRun, SynthOutcome,
};
use synthpop_core::traits::ISimulationStore;
use synthpop_storage::StorageEngine;

fn seeded(count: usize) -> (StorageEngine, String, Vec<SynthOutcome>) {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = SimulationConfig {
        n_executions: 100,
        sigma: 0.0,
        seed: 1,
    };
    let mut run = SimulationRun::new("sc", "baseline", vec![], config);
    run.fail("seeded", 0.0).unwrap();
    storage.insert_run(&run).unwrap();

    let outcomes: Vec<SynthOutcome> = (0..count)
        .map(|i| {
            SynthOutcome::from_counts(
                run.id.as_str(),
                format!("p-{i:04}"),
                OutcomeCounts {
                    did_not_try: 0,
                    failed: (i % 3) as u32,
                    success: 2 - (i % 3) as u32,
                },
                LatentTraits::default(),
            )
        })
        .collect();
    storage.insert_outcomes(&outcomes).unwrap();
    (storage, run.id, outcomes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn page_matches_slice(count in 0usize..40, limit in 1usize..15, offset in 0usize..50) {
        let (storage, run_id, outcomes) = seeded(count);
        let page = storage.get_outcomes(&run_id, Some(limit), offset).unwrap();

        let start = offset.min(count);
        let end = (offset + limit).min(count);
        prop_assert_eq!(page, outcomes[start..end].to_vec());
    }

    #[test]
    fn pages_cover_everything_once(count in 0usize..40, limit in 1usize..15) {
        let (storage, run_id, outcomes) = seeded(count);
        let mut collected = Vec::new();
        let mut offset = 0;
        loop {
            let page = storage.get_outcomes(&run_id, Some(limit), offset).unwrap();
            if page.is_empty() {
                break;
            }
            offset += page.len();
            collected.extend(page);
        }
        prop_assert_eq!(collected, outcomes);
    }
}
