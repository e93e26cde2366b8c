use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use synthpop_core::models::{ScenarioCatalog, SimulationConfig};
use synthpop_core::traits::CancellationToken;
use synthpop_core::SynthpopConfig;
use synthpop_simulation::{SimulationEngine, SimulationRequest};

fn bench_engine(c: &mut Criterion) {
    let engine =
        SimulationEngine::new(Arc::new(ScenarioCatalog::builtin()), &SynthpopConfig::default())
            .unwrap();
    let scorecard = test_fixtures::moderate_scorecard();
    let token = CancellationToken::new();

    let mut group = c.benchmark_group("simulation_run");
    group.sample_size(10);
    for population in [100usize, 1_000] {
        let synths = test_fixtures::generated_population(population);
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &synths,
            |b, synths| {
                b.iter(|| {
                    engine
                        .run(
                            SimulationRequest {
                                scorecard: &scorecard,
                                scenario_id: "baseline",
                                synths,
                                config: SimulationConfig {
                                    n_executions: 1_000,
                                    sigma: 0.1,
                                    seed: 42,
                                },
                            },
                            &token,
                        )
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
