use crate::errors::SynthpopResult;
use crate::models::{Scorecard, SimulationRun, SimulationStatus, Synth, SynthOutcome};

/// Read access to the synth population, plus bulk import.
pub trait ISynthStore: Send + Sync {
    fn insert_synths(&self, synths: &[Synth]) -> SynthpopResult<usize>;
    fn get_synth(&self, id: &str) -> SynthpopResult<Option<Synth>>;
    /// Synths for `ids`, in the order given. Unknown ids are skipped.
    fn get_synths(&self, ids: &[String]) -> SynthpopResult<Vec<Synth>>;
    /// The first `limit` synths in insertion order.
    fn first_synths(&self, limit: usize) -> SynthpopResult<Vec<Synth>>;
    fn count_synths(&self) -> SynthpopResult<usize>;
}

pub trait IScorecardStore: Send + Sync {
    fn create_scorecard(&self, scorecard: &Scorecard) -> SynthpopResult<()>;
    fn get_scorecard(&self, id: &str) -> SynthpopResult<Option<Scorecard>>;
    fn list_scorecards(&self) -> SynthpopResult<Vec<Scorecard>>;
}

/// Optional filters for listing runs.
#[derive(Debug, Clone, Default)]
pub struct RunFilter {
    pub scorecard_id: Option<String>,
    pub scenario_id: Option<String>,
    pub status: Option<SimulationStatus>,
}

/// Runs and their per-synth outcomes. Both are written once, after the
/// owning computation has reached a terminal state.
pub trait ISimulationStore: Send + Sync {
    fn insert_run(&self, run: &SimulationRun) -> SynthpopResult<()>;
    fn get_run(&self, id: &str) -> SynthpopResult<Option<SimulationRun>>;
    /// Newest first.
    fn list_runs(&self, filter: &RunFilter) -> SynthpopResult<Vec<SimulationRun>>;

    fn insert_outcomes(&self, outcomes: &[SynthOutcome]) -> SynthpopResult<usize>;
    /// A finished run together with its outcomes, atomically. Readers see
    /// both or neither.
    fn insert_execution(
        &self,
        run: &SimulationRun,
        outcomes: &[SynthOutcome],
    ) -> SynthpopResult<()>;
    /// Outcomes in population order; `limit = None` returns everything after `offset`.
    fn get_outcomes(
        &self,
        simulation_id: &str,
        limit: Option<usize>,
        offset: usize,
    ) -> SynthpopResult<Vec<SynthOutcome>>;
    fn count_outcomes(&self, simulation_id: &str) -> SynthpopResult<usize>;
}
