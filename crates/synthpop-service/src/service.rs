//! SynthpopService: owns the engine, analyzers, and stores for the lifetime
//! of the host process.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use synthpop_analysis::{ComparisonService, RegionAnalyzer, SensitivityAnalyzer};
use synthpop_core::errors::{SynthpopError, SynthpopResult};
use synthpop_core::models::{
    ComparisonResult, Region, Scenario, ScenarioCatalog, Scorecard, SensitivityReport,
    SimulationRun, Synth, SynthOutcome,
};
use synthpop_core::traits::{
    Cancellable, CancellationToken, IScorecardStore, ISimulationStore, ISynthStore, RunFilter,
};
use synthpop_core::SynthpopConfig;
use synthpop_simulation::{SimulationEngine, SimulationRequest};
use synthpop_storage::StorageEngine;

use crate::pagination::{Page, PageRequest};
use crate::requests::{
    parse_deltas, CompareRequest, CreateScorecardRequest, CreateSimulationRequest, RegionQuery,
};

/// Persistence collaborators, injected as trait objects.
#[derive(Clone)]
pub struct Stores {
    pub synths: Arc<dyn ISynthStore>,
    pub scorecards: Arc<dyn IScorecardStore>,
    pub simulations: Arc<dyn ISimulationStore>,
}

impl Stores {
    /// All three stores backed by one SQLite engine.
    pub fn from_storage(storage: Arc<StorageEngine>) -> Self {
        Self {
            synths: storage.clone(),
            scorecards: storage.clone(),
            simulations: storage,
        }
    }
}

/// Options for [`SynthpopService::open`].
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    /// SQLite file. `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    /// TOML config file; environment overrides are applied on top.
    pub config_path: Option<PathBuf>,
    /// Inline TOML, used instead of `config_path` when set.
    pub config_toml: Option<String>,
}

pub struct SynthpopService {
    config: SynthpopConfig,
    catalog: Arc<ScenarioCatalog>,
    stores: Stores,
    engine: Arc<SimulationEngine>,
    regions: RegionAnalyzer,
    sensitivity: SensitivityAnalyzer,
    comparison: ComparisonService,
}

impl SynthpopService {
    pub fn new(config: SynthpopConfig, stores: Stores) -> SynthpopResult<Self> {
        config.validate()?;
        let catalog = Arc::new(config.scenario_catalog()?);
        let engine = Arc::new(SimulationEngine::new(catalog.clone(), &config)?);
        let regions = RegionAnalyzer::new(config.regions.clone());
        let sensitivity = SensitivityAnalyzer::new(engine.clone(), config.sensitivity.clone());
        let comparison = ComparisonService::new(
            stores.simulations.clone(),
            regions.clone(),
            config.comparison.clone(),
        );

        Ok(Self {
            config,
            catalog,
            stores,
            engine,
            regions,
            sensitivity,
            comparison,
        })
    }

    /// Resolve configuration, install tracing, open storage.
    pub fn open(options: ServiceOptions) -> SynthpopResult<Self> {
        let config = match &options.config_toml {
            Some(toml) => SynthpopConfig::from_toml(toml)?,
            None => SynthpopConfig::load(options.config_path.as_deref())?,
        };
        synthpop_observability::init_from_config(&config.observability);

        let storage = match &options.db_path {
            Some(path) => StorageEngine::open(path)?,
            None => StorageEngine::open_in_memory()?,
        };
        tracing::info!(
            persistent = options.db_path.is_some(),
            scenarios = config.scenario_catalog()?.len(),
            "synthpop service starting"
        );
        Self::new(config, Stores::from_storage(Arc::new(storage)))
    }

    pub fn config(&self) -> &SynthpopConfig {
        &self.config
    }

    pub fn engine(&self) -> &Arc<SimulationEngine> {
        &self.engine
    }

    // --- Synths ---

    /// Bulk import. Ids already stored are skipped; returns the number added.
    pub fn import_synths(&self, synths: &[Synth]) -> SynthpopResult<usize> {
        let inserted = self.stores.synths.insert_synths(synths)?;
        tracing::info!(offered = synths.len(), inserted, "synths imported");
        Ok(inserted)
    }

    // --- Scenarios ---

    pub fn list_scenarios(&self) -> &[Scenario] {
        self.catalog.list()
    }

    pub fn get_scenario(&self, id: &str) -> SynthpopResult<&Scenario> {
        self.catalog
            .get(id)
            .ok_or_else(|| SynthpopError::not_found("scenario", id))
    }

    // --- Scorecards ---

    pub fn create_scorecard(&self, request: CreateScorecardRequest) -> SynthpopResult<Scorecard> {
        let scorecard = request.into_scorecard()?;
        self.stores.scorecards.create_scorecard(&scorecard)?;
        tracing::info!(scorecard_id = %scorecard.id, name = %scorecard.name, "scorecard created");
        Ok(scorecard)
    }

    pub fn list_scorecards(&self) -> SynthpopResult<Vec<Scorecard>> {
        self.stores.scorecards.list_scorecards()
    }

    pub fn get_scorecard(&self, id: &str) -> SynthpopResult<Scorecard> {
        self.stores
            .scorecards
            .get_scorecard(id)?
            .ok_or_else(|| SynthpopError::not_found("scorecard", id))
    }

    // --- Simulations ---

    /// Run a simulation to a terminal state and persist it with its outcomes.
    /// A `failed` run is returned as-is; callers inspect `status`.
    pub fn create_simulation(
        &self,
        request: CreateSimulationRequest,
    ) -> SynthpopResult<SimulationRun> {
        self.create_simulation_with_token(request, &CancellationToken::new())
    }

    pub fn create_simulation_with_token<C>(
        &self,
        request: CreateSimulationRequest,
        token: &C,
    ) -> SynthpopResult<SimulationRun>
    where
        C: Cancellable + ?Sized,
    {
        let scorecard = self.get_scorecard(&request.scorecard_id)?;
        let synths = self.select_population(&request)?;
        let config = self
            .engine
            .resolve_config(request.n_executions, request.sigma, request.seed);

        let execution = self.engine.run(
            SimulationRequest {
                scorecard: &scorecard,
                scenario_id: &request.scenario_id,
                synths: &synths,
                config,
            },
            token,
        )?;

        self.stores
            .simulations
            .insert_execution(&execution.run, &execution.outcomes)?;
        tracing::debug!(
            run_id = %execution.run.id,
            status = %execution.run.status,
            outcomes = execution.outcomes.len(),
            "simulation persisted"
        );
        Ok(execution.run)
    }

    fn select_population(&self, request: &CreateSimulationRequest) -> SynthpopResult<Vec<Synth>> {
        match (&request.synth_ids, request.n_synths) {
            (Some(_), Some(_)) => Err(SynthpopError::validation(
                "synth_ids",
                "pass either synth_ids or n_synths, not both",
            )),
            (Some(ids), None) => self.synths_by_id(ids),
            (None, Some(0)) => Err(SynthpopError::validation("n_synths", "must be >= 1")),
            (None, Some(n)) => self.stores.synths.first_synths(n),
            (None, None) => {
                let all = self.stores.synths.count_synths()?;
                self.stores.synths.first_synths(all)
            }
        }
    }

    /// Synths in the order requested. Any unknown id is a `NotFound`.
    fn synths_by_id(&self, ids: &[String]) -> SynthpopResult<Vec<Synth>> {
        let synths = self.stores.synths.get_synths(ids)?;
        if synths.len() != ids.len() {
            let found: HashSet<&str> = synths.iter().map(|s| s.id.as_str()).collect();
            if let Some(missing) = ids.iter().find(|id| !found.contains(id.as_str())) {
                return Err(SynthpopError::not_found("synth", missing.as_str()));
            }
        }
        Ok(synths)
    }

    /// Newest first.
    pub fn list_simulations(&self, filter: &RunFilter) -> SynthpopResult<Vec<SimulationRun>> {
        self.stores.simulations.list_runs(filter)
    }

    pub fn get_simulation(&self, id: &str) -> SynthpopResult<SimulationRun> {
        self.stores
            .simulations
            .get_run(id)?
            .ok_or_else(|| SynthpopError::not_found("simulation", id))
    }

    pub fn get_outcomes(
        &self,
        simulation_id: &str,
        page: PageRequest,
    ) -> SynthpopResult<Page<SynthOutcome>> {
        self.get_simulation(simulation_id)?;
        let limit = page.resolved_limit()?;
        let total = self.stores.simulations.count_outcomes(simulation_id)?;
        let items = self
            .stores
            .simulations
            .get_outcomes(simulation_id, Some(limit), page.offset)?;
        Ok(Page {
            items,
            total,
            limit,
            offset: page.offset,
        })
    }

    // --- Analyses ---

    pub fn get_regions(
        &self,
        simulation_id: &str,
        query: RegionQuery,
    ) -> SynthpopResult<Vec<Region>> {
        let run = self.get_simulation(simulation_id)?;
        let outcomes = self.stores.simulations.get_outcomes(simulation_id, None, 0)?;
        let min_failure_rate = query
            .min_failure_rate
            .unwrap_or(self.regions.config().default_min_failure_rate);

        let mut regions = self.regions.find_regions(&run, &outcomes, min_failure_rate)?;
        if let Some(limit) = query.limit {
            regions.truncate(limit);
        }
        Ok(regions)
    }

    /// `deltas` is the raw comma-separated query value; `None` uses the
    /// configured defaults.
    pub fn get_sensitivity(
        &self,
        simulation_id: &str,
        deltas: Option<&str>,
    ) -> SynthpopResult<SensitivityReport> {
        self.get_sensitivity_with_token(simulation_id, deltas, &CancellationToken::new())
    }

    pub fn get_sensitivity_with_token<C>(
        &self,
        simulation_id: &str,
        deltas: Option<&str>,
        token: &C,
    ) -> SynthpopResult<SensitivityReport>
    where
        C: Cancellable + ?Sized,
    {
        let deltas = match deltas {
            Some(raw) => parse_deltas(raw)?,
            None => self.sensitivity.default_deltas().to_vec(),
        };
        let run = self.get_simulation(simulation_id)?;
        let scorecard = self.get_scorecard(&run.scorecard_id)?;
        let synths = self.synths_by_id(&run.synth_ids)?;

        self.sensitivity
            .analyze(&run, &scorecard, &synths, &deltas, token)
    }

    pub fn compare(&self, request: CompareRequest) -> SynthpopResult<ComparisonResult> {
        self.comparison.compare(&request.simulation_ids)
    }
}
