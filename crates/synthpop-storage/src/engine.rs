//! StorageEngine: the single SQLite connection and the store trait impls.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;

use synthpop_core::errors::SynthpopResult;
use synthpop_core::models::{Scorecard, SimulationRun, Synth, SynthOutcome};
use synthpop_core::traits::{IScorecardStore, ISimulationStore, ISynthStore, RunFilter};

use crate::migrations;
use crate::pragmas::{apply_memory_pragmas, apply_pragmas, verify_wal_mode};
use crate::queries::{outcome_ops, run_ops, scorecard_ops, synth_ops};
use crate::to_storage_err;

/// Owns the database connection. Writes and reads are serialized through
/// one mutex; every store call is a short statement or one transaction.
pub struct StorageEngine {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl StorageEngine {
    /// Open (or create) a database file, apply pragmas, run migrations.
    pub fn open(path: &Path) -> SynthpopResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        let wal = verify_wal_mode(&conn)?;
        tracing::info!(
            path = %path.display(),
            schema_version = migrations::LATEST_VERSION,
            wal,
            "storage opened"
        );

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (tests and ephemeral runs).
    pub fn open_in_memory() -> SynthpopResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_memory_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn schema_version(&self) -> SynthpopResult<u32> {
        self.with_conn(migrations::current_version)
    }

    pub fn is_wal(&self) -> SynthpopResult<bool> {
        self.with_conn(verify_wal_mode)
    }

    fn with_conn<F, T>(&self, f: F) -> SynthpopResult<T>
    where
        F: FnOnce(&Connection) -> SynthpopResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection lock poisoned"))?;
        f(&guard)
    }
}

impl ISynthStore for StorageEngine {
    fn insert_synths(&self, synths: &[Synth]) -> SynthpopResult<usize> {
        self.with_conn(|conn| synth_ops::insert_synths(conn, synths))
    }

    fn get_synth(&self, id: &str) -> SynthpopResult<Option<Synth>> {
        self.with_conn(|conn| synth_ops::get_synth(conn, id))
    }

    fn get_synths(&self, ids: &[String]) -> SynthpopResult<Vec<Synth>> {
        self.with_conn(|conn| synth_ops::get_synths(conn, ids))
    }

    fn first_synths(&self, limit: usize) -> SynthpopResult<Vec<Synth>> {
        self.with_conn(|conn| synth_ops::first_synths(conn, limit))
    }

    fn count_synths(&self) -> SynthpopResult<usize> {
        self.with_conn(synth_ops::count_synths)
    }
}

impl IScorecardStore for StorageEngine {
    fn create_scorecard(&self, scorecard: &Scorecard) -> SynthpopResult<()> {
        self.with_conn(|conn| scorecard_ops::insert_scorecard(conn, scorecard))
    }

    fn get_scorecard(&self, id: &str) -> SynthpopResult<Option<Scorecard>> {
        self.with_conn(|conn| scorecard_ops::get_scorecard(conn, id))
    }

    fn list_scorecards(&self) -> SynthpopResult<Vec<Scorecard>> {
        self.with_conn(scorecard_ops::list_scorecards)
    }
}

impl ISimulationStore for StorageEngine {
    fn insert_run(&self, run: &SimulationRun) -> SynthpopResult<()> {
        self.with_conn(|conn| run_ops::insert_run(conn, run))
    }

    fn get_run(&self, id: &str) -> SynthpopResult<Option<SimulationRun>> {
        self.with_conn(|conn| run_ops::get_run(conn, id))
    }

    fn list_runs(&self, filter: &RunFilter) -> SynthpopResult<Vec<SimulationRun>> {
        self.with_conn(|conn| run_ops::list_runs(conn, filter))
    }

    fn insert_outcomes(&self, outcomes: &[SynthOutcome]) -> SynthpopResult<usize> {
        self.with_conn(|conn| outcome_ops::insert_outcomes(conn, outcomes))
    }

    fn insert_execution(
        &self,
        run: &SimulationRun,
        outcomes: &[SynthOutcome],
    ) -> SynthpopResult<()> {
        self.with_conn(|conn| run_ops::insert_execution(conn, run, outcomes))
    }

    fn get_outcomes(
        &self,
        simulation_id: &str,
        limit: Option<usize>,
        offset: usize,
    ) -> SynthpopResult<Vec<SynthOutcome>> {
        self.with_conn(|conn| outcome_ops::get_outcomes(conn, simulation_id, limit, offset))
    }

    fn count_outcomes(&self, simulation_id: &str) -> SynthpopResult<usize> {
        self.with_conn(|conn| outcome_ops::count_outcomes(conn, simulation_id))
    }
}
