//! v001: synths, scorecards, simulation_runs, synth_outcomes.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS synths (
    seq                     INTEGER PRIMARY KEY AUTOINCREMENT,
    id                      TEXT NOT NULL UNIQUE,
    name                    TEXT NOT NULL DEFAULT '',
    -- Observables are nullable: SQLite binds NaN as NULL, and corrupt synths
    -- are kept so that runs can exclude them.
    digital_literacy        REAL,
    similar_tool_experience REAL,
    motor_ability           REAL,
    time_availability       REAL,
    domain_expertise        REAL
);

CREATE TABLE IF NOT EXISTS scorecards (
    seq            INTEGER PRIMARY KEY AUTOINCREMENT,
    id             TEXT NOT NULL UNIQUE,
    name           TEXT NOT NULL,
    description    TEXT,
    complexity     REAL NOT NULL,
    initial_effort REAL NOT NULL,
    perceived_risk REAL NOT NULL,
    time_to_value  REAL NOT NULL,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS simulation_runs (
    seq                    INTEGER PRIMARY KEY AUTOINCREMENT,
    id                     TEXT NOT NULL UNIQUE,
    scorecard_id           TEXT NOT NULL,
    scenario_id            TEXT NOT NULL,
    status                 TEXT NOT NULL,
    config                 TEXT NOT NULL,
    synth_ids              TEXT NOT NULL,
    aggregated_outcomes    TEXT,
    total_synths           INTEGER NOT NULL,
    excluded_synth_ids     TEXT NOT NULL DEFAULT '[]',
    failure_reason         TEXT,
    execution_time_seconds REAL NOT NULL DEFAULT 0,
    created_at             TEXT NOT NULL,
    started_at             TEXT,
    completed_at           TEXT
);

CREATE INDEX IF NOT EXISTS idx_runs_scorecard ON simulation_runs(scorecard_id);
CREATE INDEX IF NOT EXISTS idx_runs_scenario ON simulation_runs(scenario_id);
CREATE INDEX IF NOT EXISTS idx_runs_status ON simulation_runs(status);

CREATE TABLE IF NOT EXISTS synth_outcomes (
    simulation_id    TEXT NOT NULL REFERENCES simulation_runs(id) ON DELETE CASCADE,
    position         INTEGER NOT NULL,
    synth_id         TEXT NOT NULL,
    did_not_try_rate REAL NOT NULL,
    failed_rate      REAL NOT NULL,
    success_rate     REAL NOT NULL,
    latent_traits    TEXT NOT NULL,
    PRIMARY KEY (simulation_id, synth_id)
);

CREATE INDEX IF NOT EXISTS idx_outcomes_position ON synth_outcomes(simulation_id, position);
";
