use synthpop_core::errors::*;

#[test]
fn not_found_carries_kind_and_id() {
    let err = SynthpopError::not_found("simulation", "abc-123");
    let msg = err.to_string();
    assert!(msg.contains("simulation"));
    assert!(msg.contains("abc-123"));
    assert_eq!(err.http_status(), 404);
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[test]
fn insufficient_samples_is_actionable() {
    let err = SynthpopError::InsufficientSamples {
        required: 40,
        available: 20,
    };
    let msg = err.to_string();
    assert!(msg.contains("40"));
    assert!(msg.contains("20"));
    assert!(msg.contains("larger synth population"));
    assert_eq!(err.http_status(), 400);
}

#[test]
fn validation_error_maps_to_422() {
    let err = SynthpopError::validation("n_executions", "must be >= 10, got 5");
    assert_eq!(err.http_status(), 422);
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert!(err.to_string().contains("n_executions"));
}

#[test]
fn computation_failure_carries_run_id() {
    let err = SynthpopError::ComputationFailure {
        run_id: "run-9".into(),
        reason: "no synth produced outcomes".into(),
    };
    assert!(err.to_string().contains("run-9"));
    assert_eq!(err.http_status(), 500);
}

// --- From impls ---

#[test]
fn storage_error_converts_to_synthpop_error() {
    let storage_err = StorageError::SqliteError {
        message: "disk full".into(),
    };
    let err: SynthpopError = storage_err.into();
    assert!(matches!(err, SynthpopError::StorageError(_)));
    assert_eq!(err.error_code(), "STORAGE_ERROR");
}

#[test]
fn config_error_converts_to_synthpop_error() {
    let cfg_err = ConfigError::ValidationFailed {
        field: "regions.min_samples".into(),
        message: "must be greater than 0".into(),
    };
    let err: SynthpopError = cfg_err.into();
    assert!(matches!(err, SynthpopError::ConfigError(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn serde_error_converts_and_maps_to_400() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: SynthpopError = serde_err.into();
    assert_eq!(err.http_status(), 400);
}
