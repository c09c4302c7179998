//! Integration tests for the stage runner and pipeline.
//!
//! Each test drives a full stage execution through the public API against a
//! temporary directory, checking the file-level contract: exactly one input
//! read, exactly one output written, byte-stable content under the identity
//! transform.

use std::fs;
use std::path::Path;

use pipestage::stage::{ExecutionMode, ExecutionStatus, Pipeline, StageConfig, StageRunner};
use pipestage::{Dataset, StageError};

fn seed_csv(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("seed fixture file");
}

#[test]
fn test_predict_stage_local_mode_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_csv(dir.path(), "predictions_input.csv", "id,val\n1,10\n2,20\n");

    let runner = StageRunner::new(StageConfig::predict());
    let base = dir.path().to_string_lossy().to_string();
    let report = runner
        .run_with_args(&["local".to_string(), base])
        .expect("stage should complete");

    assert_eq!(report.rows_read, 2);
    assert_eq!(report.rows_written, 2);

    let output = fs::read_to_string(dir.path().join("predictions_output.csv"))
        .expect("output file should exist");
    assert_eq!(output, "id,val\n1,10\n2,20\n");
}

#[test]
fn test_platform_mode_ignores_second_argument() {
    let runner = StageRunner::new(StageConfig::predict());

    // Anything other than "local" falls back to the platform mounts, which
    // do not exist here, so the run fails on the platform input path.
    let result = runner.run_with_args(&["cloud", "/tmp/somewhere"]);

    match result {
        Err(StageError::MissingInputFile(path)) => {
            assert_eq!(
                path,
                Path::new("/opt/ml/processing/input/predictions_input.csv")
            );
        }
        other => panic!("expected MissingInputFile, got {:?}", other),
    }
}

#[test]
fn test_missing_input_leaves_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let runner = StageRunner::new(StageConfig::preprocess());

    let result = runner.run(&ExecutionMode::Local(dir.path().to_path_buf()));

    assert!(matches!(result, Err(StageError::MissingInputFile(_))));
    assert!(fs::read_dir(dir.path())
        .expect("read dir")
        .next()
        .is_none());
}

#[test]
fn test_stage_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_csv(dir.path(), "pre_processing_input.csv", "a,b,c\nx,y,z\n");

    let runner = StageRunner::new(StageConfig::preprocess());
    let mode = ExecutionMode::Local(dir.path().to_path_buf());

    runner.run(&mode).expect("first run");
    let first =
        fs::read_to_string(dir.path().join("predictions_input.csv")).expect("first output");
    runner.run(&mode).expect("second run");
    let second =
        fs::read_to_string(dir.path().join("predictions_input.csv")).expect("second output");

    assert_eq!(first, second);
}

#[test]
fn test_run_all_chains_by_file_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_csv(dir.path(), "pre_processing_input.csv", "id,val\n1,10\n2,20\n");

    let executions = Pipeline::standard().run_local(dir.path());

    assert_eq!(executions.len(), 3);
    assert!(executions
        .iter()
        .all(|e| e.status == ExecutionStatus::Completed));

    // The chain hands the same content through every stage untouched.
    let final_output =
        fs::read_to_string(dir.path().join("final_output.csv")).expect("final output");
    assert_eq!(final_output, "id,val\n1,10\n2,20\n");
}

#[test]
fn test_run_all_aborts_mid_chain_on_missing_handoff() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Seed only the predict input: preprocess fails first, nothing else runs.
    seed_csv(dir.path(), "predictions_input.csv", "id\n1\n");

    let executions = Pipeline::standard().run_local(dir.path());

    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].status, ExecutionStatus::Failed);
    assert!(!dir.path().join("final_output.csv").exists());
}

#[test]
fn test_custom_stage_config_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let work = dir.path().join("work");
    fs::create_dir_all(&work).expect("create work dir");
    seed_csv(&work, "custom_in.csv", "k,v\n1,one\n");

    let definition = dir.path().join("stage.json");
    fs::write(
        &definition,
        r#"{
            "name": "custom",
            "input_file_name": "custom_in.csv",
            "output_file_name": "custom_out.csv",
            "default_input_dir": "/nonexistent/in",
            "default_output_dir": "/nonexistent/out"
        }"#,
    )
    .expect("write stage definition");

    let config = StageConfig::from_file(&definition).expect("definition should load");
    let runner = StageRunner::new(config);
    runner
        .run(&ExecutionMode::Local(work.clone()))
        .expect("stage should complete");

    let output = fs::read_to_string(work.join("custom_out.csv")).expect("output file");
    assert_eq!(output, "k,v\n1,one\n");
}

#[test]
fn test_quoted_fields_survive_reserialization() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_csv(
        dir.path(),
        "predictions_input.csv",
        "id,note\n1,\"a, b\"\n2,plain\n",
    );

    let runner = StageRunner::new(StageConfig::predict());
    runner
        .run(&ExecutionMode::Local(dir.path().to_path_buf()))
        .expect("stage should complete");

    let output = Dataset::read_csv(&dir.path().join("predictions_output.csv"))
        .expect("output should parse");
    assert_eq!(output.rows()[0], vec!["1", "a, b"]);
    assert_eq!(output.rows()[1], vec!["2", "plain"]);
}
