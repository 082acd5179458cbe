use crate::helpers::{CliRunner, as_strs};
use flopbot_ai::Agent;
use serde_json::Value;
use serial_test::serial;

#[test]
#[serial]
fn train_saves_both_agents_and_reports_totals() {
    let cli = CliRunner::new();
    let args = cli.train_args(2, 100, 42);
    let res = cli.run(&as_strs(&args));

    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Trained: 200 episodes in 2 batches"));
    assert!(res.stdout.contains("Seed: 42"));
    for name in ["bot_1", "bot_2"] {
        assert!(Agent::policy_path(name, &cli.model_dir(), false).exists());
        assert!(Agent::value_path(name, &cli.model_dir(), false).exists());
    }
}

#[test]
#[serial]
fn compressed_training_round_trips_through_inspect() {
    let cli = CliRunner::new();
    let mut args = cli.train_args(1, 300, 7);
    args.push("--compress".into());
    let res = cli.run(&as_strs(&args));
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(Agent::policy_path("bot_1", &cli.model_dir(), true).exists());

    let agent = Agent::load_or_init("bot_1", &cli.model_dir(), true).unwrap();
    assert!(!agent.policy.is_empty());
}

#[test]
#[serial]
fn inspect_prints_distribution_for_opening_state() {
    let cli = CliRunner::new();
    let args = cli.train_args(1, 2000, 3);
    assert_eq!(cli.run(&as_strs(&args)).exit_code, 0);

    let res = cli.run(&[
        "inspect", "--agent", "bot_1", "--hole", "AsAh", "--board", "2c7s9d",
    ]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["agent"].as_str(), Some("bot_1"));
    assert_eq!(json["legal_actions"], serde_json::json!(["Ch", "B"]));
    assert!(json["greedy"].is_string());
    if let Some(policy) = json["policy"].as_object() {
        let total: f64 = policy.values().filter_map(Value::as_f64).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}

#[test]
#[serial]
fn eval_reads_saved_agents_without_changing_them() {
    let cli = CliRunner::new();
    let args = cli.train_args(1, 500, 11);
    assert_eq!(cli.run(&as_strs(&args)).exit_code, 0);
    let policy_path = Agent::policy_path("bot_1", &cli.model_dir(), false);
    let before = std::fs::read(&policy_path).unwrap();

    let res = cli.run(&["eval", "--hands", "300", "--seed", "5"]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Hands played: 300"));
    assert!(res.stdout.contains("bot_1 (player):"));
    assert!(res.stdout.contains("bot_2 (opponent):"));
    assert!(res.stdout.contains("Showdowns:"));
    assert_eq!(std::fs::read(&policy_path).unwrap(), before);

    let again = cli.run(&["eval", "--hands", "300", "--seed", "5"]);
    assert_eq!(again.stdout, res.stdout);
}

#[test]
#[serial]
fn corrupt_artifact_stops_training() {
    let cli = CliRunner::new();
    std::fs::create_dir_all(cli.model_dir()).unwrap();
    std::fs::write(Agent::policy_path("bot_2", &cli.model_dir(), false), "garbage").unwrap();
    std::fs::write(Agent::value_path("bot_2", &cli.model_dir(), false), "garbage").unwrap();

    let args = cli.train_args(1, 10, 1);
    let res = cli.run(&as_strs(&args));
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Corrupt artifact"));
    assert!(!Agent::policy_path("bot_1", &cli.model_dir(), false).exists());
}

#[test]
#[serial]
fn second_run_resumes_from_saved_tables() {
    let cli = CliRunner::new();
    let args = cli.train_args(1, 500, 1);
    assert_eq!(cli.run(&as_strs(&args)).exit_code, 0);
    let first = Agent::load_or_init("bot_1", &cli.model_dir(), false).unwrap();

    let args = cli.train_args(1, 500, 2);
    assert_eq!(cli.run(&as_strs(&args)).exit_code, 0);
    let second = Agent::load_or_init("bot_1", &cli.model_dir(), false).unwrap();

    assert!(second.policy.len() >= first.policy.len());
    assert!(second.values.len() >= first.values.len());
}
