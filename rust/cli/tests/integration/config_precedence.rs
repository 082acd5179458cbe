use crate::helpers::CliRunner;
use serde_json::Value;
use serial_test::serial;

#[test]
#[serial]
fn cfg_shows_defaults() {
    let cli = CliRunner::new();
    let res = cli.run_with_env(&["cfg"], &[("FLOPBOT_MODEL_DIR", "")]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();

    assert_eq!(json["epsilon"]["value"].as_f64(), Some(0.2));
    assert_eq!(json["epsilon"]["source"].as_str(), Some("default"));
    assert_eq!(json["learning_rate"]["value"].as_f64(), Some(0.05));
    assert_eq!(json["episodes_per_batch"]["value"].as_u64(), Some(100_000));
    assert_eq!(json["agent_a"]["value"].as_str(), Some("bot_1"));
    assert_eq!(json["agent_b"]["value"].as_str(), Some("bot_2"));
    assert_eq!(json["model_dir"]["value"].as_str(), Some("obj"));
    assert_eq!(json["stop_file"]["value"].as_str(), Some("quit"));
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["alternate_first_actor"]["value"].as_bool(), Some(true));
}

#[test]
#[serial]
fn env_overrides_file() {
    let cli = CliRunner::new();
    let cfg_path = cli.write_file(
        "flopbot.toml",
        "seed = 456\nepsilon = 0.1\nagent_a = \"alpha\"\nepisodes_per_batch = 10\n",
    );
    let cfg_path = cfg_path.to_string_lossy().into_owned();

    let res = cli.run_with_env(
        &["cfg"],
        &[("FLOPBOT_CONFIG", cfg_path.as_str()), ("FLOPBOT_SEED", "789")],
    );
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();

    assert_eq!(json["seed"]["value"].as_u64(), Some(789));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["epsilon"]["value"].as_f64(), Some(0.1));
    assert_eq!(json["epsilon"]["source"].as_str(), Some("file"));
    assert_eq!(json["agent_a"]["value"].as_str(), Some("alpha"));
    assert_eq!(json["episodes_per_batch"]["source"].as_str(), Some("file"));
    assert_eq!(json["model_dir"]["source"].as_str(), Some("env"));
}

#[test]
#[serial]
fn invalid_env_value_fails() {
    let cli = CliRunner::new();
    let res = cli.run_with_env(&["cfg"], &[("FLOPBOT_EPSILON", "lots")]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid epsilon"));
}

#[test]
#[serial]
fn unknown_file_key_fails() {
    let cli = CliRunner::new();
    let cfg_path = cli.write_file("bad.toml", "episilon = 0.3\n");
    let cfg_path = cfg_path.to_string_lossy().into_owned();
    let res = cli.run_with_env(&["cfg"], &[("FLOPBOT_CONFIG", cfg_path.as_str())]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("cannot parse config file"));
}

#[test]
#[serial]
fn same_agent_names_are_rejected() {
    let cli = CliRunner::new();
    let cfg_path = cli.write_file("same.toml", "agent_a = \"x\"\nagent_b = \"x\"\n");
    let cfg_path = cfg_path.to_string_lossy().into_owned();
    let res = cli.run_with_env(&["cfg"], &[("FLOPBOT_CONFIG", cfg_path.as_str())]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("must differ"));
}
