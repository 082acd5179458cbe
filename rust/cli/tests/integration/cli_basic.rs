use crate::helpers::CliRunner;
use serial_test::serial;

#[test]
#[serial]
fn help_lists_every_subcommand() {
    let cli = CliRunner::new();
    let res = cli.run(&["--help"]);
    assert_eq!(res.exit_code, 0);
    for cmd in ["train", "eval", "inspect", "cfg"] {
        assert!(res.stdout.contains(cmd), "help is missing {cmd}");
    }
}

#[test]
#[serial]
fn unknown_flag_exits_with_two() {
    let cli = CliRunner::new();
    let res = cli.run(&["train", "--no-such-flag"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stdout.is_empty());
    assert!(res.stderr.contains("Usage: flopbot"));
}

#[test]
#[serial]
fn invalid_epsilon_flag_is_reported_on_stderr() {
    let cli = CliRunner::new();
    let res = cli.run(&["train", "--batches", "1", "--epsilon", "1.5"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.starts_with("Error: Configuration error"));
    assert!(res.stderr.contains("epsilon"));
}

#[test]
#[serial]
fn inspect_rejects_malformed_cards() {
    let cli = CliRunner::new();
    let res = cli.run(&[
        "inspect", "--agent", "bot_1", "--hole", "AsAs", "--board", "2c7s9d",
    ]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("different"));
}
