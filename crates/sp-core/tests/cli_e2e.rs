//! End-to-end CLI tests for the spamplan binary.
//!
//! Every command runs against an empty temporary config directory so the
//! developer's own configuration never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the spamplan binary, isolated from user configuration.
fn spamplan(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spamplan").expect("spamplan binary should exist");
    cmd.env_remove("SPAMPLAN_KNOWLEDGE")
        .env_remove("SPAMPLAN_CLASSIFIER")
        .env_remove("SPAMPLAN_CONFIG_DIR")
        .env_remove("SPAMPLAN_LOG")
        .env_remove("SPAMPLAN_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(config_dir.path());
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

mod classify {
    use super::*;

    #[test]
    fn free_is_spam_as_json() {
        let dir = TempDir::new().unwrap();
        let output = spamplan(&dir)
            .args(["classify", "free"])
            .assert()
            .success()
            .get_output()
            .clone();
        let json = stdout_json(&output);
        assert_eq!(json["category"], "Spam");
        assert_eq!(json["strategy"], "naive_bayes");
        assert_eq!(json["selected"][0]["word"], "free");
    }

    #[test]
    fn monad_is_ham_in_summary() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["--format", "summary", "classify", "monad"])
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with("Ham ("));
    }

    #[test]
    fn fisher_strategy_flag() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["-f", "summary", "classify", "--strategy", "fisher", "free", "asdf"])
            .assert()
            .success()
            .stdout(predicate::str::contains("via fisher"));
    }

    #[test]
    fn selection_flag_changes_outcome() {
        let dir = TempDir::new().unwrap();
        let words = ["free", "monad", "asdf", "bayes", "quick"];
        spamplan(&dir)
            .args(["-f", "summary", "classify", "-n", "2", "--selection", "least_informative"])
            .args(words)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Spam"));
        spamplan(&dir)
            .args(["-f", "summary", "classify", "-n", "2", "--selection", "most_informative"])
            .args(words)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Ham"));
    }

    #[test]
    fn unknown_words_fall_back_to_prior() {
        let dir = TempDir::new().unwrap();
        let output = spamplan(&dir)
            .args(["classify", "totally_unknown_word"])
            .assert()
            .success()
            .get_output()
            .clone();
        let json = stdout_json(&output);
        assert_eq!(json["category"], "Spam");
        assert_eq!(json["ignored"][0], "totally_unknown_word");
    }

    #[test]
    fn zero_top_n_is_an_argument_error() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["classify", "--top-n", "0", "free"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("ERR_ARGS"));
    }

    #[test]
    fn missing_words_is_an_argument_error() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir).arg("classify").assert().code(10);
    }
}

mod logging {
    use super::*;

    #[test]
    fn verbose_emits_command_events() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["-v", "-f", "summary", "classify", "free"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Starting spamplan"))
            .stderr(predicate::str::contains("Query classified"));
    }

    #[test]
    fn default_level_keeps_stderr_quiet() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["-f", "summary", "classify", "free"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Starting spamplan").not());
    }

    #[test]
    fn jsonl_events_carry_event_names() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .env("SPAMPLAN_LOG_FORMAT", "jsonl")
            .args(["-v", "classify", "free"])
            .assert()
            .success()
            .stderr(predicate::str::contains("\"event\":\"run.started\""));
    }
}

mod other_commands {
    use super::*;

    #[test]
    fn posterior_summary_lists_each_category() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["-f", "summary", "posterior", "free"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Spam: 0.9"))
            .stdout(predicate::str::contains("Ham: 0.0"));
    }

    #[test]
    fn demo_runs_reference_corpus() {
        let dir = TempDir::new().unwrap();
        let output = spamplan(&dir)
            .arg("demo")
            .assert()
            .success()
            .get_output()
            .clone();
        let json = stdout_json(&output);
        let cases = json["cases"].as_array().unwrap();
        assert_eq!(cases.len(), 4);
        assert_eq!(cases[0]["results"][0]["category"], "Spam");
        assert_eq!(cases[1]["results"][1]["category"], "Ham");
        assert_eq!(cases[1]["results"][1]["strategy"], "fisher");
    }

    #[test]
    fn demo_summary_mirrors_driver_output() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["-f", "summary", "demo"])
            .assert()
            .success()
            .stdout(predicate::str::contains("use corpus: [\"free\"]"))
            .stdout(predicate::str::contains("naive_bayes:"));
    }

    #[test]
    fn words_lists_most_informative_first() {
        let dir = TempDir::new().unwrap();
        let output = spamplan(&dir)
            .args(["-f", "summary", "words", "--limit", "3"])
            .assert()
            .success()
            .get_output()
            .clone();
        let text = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("0.500000"));
    }

    #[test]
    fn version_reports_package_version() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn unknown_command_fails() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }
}

mod configuration {
    use super::*;

    #[test]
    fn config_show_reports_builtin_defaults() {
        let dir = TempDir::new().unwrap();
        let output = spamplan(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .get_output()
            .clone();
        let json = stdout_json(&output);
        assert_eq!(json["source"]["knowledge_source"], "builtin default");
        assert_eq!(json["settings"]["top_n"], 15);
    }

    #[test]
    fn custom_knowledge_file_is_used() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("knowledge.json"),
            r#"{
                "schema_version": "1.0.0",
                "categories": ["news", "sport"],
                "message_counts": [10, 10],
                "words": { "goal": [1, 8], "election": [7, 0] }
            }"#,
        )
        .unwrap();
        spamplan(&dir)
            .args(["-f", "summary", "classify", "goal"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("sport"));
    }

    #[test]
    fn settings_file_selects_strategy() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("classifier.toml"),
            "schema_version = \"1.0.0\"\nstrategy = \"fisher\"\n",
        )
        .unwrap();
        let output = spamplan(&dir)
            .args(["classify", "free"])
            .assert()
            .success()
            .get_output()
            .clone();
        assert_eq!(stdout_json(&output)["strategy"], "fisher");
    }

    #[test]
    fn missing_explicit_knowledge_file() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["--knowledge", "/definitely/not/here.json", "classify", "free"])
            .assert()
            .code(10);
    }

    #[test]
    fn invalid_knowledge_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("knowledge.json"),
            r#"{ "schema_version": "1.0.0", "categories": ["a", "b"], "message_counts": [1, 1],
                 "words": { "x": [5, 0] } }"#,
        )
        .unwrap();
        spamplan(&dir)
            .args(["config", "validate"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("ERR_CONFIG"));
    }

    #[test]
    fn schema_version_mismatch() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("classifier.json"),
            r#"{ "schema_version": "9.9.9" }"#,
        )
        .unwrap();
        spamplan(&dir)
            .args(["config", "validate"])
            .assert()
            .code(13);
    }

    #[test]
    fn valid_config_validates() {
        let dir = TempDir::new().unwrap();
        spamplan(&dir)
            .args(["-f", "summary", "config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("valid"));
    }
}
