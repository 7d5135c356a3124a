use std::io::Write;

use wumpus_agent::{AgentConfig, ConfigError};

#[test]
fn defaults_match_documented_values() {
    let config = AgentConfig::default();
    assert_eq!(config.costs.unknown_risk, 6);
    assert_eq!(config.costs.dangerous_risk, 60);
    assert_eq!(config.relocation_interval, 5);
    assert_eq!(config.utility.confirmed_shot, 100);
    assert!(!config.relocation);
    assert_eq!(config.actions_left(3), 2);
    assert_eq!(config.actions_left(9), 0);
}

#[test]
fn partial_yaml_keeps_defaults() {
    let yaml = "relocation: true\ncosts:\n  unknown_risk: 9\nutility:\n  interruption_penalty: 15\n";
    let config: AgentConfig = serde_yaml::from_str(yaml).expect("parse");
    assert!(config.relocation);
    assert_eq!(config.costs.unknown_risk, 9);
    assert_eq!(config.costs.move_cost, 1);
    assert_eq!(config.utility.interruption_penalty, 15);
    assert_eq!(config.utility.risky_base, -50);
    assert_eq!(config.relocation_interval, 5);
}

#[test]
fn load_reads_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "wumpus_count: 3\nrelocation_interval: 7").expect("write");

    let config = AgentConfig::load(file.path()).expect("load");
    assert_eq!(config.wumpus_count, 3);
    assert_eq!(config.relocation_interval, 7);
}

#[test]
fn load_rejects_zero_interval() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "relocation_interval: 0").expect("write");

    let err = AgentConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = AgentConfig::load(std::path::Path::new("/nonexistent/agent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/agent.yaml"));
}
