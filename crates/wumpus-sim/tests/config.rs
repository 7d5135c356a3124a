use std::io::Write;

use wumpus_core::Action;
use wumpus_sim::{ConfigError, Scoring, SimConfig};

#[test]
fn defaults_match_the_classic_game() {
    let config = SimConfig::default();
    assert_eq!(config.size, 8);
    assert_eq!(config.wumpus_count, 2);
    assert_eq!(config.pit_probability, 0.2);
    assert_eq!(config.relocation_interval, 5);
    assert_eq!(config.max_steps, 500);

    let scoring = Scoring::default();
    assert_eq!(scoring.action_cost(Action::MoveForward), -1);
    assert_eq!(scoring.action_cost(Action::TurnLeft), -1);
    assert_eq!(scoring.action_cost(Action::Shoot), -10);
    assert_eq!(scoring.action_cost(Action::Grab), 0);
    assert_eq!(scoring.death, -1000);
}

#[test]
fn partial_yaml_keeps_other_defaults() {
    let config: SimConfig = serde_yaml::from_str(
        "size: 5\nrelocation: true\nscoring:\n  death: -500\n",
    )
    .expect("parse");
    assert_eq!(config.size, 5);
    assert!(config.relocation);
    assert_eq!(config.scoring.death, -500);
    assert_eq!(config.scoring.climb_with_gold, 1000);
    assert_eq!(config.wumpus_count, 2);
}

#[test]
fn load_validates() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "pit_probability: 1.5").expect("write");

    let err = SimConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("pit_probability"));
}

#[test]
fn load_rejects_malformed_yaml() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "size: [not a number").expect("write");

    let err = SimConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn tiny_grids_are_invalid() {
    let config = SimConfig {
        size: 1,
        ..SimConfig::default()
    };
    assert!(config.validate().is_err());
}
