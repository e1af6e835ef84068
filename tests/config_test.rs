use clap::{CommandFactory, FromArgMatches, Parser};
use liftforge::config::{tier_coefficient, PreferenceCoefficients, ScoringConfig, PREFERENCE_RANGE};
use liftforge::error::LiftForgeError;

#[derive(Parser, Debug)]
struct Harness {
    #[command(flatten)]
    config: ScoringConfig,
}

/// Parses `args` the way the binary does and returns the typed config plus
/// the raw matches.
fn parse(args: &[&str]) -> (ScoringConfig, clap::ArgMatches) {
    let argv = std::iter::once("liftforge").chain(args.iter().copied());
    let matches = Harness::command().get_matches_from(argv);
    let harness = Harness::from_arg_matches(&matches).unwrap();
    (harness.config, matches)
}

#[test]
fn test_cli_defaults_match_struct_defaults() {
    let (cli, _) = parse(&[]);
    assert_eq!(cli, ScoringConfig::default());
    assert_eq!(cli.search.exercises_per_day, 5);
    assert_eq!(cli.search.exhaustive_threshold, 10);
    assert_eq!(cli.search.max_2opt_iterations, 100);
    assert_eq!(cli.weights.major_muscle, vec![6.0, 5.0, 3.0, 1.0, 0.0]);
    assert_eq!(cli.weights.penalty_weekly_repeat, -6.0);
}

#[test]
fn test_merge_only_overrides_flags_given_on_command_line() {
    // Dataset values that differ from the CLI defaults
    let mut file_config = ScoringConfig::default();
    file_config.search.exercises_per_day = 4;
    file_config.weights.common_bonus = 7.0;

    let (cli, matches) = parse(&[
        "--exhaustive-threshold",
        "6",
        "--major-muscle",
        "9,8,7,6,5",
        "--penalty-same-family",
        "-12",
    ]);
    file_config.merge_from_cli(&cli, &matches);

    // untouched
    assert_eq!(file_config.search.exercises_per_day, 4);
    assert_eq!(file_config.weights.common_bonus, 7.0);
    // overridden
    assert_eq!(file_config.search.exhaustive_threshold, 6);
    assert_eq!(file_config.weights.major_muscle, vec![9.0, 8.0, 7.0, 6.0, 5.0]);
    assert_eq!(file_config.weights.penalty_same_family, -12.0);
}

#[test]
fn test_validate_rejects_zero_exercises() {
    let mut config = ScoringConfig::default();
    config.search.exercises_per_day = 0;
    assert!(matches!(config.validate(), Err(LiftForgeError::Config(_))));
}

#[test]
fn test_validate_requires_tables_covering_every_position() {
    let mut config = ScoringConfig::default();
    config.weights.equipment = vec![1.0, 2.0, 3.0];
    match config.validate() {
        Err(LiftForgeError::Config(msg)) => assert!(msg.contains("equipment")),
        other => panic!("expected config error, got {:?}", other),
    }

    // Fewer exercises per day makes the short table acceptable
    config.search.exercises_per_day = 3;
    assert!(config.validate().is_ok());

    // Longer tables are fine
    config.weights.equipment = vec![1.0; 9];
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_non_finite_entries() {
    let mut config = ScoringConfig::default();
    config.weights.compound[2] = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_json_config_fills_defaults() {
    let json = r#"{"search": {"exhaustive_threshold": 8}, "weights": {"balance_penalty": -1.5}}"#;
    let config: ScoringConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.search.exhaustive_threshold, 8);
    assert_eq!(config.search.exercises_per_day, 5);
    assert_eq!(config.weights.balance_penalty, -1.5);
    assert_eq!(config.weights.balance_threshold, 3);
}

#[test]
fn test_tier_coefficients() {
    assert_eq!(tier_coefficient(1), 0.3);
    assert_eq!(tier_coefficient(3), 0.9);
    assert_eq!(tier_coefficient(5), 1.5);
    // out-of-range tiers fall back to the middle tier
    assert_eq!(tier_coefficient(0), 0.9);
    assert_eq!(tier_coefficient(9), 0.9);

    let prefs = PreferenceCoefficients::from_tiers([("chest", 4), ("back", 2)]);
    assert_eq!(prefs.get("chest"), 1.2);
    assert_eq!(prefs.get("back"), 0.6);
    assert_eq!(prefs.get("core"), 1.0);
}

#[test]
fn test_out_of_range_preferences_are_reported_not_clamped() {
    let mut prefs = PreferenceCoefficients::new();
    prefs.set("chest", 12.0);
    prefs.set("back", 0.05);
    prefs.set("arm", 2.0);

    let flagged: Vec<&str> = prefs.out_of_range().into_iter().map(|(c, _)| c).collect();
    assert_eq!(flagged, vec!["back", "chest"]);
    assert_eq!(prefs.get("chest"), 12.0);
    assert!(PREFERENCE_RANGE.contains(&prefs.get("arm")));
}

#[test]
fn test_preferences_serialize_as_plain_map() {
    let mut prefs = PreferenceCoefficients::new();
    prefs.set("leg", 1.5);
    let json = serde_json::to_string(&prefs).unwrap();
    assert_eq!(json, r#"{"leg":1.5}"#);

    let back: PreferenceCoefficients = serde_json::from_str(&json).unwrap();
    assert_eq!(back, prefs);
}
