use balloon_blaster::config::*;
use balloon_blaster::error::GameError;

use std::path::PathBuf;

#[test]
fn defaults_match_the_classic_rules() {
    let c = GameConfig::default();
    assert_eq!(c.field.width, 800.0);
    assert_eq!(c.field.height, 600.0);
    assert_eq!(c.gameplay.player_speed, 5.0);
    assert_eq!(c.gameplay.bullet_speed, 10.0);
    assert_eq!(c.gameplay.starting_lives, 3);
    assert_eq!(c.gameplay.spawn_interval_ms, 2000.0);
    assert_eq!(c.gameplay.boss_kill_threshold, 50);
    assert_eq!(c.gameplay.boss_health, 50);
    assert_eq!(c.gameplay.click_limit, 100);
    assert_eq!(c.runtime.frame_ms, 16);
    assert_eq!(c.runtime.log_file, PathBuf::from("balloon_blaster.log"));
}

#[test]
fn empty_file_gives_defaults() {
    let c = GameConfig::from_toml_str("", "inline").expect("empty config parses");
    assert_eq!(c, GameConfig::default());
}

#[test]
fn partial_file_overrides_only_named_keys() {
    let toml = r#"
        [gameplay]
        starting_lives = 5
        boss_kill_threshold = 20

        [runtime]
        frame_ms = 33
    "#;
    let c = GameConfig::from_toml_str(toml, "inline").expect("valid config");
    assert_eq!(c.gameplay.starting_lives, 5);
    assert_eq!(c.gameplay.boss_kill_threshold, 20);
    assert_eq!(c.runtime.frame_ms, 33);
    // untouched
    assert_eq!(c.gameplay.bullet_speed, 10.0);
    assert_eq!(c.field, FieldConfig::default());
}

#[test]
fn malformed_file_reports_origin() {
    let err = GameConfig::from_toml_str("[gameplay]\nstarting_lives = \"many\"", "bad.toml")
        .unwrap_err();
    match err {
        GameError::ConfigParse { path, .. } => assert_eq!(path, "bad.toml"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = GameConfig::load_from_file(&PathBuf::from("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
}

#[test]
fn explicit_path_wins() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("game.toml");
    std::fs::write(&path, "[field]\nwidth = 1024.0\n").expect("write config");

    let c = GameConfig::resolve(Some(path)).expect("config loads");
    assert_eq!(c.field.width, 1024.0);
    assert_eq!(c.field.height, 600.0);
}
