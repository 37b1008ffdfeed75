// ABOUTME: Tests for the session builder's emitted tmux command sequences
// Uses dry-run runners so no tmux server is required

use pretty_assertions::assert_eq;

use muxdev::config::SessionConfig;
use muxdev::tmux::{BuildOutcome, SessionBuilder, TmuxRunner};

fn config(yaml: &str) -> SessionConfig {
    serde_yaml_ng::from_str(yaml).expect("test config should parse")
}

fn build(yaml: &str) -> (BuildOutcome, TmuxRunner) {
    let config = config(yaml);
    let mut runner = TmuxRunner::dry_run();
    let outcome = SessionBuilder::new(&config, &mut runner)
        .build()
        .expect("dry-run build should not fail");
    (outcome, runner)
}

#[test]
fn fresh_session_emits_the_full_sequence() {
    let yaml = r#"
name: dev
root: "~/proj"
windows:
  - name: edit
    cmd: "vim ."
  - name: run
    cmd: "go run ."
"#;

    let (outcome, mut runner) = build(yaml);
    assert_eq!(outcome, BuildOutcome::Created);
    runner.attach("dev").unwrap();

    let home = dirs::home_dir().expect("home dir available in tests");
    let root = home.join("proj").to_string_lossy().into_owned();

    let expected = vec![
        "$> tmux has-session -t dev".to_string(),
        format!("$> tmux new-session -d -s dev -c {root} -n main"),
        "$> tmux rename-window -t dev:1 edit".to_string(),
        "$> tmux send-keys -t dev:1.1 vim . C-m".to_string(),
        format!("$> tmux new-window -t dev:2 -n run -c {root}"),
        "$> tmux send-keys -t dev:2.1 go run . C-m".to_string(),
        "$> tmux select-window -t dev:1".to_string(),
        "$> tmux attach -t dev".to_string(),
    ];

    assert_eq!(runner.log(), expected.as_slice());
}

#[test]
fn window_creation_count_is_windows_minus_one() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: one
  - name: two
  - name: three
"#;

    let (_, runner) = build(yaml);
    let created = runner
        .log()
        .iter()
        .filter(|line| line.contains("new-window"))
        .count();
    assert_eq!(created, 2);
}

#[test]
fn split_count_is_panes_minus_one() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: main
    panes:
      - cmd: "make watch"
      - path: logs
      - path: tmp
"#;

    let (_, runner) = build(yaml);
    let splits = runner
        .log()
        .iter()
        .filter(|line| line.contains("split-window"))
        .count();
    assert_eq!(splits, 2);
}

#[test]
fn horizontal_pane_splits_sideways_at_its_own_path() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: main
    panes:
      - cmd: "make watch"
      - path: logs
        cmd: "tail -f out.log"
        horizontal: true
"#;

    let (_, runner) = build(yaml);
    let splits: Vec<&String> = runner
        .log()
        .iter()
        .filter(|line| line.contains("split-window"))
        .collect();

    // One split, horizontal, targeting the window (not a pane index),
    // rooted at the second pane's resolved path.
    assert_eq!(
        splits,
        ["$> tmux split-window -h -t dev:1 -c /work/app/logs"]
    );
}

#[test]
fn pane_commands_are_injected_in_order() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: main
    panes:
      - cmd: "make watch"
      - cmd: "tail -f out.log"
"#;

    let (_, runner) = build(yaml);
    let sends: Vec<&String> = runner
        .log()
        .iter()
        .filter(|line| line.contains("send-keys"))
        .collect();

    assert_eq!(
        sends,
        [
            "$> tmux send-keys -t dev:1.1 make watch C-m",
            "$> tmux send-keys -t dev:1.2 tail -f out.log C-m",
        ]
    );
}

#[test]
fn existing_session_short_circuits_provisioning() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: edit
    cmd: "vim ."
"#;

    let config = config(yaml);
    let mut runner = TmuxRunner::dry_run_with_live_sessions(&["dev"]);
    let outcome = SessionBuilder::new(&config, &mut runner).build().unwrap();
    assert_eq!(outcome, BuildOutcome::AlreadyRunning);

    // Only the existence check happened; the declared layout is not
    // reconciled against the live session.
    assert_eq!(runner.log(), ["$> tmux has-session -t dev"]);

    runner.attach("dev").unwrap();
    assert_eq!(runner.log().len(), 2);
}

#[test]
fn empty_commands_never_send_keys() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: edit
  - name: shells
    panes:
      - path: a
      - path: b
"#;

    let (_, runner) = build(yaml);
    assert!(runner.log().iter().all(|line| !line.contains("send-keys")));
}

#[test]
fn pane_window_launches_at_first_pane_path() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: edit
  - name: serve
    path: ignored
    panes:
      - path: server
      - path: logs
"#;

    let (_, runner) = build(yaml);
    assert!(runner
        .log()
        .iter()
        .any(|line| line == "$> tmux new-window -t dev:2 -n serve -c /work/app/server"));
}

#[test]
fn window_without_panes_launches_at_its_own_path() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: edit
  - name: docs
    path: docs
"#;

    let (_, runner) = build(yaml);
    assert!(runner
        .log()
        .iter()
        .any(|line| line == "$> tmux new-window -t dev:2 -n docs -c /work/app/docs"));
}

#[test]
fn first_window_path_is_not_applied() {
    let yaml = r#"
name: dev
root: /work/app
windows:
  - name: edit
    path: sub
"#;

    let (_, runner) = build(yaml);

    // Window 1 reuses the implicit default window: renamed only, cwd left
    // at the session root.
    assert!(runner
        .log()
        .iter()
        .any(|line| line == "$> tmux rename-window -t dev:1 edit"));
    assert!(runner.log().iter().all(|line| !line.contains("sub")));
}

#[test]
fn missing_root_falls_back_to_current_dir() {
    let yaml = r#"
name: dev
windows:
  - name: edit
"#;

    let (_, runner) = build(yaml);
    let cwd = std::env::current_dir().unwrap();
    let expected = format!(
        "$> tmux new-session -d -s dev -c {} -n main",
        cwd.to_string_lossy()
    );
    assert!(runner.log().iter().any(|line| *line == expected));
}

#[test]
fn windowless_config_still_selects_window_one() {
    let yaml = "name: dev\nroot: /work/app\n";

    let (outcome, runner) = build(yaml);
    assert_eq!(outcome, BuildOutcome::Created);
    assert_eq!(
        runner.log().last().map(String::as_str),
        Some("$> tmux select-window -t dev:1")
    );
}
