use std::process::{Command, Output};

fn path_finder(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_path_finder"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run the path_finder binary")
}

/// A route spanning a 60000 cell corridor, found with the default solver on the main thread.
#[test]
fn default_solver_handles_long_routes() {
    let output = path_finder(&["--rows", "1", "--cols", "60000", "--path-length", "59999"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Route: (0, 1) -> (0, 2)"));
    assert!(stdout.trim_end().ends_with("(0, 59999)"));
}

#[test]
fn blocked_cells_and_aliases() {
    let output = path_finder(&[
        "--rows",
        "3",
        "--cols",
        "3",
        "--pathLength",
        "8",
        "--blockedCells",
        "{1,1}",
        "--recursive",
        "--show-grid",
    ]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("(1, 1)"));
    // The route runs around the blocked centre and covers the whole ring.
    let render: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(render.len(), 3);
    assert_eq!(render[1].chars().nth(1), Some('#'));
    let drawn = render.concat();
    assert_eq!(drawn.matches('o').count(), 6);
    assert_eq!(drawn.matches(&['S', 'E'][..]).count(), 2);
}

#[test]
fn exit_codes() {
    // Only the centre is open, so no route of two cells exists.
    let walls = ["0,0", "0,1", "0,2", "1,0", "1,2", "2,0", "2,1", "2,2"];
    let mut args = vec!["--rows", "3", "--cols", "3", "--path-length", "2", "--blocked-cells"];
    args.extend(walls);
    let output = path_finder(&args);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("No route of length 2"));

    let too_long = path_finder(&["--rows", "2", "--cols", "2", "--path-length", "5"]);
    assert_eq!(too_long.status.code(), Some(2));

    let zero_batch = path_finder(&[
        "--rows",
        "2",
        "--cols",
        "2",
        "--path-length",
        "2",
        "--max-starting-points",
        "0",
    ]);
    assert_eq!(zero_batch.status.code(), Some(2));

    let missing_length = path_finder(&["--rows", "2", "--cols", "2"]);
    assert_eq!(missing_length.status.code(), Some(2));
}
