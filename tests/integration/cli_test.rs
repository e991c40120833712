use std::process::Command;

fn nqueens() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nqueens"))
}

#[test]
fn test_solve_reports_total() {
    let output = nqueens()
        .args(["solve", "8", "-j", "4", "--verify"])
        .output()
        .expect("Failed to execute nqueens");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr),
        stdout
    );
    assert!(stdout.contains("Workers: 4"), "Should show worker count");
    assert!(stdout.contains("Total solutions: 92"), "Should find all 92 solutions");
    assert!(stdout.contains("Verification passed"));
}

#[test]
fn test_solve_prints_boards() {
    let output = nqueens()
        .args(["solve", "4", "-j", "1", "--print"])
        .output()
        .expect("Failed to execute nqueens");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[1, 3, 0, 2]"));
    assert!(stdout.contains("[2, 0, 3, 1]"));
    assert!(stdout.contains(". Q . ."));
}

#[test]
fn test_solve_rejects_small_board() {
    let output = nqueens()
        .args(["solve", "3"])
        .output()
        .expect("Failed to execute nqueens");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid board size 3"), "stderr: {}", stderr);
}

#[test]
fn test_partition_command() {
    let output = nqueens()
        .args(["partition", "10", "-j", "4"])
        .output()
        .expect("Failed to execute nqueens");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("worker 0: columns 0..3 (3 columns)"));
    assert!(stdout.contains("worker 3: columns 8..10 (2 columns)"));
}

#[test]
fn test_partition_rejects_zero_workers() {
    let output = nqueens()
        .args(["partition", "8", "-j", "0"])
        .output()
        .expect("Failed to execute nqueens");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid worker count 0"));
}
