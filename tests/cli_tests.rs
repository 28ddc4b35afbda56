use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn keyvolve() -> Command {
    Command::new(env!("CARGO_BIN_EXE_keyvolve"))
}

#[test]
fn breakdown_prints_a_report() {
    let output = keyvolve()
        .args([
            "breakdown",
            "--layout",
            "qwerty",
            "--text",
            "the quick brown fox",
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total"), "missing total row:\n{}", stdout);
    assert!(stdout.contains("Same finger"));
}

#[test]
fn score_reads_corpus_files() {
    let dir = tempdir().unwrap();
    let corpus_path = dir.path().join("sample.txt");
    fs::write(&corpus_path, "the quick brown fox jumps over the lazy dog").unwrap();

    let output = keyvolve()
        .args([
            "score",
            "--layout",
            "qwerty",
            "--corpus",
            corpus_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn optimize_writes_a_json_report() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("report.json");

    let output = keyvolve()
        .args([
            "optimize",
            "--layout",
            "qwerty",
            "--text",
            "the quick brown fox",
            "--population-size",
            "8",
            "--generations",
            "5",
            "--seed",
            "1",
            "--out",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(report["generations"], 5);
    assert_eq!(report["layout"].as_array().unwrap().len(), 30);
}

#[test]
fn missing_corpus_is_a_fatal_error() {
    let output = keyvolve()
        .args(["score", "--layout", "qwerty"])
        .output()
        .expect("failed to run binary");
    assert!(!output.status.success());
}
