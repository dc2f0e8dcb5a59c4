use std::fs;
use std::process::Command;

#[test]
fn generates_site_with_default_content() {
    let output_dir = tempfile::tempdir().unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_phitopolis"))
        .args(["generate", "--output", output_dir.path().to_str().unwrap()])
        .status()
        .expect("Failed to execute phitopolis");

    assert!(status.success(), "phitopolis exited with error");

    let index_path = output_dir.path().join("index.html");
    assert!(index_path.exists(), "index.html was not generated");
    assert!(output_dir.path().join("site.css").exists());
    assert!(output_dir.path().join("boot.js").exists());

    let html = fs::read_to_string(&index_path).expect("Failed to read index.html");

    // Verify key content
    assert!(html.contains("Recruiting Elite Talent"), "Missing hero badge");
    assert!(html.contains("Quantitative Developer"), "Missing job posting");
    assert!(html.contains("PostgreSQL"), "Missing tech stack");
    assert!(html.contains("Phitopolis Academy"), "Missing graduate program");
    assert!(html.contains("ASK PHIT.AI"), "Missing chat toggle");
}

#[test]
fn content_file_overrides_copy() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content.yaml");
    fs::write(
        &content,
        r#"
hero:
  badge: Now Hiring Rustaceans
careers:
  jobs:
    - id: rust-1
      title: Rust Systems Engineer
      department: Platform
      location: Remote
      type: Full-time
      description: Low-latency services in Rust.
"#,
    )
    .unwrap();
    let output = dir.path().join("site");

    let status = Command::new(env!("CARGO_BIN_EXE_phitopolis"))
        .args([
            "generate",
            "--output",
            output.to_str().unwrap(),
            "--content",
            content.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to execute phitopolis");
    assert!(status.success());

    let html = fs::read_to_string(output.join("index.html")).unwrap();
    assert!(html.contains("Now Hiring Rustaceans"));
    assert!(html.contains("Rust Systems Engineer"));
    assert!(!html.contains("Senior Python Engineer"));
    // Sections not mentioned in the file keep the built-in copy
    assert!(html.contains("Wall Street Precision"));
}

#[test]
fn invalid_content_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content.yaml");
    fs::write(&content, "careers: [not, a, map]\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_phitopolis"))
        .args([
            "generate",
            "--output",
            dir.path().join("site").to_str().unwrap(),
            "--content",
            content.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute phitopolis");

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("parse error"), "stderr was: {stderr}");
}
