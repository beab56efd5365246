use std::io::Write;

use clap::Parser;
use noisemixer::cli::{load_trie, run, Cli};
use noisetree::{Config, NodeEncoding};

fn values_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("noisemixer-values")
        .tempfile()
        .unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("noisemixer").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_load_trie_skips_blank_and_duplicate_lines() {
    let file = values_file(&["leaf1", "", "  leaf2  ", "leaf1", "leaf3"]);
    let trie = load_trie(file.path(), Config::default()).unwrap();
    assert_eq!(trie.len(), 3);
    assert!(trie.contains("leaf2"));
}

#[test]
fn test_root_prove_verify() {
    let file = values_file(&["leaf1", "leaf2", "leaf3", "leaf4", "leaf5"]);
    let path = file.path().to_str().unwrap();

    let root = run(&parse(&["root", "--values", path])).unwrap();
    assert!(root.success);
    assert_eq!(root.text.len(), 64);

    let proved = run(&parse(&["prove", "--values", path, "--value", "leaf3"])).unwrap();
    let out: serde_json::Value = serde_json::from_str(&proved.text).unwrap();
    assert_eq!(out["root"], root.text);
    let proof_json = out["proof"].to_string();

    let verified = run(&parse(&[
        "verify", "--value", "leaf3", "--proof", proof_json.as_str(), "--root", root.text.as_str(),
    ]))
    .unwrap();
    assert_eq!(verified.text, "true");
    assert!(verified.success);

    let rejected = run(&parse(&[
        "verify", "--value", "leaf4", "--proof", proof_json.as_str(), "--root", root.text.as_str(),
    ]))
    .unwrap();
    assert_eq!(rejected.text, "false");
    assert!(!rejected.success);
}

#[test]
fn test_global_flags() {
    let file = values_file(&["a", "b", "c"]);
    let path = file.path().to_str().unwrap();
    let cli = parse(&["--depth", "64", "--encoding", "raw", "root", "--values", path]);
    assert_eq!(cli.trie_config(), Config::new(64, NodeEncoding::Raw));

    let raw = run(&cli).unwrap();
    let hex = run(&parse(&["root", "--values", path])).unwrap();
    assert_ne!(raw.text, hex.text);

    assert!(Cli::try_parse_from(["noisemixer", "--encoding", "base64", "root", "--values", path]).is_err());
}

#[test]
fn test_errors() {
    let file = values_file(&["leaf1"]);
    let path = file.path().to_str().unwrap();

    assert!(run(&parse(&["prove", "--values", path, "--value", "missing"])).is_err());
    assert!(run(&parse(&["--depth", "0", "root", "--values", path])).is_err());
    assert!(run(&parse(&["root", "--values", "/nonexistent/values.txt"])).is_err());
    assert!(run(&parse(&[
        "verify", "--value", "leaf1", "--proof", "[[\"00\",\"left\"]]", "--root", "00"
    ]))
    .is_err());
}
