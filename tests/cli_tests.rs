//! Binary-level tests for the `qpress` CLI over temporary JSON stores

mod common;

use assert_cmd::Command;
use common::fixtures::{published_input, queued_input, seeded_state};
use predicates::prelude::*;
use quickpress::form::FormInput;
use quickpress::store::{JournalState, MemoryStore};
use quickpress::types::SubmissionStatus;
use std::path::Path;
use tempfile::TempDir;

fn write_store(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("journal.json");
    let json = MemoryStore::new(seeded_state()).to_json().unwrap();
    std::fs::write(&path, json).unwrap();
    path
}

fn write_article(dir: &TempDir, name: &str, input: &FormInput) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(input).unwrap()).unwrap();
    path
}

fn read_store(path: &Path) -> JournalState {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn qpress() -> Command {
    Command::cargo_bin("qpress").expect("qpress binary builds")
}

#[test]
fn submit_queued_article_updates_the_store() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);
    let article = write_article(&dir, "article.json", &queued_input("CLI Queued"));

    qpress()
        .args(["--store", store.to_str().unwrap(), "submit"])
        .arg(&article)
        .assert()
        .success()
        .stdout(predicate::str::contains("committed"));

    let state = read_store(&store);
    assert_eq!(state.submissions.len(), 1);
    let submission = state.submissions.values().next().unwrap();
    assert_eq!(submission.status, SubmissionStatus::Queued);
    assert_eq!(submission.progress, 0);
    assert!(state.published_articles.is_empty());
}

#[test]
fn submit_published_article_places_it_into_the_issue() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);
    let article = write_article(&dir, "article.json", &published_input("CLI Published"));

    qpress()
        .args(["--store", store.to_str().unwrap(), "submit"])
        .arg(&article)
        .assert()
        .success()
        .stdout(predicate::str::contains("published into issue 42"));

    let state = read_store(&store);
    assert_eq!(state.published_articles.len(), 1);
    assert_eq!(state.published_articles[0].issue_id, 42);
    assert_eq!(state.published_articles[0].sequence, 1);
}

#[test]
fn submit_publish_without_issue_fails_and_cancels_the_draft() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);
    let mut input = published_input("Missing Issue");
    input.issue_id = None;
    let article = write_article(&dir, "article.json", &input);

    qpress()
        .args(["--store", store.to_str().unwrap(), "submit"])
        .arg(&article)
        .assert()
        .failure()
        .stderr(predicate::str::contains("issueId"));

    // The aborted run left no orphaned draft behind.
    let state = read_store(&store);
    assert!(state.submissions.is_empty());
    assert!(state.published_articles.is_empty());
}

#[test]
fn issues_command_lists_the_groups() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);

    qpress()
        .args(["--store", store.to_str().unwrap(), "issues"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Future issues")
                .and(predicate::str::contains("Current issue"))
                .and(predicate::str::contains("Vol. 1 No. 42 (2024)")),
        );
}

#[test]
fn submit_with_missing_store_file_fails() {
    let dir = TempDir::new().unwrap();
    let article = write_article(&dir, "article.json", &queued_input("No Store"));

    qpress()
        .args([
            "--store",
            dir.path().join("absent.json").to_str().unwrap(),
            "submit",
        ])
        .arg(&article)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
