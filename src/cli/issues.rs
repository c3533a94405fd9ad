//! Issues command - list the journal's issues grouped for the form

use crate::cli::style::Stylize;
use anstream::println;
use chrono::Utc;
use quickpress::error::Result;
use quickpress::issues::{issue_options, IssueOption};
use quickpress::store::MemoryStore;
use std::path::Path;

/// Run the issues command
///
/// Prints the same three groups the submission form offers: future issues,
/// the current issue, and back issues, each with its short date label.
pub async fn run_issues(store_path: &Path) -> Result<()> {
    let store = MemoryStore::load(store_path)?;
    let journal = store.snapshot()?.journal;
    let options = issue_options(&store, &journal, Utc::now().date_naive()).await?;

    if options.is_empty() {
        println!("No issues in journal {}", journal.id.accent());
        return Ok(());
    }

    print_group("Future issues", &options.future);
    if let Some(current) = &options.current {
        print_group("Current issue", std::slice::from_ref(current));
    }
    print_group("Back issues", &options.back);

    Ok(())
}

fn print_group(title: &str, group: &[IssueOption]) {
    if group.is_empty() {
        return;
    }
    println!("{}", title.emphasis());
    for option in group {
        println!(
            "  {} {} {}",
            format!("#{}", option.id).accent(),
            option.label,
            option.date_label.muted()
        );
    }
}
