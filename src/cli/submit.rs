//! Submit command - run the quick submission flow against a journal store

use crate::cli::style::{check, cross, Stylize};
use anstream::{eprintln, println};
use quickpress::error::{Error, Result};
use quickpress::form::{FormInput, IntakeContext, QuickSubmitForm};
use quickpress::store::{MemoryStore, Stores};
use quickpress::types::{SubmissionStatus, UserId};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

/// Run the submit command
///
/// Loads the journal state, binds the article input file, drives the form
/// lifecycle, and writes the updated state back. On validation failure the
/// draft is cancelled so an abandoned run leaves nothing behind.
pub async fn run_submit(store_path: &Path, article_path: &Path, user: UserId) -> Result<()> {
    let backend = Arc::new(MemoryStore::load(store_path)?);
    let stores = Stores::shared(backend.clone());

    let article_json = std::fs::read_to_string(article_path)
        .map_err(|e| Error::Store(format!("cannot read {}: {e}", article_path.display())))?;
    let input: FormInput = serde_json::from_str(&article_json)
        .map_err(|e| Error::Store(format!("bad article input {}: {e}", article_path.display())))?;

    let journal = backend.snapshot()?.journal;
    let context = IntakeContext {
        journal,
        user_id: user,
    };

    let mut form =
        QuickSubmitForm::new(stores, context, input.locale.clone(), input.submission_id).await?;
    form.init_data(Utc::now()).await?;
    form.read_input(input);

    if let Err(err) = form.validate().await {
        if let Error::Validation(ref errors) = err {
            for field_error in &errors.errors {
                eprintln!(
                    "{} {} {}",
                    cross(),
                    field_error.field.warn(),
                    field_error.message
                );
            }
        }
        // Leave no orphaned draft behind an aborted run.
        form.cancel().await?;
        backend.save(store_path)?;
        return Err(err);
    }

    let submission = form.execute(Utc::now()).await?;
    backend.save(store_path)?;

    println!(
        "{} Submission {} committed",
        check(),
        format!("#{}", submission.id).accent()
    );
    if submission.status == SubmissionStatus::Published {
        if let Some(issue_id) = form.input().issue_id {
            println!("  published into issue {}", issue_id.accent());
        }
    }
    println!(
        "  {} section {}, locale {}",
        "stage: production,".muted(),
        submission.section_id.accent(),
        submission.locale.accent()
    );

    Ok(())
}
