//! Commit phase of the intake form
//!
//! Performs the side effects of a validated form post:
//! 1. Persist metadata onto the current publication
//! 2. Move the submission into the selected section
//! 3. When publishing: copy licensing fields and create the issue placement
//! 4. Copy galley files into the submission's file area
//! 5. Finalize locale, stage, timestamps, progress
//! 6. Persist the submission
//! 7. When publishing: compact the (section, issue) ordering and the
//!    issue's custom section order
//! 8. Notify the search index

use crate::error::{Error, Result};
use crate::form::QuickSubmitForm;
use crate::sequence::SequenceAssigner;
use crate::types::{
    AccessStatus, ArticleStatus, PublishedArticle, Submission, SubmissionStatus, WorkflowStage,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

impl QuickSubmitForm {
    /// Commit the bound input
    ///
    /// Call only after [`Self::validate`] succeeded. The steps run in a
    /// fixed order with no surrounding transaction: a failure mid-way
    /// leaves the earlier steps committed (a published submission whose
    /// files were not copied, or whose partition was not compacted).
    /// Backends over a real database should wrap this call in their own
    /// transaction. The search index contract requires metadata, then
    /// files, then the commit signal.
    pub async fn execute(&mut self, now: DateTime<Utc>) -> Result<Submission> {
        let mut submission = self
            .submission
            .clone()
            .ok_or_else(|| Error::Internal("execute() called before init_data()".into()))?;
        let publication_id = submission.current_publication_id.ok_or_else(|| {
            Error::Internal(format!("submission {} has no current publication", submission.id))
        })?;
        let mut publication = self
            .stores
            .publications
            .get(publication_id)
            .await?
            .ok_or_else(|| Error::Store(format!("publication {publication_id} missing")))?;

        // 1. Metadata sub-form
        self.input.metadata.apply(&mut publication);
        self.stores.publications.update(&publication).await?;

        // 2. Section
        if let Some(section_id) = self.input.section_id {
            submission.section_id = section_id;
        }

        // 3. Publish into an issue
        let assigner = SequenceAssigner::new(
            self.stores.published_articles.as_ref(),
            self.stores.sections.as_ref(),
        );
        let mut published_issue = None;
        if self.input.article_status == ArticleStatus::Published {
            let issue_id = self.input.issue_id.ok_or_else(|| {
                Error::Internal("publishing without an issue; validate() must run first".into())
            })?;
            submission.status = SubmissionStatus::Published;
            submission.date_status_modified = Some(now);
            submission.copyright_year = self.input.copyright_year;
            submission.copyright_holder = self.input.copyright_holder.clone();
            submission.license_url = self.input.license_url.clone();
            submission.pages = self.input.pages.clone();

            assigner
                .insert_published_at_end(PublishedArticle {
                    submission_id: submission.id,
                    date_published: self.input.date_published,
                    sequence: 0,
                    access_status: AccessStatus::IssueDefault,
                    issue_id,
                })
                .await?;
            published_issue = Some(issue_id);
        }

        // 4. Copy galley files into the submission's general file area,
        // keeping the latest revision of each. Galleys without an
        // underlying file are skipped.
        let galleys = self
            .stores
            .files
            .galleys_by_publication(publication.id)
            .await?;
        for galley in galleys {
            let Some(file_id) = galley.file_id else {
                debug!(label = %galley.label, "skipping galley without a file");
                continue;
            };
            let revision = self.stores.files.latest_revision(file_id).await?;
            self.stores
                .files
                .copy_to_submission_stage(file_id, revision, submission.id)
                .await?;
        }

        // 5. Finalize
        if let Some(locale) = &self.input.locale {
            submission.locale = locale.clone();
        }
        submission.stage = WorkflowStage::Production;
        submission.date_submitted = Some(now);
        submission.progress = 0;

        // 6. Persist
        self.stores.submissions.update(&submission).await?;

        // 7. Compact placement order
        if let Some(issue_id) = published_issue {
            assigner
                .resequence_section_issue(submission.section_id, issue_id)
                .await?;
            assigner
                .ensure_custom_order(issue_id, submission.section_id)
                .await?;
        }

        // 8. Index: metadata, files, then the commit signal
        self.stores.search.metadata_changed(&submission).await?;
        self.stores.search.files_changed(&submission).await?;
        self.stores.search.commit().await?;

        info!(
            submission_id = submission.id,
            published = published_issue.is_some(),
            "quick submission committed"
        );
        self.submission = Some(submission.clone());
        Ok(submission)
    }
}
