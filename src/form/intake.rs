//! Form construction, draft creation, input binding, cancellation

use crate::error::{Error, Result};
use crate::form::MetadataInput;
use crate::issues::{self, IssueOptions};
use crate::store::Stores;
use crate::types::{
    ArticleStatus, IssueId, Journal, Publication, Role, SectionId, StageAssignment, Submission,
    SubmissionId, SubmissionStatus, UserId, WorkflowStage,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// The journal and acting user a form session is scoped to
#[derive(Debug, Clone)]
pub struct IntakeContext {
    /// Journal the submission is created in
    pub journal: Journal,
    /// Editor driving the form
    pub user_id: UserId,
}

/// The recognized posted fields of one form submission
///
/// Built by the caller's input-binding layer; unrecognized fields are
/// simply never bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    /// Draft submission the post refers to
    #[serde(default)]
    pub submission_id: Option<SubmissionId>,
    /// Submission locale
    #[serde(default)]
    pub locale: Option<String>,
    /// Selected section
    #[serde(default)]
    pub section_id: Option<SectionId>,
    /// Selected issue, required when publishing
    #[serde(default)]
    pub issue_id: Option<IssueId>,
    /// Queued or published
    #[serde(default)]
    pub article_status: ArticleStatus,
    /// Page range within the issue
    #[serde(default)]
    pub pages: Option<String>,
    /// Publication date shown to readers
    #[serde(default)]
    pub date_published: Option<NaiveDate>,
    /// License URL
    #[serde(default)]
    pub license_url: Option<String>,
    /// Copyright holder
    #[serde(default)]
    pub copyright_holder: Option<String>,
    /// Copyright year
    #[serde(default)]
    pub copyright_year: Option<i32>,
    /// Fields owned by the metadata sub-form
    #[serde(default)]
    pub metadata: MetadataInput,
}

/// One-page quick submission form
///
/// Scoped to a single request/session; holds no shared mutable state, so
/// concurrent sessions are independent. See [`Self::execute`] for the
/// commit-ordering caveats.
pub struct QuickSubmitForm {
    pub(super) stores: Stores,
    pub(super) context: IntakeContext,
    pub(super) locale: String,
    pub(super) submission: Option<Submission>,
    pub(super) input: FormInput,
}

impl QuickSubmitForm {
    /// Open a form session
    ///
    /// `locale` overrides the journal's primary locale as the working form
    /// locale. When `existing` names a draft, it is loaded, its locale is
    /// forced to the working locale, and that change is persisted
    /// immediately - independent of whether the session ever commits.
    pub async fn new(
        stores: Stores,
        context: IntakeContext,
        locale: Option<String>,
        existing: Option<SubmissionId>,
    ) -> Result<Self> {
        let working_locale = locale.unwrap_or_else(|| context.journal.primary_locale.clone());
        let mut form = Self {
            stores,
            context,
            locale: working_locale,
            submission: None,
            input: FormInput::default(),
        };

        if let Some(id) = existing {
            let mut submission = form
                .stores
                .submissions
                .get(id, form.context.journal.id)
                .await?
                .ok_or(Error::SubmissionNotFound(id))?;
            submission.locale = form.locale.clone();
            form.stores.submissions.update(&submission).await?;
            debug!(submission_id = id, locale = %form.locale, "reopened draft with forced locale");
            form.submission = Some(submission);
        }

        Ok(form)
    }

    /// The draft this session operates on, once one exists
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// The working form locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The currently bound input
    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Section choices for the form, in the journal's listing order
    pub async fn section_options(&self) -> Result<Vec<(SectionId, String)>> {
        self.stores
            .sections
            .titles_by_journal(self.context.journal.id)
            .await
    }

    /// Issue choices for the form, grouped future/current/back
    pub async fn issue_options(&self, today: NaiveDate) -> Result<IssueOptions> {
        issues::issue_options(self.stores.issues.as_ref(), &self.context.journal, today).await
    }

    /// Create the draft submission on first display
    ///
    /// Runs once per session: a no-op when a draft already exists. Creates
    /// the submission in the journal's first section, its current
    /// publication, and a stage assignment under the acting user's first
    /// manager group (or no group when the user holds none).
    pub async fn init_data(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.submission.is_some() {
            return Ok(());
        }
        let journal_id = self.context.journal.id;

        let sections = self.stores.sections.titles_by_journal(journal_id).await?;
        let (default_section, _) = sections
            .first()
            .ok_or(Error::NoSections(journal_id))?;

        let submission = Submission {
            id: 0,
            journal_id,
            locale: self.locale.clone(),
            status: SubmissionStatus::Queued,
            stage: WorkflowStage::Submission,
            progress: 1,
            section_id: *default_section,
            date_submitted: None,
            date_status_modified: Some(now),
            copyright_year: None,
            copyright_holder: None,
            license_url: None,
            pages: None,
            current_publication_id: None,
        };
        let mut submission = self.stores.submissions.insert(submission).await?;

        let publication = Publication {
            id: 0,
            submission_id: submission.id,
            locale: self.locale.clone(),
            language: self.locale.chars().take(2).collect(),
            section_id: *default_section,
            status: SubmissionStatus::Queued,
            title: BTreeMap::new(),
            abstract_text: BTreeMap::new(),
            keywords: Vec::new(),
            contributors: Vec::new(),
        };
        let publication = self.stores.publications.insert(publication).await?;

        submission.current_publication_id = Some(publication.id);
        self.stores.submissions.update(&submission).await?;

        let manager_groups = self
            .stores
            .user_groups
            .groups_for_user(self.context.user_id, journal_id, Role::Manager)
            .await?;
        let user_group_id = manager_groups.first().map(|g| g.id);

        self.stores
            .user_groups
            .insert_stage_assignment(StageAssignment {
                submission_id: submission.id,
                user_group_id,
                user_id: self.context.user_id,
            })
            .await?;

        info!(
            submission_id = submission.id,
            publication_id = publication.id,
            "created draft submission"
        );
        self.submission = Some(submission);
        Ok(())
    }

    /// Bind the posted fields
    pub fn read_input(&mut self, input: FormInput) {
        self.input = input;
    }

    /// Delete the draft when the editor abandons the flow
    ///
    /// Cascades to the dependent publication, files, and assignments in
    /// the store. A no-op when no draft was ever created.
    pub async fn cancel(&mut self) -> Result<()> {
        let id = self
            .input
            .submission_id
            .or_else(|| self.submission.as_ref().map(|s| s.id));
        if let Some(id) = id {
            info!(submission_id = id, "cancelling draft submission");
            self.stores.submissions.delete(id).await?;
            self.submission = None;
        }
        Ok(())
    }
}
