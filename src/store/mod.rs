//! Store interfaces for the intake flow
//!
//! Persistence, file storage, and search indexing are external
//! collaborators. Each is abstracted behind a trait here so the intake
//! orchestration can be driven against any backend; `memory::MemoryStore`
//! is the reference backend used by the CLI and the test suite.

mod memory;

pub use memory::{IndexEvent, JournalState, MemoryStore, SubmissionFile, UserGroupMember};

use crate::error::Result;
use crate::types::{
    CustomSectionOrder, FileId, Galley, Issue, IssueId, JournalId, Publication, PublicationId,
    PublishedArticle, Role, Section, SectionId, StageAssignment, Submission, SubmissionId,
    UserGroup, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Submission persistence
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Load a submission scoped to a journal
    async fn get(&self, id: SubmissionId, journal_id: JournalId) -> Result<Option<Submission>>;

    /// Insert a new submission; the returned record carries the assigned id
    async fn insert(&self, submission: Submission) -> Result<Submission>;

    /// Persist changes to an existing submission
    async fn update(&self, submission: &Submission) -> Result<()>;

    /// Delete a submission and everything hanging off it (publications,
    /// files, assignments, issue placement)
    async fn delete(&self, id: SubmissionId) -> Result<()>;
}

/// Publication persistence
#[async_trait]
pub trait PublicationStore: Send + Sync {
    /// Insert a new publication; the returned record carries the assigned id
    async fn insert(&self, publication: Publication) -> Result<Publication>;

    /// Load a publication
    async fn get(&self, id: PublicationId) -> Result<Option<Publication>>;

    /// Persist changes to an existing publication
    async fn update(&self, publication: &Publication) -> Result<()>;
}

/// Section lookup and custom issue ordering
#[async_trait]
pub trait SectionStore: Send + Sync {
    /// Section titles for a journal in natural listing order
    async fn titles_by_journal(&self, journal_id: JournalId) -> Result<Vec<(SectionId, String)>>;

    /// Load a section scoped to a journal
    async fn get(&self, id: SectionId, journal_id: JournalId) -> Result<Option<Section>>;

    /// Whether a section exists in a journal
    async fn exists(&self, id: SectionId, journal_id: JournalId) -> Result<bool>;

    /// Whether the issue uses custom section ordering
    async fn custom_ordering_exists(&self, issue_id: IssueId) -> Result<bool>;

    /// Current custom order position of a section within an issue
    async fn custom_order(
        &self,
        issue_id: IssueId,
        section_id: SectionId,
    ) -> Result<Option<i64>>;

    /// Insert a custom order entry for a section within an issue
    async fn insert_custom_order(
        &self,
        issue_id: IssueId,
        section_id: SectionId,
        sequence: i64,
    ) -> Result<()>;

    /// All custom order entries for an issue in insertion order;
    /// ordering policy lives in [`crate::sequence`]
    async fn custom_orders(&self, issue_id: IssueId) -> Result<Vec<CustomSectionOrder>>;

    /// Overwrite the custom order position of a section within an issue
    async fn set_custom_order(
        &self,
        issue_id: IssueId,
        section_id: SectionId,
        sequence: i64,
    ) -> Result<()>;
}

/// Issue lookup
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Load an issue scoped to a journal
    async fn get(&self, id: IssueId, journal_id: JournalId) -> Result<Option<Issue>>;

    /// Unpublished (future) issues in display order
    async fn unpublished(&self, journal_id: JournalId) -> Result<Vec<Issue>>;

    /// Published issues in display order; the first may be flagged current
    async fn published(&self, journal_id: JournalId) -> Result<Vec<Issue>>;
}

/// Issue placement persistence for published articles
#[async_trait]
pub trait PublishedArticleStore: Send + Sync {
    /// Insert an issue-placement record
    async fn insert(&self, article: PublishedArticle) -> Result<()>;

    /// Members of one (section, issue) partition in insertion order;
    /// ordering policy lives in [`crate::sequence`]
    async fn by_section_and_issue(
        &self,
        section_id: SectionId,
        issue_id: IssueId,
    ) -> Result<Vec<PublishedArticle>>;

    /// Overwrite one member's sequence value
    async fn set_sequence(&self, submission_id: SubmissionId, sequence: i64) -> Result<()>;
}

/// User group resolution and stage assignment
#[async_trait]
pub trait UserGroupStore: Send + Sync {
    /// Groups a user belongs to within a journal, filtered by role
    async fn groups_for_user(
        &self,
        user_id: UserId,
        journal_id: JournalId,
        role: Role,
    ) -> Result<Vec<UserGroup>>;

    /// Record a stage assignment
    async fn insert_stage_assignment(&self, assignment: StageAssignment) -> Result<()>;
}

/// Galley enumeration and file staging
#[async_trait]
pub trait FileService: Send + Sync {
    /// Galleys attached to a publication
    async fn galleys_by_publication(&self, publication_id: PublicationId) -> Result<Vec<Galley>>;

    /// Latest revision number of a file
    async fn latest_revision(&self, file_id: FileId) -> Result<u32>;

    /// Copy one file revision into a submission's general file area
    async fn copy_to_submission_stage(
        &self,
        file_id: FileId,
        revision: u32,
        submission_id: SubmissionId,
    ) -> Result<()>;
}

/// Search index notifications
///
/// The indexer relies on the metadata-then-files-then-commit order; callers
/// must not reorder these.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// A submission's metadata changed
    async fn metadata_changed(&self, submission: &Submission) -> Result<()>;

    /// A submission's file set changed
    async fn files_changed(&self, submission: &Submission) -> Result<()>;

    /// All changes for the current batch are finished
    async fn commit(&self) -> Result<()>;
}

/// The trait-object bundle injected into the intake form
///
/// Groups every collaborator behind one handle so callers assemble the
/// backend once and pass it around cheaply (all fields are `Arc`s).
#[derive(Clone)]
pub struct Stores {
    /// Submission persistence
    pub submissions: Arc<dyn SubmissionStore>,
    /// Publication persistence
    pub publications: Arc<dyn PublicationStore>,
    /// Section lookup and custom ordering
    pub sections: Arc<dyn SectionStore>,
    /// Issue lookup
    pub issues: Arc<dyn IssueStore>,
    /// Issue placement persistence
    pub published_articles: Arc<dyn PublishedArticleStore>,
    /// Group resolution and stage assignment
    pub user_groups: Arc<dyn UserGroupStore>,
    /// Galley enumeration and file staging
    pub files: Arc<dyn FileService>,
    /// Search index notifications
    pub search: Arc<dyn SearchIndex>,
}

impl Stores {
    /// Bundle a single backend that implements every store trait
    pub fn shared<S>(backend: Arc<S>) -> Self
    where
        S: SubmissionStore
            + PublicationStore
            + SectionStore
            + IssueStore
            + PublishedArticleStore
            + UserGroupStore
            + FileService
            + SearchIndex
            + 'static,
    {
        Self {
            submissions: backend.clone(),
            publications: backend.clone(),
            sections: backend.clone(),
            issues: backend.clone(),
            published_articles: backend.clone(),
            user_groups: backend.clone(),
            files: backend.clone(),
            search: backend,
        }
    }
}
