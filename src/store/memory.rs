//! In-memory reference backend
//!
//! Implements every store trait over a single mutex-guarded state struct.
//! The state is fully serde-serializable, so the CLI can load a journal
//! from a JSON file, run the intake flow, and write the result back. The
//! mutex also provides the single-writer discipline the resequencing
//! operations require.

use crate::error::{Error, Result};
use crate::store::{
    FileService, IssueStore, PublicationStore, PublishedArticleStore, SearchIndex, SectionStore,
    SubmissionStore, UserGroupStore,
};
use crate::types::{
    CustomSectionOrder, FileId, Galley, Issue, IssueId, Journal, JournalId, Publication,
    PublicationId, PublishedArticle, Role, Section, SectionId, StageAssignment, Submission,
    SubmissionId, UserGroup, UserGroupId, UserId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Membership of a user in a user group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupMember {
    /// Group
    pub user_group_id: UserGroupId,
    /// Member
    pub user_id: UserId,
}

/// A file revision copied into a submission's general file area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFile {
    /// Owning submission
    pub submission_id: SubmissionId,
    /// File the copy was made from
    pub source_file_id: FileId,
    /// Revision that was copied
    pub revision: u32,
}

/// One search index notification, recorded in arrival order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "submission_id")]
pub enum IndexEvent {
    /// `metadata_changed` was received
    MetadataChanged(SubmissionId),
    /// `files_changed` was received
    FilesChanged(SubmissionId),
    /// `commit` was received
    Finished,
}

/// The complete persisted state of one journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalState {
    /// The journal itself
    pub journal: Journal,
    /// Sections in natural listing order
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Issues in display order
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// User groups
    #[serde(default)]
    pub user_groups: Vec<UserGroup>,
    /// Group memberships
    #[serde(default)]
    pub user_group_members: Vec<UserGroupMember>,
    /// Submissions by id
    #[serde(default)]
    pub submissions: BTreeMap<SubmissionId, Submission>,
    /// Publications by id
    #[serde(default)]
    pub publications: BTreeMap<PublicationId, Publication>,
    /// Issue placements in insertion order
    #[serde(default)]
    pub published_articles: Vec<PublishedArticle>,
    /// Custom section orders in insertion order
    #[serde(default)]
    pub custom_section_orders: Vec<CustomSectionOrder>,
    /// Stage assignments
    #[serde(default)]
    pub stage_assignments: Vec<StageAssignment>,
    /// Galleys attached to publications
    #[serde(default)]
    pub galleys: Vec<Galley>,
    /// Latest known revision per file
    #[serde(default)]
    pub file_revisions: BTreeMap<FileId, u32>,
    /// Files copied into submission file areas
    #[serde(default)]
    pub submission_files: Vec<SubmissionFile>,
    /// Search index notifications in arrival order
    #[serde(default)]
    pub index_log: Vec<IndexEvent>,
}

impl JournalState {
    /// Minimal state for a journal with no content yet
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            sections: Vec::new(),
            issues: Vec::new(),
            user_groups: Vec::new(),
            user_group_members: Vec::new(),
            submissions: BTreeMap::new(),
            publications: BTreeMap::new(),
            published_articles: Vec::new(),
            custom_section_orders: Vec::new(),
            stage_assignments: Vec::new(),
            galleys: Vec::new(),
            file_revisions: BTreeMap::new(),
            submission_files: Vec::new(),
            index_log: Vec::new(),
        }
    }
}

/// In-memory backend over one journal's state
pub struct MemoryStore {
    state: Mutex<JournalState>,
}

impl MemoryStore {
    /// Wrap an existing state
    pub fn new(state: JournalState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Parse a state from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let state: JournalState =
            serde_json::from_str(json).map_err(|e| Error::Store(format!("bad journal state: {e}")))?;
        Ok(Self::new(state))
    }

    /// Read a state from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Store(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Write the current state to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| Error::Store(format!("cannot write {}: {e}", path.display())))
    }

    /// Serialize the current state to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        let state = self.lock()?;
        serde_json::to_string_pretty(&*state)
            .map_err(|e| Error::Store(format!("cannot serialize journal state: {e}")))
    }

    /// Clone the current state for inspection
    pub fn snapshot(&self) -> Result<JournalState> {
        Ok(self.lock()?.clone())
    }

    /// The search index notifications received so far, in order
    pub fn index_log(&self) -> Result<Vec<IndexEvent>> {
        Ok(self.lock()?.index_log.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, JournalState>> {
        self.state
            .lock()
            .map_err(|_| Error::Store("journal state lock poisoned".into()))
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn get(&self, id: SubmissionId, journal_id: JournalId) -> Result<Option<Submission>> {
        let state = self.lock()?;
        Ok(state
            .submissions
            .get(&id)
            .filter(|s| s.journal_id == journal_id)
            .cloned())
    }

    async fn insert(&self, mut submission: Submission) -> Result<Submission> {
        let mut state = self.lock()?;
        let id = state.submissions.keys().max().map_or(1, |max| max + 1);
        submission.id = id;
        debug!(submission_id = id, "inserting submission");
        state.submissions.insert(id, submission.clone());
        Ok(submission)
    }

    async fn update(&self, submission: &Submission) -> Result<()> {
        let mut state = self.lock()?;
        if !state.submissions.contains_key(&submission.id) {
            return Err(Error::SubmissionNotFound(submission.id));
        }
        state.submissions.insert(submission.id, submission.clone());
        Ok(())
    }

    async fn delete(&self, id: SubmissionId) -> Result<()> {
        let mut state = self.lock()?;
        debug!(submission_id = id, "deleting submission and dependents");
        state.submissions.remove(&id);

        let publication_ids: Vec<PublicationId> = state
            .publications
            .iter()
            .filter(|(_, p)| p.submission_id == id)
            .map(|(pid, _)| *pid)
            .collect();
        for pid in &publication_ids {
            state.publications.remove(pid);
        }
        state.galleys.retain(|g| !publication_ids.contains(&g.publication_id));
        state.published_articles.retain(|a| a.submission_id != id);
        state.stage_assignments.retain(|a| a.submission_id != id);
        state.submission_files.retain(|f| f.submission_id != id);
        Ok(())
    }
}

#[async_trait]
impl PublicationStore for MemoryStore {
    async fn insert(&self, mut publication: Publication) -> Result<Publication> {
        let mut state = self.lock()?;
        let id = state.publications.keys().max().map_or(1, |max| max + 1);
        publication.id = id;
        state.publications.insert(id, publication.clone());
        Ok(publication)
    }

    async fn get(&self, id: PublicationId) -> Result<Option<Publication>> {
        Ok(self.lock()?.publications.get(&id).cloned())
    }

    async fn update(&self, publication: &Publication) -> Result<()> {
        let mut state = self.lock()?;
        if !state.publications.contains_key(&publication.id) {
            return Err(Error::Store(format!(
                "publication {} does not exist",
                publication.id
            )));
        }
        state.publications.insert(publication.id, publication.clone());
        Ok(())
    }
}

#[async_trait]
impl SectionStore for MemoryStore {
    async fn titles_by_journal(&self, journal_id: JournalId) -> Result<Vec<(SectionId, String)>> {
        let state = self.lock()?;
        Ok(state
            .sections
            .iter()
            .filter(|s| s.journal_id == journal_id)
            .map(|s| (s.id, s.title.clone()))
            .collect())
    }

    async fn get(&self, id: SectionId, journal_id: JournalId) -> Result<Option<Section>> {
        let state = self.lock()?;
        Ok(state
            .sections
            .iter()
            .find(|s| s.id == id && s.journal_id == journal_id)
            .cloned())
    }

    async fn exists(&self, id: SectionId, journal_id: JournalId) -> Result<bool> {
        let state = self.lock()?;
        Ok(state
            .sections
            .iter()
            .any(|s| s.id == id && s.journal_id == journal_id))
    }

    async fn custom_ordering_exists(&self, issue_id: IssueId) -> Result<bool> {
        let state = self.lock()?;
        Ok(state
            .custom_section_orders
            .iter()
            .any(|o| o.issue_id == issue_id))
    }

    async fn custom_order(
        &self,
        issue_id: IssueId,
        section_id: SectionId,
    ) -> Result<Option<i64>> {
        let state = self.lock()?;
        Ok(state
            .custom_section_orders
            .iter()
            .find(|o| o.issue_id == issue_id && o.section_id == section_id)
            .map(|o| o.sequence))
    }

    async fn insert_custom_order(
        &self,
        issue_id: IssueId,
        section_id: SectionId,
        sequence: i64,
    ) -> Result<()> {
        let mut state = self.lock()?;
        state.custom_section_orders.push(CustomSectionOrder {
            issue_id,
            section_id,
            sequence,
        });
        Ok(())
    }

    async fn custom_orders(&self, issue_id: IssueId) -> Result<Vec<CustomSectionOrder>> {
        let state = self.lock()?;
        Ok(state
            .custom_section_orders
            .iter()
            .filter(|o| o.issue_id == issue_id)
            .cloned()
            .collect())
    }

    async fn set_custom_order(
        &self,
        issue_id: IssueId,
        section_id: SectionId,
        sequence: i64,
    ) -> Result<()> {
        let mut state = self.lock()?;
        let entry = state
            .custom_section_orders
            .iter_mut()
            .find(|o| o.issue_id == issue_id && o.section_id == section_id)
            .ok_or_else(|| {
                Error::Store(format!(
                    "no custom order for section {section_id} in issue {issue_id}"
                ))
            })?;
        entry.sequence = sequence;
        Ok(())
    }
}

#[async_trait]
impl IssueStore for MemoryStore {
    async fn get(&self, id: IssueId, journal_id: JournalId) -> Result<Option<Issue>> {
        let state = self.lock()?;
        Ok(state
            .issues
            .iter()
            .find(|i| i.id == id && i.journal_id == journal_id)
            .cloned())
    }

    async fn unpublished(&self, journal_id: JournalId) -> Result<Vec<Issue>> {
        let state = self.lock()?;
        Ok(state
            .issues
            .iter()
            .filter(|i| i.journal_id == journal_id && !i.published)
            .cloned()
            .collect())
    }

    async fn published(&self, journal_id: JournalId) -> Result<Vec<Issue>> {
        let state = self.lock()?;
        Ok(state
            .issues
            .iter()
            .filter(|i| i.journal_id == journal_id && i.published)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PublishedArticleStore for MemoryStore {
    async fn insert(&self, article: PublishedArticle) -> Result<()> {
        let mut state = self.lock()?;
        if state
            .published_articles
            .iter()
            .any(|a| a.submission_id == article.submission_id)
        {
            return Err(Error::Store(format!(
                "submission {} is already placed in an issue",
                article.submission_id
            )));
        }
        state.published_articles.push(article);
        Ok(())
    }

    async fn by_section_and_issue(
        &self,
        section_id: SectionId,
        issue_id: IssueId,
    ) -> Result<Vec<PublishedArticle>> {
        let state = self.lock()?;
        // Partition membership comes from the owning submission's section.
        Ok(state
            .published_articles
            .iter()
            .filter(|a| {
                a.issue_id == issue_id
                    && state
                        .submissions
                        .get(&a.submission_id)
                        .is_some_and(|s| s.section_id == section_id)
            })
            .cloned()
            .collect())
    }

    async fn set_sequence(&self, submission_id: SubmissionId, sequence: i64) -> Result<()> {
        let mut state = self.lock()?;
        let article = state
            .published_articles
            .iter_mut()
            .find(|a| a.submission_id == submission_id)
            .ok_or_else(|| {
                Error::Store(format!("submission {submission_id} has no issue placement"))
            })?;
        article.sequence = sequence;
        Ok(())
    }
}

#[async_trait]
impl UserGroupStore for MemoryStore {
    async fn groups_for_user(
        &self,
        user_id: UserId,
        journal_id: JournalId,
        role: Role,
    ) -> Result<Vec<UserGroup>> {
        let state = self.lock()?;
        let mut groups: Vec<UserGroup> = state
            .user_groups
            .iter()
            .filter(|g| {
                g.journal_id == journal_id
                    && g.role == role
                    && state
                        .user_group_members
                        .iter()
                        .any(|m| m.user_group_id == g.id && m.user_id == user_id)
            })
            .cloned()
            .collect();
        // Order among multiple groups carries no meaning; ascending id
        // keeps it deterministic.
        groups.sort_by_key(|g| g.id);
        Ok(groups)
    }

    async fn insert_stage_assignment(&self, assignment: StageAssignment) -> Result<()> {
        let mut state = self.lock()?;
        state.stage_assignments.push(assignment);
        Ok(())
    }
}

#[async_trait]
impl FileService for MemoryStore {
    async fn galleys_by_publication(&self, publication_id: PublicationId) -> Result<Vec<Galley>> {
        let state = self.lock()?;
        Ok(state
            .galleys
            .iter()
            .filter(|g| g.publication_id == publication_id)
            .cloned()
            .collect())
    }

    async fn latest_revision(&self, file_id: FileId) -> Result<u32> {
        let state = self.lock()?;
        state
            .file_revisions
            .get(&file_id)
            .copied()
            .ok_or_else(|| Error::Store(format!("file {file_id} has no revisions")))
    }

    async fn copy_to_submission_stage(
        &self,
        file_id: FileId,
        revision: u32,
        submission_id: SubmissionId,
    ) -> Result<()> {
        let mut state = self.lock()?;
        if !state.file_revisions.contains_key(&file_id) {
            return Err(Error::Store(format!("file {file_id} does not exist")));
        }
        debug!(file_id, revision, submission_id, "copying file to submission stage");
        state.submission_files.push(SubmissionFile {
            submission_id,
            source_file_id: file_id,
            revision,
        });
        Ok(())
    }
}

#[async_trait]
impl SearchIndex for MemoryStore {
    async fn metadata_changed(&self, submission: &Submission) -> Result<()> {
        let mut state = self.lock()?;
        state.index_log.push(IndexEvent::MetadataChanged(submission.id));
        Ok(())
    }

    async fn files_changed(&self, submission: &Submission) -> Result<()> {
        let mut state = self.lock()?;
        state.index_log.push(IndexEvent::FilesChanged(submission.id));
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.index_log.push(IndexEvent::Finished);
        Ok(())
    }
}
