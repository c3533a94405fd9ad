//! Core types for quickpress

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Journal (tenant) identifier
pub type JournalId = i64;
/// Submission identifier
pub type SubmissionId = i64;
/// Publication identifier
pub type PublicationId = i64;
/// Section identifier
pub type SectionId = i64;
/// Issue identifier
pub type IssueId = i64;
/// User identifier
pub type UserId = i64;
/// User group identifier
pub type UserGroupId = i64;
/// File identifier
pub type FileId = i64;

/// Publication state of a submission or publication record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// In the editorial queue, not visible to readers
    Queued,
    /// Published into an issue
    Published,
}

/// Workflow stage a submission currently occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Author/editor intake
    Submission,
    /// Peer review
    Review,
    /// Copyediting
    Copyediting,
    /// Production (galleys, layout)
    Production,
}

/// Whether the posted form asked for the article to be published
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Leave the article queued (form value 0)
    #[default]
    Unpublished,
    /// Publish into the selected issue (form value 1)
    Published,
}

/// Reader access policy for a published article
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    /// Inherit the owning issue's access policy
    #[default]
    IssueDefault,
    /// Openly accessible regardless of issue policy
    Open,
}

/// Editorial role carried by a user group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Journal manager
    Manager,
    /// Section or issue editor
    Editor,
    /// Submitting author
    Author,
    /// Peer reviewer
    Reviewer,
}

/// A draft or completed article submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission id
    pub id: SubmissionId,
    /// Owning journal
    pub journal_id: JournalId,
    /// Submission locale (e.g. "en_US")
    pub locale: String,
    /// Queued or published
    pub status: SubmissionStatus,
    /// Current workflow stage
    pub stage: WorkflowStage,
    /// Intake progress marker; 0 once the submission flow is complete
    pub progress: u8,
    /// Section the submission belongs to
    pub section_id: SectionId,
    /// When the submission flow completed
    pub date_submitted: Option<DateTime<Utc>>,
    /// When `status` last changed
    pub date_status_modified: Option<DateTime<Utc>>,
    /// Copyright year, set on publish
    pub copyright_year: Option<i32>,
    /// Copyright holder, set on publish
    pub copyright_holder: Option<String>,
    /// License URL, set on publish
    pub license_url: Option<String>,
    /// Page range within the issue (e.g. "12-31")
    pub pages: Option<String>,
    /// The current (latest) publication version
    pub current_publication_id: Option<PublicationId>,
}

/// A versioned metadata snapshot of a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Publication id
    pub id: PublicationId,
    /// Owning submission
    pub submission_id: SubmissionId,
    /// Publication locale
    pub locale: String,
    /// Language code: first two characters of the locale
    pub language: String,
    /// Section the publication is placed in
    pub section_id: SectionId,
    /// Queued or published
    pub status: SubmissionStatus,
    /// Title keyed by locale
    pub title: BTreeMap<String, String>,
    /// Abstract keyed by locale
    pub abstract_text: BTreeMap<String, String>,
    /// Keywords in display order
    pub keywords: Vec<String>,
    /// Contributors in display order
    pub contributors: Vec<Contributor>,
}

/// An author or other contributor on a publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Given name
    pub given_name: String,
    /// Family name
    pub family_name: String,
    /// Contact email, if any
    pub email: Option<String>,
    /// Institutional affiliation, if any
    pub affiliation: Option<String>,
}

/// Issue-placement record, present only for published submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedArticle {
    /// Shared with the submission id (one-to-one)
    pub submission_id: SubmissionId,
    /// Publication date shown to readers
    pub date_published: Option<NaiveDate>,
    /// Placement order within the (section, issue) partition
    pub sequence: i64,
    /// Reader access policy
    pub access_status: AccessStatus,
    /// Issue the article is placed in
    pub issue_id: IssueId,
}

/// Grants a user editorial authority over a submission's workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAssignment {
    /// Target submission
    pub submission_id: SubmissionId,
    /// Group the authority derives from; None when the user holds no
    /// manager role in the journal
    pub user_group_id: Option<UserGroupId>,
    /// Assigned user
    pub user_id: UserId,
}

/// Optional override of section display order within one issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSectionOrder {
    /// Issue the override applies to
    pub issue_id: IssueId,
    /// Section being ordered
    pub section_id: SectionId,
    /// Position within the issue
    pub sequence: i64,
}

/// A journal section (e.g. "Articles", "Reviews")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section id
    pub id: SectionId,
    /// Owning journal
    pub journal_id: JournalId,
    /// Display title
    pub title: String,
}

/// A journal issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue id
    pub id: IssueId,
    /// Owning journal
    pub journal_id: JournalId,
    /// Volume number
    pub volume: u32,
    /// Issue number within the volume
    pub number: u32,
    /// Publication year
    pub year: i32,
    /// Whether the issue has been published
    pub published: bool,
    /// Whether this is the journal's current issue
    pub current: bool,
    /// Date the issue was published
    pub date_published: Option<NaiveDate>,
}

impl Issue {
    /// Human-readable identification, e.g. "Vol. 3 No. 2 (2024)"
    pub fn identification(&self) -> String {
        format!("Vol. {} No. {} ({})", self.volume, self.number, self.year)
    }
}

/// A user group within a journal, carrying one editorial role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    /// Group id
    pub id: UserGroupId,
    /// Owning journal
    pub journal_id: JournalId,
    /// Role the group grants
    pub role: Role,
    /// Display name
    pub name: String,
}

/// The journal (tenant) owning sections, issues, and submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Journal id
    pub id: JournalId,
    /// Primary locale, the fallback for every locale decision
    pub primary_locale: String,
    /// Locales accepted for submissions; when empty the primary locale
    /// is the only accepted one
    pub supported_locales: Vec<String>,
    /// strftime-style format for short date labels (issue pulldowns)
    pub date_format_short: String,
}

impl Journal {
    /// Locales accepted for submissions, never empty.
    pub fn submission_locales(&self) -> Vec<String> {
        if self.supported_locales.is_empty() {
            vec![self.primary_locale.clone()]
        } else {
            self.supported_locales.clone()
        }
    }
}

/// A production-ready file rendition attached to a publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Galley {
    /// Publication the galley belongs to
    pub publication_id: PublicationId,
    /// Display label (e.g. "PDF")
    pub label: String,
    /// Underlying file; a galley can exist without one (remote galleys)
    pub file_id: Option<FileId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_identification_format() {
        let issue = Issue {
            id: 1,
            journal_id: 1,
            volume: 3,
            number: 2,
            year: 2024,
            published: true,
            current: false,
            date_published: None,
        };
        assert_eq!(issue.identification(), "Vol. 3 No. 2 (2024)");
    }

    #[test]
    fn submission_locales_falls_back_to_primary() {
        let journal = Journal {
            id: 1,
            primary_locale: "en_US".into(),
            supported_locales: vec![],
            date_format_short: "%Y-%m-%d".into(),
        };
        assert_eq!(journal.submission_locales(), vec!["en_US".to_string()]);
    }

    #[test]
    fn article_status_serde_values() {
        let json = serde_json::to_string(&ArticleStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
        let back: ArticleStatus = serde_json::from_str("\"unpublished\"").unwrap();
        assert_eq!(back, ArticleStatus::Unpublished);
    }
}
