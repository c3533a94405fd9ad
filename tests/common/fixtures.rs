//! Test data factories for quickpress types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use quickpress::form::{FormInput, IntakeContext, MetadataInput};
use quickpress::store::{JournalState, MemoryStore, Stores, UserGroupMember};
use quickpress::types::{
    ArticleStatus, Galley, Issue, IssueId, Journal, Role, Section, SectionId, UserGroup, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

/// The journal id every fixture journal uses
pub const JOURNAL_ID: i64 = 1;

/// The acting editor in fixture contexts
pub const EDITOR_ID: UserId = 7;

/// Create a journal with two supported locales
pub fn make_journal() -> Journal {
    Journal {
        id: JOURNAL_ID,
        primary_locale: "en_US".to_string(),
        supported_locales: vec!["en_US".to_string(), "fr_CA".to_string()],
        date_format_short: "%Y-%m-%d".to_string(),
    }
}

/// Create a section in the fixture journal
pub fn make_section(id: SectionId, title: &str) -> Section {
    Section {
        id,
        journal_id: JOURNAL_ID,
        title: title.to_string(),
    }
}

/// Create a published issue with a publication date
pub fn make_published_issue(id: IssueId, current: bool, date: NaiveDate) -> Issue {
    Issue {
        id,
        journal_id: JOURNAL_ID,
        volume: 1,
        number: u32::try_from(id).unwrap_or(1),
        year: 2024,
        published: true,
        current,
        date_published: Some(date),
    }
}

/// Create an unpublished (future) issue
pub fn make_future_issue(id: IssueId) -> Issue {
    Issue {
        id,
        journal_id: JOURNAL_ID,
        volume: 2,
        number: u32::try_from(id).unwrap_or(1),
        year: 2025,
        published: false,
        current: false,
        date_published: None,
    }
}

/// A journal state with two sections, one published issue (id 42), one
/// future issue (id 9), and the fixture editor in a manager group
pub fn seeded_state() -> JournalState {
    let mut state = JournalState::new(make_journal());
    state.sections = vec![make_section(1, "Articles"), make_section(2, "Reviews")];
    state.issues = vec![
        make_future_issue(9),
        make_published_issue(
            42,
            true,
            NaiveDate::from_ymd_opt(2024, 5, 10).expect("valid fixture date"),
        ),
    ];
    state.user_groups = vec![UserGroup {
        id: 3,
        journal_id: JOURNAL_ID,
        role: Role::Manager,
        name: "Journal manager".to_string(),
    }];
    state.user_group_members = vec![UserGroupMember {
        user_group_id: 3,
        user_id: EDITOR_ID,
    }];
    state
}

/// Attach a galley (and its file revisions) to a publication in the state
pub fn add_galley(state: &mut JournalState, publication_id: i64, file_id: i64, revisions: u32) {
    state.galleys.push(Galley {
        publication_id,
        label: "PDF".to_string(),
        file_id: Some(file_id),
    });
    state.file_revisions.insert(file_id, revisions);
}

/// Wrap a state in a memory backend plus its trait-object bundle
pub fn backend(state: JournalState) -> (Arc<MemoryStore>, Stores) {
    let backend = Arc::new(MemoryStore::new(state));
    let stores = Stores::shared(backend.clone());
    (backend, stores)
}

/// The fixture intake context (journal + acting editor)
pub fn make_context() -> IntakeContext {
    IntakeContext {
        journal: make_journal(),
        user_id: EDITOR_ID,
    }
}

/// Metadata carrying an English title
pub fn make_metadata(title: &str) -> MetadataInput {
    let mut metadata = MetadataInput::default();
    metadata.title.insert("en_US".to_string(), title.to_string());
    metadata
        .abstract_text
        .insert("en_US".to_string(), format!("Abstract of {title}"));
    metadata.keywords.push("fixtures".to_string());
    metadata
}

/// A valid queued (unpublished) form input for section 1
pub fn queued_input(title: &str) -> FormInput {
    FormInput {
        section_id: Some(1),
        locale: Some("en_US".to_string()),
        article_status: ArticleStatus::Unpublished,
        metadata: make_metadata(title),
        ..FormInput::default()
    }
}

/// A valid published form input targeting issue 42
pub fn published_input(title: &str) -> FormInput {
    FormInput {
        article_status: ArticleStatus::Published,
        issue_id: Some(42),
        pages: Some("12-31".to_string()),
        copyright_holder: Some("The Authors".to_string()),
        copyright_year: Some(2024),
        license_url: Some("https://creativecommons.org/licenses/by/4.0/".to_string()),
        date_published: NaiveDate::from_ymd_opt(2024, 6, 1),
        ..queued_input(title)
    }
}

/// A fixed commit timestamp for deterministic assertions
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
        .expect("valid fixture timestamp")
        .with_timezone(&Utc)
}
