//! Issue option grouping for the submission form
//!
//! Pure classification over fetched issue lists; nothing here mutates
//! persistence. The form offers three labeled groups in display order:
//! future issues (unpublished), the current issue (at most one), and back
//! issues (the remaining published ones).

use crate::error::Result;
use crate::store::IssueStore;
use crate::types::{Issue, IssueId, Journal};
use chrono::NaiveDate;

/// One selectable issue with its display labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueOption {
    /// Issue id
    pub id: IssueId,
    /// Identification label, e.g. "Vol. 3 No. 2 (2024)"
    pub label: String,
    /// Short publication date label for the pulldown
    pub date_label: String,
}

/// The three issue groups offered by the form, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueOptions {
    /// Unpublished issues
    pub future: Vec<IssueOption>,
    /// The journal's current issue, when the first published issue is
    /// flagged as such
    pub current: Option<IssueOption>,
    /// Remaining published issues in their retrieval order
    pub back: Vec<IssueOption>,
}

impl IssueOptions {
    /// True when the journal has no issues to offer
    pub fn is_empty(&self) -> bool {
        self.future.is_empty() && self.current.is_none() && self.back.is_empty()
    }
}

/// Classify a journal's issues into future/current/back groups
///
/// `today` stands in as the date label for unpublished issues, which have
/// no real publication date yet; callers pass the current date. Published
/// issues are labeled with their own publication date.
pub async fn issue_options(
    store: &dyn IssueStore,
    journal: &Journal,
    today: NaiveDate,
) -> Result<IssueOptions> {
    let mut options = IssueOptions::default();

    for issue in store.unpublished(journal.id).await? {
        options.future.push(option_for(&issue, journal, today));
    }

    let published = store.published(journal.id).await?;
    let mut back = published.as_slice();
    if let Some((first, rest)) = published.split_first() {
        if first.current {
            options.current = Some(option_for(first, journal, today));
            back = rest;
        }
    }
    for issue in back {
        options.back.push(option_for(issue, journal, today));
    }

    Ok(options)
}

fn option_for(issue: &Issue, journal: &Journal, today: NaiveDate) -> IssueOption {
    let date = issue.date_published.unwrap_or(today);
    IssueOption {
        id: issue.id,
        label: issue.identification(),
        date_label: date.format(&journal.date_format_short).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JournalState, MemoryStore};

    fn journal() -> Journal {
        Journal {
            id: 1,
            primary_locale: "en_US".into(),
            supported_locales: vec!["en_US".into()],
            date_format_short: "%Y-%m-%d".into(),
        }
    }

    fn issue(id: IssueId, published: bool, current: bool, date: Option<(i32, u32, u32)>) -> Issue {
        Issue {
            id,
            journal_id: 1,
            volume: 1,
            number: u32::try_from(id).unwrap_or(1),
            year: 2024,
            published,
            current,
            date_published: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn groups_split_future_current_back() {
        let mut state = JournalState::new(journal());
        state.issues = vec![
            issue(1, false, false, None),
            issue(2, true, true, Some((2024, 5, 10))),
            issue(3, true, false, Some((2024, 1, 20))),
            issue(4, true, false, Some((2023, 9, 2))),
        ];
        let store = MemoryStore::new(state);

        let options = issue_options(&store, &journal(), today()).await.unwrap();

        assert_eq!(options.future.len(), 1);
        assert_eq!(options.future[0].id, 1);
        assert_eq!(options.current.as_ref().map(|o| o.id), Some(2));
        assert_eq!(
            options.back.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![3, 4]
        );
    }

    #[tokio::test]
    async fn first_published_issue_stays_back_when_not_current() {
        let mut state = JournalState::new(journal());
        state.issues = vec![
            issue(2, true, false, Some((2024, 5, 10))),
            issue(3, true, false, Some((2024, 1, 20))),
        ];
        let store = MemoryStore::new(state);

        let options = issue_options(&store, &journal(), today()).await.unwrap();

        assert!(options.current.is_none());
        assert_eq!(
            options.back.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[tokio::test]
    async fn unpublished_issues_are_stamped_with_today() {
        let mut state = JournalState::new(journal());
        state.issues = vec![issue(1, false, false, None)];
        let store = MemoryStore::new(state);

        let options = issue_options(&store, &journal(), today()).await.unwrap();

        assert_eq!(options.future[0].date_label, "2025-06-01");
    }

    #[tokio::test]
    async fn back_issues_carry_their_own_dates() {
        let mut state = JournalState::new(journal());
        state.issues = vec![
            issue(2, true, false, Some((2024, 5, 10))),
            issue(3, true, false, Some((2024, 1, 20))),
        ];
        let store = MemoryStore::new(state);

        let options = issue_options(&store, &journal(), today()).await.unwrap();

        assert_eq!(options.back[0].date_label, "2024-05-10");
        assert_eq!(options.back[1].date_label, "2024-01-20");
    }

    #[tokio::test]
    async fn empty_journal_yields_empty_groups() {
        let store = MemoryStore::new(JournalState::new(journal()));
        let options = issue_options(&store, &journal(), today()).await.unwrap();
        assert!(options.is_empty());
    }
}
