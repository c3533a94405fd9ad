//! Placement ordering within a partition
//!
//! Published articles are ordered within their (section, issue) partition,
//! and sections can carry a custom display order within an issue. New
//! members enter at [`END_OF_LIST`] and a resequence pass compacts the
//! partition into a dense 1..=N range. The sentinel is an implementation
//! detail of this module; it must never survive a resequence pass into
//! user-visible data.
//!
//! Concurrent resequencing of the same partition is not safe without
//! external serialization (a partition-level lock or a transactional
//! read-modify-write); the in-memory backend provides this by funneling
//! every operation through one mutex.

use crate::error::Result;
use crate::store::{PublishedArticleStore, SectionStore};
use crate::types::{IssueId, PublishedArticle, SectionId, SubmissionId};
use tracing::debug;

/// Sentinel meaning "place at the end of the partition"
///
/// Large enough to sort after any compacted position. Replaced by a real
/// position on the next resequence pass.
pub const END_OF_LIST: i64 = 0x7fff_ffff;

/// First position assigned by a resequence pass
pub const SEQUENCE_BASE: i64 = 1;

/// Compact `(id, sequence)` pairs into dense positions from
/// [`SEQUENCE_BASE`], preserving the current order. The sort is stable, so
/// members sharing a value (sentinel entrants included) keep their given
/// order.
fn compact<I: Copy>(members: &[(I, i64)]) -> Vec<(I, i64)> {
    let mut ordered = members.to_vec();
    ordered.sort_by_key(|&(_, sequence)| sequence);
    ordered
        .into_iter()
        .zip(SEQUENCE_BASE..)
        .map(|((id, _), sequence)| (id, sequence))
        .collect()
}

/// Assigns and repairs placement order for published articles and custom
/// section orders
pub struct SequenceAssigner<'a> {
    published_articles: &'a dyn PublishedArticleStore,
    sections: &'a dyn SectionStore,
}

impl<'a> SequenceAssigner<'a> {
    /// Build an assigner over the two stores that carry ordered partitions
    pub fn new(
        published_articles: &'a dyn PublishedArticleStore,
        sections: &'a dyn SectionStore,
    ) -> Self {
        Self {
            published_articles,
            sections,
        }
    }

    /// Insert an issue placement at the end of its partition
    ///
    /// The stored sequence is the end-of-list sentinel; call
    /// [`Self::resequence_section_issue`] afterwards to compact it away.
    pub async fn insert_published_at_end(&self, mut article: PublishedArticle) -> Result<()> {
        article.sequence = END_OF_LIST;
        self.published_articles.insert(article).await
    }

    /// Renumber one (section, issue) partition into a dense 1..=N range
    ///
    /// Idempotent: an already-dense partition keeps the same assignment.
    pub async fn resequence_section_issue(
        &self,
        section_id: SectionId,
        issue_id: IssueId,
    ) -> Result<()> {
        let members = self
            .published_articles
            .by_section_and_issue(section_id, issue_id)
            .await?;
        let pairs: Vec<(SubmissionId, i64)> = members
            .iter()
            .map(|a| (a.submission_id, a.sequence))
            .collect();
        debug!(section_id, issue_id, members = pairs.len(), "resequencing partition");
        for (submission_id, sequence) in compact(&pairs) {
            self.published_articles
                .set_sequence(submission_id, sequence)
                .await?;
        }
        Ok(())
    }

    /// Make sure a section has a custom order entry within an issue
    ///
    /// No-op when the issue does not use custom ordering or the entry
    /// already exists. Otherwise the section enters at the end and the
    /// whole custom-order partition is compacted immediately.
    pub async fn ensure_custom_order(
        &self,
        issue_id: IssueId,
        section_id: SectionId,
    ) -> Result<()> {
        if !self.sections.custom_ordering_exists(issue_id).await? {
            return Ok(());
        }
        if self
            .sections
            .custom_order(issue_id, section_id)
            .await?
            .is_some()
        {
            return Ok(());
        }
        debug!(issue_id, section_id, "creating custom section order at end of list");
        self.sections
            .insert_custom_order(issue_id, section_id, END_OF_LIST)
            .await?;
        self.resequence_custom_orders(issue_id).await
    }

    /// Renumber an issue's custom section orders into a dense 1..=N range
    pub async fn resequence_custom_orders(&self, issue_id: IssueId) -> Result<()> {
        let orders = self.sections.custom_orders(issue_id).await?;
        let pairs: Vec<(SectionId, i64)> = orders
            .iter()
            .map(|o| (o.section_id, o.sequence))
            .collect();
        for (section_id, sequence) in compact(&pairs) {
            self.sections
                .set_custom_order(issue_id, section_id, sequence)
                .await?;
        }
        Ok(())
    }
}
