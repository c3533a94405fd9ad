//! Form validation
//!
//! Field-level checks collected into [`ValidationErrors`]; a store failure
//! during a check is fatal and propagates as an ordinary [`Error`].
//! Request-level validation (POST method, CSRF token) belongs to the host
//! application, not this crate.

use crate::error::{Error, Result, ValidationErrors};
use crate::form::QuickSubmitForm;
use crate::types::ArticleStatus;
use url::Url;

impl QuickSubmitForm {
    /// Check the bound input against the journal's configuration
    ///
    /// Returns `Error::Validation` carrying every failed check; the caller
    /// re-displays the form with the field messages. The only cross-field
    /// rule: publishing requires a selected issue.
    pub async fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::default();
        let journal = &self.context.journal;

        match self.input.section_id {
            None => errors.add("sectionId", "A section is required"),
            Some(section_id) => {
                if !self.stores.sections.exists(section_id, journal.id).await? {
                    errors.add("sectionId", "The selected section does not exist");
                }
            }
        }

        let locale = self.input.locale.as_deref().unwrap_or(&self.locale);
        if !journal.submission_locales().iter().any(|l| l == locale) {
            errors.add("locale", "The locale is not supported for submissions");
        }

        if let Some(license_url) = self.input.license_url.as_deref() {
            if !license_url.is_empty() && Url::parse(license_url).is_err() {
                errors.add("licenseUrl", "The license URL is not a valid URL");
            }
        }

        if self.input.metadata.title_for(locale).is_none() {
            errors.add("title", "A title is required in the submission locale");
        }

        // Publishing requires an issue to place the article into.
        if self.input.article_status == ArticleStatus::Published
            && !self.input.issue_id.is_some_and(|id| id > 0)
        {
            errors.add("issueId", "An issue must be selected to publish the article");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}
