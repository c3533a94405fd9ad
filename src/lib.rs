//! quickpress - one-page quick submission for journal editorial workflows
//!
//! An editor creates a scholarly article record in a single pass: metadata,
//! section, optional placement into an issue, galley files, search
//! indexing. The crate owns the lifecycle orchestration and the placement
//! ordering; persistence, file storage, and search are trait seams
//! (see [`store`]) with an in-memory reference backend.
//!
//! Lifecycle: [`form::QuickSubmitForm::new`] →
//! [`init_data`](form::QuickSubmitForm::init_data) →
//! [`read_input`](form::QuickSubmitForm::read_input) →
//! [`validate`](form::QuickSubmitForm::validate) →
//! [`execute`](form::QuickSubmitForm::execute), with
//! [`cancel`](form::QuickSubmitForm::cancel) discarding an abandoned
//! draft.

pub mod error;
pub mod form;
pub mod issues;
pub mod sequence;
pub mod store;
pub mod types;

pub use error::{Error, FieldError, Result, ValidationErrors};
pub use form::{FormInput, IntakeContext, MetadataInput, QuickSubmitForm};
pub use issues::{IssueOption, IssueOptions};
pub use sequence::SequenceAssigner;
pub use store::{MemoryStore, Stores};
