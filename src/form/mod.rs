//! One-page quick submission form
//!
//! Drives the lifecycle of a single submission-creation session:
//! 1. Construct - optionally load an existing draft
//! 2. `init_data` - lazily create the draft submission + publication +
//!    stage assignment
//! 3. `read_input` - bind the posted fields
//! 4. `validate` - cross-field and format checks
//! 5. `execute` - commit metadata, optionally publish, copy galley files,
//!    resequence, notify the search index
//! 6. `cancel` - delete the draft when the editor abandons the flow

mod execute;
mod intake;
mod metadata;
mod validate;

pub use intake::{FormInput, IntakeContext, QuickSubmitForm};
pub use metadata::MetadataInput;
