pub mod config;
pub mod error;
pub mod keys;
pub mod run;
pub mod tagger;
pub mod types;

pub use config::TaggerConfig;
pub use error::ReportError;
pub use run::{Catalog, ClassSource, RunCompletion, SkipReason, TagOutcome};
pub use tagger::{ClassTagger, DerivedTags};
pub use types::{Report, RunStatus, Userdata};
