//! Evidence subdomain: fragments, per-team stores and relevance scoring.

pub mod fragment;
pub mod relevance;
pub mod store;

pub use fragment::{EvidenceFragment, FragmentError, FragmentKey};
pub use relevance::RelevanceBrief;
pub use store::{EvidenceStore, MergeOutcome};
