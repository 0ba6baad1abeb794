//! Queryable views over cached vocabulary documents.
//!
//! - `ConceptIndex`: membership checks against one vocabulary's concept labels
//! - `GroupIndex`: first-match search across the members of a group

mod concept;
mod group;

pub use concept::ConceptIndex;
pub use group::{ConceptRecord, GroupIndex, MemberConcept, ResourceSource};
