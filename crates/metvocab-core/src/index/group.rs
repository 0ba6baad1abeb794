//! Concept lookup across the members of a vocabulary group.
//!
//! A group document (e.g. `mmd/Instrument`) lists member URIs under
//! `skos:member`. Each member has its own document, fetched through the
//! shared [`DiskCache`], and its concept node is decoded once into a
//! [`MemberConcept`] for searching.

use crate::cache::DiskCache;
use crate::document::{ConceptNode, VocabDocument};
use crate::error::{Result, VocabError};
use crate::labels::Field;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a [`ConceptRecord`] takes its `resource` from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResourceSource {
    /// First `rdfs:seeAlso` target.
    #[default]
    SeeAlso,
    /// First `exactMatch` target.
    ExactMatch,
    /// The concept's own URI.
    ConceptUri,
}

/// Normalized search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRecord {
    /// The `prefLabel`.
    pub short_name: Option<String>,
    /// The `altLabel`.
    pub long_name: Option<String>,
    pub resource: String,
}

/// One resolved group member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberConcept {
    pub uri: String,
    pub pref_label: Option<String>,
    pub alt_label: Option<String>,
    pub exact_matches: Vec<String>,
    pub see_also: String,
}

impl MemberConcept {
    pub fn from_node(uri: &str, node: ConceptNode<'_>) -> Self {
        Self {
            uri: uri.to_string(),
            pref_label: node.pref_label(),
            alt_label: node.alt_label(),
            exact_matches: node
                .labels(Field::ExactMatch)
                .uris()
                .map(str::to_string)
                .collect(),
            see_also: node.labels(Field::SeeAlso).first_uri().to_string(),
        }
    }

    /// Exact match on altLabel, prefLabel, own URI or any exactMatch URI.
    pub fn matches(&self, name: &str) -> bool {
        self.alt_label.as_deref() == Some(name)
            || self.pref_label.as_deref() == Some(name)
            || self.uri == name
            || self.exact_matches.iter().any(|m| m == name)
    }

    /// Case-insensitive match on altLabel, prefLabel or any exactMatch URI.
    /// `needle` must already be lowercase.
    fn matches_lowercase(&self, needle: &str) -> bool {
        let eq = |label: &Option<String>| {
            label.as_deref().map(str::to_lowercase).as_deref() == Some(needle)
        };
        eq(&self.alt_label)
            || eq(&self.pref_label)
            || self.exact_matches.iter().any(|m| m.to_lowercase() == needle)
    }

    pub fn record(&self, source: ResourceSource) -> ConceptRecord {
        let resource = match source {
            ResourceSource::SeeAlso => self.see_also.clone(),
            ResourceSource::ExactMatch => self.exact_matches.first().cloned().unwrap_or_default(),
            ResourceSource::ConceptUri => self.uri.clone(),
        };
        ConceptRecord {
            short_name: self.pref_label.clone(),
            long_name: self.alt_label.clone(),
            resource,
        }
    }
}

/// Searchable table of a group's members, in group order.
pub struct GroupIndex {
    cache: Arc<DiskCache>,
    voc_id: String,
    uri: String,
    resource_source: ResourceSource,
    members: Vec<MemberConcept>,
}

impl GroupIndex {
    pub fn new(cache: Arc<DiskCache>, voc_id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            cache,
            voc_id: voc_id.into(),
            uri: uri.into(),
            resource_source: ResourceSource::default(),
            members: Vec::new(),
        }
    }

    pub fn with_resource_source(mut self, source: ResourceSource) -> Self {
        self.resource_source = source;
        self
    }

    pub fn voc_id(&self) -> &str {
        &self.voc_id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub async fn init_vocab(&mut self) -> Result<()> {
        self.populate().await
    }

    /// Fetch the group document, then each member's document in order.
    ///
    /// Members that cannot be fetched, whose URI has no usable cache path,
    /// or whose document has no node for the member URI, are skipped. A
    /// malformed registry response aborts the whole populate, for the group
    /// document and for members alike, and leaves the previous members.
    pub async fn populate(&mut self) -> Result<()> {
        let Some(group) = self.cache.get(&self.voc_id, &self.uri).await? else {
            warn!("Group {} is unavailable", self.uri);
            self.members.clear();
            return Ok(());
        };

        let mut members: Vec<MemberConcept> = Vec::new();
        for member_uri in member_uris(&group) {
            let document = match self.cache.get(&self.voc_id, &member_uri).await {
                Ok(Some(document)) => document,
                Ok(None) => {
                    warn!("Skipping member {}: not retrievable", member_uri);
                    continue;
                }
                Err(e @ VocabError::MalformedUri { .. }) => {
                    warn!("Skipping member {}: {}", member_uri, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(node) = document.find_node(&member_uri) else {
                warn!("Skipping member {}: no matching node in its document", member_uri);
                continue;
            };

            let concept = MemberConcept::from_node(&member_uri, node);
            match members.iter_mut().find(|m| m.uri == member_uri) {
                Some(existing) => *existing = concept,
                None => members.push(concept),
            }
        }

        info!("Loaded {} members for group {}", members.len(), self.uri);
        self.members = members;
        Ok(())
    }

    pub fn is_initialised(&self) -> bool {
        !self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &MemberConcept> {
        self.members.iter()
    }

    /// First member whose labels, URI or exactMatch equal `name` exactly.
    pub fn search(&self, name: &str) -> Option<ConceptRecord> {
        let hit = self.members.iter().find(|m| m.matches(name));
        self.finish_search(name, hit)
    }

    /// Like [`search`](Self::search) but case-insensitive, and without
    /// matching on the member's own URI.
    pub fn search_lowercase(&self, name: &str) -> Option<ConceptRecord> {
        let needle = name.to_lowercase();
        let hit = self.members.iter().find(|m| m.matches_lowercase(&needle));
        self.finish_search(name, hit)
    }

    fn finish_search(&self, name: &str, hit: Option<&MemberConcept>) -> Option<ConceptRecord> {
        match hit {
            Some(member) => Some(member.record(self.resource_source)),
            None => {
                debug!("No member of {} matches '{}'", self.uri, name);
                None
            }
        }
    }
}

/// Member URIs listed anywhere in the group graph, in document order.
fn member_uris(group: &VocabDocument) -> Vec<String> {
    group
        .nodes()
        .flat_map(|node| {
            node.labels(Field::Member)
                .uris()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
