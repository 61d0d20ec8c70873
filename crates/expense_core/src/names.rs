//! Participant naming and split column order.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::errors::ExpenseError;
use crate::models::{ExpenseItem, ParticipantId};

lazy_static! {
    static ref ID_TO_NAME: Regex = Regex::new(r"(\d+)->([^,]+),?").expect("id->name regex");
}

/// Display names for every participant of an export, plus the order in which
/// their split columns are rendered.
///
/// Overrides keep the position of their first mention in the `names` string;
/// ids discovered while scanning items are appended in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRegistry {
    names: HashMap<ParticipantId, String>,
    order: Vec<ParticipantId>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` for `id`, replacing any earlier name.
    pub fn insert(&mut self, id: ParticipantId, name: impl Into<String>) {
        if self.names.insert(id, name.into()).is_none() {
            self.order.push(id);
        }
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.names.contains_key(&id)
    }

    /// Name for `id`, falling back to its decimal form.
    pub fn name(&self, id: ParticipantId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// Participant ids in column order.
    pub fn ids(&self) -> &[ParticipantId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn entries(&self) -> Vec<(ParticipantId, String)> {
        self.order.iter().map(|id| (*id, self.name(*id))).collect()
    }

    /// Adds every payer and split id of `items` that has no name yet.
    pub fn discover(&mut self, items: &[ExpenseItem]) {
        for item in items {
            for id in item.participant_ids() {
                if !self.contains(id) {
                    self.insert(id, id.to_string());
                }
            }
        }
        debug!(participants = ?self.entries(), "found the following involved persons");
    }
}

/// Parses `id->name,id->name,...`. Segments that don't match are ignored; an
/// id that does not fit into a participant id aborts.
pub fn parse_name_overrides(names: &str) -> Result<NameRegistry, ExpenseError> {
    let mut registry = NameRegistry::new();
    for captures in ID_TO_NAME.captures_iter(names) {
        let raw_id = &captures[1];
        let id: ParticipantId = raw_id
            .parse()
            .map_err(|err| ExpenseError::InvalidNames(format!("{raw_id}: {err}")))?;
        let name = &captures[2];
        debug!(id, name, "registered name");
        registry.insert(id, name);
    }
    Ok(registry)
}
