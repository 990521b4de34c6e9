// SPDX-License-Identifier: BUSL-1.1
//! In-memory entity stores.
//!
//! Two independent mappings own the authoritative collections:
//! list identifier → ordered cards, and card identifier → ordered
//! attachments. Missing keys default to an empty sequence on first write;
//! reads of unknown keys yield an empty sequence, never an error.
//!
//! Storage is in-memory (DashMap) with no persistence — state is lost on
//! restart. DashMap's shard locks serialize concurrent read-modify-write
//! per key, so append-and-resort races on the same list are safe.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

use cardstub_core::{EntityId, Position};

use crate::model::{Attachment, AttachmentDraft, Card, CardDraft};

/// Inner storage holding both DashMaps.
struct Inner {
    lists: DashMap<String, Vec<Card>>,
    attachments: DashMap<String, Vec<Attachment>>,
}

/// Shared application state holding the in-memory stores.
///
/// Cheaply cloneable via `Arc` — all clones share the same data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

/// Full contents of both stores, as served by the state-dump endpoint.
/// Includes the internal `chksum` field of every attachment.
#[derive(Serialize)]
pub struct StateSnapshot {
    pub lists: BTreeMap<String, Vec<Card>>,
    pub attachments: BTreeMap<String, Vec<Attachment>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                lists: DashMap::new(),
                attachments: DashMap::new(),
            }),
        }
    }

    /// Create a card on `id_list` at the requested position and return it.
    ///
    /// The ordering key is resolved against the list's current cards, then
    /// the list is re-sorted ascending by `pos` — `sort_by` is stable, so
    /// ties keep their prior relative order.
    pub fn create_card(&self, id_list: &str, position: Position, draft: CardDraft) -> Card {
        let mut cards = self.inner.lists.entry(id_list.to_string()).or_default();
        let pos = position.resolve(cards.iter().map(|c| c.pos));
        let card = Card::new(EntityId::generate(), id_list, pos, draft);
        cards.push(card.clone());
        cards.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        card
    }

    /// Append `label` to the card with the given (lowercase) identifier,
    /// returning the updated label sequence, or `None` when no card matches.
    ///
    /// Linear scan across all lists — card identifiers are unique
    /// store-wide, and the stub's scale does not warrant a secondary index.
    pub fn append_label(&self, card_id: &str, label: String) -> Option<Vec<String>> {
        for mut cards in self.inner.lists.iter_mut() {
            for card in cards.value_mut().iter_mut() {
                if card.id.as_str() == card_id {
                    card.id_labels.push(label);
                    return Some(card.id_labels.clone());
                }
            }
        }
        None
    }

    /// Append an attachment under `card_id`, assigning the next sequential
    /// position (count of existing attachments at insert time).
    pub fn append_attachment(&self, card_id: &str, draft: AttachmentDraft) -> Attachment {
        let mut attachments = self
            .inner
            .attachments
            .entry(card_id.to_string())
            .or_default();
        let attachment = Attachment::new(EntityId::generate(), attachments.len(), draft);
        attachments.push(attachment.clone());
        attachment
    }

    /// The ordered cards of a list; empty when the list is unknown.
    pub fn cards_in_list(&self, id_list: &str) -> Vec<Card> {
        self.inner
            .lists
            .get(id_list)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Snapshot both stores for the state-dump endpoint.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            lists: self
                .inner
                .lists
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
            attachments: self
                .inner
                .attachments
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
        }
    }
}
