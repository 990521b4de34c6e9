// SPDX-License-Identifier: BUSL-1.1
//! Entity records.
//!
//! Full-shape card and attachment records matching the upstream service's
//! JSON responses: camelCase field names, absent optionals serialized as
//! `null`, presentational fields carried with fixed defaults so clients see
//! the complete record shape.
//!
//! Constructors take an explicit draft struct; every new entity gets its own
//! freshly allocated sequences and maps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use cardstub_core::EntityId;

/// A unit of work on a list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: EntityId,
    pub address: Option<String>,
    pub badges: Value,
    pub check_item_states: Vec<String>,
    pub closed: bool,
    pub coordinates: Option<String>,
    pub creation_method: Option<String>,
    pub date_last_activity: DateTime<Utc>,
    pub desc: String,
    pub desc_data: Value,
    pub due: Option<String>,
    pub due_reminder: Option<String>,
    pub email: String,
    pub id_board: String,
    pub id_checklists: Vec<String>,
    pub id_labels: Vec<String>,
    pub id_list: String,
    pub id_members: Vec<String>,
    pub id_members_voted: Vec<String>,
    pub id_short: u32,
    pub id_attachment_cover: String,
    pub labels: Vec<String>,
    pub limits: Value,
    pub location_name: Option<String>,
    pub manual_cover_attachment: bool,
    pub name: String,
    pub pos: f64,
    pub short_link: String,
    pub short_url: String,
    pub subscribed: bool,
    pub url: String,
    pub cover: Value,
}

/// Caller-supplied card fields, copied verbatim at creation.
#[derive(Debug, Default)]
pub struct CardDraft {
    pub name: String,
    pub desc: String,
    pub address: Option<String>,
    pub coordinates: Option<String>,
    pub location_name: Option<String>,
    pub due: Option<String>,
    pub due_reminder: Option<String>,
    pub id_labels: Vec<String>,
    pub id_members: Vec<String>,
    pub url: String,
}

impl Card {
    /// Build a card from its identity, ordering key, and draft fields.
    /// `dateLastActivity` is stamped with the current time of this call.
    pub fn new(id: EntityId, id_list: &str, pos: f64, draft: CardDraft) -> Self {
        Self {
            id,
            address: draft.address,
            badges: json!({}),
            check_item_states: Vec::new(),
            closed: false,
            coordinates: draft.coordinates,
            creation_method: None,
            date_last_activity: Utc::now(),
            desc: draft.desc,
            desc_data: json!({}),
            due: draft.due,
            due_reminder: draft.due_reminder,
            email: String::new(),
            id_board: String::new(),
            id_checklists: Vec::new(),
            id_labels: draft.id_labels,
            id_list: id_list.to_string(),
            id_members: draft.id_members,
            id_members_voted: Vec::new(),
            id_short: 0,
            id_attachment_cover: String::new(),
            labels: Vec::new(),
            limits: json!({}),
            location_name: draft.location_name,
            manual_cover_attachment: false,
            name: draft.name,
            pos,
            short_link: String::new(),
            short_url: String::new(),
            subscribed: false,
            url: draft.url,
            cover: json!({}),
        }
    }
}

/// A file or link attached to a card.
///
/// `chksum` is internal: it appears in the state dump for test harnesses but
/// is stripped from the add-attachment response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: EntityId,
    pub bytes: Option<u64>,
    pub date: NaiveDate,
    pub edge_color: Option<String>,
    pub id_member: String,
    pub is_upload: bool,
    pub mime_type: String,
    pub name: String,
    pub previews: Vec<String>,
    pub url: String,
    pub pos: usize,
    pub chksum: Option<String>,
}

/// Ingestion outcome plus caller-supplied metadata for a new attachment.
#[derive(Debug, Default)]
pub struct AttachmentDraft {
    pub bytes: Option<u64>,
    pub chksum: Option<String>,
    pub mime_type: String,
    pub name: String,
}

impl Attachment {
    /// Build an attachment at the given sequence position. `date` is the
    /// current UTC date of this call.
    pub fn new(id: EntityId, pos: usize, draft: AttachmentDraft) -> Self {
        Self {
            id,
            bytes: draft.bytes,
            date: Utc::now().date_naive(),
            edge_color: None,
            id_member: String::new(),
            is_upload: false,
            mime_type: draft.mime_type,
            name: draft.name,
            previews: Vec::new(),
            url: String::new(),
            pos,
            chksum: draft.chksum,
        }
    }
}
