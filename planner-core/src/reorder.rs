//! Drag-and-drop reordering of lists and cards.
//!
//! A front end turns pointer geometry into an [`InsertionAnchor`] (see
//! [`anchor_from_pointer`]) and hands it to the store. Index resolution is a
//! pure function of the collection, the dragged id and the anchor, computed
//! with the dragged element left out. That makes the "before removal" and
//! "after removal" readings of a same-list move agree.

use serde::{Deserialize, Serialize};

use crate::types::Identified;

/// Where a dragged element should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionAnchor {
    /// Immediately before the element with this id.
    Before(String),
    /// After every other element.
    End,
}

impl InsertionAnchor {
    pub fn before(id: impl Into<String>) -> Self {
        InsertionAnchor::Before(id.into())
    }

    /// Anchor that lands an element right after `id` in `collection`.
    pub fn after<T: Identified>(collection: &[T], id: &str) -> Self {
        let next = collection
            .iter()
            .position(|el| el.id() == id)
            .and_then(|i| collection.get(i + 1));
        match next {
            Some(el) => InsertionAnchor::Before(el.id().to_string()),
            None => InsertionAnchor::End,
        }
    }
}

/// Index at which the dragged element is inserted once it has been removed
/// from `collection`.
///
/// Positions are counted among the elements other than `dragged_id`, so the
/// result is valid whether or not `collection` still contains it. An anchor
/// that names no element resolves to the end.
pub fn resolve_insertion_index<T: Identified>(
    collection: &[T],
    dragged_id: &str,
    anchor: &InsertionAnchor,
) -> usize {
    let mut index = 0;
    for el in collection {
        if let InsertionAnchor::Before(anchor_id) = anchor {
            if el.id() == anchor_id {
                return index;
            }
        }
        if el.id() != dragged_id {
            index += 1;
        }
    }
    index
}

/// On-screen extent of one element along the drag axis (x for lists, y for
/// cards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<'a> {
    pub id: &'a str,
    pub start: f64,
    pub length: f64,
}

impl Extent<'_> {
    fn midpoint(&self) -> f64 {
        self.start + self.length / 2.0
    }
}

/// Pick the anchor for a pointer position: the non-dragged element whose
/// midpoint is nearest ahead of the pointer, or the end if there is none.
pub fn anchor_from_pointer(elements: &[Extent<'_>], dragged_id: &str, pointer: f64) -> InsertionAnchor {
    elements
        .iter()
        .filter(|el| el.id != dragged_id)
        .map(|el| (el, pointer - el.midpoint()))
        .filter(|(_, offset)| *offset < 0.0)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(el, _)| InsertionAnchor::before(el.id))
        .unwrap_or(InsertionAnchor::End)
}

/// Transfer data carried by a dragged card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDragPayload {
    pub card_id: String,
    pub list_id: String,
}

impl CardDragPayload {
    pub fn new(list_id: impl Into<String>, card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            list_id: list_id.into(),
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// `None` for anything that is not a complete payload.
    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str::<CardDragPayload>(raw) {
            Ok(p) if !p.card_id.is_empty() && !p.list_id.is_empty() => Some(p),
            Ok(_) => None,
            Err(e) => {
                log::debug!("[planner.reorder] Unreadable card payload: {}", e);
                None
            }
        }
    }
}
