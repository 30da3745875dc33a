//! Structural copies with id regeneration.
//!
//! Every function here returns a deep copy whose owned entities (card,
//! checklists, items) all carry freshly generated ids. Tag references are
//! copied by id; tags themselves belong to the board and are never copied.

use crate::identity::generate_id;
use crate::types::{Card, Checklist, ChecklistItem, TemplateCard};

pub fn duplicate_item(item: &ChecklistItem) -> ChecklistItem {
    ChecklistItem {
        id: generate_id(),
        text: item.text.clone(),
        done: item.done,
    }
}

pub fn duplicate_checklist(checklist: &Checklist) -> Checklist {
    Checklist {
        id: generate_id(),
        title: checklist.title.clone(),
        items: checklist.items.iter().map(duplicate_item).collect(),
    }
}

pub fn duplicate_card(card: &Card) -> Card {
    Card {
        id: generate_id(),
        text: card.text.clone(),
        description: card.description.clone(),
        color: card.color.clone(),
        tag_ids: card.tag_ids.clone(),
        checklists: card.checklists.iter().map(duplicate_checklist).collect(),
        legacy_tags: card.legacy_tags.clone(),
    }
}

/// Snapshot a card for a template. Nested ids are kept as-is; they are
/// regenerated every time the template is instantiated.
pub fn snapshot_card(card: &Card) -> TemplateCard {
    TemplateCard {
        text: card.text.clone(),
        description: card.description.clone(),
        color: card.color.clone(),
        tag_ids: card.tag_ids.clone(),
        checklists: card.checklists.clone(),
        legacy_tags: None,
    }
}

/// Stamp out a new card from a template snapshot.
pub fn instantiate_template(data: &TemplateCard) -> Card {
    Card {
        id: generate_id(),
        text: data.text.clone(),
        description: data.description.clone(),
        color: data.color.clone(),
        tag_ids: data.tag_ids.clone(),
        checklists: data.checklists.iter().map(duplicate_checklist).collect(),
        legacy_tags: None,
    }
}
