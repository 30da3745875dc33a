use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Anything addressable by a short opaque id inside a board.
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Completion counts for this checklist alone (the `(done/total)` header).
    pub fn progress(&self) -> ChecklistProgress {
        ChecklistProgress {
            total: self.items.len(),
            done: self.items.iter().filter(|item| item.done).count(),
        }
    }
}

/// A tag as older documents embedded it directly inside a card.
/// Only read during migration; never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyTag {
    Embedded {
        text: String,
        /// Kept raw: a non-string color still migrates, with the fallback.
        #[serde(default)]
        color: Option<serde_json::Value>,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    /// Pre-`tagIds` representation; cleared by the schema migration.
    #[serde(default, rename = "tags", skip_serializing_if = "Option::is_none")]
    pub legacy_tags: Option<Vec<LegacyTag>>,
}

impl Card {
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            description: None,
            color: None,
            tag_ids: Vec::new(),
            checklists: Vec::new(),
            legacy_tags: None,
        }
    }

    /// Completion counts summed over every checklist on the card.
    pub fn checklist_progress(&self) -> ChecklistProgress {
        self.checklists
            .iter()
            .map(Checklist::progress)
            .fold(ChecklistProgress::default(), |acc, p| ChecklistProgress {
                total: acc.total + p.total,
                done: acc.done + p.done,
            })
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids.iter().any(|id| id == tag_id)
    }
}

/// A card snapshot stored inside a template: everything but the card id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCard {
    pub text: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default, rename = "tags", skip_serializing_if = "Option::is_none")]
    pub legacy_tags: Option<Vec<LegacyTag>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub card_data: TemplateCard,
}

/// Comparison key for tag names: NFC-composed and lowercased, so "Café"
/// typed with a combining accent still matches an existing "café".
pub fn tag_key(text: &str) -> String {
    text.trim().nfc().collect::<String>().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl List {
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub templates: Vec<Template>,
    pub lists: Vec<List>,
    /// Absent in documents written before schema versioning (treated as 0).
    #[serde(default)]
    pub schema_version: u32,
}

impl Board {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
            templates: Vec::new(),
            lists: Vec::new(),
            schema_version: crate::migrate::latest_version(),
        }
    }

    pub fn find_tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == tag_id)
    }

    /// Case-insensitive lookup by tag text.
    pub fn find_tag_by_text(&self, text: &str) -> Option<&Tag> {
        let key = tag_key(text);
        self.tags.iter().find(|t| tag_key(&t.text) == key)
    }

    pub fn find_template(&self, template_id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    /// Tags referenced by a card, in `tag_ids` order. Dangling ids are skipped.
    pub fn card_tags<'a>(&'a self, card: &'a Card) -> impl Iterator<Item = &'a Tag> + 'a {
        card.tag_ids.iter().filter_map(move |id| self.find_tag(id))
    }

    /// Every card on the board, list by list.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.lists.iter().flat_map(|list| list.cards.iter())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistProgress {
    pub total: usize,
    pub done: usize,
}

impl ChecklistProgress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_identified!(List, Card, Checklist, ChecklistItem, Tag, Template);
