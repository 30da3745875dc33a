//! Board-global tags and the cascades that keep card references consistent.

use super::{required_text, BoardStore, StoreError, StoreResult};
use crate::identity::generate_id;
use crate::types::Tag;

impl BoardStore {
    /// Create a tag with the next palette color. Names are unique
    /// case-insensitively; a duplicate is rejected without any change.
    pub fn create_global_tag(&mut self, text: &str) -> StoreResult<String> {
        let text = required_text(text, "Tag name")?;
        if let Some(existing) = self.board.find_tag_by_text(&text) {
            log::info!(
                "[planner.store.tag] Rejected duplicate tag {:?} (exists as {})",
                text,
                existing.id
            );
            return Err(StoreError::DuplicateTag(existing.text.clone()));
        }

        let tag = Tag {
            id: generate_id(),
            text,
            color: self.config.palette_color(self.board.tags.len()),
        };
        let id = tag.id.clone();
        log::debug!("[planner.store.tag] Created tag {} {:?}", id, tag.text);
        self.board.tags.push(tag);
        self.touch();
        Ok(id)
    }

    /// Rename a tag in place. Cards reference it by id so they follow.
    pub fn edit_global_tag(&mut self, tag_id: &str, text: &str) -> StoreResult<()> {
        let text = required_text(text, "Tag name")?;
        let tag = self
            .board
            .tags
            .iter_mut()
            .find(|t| t.id == tag_id)
            .ok_or_else(|| StoreError::TagNotFound(tag_id.to_string()))?;
        tag.text = text;
        self.touch();
        Ok(())
    }

    /// Remove a tag from the board and from every card and template that
    /// references it. Returns the removed tag.
    pub fn delete_global_tag(&mut self, tag_id: &str) -> StoreResult<Tag> {
        let index = self
            .board
            .tags
            .iter()
            .position(|t| t.id == tag_id)
            .ok_or_else(|| StoreError::TagNotFound(tag_id.to_string()))?;
        let removed = self.board.tags.remove(index);

        let mut detached = 0;
        let referencing = self
            .board
            .lists
            .iter_mut()
            .flat_map(|list| list.cards.iter_mut())
            .map(|card| &mut card.tag_ids)
            .chain(
                self.board
                    .templates
                    .iter_mut()
                    .map(|t| &mut t.card_data.tag_ids),
            );
        for tag_ids in referencing {
            let before = tag_ids.len();
            tag_ids.retain(|id| id != tag_id);
            detached += before - tag_ids.len();
        }

        log::debug!(
            "[planner.store.tag] Deleted tag {} {:?}, detached from {} cards",
            tag_id,
            removed.text,
            detached
        );
        self.touch();
        Ok(removed)
    }

    /// Attach the tag if the card lacks it, detach it otherwise. Returns
    /// whether the tag is attached afterwards.
    pub fn toggle_card_tag(&mut self, list_id: &str, card_id: &str, tag_id: &str) -> StoreResult<bool> {
        let card = self.card_mut(list_id, card_id)?;
        let attached = if card.has_tag(tag_id) {
            card.tag_ids.retain(|id| id != tag_id);
            false
        } else {
            card.tag_ids.push(tag_id.to_string());
            true
        };
        self.touch();
        Ok(attached)
    }
}
