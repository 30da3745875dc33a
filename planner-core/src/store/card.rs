use super::{required_text, BoardStore, StoreError, StoreResult};
use crate::duplicate::duplicate_card;
use crate::identity::generate_id;
use crate::types::Card;

impl BoardStore {
    /// Append a new card (no checklists, no tags). Returns its id.
    pub fn add_card(&mut self, list_id: &str, text: &str) -> StoreResult<String> {
        let text = required_text(text, "Card text")?;
        let list = self.list_mut(list_id)?;
        let card = Card::new(generate_id(), text);
        let id = card.id.clone();
        list.cards.push(card);
        log::debug!("[planner.store.card] Added card {} to list {}", id, list_id);
        self.touch();
        Ok(id)
    }

    pub fn delete_card(&mut self, list_id: &str, card_id: &str) -> StoreResult<Card> {
        let index = self.card_index(list_id, card_id)?;
        let removed = self.list_mut(list_id)?.cards.remove(index);
        log::debug!("[planner.store.card] Deleted card {} from list {}", card_id, list_id);
        self.touch();
        Ok(removed)
    }

    pub fn update_card_title(&mut self, list_id: &str, card_id: &str, text: &str) -> StoreResult<()> {
        let text = required_text(text, "Card text")?;
        self.card_mut(list_id, card_id)?.text = text;
        self.touch();
        Ok(())
    }

    /// Set or clear (`None`) the card color label.
    pub fn update_card_color(
        &mut self,
        list_id: &str,
        card_id: &str,
        color: Option<&str>,
    ) -> StoreResult<()> {
        self.card_mut(list_id, card_id)?.color = color.map(str::to_string);
        self.touch();
        Ok(())
    }

    /// Store the description verbatim; a blank one clears it.
    pub fn update_card_description(
        &mut self,
        list_id: &str,
        card_id: &str,
        description: &str,
    ) -> StoreResult<()> {
        let card = self.card_mut(list_id, card_id)?;
        card.description = if description.trim().is_empty() {
            None
        } else {
            Some(description.to_string())
        };
        self.touch();
        Ok(())
    }

    /// Deep-copy a card right after the original. The copy gets fresh ids at
    /// every level, keeps the tag references, and a suffixed title.
    pub fn clone_card(&mut self, list_id: &str, card_id: &str) -> StoreResult<String> {
        let index = self.card_index(list_id, card_id)?;
        let suffix = self.config.copy_suffix.clone();
        let list = self.list_mut(list_id)?;

        let mut copy = duplicate_card(&list.cards[index]);
        copy.text.push_str(&suffix);
        let id = copy.id.clone();
        list.cards.insert(index + 1, copy);

        log::debug!("[planner.store.card] Cloned card {} as {}", card_id, id);
        self.touch();
        Ok(id)
    }

    pub(crate) fn card_index(&self, list_id: &str, card_id: &str) -> StoreResult<usize> {
        self.find_list(list_id)
            .ok_or_else(|| StoreError::ListNotFound(list_id.to_string()))?
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| StoreError::CardNotFound {
                list_id: list_id.to_string(),
                card_id: card_id.to_string(),
            })
    }
}
