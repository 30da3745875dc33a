//! List and card moves driven by an insertion anchor.

use super::{BoardStore, StoreResult};
use crate::reorder::{resolve_insertion_index, CardDragPayload, InsertionAnchor};

impl BoardStore {
    /// Move a list to the anchored position. Returns its new index.
    pub fn move_list(&mut self, list_id: &str, anchor: &InsertionAnchor) -> StoreResult<usize> {
        let from = self.list_index(list_id)?;
        let lists = &mut self.board.lists;
        // Resolved while the list is still present so a self-anchor matches.
        let to = resolve_insertion_index(lists.as_slice(), list_id, anchor);
        let list = lists.remove(from);
        lists.insert(to, list);
        log::debug!("[planner.store.moves] Moved list {} from {} to {}", list_id, from, to);
        self.touch();
        Ok(to)
    }

    /// Move a card within its list or into another one. Both lists and the
    /// card are resolved before anything is removed. Returns the card's index
    /// in the target list.
    pub fn move_card(
        &mut self,
        origin_list_id: &str,
        card_id: &str,
        target_list_id: &str,
        anchor: &InsertionAnchor,
    ) -> StoreResult<usize> {
        let from = self.card_index(origin_list_id, card_id)?;
        let origin = self.list_index(origin_list_id)?;
        let target = self.list_index(target_list_id)?;

        // Resolved before removal: within one list a self-anchor keeps the
        // card in place, across lists it names nothing and means the end.
        let to = resolve_insertion_index(self.board.lists[target].cards.as_slice(), card_id, anchor);
        let card = self.board.lists[origin].cards.remove(from);
        self.board.lists[target].cards.insert(to, card);

        log::debug!(
            "[planner.store.moves] Moved card {} from {}[{}] to {}[{}]",
            card_id,
            origin_list_id,
            from,
            target_list_id,
            to
        );
        self.touch();
        Ok(to)
    }

    /// Complete a card drag from its raw transfer data. A missing or
    /// malformed payload, or one naming a card that no longer exists, cancels
    /// the drop. Returns whether anything moved.
    pub fn drop_card(&mut self, raw_payload: Option<&str>, target_list_id: &str, anchor: &InsertionAnchor) -> bool {
        let Some(payload) = raw_payload.and_then(CardDragPayload::decode) else {
            log::debug!("[planner.store.moves] Card drop cancelled: no usable payload");
            return false;
        };
        match self.move_card(&payload.list_id, &payload.card_id, target_list_id, anchor) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("[planner.store.moves] Card drop cancelled: {}", e);
                false
            }
        }
    }

    /// Complete a list drag. The transfer data is the bare list id.
    pub fn drop_list(&mut self, raw_payload: Option<&str>, anchor: &InsertionAnchor) -> bool {
        let Some(list_id) = raw_payload.map(str::trim).filter(|id| !id.is_empty()) else {
            log::debug!("[planner.store.moves] List drop cancelled: no payload");
            return false;
        };
        match self.move_list(list_id, anchor) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("[planner.store.moves] List drop cancelled: {}", e);
                false
            }
        }
    }
}
