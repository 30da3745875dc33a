use super::{required_text, BoardStore, StoreResult};
use crate::identity::generate_id;
use crate::types::List;

impl BoardStore {
    /// Append a new empty list. Returns its id.
    pub fn add_list(&mut self, name: &str) -> StoreResult<String> {
        let name = required_text(name, "List name")?;
        let list = List {
            id: generate_id(),
            name,
            color: Some(self.config.default_list_color.clone()),
            cards: Vec::new(),
        };
        let id = list.id.clone();
        log::debug!("[planner.store.list] Added list {} {:?}", id, list.name);
        self.board.lists.push(list);
        self.touch();
        Ok(id)
    }

    /// Remove a list together with every card it holds.
    pub fn delete_list(&mut self, list_id: &str) -> StoreResult<List> {
        let index = self.list_index(list_id)?;
        let removed = self.board.lists.remove(index);
        log::debug!(
            "[planner.store.list] Deleted list {} with {} cards",
            list_id,
            removed.cards.len()
        );
        self.touch();
        Ok(removed)
    }

    pub fn update_list_title(&mut self, list_id: &str, name: &str) -> StoreResult<()> {
        let name = required_text(name, "List name")?;
        self.list_mut(list_id)?.name = name;
        self.touch();
        Ok(())
    }

    /// Set or clear (`None`) the list color.
    pub fn update_list_color(&mut self, list_id: &str, color: Option<&str>) -> StoreResult<()> {
        self.list_mut(list_id)?.color = color.map(str::to_string);
        self.touch();
        Ok(())
    }

    pub(crate) fn list_index(&self, list_id: &str) -> StoreResult<usize> {
        self.board
            .lists
            .iter()
            .position(|l| l.id == list_id)
            .ok_or_else(|| super::StoreError::ListNotFound(list_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::empty_store;
    use super::super::StoreError;

    #[test]
    fn test_add_list_appends_empty_list() {
        let mut store = empty_store();
        for (n, name) in ["Backlog", " Doing ", "Done"].iter().enumerate() {
            let before = store.board().lists.len();
            let id = store.add_list(name).unwrap();
            assert_eq!(store.board().lists.len(), before + 1);
            let list = store.find_list(&id).unwrap();
            assert!(list.cards.is_empty());
            assert_eq!(list.name, name.trim());
            assert_eq!(list.color.as_deref(), Some("#ebecf0"));
            assert_eq!(store.board().lists[n].id, id);
        }
    }

    #[test]
    fn test_add_list_rejects_blank_name() {
        let mut store = empty_store();
        assert_eq!(store.add_list("  "), Err(StoreError::EmptyText("List name")));
        assert!(store.board().lists.is_empty());
    }

    #[test]
    fn test_delete_list_drops_its_cards() {
        let mut store = empty_store();
        let keep = store.add_list("Keep").unwrap();
        let gone = store.add_list("Gone").unwrap();
        let card = store.add_card(&gone, "Orphan?").unwrap();

        let removed = store.delete_list(&gone).unwrap();
        assert_eq!(removed.cards.len(), 1);
        assert!(store.find_list(&gone).is_none());
        assert!(store.find_card(&gone, &card).is_none());
        assert!(store.board().all_cards().all(|c| c.id != card));
        assert!(store.find_list(&keep).is_some());

        assert_eq!(
            store.delete_list(&gone),
            Err(StoreError::ListNotFound(gone.clone()))
        );
    }

    #[test]
    fn test_update_list_title_and_color() {
        let mut store = empty_store();
        let id = store.add_list("Todo").unwrap();

        store.update_list_title(&id, "Ideas").unwrap();
        assert!(store.update_list_title(&id, "").is_err());
        assert_eq!(store.find_list(&id).unwrap().name, "Ideas");

        store.update_list_color(&id, Some("#c377e0")).unwrap();
        assert_eq!(store.find_list(&id).unwrap().color.as_deref(), Some("#c377e0"));
        store.update_list_color(&id, None).unwrap();
        assert_eq!(store.find_list(&id).unwrap().color, None);

        assert!(store.update_list_color("missing", None).unwrap_err().is_not_found());
    }
}
