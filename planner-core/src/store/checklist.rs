use super::{required_text, BoardStore, StoreError, StoreResult};
use crate::duplicate::duplicate_checklist;
use crate::identity::generate_id;
use crate::types::{Checklist, ChecklistItem};

impl BoardStore {
    pub fn add_checklist(&mut self, list_id: &str, card_id: &str, title: &str) -> StoreResult<String> {
        let title = required_text(title, "Checklist title")?;
        let card = self.card_mut(list_id, card_id)?;
        let checklist = Checklist {
            id: generate_id(),
            title,
            items: Vec::new(),
        };
        let id = checklist.id.clone();
        card.checklists.push(checklist);
        self.touch();
        Ok(id)
    }

    pub fn delete_checklist(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
    ) -> StoreResult<Checklist> {
        let card = self.card_mut(list_id, card_id)?;
        let index = card
            .checklists
            .iter()
            .position(|cl| cl.id == checklist_id)
            .ok_or_else(|| StoreError::ChecklistNotFound(checklist_id.to_string()))?;
        let removed = card.checklists.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Deep-copy a checklist right after the original, with fresh ids.
    pub fn clone_checklist(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
    ) -> StoreResult<String> {
        let suffix = self.config.copy_suffix.clone();
        let card = self.card_mut(list_id, card_id)?;
        let index = card
            .checklists
            .iter()
            .position(|cl| cl.id == checklist_id)
            .ok_or_else(|| StoreError::ChecklistNotFound(checklist_id.to_string()))?;

        let mut copy = duplicate_checklist(&card.checklists[index]);
        copy.title.push_str(&suffix);
        let id = copy.id.clone();
        card.checklists.insert(index + 1, copy);
        self.touch();
        Ok(id)
    }

    pub fn update_checklist_title(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
        title: &str,
    ) -> StoreResult<()> {
        let title = required_text(title, "Checklist title")?;
        self.checklist_mut(list_id, card_id, checklist_id)?.title = title;
        self.touch();
        Ok(())
    }

    pub fn add_checklist_item(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
        text: &str,
    ) -> StoreResult<String> {
        let text = required_text(text, "Item text")?;
        let checklist = self.checklist_mut(list_id, card_id, checklist_id)?;
        let item = ChecklistItem {
            id: generate_id(),
            text,
            done: false,
        };
        let id = item.id.clone();
        checklist.items.push(item);
        self.touch();
        Ok(id)
    }

    pub fn delete_checklist_item(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> StoreResult<ChecklistItem> {
        let checklist = self.checklist_mut(list_id, card_id, checklist_id)?;
        let index = checklist
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))?;
        let removed = checklist.items.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Flip an item's `done` flag. Returns the new state.
    pub fn toggle_checklist_item(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> StoreResult<bool> {
        let item = self.item_mut(list_id, card_id, checklist_id, item_id)?;
        item.done = !item.done;
        let done = item.done;
        self.touch();
        Ok(done)
    }

    pub fn update_checklist_item_text(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
        item_id: &str,
        text: &str,
    ) -> StoreResult<()> {
        let text = required_text(text, "Item text")?;
        self.item_mut(list_id, card_id, checklist_id, item_id)?.text = text;
        self.touch();
        Ok(())
    }

    fn item_mut(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> StoreResult<&mut ChecklistItem> {
        self.checklist_mut(list_id, card_id, checklist_id)?
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::empty_store;
    use super::*;
    use crate::types::ChecklistProgress;

    #[test]
    fn test_groceries_scenario_progress() {
        let mut store = empty_store();
        let list = store.add_list("To Do").unwrap();
        let card = store.add_card(&list, "Buy milk").unwrap();

        let cl = store.add_checklist(&list, &card, "Groceries").unwrap();
        let item = store.add_checklist_item(&list, &card, &cl, "Milk").unwrap();
        assert_eq!(
            store.find_card(&list, &card).unwrap().checklist_progress(),
            ChecklistProgress { total: 1, done: 0 }
        );

        assert!(store.toggle_checklist_item(&list, &card, &cl, &item).unwrap());
        assert_eq!(
            store.find_card(&list, &card).unwrap().checklist_progress(),
            ChecklistProgress { total: 1, done: 1 }
        );

        assert!(!store.toggle_checklist_item(&list, &card, &cl, &item).unwrap());
    }

    #[test]
    fn test_clone_checklist_places_copy_after_original() {
        let mut store = empty_store();
        let list = store.add_list("L").unwrap();
        let card = store.add_card(&list, "C").unwrap();
        let a = store.add_checklist(&list, &card, "A").unwrap();
        let b = store.add_checklist(&list, &card, "B").unwrap();
        let item = store.add_checklist_item(&list, &card, &a, "x").unwrap();

        let copy = store.clone_checklist(&list, &card, &a).unwrap();

        let checklists = &store.find_card(&list, &card).unwrap().checklists;
        let order: Vec<&str> = checklists.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec![a.as_str(), copy.as_str(), b.as_str()]);
        assert_eq!(checklists[1].title, "A (Copy)");
        assert_eq!(checklists[1].items[0].text, "x");
        assert_ne!(checklists[1].items[0].id, item);
    }

    #[test]
    fn test_item_edits_and_deletes() {
        let mut store = empty_store();
        let list = store.add_list("L").unwrap();
        let card = store.add_card(&list, "C").unwrap();
        let cl = store.add_checklist(&list, &card, "Steps").unwrap();
        let one = store.add_checklist_item(&list, &card, &cl, "one").unwrap();
        let two = store.add_checklist_item(&list, &card, &cl, "two").unwrap();

        store.update_checklist_item_text(&list, &card, &cl, &one, "first").unwrap();
        assert!(store.update_checklist_item_text(&list, &card, &cl, &one, " ").is_err());
        store.delete_checklist_item(&list, &card, &cl, &two).unwrap();

        let checklist = store.find_checklist(&list, &card, &cl).unwrap();
        assert_eq!(checklist.items.len(), 1);
        assert_eq!(checklist.items[0].text, "first");

        assert_eq!(
            store.delete_checklist_item(&list, &card, &cl, &two),
            Err(StoreError::ItemNotFound(two.clone()))
        );
    }

    #[test]
    fn test_checklist_title_and_delete() {
        let mut store = empty_store();
        let list = store.add_list("L").unwrap();
        let card = store.add_card(&list, "C").unwrap();
        let cl = store.add_checklist(&list, &card, "Steps").unwrap();

        store.update_checklist_title(&list, &card, &cl, "Plan").unwrap();
        assert_eq!(store.find_checklist(&list, &card, &cl).unwrap().title, "Plan");

        store.delete_checklist(&list, &card, &cl).unwrap();
        assert!(store.find_checklist(&list, &card, &cl).is_none());
        assert!(store
            .delete_checklist(&list, &card, &cl)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_missing_parents_are_not_found() {
        let mut store = empty_store();
        let list = store.add_list("L").unwrap();
        assert!(store.add_checklist(&list, "ghost", "x").unwrap_err().is_not_found());
        assert!(store
            .toggle_checklist_item(&list, "ghost", "cl", "it")
            .unwrap_err()
            .is_not_found());
    }
}
