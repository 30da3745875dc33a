//! User-facing flows on top of [`BoardStore`].
//!
//! Destructive operations ask for confirmation and naming operations prompt
//! for text through a [`Decisions`] provider. A declined or cancelled
//! decision abandons the operation. Store failures are settled here: ids
//! that no longer resolve are ignored, rejected input becomes a notification.

use crate::store::{BoardStore, StoreError, StoreResult};

/// Yes/no, text-entry and message callbacks supplied by the front end.
pub trait Decisions {
    fn confirm(&mut self, message: &str) -> bool;

    /// `None` when the user cancels.
    fn prompt(&mut self, message: &str, initial: Option<&str>) -> Option<String>;

    fn notify(&mut self, message: &str);
}

pub const IMPORT_FAILED_MESSAGE: &str = "Error parsing JSON file.";

pub struct BoardController<D> {
    store: BoardStore,
    decisions: D,
}

impl<D: Decisions> BoardController<D> {
    pub fn new(store: BoardStore, decisions: D) -> Self {
        Self { store, decisions }
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Direct access for operations that need no decision.
    pub fn store_mut(&mut self) -> &mut BoardStore {
        &mut self.store
    }

    pub fn decisions(&self) -> &D {
        &self.decisions
    }

    pub fn into_parts(self) -> (BoardStore, D) {
        (self.store, self.decisions)
    }

    // ── Confirmed deletes ────────────────────────────────────────────────────

    pub fn delete_list(&mut self, list_id: &str) -> bool {
        if self.store.find_list(list_id).is_none() || !self.decisions.confirm("Delete this list?") {
            return false;
        }
        let result = self.store.delete_list(list_id);
        self.settle(result).is_some()
    }

    pub fn delete_card(&mut self, list_id: &str, card_id: &str) -> bool {
        if self.store.find_card(list_id, card_id).is_none()
            || !self.decisions.confirm("Delete this card?")
        {
            return false;
        }
        let result = self.store.delete_card(list_id, card_id);
        self.settle(result).is_some()
    }

    pub fn delete_checklist(&mut self, list_id: &str, card_id: &str, checklist_id: &str) -> bool {
        if self.store.find_checklist(list_id, card_id, checklist_id).is_none()
            || !self.decisions.confirm("Delete checklist?")
        {
            return false;
        }
        let result = self.store.delete_checklist(list_id, card_id, checklist_id);
        self.settle(result).is_some()
    }

    pub fn delete_checklist_item(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> bool {
        let exists = self
            .store
            .find_checklist(list_id, card_id, checklist_id)
            .is_some_and(|cl| cl.items.iter().any(|i| i.id == item_id));
        if !exists || !self.decisions.confirm("Delete this item?") {
            return false;
        }
        let result = self
            .store
            .delete_checklist_item(list_id, card_id, checklist_id, item_id);
        self.settle(result).is_some()
    }

    pub fn delete_tag(&mut self, tag_id: &str) -> bool {
        let Some(tag) = self.store.board().find_tag(tag_id) else {
            return false;
        };
        let message = format!(
            "Delete tag \"{}\" globally? This will remove it from all cards.",
            tag.text
        );
        if !self.decisions.confirm(&message) {
            return false;
        }
        let result = self.store.delete_global_tag(tag_id);
        self.settle(result).is_some()
    }

    pub fn delete_template(&mut self, template_id: &str) -> bool {
        if self.store.board().find_template(template_id).is_none()
            || !self.decisions.confirm("Delete template?")
        {
            return false;
        }
        let result = self.store.delete_template(template_id);
        self.settle(result).is_some()
    }

    // ── Prompted operations ──────────────────────────────────────────────────

    /// Ask for a name and create a board tag. Returns the new tag id.
    pub fn create_tag(&mut self) -> Option<String> {
        let name = self.prompt_text("Enter tag name:", None)?;
        let result = self.store.create_global_tag(&name);
        self.settle(result)
    }

    /// Create a tag from a card editor and attach it to that card.
    pub fn create_tag_for_card(&mut self, list_id: &str, card_id: &str) -> Option<String> {
        self.store.find_card(list_id, card_id)?;
        let tag_id = self.create_tag()?;
        let result = self.store.toggle_card_tag(list_id, card_id, &tag_id);
        self.settle(result)?;
        Some(tag_id)
    }

    pub fn rename_tag(&mut self, tag_id: &str) -> bool {
        let Some(current) = self.store.board().find_tag(tag_id).map(|t| t.text.clone()) else {
            return false;
        };
        let Some(name) = self.prompt_text("Edit Tag Name:", Some(&current)) else {
            return false;
        };
        let result = self.store.edit_global_tag(tag_id, &name);
        self.settle(result).is_some()
    }

    /// Ask for a template name and snapshot the card. Returns the template id.
    pub fn save_card_as_template(&mut self, list_id: &str, card_id: &str) -> Option<String> {
        self.store.find_card(list_id, card_id)?;
        let name = self.prompt_text("Enter a name for this template:", None)?;
        let result = self.store.save_card_as_template(list_id, card_id, &name);
        let id = self.settle(result)?;
        self.decisions
            .notify(&format!("Template \"{}\" saved!", name.trim()));
        Some(id)
    }

    // ── Import ───────────────────────────────────────────────────────────────

    /// Replace the document from exported JSON. A rejected payload leaves the
    /// document alone and tells the user.
    pub fn import(&mut self, raw: &str) -> bool {
        match self.store.import_json(raw) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[planner.controller] Import rejected: {}", e);
                self.decisions.notify(IMPORT_FAILED_MESSAGE);
                false
            }
        }
    }

    /// Prompt, treating a blank answer as a cancel.
    fn prompt_text(&mut self, message: &str, initial: Option<&str>) -> Option<String> {
        self.decisions
            .prompt(message, initial)
            .filter(|text| !text.trim().is_empty())
    }

    fn settle<T>(&mut self, result: StoreResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) if e.is_validation() => {
                log::info!("[planner.controller] Rejected: {}", e);
                self.decisions.notify(&user_message(&e));
                None
            }
            Err(e) => {
                log::debug!("[planner.controller] Ignored: {}", e);
                None
            }
        }
    }
}

fn user_message(error: &StoreError) -> String {
    match error {
        StoreError::DuplicateTag(_) => "Tag already exists!".to_string(),
        other => other.to_string(),
    }
}
