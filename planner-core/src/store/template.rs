use super::{required_text, BoardStore, StoreError, StoreResult};
use crate::duplicate::{instantiate_template, snapshot_card};
use crate::identity::generate_prefixed_id;
use crate::types::Template;

impl BoardStore {
    /// Snapshot a card under a template name. Later edits to the card do not
    /// reach the template.
    pub fn save_card_as_template(
        &mut self,
        list_id: &str,
        card_id: &str,
        name: &str,
    ) -> StoreResult<String> {
        let name = required_text(name, "Template name")?;
        let card = self.card_mut(list_id, card_id)?;
        let card_data = snapshot_card(card);
        let template = Template {
            id: generate_prefixed_id(&self.config.template_id_prefix),
            name,
            card_data,
        };
        let id = template.id.clone();
        log::debug!(
            "[planner.store.template] Saved card {} as template {} {:?}",
            card_id,
            id,
            template.name
        );
        self.board.templates.push(template);
        self.touch();
        Ok(id)
    }

    /// Append a fresh card built from the template to the list.
    pub fn create_card_from_template(&mut self, list_id: &str, template_id: &str) -> StoreResult<String> {
        let card = self
            .board
            .find_template(template_id)
            .map(|t| instantiate_template(&t.card_data))
            .ok_or_else(|| StoreError::TemplateNotFound(template_id.to_string()))?;
        let id = card.id.clone();
        self.list_mut(list_id)?.cards.push(card);
        log::debug!(
            "[planner.store.template] Created card {} from template {}",
            id,
            template_id
        );
        self.touch();
        Ok(id)
    }

    pub fn delete_template(&mut self, template_id: &str) -> StoreResult<Template> {
        let index = self
            .board
            .templates
            .iter()
            .position(|t| t.id == template_id)
            .ok_or_else(|| StoreError::TemplateNotFound(template_id.to_string()))?;
        let removed = self.board.templates.remove(index);
        self.touch();
        Ok(removed)
    }
}
