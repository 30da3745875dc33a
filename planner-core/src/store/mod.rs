//! The board store: owner of the one in-memory board document.
//!
//! Every mutation goes through a `BoardStore` method. A successful mutation
//! bumps the store revision, which front ends use to decide when to
//! re-render; a failed one leaves the document untouched.

pub mod card;
pub mod checklist;
pub mod list;
pub mod moves;
pub mod tag;
pub mod template;

use crate::config::StoreConfig;
use crate::exchange::{self, ExchangeError};
use crate::identity::generate_id;
use crate::migrate::{self, MigrationReport};
use crate::types::{Board, Card, Checklist, List};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Card not found: {card_id} in list {list_id}")]
    CardNotFound { list_id: String, card_id: String },

    #[error("Checklist not found: {0}")]
    ChecklistNotFound(String),

    #[error("Checklist item not found: {0}")]
    ItemNotFound(String),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("{0} must not be empty")]
    EmptyText(&'static str),

    #[error("Tag already exists: {0}")]
    DuplicateTag(String),
}

impl StoreError {
    /// An id that did not resolve. Callers treat these as silent no-ops.
    pub fn is_not_found(&self) -> bool {
        !self.is_validation()
    }

    /// Rejected input. Callers surface a message to the user.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::EmptyText(_) | StoreError::DuplicateTag(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trim `text` and reject it when nothing is left.
pub(crate) fn required_text(text: &str, what: &'static str) -> StoreResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyText(what));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone)]
pub struct BoardStore {
    board: Board,
    config: StoreConfig,
    /// Monotonic, incremented on every successful mutation.
    revision: u64,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl BoardStore {
    /// A store holding the sample board a fresh editor opens with.
    pub fn new(config: StoreConfig) -> Self {
        let board = seed_board(&config);
        Self::with_board(board, config)
    }

    /// Wrap an existing document. Pending migrations run first.
    pub fn from_board(mut board: Board, config: StoreConfig) -> (Self, MigrationReport) {
        let report = migrate::apply_migrations(&mut board, &config);
        (Self::with_board(board, config), report)
    }

    fn with_board(board: Board, config: StoreConfig) -> Self {
        Self {
            board,
            config,
            revision: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // ── Import / export ──────────────────────────────────────────────────────

    /// Replace the whole document with an imported one. The payload is fully
    /// parsed, shape-checked and migrated before the swap; on error the
    /// current document is untouched.
    pub fn import_json(&mut self, raw: &str) -> Result<MigrationReport, ExchangeError> {
        let mut board = exchange::parse_document(raw)?;
        let report = migrate::apply_migrations(&mut board, &self.config);
        log::info!(
            "[planner.store.import] Imported board {:?}: {} lists, {} tags, {} templates",
            board.title,
            board.lists.len(),
            board.tags.len(),
            board.templates.len()
        );
        self.board = board;
        self.touch();
        Ok(report)
    }

    pub fn export_json(&self) -> Result<String, ExchangeError> {
        exchange::export_document(&self.board)
    }

    pub fn export_file_name(&self) -> String {
        exchange::export_file_name(&self.board.title, &self.config.export_extension)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn find_list(&self, list_id: &str) -> Option<&List> {
        self.board.lists.iter().find(|l| l.id == list_id)
    }

    pub fn find_card(&self, list_id: &str, card_id: &str) -> Option<&Card> {
        self.find_list(list_id)?
            .cards
            .iter()
            .find(|c| c.id == card_id)
    }

    pub fn find_checklist(
        &self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
    ) -> Option<&Checklist> {
        self.find_card(list_id, card_id)?
            .checklists
            .iter()
            .find(|cl| cl.id == checklist_id)
    }

    pub(crate) fn list_mut(&mut self, list_id: &str) -> StoreResult<&mut List> {
        self.board
            .lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| StoreError::ListNotFound(list_id.to_string()))
    }

    pub(crate) fn card_mut(&mut self, list_id: &str, card_id: &str) -> StoreResult<&mut Card> {
        self.list_mut(list_id)?
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| StoreError::CardNotFound {
                list_id: list_id.to_string(),
                card_id: card_id.to_string(),
            })
    }

    pub(crate) fn checklist_mut(
        &mut self,
        list_id: &str,
        card_id: &str,
        checklist_id: &str,
    ) -> StoreResult<&mut Checklist> {
        self.card_mut(list_id, card_id)?
            .checklists
            .iter_mut()
            .find(|cl| cl.id == checklist_id)
            .ok_or_else(|| StoreError::ChecklistNotFound(checklist_id.to_string()))
    }

    // ── Board ────────────────────────────────────────────────────────────────

    pub fn update_board_title(&mut self, title: &str) -> StoreResult<()> {
        let title = required_text(title, "Board title")?;
        self.board.title = title;
        self.touch();
        Ok(())
    }
}

/// The sample document a new editor starts from.
pub fn seed_board(config: &StoreConfig) -> Board {
    let mut card = Card::new(generate_id(), "Setup project structure".to_string());
    card.description = Some("Initialize the git repo.".to_string());

    let mut board = Board::new("My Project");
    board.lists.push(List {
        id: generate_id(),
        name: "To Do".to_string(),
        color: Some(config.default_list_color.clone()),
        cards: vec![card],
    });
    board
}
