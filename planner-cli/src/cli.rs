//! Command-line surface: argument parsing and command dispatch.
//!
//! Lists, cards, checklists, items, tags and templates may be named by id or
//! by their (case-insensitive) name; ids win when both match.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use planner_core::{BoardController, BoardStore, Decisions, InsertionAnchor, StoreConfig};

use crate::board_file;
use crate::render::render_board;

#[derive(Parser)]
#[command(name = "planner", version, about = "Kanban boards kept in a JSON file")]
pub struct Cli {
    /// Config file (default: ~/.config/planner/config.json)
    #[arg(long, global = true, env = "PLANNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a board file holding the sample board
    New {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the board
    Show {
        file: PathBuf,
        /// Print the exchange JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Rename the board
    Rename { file: PathBuf, title: String },
    AddList { file: PathBuf, name: String },
    RenameList { file: PathBuf, list: String, name: String },
    DeleteList { file: PathBuf, list: String },
    /// Move a list before another one, or to the end
    MoveList {
        file: PathBuf,
        list: String,
        #[arg(long)]
        before: Option<String>,
    },
    AddCard {
        file: PathBuf,
        list: String,
        text: String,
        #[arg(long)]
        description: Option<String>,
    },
    EditCard {
        file: PathBuf,
        list: String,
        card: String,
        #[arg(long)]
        text: Option<String>,
        /// An empty value clears the description
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "clear_color")]
        color: Option<String>,
        #[arg(long)]
        clear_color: bool,
    },
    DeleteCard { file: PathBuf, list: String, card: String },
    CloneCard { file: PathBuf, list: String, card: String },
    /// Move a card within its list or to another list
    MoveCard {
        file: PathBuf,
        list: String,
        card: String,
        /// Target list (default: same list)
        #[arg(long)]
        to: Option<String>,
        /// Card in the target list to land before (default: end)
        #[arg(long)]
        before: Option<String>,
    },
    AddChecklist { file: PathBuf, list: String, card: String, title: String },
    CloneChecklist { file: PathBuf, list: String, card: String, checklist: String },
    DeleteChecklist { file: PathBuf, list: String, card: String, checklist: String },
    AddItem {
        file: PathBuf,
        list: String,
        card: String,
        checklist: String,
        text: String,
    },
    /// Toggle a checklist item
    Check {
        file: PathBuf,
        list: String,
        card: String,
        checklist: String,
        item: String,
    },
    DeleteItem {
        file: PathBuf,
        list: String,
        card: String,
        checklist: String,
        item: String,
    },
    /// Create a board tag (prompts when no name is given)
    NewTag {
        file: PathBuf,
        name: Option<String>,
        /// Attach the new tag to this card (needs --list)
        #[arg(long, requires = "list")]
        card: Option<String>,
        #[arg(long, requires = "card")]
        list: Option<String>,
    },
    /// Toggle a tag on a card
    Tag { file: PathBuf, list: String, card: String, tag: String },
    RenameTag { file: PathBuf, tag: String, name: Option<String> },
    DeleteTag { file: PathBuf, tag: String },
    SaveTemplate {
        file: PathBuf,
        list: String,
        card: String,
        name: Option<String>,
    },
    FromTemplate { file: PathBuf, list: String, template: String },
    DeleteTemplate { file: PathBuf, template: String },
    /// Replace the board with an exported document
    Import { file: PathBuf, source: PathBuf },
    /// Write the board as <title>.plnpro
    Export {
        file: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Bring the file up to the current schema
    Migrate {
        file: PathBuf,
        #[arg(long)]
        dry_run: bool,
    },
}

impl Command {
    pub fn file(&self) -> &Path {
        match self {
            Command::New { file, .. }
            | Command::Show { file, .. }
            | Command::Rename { file, .. }
            | Command::AddList { file, .. }
            | Command::RenameList { file, .. }
            | Command::DeleteList { file, .. }
            | Command::MoveList { file, .. }
            | Command::AddCard { file, .. }
            | Command::EditCard { file, .. }
            | Command::DeleteCard { file, .. }
            | Command::CloneCard { file, .. }
            | Command::MoveCard { file, .. }
            | Command::AddChecklist { file, .. }
            | Command::CloneChecklist { file, .. }
            | Command::DeleteChecklist { file, .. }
            | Command::AddItem { file, .. }
            | Command::Check { file, .. }
            | Command::DeleteItem { file, .. }
            | Command::NewTag { file, .. }
            | Command::Tag { file, .. }
            | Command::RenameTag { file, .. }
            | Command::DeleteTag { file, .. }
            | Command::SaveTemplate { file, .. }
            | Command::FromTemplate { file, .. }
            | Command::DeleteTemplate { file, .. }
            | Command::Import { file, .. }
            | Command::Export { file, .. }
            | Command::Migrate { file, .. } => file,
        }
    }

    /// A name given on the command line answers the command's prompt.
    pub fn preset_answer(&self) -> Option<String> {
        match self {
            Command::NewTag { name, .. }
            | Command::RenameTag { name, .. }
            | Command::SaveTemplate { name, .. } => name.clone(),
            _ => None,
        }
    }
}

/// Run one command against its board file, writing results to `out`.
pub fn execute<D: Decisions, W: Write>(
    command: Command,
    config: &StoreConfig,
    decisions: D,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::New { file, title, force } => {
            let mut store = BoardStore::new(config.clone());
            if let Some(title) = title {
                store.update_board_title(&title)?;
            }
            board_file::create(&file, &store, force)?;
            writeln!(out, "Created {}", file.display())?;
        }
        Command::Show { file, json } => {
            let (store, _) = board_file::load(&file, config)?;
            if json {
                writeln!(out, "{}", store.export_json()?)?;
            } else {
                write!(out, "{}", render_board(store.board()))?;
            }
        }
        Command::Export { file, out_dir } => {
            let (store, _) = board_file::load(&file, config)?;
            let dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
            let target = dir.join(store.export_file_name());
            board_file::save(&target, &store)?;
            writeln!(out, "Exported {}", target.display())?;
        }
        Command::Migrate { file, dry_run } => {
            let (store, report) = board_file::load(&file, config)?;
            if report.is_noop() {
                writeln!(out, "Already at schema {}", report.to_version)?;
                return Ok(());
            }
            writeln!(
                out,
                "Schema {} -> {}: {} ({} cards, {} new tags)",
                report.from_version,
                report.to_version,
                report.applied.join(", "),
                report.stats.cards_migrated,
                report.stats.tags_created
            )?;
            if !dry_run {
                board_file::save(&file, &store)?;
            }
        }
        Command::Import { file, source } => {
            let raw = fs::read_to_string(&source)
                .with_context(|| format!("Cannot read {}", source.display()))?;
            let store = if file.exists() {
                board_file::load(&file, config)?.0
            } else {
                BoardStore::new(config.clone())
            };
            let mut ctl = BoardController::new(store, decisions);
            if !ctl.import(&raw) {
                bail!("{} is not a board document", source.display());
            }
            board_file::save(&file, ctl.store())?;
            writeln!(out, "Imported {} into {}", source.display(), file.display())?;
        }
        other => edit(other, config, decisions, out)?,
    }
    Ok(())
}

/// Load, apply one mutation, and save only if the board changed.
fn edit<D: Decisions, W: Write>(
    command: Command,
    config: &StoreConfig,
    decisions: D,
    out: &mut W,
) -> Result<()> {
    let file = command.file().to_path_buf();
    let (store, _) = board_file::load(&file, config)?;
    let before = store.revision();
    let mut ctl = BoardController::new(store, decisions);

    let message = apply(command, &mut ctl)?;

    if ctl.store().revision() != before {
        board_file::save(&file, ctl.store())?;
    }
    writeln!(out, "{}", message.unwrap_or_else(|| "Cancelled.".to_string()))?;
    Ok(())
}

/// Apply a mutation. `None` means the user declined or cancelled.
fn apply<D: Decisions>(command: Command, ctl: &mut BoardController<D>) -> Result<Option<String>> {
    let done = |ok: bool, what: &str| ok.then(|| what.to_string());

    let message = match command {
        Command::Rename { title, .. } => {
            ctl.store_mut().update_board_title(&title)?;
            Some(format!("Renamed board to {}", title.trim()))
        }
        Command::AddList { name, .. } => Some(ctl.store_mut().add_list(&name)?),
        Command::RenameList { list, name, .. } => {
            let list = list_id(ctl.store(), &list)?;
            ctl.store_mut().update_list_title(&list, &name)?;
            Some(list)
        }
        Command::DeleteList { list, .. } => {
            let list = list_id(ctl.store(), &list)?;
            done(ctl.delete_list(&list), "Deleted list")
        }
        Command::MoveList { list, before, .. } => {
            let list = list_id(ctl.store(), &list)?;
            let anchor = match before {
                Some(before) => InsertionAnchor::Before(list_id(ctl.store(), &before)?),
                None => InsertionAnchor::End,
            };
            let index = ctl.store_mut().move_list(&list, &anchor)?;
            Some(format!("Moved list to position {}", index + 1))
        }
        Command::AddCard {
            list, text, description, ..
        } => {
            let list = list_id(ctl.store(), &list)?;
            let card = ctl.store_mut().add_card(&list, &text)?;
            if let Some(description) = description {
                ctl.store_mut()
                    .update_card_description(&list, &card, &description)?;
            }
            Some(card)
        }
        Command::EditCard {
            list,
            card,
            text,
            description,
            color,
            clear_color,
            ..
        } => {
            let list = list_id(ctl.store(), &list)?;
            let card = card_id(ctl.store(), &list, &card)?;
            let store = ctl.store_mut();
            if let Some(text) = text {
                store.update_card_title(&list, &card, &text)?;
            }
            if let Some(description) = description {
                store.update_card_description(&list, &card, &description)?;
            }
            if clear_color {
                store.update_card_color(&list, &card, None)?;
            } else if let Some(color) = color {
                store.update_card_color(&list, &card, Some(&color))?;
            }
            Some(card)
        }
        Command::DeleteCard { list, card, .. } => {
            let list = list_id(ctl.store(), &list)?;
            let card = card_id(ctl.store(), &list, &card)?;
            done(ctl.delete_card(&list, &card), "Deleted card")
        }
        Command::CloneCard { list, card, .. } => {
            let list = list_id(ctl.store(), &list)?;
            let card = card_id(ctl.store(), &list, &card)?;
            Some(ctl.store_mut().clone_card(&list, &card)?)
        }
        Command::MoveCard {
            list, card, to, before, ..
        } => {
            let origin = list_id(ctl.store(), &list)?;
            let card = card_id(ctl.store(), &origin, &card)?;
            let target = match to {
                Some(to) => list_id(ctl.store(), &to)?,
                None => origin.clone(),
            };
            let anchor = match before {
                Some(before) => InsertionAnchor::Before(card_id(ctl.store(), &target, &before)?),
                None => InsertionAnchor::End,
            };
            let index = ctl.store_mut().move_card(&origin, &card, &target, &anchor)?;
            Some(format!("Moved card to position {}", index + 1))
        }
        Command::AddChecklist {
            list, card, title, ..
        } => {
            let list = list_id(ctl.store(), &list)?;
            let card = card_id(ctl.store(), &list, &card)?;
            Some(ctl.store_mut().add_checklist(&list, &card, &title)?)
        }
        Command::CloneChecklist {
            list, card, checklist, ..
        } => {
            let (list, card, checklist) = checklist_path(ctl.store(), &list, &card, &checklist)?;
            Some(ctl.store_mut().clone_checklist(&list, &card, &checklist)?)
        }
        Command::DeleteChecklist {
            list, card, checklist, ..
        } => {
            let (list, card, checklist) = checklist_path(ctl.store(), &list, &card, &checklist)?;
            done(ctl.delete_checklist(&list, &card, &checklist), "Deleted checklist")
        }
        Command::AddItem {
            list,
            card,
            checklist,
            text,
            ..
        } => {
            let (list, card, checklist) = checklist_path(ctl.store(), &list, &card, &checklist)?;
            Some(ctl.store_mut().add_checklist_item(&list, &card, &checklist, &text)?)
        }
        Command::Check {
            list,
            card,
            checklist,
            item,
            ..
        } => {
            let (list, card, checklist) = checklist_path(ctl.store(), &list, &card, &checklist)?;
            let item = item_id(ctl.store(), &list, &card, &checklist, &item)?;
            let now = ctl
                .store_mut()
                .toggle_checklist_item(&list, &card, &checklist, &item)?;
            Some(if now { "Done" } else { "Not done" }.to_string())
        }
        Command::DeleteItem {
            list,
            card,
            checklist,
            item,
            ..
        } => {
            let (list, card, checklist) = checklist_path(ctl.store(), &list, &card, &checklist)?;
            let item = item_id(ctl.store(), &list, &card, &checklist, &item)?;
            done(ctl.delete_checklist_item(&list, &card, &checklist, &item), "Deleted item")
        }
        Command::NewTag { list, card, .. } => match (list, card) {
            (Some(list), Some(card)) => {
                let list = list_id(ctl.store(), &list)?;
                let card = card_id(ctl.store(), &list, &card)?;
                ctl.create_tag_for_card(&list, &card)
            }
            _ => ctl.create_tag(),
        },
        Command::Tag { list, card, tag, .. } => {
            let list = list_id(ctl.store(), &list)?;
            let card = card_id(ctl.store(), &list, &card)?;
            let tag = tag_id(ctl.store(), &tag)?;
            let attached = ctl.store_mut().toggle_card_tag(&list, &card, &tag)?;
            Some(if attached { "Tagged" } else { "Untagged" }.to_string())
        }
        Command::RenameTag { tag, .. } => {
            let tag = tag_id(ctl.store(), &tag)?;
            done(ctl.rename_tag(&tag), "Renamed tag")
        }
        Command::DeleteTag { tag, .. } => {
            let tag = tag_id(ctl.store(), &tag)?;
            done(ctl.delete_tag(&tag), "Deleted tag")
        }
        Command::SaveTemplate { list, card, .. } => {
            let list = list_id(ctl.store(), &list)?;
            let card = card_id(ctl.store(), &list, &card)?;
            ctl.save_card_as_template(&list, &card)
        }
        Command::FromTemplate { list, template, .. } => {
            let list = list_id(ctl.store(), &list)?;
            let template = template_id(ctl.store(), &template)?;
            Some(ctl.store_mut().create_card_from_template(&list, &template)?)
        }
        Command::DeleteTemplate { template, .. } => {
            let template = template_id(ctl.store(), &template)?;
            done(ctl.delete_template(&template), "Deleted template")
        }
        Command::New { .. }
        | Command::Show { .. }
        | Command::Export { .. }
        | Command::Migrate { .. }
        | Command::Import { .. } => bail!("not an edit command"),
    };
    Ok(message)
}

// ── Reference resolution ─────────────────────────────────────────────────────

fn pick<'a, T>(
    items: &'a [T],
    reference: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    let wanted = reference.trim().to_lowercase();
    items
        .iter()
        .find(|it| id(it) == reference)
        .or_else(|| items.iter().find(|it| name(it).trim().to_lowercase() == wanted))
}

fn list_id(store: &BoardStore, reference: &str) -> Result<String> {
    pick(&store.board().lists, reference, |l| l.id.as_str(), |l| l.name.as_str())
        .map(|l| l.id.clone())
        .ok_or_else(|| anyhow!("No list matches {:?}", reference))
}

fn card_id(store: &BoardStore, list_id: &str, reference: &str) -> Result<String> {
    let list = store
        .find_list(list_id)
        .ok_or_else(|| anyhow!("No list {}", list_id))?;
    pick(&list.cards, reference, |c| c.id.as_str(), |c| c.text.as_str())
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow!("No card in {:?} matches {:?}", list.name, reference))
}

fn checklist_path(
    store: &BoardStore,
    list: &str,
    card: &str,
    reference: &str,
) -> Result<(String, String, String)> {
    let list = list_id(store, list)?;
    let card = card_id(store, &list, card)?;
    let checklists = &store
        .find_card(&list, &card)
        .ok_or_else(|| anyhow!("No card {}", card))?
        .checklists;
    let checklist = pick(checklists, reference, |c| c.id.as_str(), |c| c.title.as_str())
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow!("No checklist matches {:?}", reference))?;
    Ok((list, card, checklist))
}

fn item_id(store: &BoardStore, list: &str, card: &str, checklist: &str, reference: &str) -> Result<String> {
    let items = &store
        .find_checklist(list, card, checklist)
        .ok_or_else(|| anyhow!("No checklist {}", checklist))?
        .items;
    pick(items, reference, |i| i.id.as_str(), |i| i.text.as_str())
        .map(|i| i.id.clone())
        .ok_or_else(|| anyhow!("No item matches {:?}", reference))
}

fn tag_id(store: &BoardStore, reference: &str) -> Result<String> {
    let board = store.board();
    board
        .find_tag(reference)
        .or_else(|| board.find_tag_by_text(reference))
        .map(|t| t.id.clone())
        .ok_or_else(|| anyhow!("No tag matches {:?}", reference))
}

fn template_id(store: &BoardStore, reference: &str) -> Result<String> {
    pick(&store.board().templates, reference, |t| t.id.as_str(), |t| t.name.as_str())
        .map(|t| t.id.clone())
        .ok_or_else(|| anyhow!("No template matches {:?}", reference))
}
