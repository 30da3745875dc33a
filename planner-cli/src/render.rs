//! Plain-text board view for `planner show`.

use std::fmt::Write;

use planner_core::{Board, Card};

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", board.title);
    let _ = writeln!(out, "{}", "=".repeat(board.title.chars().count().max(1)));

    if !board.tags.is_empty() {
        let tags: Vec<String> = board
            .tags
            .iter()
            .map(|t| format!("{} {} [{}]", t.text, t.color, t.id))
            .collect();
        let _ = writeln!(out, "Tags: {}", tags.join(", "));
    }
    if !board.templates.is_empty() {
        let templates: Vec<String> = board
            .templates
            .iter()
            .map(|t| format!("{} [{}]", t.name, t.id))
            .collect();
        let _ = writeln!(out, "Templates: {}", templates.join(", "));
    }

    for list in &board.lists {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {} ({}) [{}]", list.name, list.card_count(), list.id);
        if list.cards.is_empty() {
            let _ = writeln!(out, "  (no cards)");
        }
        for card in &list.cards {
            render_card(&mut out, board, card);
        }
    }
    out
}

fn render_card(out: &mut String, board: &Board, card: &Card) {
    let mut line = format!("  - {} [{}]", card.text, card.id);
    let tags: Vec<&str> = board.card_tags(card).map(|t| t.text.as_str()).collect();
    if !tags.is_empty() {
        let _ = write!(line, " {{{}}}", tags.join(", "));
    }
    let progress = card.checklist_progress();
    if progress.total > 0 {
        let _ = write!(line, " {}/{}", progress.done, progress.total);
    }
    if card.has_description() {
        line.push_str(" +notes");
    }
    let _ = writeln!(out, "{}", line);

    for checklist in &card.checklists {
        let p = checklist.progress();
        let _ = writeln!(
            out,
            "      {} ({}/{}) [{}]",
            checklist.title, p.done, p.total, checklist.id
        );
        for item in &checklist.items {
            let mark = if item.done { "x" } else { " " };
            let _ = writeln!(out, "        [{}] {} [{}]", mark, item.text, item.id);
        }
    }
}
