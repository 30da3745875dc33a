//! Document schema migrations.
//!
//! Migrations are registered in strictly increasing `version` order and run
//! once, at the load boundary, for every version above the document's
//! `schemaVersion`. Each migration is itself idempotent so a document that
//! lies about its version is still safe to migrate again.

use serde::Serialize;

use crate::config::StoreConfig;
use crate::identity::generate_id;
use crate::types::{tag_key, Board, LegacyTag, Tag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStats {
    /// Cards (including template snapshots) whose representation changed.
    pub cards_migrated: usize,
    pub tags_created: usize,
}

impl MigrationStats {
    fn merge(&mut self, other: MigrationStats) {
        self.cards_migrated += other.cards_migrated;
        self.tags_created += other.tags_created;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    pub applied: Vec<&'static str>,
    pub stats: MigrationStats,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

#[derive(Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    apply: fn(&mut Board, &StoreConfig) -> MigrationStats,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "embedded-card-tags",
    apply: migrate_embedded_tags,
}];

/// Latest schema version this build writes.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// Apply every pending migration and stamp the board with the latest version.
/// Documents from a newer build are left untouched.
pub fn apply_migrations(board: &mut Board, config: &StoreConfig) -> MigrationReport {
    let from_version = board.schema_version;
    let latest = latest_version();
    let mut report = MigrationReport {
        from_version,
        to_version: from_version,
        ..MigrationReport::default()
    };

    if from_version > latest {
        log::warn!(
            "[planner.migrate] Document schema {} is newer than supported {}, leaving as-is",
            from_version,
            latest
        );
        return report;
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > from_version) {
        let stats = (migration.apply)(board, config);
        log::info!(
            "[planner.migrate] Applied v{} {}: {} cards, {} new tags",
            migration.version,
            migration.name,
            stats.cards_migrated,
            stats.tags_created
        );
        report.applied.push(migration.name);
        report.stats.merge(stats);
        board.schema_version = migration.version;
    }
    report.to_version = board.schema_version;
    report
}

/// Replace embedded `{text, color}` card tags with `tagIds` references to
/// board-level tags, creating tags that do not exist yet (matched by
/// case-insensitive text). Template snapshots are migrated the same way.
pub fn migrate_embedded_tags(board: &mut Board, config: &StoreConfig) -> MigrationStats {
    let mut stats = MigrationStats::default();
    let Board {
        tags,
        lists,
        templates,
        ..
    } = board;

    let card_slots = lists
        .iter_mut()
        .flat_map(|list| list.cards.iter_mut())
        .map(|card| (&mut card.legacy_tags, &mut card.tag_ids))
        .chain(
            templates
                .iter_mut()
                .map(|t| (&mut t.card_data.legacy_tags, &mut t.card_data.tag_ids)),
        );

    for (legacy, tag_ids) in card_slots {
        let Some(embedded) = legacy.take() else {
            continue;
        };
        stats.cards_migrated += 1;

        for entry in embedded {
            let LegacyTag::Embedded { text, color } = entry else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            let key = tag_key(&text);
            let tag_id = match tags.iter().find(|t| tag_key(&t.text) == key) {
                Some(existing) => existing.id.clone(),
                None => {
                    let tag = Tag {
                        id: generate_id(),
                        text: text.trim().to_string(),
                        color: color
                            .as_ref()
                            .and_then(serde_json::Value::as_str)
                            .filter(|c| !c.trim().is_empty())
                            .map(str::to_string)
                            .unwrap_or_else(|| config.fallback_tag_color()),
                    };
                    let id = tag.id.clone();
                    tags.push(tag);
                    stats.tags_created += 1;
                    id
                }
            };
            if !tag_ids.contains(&tag_id) {
                tag_ids.push(tag_id);
            }
        }
    }

    stats
}
