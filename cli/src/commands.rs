use crate::cli::Command;
use anyhow::{bail, Context, Result};
use notekeep_core::models::tag;
use notekeep_core::{Clock, Note, NoteDraft, NotePatch, NoteStore, StorageBackend};
use std::io::Write;

/// Execute one command against the store, printing results to `out`
pub fn run<B, C, W>(store: &mut NoteStore<B, C>, command: Command, out: &mut W) -> Result<()>
where
    B: StorageBackend,
    C: Clock,
    W: Write,
{
    match command {
        Command::New { title, content, tags } => {
            let draft = NoteDraft {
                title,
                content,
                tags: tag::parse_list(&tags.join(",")),
            };
            if draft.is_empty() {
                bail!("a note needs a title or some content");
            }
            let note = store.create(draft);
            writeln!(out, "Created {}", note.id)?;
        }
        Command::Edit { id, title, content, tags } => {
            let id = resolve_id(store, &id)?;
            let patch = NotePatch {
                title,
                content,
                tags: tags.as_deref().map(tag::parse_list),
            };
            if patch.is_empty() {
                bail!("nothing to change; pass --title, --content or --tags");
            }
            store.update(&id, patch);
            writeln!(out, "Updated {}", short_id(&id))?;
        }
        Command::Pin { id } => {
            let id = resolve_id(store, &id)?;
            store.toggle_pin(&id);
            let pinned = store.get(&id).is_some_and(|n| n.pinned);
            writeln!(out, "{} {}", if pinned { "Pinned" } else { "Unpinned" }, short_id(&id))?;
        }
        Command::Archive { id } => {
            let id = resolve_id(store, &id)?;
            store.toggle_archive(&id);
            let archived = store.get(&id).is_some_and(|n| n.archived);
            writeln!(
                out,
                "{} {}",
                if archived { "Archived" } else { "Unarchived" },
                short_id(&id)
            )?;
        }
        Command::Trash { id } => {
            let id = resolve_id(store, &id)?;
            store.move_to_trash(&id);
            writeln!(out, "Moved {} to trash", short_id(&id))?;
        }
        Command::Restore { id } => {
            let id = resolve_id(store, &id)?;
            store.restore_from_trash(&id);
            writeln!(out, "Restored {}", short_id(&id))?;
        }
        Command::Delete { id } => {
            let id = resolve_id(store, &id)?;
            store.permanently_delete(&id);
            writeln!(out, "Deleted {}", short_id(&id))?;
        }
        Command::Tags => {
            for name in store.list_tags() {
                writeln!(out, "{}", name)?;
            }
        }
        Command::List { view, search, tag, json } => {
            let notes = store.view(view, &search, tag.as_deref());
            if json {
                let text = serde_json::to_string_pretty(&notes).context("failed to encode notes")?;
                writeln!(out, "{}", text)?;
            } else if notes.is_empty() {
                writeln!(out, "No {} notes", view)?;
            } else {
                for note in notes {
                    writeln!(out, "{}", summary_line(note))?;
                }
            }
        }
        Command::Show { id, json } => {
            let id = resolve_id(store, &id)?;
            let Some(note) = store.get(&id) else {
                bail!("no note with id {}", id);
            };
            if json {
                let text = serde_json::to_string_pretty(note).context("failed to encode note")?;
                writeln!(out, "{}", text)?;
            } else {
                write_details(out, note)?;
            }
        }
        Command::Stats => {
            let counts = store.counts();
            writeln!(out, "active: {}", counts.active)?;
            writeln!(out, "archived: {}", counts.archived)?;
            writeln!(out, "trashed: {}", counts.trashed)?;
        }
    }
    Ok(())
}

/// Accept a full id or any unambiguous prefix of one
pub fn resolve_id<B: StorageBackend, C: Clock>(store: &NoteStore<B, C>, prefix: &str) -> Result<String> {
    if store.get(prefix).is_some() {
        return Ok(prefix.to_string());
    }
    if prefix.is_empty() {
        bail!("empty note id");
    }

    let mut matches = store.notes().iter().filter(|n| n.id.starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(note), None) => Ok(note.id.clone()),
        (None, _) => bail!("no note with id {}", prefix),
        (Some(_), Some(_)) => bail!("id prefix {} is ambiguous", prefix),
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn summary_line(note: &Note) -> String {
    let mut line = format!(
        "{} {}  {}",
        if note.pinned { "*" } else { " " },
        short_id(&note.id),
        note.title
    );
    if !note.tags.is_empty() {
        line.push_str(&format!("  [{}]", note.tags.join(", ")));
    }
    line.push_str(&format!("  {}", note.updated_at.format("%Y-%m-%d %H:%M")));
    line
}

fn write_details<W: Write>(out: &mut W, note: &Note) -> Result<()> {
    writeln!(out, "id:       {}", note.id)?;
    writeln!(out, "title:    {}", note.title)?;
    if !note.tags.is_empty() {
        writeln!(out, "tags:     {}", note.tags.join(", "))?;
    }
    let mut flags = Vec::new();
    if note.pinned {
        flags.push("pinned");
    }
    if note.archived {
        flags.push("archived");
    }
    if note.deleted {
        flags.push("trashed");
    }
    if !flags.is_empty() {
        writeln!(out, "flags:    {}", flags.join(", "))?;
    }
    writeln!(out, "created:  {}", note.created_at.to_rfc3339())?;
    writeln!(out, "updated:  {}", note.updated_at.to_rfc3339())?;
    if !note.content.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", note.content)?;
    }
    Ok(())
}
