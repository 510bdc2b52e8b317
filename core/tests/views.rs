use chrono::{Duration, TimeZone, Utc};
use notekeep_core::{ManualClock, MemoryBackend, Note, NoteDraft, NoteStore, ViewKind};
use yare::parameterized;

type Store = NoteStore<MemoryBackend, ManualClock>;

/// Two fruit notes: "A" (apple) and the pinned, older "B" (banana).
fn fruit_store() -> (Store, String, String) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap());
    let mut store = NoteStore::open(MemoryBackend::new(), clock.clone());
    let b = store.create(NoteDraft::new("B", "banana").with_tags(["fruit"]));
    store.toggle_pin(&b.id);
    clock.advance(Duration::minutes(1));
    let a = store.create(NoteDraft::new("A", "apple").with_tags(["fruit"]));
    (store, a.id, b.id)
}

fn titles(notes: &[&Note]) -> Vec<String> {
    notes.iter().map(|n| n.title.clone()).collect()
}

#[parameterized(
    everything = { "", None, &["B", "A"] },
    search_content = { "apple", None, &["A"] },
    search_title = { "b", None, &["B"] },
    search_case_folded = { "  BANANA ", None, &["B"] },
    search_no_match = { "cherry", None, &[] },
    tag_filter = { "", Some("fruit"), &["B", "A"] },
    tag_exact_only = { "", Some("Fruit"), &[] },
    search_and_tag = { "apple", Some("fruit"), &["A"] },
)]
fn active_view_scenario(search: &str, tag: Option<&str>, expected: &[&str]) {
    let (store, _, _) = fruit_store();
    assert_eq!(titles(&store.view(ViewKind::Active, search, tag)), expected);
}

#[test]
fn archived_and_trashed_views() {
    let (mut store, a, b) = fruit_store();
    store.toggle_archive(&a);
    store.move_to_trash(&b);

    assert_eq!(titles(&store.view(ViewKind::Archived, "", None)), vec!["A"]);
    assert_eq!(titles(&store.view(ViewKind::Trashed, "", None)), vec!["B"]);
    assert!(store.view(ViewKind::Active, "", None).is_empty());

    let counts = store.counts();
    assert_eq!(counts.active, 0);
    assert_eq!(counts.archived, 1);
    assert_eq!(counts.trashed, 1);
}

#[test]
fn list_tags_spans_every_view() {
    let (mut store, a, b) = fruit_store();
    let c = store.create(NoteDraft::new("C", "").with_tags(["zeta", "alpha", "fruit"]));
    store.toggle_archive(&a);
    store.move_to_trash(&b);
    store.move_to_trash(&c.id);

    assert_eq!(store.list_tags(), vec!["alpha", "fruit", "zeta"]);
}

#[test]
fn equal_timestamps_break_ties_by_id() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap());
    let mut store = NoteStore::open(MemoryBackend::new(), clock);
    for i in 0..5 {
        store.create(NoteDraft::new(format!("n{}", i), ""));
    }

    let view = store.view(ViewKind::Active, "", None);
    let ids: Vec<&str> = view.iter().map(|n| n.id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

/// Drives a store through a fixed but irregular sequence of operations.
fn churned_store() -> Store {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    let mut store = NoteStore::open(MemoryBackend::new(), clock.clone());
    let tags = ["work", "home", "ideas", "work"];

    let mut created = Vec::new();
    for i in 0..24 {
        let note = store.create(
            NoteDraft::new(format!("Note {}", i), format!("body {}", i % 7))
                .with_tags([tags[i % tags.len()], tags[(i * 3) % tags.len()]]),
        );
        created.push(note.id);
        clock.advance(Duration::seconds((i as i64 * 37) % 11));
    }

    for (step, id) in created.iter().cycle().take(120).enumerate() {
        clock.advance(Duration::seconds((step as i64 * 13) % 5));
        match (step * 7 + id.len()) % 6 {
            0 => {
                store.toggle_pin(id);
            }
            1 => {
                store.toggle_archive(id);
            }
            2 => {
                store.move_to_trash(id);
            }
            3 => {
                store.restore_from_trash(id);
            }
            4 if step % 17 == 0 => {
                store.permanently_delete(id);
            }
            _ => {
                store.toggle_pin(id);
            }
        }
    }
    store
}

#[test]
fn no_note_is_both_archived_and_deleted() {
    let store = churned_store();
    assert!(store.notes().iter().all(|n| !(n.archived && n.deleted)));
    assert!(store.notes().iter().all(|n| n.updated_at >= n.created_at));
}

#[test]
fn active_view_excludes_archived_and_trashed() {
    let store = churned_store();
    for note in store.view(ViewKind::Active, "", None) {
        assert!(!note.deleted);
        assert!(!note.archived);
    }
}

#[test]
fn views_are_sorted_pinned_then_recent() {
    let store = churned_store();
    for kind in ViewKind::ALL {
        for tag in [None, Some("work"), Some("ideas")] {
            let view = store.view(kind, "", tag);
            for pair in view.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(
                    (a.pinned && !b.pinned) || (a.pinned == b.pinned && a.updated_at >= b.updated_at),
                    "{} ({}, {}) before {} ({}, {})",
                    a.id,
                    a.pinned,
                    a.updated_at,
                    b.id,
                    b.pinned,
                    b.updated_at
                );
            }
        }
    }
}

#[test]
fn views_partition_live_notes() {
    let store = churned_store();
    let counts = store.counts();
    assert_eq!(counts.active + counts.archived + counts.trashed, store.len());
    for kind in ViewKind::ALL {
        assert_eq!(store.view(kind, "", None).len(), counts.get(kind));
    }
}

#[test]
fn list_tags_sorted_without_duplicates() {
    let store = churned_store();
    let tags = store.list_tags();
    assert!(tags.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(tags, vec!["home", "ideas", "work"]);
}
