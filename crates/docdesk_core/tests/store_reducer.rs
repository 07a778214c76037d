use docdesk_core::{
    Action, ActionDispatcher, ActionOutcome, Document, DocumentStore, DocumentValidationError,
    Field, IgnoreReason, StoreState,
};
use proptest::prelude::*;
use uuid::Uuid;

fn doc(title: &str) -> Document {
    Document::new(title, "description long enough").unwrap()
}

fn seeded(titles: &[&str]) -> StoreState {
    titles.iter().fold(StoreState::new(), |state, title| {
        state.reduce(&Action::AddDocument(doc(title))).state
    })
}

fn titles(state: &StoreState) -> Vec<String> {
    state.documents().iter().map(|d| d.title.clone()).collect()
}

#[test]
fn add_appends_in_insertion_order() {
    let state = seeded(&["Zulu doc", "Alpha doc", "Mike doc"]);
    assert_eq!(titles(&state), vec!["Zulu doc", "Alpha doc", "Mike doc"]);
}

#[test]
fn add_with_existing_id_is_ignored() {
    let first = doc("First doc");
    let state = StoreState::new()
        .reduce(&Action::AddDocument(first.clone()))
        .state;

    let mut clash = doc("Second doc");
    clash.id = first.id;
    let reduced = state.reduce(&Action::AddDocument(clash));
    assert_eq!(reduced.state, state);
    assert_eq!(
        reduced.outcome,
        ActionOutcome::Ignored(IgnoreReason::DuplicateId(first.id))
    );
}

#[test]
fn add_then_delete_restores_prior_sequence() {
    let before = seeded(&["Alpha doc", "Bravo doc"]);
    let extra = doc("Charlie doc");

    let after = before
        .reduce(&Action::AddDocument(extra.clone()))
        .state
        .reduce(&Action::DeleteDocument(extra.id))
        .state;
    assert_eq!(after.documents(), before.documents());
}

#[test]
fn update_replaces_fields_and_is_idempotent() {
    let original = doc("Draft title");
    let state = StoreState::new()
        .reduce(&Action::AddDocument(original.clone()))
        .state;

    let mut replacement = original.clone();
    replacement.title = "Final title".to_string();
    replacement.description = "final description text".to_string();

    let once = state
        .reduce(&Action::UpdateDocument(replacement.clone()))
        .state;
    let twice = once.reduce(&Action::UpdateDocument(replacement)).state;

    let updated = twice.get(original.id).unwrap();
    assert!(updated.is_edited);
    assert_eq!(updated.title, "Final title");
    assert_eq!(once, twice);
}

#[test]
fn update_sets_edited_even_when_payload_omits_it() {
    let original = doc("Draft title");
    let state = StoreState::new()
        .reduce(&Action::AddDocument(original.clone()))
        .state;

    let reduced = state.reduce(&Action::UpdateDocument(original.clone()));
    assert!(reduced.state.get(original.id).unwrap().is_edited);
}

#[test]
fn actions_on_missing_ids_are_benign_no_ops() {
    let state = seeded(&["Alpha doc"]);
    let missing = Uuid::new_v4();

    let mut ghost = doc("Ghost doc");
    ghost.id = missing;
    for action in [
        Action::UpdateDocument(ghost),
        Action::DeleteDocument(missing),
    ] {
        let reduced = state.reduce(&action);
        assert_eq!(reduced.state, state);
        assert_eq!(
            reduced.outcome,
            ActionOutcome::Ignored(IgnoreReason::UnknownId(missing))
        );
    }
}

#[test]
fn deleting_selected_document_clears_selection() {
    let target = doc("Target doc");
    let other = doc("Other doc");
    let state = StoreState::new()
        .reduce(&Action::AddDocument(target.clone()))
        .state
        .reduce(&Action::AddDocument(other.clone()))
        .state
        .reduce(&Action::SetSelected(target.id))
        .state;
    assert_eq!(state.selected().map(|d| d.id), Some(target.id));

    let keep = state.reduce(&Action::DeleteDocument(other.id)).state;
    assert_eq!(keep.selected_id(), Some(target.id));

    let cleared = state.reduce(&Action::DeleteDocument(target.id)).state;
    assert_eq!(cleared.selected_id(), None);
}

#[test]
fn selection_resolves_to_latest_version_after_update() {
    let original = doc("Draft title");
    let state = StoreState::new()
        .reduce(&Action::AddDocument(original.clone()))
        .state
        .reduce(&Action::SetSelected(original.id))
        .state;

    let mut replacement = original.clone();
    replacement.title = "Renamed title".to_string();
    let state = state.reduce(&Action::UpdateDocument(replacement)).state;
    assert_eq!(state.selected().unwrap().title, "Renamed title");

    let state = state.reduce(&Action::ClearSelected).state;
    assert!(state.selected().is_none());
}

#[test]
fn sort_desc_is_reverse_of_sort_asc_for_unique_titles() {
    let state = seeded(&["Mike doc", "Alpha doc", "Zulu doc", "Delta doc"]);

    let asc = state.reduce(&Action::SortAsc).state;
    let desc = asc.reduce(&Action::SortDesc).state;

    let mut reversed = titles(&asc);
    reversed.reverse();
    assert_eq!(titles(&asc), vec!["Alpha doc", "Delta doc", "Mike doc", "Zulu doc"]);
    assert_eq!(titles(&desc), reversed);
}

#[test]
fn sort_is_stable_for_equal_titles() {
    let first = doc("Same title");
    let second = doc("Same title");
    let state = StoreState::new()
        .reduce(&Action::AddDocument(doc("Zulu doc")))
        .state
        .reduce(&Action::AddDocument(first.clone()))
        .state
        .reduce(&Action::AddDocument(second.clone()))
        .state;

    let ids = |s: &StoreState| s.documents().iter().map(|d| d.id).collect::<Vec<_>>();
    let asc = state.reduce(&Action::SortAsc).state;
    assert_eq!(ids(&asc)[..2], [first.id, second.id]);
    let desc = state.reduce(&Action::SortDesc).state;
    assert_eq!(ids(&desc)[1..], [first.id, second.id]);
}

#[test]
fn padded_payloads_never_reach_the_store() {
    let alpha = doc("Alpha doc");
    let state = StoreState::new()
        .reduce(&Action::AddDocument(alpha.clone()))
        .state;

    let mut padded = doc("Zeta doc");
    padded.title = "   Zeta doc   ".to_string();
    let reduced = state.reduce(&Action::AddDocument(padded));
    assert_eq!(reduced.state, state);
    assert_eq!(
        reduced.outcome,
        ActionOutcome::Ignored(IgnoreReason::InvalidDocument(
            DocumentValidationError::Untrimmed(Field::Title)
        ))
    );

    let mut padded_update = alpha.clone();
    padded_update.description = " description long enough ".to_string();
    let reduced = state.reduce(&Action::UpdateDocument(padded_update));
    assert_eq!(reduced.state, state);
    assert_eq!(
        reduced.outcome,
        ActionOutcome::Ignored(IgnoreReason::InvalidDocument(
            DocumentValidationError::Untrimmed(Field::Description)
        ))
    );

    let sorted = state.reduce(&Action::SortAsc).state;
    assert_eq!(titles(&sorted), vec!["Alpha doc"]);
}

#[test]
fn store_dispatch_records_outcome() {
    let mut store = DocumentStore::new();
    let first = doc("First doc");
    store.dispatch(Action::AddDocument(first.clone()));
    assert_eq!(store.last_outcome(), Some(&ActionOutcome::Applied));
    assert_eq!(store.state().len(), 1);

    store.dispatch(Action::AddDocument(first));
    assert!(matches!(
        store.last_outcome(),
        Some(ActionOutcome::Ignored(IgnoreReason::DuplicateId(_)))
    ));
    assert_eq!(store.state().len(), 1);
}

fn ids_titled(state: &StoreState, title: &str) -> Vec<Uuid> {
    state
        .documents()
        .iter()
        .filter(|d| d.title == title)
        .map(|d| d.id)
        .collect()
}

proptest! {
    #[test]
    fn sort_desc_reverses_sort_asc_for_any_unique_titles(
        titles_in in prop::collection::btree_set("[a-z]{5,12}", 1..10)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
    ) {
        let refs = titles_in.iter().map(String::as_str).collect::<Vec<_>>();
        let asc = seeded(&refs).reduce(&Action::SortAsc).state;
        let desc = asc.reduce(&Action::SortDesc).state;

        let mut expected = titles_in.clone();
        expected.sort();
        prop_assert_eq!(titles(&asc), expected.clone());
        expected.reverse();
        prop_assert_eq!(titles(&desc), expected);
    }

    #[test]
    fn sort_keeps_insertion_order_among_equal_titles(
        picks in prop::collection::vec(
            prop::sample::select(vec!["Alpha doc", "Bravo doc", "Charlie doc"]),
            0..12,
        ),
    ) {
        let state = seeded(&picks);
        let asc = state.reduce(&Action::SortAsc).state;
        let desc = state.reduce(&Action::SortDesc).state;

        for title in ["Alpha doc", "Bravo doc", "Charlie doc"] {
            let inserted = ids_titled(&state, title);
            prop_assert_eq!(ids_titled(&asc, title), inserted.clone());
            prop_assert_eq!(ids_titled(&desc, title), inserted);
        }
    }
}
