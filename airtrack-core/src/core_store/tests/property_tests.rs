/*
    property_tests.rs - Properties of store mutators and list queries
*/

use crate::core_store::model::{
    Airdrop, Entity, EntityId, NewAirdrop, Timestamp, UserId,
};
use crate::core_store::query::{ListQuery, SortOption, ALL_CATEGORIES};
use crate::core_store::store::{AirdropStore, MemoryKvStore};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn new_airdrop(user: &str, title: &str) -> NewAirdrop {
    NewAirdrop {
        user_id: UserId::new(user),
        title: title.to_string(),
        category: "AI Airdrops".to_string(),
        description: "d".to_string(),
        ..Default::default()
    }
}

fn fixture(specs: &[(String, bool, u64)]) -> Vec<Airdrop> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (title, pinned, created))| {
            let mut a = Airdrop::create(
                new_airdrop("u1", title),
                EntityId::new(format!("a{i}")),
                Timestamp::from_millis(*created),
            );
            a.pinned = *pinned;
            a
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_add_grows_by_one_with_unique_ids(titles in prop::collection::vec("[a-zA-Z ]{0,12}", 1..20)) {
        let mut store = AirdropStore::open(Arc::new(MemoryKvStore::new())).unwrap();
        let mut ids = HashSet::new();

        for (i, title) in titles.iter().enumerate() {
            let added = store.add(new_airdrop("u1", title)).unwrap();
            prop_assert_eq!(store.all().len(), i + 1);
            prop_assert!(ids.insert(added.id.clone()));
            prop_assert_eq!(&store.all()[0].id, &added.id);
        }
    }

    #[test]
    fn prop_toggles_are_involutions(count in 1usize..6, pick in 0usize..6) {
        let mut store = AirdropStore::open(Arc::new(MemoryKvStore::new())).unwrap();
        let added: Vec<Airdrop> = (0..count)
            .map(|i| store.add(new_airdrop("u1", &format!("t{i}"))).unwrap())
            .collect();
        let target = &added[pick % count].id;
        let snapshot = store.all().to_vec();

        store.toggle_completed(target).unwrap();
        store.toggle_completed(target).unwrap();
        store.toggle_pinned(target).unwrap();
        store.toggle_pinned(target).unwrap();

        prop_assert_eq!(store.all(), snapshot.as_slice());
    }

    #[test]
    fn prop_get_for_user_only_returns_owner(owners in prop::collection::vec(0u8..3, 0..20)) {
        let mut store = AirdropStore::open(Arc::new(MemoryKvStore::new())).unwrap();
        for owner in &owners {
            store.add(new_airdrop(&format!("user{owner}"), "x")).unwrap();
        }

        for owner in 0u8..3 {
            let user = UserId::new(format!("user{owner}"));
            let mine = store.get_for_user(&user);
            prop_assert!(mine.iter().all(|a| a.user_id() == &user));
            prop_assert_eq!(mine.len(), owners.iter().filter(|o| **o == owner).count());
        }
    }

    #[test]
    fn prop_all_category_equals_no_filter(
        specs in prop::collection::vec(("[a-z]{1,8}", any::<bool>(), 0u64..1000), 0..15)
    ) {
        let items = fixture(&specs);
        let unfiltered = ListQuery::new().apply(&items);
        let all = ListQuery::new().with_category(ALL_CATEGORIES).apply(&items);
        prop_assert_eq!(all, unfiltered);
    }

    #[test]
    fn prop_alphabetical_is_non_decreasing(
        specs in prop::collection::vec(("[a-zA-Z]{1,8}", any::<bool>(), 0u64..1000), 0..15)
    ) {
        let items = fixture(&specs);
        let sorted = ListQuery::new().with_sort(SortOption::Alphabetical).apply(&items);
        prop_assert_eq!(sorted.len(), items.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].title.to_lowercase() <= pair[1].title.to_lowercase());
        }
    }

    #[test]
    fn prop_pinned_first_then_newest(
        specs in prop::collection::vec(("[a-z]{1,8}", any::<bool>(), 0u64..1000), 0..15)
    ) {
        let items = fixture(&specs);
        let sorted = ListQuery::new().with_sort(SortOption::Pinned).apply(&items);

        let first_unpinned = sorted.iter().position(|a| !a.pinned).unwrap_or(sorted.len());
        prop_assert!(sorted[first_unpinned..].iter().all(|a| !a.pinned));
        for pair in sorted.windows(2) {
            if pair[0].pinned == pair[1].pinned {
                prop_assert!(pair[0].created_at >= pair[1].created_at);
            }
        }
    }
}
