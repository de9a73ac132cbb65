//! Property tests for filtering and reveal scheduling.

use proptest::prelude::*;
use showcase::app::SectionState;
use showcase::domain::{filter, CategorySelection, FilterState, Item};
use showcase::timers::ManualTimerHost;
use showcase::visibility::ScriptedObserver;
use showcase::{initialize, Config};
use std::time::Duration;

fn item_strategy() -> impl Strategy<Value = (String, Vec<String>, String)> {
    (
        "[a-dA-D ]{0,8}",
        prop::collection::vec("[a-d ]{0,6}", 0..2),
        prop_oneof![Just("sales"), Just("support"), Just("company")].prop_map(str::to_string),
    )
}

fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item_strategy(), 0..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(idx, (title, fields, category))| {
                fields
                    .into_iter()
                    .fold(Item::new(format!("item-{idx}"), title, category), |item, field| {
                        item.with_field(field)
                    })
            })
            .collect()
    })
}

fn category_strategy() -> impl Strategy<Value = CategorySelection> {
    prop_oneof![
        Just(CategorySelection::All),
        Just(CategorySelection::from_key("ALL")),
        Just(CategorySelection::from_key("sales")),
        Just(CategorySelection::from_key("support")),
        Just(CategorySelection::from_key("unknown")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn filtered_is_ordered_subset(items in items_strategy(), query in "[a-dA-D ]{0,3}", category in category_strategy()) {
        let state = FilterState { query, category };
        let indices = filter::apply(&items, &state);

        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(indices.iter().all(|&idx| idx < items.len()));
    }

    #[test]
    fn every_result_contains_query(items in items_strategy(), query in "[a-dA-D]{1,3}") {
        let state = FilterState { query: query.clone(), ..FilterState::default() };
        let needle = query.to_lowercase();

        for idx in filter::apply(&items, &state) {
            let item = &items[idx];
            prop_assert!(item.searchable().any(|text| text.to_lowercase().contains(&needle)));
        }
    }

    #[test]
    fn category_results_share_the_category(items in items_strategy(), key in "sales|support|company|fleet") {
        let state = FilterState { query: String::new(), category: CategorySelection::from_key(&key) };
        let indices = filter::apply(&items, &state);

        prop_assert!(indices.iter().all(|&idx| items[idx].category == key));
        let expected = items.iter().filter(|item| item.category == key).count();
        prop_assert_eq!(indices.len(), expected);
    }

    #[test]
    fn blank_query_and_all_is_identity(items in items_strategy(), blank in "[ \t]{0,4}") {
        let state = FilterState { query: blank, category: CategorySelection::from_key("all") };
        prop_assert_eq!(filter::apply(&items, &state), (0..items.len()).collect::<Vec<_>>());
    }

    #[test]
    fn reveal_delay_is_linear_and_monotonic(stagger_ms in 0_u64..500, len in 0_usize..50) {
        let state = SectionState::new("stats".into(), vec![], Duration::from_millis(stagger_ms));

        for i in 0..len {
            let delay = state.reveal_delay(i);
            prop_assert_eq!(delay, Duration::from_millis(stagger_ms * i as u64));
            prop_assert!(state.reveal_delay(i + 1) >= delay);
        }
    }

    #[test]
    fn has_entered_view_never_reverts(ratios in prop::collection::vec(0.0_f32..=1.0, 1..20), trigger_once in any::<bool>()) {
        let config = Config { trigger_once, ..Config::default() };
        let mut page = initialize(&config, ScriptedObserver::default(), ManualTimerHost::default());
        let items = vec![Item::new("a", "Alpha", "sales"), Item::new("b", "Beta", "support")];
        page.mount("faq".into(), "faq-list".into(), items)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut entered = false;
        for ratio in ratios {
            page.on_intersection(&"faq-list".into(), ratio)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let now = page.has_entered_view(&"faq".into());
            prop_assert!(!entered || now);
            entered = now;
        }
    }

    #[test]
    fn refiltering_never_replays_revealed_items(
        items in items_strategy(),
        queries in prop::collection::vec("[a-d]{0,2}", 1..6),
    ) {
        let mut page = initialize(&Config::default(), ScriptedObserver::default(), ManualTimerHost::default());
        page.mount("news".into(), "news-grid".into(), items)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        page.on_intersection(&"news-grid".into(), 1.0)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        page.run_until_idle().map_err(|e| TestCaseError::fail(e.to_string()))?;

        for query in queries {
            page.set_query(&"news".into(), &query)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(page.timers().pending(), 0);
        }
    }
}
