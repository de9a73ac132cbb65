//! End-to-end scenarios on a deterministic page.

use showcase::content::Catalog;
use showcase::domain::{Item, SectionId};
use showcase::timers::{ManualTimerHost, TimerHost};
use showcase::visibility::{ElementId, ScriptedObserver, UnavailableObserver, ViewportObserver};
use showcase::{initialize, Config, Page, Result, RevealPhase, ShowcaseError};
use std::time::Duration;

const STEP: Duration = Duration::from_millis(100);

fn page() -> Page<ScriptedObserver, ManualTimerHost> {
    initialize(&Config::default(), ScriptedObserver::default(), ManualTimerHost::default())
}

fn mount_builtin<O: ViewportObserver, T: TimerHost>(
    page: &mut Page<O, T>,
    catalog: &str,
    section: &str,
) -> Result<(SectionId, ElementId)> {
    let catalog = Catalog::builtin(catalog).ok_or_else(|| ShowcaseError::Content(catalog.to_string()))?;
    let content = catalog
        .section(&section.into())
        .ok_or_else(|| ShowcaseError::Content(section.to_string()))?;
    let element = ElementId::new(format!("{section}-container"));
    page.mount_content(element.clone(), content)?;
    Ok((content.id.clone(), element))
}

fn titles(page: &Page<ScriptedObserver, ManualTimerHost>, section: &SectionId) -> Vec<String> {
    page.section(section)
        .map(|state| state.filtered_items().into_iter().map(|item| item.title.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn faq_search_keeps_collection_order() -> Result<()> {
    let mut page = page();
    let (faq, element) = mount_builtin(&mut page, "about", "faq")?;

    assert!(page.set_query(&faq, "warranty")?);
    assert_eq!(titles(&page, &faq), vec!["What does the warranty cover?", "Can I extend my coverage?"]);

    page.on_intersection(&element, 0.5)?;
    let schedule = page.section(&faq).map(|s| s.reveal_schedule()).unwrap_or_default();
    let delays: Vec<Duration> = schedule.iter().map(|entry| entry.delay).collect();
    assert_eq!(delays, vec![Duration::ZERO, STEP]);

    assert_eq!(page.run_until_idle()?, STEP);
    let view = page.viewmodel(&faq).ok_or_else(|| ShowcaseError::Content("faq".into()))?;
    assert_eq!(view.header.title, "Showing 2 of 5");
    assert!(view.display_items.iter().all(|item| item.is_revealed));
    Ok(())
}

#[test]
fn fleet_category_chip() -> Result<()> {
    let mut page = page();
    let (fleet, _) = mount_builtin(&mut page, "home", "fleet")?;

    page.set_category(&fleet, "locomotives")?;
    assert_eq!(titles(&page, &fleet), vec!["HX-4400 freight locomotive"]);

    page.set_category(&fleet, "all")?;
    assert_eq!(titles(&page, &fleet).len(), 4);

    page.set_category(&fleet, "ships")?;
    let view = page.viewmodel(&fleet).ok_or_else(|| ShowcaseError::Content("fleet".into()))?;
    assert!(view.display_items.is_empty());
    assert_eq!(view.empty_state.map(|empty| empty.message).as_deref(), Some("No results"));
    Ok(())
}

#[test]
fn nothing_is_scheduled_before_entry() -> Result<()> {
    let mut page = page();
    let (stats, element) = mount_builtin(&mut page, "home", "stats")?;

    page.on_intersection(&element, 0.05)?;
    assert!(!page.has_entered_view(&stats));
    assert_eq!(page.timers().pending(), 0);
    assert_eq!(page.section(&stats).map(|s| s.phase()), Some(RevealPhase::NotArmed));

    page.on_intersection(&element, 0.1)?;
    assert!(page.has_entered_view(&stats));
    assert_eq!(page.timers().pending(), 4);
    assert!(!page.observer().is_observing(&element));
    Ok(())
}

#[test]
fn unmount_cancels_pending_reveals() -> Result<()> {
    let mut page = page();
    let items = vec![
        Item::new("a", "Metro bus", "vehicles"),
        Item::new("b", "Shunter", "locomotives"),
        Item::new("c", "Tow tractor", "vehicles"),
    ];
    page.mount("fleet".into(), "fleet-grid".into(), items)?;
    page.on_intersection(&"fleet-grid".into(), 1.0)?;
    assert_eq!(page.timers().pending(), 3);

    assert!(page.unmount(&"fleet".into()));
    assert_eq!(page.timers().pending(), 0);
    assert_eq!(page.observer().observed_count(), 0);
    assert_eq!(page.advance(Duration::from_secs(10))?, 0);

    assert!(!page.unmount(&"fleet".into()));
    assert!(!page.set_query(&"fleet".into(), "bus")?);
    Ok(())
}

#[test]
fn unmount_mid_reveal_stops_remaining_items() -> Result<()> {
    let mut page = page();
    let (news, element) = mount_builtin(&mut page, "home", "news")?;
    page.on_intersection(&element, 1.0)?;

    assert_eq!(page.advance(STEP)?, 2);
    assert_eq!(page.section(&news).map(|s| s.pending_count()), Some(2));

    page.unmount(&news);
    assert_eq!(page.timers().pending(), 0);
    assert!(page.section(&news).is_none());
    Ok(())
}

#[test]
fn sections_are_isolated() -> Result<()> {
    let mut page = page();
    let (stats, stats_el) = mount_builtin(&mut page, "home", "stats")?;
    let (fleet, _) = mount_builtin(&mut page, "home", "fleet")?;

    page.on_intersection(&stats_el, 1.0)?;
    page.set_query(&fleet, "bus")?;

    assert!(page.has_entered_view(&stats));
    assert!(!page.has_entered_view(&fleet));
    assert_eq!(page.section(&fleet).map(|s| s.pending_count()), Some(0));
    assert_eq!(page.section(&stats).map(|s| s.filter().query.clone()), Some(String::new()));

    page.unmount(&stats);
    assert_eq!(page.timers().pending(), 0);
    assert_eq!(page.section(&fleet).map(|s| s.filtered_items().len()), Some(1));
    Ok(())
}

#[test]
fn duplicate_section_is_rejected() -> Result<()> {
    let mut page = page();
    mount_builtin(&mut page, "services", "services")?;
    let err = mount_builtin(&mut page, "services", "services");
    assert!(matches!(err, Err(ShowcaseError::DuplicateSection(id)) if id == "services"));
    Ok(())
}

#[test]
fn missing_observer_fails_open() -> Result<()> {
    let mut page = initialize(&Config::default(), UnavailableObserver, ManualTimerHost::default());
    let (faq, _) = mount_builtin(&mut page, "about", "faq")?;

    assert!(page.has_entered_view(&faq));
    assert_eq!(page.timers().pending(), 5);

    page.run_until_idle()?;
    assert_eq!(page.section(&faq).map(|s| s.phase()), Some(RevealPhase::Settled));
    Ok(())
}

#[test]
fn refilter_schedules_only_new_items() -> Result<()> {
    let mut page = page();
    let (faq, element) = mount_builtin(&mut page, "about", "faq")?;

    page.set_category(&faq, "sales")?;
    page.on_intersection(&element, 1.0)?;
    page.run_until_idle()?;

    page.set_category(&faq, "all")?;
    assert_eq!(page.timers().pending(), 3);
    assert_eq!(page.timers().next_due(), Some(Duration::ZERO));

    page.run_until_idle()?;
    page.set_category(&faq, "sales")?;
    page.set_category(&faq, "all")?;
    assert_eq!(page.timers().pending(), 0);
    Ok(())
}

#[test]
fn stagger_comes_from_config() -> Result<()> {
    let config = Config::from_toml_str("stagger_ms = 40\nthreshold = 0.5")?;
    let mut page = initialize(&config, ScriptedObserver::default(), ManualTimerHost::default());
    let (stats, element) = mount_builtin(&mut page, "home", "stats")?;

    page.on_intersection(&element, 0.4)?;
    assert!(!page.has_entered_view(&stats));
    page.on_intersection(&element, 0.5)?;
    assert_eq!(page.run_until_idle()?, Duration::from_millis(120));
    Ok(())
}

#[test]
fn refilter_mid_reveal_reports_live_delays() -> Result<()> {
    let mut page = page();
    let items = vec![
        Item::new("a", "Alpha loco", "locomotives"),
        Item::new("b", "Bus", "vehicles"),
        Item::new("c", "Rail car", "vehicles"),
        Item::new("d", "Shunting loco", "locomotives"),
    ];
    page.mount("fleet".into(), "fleet-grid".into(), items)?;
    page.on_intersection(&"fleet-grid".into(), 1.0)?;
    assert_eq!(page.advance(Duration::ZERO)?, 1);

    page.set_query(&"fleet".into(), "l")?;
    let view = page.viewmodel(&"fleet".into()).ok_or_else(|| ShowcaseError::Content("fleet".into()))?;
    let delays: Vec<(&str, u64)> = view
        .display_items
        .iter()
        .filter(|item| !item.is_revealed)
        .map(|item| (item.id.as_str(), item.reveal_delay_ms))
        .collect();
    assert_eq!(delays, vec![("c", 0), ("d", 100)]);
    assert_eq!(page.timers().next_due(), Some(Duration::ZERO));
    assert_eq!(page.timers().pending(), 2);

    assert_eq!(page.advance(Duration::ZERO)?, 1);
    assert_eq!(page.advance(STEP)?, 1);
    assert_eq!(page.section(&"fleet".into()).map(|s| s.phase()), Some(RevealPhase::Settled));
    Ok(())
}

#[test]
fn duplicate_item_ids_are_rejected() {
    let mut page = page();
    let items = vec![Item::new("a", "Metro bus", "vehicles"), Item::new("a", "Shunter", "locomotives")];
    let err = page.mount("fleet".into(), "fleet-grid".into(), items);
    assert!(matches!(err, Err(ShowcaseError::Content(_))));
    assert!(page.section(&"fleet".into()).is_none());
    assert_eq!(page.observer().observed_count(), 0);
}

#[test]
fn shared_container_element_is_rejected() -> Result<()> {
    let mut page = page();
    page.mount("stats".into(), "hero".into(), vec![Item::new("s", "42 countries", "reach")])?;
    let err = page.mount("news".into(), "hero".into(), vec![Item::new("n", "New plant", "press")]);
    assert!(matches!(err, Err(ShowcaseError::DuplicateElement(element)) if element == "hero"));

    page.on_intersection(&"hero".into(), 1.0)?;
    assert!(page.has_entered_view(&"stats".into()));
    Ok(())
}
