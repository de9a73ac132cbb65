//! Section state: the filter/reveal controller of one page section.
//!
//! [`SectionState`] owns a section's static collection, its [`FilterState`], the
//! derived filtered subset, and the bookkeeping of the staggered reveal (which
//! items are pending and which are already revealed). It is the single source of
//! truth for everything the presentation layer binds to.
//!
//! # State Components
//!
//! - **Items**: Immutable content collection supplied by the page
//! - **Filtered**: Indices of items passing the current filter, in collection order
//! - **Phase**: [`RevealPhase`] of the section
//! - **Pending**: Items with a reveal timer in flight, in scheduling order
//! - **Revealed**: Items whose entrance already played; never replayed
//!
//! # Reveal Policy
//!
//! Re-filtering an armed section cancels the timers of items that left the subset
//! and restarts the stagger for every filtered item not yet revealed, so the
//! delays reported by [`SectionState::reveal_schedule`] always match the timers in
//! flight. Revealed items stay revealed for the lifetime of the section even if
//! they leave the subset and come back.
//!
//! # Example
//!
//! ```rust
//! use showcase::app::{RevealPhase, SectionState};
//! use showcase::domain::Item;
//! use std::time::Duration;
//!
//! let items = vec![
//!     Item::new("q1", "Is there a warranty?", "support"),
//!     Item::new("q2", "Do you ship abroad?", "sales"),
//! ];
//! let mut state = SectionState::new("faq".into(), items, Duration::from_millis(100));
//! state.set_query("warranty");
//! assert_eq!(state.filtered_items().len(), 1);
//!
//! let actions = state.arm();
//! assert_eq!(actions.len(), 1);
//! assert_eq!(state.phase(), RevealPhase::Revealing);
//! ```

use super::actions::Action;
use super::modes::RevealPhase;
use crate::domain::item::fold_case;
use crate::domain::{filter, CategorySelection, FilterState, Item, ItemId, SectionId};
use crate::ui::viewmodel::{
    ChipInfo, DisplayItem, EmptyState, HeaderInfo, SearchBarInfo, SectionViewModel,
};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// One entry of the derived reveal schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealEntry {
    /// Index of the item within the filtered list.
    pub position: usize,
    /// The item to reveal.
    pub item: ItemId,
    /// Stagger offset of the entrance animation.
    pub delay: Duration,
}

/// Filter and reveal state of a single section.
#[derive(Debug, Clone)]
pub struct SectionState {
    id: SectionId,
    items: Vec<Item>,
    chips: Vec<String>,
    filter: FilterState,
    filtered: Vec<usize>,
    phase: RevealPhase,
    stagger: Duration,
    pending: Vec<ItemId>,
    revealed: HashSet<ItemId>,
    mounted: bool,
}

impl SectionState {
    /// Creates the controller for a freshly mounted section.
    ///
    /// The section starts in [`RevealPhase::NotArmed`] with an identity filter, so
    /// every item is in the filtered subset but nothing is scheduled yet.
    #[must_use]
    pub fn new(id: SectionId, items: Vec<Item>, stagger: Duration) -> Self {
        let filtered = (0..items.len()).collect();
        Self {
            id,
            items,
            chips: Vec::new(),
            filter: FilterState::default(),
            filtered,
            phase: RevealPhase::NotArmed,
            stagger,
            pending: Vec::new(),
            revealed: HashSet::new(),
            mounted: true,
        }
    }

    /// Sets the category chip keys shown by the view model.
    ///
    /// When no chips are set, the view model derives them from the item categories.
    #[must_use]
    pub fn with_chips(mut self, chips: Vec<String>) -> Self {
        self.chips = chips;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[must_use]
    pub const fn stagger(&self) -> Duration {
        self.stagger
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, item: &ItemId) -> bool {
        self.pending.contains(item)
    }

    #[must_use]
    pub fn is_revealed(&self, item: &ItemId) -> bool {
        self.revealed.contains(item)
    }

    /// Items matching both the query and the category, in collection order.
    #[must_use]
    pub fn filtered_items(&self) -> Vec<&Item> {
        self.filtered.iter().filter_map(|&idx| self.items.get(idx)).collect()
    }

    /// Entrance delay for the item at `index` of the filtered list.
    ///
    /// Always `index × stagger`, saturating instead of overflowing.
    ///
    /// ```rust
    /// use showcase::app::SectionState;
    /// use std::time::Duration;
    ///
    /// let state = SectionState::new("stats".into(), vec![], Duration::from_millis(120));
    /// assert_eq!(state.reveal_delay(0), Duration::ZERO);
    /// assert_eq!(state.reveal_delay(3), Duration::from_millis(360));
    /// ```
    #[must_use]
    pub fn reveal_delay(&self, index: usize) -> Duration {
        let factor = u32::try_from(index).unwrap_or(u32::MAX);
        self.stagger.saturating_mul(factor)
    }

    /// Derives the stagger schedule for every filtered item not yet revealed.
    ///
    /// Delays count only the items still to reveal and are relative to the last
    /// time the section was armed or re-filtered, which is when their timers were
    /// (re)started. A re-filter that adds one new item next to already revealed
    /// ones shows it without dead time.
    #[must_use]
    pub fn reveal_schedule(&self) -> Vec<RevealEntry> {
        self.filtered
            .iter()
            .enumerate()
            .filter_map(|(position, &idx)| {
                let item = self.items.get(idx)?;
                (!self.revealed.contains(&item.id)).then(|| (position, item.id.clone()))
            })
            .enumerate()
            .map(|(ordinal, (position, item))| RevealEntry {
                position,
                item,
                delay: self.reveal_delay(ordinal),
            })
            .collect()
    }

    /// Replaces the query text and re-filters.
    pub fn set_query(&mut self, text: &str) -> Vec<Action> {
        if !self.mounted {
            return vec![];
        }
        text.clone_into(&mut self.filter.query);
        self.apply_filter()
    }

    /// Replaces the category selection and re-filters.
    pub fn set_category(&mut self, selection: CategorySelection) -> Vec<Action> {
        if !self.mounted {
            return vec![];
        }
        self.filter.category = selection;
        self.apply_filter()
    }

    /// Recomputes the filtered subset and reconciles reveal timers with it.
    ///
    /// Cancels timers of items that left the subset. If the section is armed,
    /// restarts the stagger for every filtered item not revealed yet; timers of
    /// items that stayed pending are replaced by ones matching their new position.
    pub fn apply_filter(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("apply_filter",
            section = %self.id,
            total_items = self.items.len(),
            query_len = self.filter.query.len(),
            category = %self.filter.category.key()
        ).entered();

        self.filtered = filter::apply(&self.items, &self.filter);

        let still_visible: HashSet<&ItemId> = self
            .filtered
            .iter()
            .filter_map(|&idx| self.items.get(idx).map(|item| &item.id))
            .collect();

        let (kept, dropped): (Vec<ItemId>, Vec<ItemId>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|id| still_visible.contains(id));
        self.pending = kept;

        let mut actions: Vec<Action> = dropped
            .into_iter()
            .map(|item| {
                tracing::trace!(item = %item, "cancelling reveal of filtered-out item");
                Action::CancelReveal { item }
            })
            .collect();

        if self.phase.is_armed() {
            self.pending.clear();
            actions.extend(self.schedule_unrevealed());
        }

        tracing::debug!(
            filtered_count = self.filtered.len(),
            pending = self.pending.len(),
            phase = ?self.phase,
            "filter applied"
        );

        actions
    }

    /// Arms the section on its first entry into the viewport.
    ///
    /// Subsequent calls are no-ops: arming is one-shot.
    pub fn arm(&mut self) -> Vec<Action> {
        if !self.mounted || self.phase.is_armed() {
            return vec![];
        }
        tracing::debug!(section = %self.id, "section armed");
        self.phase = RevealPhase::Armed;
        self.schedule_unrevealed()
    }

    /// Records that the reveal timer of `item` fired.
    ///
    /// Returns `false` for stale callbacks (item not pending, section unmounted).
    pub fn mark_revealed(&mut self, item: &ItemId) -> bool {
        if !self.mounted {
            return false;
        }
        let Some(pos) = self.pending.iter().position(|p| p == item) else {
            tracing::debug!(section = %self.id, item = %item, "ignoring stale reveal callback");
            return false;
        };

        self.pending.remove(pos);
        self.revealed.insert(item.clone());

        if self.pending.is_empty() {
            tracing::debug!(section = %self.id, "section settled");
            self.phase = RevealPhase::Settled;
        }
        true
    }

    /// Tears the section down, cancelling every pending timer.
    ///
    /// Idempotent: a second call returns no actions.
    pub fn unmount(&mut self) -> Vec<Action> {
        if !self.mounted {
            return vec![];
        }
        self.mounted = false;

        let mut actions: Vec<Action> = std::mem::take(&mut self.pending)
            .into_iter()
            .map(|item| Action::CancelReveal { item })
            .collect();
        actions.push(Action::DetachObserver);

        tracing::debug!(section = %self.id, cancelled = actions.len() - 1, "section unmounted");
        actions
    }

    fn schedule_unrevealed(&mut self) -> Vec<Action> {
        let actions: Vec<Action> = self
            .reveal_schedule()
            .into_iter()
            .map(|entry| {
                tracing::trace!(item = %entry.item, delay_ms = entry.delay.as_millis(), "scheduling reveal");
                Action::ScheduleReveal { item: entry.item, delay: entry.delay }
            })
            .collect();

        for action in &actions {
            if let Action::ScheduleReveal { item, .. } = action {
                self.pending.push(item.clone());
            }
        }

        self.phase = if self.pending.is_empty() {
            RevealPhase::Settled
        } else {
            RevealPhase::Revealing
        };

        actions
    }

    /// Computes the renderable view model of the section.
    #[must_use]
    pub fn compute_viewmodel(&self) -> SectionViewModel {
        let schedule = self.reveal_schedule();
        let query = self.filter.query_filter();

        let display_items = self
            .filtered_items()
            .into_iter()
            .map(|item| {
                let delay = schedule
                    .iter()
                    .find(|entry| entry.item == item.id)
                    .map_or(Duration::ZERO, |entry| entry.delay);
                DisplayItem {
                    id: item.id.to_string(),
                    title: item.title.clone(),
                    category: item.category.clone(),
                    reveal_delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    is_revealed: self.revealed.contains(&item.id),
                    highlight_ranges: query.map_or_else(Vec::new, |q| highlight_ranges(&item.title, q)),
                }
            })
            .collect();

        let empty_state = if self.filtered.is_empty() {
            Some(if self.items.is_empty() {
                EmptyState {
                    message: "Nothing here yet".to_string(),
                    subtitle: "Check back soon".to_string(),
                }
            } else {
                EmptyState {
                    message: "No results".to_string(),
                    subtitle: "Try a different search or category".to_string(),
                }
            })
        } else {
            None
        };

        SectionViewModel {
            section: self.id.to_string(),
            phase: self.phase,
            display_items,
            header: HeaderInfo {
                title: format!("Showing {} of {}", self.filtered.len(), self.items.len()),
            },
            chips: self.compute_chips(),
            empty_state,
            search_bar: query.map(|q| SearchBarInfo { query: q.to_string() }),
        }
    }

    fn compute_chips(&self) -> Vec<ChipInfo> {
        let keys: Vec<String> = if self.chips.is_empty() {
            filter::chip_keys(&self.items)
        } else {
            self.chips.clone()
        };

        keys.into_iter()
            .map(|key| {
                let is_selected = CategorySelection::from_key(&key) == self.filter.category;
                ChipInfo { key, is_selected }
            })
            .collect()
    }
}

/// Byte ranges of case-insensitive occurrences of `query` in `text`.
///
/// Ranges are non-overlapping, `(start, end)` with exclusive end, and always fall
/// on char boundaries of `text`. A match covering only part of a char's folded
/// form (such as the `i` of `İ`) highlights the whole char.
fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle = fold_case(query);
    if needle.is_empty() {
        return vec![];
    }

    // Folded text plus, per folded byte, the byte span of the char it came from.
    let mut folded = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let span = (start, start + c.len_utf8());
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.extend(std::iter::repeat(span).take(lower.len_utf8()));
        }
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (lo, _) in folded.match_indices(needle.as_str()) {
        let hi = lo + needle.len() - 1;
        let (Some(&(start, _)), Some(&(_, end))) = (origin.get(lo), origin.get(hi)) else {
            break;
        };
        match ranges.last_mut() {
            Some(last) if last.1 > start => last.1 = last.1.max(end),
            _ => ranges.push((start, end)),
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq() -> Vec<Item> {
        vec![
            Item::new("q1", "What does the warranty cover?", "support"),
            Item::new("q2", "How do I order spare parts?", "support"),
            Item::new("q3", "Can I extend my warranty?", "sales"),
            Item::new("q4", "Where are you located?", "company"),
        ]
    }

    fn state() -> SectionState {
        SectionState::new("faq".into(), faq(), Duration::from_millis(100))
    }

    fn scheduled(actions: &[Action]) -> Vec<(&str, u128)> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::ScheduleReveal { item, delay } => Some((item.as_str(), delay.as_millis())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn filtering_before_arming_schedules_nothing() {
        let mut s = state();
        assert!(s.set_query("warranty").is_empty());
        assert_eq!(s.phase(), RevealPhase::NotArmed);
        assert_eq!(s.filtered_items().len(), 2);
    }

    #[test]
    fn arming_staggers_filtered_items() {
        let mut s = state();
        s.set_query("warranty");
        let actions = s.arm();
        assert_eq!(scheduled(&actions), vec![("q1", 0), ("q3", 100)]);
        assert_eq!(s.phase(), RevealPhase::Revealing);
        assert!(s.arm().is_empty());
    }

    #[test]
    fn settles_after_last_timer() {
        let mut s = state();
        s.set_query("warranty");
        s.arm();
        assert!(s.mark_revealed(&ItemId::new("q1")));
        assert_eq!(s.phase(), RevealPhase::Revealing);
        assert!(s.mark_revealed(&ItemId::new("q3")));
        assert_eq!(s.phase(), RevealPhase::Settled);
        assert!(!s.mark_revealed(&ItemId::new("q3")));
    }

    #[test]
    fn refilter_cancels_items_that_left() {
        let mut s = state();
        s.arm();
        let actions = s.set_query("warranty");
        assert_eq!(
            actions[..2],
            [
                Action::CancelReveal { item: ItemId::new("q2") },
                Action::CancelReveal { item: ItemId::new("q4") },
            ]
        );
        assert_eq!(scheduled(&actions), vec![("q1", 0), ("q3", 100)]);
        assert_eq!(s.pending_count(), 2);
    }

    #[test]
    fn refilter_restarts_stagger_of_kept_items() {
        let mut s = state();
        s.arm();
        s.mark_revealed(&ItemId::new("q1"));

        let actions = s.set_category(CategorySelection::from_key("sales"));
        assert_eq!(scheduled(&actions), vec![("q3", 0)]);

        let schedule: Vec<(String, u128)> = s
            .reveal_schedule()
            .into_iter()
            .map(|entry| (entry.item.to_string(), entry.delay.as_millis()))
            .collect();
        assert_eq!(schedule, vec![("q3".to_string(), 0)]);
        assert_eq!(s.compute_viewmodel().display_items[0].reveal_delay_ms, 0);
    }

    #[test]
    fn settled_items_are_not_replayed() {
        let mut s = state();
        s.set_query("warranty");
        s.arm();
        s.mark_revealed(&ItemId::new("q1"));
        s.mark_revealed(&ItemId::new("q3"));

        let actions = s.set_query("");
        assert_eq!(scheduled(&actions), vec![("q2", 0), ("q4", 100)]);
        assert_eq!(s.phase(), RevealPhase::Revealing);

        let actions = s.set_query("warranty");
        assert_eq!(actions.len(), 2);
        assert_eq!(s.phase(), RevealPhase::Settled);
    }

    #[test]
    fn empty_subset_settles_immediately() {
        let mut s = state();
        s.set_category(CategorySelection::from_key("trains"));
        assert!(s.arm().is_empty());
        assert_eq!(s.phase(), RevealPhase::Settled);
    }

    #[test]
    fn unmount_cancels_everything_once() {
        let mut s = state();
        s.arm();
        let actions = s.unmount();
        assert_eq!(actions.len(), 5);
        assert_eq!(actions.last(), Some(&Action::DetachObserver));
        assert!(s.unmount().is_empty());
        assert!(s.set_query("x").is_empty());
        assert!(!s.mark_revealed(&ItemId::new("q1")));
    }

    #[test]
    fn highlight_ranges_are_case_insensitive() {
        assert_eq!(highlight_ranges("Warranty and WARRANTY", "warranty"), vec![(0, 8), (13, 21)]);
        assert_eq!(highlight_ranges("Ünterwagen", "ün"), vec![(0, 3)]);
        assert!(highlight_ranges("Bus", "train").is_empty());
    }

    #[test]
    fn highlight_agrees_with_matching_on_multi_char_folds() {
        let item = Item::new("ist", "İstanbul depot", "sites");
        assert!(item.matches_query("i"));
        assert_eq!(highlight_ranges(&item.title, "i"), vec![(0, 2)]);
        assert_eq!(highlight_ranges(&item.title, "STAN"), vec![(2, 6)]);
    }

    #[test]
    fn viewmodel_reports_counts_and_chips() {
        let mut s = state();
        s.set_category(CategorySelection::from_key("support"));
        let vm = s.compute_viewmodel();
        assert_eq!(vm.header.title, "Showing 2 of 4");
        assert_eq!(vm.display_items[1].reveal_delay_ms, 100);
        let keys: Vec<&str> = vm.chips.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["all", "support", "sales", "company"]);
        assert!(vm.chips[1].is_selected);
        assert!(vm.empty_state.is_none());
    }
}
