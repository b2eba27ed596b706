use std::collections::BTreeMap;

use crate::error::RouterError;
use crate::history::{History, HistoryState, PopEvent};
use crate::page::Page;

/// What a page handler is asked to apply: `active` becomes visible, every
/// other registered page is hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition<'a> {
    pub active: Page,
    pub registered: &'a [Page],
    pub payload: Option<&'a str>,
    /// Whether this transition replays a history entry.
    pub replay: bool,
}

impl Transition<'_> {
    pub fn is_visible(&self, page: Page) -> bool {
        page == self.active
    }

    pub fn hidden(&self) -> impl Iterator<Item = Page> + '_ {
        self.registered
            .iter()
            .copied()
            .filter(move |page| *page != self.active)
    }
}

/// Visibility handler registered for one page.
pub type PageHandler = Box<dyn FnMut(&Transition<'_>)>;

/// Page visibility state machine bound to a [`History`].
pub struct Router<H> {
    history: H,
    handlers: BTreeMap<Page, PageHandler>,
    landing: Page,
    current: Option<HistoryState>,
}

impl<H: History> Router<H> {
    /// Create a router whose fallback page is `landing`.
    pub fn new(history: H, landing: Page) -> Self {
        Self {
            history,
            handlers: BTreeMap::new(),
            landing,
            current: None,
        }
    }

    /// Register the visibility handler for `page`. Registering a page again
    /// replaces its handler.
    pub fn add_page(&mut self, page: Page, handler: impl FnMut(&Transition<'_>) + 'static) {
        if self.handlers.insert(page, Box::new(handler)).is_some() {
            tracing::debug!(%page, "page handler replaced");
        }
    }

    pub fn is_registered(&self, page: Page) -> bool {
        self.handlers.contains_key(&page)
    }

    /// Show the page designated by the current history entry, or the landing
    /// page. Does not push history.
    pub fn start(&mut self) -> Result<(), RouterError> {
        let state = self
            .history
            .current()
            .unwrap_or_else(|| HistoryState::new(self.landing));
        self.transition(state, true)
    }

    pub fn navigate(&mut self, page: Page, replay: bool) -> Result<(), RouterError> {
        self.transition(HistoryState::new(page), replay)
    }

    /// Navigate to `page` carrying `payload` in the history entry.
    pub fn navigate_with(
        &mut self,
        page: Page,
        payload: impl Into<String>,
        replay: bool,
    ) -> Result<(), RouterError> {
        self.transition(HistoryState::with_payload(page, payload), replay)
    }

    /// Replay a back/forward traversal. Never pushes history.
    pub fn handle_pop(&mut self, event: PopEvent) -> Result<(), RouterError> {
        let state = event
            .state
            .unwrap_or_else(|| HistoryState::new(self.landing));
        self.transition(state, true)
    }

    fn transition(&mut self, state: HistoryState, replay: bool) -> Result<(), RouterError> {
        let registered: Vec<Page> = self.handlers.keys().copied().collect();
        let handler = self
            .handlers
            .get_mut(&state.page)
            .ok_or_else(|| RouterError::UnknownPage(state.page.to_string()))?;

        handler(&Transition {
            active: state.page,
            registered: &registered,
            payload: state.payload.as_deref(),
            replay,
        });

        if !replay {
            self.history.push(state.clone());
        }
        tracing::debug!(page = %state.page, replay, "navigated");
        self.current = Some(state);
        Ok(())
    }

    /// The active page, once any navigation has happened.
    pub fn active(&self) -> Option<Page> {
        self.current.as_ref().map(|state| state.page)
    }

    /// Payload of the active navigation.
    pub fn payload(&self) -> Option<&str> {
        self.current.as_ref()?.payload.as_deref()
    }

    pub fn current(&self) -> Option<&HistoryState> {
        self.current.as_ref()
    }

    pub fn landing(&self) -> Page {
        self.landing
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::history::MemoryHistory;

    type Calls = Rc<RefCell<Vec<(Page, bool)>>>;
    type Visible = Rc<RefCell<BTreeMap<Page, bool>>>;

    /// Router with every page registered. Handlers record calls and maintain a
    /// visibility map the way a DOM handler toggles classes.
    fn router() -> (Router<MemoryHistory>, Calls, Visible) {
        let calls = Calls::default();
        let visible = Visible::default();
        let mut router = Router::new(MemoryHistory::new(), Page::Landing);
        for page in Page::ALL {
            let calls = calls.clone();
            let visible = visible.clone();
            router.add_page(page, move |t: &Transition<'_>| {
                calls.borrow_mut().push((page, t.replay));
                let mut visible = visible.borrow_mut();
                visible.insert(t.active, true);
                for hidden in t.hidden() {
                    visible.insert(hidden, false);
                }
            });
        }
        (router, calls, visible)
    }

    fn visible_pages(visible: &Visible) -> Vec<Page> {
        visible
            .borrow()
            .iter()
            .filter(|(_, v)| **v)
            .map(|(p, _)| *p)
            .collect()
    }

    #[test]
    fn test_back_replays_without_pushing() {
        let (mut router, calls, visible) = router();
        router.start().unwrap();
        assert_eq!(router.history().len(), 1);

        router.navigate(Page::Explore, false).unwrap();
        assert_eq!(router.history().len(), 2);

        let event = router.history_mut().back().unwrap();
        router.handle_pop(event).unwrap();

        assert_eq!(router.active(), Some(Page::Landing));
        assert_eq!(router.history().len(), 2);
        assert_eq!(visible_pages(&visible), vec![Page::Landing]);

        let explore_forward = calls
            .borrow()
            .iter()
            .filter(|(p, replay)| *p == Page::Explore && !replay)
            .count();
        assert_eq!(explore_forward, 1);
        assert_eq!(calls.borrow().last(), Some(&(Page::Landing, true)));
    }

    #[test]
    fn test_forward_replays_recorded_page() {
        let (mut router, _, _) = router();
        router.start().unwrap();
        router
            .navigate_with(Page::RecipeInfo, "716429", false)
            .unwrap();
        router.navigate(Page::SavedRecipes, false).unwrap();

        let back = router.history_mut().back().unwrap();
        router.handle_pop(back).unwrap();
        assert_eq!(router.active(), Some(Page::RecipeInfo));
        assert_eq!(router.payload(), Some("716429"));

        let forward = router.history_mut().forward().unwrap();
        router.handle_pop(forward).unwrap();
        assert_eq!(router.active(), Some(Page::SavedRecipes));
        assert_eq!(router.payload(), None);
        assert_eq!(router.history().len(), 3);
    }

    #[test]
    fn test_exactly_one_page_visible() {
        let (mut router, _, visible) = router();
        for page in [Page::Explore, Page::SearchResults, Page::CreateRecipe, Page::Landing] {
            router.navigate(page, false).unwrap();
            assert_eq!(visible_pages(&visible), vec![page]);
        }
    }

    #[test]
    fn test_unregistered_page_fails_without_side_effects() {
        let mut router = Router::new(MemoryHistory::new(), Page::Landing);
        router.add_page(Page::Landing, |_: &Transition<'_>| {});

        let err = router.navigate(Page::Explore, false).unwrap_err();
        assert_eq!(err, RouterError::UnknownPage("explore".to_string()));
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.active(), None);

        router.navigate(Page::Landing, false).unwrap();
        assert_eq!(router.active(), Some(Page::Landing));
    }

    #[test]
    fn test_re_registration_replaces_handler() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut router = Router::new(MemoryHistory::new(), Page::Landing);

        let first = hits.clone();
        router.add_page(Page::Explore, move |_: &Transition<'_>| {
            first.borrow_mut().push("first")
        });
        let second = hits.clone();
        router.add_page(Page::Explore, move |_: &Transition<'_>| {
            second.borrow_mut().push("second")
        });

        router.navigate(Page::Explore, false).unwrap();
        assert_eq!(*hits.borrow(), vec!["second"]);
    }

    #[test]
    fn test_every_forward_navigation_pushes() {
        let (mut router, calls, _) = router();
        router.navigate(Page::Explore, false).unwrap();
        router.navigate(Page::Explore, false).unwrap();
        assert_eq!(router.history().len(), 3);

        router.navigate(Page::Explore, true).unwrap();
        assert_eq!(router.history().len(), 3);
        assert_eq!(calls.borrow().len(), 3);
    }

    #[test]
    fn test_start_uses_history_state() {
        let history = MemoryHistory::starting_at(HistoryState::new(Page::SavedRecipes));
        let mut router = Router::new(history, Page::Landing);
        router.add_page(Page::SavedRecipes, |_: &Transition<'_>| {});
        router.start().unwrap();

        assert_eq!(router.active(), Some(Page::SavedRecipes));
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn test_pop_without_state_lands() {
        let (mut router, _, _) = router();
        router.navigate(Page::Explore, false).unwrap();
        router.handle_pop(PopEvent { state: None }).unwrap();
        assert_eq!(router.active(), Some(router.landing()));
    }
}
