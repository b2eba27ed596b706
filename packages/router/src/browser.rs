//! # Browser history binding
//!
//! [`BrowserHistory`] implements [`History`] over `window.history`, storing
//! each [`HistoryState`] as the entry's state object. [`bind_pop_state`]
//! listens for `popstate` and replays the recalled page through
//! [`Router::handle_pop`], so back/forward never pushes a new entry.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::history::{History, HistoryState, PopEvent};
use crate::router::Router;

/// `window.history`-backed [`History`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    fn history() -> Option<web_sys::History> {
        web_sys::window()?.history().ok()
    }
}

fn decode_state(value: JsValue) -> Option<HistoryState> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    serde_wasm_bindgen::from_value(value).ok()
}

impl History for BrowserHistory {
    fn push(&mut self, state: HistoryState) {
        let Some(history) = Self::history() else {
            tracing::warn!("window.history is unavailable");
            return;
        };
        let value = match serde_wasm_bindgen::to_value(&state) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(page = %state.page, error = %e, "history state not encodable");
                return;
            }
        };
        if let Err(e) = history.push_state(&value, "") {
            tracing::warn!(error = ?e, "pushState failed");
        }
    }

    fn current(&self) -> Option<HistoryState> {
        let value = Self::history()?.state().ok()?;
        decode_state(value)
    }
}

/// Route `popstate` events into `router`.
///
/// The returned closure owns the listener; keep it alive (or `forget` it) for
/// as long as the router should react to back/forward.
pub fn bind_pop_state(
    router: Rc<RefCell<Router<BrowserHistory>>>,
) -> Result<Closure<dyn FnMut(web_sys::PopStateEvent)>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let listener = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
        move |event: web_sys::PopStateEvent| {
            let state = decode_state(event.state());
            if let Err(e) = router.borrow_mut().handle_pop(PopEvent { state }) {
                tracing::error!(error = %e, "popstate navigation failed");
            }
        },
    );
    window.add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())?;
    Ok(listener)
}
