//! Single-page navigation for the recipe browser.
//!
//! [`Router`] is the only authority on which [`Page`] is visible. It drives
//! registered page handlers and records each forward navigation in a
//! [`History`], so back/forward traversal can replay the right page without
//! re-running any side effects.

mod error;
mod history;
mod page;
mod router;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::{bind_pop_state, BrowserHistory};

pub use error::RouterError;
pub use history::{History, HistoryState, MemoryHistory, PopEvent};
pub use page::Page;
pub use router::{PageHandler, Router, Transition};
