#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://avatars.githubusercontent.com/u/79236386")]
#![doc(html_favicon_url = "https://avatars.githubusercontent.com/u/79236386")]
#![deny(missing_docs)]

use std::rc::Rc;

use dioxus_core::{provide_context, try_consume_context};

mod detached;
pub use detached::*;

mod error;
pub use error::*;

mod listener;
pub use listener::*;

mod memory;
pub use memory::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// Get the history provider for the current component, falling back to the platform default if
/// none was provided.
pub fn history() -> Rc<dyn History> {
    try_history().unwrap_or_else(default_history)
}

/// Get the history provider for the current component, if one was provided.
pub fn try_history() -> Option<Rc<dyn History>> {
    try_consume_context::<Rc<dyn History>>()
}

/// Provide a history provider to the current component and all of its children.
pub fn provide_history_context(history: Rc<dyn History>) -> Rc<dyn History> {
    provide_context(history)
}

/// The history provider used when no provider was put into the context.
///
/// In a browser with the `web` feature enabled this is a [`WebHistory`]. Everywhere else (server
/// rendering, tests, desktop without a router) it is a [`DetachedHistory`], which turns every
/// navigation into a no-op.
pub fn default_history() -> Rc<dyn History> {
    #[cfg(all(feature = "web", target_family = "wasm"))]
    match WebHistory::try_new() {
        Ok(history) => return Rc::new(history),
        Err(err) => tracing::debug!("falling back to a detached history: {err}"),
    }

    Rc::new(DetachedHistory)
}

/// An integration with some kind of navigation history.
///
/// The described behaviors are designed to mimic a web browser's [History API] and [Location API].
/// Implementations for other hosts may deviate, as long as `current_path` and `current_query`
/// keep the described format.
///
/// [History API]: https://developer.mozilla.org/en-US/docs/Web/API/History_API
/// [Location API]: https://developer.mozilla.org/en-US/docs/Web/API/Location
pub trait History {
    /// Get the path of the current URL.
    ///
    /// **Must start** with `/`.
    ///
    /// ```rust
    /// # use dioxus_query_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// assert_eq!(history.current_path(), "/");
    ///
    /// history.push(String::from("/path?tab=2"));
    /// assert_eq!(history.current_path(), "/path");
    /// ```
    #[must_use]
    fn current_path(&self) -> String;

    /// Get the query of the current URL, without the leading `?`.
    ///
    /// Returns [`None`] if the URL has no query or the query is empty.
    ///
    /// ```rust
    /// # use dioxus_query_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/page?foo=1");
    /// assert_eq!(history.current_query().as_deref(), Some("foo=1"));
    ///
    /// history.replace(String::from("/page"));
    /// assert_eq!(history.current_query(), None);
    /// ```
    #[must_use]
    fn current_query(&self) -> Option<String>;

    /// Get the path and query of the current URL, formatted as `<path>[?<query>]`.
    #[must_use]
    fn current_url(&self) -> String {
        match self.current_query() {
            Some(query) => format!("{}?{query}", self.current_path()),
            None => self.current_path(),
        }
    }

    /// Go to another URL, adding a new entry to the navigation history.
    ///
    /// This should do three things:
    /// 1. Resolve `url` (a path, optionally followed by a query) against the current URL.
    /// 2. Move the previous URL to the navigation history.
    /// 3. Clear the navigation future.
    fn push(&self, url: String);

    /// Replace the current URL with another one.
    ///
    /// In contrast to [`History::push`], the navigation history and future stay untouched.
    fn replace(&self, url: String);

    /// Check whether there is a previous page to navigate back to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_back(&self) -> bool {
        true
    }

    /// Go back to a previous page.
    ///
    /// Listeners registered with [`History::on_navigation`] are notified.
    fn go_back(&self);

    /// Check whether there is a future page to navigate forward to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_forward(&self) -> bool {
        true
    }

    /// Go forward to a future page.
    ///
    /// Listeners registered with [`History::on_navigation`] are notified.
    fn go_forward(&self);

    /// The number of entries in the session history, including the current one.
    #[must_use]
    fn length(&self) -> usize;

    /// Whether this history is connected to a real host.
    ///
    /// Detached histories ignore every write, so callers can skip work that only exists to
    /// produce one.
    #[must_use]
    fn is_attached(&self) -> bool {
        true
    }

    /// Subscribe to back/forward navigations that were not triggered by [`History::push`] or
    /// [`History::replace`].
    ///
    /// `callback` receives the timestamp of the navigation in milliseconds. The subscription lives
    /// as long as the returned [`NavigationListener`].
    #[must_use = "dropping the listener unsubscribes immediately"]
    fn on_navigation(&self, callback: Rc<dyn Fn(f64)>) -> NavigationListener;
}
