use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use dioxus_query_history::{History, NavigationListener};
use slab::Slab;

use crate::{HistoryMode, QueryOptions, QueryParams};

type Followers = RefCell<Slab<Rc<dyn Fn(f64)>>>;

/// Reads and writes the query parameters of a [`History`]'s current URL.
///
/// The URL is the only source of truth: every operation parses the current query again, so
/// changes made elsewhere between two calls are never overwritten with a stale copy.
///
/// ```rust
/// # use std::rc::Rc;
/// # use dioxus_query_history::{History, MemoryHistory};
/// # use dioxus_query_params::{QueryController, QueryOptions};
/// let history = Rc::new(MemoryHistory::with_initial_path("/page?foo=1"));
/// let query = QueryController::new(history.clone(), QueryOptions::default());
///
/// query.set("bar", "2");
/// assert_eq!(history.current_url(), "/page?foo=1&bar=2");
///
/// query.remove("foo");
/// assert_eq!(history.current_url(), "/page?bar=2");
///
/// query.remove_all();
/// assert_eq!(history.current_url(), "/page");
/// ```
pub struct QueryController {
    history: Rc<dyn History>,
    options: QueryOptions,
    marker: Rc<Cell<Option<f64>>>,
    followers: Rc<Followers>,
    listener: RefCell<Option<NavigationListener>>,
}

impl QueryController {
    /// Create a controller over `history`.
    ///
    /// If [`QueryOptions::track_navigation`] is set the controller is mounted right away.
    pub fn new(history: Rc<dyn History>, options: QueryOptions) -> Self {
        let controller = Self {
            history,
            options,
            marker: Default::default(),
            followers: Default::default(),
            listener: RefCell::new(None),
        };
        controller.mount();
        controller
    }

    /// The options this controller was created with.
    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Whether the underlying history is connected to a host.
    pub fn is_attached(&self) -> bool {
        self.history.is_attached()
    }

    /// Whether a navigation listener is currently subscribed.
    pub fn is_tracking(&self) -> bool {
        self.listener
            .borrow()
            .as_ref()
            .is_some_and(NavigationListener::is_active)
    }

    /// Get the value of `name`, or an empty string if it is not set.
    pub fn get(&self, name: &str) -> String {
        if !self.is_attached() {
            return String::new();
        }

        self.params().get(name).unwrap_or_default().to_string()
    }

    /// Whether `name` is set, even to an empty value.
    pub fn has(&self, name: &str) -> bool {
        self.is_attached() && self.params().has(name)
    }

    /// A snapshot of every parameter of the current URL.
    pub fn params(&self) -> QueryParams {
        QueryParams::parse(&self.history.current_query().unwrap_or_default())
    }

    /// Set `name` to `value`.
    ///
    /// Setting a non-empty value that is already the only value of `name` does not touch the
    /// history. Repeated pairs for `name` are collapsed into one. Setting an empty value is always
    /// written, which keeps `name` in the URL with nothing after the `=`.
    pub fn set(&self, name: &str, value: &str) {
        if !self.is_attached() {
            return;
        }

        let mut params = self.params();
        if !value.is_empty() && params.get_all(name).eq([value]) {
            tracing::trace!("{name} is already {value:?}, skipping history update");
            return;
        }

        params.set(name, value);
        self.update_url(Some(&params));
    }

    /// Remove `name` from the URL. Does nothing if it is not set.
    pub fn remove(&self, name: &str) {
        if !self.is_attached() {
            return;
        }

        let mut params = self.params();
        if !params.delete(name) {
            tracing::trace!("{name} is not set, skipping history update");
            return;
        }

        self.update_url(Some(&params));
    }

    /// Remove the whole query from the URL. Does nothing if there is no query.
    pub fn remove_all(&self) {
        if !self.is_attached() {
            return;
        }

        if self.params().is_empty() {
            tracing::trace!("query is already empty, skipping history update");
            return;
        }

        self.update_url(None);
    }

    /// The timestamp of the last back/forward navigation since the controller was mounted.
    ///
    /// Always [`None`] if navigation tracking is disabled.
    pub fn navigation_marker(&self) -> Option<f64> {
        self.marker.get()
    }

    /// Run `callback` with the timestamp of every back/forward navigation, after the navigation
    /// marker was updated.
    ///
    /// The callback stays registered until the returned listener is dropped.
    pub fn on_navigation(&self, callback: impl Fn(f64) + 'static) -> NavigationListener {
        let key = self.followers.borrow_mut().insert(Rc::new(callback));
        let followers = Rc::downgrade(&self.followers);

        NavigationListener::new(move || {
            if let Some(followers) = followers.upgrade() {
                followers.borrow_mut().try_remove(key);
            }
        })
    }

    /// The number of callbacks registered with [`QueryController::on_navigation`].
    pub fn follower_count(&self) -> usize {
        self.followers.borrow().len()
    }

    /// Subscribe to back/forward navigations if tracking is enabled.
    ///
    /// Mounting an already mounted controller does nothing.
    pub fn mount(&self) {
        if !self.options.track_navigation || self.listener.borrow().is_some() {
            return;
        }

        let marker = self.marker.clone();
        let followers = self.followers.clone();
        let listener = self.history.on_navigation(Rc::new(move |timestamp: f64| {
            marker.set(Some(timestamp));

            let followers: Vec<_> = followers
                .borrow()
                .iter()
                .map(|(_, follower)| follower.clone())
                .collect();
            for follower in followers {
                follower(timestamp);
            }
        }));

        tracing::debug!("query controller mounted");
        *self.listener.borrow_mut() = Some(listener);
    }

    /// Unsubscribe from back/forward navigations and forget the navigation marker.
    ///
    /// Dropping the controller unsubscribes as well.
    pub fn unmount(&self) {
        let listener = self.listener.borrow_mut().take();
        if let Some(listener) = listener {
            tracing::debug!("query controller unmounted");
            listener.detach();
        }

        self.marker.set(None);
    }

    /// Write `params` back to the URL, or drop the query entirely if there are none.
    fn update_url(&self, params: Option<&QueryParams>) {
        let path = self.history.current_path();
        let url = match params {
            Some(params) if !params.is_empty() => format!("{path}?{params}"),
            _ => path,
        };

        match self.options.history_mode() {
            HistoryMode::Push => self.history.push(url),
            HistoryMode::Replace => self.history.replace(url),
        }
    }
}

impl std::fmt::Debug for QueryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryController")
            .field("options", &self.options)
            .field("attached", &self.is_attached())
            .field("tracking", &self.is_tracking())
            .field("navigation_marker", &self.navigation_marker())
            .finish()
    }
}
