use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use slab::Slab;
use url::Url;

use crate::{History, HistoryError, NavigationListener};

const BASE: &str = "dioxus://index.html/";

type Listeners = RefCell<Slab<Rc<dyn Fn(f64)>>>;

struct MemoryHistoryState {
    current: Url,
    history: Vec<Url>,
    future: Vec<Url>,
}

/// A [`History`] provider that stores all navigation information in memory.
///
/// Back and forward navigations notify the listeners registered with
/// [`History::on_navigation`], like a browser's `popstate` event. The timestamp passed to them
/// comes from the history's clock, see [`MemoryHistory::with_clock`].
pub struct MemoryHistory {
    state: RefCell<MemoryHistoryState>,
    listeners: Rc<Listeners>,
    clock: Box<dyn Fn() -> f64>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] starting at `path`.
    ///
    /// ```rust
    /// # use dioxus_query_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/page?foo=1");
    /// assert_eq!(history.current_url(), "/page?foo=1");
    /// assert_eq!(history.can_go_back(), false);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` cannot be resolved to a URL. Use [`MemoryHistory::try_with_initial_path`]
    /// to handle that case.
    pub fn with_initial_path(path: impl ToString) -> Self {
        Self::try_with_initial_path(path).unwrap_or_else(|err| {
            panic!("{err}\n use MemoryHistory::try_with_initial_path to handle invalid paths")
        })
    }

    /// Create a [`MemoryHistory`] starting at `path`, failing if it is not a valid path.
    ///
    /// ```rust
    /// # use dioxus_query_history::{HistoryError, MemoryHistory};
    /// let err = MemoryHistory::try_with_initial_path("//elsewhere.com/").err();
    /// assert!(matches!(err, Some(HistoryError::ProtocolRelative(_))));
    /// ```
    pub fn try_with_initial_path(path: impl ToString) -> Result<Self, HistoryError> {
        let current = resolve(&base(), &path.to_string())?;

        Ok(Self {
            state: MemoryHistoryState {
                current,
                history: Vec::new(),
                future: Vec::new(),
            }
            .into(),
            listeners: Default::default(),
            clock: Box::new(now),
        })
    }

    /// Replace the clock that timestamps back/forward navigations.
    ///
    /// ```rust
    /// # use std::rc::Rc;
    /// # use dioxus_query_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default().with_clock(|| 42.0);
    /// history.push(String::from("/next"));
    ///
    /// let _listener = history.on_navigation(Rc::new(|timestamp: f64| assert_eq!(timestamp, 42.0)));
    /// history.go_back();
    /// ```
    pub fn with_clock(mut self, clock: impl Fn() -> f64 + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The number of navigation listeners currently subscribed.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn navigate(&self, url: &str) -> Option<Url> {
        let current = self.state.borrow().current.clone();
        match resolve(&current, url) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::error!("{err}");
                None
            }
        }
    }

    fn notify(&self) {
        let timestamp = (self.clock)();

        // Collect first so listeners are free to subscribe, unsubscribe or navigate.
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(timestamp);
        }
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.state.borrow().current.path().to_string()
    }

    fn current_query(&self) -> Option<String> {
        self.state
            .borrow()
            .current
            .query()
            .filter(|query| !query.is_empty())
            .map(str::to_string)
    }

    fn push(&self, url: String) {
        let Some(new) = self.navigate(&url) else {
            return;
        };

        tracing::trace!("pushing {new}");
        let mut write = self.state.borrow_mut();
        let old = std::mem::replace(&mut write.current, new);
        write.history.push(old);
        write.future.clear();
    }

    fn replace(&self, url: String) {
        let Some(new) = self.navigate(&url) else {
            return;
        };

        tracing::trace!("replacing with {new}");
        self.state.borrow_mut().current = new;
    }

    fn can_go_back(&self) -> bool {
        !self.state.borrow().history.is_empty()
    }

    fn go_back(&self) {
        {
            let mut write = self.state.borrow_mut();
            let Some(last) = write.history.pop() else {
                return;
            };
            let old = std::mem::replace(&mut write.current, last);
            write.future.push(old);
        }

        self.notify();
    }

    fn can_go_forward(&self) -> bool {
        !self.state.borrow().future.is_empty()
    }

    fn go_forward(&self) {
        {
            let mut write = self.state.borrow_mut();
            let Some(next) = write.future.pop() else {
                return;
            };
            let old = std::mem::replace(&mut write.current, next);
            write.history.push(old);
        }

        self.notify();
    }

    fn length(&self) -> usize {
        let state = self.state.borrow();
        state.history.len() + 1 + state.future.len()
    }

    fn on_navigation(&self, callback: Rc<dyn Fn(f64)>) -> NavigationListener {
        let key = self.listeners.borrow_mut().insert(callback);
        let listeners: Weak<Listeners> = Rc::downgrade(&self.listeners);

        NavigationListener::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().try_remove(key);
            }
        })
    }
}

fn base() -> Url {
    // BASE is a valid absolute URL
    Url::parse(BASE).expect("memory history base url is valid")
}

fn resolve(current: &Url, path: &str) -> Result<Url, HistoryError> {
    if path.starts_with("//") {
        return Err(HistoryError::ProtocolRelative(path.to_string()));
    }

    current.join(path).map_err(|source| HistoryError::InvalidPath {
        path: path.to_string(),
        source,
    })
}

#[cfg(all(target_family = "wasm", feature = "web"))]
fn now() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(all(target_family = "wasm", feature = "web")))]
fn now() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn starts_at_initial_path() {
        let history = MemoryHistory::with_initial_path("/page?foo=1");
        assert_eq!(history.current_path(), "/page");
        assert_eq!(history.current_query().as_deref(), Some("foo=1"));
        assert_eq!(history.length(), 1);
    }

    #[test]
    fn empty_query_is_none() {
        let history = MemoryHistory::with_initial_path("/page?");
        assert_eq!(history.current_query(), None);
        assert_eq!(history.current_url(), "/page");
    }

    #[test]
    fn push_adds_entry_and_clears_future() {
        let history = MemoryHistory::with_initial_path("/page");
        history.push(String::from("/page?a=1"));
        history.push(String::from("/page?a=2"));
        assert_eq!(history.length(), 3);

        history.go_back();
        assert_eq!(history.current_url(), "/page?a=1");
        assert!(history.can_go_forward());

        history.push(String::from("/other"));
        assert!(!history.can_go_forward());
        assert_eq!(history.length(), 3);
    }

    #[test]
    fn replace_keeps_length() {
        let history = MemoryHistory::with_initial_path("/page");
        history.replace(String::from("/page?a=1"));
        history.replace(String::from("/page?a=2"));

        assert_eq!(history.current_url(), "/page?a=2");
        assert_eq!(history.length(), 1);
        assert!(!history.can_go_back());
    }

    #[test]
    fn rejects_protocol_relative_paths() {
        let history = MemoryHistory::with_initial_path("/page");
        history.push(String::from("//evil.example/"));
        history.replace(String::from("//evil.example/"));

        assert_eq!(history.current_url(), "/page");
        assert_eq!(history.length(), 1);
    }

    #[test]
    fn back_and_forward_notify_listeners() {
        let history = MemoryHistory::with_initial_path("/").with_clock(|| 7.5);
        history.push(String::from("/next"));

        let seen = Rc::new(Cell::new(None));
        let listener = history.on_navigation({
            let seen = seen.clone();
            Rc::new(move |timestamp: f64| seen.set(Some(timestamp)))
        });

        history.replace(String::from("/next?x=1"));
        assert_eq!(seen.get(), None, "replace is not a back/forward navigation");

        history.go_back();
        assert_eq!(seen.get(), Some(7.5));
        assert_eq!(history.current_url(), "/");

        seen.set(None);
        history.go_forward();
        assert_eq!(seen.get(), Some(7.5));
        assert_eq!(history.current_url(), "/next?x=1");

        drop(listener);
        assert_eq!(history.listener_count(), 0);
    }

    #[test]
    fn going_nowhere_does_not_notify() {
        let history = MemoryHistory::default();
        let fired = Rc::new(Cell::new(false));
        let _listener = history.on_navigation({
            let fired = fired.clone();
            Rc::new(move |_: f64| fired.set(true))
        });

        history.go_back();
        history.go_forward();
        assert!(!fired.get());
    }

    #[test]
    fn listener_outliving_history_is_harmless() {
        let history = MemoryHistory::default();
        let listener = history.on_navigation(Rc::new(|_: f64| {}));
        drop(history);
        drop(listener);
    }
}
