use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::{Event, Window};

use crate::{History, HistoryError, NavigationListener};

/// A [`History`] provider that integrates with a browser via the [History API] and
/// [Location API].
///
/// Navigation listeners are backed by the window's `popstate` event, which the browser fires for
/// back and forward navigations but not for `pushState`/`replaceState`.
///
/// [History API]: https://developer.mozilla.org/en-US/docs/Web/API/History_API
/// [Location API]: https://developer.mozilla.org/en-US/docs/Web/API/Location
#[derive(Clone)]
pub struct WebHistory {
    window: Window,
    history: web_sys::History,
}

impl WebHistory {
    /// Connect to the current browser window.
    ///
    /// # Panics
    ///
    /// Panics outside of a browser. Use [`WebHistory::try_new`] where that can happen.
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Connect to the current browser window, failing if there is none.
    pub fn try_new() -> Result<Self, HistoryError> {
        let window = web_sys::window().ok_or(HistoryError::NoWindow)?;
        let history = window
            .history()
            .map_err(|err| HistoryError::NoHistory(format!("{err:?}")))?;

        Ok(Self { window, history })
    }
}

impl Default for WebHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for WebHistory {
    fn current_path(&self) -> String {
        let path = self.window.location().pathname().unwrap_or_else(|err| {
            tracing::error!("failed to read the current path: {err:?}");
            String::from("/")
        });

        match path.starts_with('/') {
            true => path,
            false => format!("/{path}"),
        }
    }

    fn current_query(&self) -> Option<String> {
        let search = match self.window.location().search() {
            Ok(search) => search,
            Err(err) => {
                tracing::error!("failed to read the current query: {err:?}");
                return None;
            }
        };

        let query = search.strip_prefix('?').unwrap_or(&search);
        match query.is_empty() {
            true => None,
            false => Some(query.to_string()),
        }
    }

    fn push(&self, url: String) {
        tracing::trace!("pushing {url}");
        if let Err(err) = self
            .history
            .push_state_with_url(&JsValue::NULL, "", Some(&url))
        {
            tracing::error!("failed to push state: {err:?}");
        }
    }

    fn replace(&self, url: String) {
        tracing::trace!("replacing with {url}");
        if let Err(err) = self
            .history
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
        {
            tracing::error!("failed to replace state: {err:?}");
        }
    }

    fn go_back(&self) {
        if let Err(err) = self.history.back() {
            tracing::error!("failed to go back: {err:?}");
        }
    }

    fn go_forward(&self) {
        if let Err(err) = self.history.forward() {
            tracing::error!("failed to go forward: {err:?}");
        }
    }

    fn length(&self) -> usize {
        match self.history.length() {
            Ok(length) => length as usize,
            Err(err) => {
                tracing::error!("failed to read the history length: {err:?}");
                1
            }
        }
    }

    fn on_navigation(&self, callback: Rc<dyn Fn(f64)>) -> NavigationListener {
        tracing::debug!("listening for popstate");
        let listener = EventListener::new(&self.window, "popstate", move |event: &Event| {
            callback(event.time_stamp())
        });

        NavigationListener::new(move || {
            tracing::debug!("removing popstate listener");
            drop(listener);
        })
    }
}
