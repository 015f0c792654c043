use std::rc::Rc;

use dioxus_core::{use_drop, use_hook};
use dioxus_query_history::{history, NavigationListener};
use dioxus_signals::*;

use crate::{QueryController, QueryOptions, QueryParams};

/// A handle to the query parameters of the current URL, returned by [`use_query`],
/// [`use_pro_query`] and [`use_query_with`].
///
/// Every clone refers to the same controller. Reading [`UseQuery::navigation_marker`] subscribes
/// the component, so it re-renders after back/forward navigations.
#[derive(Clone)]
pub struct UseQuery {
    controller: Rc<QueryController>,
    marker: Signal<Option<f64>>,
    _rerender: Rc<NavigationListener>,
}

impl UseQuery {
    /// Get the value of `name`, or an empty string if it is not set.
    pub fn get(&self, name: &str) -> String {
        self.controller.get(name)
    }

    /// Whether `name` is set, even to an empty value.
    pub fn has(&self, name: &str) -> bool {
        self.controller.has(name)
    }

    /// A snapshot of every parameter of the current URL.
    pub fn params(&self) -> QueryParams {
        self.controller.params()
    }

    /// Set `name` to `value`, see [`QueryController::set`].
    pub fn set(&self, name: &str, value: &str) {
        self.controller.set(name, value)
    }

    /// Remove `name`, see [`QueryController::remove`].
    pub fn remove(&self, name: &str) {
        self.controller.remove(name)
    }

    /// Remove the whole query, see [`QueryController::remove_all`].
    pub fn remove_all(&self) {
        self.controller.remove_all()
    }

    /// The timestamp of the last back/forward navigation since the component was mounted.
    pub fn navigation_marker(&self) -> Option<f64> {
        self.marker.cloned()
    }

    /// The controller behind this handle.
    pub fn controller(&self) -> &QueryController {
        &self.controller
    }
}

impl PartialEq for UseQuery {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}

/// Read and write the URL query, replacing the current history entry on every change.
#[doc = include_str!("../docs/rules_of_hooks.md")]
pub fn use_query() -> UseQuery {
    use_query_with(QueryOptions::basic())
}

/// Read and write the URL query and track back/forward navigations.
///
/// With `preserve_history`, every change adds a history entry the user can go back to.
#[doc = include_str!("../docs/rules_of_hooks.md")]
pub fn use_pro_query(preserve_history: bool) -> UseQuery {
    use_query_with(QueryOptions::pro(preserve_history))
}

/// Read and write the URL query with custom [`QueryOptions`].
///
/// The history comes from the context (see
/// [`provide_history_context`](dioxus_query_history::provide_history_context)), or the platform
/// default if none was provided. Options are read once, when the component is created.
#[doc = include_str!("../docs/rules_of_hooks.md")]
pub fn use_query_with(options: QueryOptions) -> UseQuery {
    let query = use_hook(|| {
        let controller = Rc::new(QueryController::new(history(), options));
        let marker = Signal::new(None);

        let rerender = controller.on_navigation(move |timestamp| {
            let mut marker = marker;
            marker.set(Some(timestamp));
        });

        UseQuery {
            controller,
            marker,
            _rerender: Rc::new(rerender),
        }
    });

    use_drop({
        let controller = query.controller.clone();
        move || controller.unmount()
    });

    query
}
