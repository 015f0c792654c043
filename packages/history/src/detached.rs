use std::rc::Rc;

use crate::{History, NavigationListener};

/// A [`History`] for environments without a navigable host, such as server side rendering.
///
/// It always reports the root path without a query, ignores every write, and never fires
/// navigation events. Anything built on top of it degrades to a no-op instead of failing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedHistory;

impl History for DetachedHistory {
    fn current_path(&self) -> String {
        String::from("/")
    }

    fn current_query(&self) -> Option<String> {
        None
    }

    fn push(&self, url: String) {
        tracing::trace!("ignoring push to {url} on a detached history");
    }

    fn replace(&self, url: String) {
        tracing::trace!("ignoring replace with {url} on a detached history");
    }

    fn can_go_back(&self) -> bool {
        false
    }

    fn go_back(&self) {}

    fn can_go_forward(&self) -> bool {
        false
    }

    fn go_forward(&self) {}

    fn length(&self) -> usize {
        1
    }

    fn is_attached(&self) -> bool {
        false
    }

    fn on_navigation(&self, _callback: Rc<dyn Fn(f64)>) -> NavigationListener {
        NavigationListener::detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_ignored() {
        let history = DetachedHistory;
        history.push(String::from("/page?foo=1"));
        history.replace(String::from("/other"));

        assert_eq!(history.current_url(), "/");
        assert_eq!(history.length(), 1);
        assert!(!history.is_attached());
    }

    #[test]
    fn never_subscribes() {
        let listener = DetachedHistory.on_navigation(Rc::new(|_: f64| unreachable!()));
        assert!(!listener.is_active());
    }
}
