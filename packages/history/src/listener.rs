/// A subscription to back/forward navigations, returned by [`History::on_navigation`].
///
/// The subscription is released when the listener is dropped, on every exit path, including
/// unwinding out of a component. Call [`NavigationListener::detach`] to make the release explicit.
///
/// [`History::on_navigation`]: crate::History::on_navigation
#[must_use = "dropping the listener unsubscribes immediately"]
pub struct NavigationListener {
    release: Option<Box<dyn FnOnce()>>,
}

impl NavigationListener {
    /// Create a listener that runs `release` exactly once when it is dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A listener that is not connected to anything.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Whether dropping this listener will release a subscription.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Release the subscription now.
    pub fn detach(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for NavigationListener {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for NavigationListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationListener")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn releases_once_on_drop() {
        let released = Rc::new(Cell::new(0));
        let listener = {
            let released = released.clone();
            NavigationListener::new(move || released.set(released.get() + 1))
        };
        assert!(listener.is_active());

        drop(listener);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn detach_releases_immediately() {
        let released = Rc::new(Cell::new(false));
        let listener = {
            let released = released.clone();
            NavigationListener::new(move || released.set(true))
        };

        listener.detach();
        assert!(released.get());
    }

    #[test]
    fn releases_while_unwinding() {
        let released = Rc::new(Cell::new(false));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let released = released.clone();
            let _listener = NavigationListener::new(move || released.set(true));
            panic!("component panicked");
        }));

        assert!(result.is_err());
        assert!(released.get());
    }

    #[test]
    fn detached_listener_is_inert() {
        let listener = NavigationListener::detached();
        assert!(!listener.is_active());
        drop(listener);
    }
}
