/// How a changed query is written to the session history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HistoryMode {
    /// Overwrite the current history entry. The back button skips over the change.
    #[default]
    Replace,
    /// Add a new history entry. The back button returns to the previous query.
    Push,
}

/// Global configuration options for a [`QueryController`](crate::QueryController).
///
/// With the `serde` feature, options can be read from an application's configuration. Missing
/// fields take their default.
///
/// ```rust
/// # use dioxus_query_params::{HistoryMode, QueryOptions};
/// let options = QueryOptions::default().with_preserve_history(true);
/// assert_eq!(options.history_mode(), HistoryMode::Push);
/// assert!(!options.track_navigation);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueryOptions {
    /// Push a new history entry for every change instead of replacing the current one.
    pub preserve_history: bool,
    /// Listen for back/forward navigations and record when the last one happened.
    pub track_navigation: bool,
}

impl QueryOptions {
    /// Replace the current entry on every change and do not listen for navigations.
    pub const fn basic() -> Self {
        Self {
            preserve_history: false,
            track_navigation: false,
        }
    }

    /// Listen for navigations, pushing history entries if `preserve_history` is set.
    pub const fn pro(preserve_history: bool) -> Self {
        Self {
            preserve_history,
            track_navigation: true,
        }
    }

    /// Set whether changes push new history entries.
    pub const fn with_preserve_history(mut self, preserve_history: bool) -> Self {
        self.preserve_history = preserve_history;
        self
    }

    /// Set whether back/forward navigations are tracked.
    pub const fn with_track_navigation(mut self, track_navigation: bool) -> Self {
        self.track_navigation = track_navigation;
        self
    }

    /// The history update used for changes.
    pub const fn history_mode(&self) -> HistoryMode {
        match self.preserve_history {
            true => HistoryMode::Push,
            false => HistoryMode::Replace,
        }
    }
}
