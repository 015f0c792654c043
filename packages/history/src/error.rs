/// Errors raised while connecting to or configuring a history provider.
///
/// Navigation itself never fails from the caller's point of view: providers log host failures
/// and carry on. These errors only surface from fallible constructors.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The path could not be resolved to a URL.
    #[error("invalid path {path:?}: {source}")]
    InvalidPath {
        /// The rejected path.
        path: String,
        /// Why the URL parser rejected it.
        #[source]
        source: url::ParseError,
    },

    /// Paths starting with `//` would be resolved as a different host.
    #[error(r#"cannot navigate to paths starting with "//", path: {0}"#)]
    ProtocolRelative(String),

    /// There is no `window`, e.g. when rendering on a server or in a worker.
    #[error("no `window` is available in this environment")]
    NoWindow,

    /// `window.history` exists but could not be accessed.
    #[error("`window.history` is not accessible: {0}")]
    NoHistory(String),
}
