#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://avatars.githubusercontent.com/u/79236386")]
#![doc(html_favicon_url = "https://avatars.githubusercontent.com/u/79236386")]
#![deny(missing_docs)]

mod controller;
pub use controller::*;

mod hook;
pub use hook::*;

mod options;
pub use options::*;

mod params;
pub use params::*;

/// Re-exports of the history providers the hooks run on.
pub mod history {
    pub use dioxus_query_history::*;
}
