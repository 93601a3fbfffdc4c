//! Helper functions shared by the store, the CLI and the HTTP layer

mod date;
mod url;

pub use date::*;
pub use url::*;
