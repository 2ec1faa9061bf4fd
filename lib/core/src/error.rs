//! Error handling foundation.
//!
//! Only the `Result` alias lives here. Domain errors are defined by the
//! crate that owns them (`skein-engine`, `skein-providers`,
//! `skein-integrations`), each with hand-written `Display` impls; callers
//! add layer context via rootcause's `.context()` where errors cross crate
//! boundaries.

use rootcause::Report;

/// Workspace-wide Result alias over rootcause's `Report`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
