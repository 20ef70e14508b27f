//! Payment code construction: field formatting, length reconciliation,
//! check digits, and the code builder that ties them together.

mod builder;
mod checksum;
mod config;
mod error;
mod format;
mod reconcile;

pub use builder::*;
pub use checksum::*;
pub use config::*;
pub use error::*;
pub use format::*;
pub use reconcile::*;
