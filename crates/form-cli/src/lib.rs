//! Library components of the `formcheck` command-line host.

pub mod lint;
pub mod logging;
pub mod report;
pub mod session;
