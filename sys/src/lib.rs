//! OS-backed implementations of the tsh collaborator traits.
//!
//! - [`LocalStore`] - `tsh_sdk::FileStore` over `std::fs`
//! - [`OsProcessControl`] - `tsh_sdk::ProcessControl` over `std::process`
//! - [`OsNetworkInfo`] - `tsh_sdk::NetworkInfo` over `getifaddrs` (unix)
//!
//! Everything here is synchronous and blocking, matching the interpreter's
//! one-command-at-a-time execution model.

mod net;
mod process;
mod store;

pub use net::OsNetworkInfo;
pub use process::OsProcessControl;
pub use store::LocalStore;
