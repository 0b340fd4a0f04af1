//! tsh SDK - Core types and collaborator traits for the tsh terminal.
//!
//! The interpreter in the `tsh` crate never touches the operating system
//! directly. Everything it needs from the outside world is expressed here as
//! a trait:
//!
//! - [`FileStore`] - filesystem queries and mutations
//! - [`ProcessControl`] - OS process listing, termination, shutdown
//! - [`NetworkInfo`] - network interface enumeration
//!
//! The `tsh-sys` crate provides the OS-backed implementations; tests swap in
//! in-memory doubles.

mod error;
mod net;
mod process;
mod store;
mod types;

pub use error::{SysError, SysResult};
pub use net::NetworkInfo;
pub use process::ProcessControl;
pub use store::FileStore;
pub use types::{
    EntryInfo, FileType, InterfaceAddr, InterfaceInfo, ProcessInfo, ProcessTarget, ShutdownRequest,
};
