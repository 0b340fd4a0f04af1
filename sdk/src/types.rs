use std::net::IpAddr;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Regular,
    Directory,
}

/// Read-only view of one directory entry, as reported by the [`FileStore`].
///
/// The permission bits mirror what the store can actually answer for the
/// current user (readable / writable / executable), not a full mode word.
///
/// [`FileStore`]: crate::FileStore
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub name: String,
    pub file_type: FileType,
    pub size: u64,
    pub modified: SystemTime,
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
}

impl EntryInfo {
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.file_type == FileType::Regular
    }
}

/// One running OS process, as reported by [`ProcessControl::list_processes`].
///
/// [`ProcessControl::list_processes`]: crate::ProcessControl::list_processes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
}

/// Target selector for process termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessTarget {
    Pid(u32),
    Name(String),
}

impl ProcessTarget {
    /// Classify a user-typed token: all digits means a pid, anything else a
    /// process name.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.parse::<u32>() {
            Ok(pid) => Self::Pid(pid),
            Err(_) => Self::Name(token.to_string()),
        }
    }
}

/// One network interface with its assigned addresses.
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    pub name: String,
    pub addrs: Vec<InterfaceAddr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub addr: IpAddr,
    pub prefix_len: u8,
}

impl InterfaceAddr {
    /// Dotted-quad subnet mask for IPv4 prefixes (`24` -> `255.255.255.0`).
    /// Returns `None` for IPv6 addresses, which are rendered as `/prefix`.
    #[must_use]
    pub fn subnet_mask(&self) -> Option<String> {
        match self.addr {
            IpAddr::V4(_) => {
                let mask: u32 = if self.prefix_len == 0 {
                    0
                } else {
                    u32::MAX << (32 - u32::from(self.prefix_len.min(32)))
                };
                Some(format!(
                    "{}.{}.{}.{}",
                    mask >> 24,
                    (mask >> 16) & 0xff,
                    (mask >> 8) & 0xff,
                    mask & 0xff
                ))
            }
            IpAddr::V6(_) => None,
        }
    }
}

/// Shutdown variants the terminal can request from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownRequest {
    /// Power off after the system's default delay (about one minute).
    Delayed,
    /// Power off immediately.
    Now,
    /// Power off at the given wall-clock time, 24-hour format.
    At { hours: u8, minutes: u8 },
    /// Cancel a previously scheduled shutdown.
    Cancel,
}
