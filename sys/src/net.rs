use tsh_sdk::{InterfaceInfo, NetworkInfo, SysResult};

#[cfg(not(unix))]
use tsh_sdk::SysError;

/// `NetworkInfo` backed by the host OS.
///
/// On unix this walks the `getifaddrs` list; prefix lengths are derived from
/// the netmask of each address. Other platforms report `Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNetworkInfo;

impl OsNetworkInfo {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl NetworkInfo for OsNetworkInfo {
    #[cfg(unix)]
    fn interfaces(&self) -> SysResult<Vec<InterfaceInfo>> {
        unix_impl::interfaces()
    }

    #[cfg(not(unix))]
    fn interfaces(&self) -> SysResult<Vec<InterfaceInfo>> {
        Err(SysError::unsupported("network interface enumeration"))
    }
}

#[cfg(unix)]
mod unix_impl {
    use std::ffi::CStr;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use std::ptr;

    use tsh_sdk::{InterfaceAddr, InterfaceInfo, SysError, SysResult};

    #[allow(unsafe_code)]
    fn sockaddr_ip(sa: *const libc::sockaddr) -> Option<IpAddr> {
        if sa.is_null() {
            return None;
        }
        // SAFETY: `sa` comes from the getifaddrs list and stays valid until
        // freeifaddrs; the family tag tells us which concrete struct it is.
        unsafe {
            match i32::from((*sa).sa_family) {
                libc::AF_INET => {
                    let sin = sa.cast::<libc::sockaddr_in>();
                    Some(IpAddr::V4(Ipv4Addr::from(u32::from_be(
                        (*sin).sin_addr.s_addr,
                    ))))
                }
                libc::AF_INET6 => {
                    let sin6 = sa.cast::<libc::sockaddr_in6>();
                    Some(IpAddr::V6(Ipv6Addr::from((*sin6).sin6_addr.s6_addr)))
                }
                _ => None,
            }
        }
    }

    fn prefix_from_mask(mask: Option<IpAddr>) -> u8 {
        match mask {
            Some(IpAddr::V4(m)) => u32::from(m).count_ones() as u8,
            Some(IpAddr::V6(m)) => u128::from(m).count_ones() as u8,
            None => 0,
        }
    }

    #[allow(unsafe_code)]
    pub(super) fn interfaces() -> SysResult<Vec<InterfaceInfo>> {
        let mut ifap: *mut libc::ifaddrs = ptr::null_mut();
        // SAFETY: getifaddrs allocates the list; it is freed below exactly
        // once, and never dereferenced after that.
        if unsafe { libc::getifaddrs(&mut ifap) } != 0 {
            return Err(SysError::io(std::io::Error::last_os_error()));
        }

        let mut out: Vec<InterfaceInfo> = Vec::new();
        let mut cursor = ifap;
        while !cursor.is_null() {
            let ifa = unsafe { &*cursor };
            cursor = ifa.ifa_next;

            let name = unsafe { CStr::from_ptr(ifa.ifa_name) }
                .to_string_lossy()
                .into_owned();
            let Some(addr) = sockaddr_ip(ifa.ifa_addr) else {
                // Link-layer entry; still record the interface name so that
                // address-less interfaces show up.
                if !out.iter().any(|i| i.name == name) {
                    out.push(InterfaceInfo {
                        name,
                        addrs: Vec::new(),
                    });
                }
                continue;
            };
            let prefix_len = prefix_from_mask(sockaddr_ip(ifa.ifa_netmask));

            let idx = out.iter().position(|i| i.name == name).unwrap_or_else(|| {
                out.push(InterfaceInfo {
                    name,
                    addrs: Vec::new(),
                });
                out.len() - 1
            });
            out[idx].addrs.push(InterfaceAddr { addr, prefix_len });
        }

        unsafe { libc::freeifaddrs(ifap) };
        Ok(out)
    }
}
