use crate::error::SysResult;
use crate::types::InterfaceInfo;

/// Network-interface enumeration consumed by the `ifconfig` handler.
pub trait NetworkInfo {
    fn interfaces(&self) -> SysResult<Vec<InterfaceInfo>>;
}

impl<N: NetworkInfo + ?Sized> NetworkInfo for Box<N> {
    fn interfaces(&self) -> SysResult<Vec<InterfaceInfo>> {
        (**self).interfaces()
    }
}
