// OS boundary: one sysctl request for the extended interface list.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The kernel table does not fit in the supplied buffer (ENOMEM).
    #[error("interface table does not fit in {capacity} bytes")]
    BufferTooSmall { capacity: usize },
    /// Doubling the buffer would overflow `usize`.
    #[error("interface table buffer cannot grow past {capacity} bytes")]
    BufferOverflow { capacity: usize },
    #[error("interface table sysctl failed: {0}")]
    Os(#[from] std::io::Error),
    #[error("interface table sysctl is not available on this platform")]
    Unsupported,
}

/// Source of the raw interface table.
///
/// `fetch` fills `buf` (whose length is the maximum reply size) and returns the
/// number of bytes written, or [`FetchError::BufferTooSmall`] so the caller can
/// grow the buffer and retry.
pub trait InterfaceTable {
    fn fetch(&mut self, buf: &mut [u8]) -> Result<usize, FetchError>;
}

/// `sysctl({CTL_NET, PF_ROUTE, 0, 0, NET_RT_IFLIST2, 0})`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysctlTable;

impl SysctlTable {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceTable for SysctlTable {
    #[cfg(target_vendor = "apple")]
    fn fetch(&mut self, buf: &mut [u8]) -> Result<usize, FetchError> {
        let mut mib: [libc::c_int; 6] = [
            libc::CTL_NET,
            libc::PF_ROUTE,
            0,
            0,
            libc::NET_RT_IFLIST2,
            0,
        ];
        let capacity = buf.len();
        let mut len: libc::size_t = capacity;
        // SAFETY: `mib` is a valid 6-element name, `buf` is writable for `len`
        // bytes, and the kernel updates `len` to the bytes actually written.
        let rc = unsafe {
            libc::sysctl(
                mib.as_mut_ptr(),
                mib.len() as libc::c_uint,
                buf.as_mut_ptr().cast(),
                &mut len,
                std::ptr::null_mut(),
                0,
            )
        };
        if rc == 0 {
            return Ok(len.min(capacity));
        }
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ENOMEM) {
            Err(FetchError::BufferTooSmall { capacity })
        } else {
            Err(FetchError::Os(err))
        }
    }

    #[cfg(not(target_vendor = "apple"))]
    fn fetch(&mut self, _buf: &mut [u8]) -> Result<usize, FetchError> {
        Err(FetchError::Unsupported)
    }
}
