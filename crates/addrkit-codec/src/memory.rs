//! Memory protection for key material
//!
//! WIF payloads and private keys pass through this crate on their way to and
//! from text. Two measures bound their lifetime:
//!
//! 1. **Zeroize on drop**: [`SecretBuffer`] wipes its contents whenever it is
//!    dropped, so every return path (including `?` early returns) clears it.
//!
//! 2. **Memory locking**: the buffer is `mlock()`ed while alive so the OS
//!    does not swap it to disk.
//!
//! Locking is best-effort: containers and unprivileged users often cannot
//! `mlock`, so failures are logged and the buffer is still zeroized.
//!
//! # Platform Support
//!
//! - Unix: `mlock`/`munlock` via libc
//! - Other: zeroize only

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-length buffer for key material: locked while alive, zeroized on drop.
///
/// # Example
/// ```
/// use addrkit_codec::memory::SecretBuffer;
/// let mut buf = SecretBuffer::new(34);
/// buf.as_mut_slice()[0] = 0x80;
/// // zeroized and unlocked when `buf` goes out of scope
/// ```
pub struct SecretBuffer {
    data: Vec<u8>,
    locked: bool,
}

impl SecretBuffer {
    /// Create a zero-filled buffer of `len` bytes and lock it in memory.
    pub fn new(len: usize) -> Self {
        let data = vec![0u8; len];
        let locked = if data.is_empty() {
            true
        } else {
            lock(&data)
        };

        if !locked {
            log::debug!("failed to mlock {} byte secret buffer", len);
        }

        Self { data, locked }
    }

    /// Copy `bytes` into a new locked buffer.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut buf = Self::new(bytes.len());
        buf.data.copy_from_slice(bytes);
        buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the memory is actually locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl std::fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("len", &self.data.len())
            .field("locked", &self.locked)
            .finish()
    }
}

impl SecretBuffer {
    /// Zero the contents, then unlock. Runs on drop; safe to call twice.
    fn wipe(&mut self) {
        self.data.as_mut_slice().zeroize();

        if self.locked && !self.data.is_empty() {
            unlock(self.data.as_ptr(), self.data.len());
        }
        self.locked = false;
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl ZeroizeOnDrop for SecretBuffer {}

#[cfg(unix)]
fn lock(data: &[u8]) -> bool {
    // SAFETY: `data` is a live allocation of `data.len()` bytes.
    unsafe { unix::mlock_impl(data.as_ptr(), data.len()) }
}

#[cfg(not(unix))]
fn lock(_data: &[u8]) -> bool {
    false
}

#[cfg(unix)]
fn unlock(ptr: *const u8, len: usize) {
    // SAFETY: `ptr`/`len` describe the region passed to `lock`; the
    // allocation is still owned by the buffer being dropped.
    unsafe {
        unix::munlock_impl(ptr, len);
    }
}

#[cfg(not(unix))]
fn unlock(_ptr: *const u8, _len: usize) {}

// ---- Platform implementations ----

#[cfg(unix)]
mod unix {
    pub unsafe fn mlock_impl(ptr: *const u8, len: usize) -> bool {
        if libc::mlock(ptr as *const libc::c_void, len) != 0 {
            log::debug!(
                "mlock failed for {} bytes: {}",
                len,
                std::io::Error::last_os_error()
            );
            return false;
        }
        true
    }

    pub unsafe fn munlock_impl(ptr: *const u8, len: usize) -> bool {
        libc::munlock(ptr as *const libc::c_void, len) == 0
    }
}
