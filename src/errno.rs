/*
 * Copyright (C) 2024-2026 The devctl Project Developers.
 *
 * This file is part of devctl.
 *
 * devctl is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * devctl is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with devctl. If not, see <https://www.gnu.org/licenses/>.
 */

//! OS error numbers as structured values.

use core::fmt;
use std::io;

use libc::c_int;

/// An operating-system error number reported by the device-control call.
///
/// The value is the platform `errno`, surfaced unmodified, so callers can
/// tell error classes apart by the platform meaning of the code. Constants
/// are provided for the codes device-control callers commonly meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Errno(i32);

impl Errno {
    /// Operation not permitted.
    pub const EPERM: Self = Self(libc::EPERM);
    /// Bad file descriptor.
    pub const EBADF: Self = Self(libc::EBADF);
    /// Permission denied.
    pub const EACCES: Self = Self(libc::EACCES);
    /// Bad address.
    pub const EFAULT: Self = Self(libc::EFAULT);
    /// Device or resource busy.
    pub const EBUSY: Self = Self(libc::EBUSY);
    /// No such device.
    pub const ENODEV: Self = Self(libc::ENODEV);
    /// Invalid argument.
    pub const EINVAL: Self = Self(libc::EINVAL);
    /// Inappropriate device-control operation for this descriptor.
    pub const ENOTTY: Self = Self(libc::ENOTTY);

    pub const fn from_raw(code: i32) -> Self {
        Self(code)
    }

    /// The raw error number.
    pub const fn raw_os_error(self) -> i32 {
        self.0
    }

    /// Reads the calling thread's current `errno` value.
    pub fn last() -> Self {
        Self(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }

    /// Translates the return value of the underlying primitive into a
    /// [`Result`]. A return value of -1 means failure, with the error number
    /// left in the thread's `errno`.
    pub fn result(value: c_int) -> Result<c_int, Self> {
        if value == -1 {
            Err(Self::last())
        } else {
            Ok(value)
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", io::Error::from_raw_os_error(self.0))
    }
}

impl std::error::Error for Errno {}

impl From<Errno> for io::Error {
    fn from(err: Errno) -> Self {
        io::Error::from_raw_os_error(err.raw_os_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    fn set_errno(code: i32) {
        unsafe { *libc::__errno_location() = code };
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_primitive_surfaces_the_exact_error_number() {
        set_errno(13);

        let err = Errno::result(-1).unwrap_err();
        assert_eq!(err, Errno::EACCES);
        assert_eq!(err.raw_os_error(), 13);
    }

    #[test]
    fn successful_primitive_passes_its_value_through() {
        assert_eq!(Errno::result(0), Ok(0));
        assert_eq!(Errno::result(42), Ok(42));
    }

    #[test]
    fn display_carries_the_platform_description() {
        assert!(Errno::EACCES.to_string().contains("os error 13"));
    }
}
