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

//! The device-control call boundary.

use std::os::fd::AsRawFd;

use libc::c_int;

use crate::errno::Errno;
use crate::RequestCode;

cfg_if::cfg_if! {
    if #[cfg(any(target_env = "musl", target_os = "android"))] {
        /// Request type of the C `ioctl` prototype: `int` on musl and bionic.
        pub type RawRequest = c_int;
    } else {
        /// Request type of the C `ioctl` prototype: `unsigned long` on glibc.
        pub type RawRequest = libc::c_ulong;
    }
}

/// Issues `ioctl(2)` on `fd` and hands back the primitive's return value.
///
/// `arg` is passed to the driver verbatim; most requests interpret it as a
/// pointer into the caller's address space. A `-1` return is translated into
/// the thread's error number, untouched by any mapping or retry. Drivers may
/// return meaningful non-negative values, which callers that only care about
/// success can discard through [`invoke`].
///
/// ## Safety
/// * The driver trusts `arg`. For requests that take a pointer, it must point
/// to memory valid for the payload the request code describes, and stay valid
/// for the duration of the call.
pub unsafe fn ioctl<F: AsRawFd>(fd: &F, code: RequestCode, arg: usize) -> Result<c_int, Errno> {
    let fd = fd.as_raw_fd();
    let result = Errno::result(libc::ioctl(fd, code as RawRequest, arg));

    if let Err(err) = result {
        log::trace!("ioctl(fd={fd}, code={code:#010x}) = {err}");
    }

    result
}

/// [`ioctl`] for requests whose return value carries no information beyond
/// success.
///
/// ## Safety
/// * See [`ioctl`].
pub unsafe fn invoke<F: AsRawFd>(fd: &F, code: RequestCode, arg: usize) -> Result<(), Errno> {
    ioctl(fd, code, arg).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;

    #[test]
    fn bad_descriptor_reports_ebadf() {
        let code = layout::host().io(b'T' as u32, 0x01);
        let result = unsafe { invoke(&-1, code, 0) };

        assert_eq!(result, Err(Errno::EBADF));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn unsupported_request_reports_enotty() {
        use std::fs::File;

        // TCGETS against a device that is not a terminal. The driver bails
        // out before looking at the argument.
        let null = File::open("/dev/null").unwrap();
        let result = unsafe { ioctl(&null, layout::host().io(b'T' as u32, 0x01), 0) };

        assert_eq!(result, Err(Errno::ENOTTY));
    }

    #[test]
    #[cfg(all(target_os = "linux", any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn recognized_request_succeeds() {
        use std::fs::File;

        // FIOCLEX takes no argument and works on any descriptor.
        let null = File::open("/dev/null").unwrap();
        let result = unsafe { invoke(&null, layout::host().io(0x54, 0x51), 0) };

        assert_eq!(result, Ok(()));
    }
}
