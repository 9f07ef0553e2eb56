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

//! Architecture-aware `ioctl(2)` request codes.
//!
//! A request code packs a direction, a device type, a command number and a
//! payload size into one 32-bit word. How wide each field is and which values
//! the direction takes differ between the asm-generic architectures and the
//! legacy mips/powerpc/sparc line, so the packing is described by an
//! [`ArchProfile`] and performed by a [`CodeLayout`] derived from it.
//!
//! [`host`] resolves the layout of the running architecture once and caches
//! it; [`CodeLayout::new`] builds layouts for foreign profiles, for tooling
//! that inspects codes of another machine. Encoding is `const`, so device
//! command sets can be precomputed. [`ioctl`] and [`invoke`] hand an encoded
//! code to the kernel and report failures as [`Errno`] values.

pub mod arch;
pub mod call;
pub mod errno;
pub mod layout;

pub use arch::{ArchProfile, UnsupportedArch};
pub use call::{invoke, ioctl, RawRequest};
pub use errno::Errno;
pub use layout::{host, try_host, CodeLayout};

/// An encoded device-control request, as the kernel dispatch consumes it.
///
/// Codes are plain values: encoding the same fields always yields the same
/// word, so codes may be compared, stored in tables or baked into constants.
pub type RequestCode = u32;
