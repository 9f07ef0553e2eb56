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

//! Request-code layout derivation, encoding and decoding.

use bit_field::BitField;
use spin::Once;

use crate::arch::{ArchProfile, UnsupportedArch};
use crate::RequestCode;

static HOST: Once<CodeLayout> = Once::new();

/// Shift and mask constants derived from an [`ArchProfile`].
///
/// The field order inside a request code is an ABI contract with the kernel
/// dispatch and never varies: command number in the low bits, then device
/// type, then payload size, then direction at the top. A layout is immutable
/// once built and encoding touches no other state, so one instance may be
/// shared by any number of threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLayout {
    /// The profile this layout was derived from.
    pub profile: &'static ArchProfile,

    pub number_shift: u32,
    pub type_shift: u32,
    pub size_shift: u32,
    pub direction_shift: u32,

    pub number_mask: u32,
    pub type_mask: u32,
    pub size_mask: u32,
    pub direction_mask: u32,
}

impl CodeLayout {
    /// Derives the layout for `profile`.
    ///
    /// Pure and `const`, so layouts for a fixed profile can live in `const`
    /// items and device-command catalogs can be precomputed at compile time.
    pub const fn new(profile: &'static ArchProfile) -> Self {
        let number_shift = 0;
        let type_shift = number_shift + profile.number_bits;
        let size_shift = type_shift + profile.type_bits;
        let direction_shift = size_shift + profile.size_bits;

        Self {
            profile,

            number_shift,
            type_shift,
            size_shift,
            direction_shift,

            number_mask: (1 << profile.number_bits) - 1,
            type_mask: (1 << profile.type_bits) - 1,
            size_mask: (1 << profile.size_bits) - 1,
            direction_mask: (1 << profile.direction_bits) - 1,
        }
    }

    /// Packs a raw direction value with the three caller fields.
    ///
    /// Inputs are trusted to fit their field widths, mirroring the kernel
    /// macro contract: an oversized value silently spills into the
    /// neighboring field. Debug builds assert the widths instead.
    pub const fn ioc(&self, dir: u32, ty: u32, nr: u32, size: u32) -> RequestCode {
        debug_assert!(dir <= self.direction_mask);
        debug_assert!(ty <= self.type_mask);
        debug_assert!(nr <= self.number_mask);
        debug_assert!(size <= self.size_mask);

        (dir << self.direction_shift)
            | (ty << self.type_shift)
            | (nr << self.number_shift)
            | (size << self.size_shift)
    }

    /// Code for a request that moves no payload: the size field is zero and
    /// the direction is the profile's "none" value.
    pub const fn io(&self, ty: u32, nr: u32) -> RequestCode {
        self.ioc(self.profile.direction_none, ty, nr, 0)
    }

    /// Code for a request whose payload is read back from the driver.
    pub const fn ior(&self, ty: u32, nr: u32, size: u32) -> RequestCode {
        self.ioc(self.profile.direction_read, ty, nr, size)
    }

    /// Code for a request whose payload is written to the driver.
    pub const fn iow(&self, ty: u32, nr: u32, size: u32) -> RequestCode {
        self.ioc(self.profile.direction_write, ty, nr, size)
    }

    /// Code for a request that writes a payload and reads it back.
    ///
    /// The direction values are combined with OR, never added: on profiles
    /// where direction is a bitmask the two coincide, but only OR stays
    /// correct when they do not.
    pub const fn iowr(&self, ty: u32, nr: u32, size: u32) -> RequestCode {
        self.ioc(
            self.profile.direction_read | self.profile.direction_write,
            ty,
            nr,
            size,
        )
    }

    /// [`ior`](Self::ior) with the size of `T`.
    pub const fn read<T>(&self, ty: u32, nr: u32) -> RequestCode {
        self.ior(ty, nr, core::mem::size_of::<T>() as u32)
    }

    /// [`iow`](Self::iow) with the size of `T`.
    pub const fn write<T>(&self, ty: u32, nr: u32) -> RequestCode {
        self.iow(ty, nr, core::mem::size_of::<T>() as u32)
    }

    /// [`iowr`](Self::iowr) with the size of `T`.
    pub const fn read_write<T>(&self, ty: u32, nr: u32) -> RequestCode {
        self.iowr(ty, nr, core::mem::size_of::<T>() as u32)
    }

    /// Extracts the direction field of an encoded code.
    pub fn ioc_dir(&self, code: RequestCode) -> u32 {
        self.field(code, self.direction_shift, self.profile.direction_bits)
    }

    /// Extracts the device-type field of an encoded code.
    pub fn ioc_type(&self, code: RequestCode) -> u32 {
        self.field(code, self.type_shift, self.profile.type_bits)
    }

    /// Extracts the command-number field of an encoded code.
    pub fn ioc_nr(&self, code: RequestCode) -> u32 {
        self.field(code, self.number_shift, self.profile.number_bits)
    }

    /// Extracts the payload-size field of an encoded code.
    pub fn ioc_size(&self, code: RequestCode) -> u32 {
        self.field(code, self.size_shift, self.profile.size_bits)
    }

    fn field(&self, code: RequestCode, shift: u32, bits: u32) -> u32 {
        code.get_bits(shift as usize..(shift + bits) as usize)
    }
}

/// Derived layout of the architecture this process runs on.
///
/// Resolved from [`std::env::consts::ARCH`] on first use and cached for the
/// lifetime of the process; there is no path back to "unresolved".
///
/// ## Panics
/// * If the running architecture has no known geometry. Hosts that must not
/// be terminated use [`try_host`] instead.
pub fn host() -> &'static CodeLayout {
    try_host().unwrap_or_else(|err| {
        log::error!("{err}");
        panic!("{err}");
    })
}

/// Fallible form of [`host`]: an unrecognized architecture is reported as an
/// [`UnsupportedArch`] error instead of terminating the process.
pub fn try_host() -> Result<&'static CodeLayout, UnsupportedArch> {
    if let Some(layout) = HOST.get() {
        return Ok(layout);
    }

    let profile = ArchProfile::resolve(std::env::consts::ARCH)?;

    Ok(HOST.call_once(|| {
        log::debug!(
            "using the {} request-code layout for {}",
            profile.family,
            std::env::consts::ARCH
        );

        CodeLayout::new(profile)
    }))
}
