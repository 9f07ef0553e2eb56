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

//! Per-architecture request-code geometry.
//!
//! The kernel does not share one request-code bit layout across
//! architectures. The MIPS, PowerPC and SPARC families reserve a third
//! direction bit and assign different direction values than the asm-generic
//! layout everyone else uses. A code packed with the wrong geometry looks
//! plausible and is silently wrong, so resolution refuses to guess and has
//! no fallback profile.

use static_assertions::const_assert_eq;
use thiserror::Error;

/// Field widths and direction values of one kernel ABI family.
///
/// A profile is plain immutable data; [`CodeLayout`] derives the shift and
/// mask constants from it.
///
/// [`CodeLayout`]: crate::layout::CodeLayout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchProfile {
    /// Family label, used in diagnostics.
    pub family: &'static str,
    pub type_bits: u32,
    pub number_bits: u32,
    pub size_bits: u32,
    pub direction_bits: u32,
    pub direction_none: u32,
    pub direction_write: u32,
    pub direction_read: u32,
}

/// The asm-generic layout: the x86, ARM, s390x, RISC-V and LoongArch
/// families.
pub const GENERIC: ArchProfile = ArchProfile {
    family: "generic",
    type_bits: 8,
    number_bits: 8,
    size_bits: 14,
    direction_bits: 2,
    direction_none: 0,
    direction_write: 1,
    direction_read: 2,
};

/// The legacy layout kept by the MIPS, PowerPC and SPARC families, which
/// spend a third direction bit and treat "none" as a flag of its own.
pub const LEGACY: ArchProfile = ArchProfile {
    family: "legacy",
    type_bits: 8,
    number_bits: 8,
    size_bits: 13,
    direction_bits: 3,
    direction_none: 1,
    direction_write: 4,
    direction_read: 2,
};

// The packed code must fit the 32-bit field the kernel dispatch decodes.
const_assert_eq!(GENERIC.total_bits(), 32);
const_assert_eq!(LEGACY.total_bits(), 32);

/// Returned when an architecture has no known request-code geometry.
///
/// Not recoverable by substitution: without the geometry every field width
/// and shift is undefined, and a zero-width fallback would produce codes
/// that look valid and are wrong everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported architecture: {0}")]
pub struct UnsupportedArch(pub String);

impl ArchProfile {
    /// Resolves the profile for a target-architecture identifier, as named
    /// by [`std::env::consts::ARCH`].
    pub fn resolve(arch: &str) -> Result<&'static ArchProfile, UnsupportedArch> {
        match arch {
            "x86_64" | "x86" | "arm" | "aarch64" | "s390x" | "riscv32" | "riscv64"
            | "loongarch64" => Ok(&GENERIC),

            "mips" | "mips64" | "powerpc" | "powerpc64" | "sparc" | "sparc64" => Ok(&LEGACY),

            _ => Err(UnsupportedArch(arch.into())),
        }
    }

    /// Sum of the four field widths.
    pub const fn total_bits(&self) -> u32 {
        self.number_bits + self.type_bits + self.size_bits + self.direction_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_both_families() {
        assert_eq!(ArchProfile::resolve("x86_64").unwrap(), &GENERIC);
        assert_eq!(ArchProfile::resolve("aarch64").unwrap(), &GENERIC);
        assert_eq!(ArchProfile::resolve("riscv64").unwrap(), &GENERIC);

        assert_eq!(ArchProfile::resolve("mips").unwrap(), &LEGACY);
        assert_eq!(ArchProfile::resolve("powerpc64").unwrap(), &LEGACY);
        assert_eq!(ArchProfile::resolve("sparc64").unwrap(), &LEGACY);
    }

    #[test]
    fn unknown_architecture_is_an_error_naming_it() {
        let err = ArchProfile::resolve("m68k").unwrap_err();
        assert_eq!(err.to_string(), "unsupported architecture: m68k");
    }

    #[test]
    fn profile_geometry_is_32_bit() {
        assert_eq!(GENERIC.total_bits(), 32);
        assert_eq!(LEGACY.total_bits(), 32);
    }

    #[test]
    fn direction_values_match_the_kernel_tables() {
        let generic = (
            GENERIC.direction_none,
            GENERIC.direction_write,
            GENERIC.direction_read,
        );
        let legacy = (
            LEGACY.direction_none,
            LEGACY.direction_write,
            LEGACY.direction_read,
        );

        assert_eq!(generic, (0, 1, 2));
        assert_eq!(legacy, (1, 4, 2));
    }

    #[test]
    fn host_architecture_is_recognized() {
        assert!(ArchProfile::resolve(std::env::consts::ARCH).is_ok());
    }
}
