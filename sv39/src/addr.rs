// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Sv39 virtual addresses
//!
//! ```text
//! 63        39 38      30 29      21 20      12 11          0
//! ┌───────────┬──────────┬──────────┬──────────┬─────────────┐
//! │ sext(38)  │  VPN[2]  │  VPN[1]  │  VPN[0]  │ page offset │
//! └───────────┴──────────┴──────────┴──────────┴─────────────┘
//!    25 bits     9 bits     9 bits     9 bits      12 bits
//! ```

use crate::Error;
use static_assertions::const_assert_eq;

pub const VPN_BITS: u32 = 9;
pub const VPN_BITMASK: u64 = (1 << VPN_BITS) - 1;
pub const PAGE_OFFSET_BITS: u32 = 12;
pub const PAGE_OFFSET_MASK: u64 = (1 << PAGE_OFFSET_BITS) - 1;

pub const VPN0_SHIFT: u32 = PAGE_OFFSET_BITS;
pub const VPN1_SHIFT: u32 = VPN0_SHIFT + VPN_BITS;
pub const VPN2_SHIFT: u32 = VPN1_SHIFT + VPN_BITS;

/// Number of implemented virtual address bits
pub const VADDR_BITS: u32 = VPN2_SHIFT + VPN_BITS;
pub const VADDR_MASK: u64 = (1 << VADDR_BITS) - 1;
/// The highest implemented bit, which bits 63:39 must copy
pub const SIGN_BIT: u32 = VADDR_BITS - 1;
/// Bits 63:38 all set, the only legal upper half when bit 38 is set
pub const HIGH_HALF_MASK: u64 = 0xFFFF_FFC0_0000_0000;

const_assert_eq!(VADDR_BITS, 39);
const_assert_eq!(VPN2_SHIFT, 30);
const_assert_eq!(HIGH_HALF_MASK, u64::MAX << SIGN_BIT);

/// How strictly bits 63:39 are checked before decomposing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Canonicality {
    /// Only addresses with bit 38 set are checked for a sign-extended upper
    /// half, addresses with bit 38 clear pass regardless of bits 63:39
    #[default]
    OneSided,
    /// Bits 63:39 must equal bit 38 in both halves
    Strict,
}

/// The page table indices and page offset of a virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vpns {
    pub vpn2: u16,
    pub vpn1: u16,
    pub vpn0: u16,
    pub offset: u16,
}

impl Vpns {
    /// Reassemble the low 39 bits of the address these were taken from
    pub const fn low_bits(self) -> u64 {
        ((self.vpn2 as u64 & VPN_BITMASK) << VPN2_SHIFT)
            | ((self.vpn1 as u64 & VPN_BITMASK) << VPN1_SHIFT)
            | ((self.vpn0 as u64 & VPN_BITMASK) << VPN0_SHIFT)
            | (self.offset as u64 & PAGE_OFFSET_MASK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VirtualAddress(u64);

impl VirtualAddress {
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Builds the canonical address for the given indices, sign extending
    /// bit 38 into the upper half
    pub const fn from_vpns(vpns: Vpns) -> Self {
        let mut addr = vpns.low_bits();
        if (addr >> SIGN_BIT) & 1 == 1 {
            addr |= HIGH_HALF_MASK;
        }

        Self(addr)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn sign_bit(self) -> bool {
        (self.0 >> SIGN_BIT) & 1 == 1
    }

    /// Whether bits 63:39 are a sign extension of bit 38
    pub const fn is_canonical(self) -> bool {
        let high = self.0 >> SIGN_BIT;
        high == 0 || high == HIGH_HALF_MASK >> SIGN_BIT
    }

    pub fn validate(self, canonicality: Canonicality) -> Result<(), Error> {
        if self.sign_bit() {
            log::debug!("bit 38 set in {:#x}, checking bits 63:39", self.0);
            if self.0 >> SIGN_BIT != HIGH_HALF_MASK >> SIGN_BIT {
                return Err(Error::NonCanonical);
            }
        } else if canonicality == Canonicality::Strict && self.0 >> SIGN_BIT != 0 {
            return Err(Error::NonCanonical);
        }

        Ok(())
    }

    /// Splits the address without checking its upper bits
    pub const fn vpns(self) -> Vpns {
        Vpns {
            vpn2: ((self.0 >> VPN2_SHIFT) & VPN_BITMASK) as u16,
            vpn1: ((self.0 >> VPN1_SHIFT) & VPN_BITMASK) as u16,
            vpn0: ((self.0 >> VPN0_SHIFT) & VPN_BITMASK) as u16,
            offset: (self.0 & PAGE_OFFSET_MASK) as u16,
        }
    }

    pub fn decompose(self, canonicality: Canonicality) -> Result<Vpns, Error> {
        self.validate(canonicality)?;
        Ok(self.vpns())
    }
}
