// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Sv39 page table entries
//!
//! ```text
//! 63      54 53                                10 9   8 7 6 5 4 3 2 1 0
//! ┌─────────┬────────────────────────────────────┬─────┬─┬─┬─┬─┬─┬─┬─┬─┐
//! │ reserved│                PPN                 │ RSW │D│A│G│U│X│W│R│V│
//! └─────────┴────────────────────────────────────┴─────┴─┴─┴─┴─┴─┴─┴─┴─┘
//!   10 bits               44 bits                 2 bits
//! ```

use crate::{addr::PAGE_OFFSET_BITS, flags::Flags};
use static_assertions::const_assert_eq;

pub const FLAGS_BITS: u32 = 8;
pub const FLAGS_MASK: u64 = (1 << FLAGS_BITS) - 1;
pub const RSW_SHIFT: u32 = FLAGS_BITS;
pub const RSW_BITS: u32 = 2;
pub const RSW_MASK: u64 = (1 << RSW_BITS) - 1;
pub const PPN_SHIFT: u32 = RSW_SHIFT + RSW_BITS;
pub const PPN_BITS: u32 = 44;
pub const PPN_MASK: u64 = (1 << PPN_BITS) - 1;
pub const RESERVED_SHIFT: u32 = PPN_SHIFT + PPN_BITS;
pub const RESERVED_BITS: u32 = 10;

const_assert_eq!(PPN_SHIFT, 10);
const_assert_eq!(RESERVED_SHIFT, 54);
const_assert_eq!(RESERVED_SHIFT + RESERVED_BITS, 64);

/// The result of decoding a page table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedPte {
    /// The page aligned physical address the entry points at
    pub ppn: u64,
    pub flags: Flags,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PageTableEntry(u64);

impl PageTableEntry {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Builds an entry pointing at the page containing `phys`
    pub const fn new(phys: u64, flags: Flags) -> Self {
        Self(((phys >> PAGE_OFFSET_BITS) & PPN_MASK) << PPN_SHIFT | flags.value() as u64)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn flags(self) -> Flags {
        Flags::new((self.0 & FLAGS_MASK) as u8)
    }

    /// Bits 9:8, left to supervisor software
    pub const fn rsw(self) -> u8 {
        ((self.0 >> RSW_SHIFT) & RSW_MASK) as u8
    }

    /// The 44-bit PPN field as stored
    pub const fn ppn_field(self) -> u64 {
        (self.0 >> PPN_SHIFT) & PPN_MASK
    }

    /// Bits 63:54
    pub const fn reserved(self) -> u16 {
        (self.0 >> RESERVED_SHIFT) as u16
    }

    /// Everything above the RSW bits moved up to a page boundary. Reserved
    /// bits 61:54 are carried along and bits 63:62 fall off the top.
    pub const fn physical_address(self) -> u64 {
        (self.0 >> PPN_SHIFT) << PAGE_OFFSET_BITS
    }

    pub const fn decode(self) -> DecodedPte {
        DecodedPte { ppn: self.physical_address(), flags: self.flags() }
    }

    pub fn kind(self) -> EntryKind {
        let flags = self.flags();

        match flags & Flags::VALID {
            false => EntryKind::NotValid,
            true => match flags & Flags::READ || flags & Flags::WRITE || flags & Flags::EXECUTE {
                true => EntryKind::Leaf,
                false => EntryKind::Branch,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    NotValid,
    Leaf,
    /// Valid with R, W and X all clear: points at the next level table
    Branch,
}

impl core::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntryKind::NotValid => write!(f, "not valid"),
            EntryKind::Leaf => write!(f, "leaf"),
            EntryKind::Branch => write!(f, "branch"),
        }
    }
}
