// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Bit level decoding of RISC-V Sv39 virtual addresses and page table entries

#![no_std]

#[cfg(test)]
extern crate std;

pub mod addr;
pub mod error;
pub mod flags;
pub mod parse;
pub mod pte;


pub use addr::{Canonicality, VirtualAddress, Vpns};
pub use error::Error;
pub use flags::Flags;
pub use parse::parse_hex;
pub use pte::{DecodedPte, EntryKind, PageTableEntry};

/// Splits `virtual_address` into its three VPNs and page offset
///
/// Only the upper half is checked: an address with bit 38 set must have all
/// of bits 63:39 set, otherwise this returns [`Error::NonCanonical`]. Use
/// [`decompose_with`] and [`Canonicality::Strict`] to check both halves.
pub fn decompose(virtual_address: u64) -> Result<Vpns, Error> {
    decompose_with(virtual_address, Canonicality::OneSided)
}

pub fn decompose_with(virtual_address: u64, canonicality: Canonicality) -> Result<Vpns, Error> {
    VirtualAddress::new(virtual_address).decompose(canonicality)
}

/// Every 64-bit pattern decodes, whether or not the result makes sense
pub fn decode_pte(pte: u64) -> DecodedPte {
    PageTableEntry::from_raw(pte).decode()
}
