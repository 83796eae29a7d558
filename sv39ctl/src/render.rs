// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Text output for decoded addresses and entries, one `\n` terminated line each

use sv39::{DecodedPte, PageTableEntry, Vpns};

pub fn vaddr(addr: u64, vpns: Vpns) -> String {
    format!(
        "Virtual Address: 0x{addr:X}\n\
         VPN[2]: {vpn2} (0b{vpn2:09b})\n\
         VPN[1]: {vpn1} (0b{vpn1:09b})\n\
         VPN[0]: {vpn0} (0b{vpn0:09b})\n\
         Page Offset: {offset} (0b{offset:012b})\n",
        vpn2 = vpns.vpn2,
        vpn1 = vpns.vpn1,
        vpn0 = vpns.vpn0,
        offset = vpns.offset,
    )
}

pub fn pte(decoded: DecodedPte) -> String {
    format!("Phys Addr: 0x{:X}, {}\n", decoded.ppn, decoded.flags)
}

pub fn pte_details(pte: PageTableEntry) -> String {
    format!(
        "Kind: {}\nRSW: 0b{:02b}\nPPN field: 0x{:X}\nReserved: 0x{:X}\n",
        pte.kind(),
        pte.rsw(),
        pte.ppn_field(),
        pte.reserved(),
    )
}
