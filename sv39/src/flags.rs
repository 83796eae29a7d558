// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

pub const VALID_BIT: u32 = 0;
pub const READ_BIT: u32 = 1;
pub const WRITE_BIT: u32 = 2;
pub const EXECUTE_BIT: u32 = 3;
pub const USER_BIT: u32 = 4;
pub const GLOBAL_BIT: u32 = 5;
pub const ACCESSED_BIT: u32 = 6;
pub const DIRTY_BIT: u32 = 7;

/// The low byte of a page table entry
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Self = Self(0);
    pub const VALID: Self = Self(1 << VALID_BIT);
    pub const READ: Self = Self(1 << READ_BIT);
    pub const WRITE: Self = Self(1 << WRITE_BIT);
    pub const EXECUTE: Self = Self(1 << EXECUTE_BIT);
    pub const USER: Self = Self(1 << USER_BIT);
    pub const GLOBAL: Self = Self(1 << GLOBAL_BIT);
    pub const ACCESSED: Self = Self(1 << ACCESSED_BIT);
    pub const DIRTY: Self = Self(1 << DIRTY_BIT);

    /// Rendering order, highest bit first
    const LETTERS: [(Flags, char); 8] = [
        (Self::DIRTY, 'D'),
        (Self::ACCESSED, 'A'),
        (Self::GLOBAL, 'G'),
        (Self::USER, 'U'),
        (Self::EXECUTE, 'X'),
        (Self::WRITE, 'W'),
        (Self::READ, 'R'),
        (Self::VALID, 'V'),
    ];

    pub const fn new(n: u8) -> Self {
        Self(n)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn valid(self) -> bool {
        self.contains(Self::VALID)
    }

    pub const fn readable(self) -> bool {
        self.contains(Self::READ)
    }

    pub const fn writable(self) -> bool {
        self.contains(Self::WRITE)
    }

    pub const fn executable(self) -> bool {
        self.contains(Self::EXECUTE)
    }

    pub const fn user(self) -> bool {
        self.contains(Self::USER)
    }

    pub const fn global(self) -> bool {
        self.contains(Self::GLOBAL)
    }

    pub const fn accessed(self) -> bool {
        self.contains(Self::ACCESSED)
    }

    pub const fn dirty(self) -> bool {
        self.contains(Self::DIRTY)
    }
}

/// Renders as `DAGUXWRV`, with `-` in place of each clear bit
impl core::fmt::Display for Flags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        for (flag, letter) in Self::LETTERS {
            f.write_char(if self.contains(flag) { letter } else { '-' })?;
        }

        Ok(())
    }
}

impl core::fmt::Debug for Flags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Flags({self})")
    }
}

impl core::ops::BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Flags(self.0 | rhs.0)
    }
}

impl core::ops::BitAnd for Flags {
    type Output = bool;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.contains(rhs)
    }
}
