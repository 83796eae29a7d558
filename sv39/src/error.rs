// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No hexadecimal digits were given
    Empty,
    /// A character that isn't a hexadecimal digit or `_` separator
    InvalidDigit(char),
    /// The value doesn't fit in 64 bits
    OutOfRange,
    /// Bit 38 is set but bits 63:39 aren't all set (or, for strict checks,
    /// bit 38 is clear and bits 63:39 aren't all clear)
    NonCanonical,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "no hexadecimal digits given"),
            Error::InvalidDigit(c) => write!(f, "invalid hexadecimal digit {c:?}"),
            Error::OutOfRange => write!(f, "value exceeds 64-bit range"),
            Error::NonCanonical => write!(f, "non-canonical Sv39 address"),
        }
    }
}

impl core::error::Error for Error {}
