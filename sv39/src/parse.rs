// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use crate::Error;

/// Parses a 64-bit value written in hexadecimal, e.g. `0x8000_1000`
///
/// Surrounding whitespace and a `0x` prefix are allowed, as are `_`
/// separators between digits. Values that need more than 64 bits are
/// [`Error::OutOfRange`], no matter how many leading zeros they carry.
pub fn parse_hex(input: &str) -> Result<u64, Error> {
    let input = input.trim();
    let digits = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input);

    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(Error::InvalidDigit('_'));
    }

    let mut value: u64 = 0;
    let mut seen_digit = false;
    let mut out_of_range = false;

    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(16).ok_or(Error::InvalidDigit(c))?;
        seen_digit = true;

        // Keep scanning after an overflow so a bad digit later on still
        // reports as such
        match value.checked_mul(16).and_then(|v| v.checked_add(u64::from(digit))) {
            Some(v) => value = v,
            None => out_of_range = true,
        }
    }

    match (seen_digit, out_of_range) {
        (false, _) => Err(Error::Empty),
        (true, true) => Err(Error::OutOfRange),
        (true, false) => Ok(value),
    }
}
