// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use crate::{render, Result};
use std::io::{BufRead, Write};
use sv39::Canonicality;

pub const ACTION_PROMPT: &str = "Action: \n\t1. Check Sv39 VAddr \n\t2. Explain PTE\n> ";
pub const VADDR_PROMPT: &str = "Enter a RISC-V Sv39 virtual address (in hexadecimal, e.g., 0x123456789): ";
pub const PTE_PROMPT: &str = "Enter a 64-bit Sv39 PTE in hexadecimal (e.g., 0x123456789ABCDEF): ";

/// Prompts for an action and its input until told to quit or input runs out
pub struct Shell<R, W> {
    input: R,
    output: W,
    canonicality: Canonicality,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, canonicality: Canonicality) -> Self {
        Self { input, output, canonicality }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let action = match self.prompt(ACTION_PROMPT)? {
                Some(action) => action,
                None => break,
            };

            match &*action {
                "q" | "quit" | "exit" => break,
                "2" => match self.prompt(PTE_PROMPT)? {
                    Some(line) => self.explain_pte(&line)?,
                    None => break,
                },
                _ => match self.prompt(VADDR_PROMPT)? {
                    Some(line) => self.check_vaddr(&line)?,
                    None => break,
                },
            }
        }

        Ok(())
    }

    /// `None` once input is exhausted
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    fn check_vaddr(&mut self, line: &str) -> Result<()> {
        let result = sv39::parse_hex(line)
            .and_then(|addr| Ok((addr, sv39::decompose_with(addr, self.canonicality)?)));

        match result {
            Ok((addr, vpns)) => {
                tracing::debug!(address = ?sv39::VirtualAddress::new(addr), ?vpns, "decomposed");
                write!(self.output, "{}", render::vaddr(addr, vpns))?;
            }
            Err(e) => self.invalid(line, e)?,
        }

        Ok(())
    }

    fn explain_pte(&mut self, line: &str) -> Result<()> {
        match sv39::parse_hex(line) {
            Ok(pte) => {
                let entry = sv39::PageTableEntry::from_raw(pte);
                tracing::debug!(?entry, "decoded");
                write!(self.output, "{}", render::pte(entry.decode()))?;
            }
            Err(e) => self.invalid(line, e)?,
        }

        Ok(())
    }

    fn invalid(&mut self, line: &str, error: sv39::Error) -> Result<()> {
        tracing::info!(input = line, %error, "rejected input");
        writeln!(self.output, "Invalid input: {error}")?;
        Ok(())
    }
}
