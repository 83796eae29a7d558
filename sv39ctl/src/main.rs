// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use sv39::PageTableEntry;
use sv39ctl::{
    pack::{self, PackOptions},
    render,
    shell::Shell,
    Config, Result,
};

/// Inspect RISC-V Sv39 virtual addresses and page table entries
#[derive(Parser)]
#[command(name = "sv39ctl", disable_version_flag = true)]
struct Arguments {
    #[command(flatten)]
    config: Config,

    /// Defaults to `shell`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
#[command(rename_all = "snake_case")]
enum Command {
    /// Split a virtual address into its VPNs and page offset
    Vaddr {
        /// The address in hexadecimal, e.g. `0xFFFFFFC080200000`
        #[arg(value_parser = sv39::parse_hex)]
        address: u64,
    },
    /// Decode the physical address and flags of a page table entry
    Pte {
        /// The entry in hexadecimal, e.g. `0x200400CF`
        #[arg(value_parser = sv39::parse_hex)]
        entry: u64,

        /// Also show the entry kind, RSW bits and raw PPN field
        #[arg(short, long)]
        verbose: bool,
    },
    /// Prompt for addresses and entries until end of input
    Shell,
    /// Generate the assembly table embedding the user applications
    Pack(PackOptions),
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    args.config.init_logging()?;

    let canonicality = args.config.canonicality();
    tracing::debug!(?canonicality, "starting");

    let mut stdout = io::stdout().lock();
    match args.command.unwrap_or(Command::Shell) {
        Command::Vaddr { address } => {
            let vpns = sv39::decompose_with(address, canonicality)?;
            write!(stdout, "{}", render::vaddr(address, vpns))?;
        }
        Command::Pte { entry, verbose } => {
            let entry = PageTableEntry::from_raw(entry);
            write!(stdout, "{}", render::pte(entry.decode()))?;
            if verbose {
                write!(stdout, "{}", render::pte_details(entry))?;
            }
        }
        Command::Shell => Shell::new(io::stdin().lock(), stdout, canonicality).run()?,
        Command::Pack(options) => pack::pack(&options)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv39::Canonicality;

    fn strictness(env: Option<&str>, args: &[&str]) -> Canonicality {
        match env {
            Some(value) => std::env::set_var("SV39_STRICT", value),
            None => std::env::remove_var("SV39_STRICT"),
        }

        let args = Arguments::try_parse_from(args).unwrap();
        std::env::remove_var("SV39_STRICT");
        args.config.canonicality()
    }

    // The only test touching `SV39_STRICT`, so it can't race with another
    #[test]
    fn strict_from_environment_and_flag() {
        let vaddr = ["sv39ctl", "vaddr", "0x1000000000001234"];

        assert_eq!(strictness(None, &vaddr), Canonicality::OneSided);
        assert_eq!(strictness(Some("1"), &vaddr), Canonicality::Strict);
        assert_eq!(strictness(Some("yes"), &vaddr), Canonicality::Strict);
        assert_eq!(strictness(Some("true"), &vaddr), Canonicality::Strict);
        assert_eq!(strictness(Some("0"), &vaddr), Canonicality::OneSided);
        assert_eq!(strictness(Some("no"), &vaddr), Canonicality::OneSided);
        assert_eq!(strictness(None, &["sv39ctl", "--strict", "vaddr", "0x1000"]), Canonicality::Strict);
        assert_eq!(strictness(None, &["sv39ctl", "vaddr", "0x1000", "--strict"]), Canonicality::Strict);
    }

    #[test]
    fn hex_arguments_go_through_the_parser() {
        let args = Arguments::try_parse_from(["sv39ctl", "pte", "0x200400CF", "-v"]).unwrap();
        assert!(matches!(args.command, Some(Command::Pte { entry: 0x2004_00CF, verbose: true })));

        assert!(Arguments::try_parse_from(["sv39ctl", "vaddr", "0x10000000000000000"]).is_err());
        assert!(Arguments::try_parse_from(["sv39ctl"]).unwrap().command.is_none());
    }
}
