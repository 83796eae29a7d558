// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

pub mod pack;
pub mod render;
pub mod shell;

use anyhow::Context;
use clap::{builder::BoolishValueParser, Args};
use sv39::Canonicality;
use tracing_subscriber::EnvFilter;

pub type Result<T> = anyhow::Result<T>;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Log filter directives, e.g. `debug` or `sv39=debug,sv39ctl=info`
    #[arg(long, global = true, env = "SV39_LOG", default_value = "warn")]
    pub log: String,

    /// Also reject addresses whose bit 38 is clear but bits 63:39 aren't
    #[arg(long, global = true, env = "SV39_STRICT", value_parser = BoolishValueParser::new())]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { log: String::from("warn"), strict: false }
    }
}

impl Config {
    pub fn canonicality(&self) -> Canonicality {
        match self.strict {
            true => Canonicality::Strict,
            false => Canonicality::OneSided,
        }
    }

    /// Logs go to stderr, stdout only ever carries results. Records from the
    /// `log` facade used by `sv39` are picked up as well.
    pub fn init_logging(&self) -> Result<()> {
        let filter = EnvFilter::try_new(&self.log).with_context(|| format!("invalid log filter `{}`", self.log))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to install the log subscriber")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_flag_selects_canonicality() {
        assert_eq!(Config::default().canonicality(), Canonicality::OneSided);
        assert_eq!(Config { strict: true, ..Config::default() }.canonicality(), Canonicality::Strict);
    }

    #[test]
    fn bad_log_filter_is_reported() {
        let config = Config { log: String::from("sv39=notalevel"), ..Config::default() };
        let err = config.init_logging().unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }
}
