// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: 2021 The vanadinite developers
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Generates the `user_apps` table the kernel links against
//!
//! Each application gets a `(name, elf, size)` triple of `.quad`s in `.data`,
//! the table ends with an all zero triple, and the names and binaries
//! themselves land in `.data.apps`.

use crate::Result;
use anyhow::Context;
use clap::Args;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

#[derive(Args, Clone, Debug)]
pub struct PackOptions {
    /// Directory holding the stripped application binaries
    #[arg(long, default_value = "./user/target/stripped/")]
    pub dir: PathBuf,

    /// Where to write the generated assembly
    #[arg(long, default_value = "os/link_app.S")]
    pub out: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub name: String,
    pub size: u64,
}

pub fn pack(options: &PackOptions) -> Result<()> {
    let apps = collect(&options.dir)?;
    let asm = link_app_asm(&options.dir, &apps);

    fs::write(&options.out, asm).with_context(|| format!("failed to write {}", options.out.display()))?;
    tracing::info!(apps = apps.len(), out = %options.out.display(), "wrote application table");

    Ok(())
}

/// Regular files directly inside `dir`, sorted by name, dotfiles skipped
pub fn collect(dir: &Path) -> Result<Vec<App>> {
    let mut apps = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_str().map(|s| s.starts_with('.')).unwrap_or(false))
    {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() {
            tracing::debug!(path = %entry.path().display(), "skipping non-file");
            continue;
        }

        let name = entry
            .file_name()
            .to_str()
            .with_context(|| format!("non UTF-8 file name {:?}", entry.file_name()))?
            .to_owned();
        let size = entry.metadata().with_context(|| format!("failed to stat {}", entry.path().display()))?.len();

        tracing::debug!(%name, size, "found application");
        apps.push(App { name, size });
    }

    Ok(apps)
}

pub fn link_app_asm(dir: &Path, apps: &[App]) -> String {
    let mut asm = String::from("\n    .align 8\n    .section .data\n    .global user_apps\nuser_apps:\n");

    for app in apps {
        asm += &format!("\n    .quad .str_{0}\n    .quad .elf_{0}\n    .quad {1}\n", app.name, app.size);
    }

    asm += "\n    .quad 0\n    .quad 0\n    .quad 0\n";
    asm += "\n    .section .data.apps\n";

    for app in apps {
        asm += &format!(
            "\n.str_{0}:\n    .string \"{0}\"\n.align 8\n.elf_{0}:\n    .incbin \"{1}\"\n",
            app.name,
            dir.join(&app.name).display(),
        );
    }

    asm
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!("sv39ctl-{name}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn collects_sorted_files_only() {
        let dir = TempDir::new("collect");
        fs::write(dir.0.join("shell"), [0u8; 24]).unwrap();
        fs::write(dir.0.join("hello"), [0u8; 10]).unwrap();
        fs::write(dir.0.join(".gitkeep"), b"").unwrap();
        fs::create_dir(dir.0.join("deps")).unwrap();
        fs::write(dir.0.join("deps").join("nested"), [0u8; 3]).unwrap();

        let apps = collect(&dir.0).unwrap();
        assert_eq!(
            apps,
            vec![App { name: String::from("hello"), size: 10 }, App { name: String::from("shell"), size: 24 }]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new("missing");
        let err = collect(&dir.0.join("nope")).unwrap_err();
        assert!(err.to_string().contains("failed to list"));
    }

    #[test]
    fn table_layout() {
        let apps = [App { name: String::from("hello"), size: 4096 }];
        let asm = link_app_asm(Path::new("./user/target/stripped/"), &apps);

        assert_eq!(
            asm,
            "
    .align 8
    .section .data
    .global user_apps
user_apps:

    .quad .str_hello
    .quad .elf_hello
    .quad 4096

    .quad 0
    .quad 0
    .quad 0

    .section .data.apps

.str_hello:
    .string \"hello\"
.align 8
.elf_hello:
    .incbin \"./user/target/stripped/hello\"
"
        );
    }

    #[test]
    fn empty_table_still_terminated() {
        let asm = link_app_asm(Path::new("apps"), &[]);
        assert!(asm.contains("user_apps:\n\n    .quad 0\n    .quad 0\n    .quad 0\n"));
        assert!(asm.ends_with(".section .data.apps\n"));
    }

    #[test]
    fn pack_writes_output() {
        let dir = TempDir::new("pack");
        let apps = dir.0.join("apps");
        fs::create_dir(&apps).unwrap();
        fs::write(apps.join("init"), b"\x7fELF").unwrap();

        let out = dir.0.join("link_app.S");
        pack(&PackOptions { dir: apps.clone(), out: out.clone() }).unwrap();

        let asm = fs::read_to_string(out).unwrap();
        assert!(asm.contains("    .quad .elf_init\n    .quad 4\n"));
        assert!(asm.contains(&format!(".incbin \"{}\"", apps.join("init").display())));
    }
}
