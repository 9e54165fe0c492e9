// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solves the vault grid, printing one walk command per line.

use anyhow::{Result, bail};
use synacor_solvers::vault;

fn main() -> Result<()> {
    match vault::solve() {
        Some(moves) => {
            println!("[!] Shortest path found, {} moves:", moves.len());
            for dir in &moves {
                println!("{dir}");
            }
            Ok(())
        }
        None => bail!("no path through the vault grid"),
    }
}
