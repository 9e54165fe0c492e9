// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Searches for the teleporter confirmation seed.
//!
//! Prints the register-7 value to set (via `!setreg 7 <hex>`) before using
//! the teleporter.

use anyhow::{Result, bail};
use synacor_solvers::teleporter;

fn main() -> Result<()> {
    match teleporter::search() {
        Some(seed) => {
            println!("[!] Solution found; reg[7] == {seed} ({seed:04X})");
            Ok(())
        }
        None => bail!("no confirmation seed found"),
    }
}
