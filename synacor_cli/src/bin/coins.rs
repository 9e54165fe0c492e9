// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solves the ruins monument, printing one `use` command per coin slot.

use anyhow::{Context, Result, bail};
use synacor_solvers::coins;

fn main() -> Result<()> {
    match coins::solve() {
        Some(ordering) => {
            for value in ordering {
                let name = coins::coin_name(value).context("unnamed coin value")?;
                println!("use {name} coin");
            }
            Ok(())
        }
        None => bail!("no coin ordering satisfies the monument"),
    }
}
