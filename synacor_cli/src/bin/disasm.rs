// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disassembles a Synacor program image to stdout.
//!
//! Usage: `disasm <image>`.

use std::path::Path;

use anyhow::{Context, Result};
use synacor_cli::read_image;
use synacor_vm::disasm::disassemble;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: disasm <image>")?;
    let image = read_image(Path::new(&path))?;
    print!("{}", disassemble(&image));
    Ok(())
}
