// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runs a Synacor program image interactively.
//!
//! Usage: `vm [--trace] <image>`. Lines beginning with `!` are control
//! commands (`!help` lists them).

use std::path::Path;

use anyhow::{Result, bail};
use synacor_cli::{StdConsole, StderrTrace, read_image};
use synacor_vm::trace::TraceMask;
use synacor_vm::vm::Vm;

fn main() -> Result<()> {
    let mut trace = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--trace" => trace = true,
            _ if path.is_none() => path = Some(arg),
            _ => bail!("usage: vm [--trace] <image>"),
        }
    }
    let Some(path) = path else {
        bail!("usage: vm [--trace] <image>");
    };

    let image = read_image(Path::new(&path))?;
    let mut vm = Vm::new(image, StdConsole::new());
    if trace {
        let mut sink = StderrTrace;
        vm.run_traced(TraceMask::INSTR | TraceMask::CONTROL, Some(&mut sink))?;
    } else {
        vm.run()?;
    }
    Ok(())
}
