// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `synacor_solvers`: analytical solvers for the puzzles embedded in the
//! Synacor challenge program.
//!
//! The solvers share no state with the virtual machine; each produces an
//! artifact (a register seed, a move list, a coin ordering) that the operator
//! replays into the running program.
//!
//! - [`teleporter`]: finds the register-7 seed that satisfies the
//!   teleporter's confirmation routine (a modified Ackermann function).
//! - [`vault`]: finds the shortest walk through the vault's arithmetic grid.
//! - [`coins`]: finds the coin ordering for the ruins monument.

#![no_std]

extern crate alloc;

pub mod coins;
pub mod teleporter;
pub mod vault;
