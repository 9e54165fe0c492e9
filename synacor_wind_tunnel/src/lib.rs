// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the Synacor toolkit live in `benches/`.
