// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end conformance tests for the Synacor toolkit live in `tests/`.
