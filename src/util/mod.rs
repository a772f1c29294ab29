// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Small shared utilities.

pub mod geometry;
pub mod input;
