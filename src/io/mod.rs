// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: image decoding and export encoding.

pub mod export;
pub mod media;
