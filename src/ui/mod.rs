// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the trace-draw application.

pub mod controls;
pub mod crop;
pub mod draw;
