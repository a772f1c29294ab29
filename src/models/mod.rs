// Copyright (c) 2026, Trace Draw contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the trace-draw session.

pub mod annotation;
pub mod crop;
pub mod session;
