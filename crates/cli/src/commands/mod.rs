// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod dump;
pub mod jenkins;
pub mod list;
pub mod render;
pub mod show;
