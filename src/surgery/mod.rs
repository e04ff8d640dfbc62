// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Curveskel Developers

//! Topological surgery: contracted surface to curve skeleton

mod surgeon;

pub use surgeon::ConnectivitySurgeon;
