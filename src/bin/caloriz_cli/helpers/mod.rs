// ABOUTME: Re-exports helper modules for caloriz-cli
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

pub mod display;
