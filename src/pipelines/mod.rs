// SPDX-License-Identifier: GPL-3.0-only

//! Capture and export pipelines

pub mod photo;
