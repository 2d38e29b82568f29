// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of various structures used in the `mdcrd_rs` library.

pub mod atom;
pub mod simbox;
pub mod vector3d;
