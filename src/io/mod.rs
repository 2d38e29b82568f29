// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of functions for reading Amber ASCII trajectories.

pub mod frame_list;
pub mod mdcrd_io;
pub mod traj_cat;
pub mod traj_io;
