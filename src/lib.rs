// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! # mdcrd_rs: Amber ASCII Trajectory Reader for Rust
//!
//! Rust library for reading Amber ASCII coordinate trajectories (mdcrd files)
//! frame by frame, sequentially or in random order, without loading the whole
//! trajectory into memory.
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ cargo add mdcrd_rs
//! ```
//!
//! Import the crate in your Rust code:
//! ```
//! use mdcrd_rs::prelude::*;
//! ```
//!
//! ## The mdcrd format
//!
//! An mdcrd file starts with a single title line. Each frame then contains `3 * N` numbers
//! (x, y, z coordinates of `N` atoms), conventionally written ten per line in 8-character fields.
//! If the simulation used periodic boundary conditions, each frame is followed
//! by a line containing the three box dimensions.
//!
//! The file does not store the number of atoms, so it must always be provided by the caller.
//! The layout of the frames (their byte length and the presence of the box) is detected
//! when the file is opened. All frames of the trajectory must have the same byte length.
//!
//! ## Examples
//!
//! #### Iterating through a trajectory
//!
//! ```no_run
//! use mdcrd_rs::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     // create a system of 2048 atoms numbered from 1 to 2048
//!     let mut system = System::from_n_atoms("My System", 2048);
//!
//!     let mut first_atom = Vec::new();
//!     for frame in system.mdcrd_iter("md.mdcrd")? {
//!         let frame = frame?;
//!         first_atom.push(frame.get_atoms_as_ref()[0].get_position().cloned());
//!     }
//!
//!     println!("{:?}", first_atom);
//!     Ok(())
//! }
//! ```
//!
//! #### Random access to frames
//!
//! ```no_run
//! use mdcrd_rs::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let mut mdcrd = MdcrdFile::open("md.mdcrd", 2048)?;
//!     let mut system = System::from_n_atoms("My System", 2048);
//!
//!     println!("Trajectory contains {} frames.", mdcrd.get_n_frames());
//!
//!     // read frames backwards
//!     for index in (0..mdcrd.get_n_frames()).rev() {
//!         mdcrd.read_frame(index)?;
//!         mdcrd.update_target(&mut system)?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Reading several trajectories as one
//!
//! ```no_run
//! use mdcrd_rs::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let mut system = System::from_n_atoms("My System", 2048);
//!
//!     // skip the first 10 frames and then read every 5th frame of the concatenated trajectory
//!     for frame in system
//!         .mdcrd_cat_iter(&["md1.mdcrd", "md2.mdcrd"])?
//!         .with_skip(10)
//!         .with_step(5)?
//!     {
//!         let frame = frame?;
//!         // analyze the frame
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `serde`: serialization of `Vector3D` and `SimBox` structures.

/// Current version of the `mdcrd_rs` library.
pub const MDCRD_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod errors;
pub mod io;
pub mod progress;
pub mod structures;
pub mod system;

mod test_utilities;

/// Reexported basic `mdcrd_rs` structures and traits.
pub mod prelude {
    pub use crate::io::frame_list::FrameList;
    pub use crate::io::mdcrd_io::{CursorState, MdcrdFile, MdcrdLayout};
    pub use crate::io::traj_cat::{FrameLocation, TrajCat, TrajCatReader};
    pub use crate::io::traj_io::{
        CoordinateTarget, MdcrdReader, ProgressPrintable, TrajMasterRead,
    };
    pub use crate::progress::{ProgressPrinter, ProgressStatus};
    pub use crate::structures::atom::Atom;
    pub use crate::structures::simbox::SimBox;
    pub use crate::structures::vector3d::Vector3D;
    pub use crate::system::System;
}
