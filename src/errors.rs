// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Error types returned by the `mdcrd_rs` library.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur when probing the layout of an mdcrd file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseMdcrdError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("Number of atoms in a trajectory must be positive.")]
    NoAtoms,
    #[error("Title line of the trajectory could not be read.")]
    TitleNotFound,
    #[error("Only `{0}` complete atoms could be read from the first frame.")]
    IncompleteFrame(usize),
    #[error("Could not parse `{0}` as a coordinate.")]
    InvalidNumber(String),
    #[error("Unable to determine frame layout of the trajectory.")]
    LayoutNotDetermined,
    #[error("Cached layout describes `{0}` atoms but `{1}` atoms were requested.")]
    LayoutAtomsMismatch(usize, usize),
}

/// Errors that can occur when reading frames of a trajectory.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReadTrajError {
    #[error("Frame could not be read. The trajectory is corrupted.")]
    FrameNotFound,
    #[error("Periodic box of the frame could not be read. The trajectory is corrupted.")]
    BoxNotFound,
    #[error("Could not seek to frame `{0}`.")]
    SeekFailed(usize),
    #[error("Frame `{0}` does not exist. The trajectory contains `{1}` frames.")]
    FrameOutOfRange(usize, usize),
    #[error("Atom number `{0}` does not exist in a trajectory of `{1}` atoms.")]
    AtomOutOfRange(usize, usize),
    #[error("Index `{0}` is out of range for a selection of `{1}` frames.")]
    IndexOutOfRange(isize, usize),
    #[error("`{0}` is not a valid step. Step must be positive.")]
    InvalidStep(usize),
    #[error("No trajectories were provided for concatenation.")]
    CatNoTrajectories,
    #[error("{0}")]
    Probe(#[from] ParseMdcrdError),
    #[error("{0}")]
    FrameList(#[from] FrameListError),
}

/// Errors that can occur when constructing a list of frames to read.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameListError {
    #[error("`{0}` is not a valid stride. Stride must be positive.")]
    InvalidStride(usize),
    #[error("Frame `{0}` does not exist. The trajectory contains `{1}` frames.")]
    FrameOutOfRange(usize, usize),
}

/// Errors that can occur when reading or writing a cached trajectory layout.
#[derive(Error, Debug)]
pub enum LayoutCacheError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("File `{0}` could not be written.")]
    CouldNotWrite(Box<Path>),
    #[error("Could not parse the layout file: `{0}`.")]
    CouldNotParseYaml(serde_yaml::Error),
    #[error("Could not serialize the layout: `{0}`.")]
    CouldNotSerialize(serde_yaml::Error),
}
