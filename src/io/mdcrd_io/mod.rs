// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of a random-access reader of Amber ASCII trajectories (mdcrd files).
//!
//! The mdcrd format has no header describing the trajectory. The first line is a title,
//! followed by frames, each consisting of `3 * n_atoms` numbers (conventionally written
//! ten per line in 8-character fields) and optionally a line with three box dimensions.
//! The layout of the frames is detected when the file is opened and all frames
//! are assumed to occupy the same number of bytes.

mod layout;
mod stream;

pub use layout::MdcrdLayout;

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::errors::{ParseMdcrdError, ReadTrajError};
use crate::io::traj_io::CoordinateTarget;
use crate::structures::{simbox::SimBox, vector3d::Vector3D};

use layout::{first_frame_check, probe, ProbeResult};
use stream::{Field, FrameRead, MdcrdStream};

/// State of the frame cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Frame 0 decoded while opening the file is held in the buffer
    /// and will be provided by the next read without touching the file.
    Primed,
    /// Frames are read from the file.
    Streaming,
}

/// Frame cursor over an mdcrd trajectory.
///
/// `MdcrdFile` holds the data of a single frame at a time. Frames can be read
/// sequentially using `MdcrdFile::read_next_frame` or randomly using `MdcrdFile::read_frame`.
/// The data of the current frame are transferred into a target using `MdcrdFile::update_target`.
///
/// ## Example
/// Reading an mdcrd file frame by frame.
/// ```no_run
/// use mdcrd_rs::prelude::*;
///
/// let mut mdcrd = MdcrdFile::open("trajectory.mdcrd", 2048).unwrap();
/// let mut system = System::from_n_atoms("My System", 2048);
///
/// while mdcrd.read_next_frame().unwrap() {
///     mdcrd.update_target(&mut system).unwrap();
///     // analyze the frame
/// }
/// ```
#[derive(Debug)]
pub struct MdcrdFile<R: Read + Seek> {
    stream: MdcrdStream<R>,
    layout: MdcrdLayout,
    positions: Vec<Vector3D>,
    simbox: Option<SimBox>,
    state: CursorState,
    current_frame: Option<usize>,
}

impl MdcrdFile<File> {
    /// Open an mdcrd file containing `n_atoms` atoms and detect its layout.
    ///
    /// ## Returns
    /// `MdcrdFile` holding the first frame of the trajectory if successful.
    /// `ParseMdcrdError` if the file could not be opened or its layout could not be determined.
    ///
    /// ## Notes
    /// - The number of atoms can not be determined from the mdcrd file itself
    ///   and must be provided by the caller.
    /// - All frames of the trajectory must have the same byte length.
    /// - A single-atom trajectory without a box can not be told apart from a trajectory
    ///   with a box. Such a file is read as containing a box.
    pub fn open(filename: impl AsRef<Path>, n_atoms: usize) -> Result<Self, ParseMdcrdError> {
        let file = File::open(&filename)
            .map_err(|_| ParseMdcrdError::FileNotFound(Box::from(filename.as_ref())))?;

        MdcrdFile::new(file, n_atoms)
    }

    /// Open an mdcrd file using a previously determined layout.
    /// The layout of the file is not detected.
    ///
    /// ## Returns
    /// `MdcrdFile` holding the first frame of the trajectory if successful.
    /// `ParseMdcrdError::LayoutAtomsMismatch` if the layout was created for a different number of atoms.
    /// `ParseMdcrdError::LayoutNotDetermined` if the layout does not fit the file.
    pub fn open_with_layout(
        filename: impl AsRef<Path>,
        n_atoms: usize,
        layout: MdcrdLayout,
    ) -> Result<Self, ParseMdcrdError> {
        let file = File::open(&filename)
            .map_err(|_| ParseMdcrdError::FileNotFound(Box::from(filename.as_ref())))?;

        MdcrdFile::with_layout(file, n_atoms, layout)
    }
}

impl<R: Read + Seek> MdcrdFile<R> {
    /// Create a frame cursor over any readable and seekable source of mdcrd data.
    /// The reader must be positioned at the start of the data.
    ///
    /// ## Example
    /// ```
    /// use mdcrd_rs::prelude::*;
    /// use std::io::Cursor;
    ///
    /// let data = "title\n   1.000   2.000   3.000\n   4.000   5.000   6.000\n";
    /// let mut mdcrd = MdcrdFile::new(Cursor::new(data), 1).unwrap();
    ///
    /// assert_eq!(mdcrd.get_n_frames(), 2);
    /// assert!(!mdcrd.has_box());
    /// ```
    pub fn new(reader: R, n_atoms: usize) -> Result<Self, ParseMdcrdError> {
        let mut stream = MdcrdStream::new(reader);
        let mut positions = vec![Vector3D::default(); n_atoms];

        let ProbeResult { layout, simbox } = probe(&mut stream, &mut positions)?;

        Ok(MdcrdFile {
            stream,
            layout,
            positions,
            simbox,
            state: CursorState::Primed,
            current_frame: Some(0),
        })
    }

    /// Create a frame cursor using a previously determined layout.
    ///
    /// The first frame of the trajectory is read immediately.
    pub fn with_layout(
        reader: R,
        n_atoms: usize,
        layout: MdcrdLayout,
    ) -> Result<Self, ParseMdcrdError> {
        let mut stream = MdcrdStream::new(reader);
        layout.validate(&mut stream, n_atoms)?;

        let mut positions = vec![Vector3D::default(); n_atoms];

        stream
            .seek(layout.frame_offset())
            .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?;

        first_frame_check(
            stream
                .read_coordinates(&mut positions)
                .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?,
        )?;

        let simbox = if layout.has_box() {
            match stream.read_triple() {
                Ok(Ok(dimensions)) => Some(SimBox::from(dimensions)),
                _ => return Err(ParseMdcrdError::LayoutNotDetermined),
            }
        } else {
            None
        };

        stream
            .seek(layout.frame_position(1))
            .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?;

        Ok(MdcrdFile {
            stream,
            layout,
            positions,
            simbox,
            state: CursorState::Primed,
            current_frame: Some(0),
        })
    }

    /// Read the next frame of the trajectory.
    ///
    /// ## Returns
    /// - `Ok(true)` if the frame has been read.
    /// - `Ok(false)` if the end of the trajectory has been reached.
    ///   An incomplete frame at the end of the file is silently discarded.
    /// - `ReadTrajError::FrameNotFound` if the coordinates could not be parsed.
    /// - `ReadTrajError::BoxNotFound` if the box of the frame could not be read.
    ///
    /// ## Notes
    /// - The first call after opening the file provides frame 0
    ///   which has already been read while opening the file.
    pub fn read_next_frame(&mut self) -> Result<bool, ReadTrajError> {
        if self.state == CursorState::Primed {
            self.state = CursorState::Streaming;
            return Ok(true);
        }

        let next = self.current_frame.map(|frame| frame + 1);
        self.current_frame = None;

        if next.is_some_and(|frame| frame >= self.layout.n_frames()) {
            return Ok(false);
        }

        if !self.read_from_stream()? {
            return Ok(false);
        }

        // the frame reached into the incomplete data following the last complete frame
        if self.stream.position() > self.layout.frame_position(self.layout.n_frames()) {
            return Ok(false);
        }

        self.current_frame = next;
        Ok(true)
    }

    /// Read the frame with the target index (starting from 0).
    ///
    /// ## Returns
    /// - `Ok(true)` if the frame has been read.
    /// - `ReadTrajError::FrameOutOfRange` if the frame does not exist.
    /// - `ReadTrajError::SeekFailed` if the frame could not be located in the file.
    /// - Any error that can be returned by `MdcrdFile::read_next_frame`.
    ///
    /// ## Example
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    ///
    /// let mut mdcrd = MdcrdFile::open("trajectory.mdcrd", 2048).unwrap();
    /// let mut system = System::from_n_atoms("My System", 2048);
    ///
    /// // read the last frame of the trajectory
    /// mdcrd.read_frame(mdcrd.get_n_frames() - 1).unwrap();
    /// mdcrd.update_target(&mut system).unwrap();
    /// ```
    pub fn read_frame(&mut self, index: usize) -> Result<bool, ReadTrajError> {
        if index == 0 && self.state == CursorState::Primed {
            self.state = CursorState::Streaming;
            return Ok(true);
        }

        self.state = CursorState::Streaming;

        if index >= self.layout.n_frames() {
            return Err(ReadTrajError::FrameOutOfRange(
                index,
                self.layout.n_frames(),
            ));
        }

        self.current_frame = None;
        self.stream
            .seek(self.layout.frame_position(index))
            .map_err(|_| ReadTrajError::SeekFailed(index))?;

        // the frame is within the file, so exhaustion means a corrupted trajectory
        if !self.read_from_stream()? {
            return Err(ReadTrajError::FrameNotFound);
        }

        self.current_frame = Some(index);
        Ok(true)
    }

    /// Transfer the data of the current frame into the target.
    ///
    /// The position of each atom of the target is set to the position of the atom
    /// in the frame with the index `atom number - 1`. If the trajectory contains
    /// a periodic box, the box of the target is also set.
    ///
    /// ## Returns
    /// `Ok` if the target has been updated.
    /// `ReadTrajError::AtomOutOfRange` if any atom of the target does not exist in the trajectory.
    /// In such case, the target is not modified.
    pub fn update_target<T: CoordinateTarget + ?Sized>(
        &self,
        target: &mut T,
    ) -> Result<(), ReadTrajError> {
        let n_atoms = self.positions.len();

        if let Some(atom) = target
            .target_atoms_mut()
            .find(|atom| !(1..=n_atoms).contains(&atom.get_atom_number()))
        {
            return Err(ReadTrajError::AtomOutOfRange(
                atom.get_atom_number(),
                n_atoms,
            ));
        }

        for atom in target.target_atoms_mut() {
            let index = atom.get_atom_number() - 1;
            atom.set_position(self.positions[index]);
        }

        if let Some(simbox) = self.simbox {
            target.set_target_box(simbox);
        }

        Ok(())
    }

    /// Get the number of complete frames in the trajectory.
    pub fn get_n_frames(&self) -> usize {
        self.layout.n_frames()
    }

    /// Check whether the trajectory contains a periodic box.
    pub fn has_box(&self) -> bool {
        self.layout.has_box()
    }

    /// Get the number of atoms in each frame.
    pub fn get_n_atoms(&self) -> usize {
        self.layout.n_atoms()
    }

    /// Get the layout of the trajectory file.
    pub fn get_layout(&self) -> &MdcrdLayout {
        &self.layout
    }

    /// Get the positions of atoms of the current frame.
    ///
    /// ## Notes
    /// - After the end of the trajectory has been reached or a read failed,
    ///   the content of the buffer is unspecified.
    pub fn get_positions(&self) -> &[Vector3D] {
        &self.positions
    }

    /// Get the periodic box of the current frame.
    /// Returns `None` if the trajectory does not contain a box.
    pub fn get_box(&self) -> Option<&SimBox> {
        self.simbox.as_ref()
    }

    /// Check whether frame 0 is held in the buffer and has not been provided by any read yet.
    pub fn is_primed(&self) -> bool {
        self.state == CursorState::Primed
    }

    /// Get the current state of the cursor.
    pub fn get_state(&self) -> CursorState {
        self.state
    }

    /// Get the index of the frame currently held in the buffer.
    /// Returns `None` if the buffer holds no complete frame or the index is not known.
    pub fn get_current_frame(&self) -> Option<usize> {
        self.current_frame
    }

    /// Read a single frame at the current position of the stream.
    fn read_from_stream(&mut self) -> Result<bool, ReadTrajError> {
        if self.stream.is_eof() {
            return Ok(false);
        }

        match self.stream.read_coordinates(&mut self.positions) {
            Ok(FrameRead::Complete) => (),
            Ok(FrameRead::Exhausted(_)) => return Ok(false),
            Ok(FrameRead::Invalid(_)) | Err(_) => return Err(ReadTrajError::FrameNotFound),
        }

        if self.layout.has_box() {
            match self.stream.read_triple() {
                Ok(Ok(dimensions)) => self.simbox = Some(SimBox::from(dimensions)),
                Ok(Err(Field::Number(_))) => panic!(
                    "FATAL MDCRD ERROR | MdcrdFile::read_from_stream | Complete number reported as a failure."
                ),
                Ok(Err(_)) | Err(_) => return Err(ReadTrajError::BoxNotFound),
            }
        }

        Ok(true)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
