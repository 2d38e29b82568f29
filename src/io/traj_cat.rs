// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Structures and functions for reading multiple mdcrd trajectories as a single trajectory.

use std::fs::File;
use std::marker::PhantomData;
use std::path::Path;

use crate::errors::ReadTrajError;
use crate::io::frame_list::FrameList;
use crate::io::mdcrd_io::MdcrdFile;
use crate::io::traj_io::{
    check_atom_numbers, read_selected, CoordinateTarget, ProgressPrintable, TrajMasterRead,
};
use crate::progress::ProgressPrinter;
use crate::system::System;

/// Position of a frame of a concatenated trajectory in the individual trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLocation {
    /// Index of the trajectory file.
    pub trajectory: usize,
    /// Index of the frame inside the trajectory file.
    pub frame: usize,
}

/// Several mdcrd trajectories behaving as one trajectory.
///
/// ## Example
/// ```no_run
/// use mdcrd_rs::prelude::*;
///
/// let mut system = System::from_n_atoms("My System", 2048);
/// let mut cat = TrajCat::new(&["md1.mdcrd", "md2.mdcrd", "md3.mdcrd"], 2048).unwrap();
///
/// // read the last frame of all trajectories
/// let location = cat.read_frame(-1, &mut system).unwrap();
/// println!("Frame {} of trajectory {}", location.frame, location.trajectory);
/// ```
#[derive(Debug)]
pub struct TrajCat {
    trajectories: Vec<MdcrdFile<File>>,
    /// Global index of the first frame of each trajectory.
    starts: Vec<usize>,
    n_frames: usize,
    frames: FrameList,
}

impl TrajCat {
    /// Open all provided mdcrd files, each containing `n_atoms` atoms.
    ///
    /// ## Returns
    /// `TrajCat` if all files have been opened.
    /// `ReadTrajError::CatNoTrajectories` if no files were provided.
    /// `ReadTrajError::Probe` if any file could not be opened.
    pub fn new(filenames: &[impl AsRef<Path>], n_atoms: usize) -> Result<Self, ReadTrajError> {
        if filenames.is_empty() {
            return Err(ReadTrajError::CatNoTrajectories);
        }

        let trajectories = filenames
            .iter()
            .map(|file| MdcrdFile::open(file, n_atoms))
            .collect::<Result<Vec<MdcrdFile<File>>, _>>()?;

        let mut starts = Vec::with_capacity(trajectories.len());
        let mut n_frames = 0;
        for trajectory in trajectories.iter() {
            starts.push(n_frames);
            n_frames += trajectory.get_n_frames();
        }

        Ok(TrajCat {
            trajectories,
            starts,
            n_frames,
            frames: FrameList::new(n_frames),
        })
    }

    /// Skip the first `skip` selected frames of the concatenated trajectory.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.frames = self.frames.with_skip(skip);
        self
    }

    /// Only keep every `stride`th selected frame of the concatenated trajectory.
    ///
    /// ## Returns
    /// `TrajCat` if successful. `ReadTrajError::FrameList` if `stride` is zero.
    pub fn with_stride(mut self, stride: usize) -> Result<Self, ReadTrajError> {
        self.frames = self.frames.with_stride(stride)?;
        Ok(self)
    }

    /// Get the number of selected frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check whether no frames are selected.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Get the total number of frames of all trajectories.
    pub fn get_n_frames(&self) -> usize {
        self.n_frames
    }

    /// Get the number of concatenated trajectories.
    pub fn get_n_trajectories(&self) -> usize {
        self.trajectories.len()
    }

    /// Get the list of selected frames. Frames are indexed globally across all trajectories.
    pub fn get_frame_list(&self) -> &FrameList {
        &self.frames
    }

    /// Find the trajectory and the frame corresponding to the selected frame at `index`.
    /// Negative `index` counts from the end of the selection.
    ///
    /// Returns `None` if `index` is outside of the selection.
    pub fn frame_location(&self, index: isize) -> Option<FrameLocation> {
        let global = self.frames.frame_number(index)?;
        Some(self.locate(global))
    }

    /// Read the selected frame at `index` into the target.
    /// Negative `index` counts from the end of the selection.
    ///
    /// ## Returns
    /// Location of the frame if successful.
    /// `ReadTrajError::IndexOutOfRange` if `index` is outside of the selection.
    /// Any error that can be returned by `MdcrdFile::read_frame` or `MdcrdFile::update_target`.
    pub fn read_frame<T: CoordinateTarget + ?Sized>(
        &mut self,
        index: isize,
        target: &mut T,
    ) -> Result<FrameLocation, ReadTrajError> {
        let location = self
            .frame_location(index)
            .ok_or(ReadTrajError::IndexOutOfRange(index, self.frames.len()))?;

        let trajectory = &mut self.trajectories[location.trajectory];
        read_selected(trajectory, location.frame)?;
        trajectory.update_target(target)?;

        Ok(location)
    }

    /// Map a global frame index to its trajectory.
    fn locate(&self, global: usize) -> FrameLocation {
        let trajectory = self.starts.partition_point(|&start| start <= global) - 1;

        FrameLocation {
            trajectory,
            frame: global - self.starts[trajectory],
        }
    }
}

/***************************************/
/*            TrajCatReader            */
/***************************************/

/// Iterator over the frames of concatenated mdcrd trajectories updating the `System` structure.
///
/// Constructed using `System::mdcrd_cat_iter`.
pub struct TrajCatReader<'a> {
    // safety: only this system pointer can be used!
    system: *mut System,
    traj_cat: TrajCat,
    n_read: usize,
    finished: bool,
    current: Option<FrameLocation>,
    progress_printer: Option<ProgressPrinter>,
    _phantom: PhantomData<&'a mut System>,
}

impl<'a> TrajCatReader<'a> {
    /// Skip the first `skip` frames of the iteration.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.traj_cat = self.traj_cat.with_skip(skip);
        self
    }

    /// Only read every `step`th frame of the iteration.
    ///
    /// If the `step` is zero, returns `ReadTrajError::InvalidStep`.
    pub fn with_step(mut self, step: usize) -> Result<Self, ReadTrajError> {
        if step == 0 {
            return Err(ReadTrajError::InvalidStep(step));
        }

        self.traj_cat = self.traj_cat.with_stride(step)?;
        Ok(self)
    }

    /// Get the location of the frame that has been read last.
    pub fn get_current_location(&self) -> Option<FrameLocation> {
        self.current
    }

    /// Get the underlying concatenated trajectory.
    pub fn get_traj_cat(&self) -> &TrajCat {
        &self.traj_cat
    }

    /// Global index of the frame that has been read last.
    fn last_global_frame(&self) -> usize {
        self.n_read
            .checked_sub(1)
            .and_then(|n| self.traj_cat.get_frame_list().frame_number(n as isize))
            .unwrap_or(0)
    }
}

impl<'a> Iterator for TrajCatReader<'a> {
    type Item = Result<&'a mut System, ReadTrajError>;

    /// Read the next selected frame of the concatenated trajectories and update the `System` structure.
    ///
    /// ## Returns
    /// - `Some(Ok(&mut System))` if the frame has been succesfully read.
    /// - `Some(Err(ReadTrajError))` if the frame could not be read. The iteration then ends.
    /// - `None` if all selected frames have been read.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.n_read >= self.traj_cat.len() {
            if !self.finished {
                self.finished = true;
                self.progress_set(&None);
                let frame_index = self.last_global_frame();
                self.progress_print(self.n_read, frame_index);
            }

            return None;
        }

        unsafe {
            let system = self.system;

            let result = match self.traj_cat.read_frame(self.n_read as isize, &mut *system) {
                Ok(location) => {
                    self.current = Some(location);
                    self.n_read += 1;
                    Some(Ok(&mut *system))
                }
                Err(e) => {
                    self.current = None;
                    self.finished = true;
                    Some(Err(e))
                }
            };

            let frame_index = self.last_global_frame();
            self.progress_set(&result);
            self.progress_print(self.n_read, frame_index);

            result
        }
    }
}

impl<'a> TrajMasterRead<'a> for TrajCatReader<'a> {}

impl ProgressPrintable for TrajCatReader<'_> {
    fn get_progress_printer_mut(&mut self) -> Option<&mut ProgressPrinter> {
        self.progress_printer.as_mut()
    }

    fn set_progress_printer(&mut self, printer: ProgressPrinter) {
        self.progress_printer = Some(printer);
    }
}

/// ## Methods for iterating over concatenated mdcrd trajectories.
impl System {
    /// Iterate over several mdcrd trajectories as if they were a single trajectory.
    /// All trajectories must contain the same number of atoms as the system.
    ///
    /// ## Returns
    /// `TrajCatReader` if all trajectories have been opened.
    /// `ReadTrajError` in case of an error.
    ///
    /// ## Example
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    ///
    /// let mut system = System::from_n_atoms("My System", 2048);
    ///
    /// for raw_frame in system
    ///     .mdcrd_cat_iter(&["md1.mdcrd", "md2.mdcrd"])
    ///     .unwrap()
    /// {
    ///     let frame = raw_frame.unwrap();
    ///     // analyze the frame
    /// }
    /// ```
    pub fn mdcrd_cat_iter(
        &mut self,
        filenames: &[impl AsRef<Path>],
    ) -> Result<TrajCatReader<'_>, ReadTrajError> {
        let n_atoms = self.get_n_atoms();
        let traj_cat = TrajCat::new(filenames, n_atoms)?;
        check_atom_numbers(self, n_atoms)?;

        Ok(TrajCatReader {
            system: self as *mut System,
            traj_cat,
            n_read: 0,
            finished: false,
            current: None,
            progress_printer: None,
            _phantom: PhantomData,
        })
    }
}

/**************************/
/*       UNIT TESTS       */
/**************************/
