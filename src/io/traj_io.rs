// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Traits and structures for iterating over mdcrd trajectories.

use std::fs::File;
use std::io::{Read, Seek};
use std::marker::PhantomData;
use std::path::Path;

use crate::errors::ReadTrajError;
use crate::io::frame_list::FrameList;
use crate::io::mdcrd_io::MdcrdFile;
use crate::progress::{ProgressPrinter, ProgressStatus};
use crate::structures::{atom::Atom, simbox::SimBox};
use crate::system::System;

/// Any structure implementing this trait can receive coordinates from trajectory frames.
pub trait CoordinateTarget {
    /// Get mutable iterator over the atoms of the target.
    /// Each atom receives the position of the atom with the index `atom number - 1` in the frame.
    fn target_atoms_mut(&mut self) -> std::slice::IterMut<'_, Atom>;

    /// Set the periodic box of the target.
    fn set_target_box(&mut self, simbox: SimBox);
}

/// Check that all atoms of the system exist in a trajectory of `n_atoms` atoms.
pub(crate) fn check_atom_numbers(system: &System, n_atoms: usize) -> Result<(), ReadTrajError> {
    match system
        .get_atoms_as_ref()
        .iter()
        .find(|atom| !(1..=n_atoms).contains(&atom.get_atom_number()))
    {
        Some(atom) => Err(ReadTrajError::AtomOutOfRange(
            atom.get_atom_number(),
            n_atoms,
        )),
        None => Ok(()),
    }
}

/// Read the selected frame, reading sequentially if the frame directly follows the current frame.
pub(crate) fn read_selected<R: Read + Seek>(
    mdcrd: &mut MdcrdFile<R>,
    frame: usize,
) -> Result<(), ReadTrajError> {
    let sequential = !mdcrd.is_primed()
        && mdcrd
            .get_current_frame()
            .is_some_and(|current| current + 1 == frame);

    let read = if sequential {
        mdcrd.read_next_frame()?
    } else {
        mdcrd.read_frame(frame)?
    };

    if read {
        Ok(())
    } else {
        Err(ReadTrajError::FrameNotFound)
    }
}

/**************************/
/*       MdcrdReader      */
/**************************/

/// Iterator over the frames of an mdcrd trajectory updating the `System` structure.
///
/// Constructed using `System::mdcrd_iter` or `System::mdcrd_iter_n_atoms`.
pub struct MdcrdReader<'a> {
    // safety: only this system pointer can be used!
    system: *mut System,
    mdcrd: MdcrdFile<File>,
    frames: FrameList,
    n_read: usize,
    finished: bool,
    progress_printer: Option<ProgressPrinter>,
    _phantom: PhantomData<&'a mut System>,
}

impl<'a> MdcrdReader<'a> {
    /// Open an mdcrd trajectory containing `n_atoms` atoms for reading into the system.
    ///
    /// ## Returns
    /// `MdcrdReader` if successful.
    /// `ReadTrajError::Probe` if the file could not be opened or its layout could not be determined.
    /// `ReadTrajError::AtomOutOfRange` if any atom of the system does not exist in the trajectory.
    pub fn new(
        system: &'a mut System,
        filename: impl AsRef<Path>,
        n_atoms: usize,
    ) -> Result<MdcrdReader<'a>, ReadTrajError> {
        let mdcrd = MdcrdFile::open(filename, n_atoms)?;
        check_atom_numbers(system, n_atoms)?;

        let frames = FrameList::new(mdcrd.get_n_frames());

        Ok(MdcrdReader {
            system: system as *mut System,
            mdcrd,
            frames,
            n_read: 0,
            finished: false,
            progress_printer: None,
            _phantom: PhantomData,
        })
    }

    /// Skip the first `skip` frames of the iteration.
    ///
    /// ## Example
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    ///
    /// let mut system = System::from_n_atoms("My System", 2048);
    ///
    /// // skip the first 100 frames (equilibration), then read every 10th frame
    /// for frame in system
    ///     .mdcrd_iter("trajectory.mdcrd")
    ///     .unwrap()
    ///     .with_skip(100)
    ///     .with_step(10)
    ///     .unwrap()
    /// {
    ///     let frame = frame.unwrap();
    ///     // analyze the frame
    /// }
    /// ```
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.frames = self.frames.with_skip(skip);
        self
    }

    /// Only read every `step`th frame of the iteration.
    /// Frames which are not read are not parsed at all.
    ///
    /// If the `step` is zero, returns `ReadTrajError::InvalidStep`.
    pub fn with_step(mut self, step: usize) -> Result<Self, ReadTrajError> {
        if step == 0 {
            return Err(ReadTrajError::InvalidStep(step));
        }

        self.frames = self.frames.with_stride(step)?;
        Ok(self)
    }

    /// Only read the specified frames in the specified order.
    /// Replaces any previously applied `with_skip` or `with_step`.
    ///
    /// ## Returns
    /// `MdcrdReader` if successful.
    /// `ReadTrajError::FrameList` if any of the frames does not exist.
    pub fn with_frames(mut self, frames: Vec<usize>) -> Result<Self, ReadTrajError> {
        self.frames = FrameList::from_indices(frames, self.mdcrd.get_n_frames())?;
        Ok(self)
    }

    /// Get the index of the trajectory frame that has been read last.
    pub fn get_current_frame_index(&self) -> Option<usize> {
        match self.n_read {
            0 => None,
            n => self.frames.frame_number((n - 1) as isize),
        }
    }

    /// Get the list of frames selected for reading.
    pub fn get_frame_list(&self) -> &FrameList {
        &self.frames
    }

    /// Get the underlying frame cursor.
    pub fn get_mdcrd(&self) -> &MdcrdFile<File> {
        &self.mdcrd
    }
}

impl<'a> Iterator for MdcrdReader<'a> {
    type Item = Result<&'a mut System, ReadTrajError>;

    /// Read the next selected frame of the trajectory and update the `System` structure.
    ///
    /// ## Returns
    /// - `Some(Ok(&mut System))` if the frame has been succesfully read.
    /// - `Some(Err(ReadTrajError))` if the frame could not be read. The iteration then ends.
    /// - `None` if all selected frames have been read.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        unsafe {
            let system = self.system;

            let frame = self.frames.frame_number(self.n_read as isize);
            let result = match frame {
                None => None,
                Some(index) => match read_selected(&mut self.mdcrd, index)
                    .and_then(|_| self.mdcrd.update_target(&mut *system))
                {
                    Ok(_) => Some(Ok(&mut *system)),
                    Err(e) => Some(Err(e)),
                },
            };

            if !matches!(result, Some(Ok(_))) {
                self.finished = true;
            } else {
                self.n_read += 1;
            }

            let frame_index = frame.or(self.get_current_frame_index()).unwrap_or(0);
            self.progress_set(&result);
            self.progress_print(self.n_read, frame_index);

            result
        }
    }
}

/***************************************/
/*        TrajMasterRead trait         */
/***************************************/

/// This trait is implemented by all trajectory readers so they can be used in generic functions.
pub trait TrajMasterRead<'a>:
    Iterator<Item = Result<&'a mut System, ReadTrajError>> + ProgressPrintable
{
    /// Print progress of the trajectory reading. This can be applied to any trajectory reader.
    ///
    /// ## Example
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    ///
    /// let mut system = System::from_n_atoms("My System", 2048);
    ///
    /// // information will be printed every 10 trajectory frames
    /// let printer = ProgressPrinter::new().with_print_freq(10);
    ///
    /// for raw_frame in system.mdcrd_iter("trajectory.mdcrd").unwrap().print_progress(printer) {
    ///     let frame = raw_frame.unwrap();
    ///
    ///     // perform some analysis
    /// }
    /// ```
    fn print_progress(mut self, printer: ProgressPrinter) -> Self
    where
        Self: Sized,
    {
        self.set_progress_printer(printer);
        self
    }
}

impl<'a> TrajMasterRead<'a> for MdcrdReader<'a> {}

/***************************************/
/*     ProgressPrintable trait         */
/***************************************/

/// This trait is implemented for all trajectory readers and
/// allows for printing of the progress of the trajectory reading.
pub trait ProgressPrintable {
    /// Set the status of the progress printer associated with the trajectory reader according to the progress of the reading.
    fn progress_set(&mut self, result: &Option<Result<&mut System, ReadTrajError>>) {
        if let Some(printer) = self.get_progress_printer_mut() {
            match result {
                None => printer.set_status(ProgressStatus::Completed),
                Some(Err(_)) => printer.set_status(ProgressStatus::Failed),
                Some(Ok(_)) => (),
            }
        }
    }

    /// Print the current progress of the trajectory reading.
    fn progress_print(&mut self, n_read: usize, frame_index: usize) {
        if let Some(printer) = self.get_progress_printer_mut() {
            printer.print(n_read, frame_index)
        }
    }

    /// Return mutable pointer to the progress printer associated with the trajectory reader.
    fn get_progress_printer_mut(&mut self) -> Option<&mut ProgressPrinter>;

    /// Associate progress printer with the trajectory reader.
    fn set_progress_printer(&mut self, printer: ProgressPrinter);
}

impl ProgressPrintable for MdcrdReader<'_> {
    fn get_progress_printer_mut(&mut self) -> Option<&mut ProgressPrinter> {
        self.progress_printer.as_mut()
    }

    fn set_progress_printer(&mut self, printer: ProgressPrinter) {
        self.progress_printer = Some(printer);
    }
}

/***************************************/
/*        System methods               */
/***************************************/

/// ## Methods for iterating over mdcrd trajectories.
impl System {
    /// Iterate over an mdcrd trajectory containing the same number of atoms as the system.
    ///
    /// ## Returns
    /// `MdcrdReader` if the trajectory has been successfully opened.
    /// `ReadTrajError` in case of an error.
    ///
    /// ## Example
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    /// use mdcrd_rs::errors::ReadTrajError;
    ///
    /// fn example_fn() -> Result<(), ReadTrajError> {
    ///     let mut system = System::from_n_atoms("My System", 2048);
    ///
    ///     for raw_frame in system.mdcrd_iter("trajectory.mdcrd")? {
    ///         let frame = raw_frame?;
    ///         println!("{:?}", frame.get_atoms_as_ref()[0].get_position());
    ///     }
    ///
    ///     Ok(())
    /// }
    /// ```
    ///
    /// ## Notes
    /// - The `System` structure is modified while iterating through the trajectory.
    /// - The system must contain at least one atom.
    pub fn mdcrd_iter(
        &mut self,
        filename: impl AsRef<Path>,
    ) -> Result<MdcrdReader<'_>, ReadTrajError> {
        let n_atoms = self.get_n_atoms();
        MdcrdReader::new(self, filename, n_atoms)
    }

    /// Iterate over an mdcrd trajectory containing `n_atoms` atoms.
    /// The system may contain only some of the atoms of the trajectory.
    ///
    /// ## Example
    /// Reading only a part of a large system.
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    ///
    /// let atoms = vec![Atom::new(17, "CA"), Atom::new(35, "CA")];
    /// let mut system = System::new("Two atoms", atoms, None);
    ///
    /// for raw_frame in system.mdcrd_iter_n_atoms("trajectory.mdcrd", 2048).unwrap() {
    ///     let frame = raw_frame.unwrap();
    ///     // analyze the frame
    /// }
    /// ```
    pub fn mdcrd_iter_n_atoms(
        &mut self,
        filename: impl AsRef<Path>,
        n_atoms: usize,
    ) -> Result<MdcrdReader<'_>, ReadTrajError> {
        MdcrdReader::new(self, filename, n_atoms)
    }
}

/**************************/
/*       UNIT TESTS       */
/**************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FrameListError, ParseMdcrdError};
    use crate::test_utilities::utilities::{assert_atoms_frame, expected_box};
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    #[test]
    fn mdcrd_iter_all() {
        let mut system = System::from_n_atoms("Test", 5);

        let mut n_read = 0;
        for raw in system.mdcrd_iter("test_files/traj_box.mdcrd").unwrap() {
            let frame = raw.unwrap();
            assert_atoms_frame(frame.get_atoms_as_ref(), n_read);
            assert_eq!(frame.get_box_as_ref(), Some(&expected_box(n_read)));
            n_read += 1;
        }

        assert_eq!(n_read, 6);
        assert_atoms_frame(system.get_atoms_as_ref(), 5);
    }

    #[test]
    fn mdcrd_iter_cut_number() {
        let mut system = System::from_n_atoms("Test", 5);

        let mut n_read = 0;
        for raw in system.mdcrd_iter("test_files/traj_box_cut_token.mdcrd").unwrap() {
            let frame = raw.unwrap();
            assert_atoms_frame(frame.get_atoms_as_ref(), n_read);
            assert_eq!(frame.get_box_as_ref(), Some(&expected_box(n_read)));
            n_read += 1;
        }

        assert_eq!(n_read, 5);
        assert_eq!(system.get_box_as_ref(), Some(&expected_box(4)));
    }

    #[test]
    fn mdcrd_iter_current_frame() {
        let mut system = System::from_n_atoms("Test", 5);
        let mut reader = system
            .mdcrd_iter("test_files/traj_nobox.mdcrd")
            .unwrap()
            .with_skip(2)
            .with_step(3)
            .unwrap();

        assert_eq!(reader.get_current_frame_index(), None);
        assert!(reader.next().unwrap().is_ok());
        assert_eq!(reader.get_current_frame_index(), Some(2));
        assert!(reader.next().unwrap().is_ok());
        assert_eq!(reader.get_current_frame_index(), Some(5));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn mdcrd_iter_skip() {
        let mut system = System::from_n_atoms("Test", 5);

        let mut expected = 3;
        for raw in system
            .mdcrd_iter("test_files/traj_box.mdcrd")
            .unwrap()
            .with_skip(3)
        {
            let frame = raw.unwrap();
            assert_atoms_frame(frame.get_atoms_as_ref(), expected);
            expected += 1;
        }

        assert_eq!(expected, 6);
    }

    #[test]
    fn mdcrd_iter_step() {
        let mut system = System::from_n_atoms("Test", 5);

        let indices: Vec<usize> = system
            .mdcrd_iter("test_files/traj_box.mdcrd")
            .unwrap()
            .with_step(2)
            .unwrap()
            .map(|raw| {
                let frame = raw.unwrap();
                let x = frame.get_atoms_as_ref()[0].get_position().unwrap().x;
                ((x + 2.0) / 1.5) as usize
            })
            .collect();

        assert_eq!(indices, vec![0, 2, 4]);
    }

    #[test]
    fn mdcrd_iter_step_zero() {
        let mut system = System::from_n_atoms("Test", 5);

        match system
            .mdcrd_iter("test_files/traj_box.mdcrd")
            .unwrap()
            .with_step(0)
        {
            Err(ReadTrajError::InvalidStep(0)) => (),
            Ok(_) => panic!("Function should have failed."),
            Err(e) => panic!("Unexpected error type `{}` returned.", e),
        }
    }

    #[test]
    fn mdcrd_iter_frames() {
        let mut system = System::from_n_atoms("Test", 5);
        let order = vec![5, 0, 3, 3, 1];

        let mut reader = system
            .mdcrd_iter("test_files/traj_box.mdcrd")
            .unwrap()
            .with_frames(order.clone())
            .unwrap();

        for &expected in order.iter() {
            let frame = reader.next().unwrap().unwrap();
            assert_atoms_frame(frame.get_atoms_as_ref(), expected);
            assert_eq!(frame.get_box_as_ref(), Some(&expected_box(expected)));
        }

        assert!(reader.next().is_none());
    }

    #[test]
    fn mdcrd_iter_frames_out_of_range() {
        let mut system = System::from_n_atoms("Test", 5);

        match system
            .mdcrd_iter("test_files/traj_box.mdcrd")
            .unwrap()
            .with_frames(vec![1, 6])
        {
            Err(ReadTrajError::FrameList(FrameListError::FrameOutOfRange(6, 6))) => (),
            Ok(_) => panic!("Function should have failed."),
            Err(e) => panic!("Unexpected error type `{}` returned.", e),
        }
    }

    #[test]
    fn mdcrd_iter_subset() {
        let atoms = vec![Atom::new(5, "C"), Atom::new(2, "N")];
        let mut system = System::new("Subset", atoms, None);

        let mut n_read = 0;
        for raw in system
            .mdcrd_iter_n_atoms("test_files/traj_nobox.mdcrd", 5)
            .unwrap()
        {
            let frame = raw.unwrap();
            assert_atoms_frame(frame.get_atoms_as_ref(), n_read);
            assert!(!frame.has_box());
            n_read += 1;
        }

        assert_eq!(n_read, 6);
    }

    #[test]
    fn mdcrd_iter_atom_out_of_range() {
        let atoms = vec![Atom::new(1, "C"), Atom::new(7, "N")];
        let mut system = System::new("Invalid", atoms, None);

        match system.mdcrd_iter_n_atoms("test_files/traj_nobox.mdcrd", 5) {
            Err(ReadTrajError::AtomOutOfRange(7, 5)) => (),
            Ok(_) => panic!("Function should have failed."),
            Err(e) => panic!("Unexpected error type `{}` returned.", e),
        }
    }

    #[test]
    fn mdcrd_iter_nonexistent() {
        let mut system = System::from_n_atoms("Test", 5);

        match system.mdcrd_iter("test_files/nonexistent.mdcrd") {
            Err(ReadTrajError::Probe(ParseMdcrdError::FileNotFound(x))) => {
                assert_eq!(x.to_str().unwrap(), "test_files/nonexistent.mdcrd")
            }
            Ok(_) => panic!("Function should have failed."),
            Err(e) => panic!("Unexpected error type `{}` returned.", e),
        }
    }

    #[test]
    fn mdcrd_iter_empty_system() {
        let mut system = System::from_n_atoms("Empty", 0);

        match system.mdcrd_iter("test_files/traj_box.mdcrd") {
            Err(ReadTrajError::Probe(ParseMdcrdError::NoAtoms)) => (),
            Ok(_) => panic!("Function should have failed."),
            Err(e) => panic!("Unexpected error type `{}` returned.", e),
        }
    }

    #[test]
    fn mdcrd_iter_corrupted() {
        let mut system = System::from_n_atoms("Test", 5);
        let mut reader = system.mdcrd_iter("test_files/traj_corrupted.mdcrd").unwrap();

        for _ in 0..3 {
            assert!(reader.next().unwrap().is_ok());
        }

        match reader.next() {
            Some(Err(ReadTrajError::FrameNotFound)) => (),
            Some(Ok(_)) => panic!("Reading should have failed."),
            Some(Err(e)) => panic!("Unexpected error type `{}` returned.", e),
            None => panic!("Iteration should not have ended."),
        }

        assert!(reader.next().is_none());
    }

    #[test]
    fn read_selected_sequential_and_random() {
        let data = std::fs::read("test_files/traj_box.mdcrd").unwrap();
        let mut mdcrd = MdcrdFile::new(Cursor::new(data), 5).unwrap();

        read_selected(&mut mdcrd, 0).unwrap();
        assert!(!mdcrd.is_primed());
        assert_eq!(mdcrd.get_current_frame(), Some(0));

        read_selected(&mut mdcrd, 1).unwrap();
        assert_eq!(mdcrd.get_current_frame(), Some(1));

        read_selected(&mut mdcrd, 4).unwrap();
        assert_eq!(mdcrd.get_current_frame(), Some(4));

        read_selected(&mut mdcrd, 5).unwrap();
        assert_eq!(mdcrd.get_current_frame(), Some(5));

        read_selected(&mut mdcrd, 2).unwrap();
        assert_eq!(mdcrd.get_current_frame(), Some(2));
    }

    #[test]
    fn mdcrd_iter_print_progress() {
        let (output, temp_path) = NamedTempFile::new().unwrap().into_parts();
        let path_to_output = temp_path.to_path_buf();

        let printer = ProgressPrinter::new()
            .with_output(Box::from(output))
            .with_colored(false)
            .with_print_freq(2)
            .with_terminating("\n");

        let mut system = System::from_n_atoms("Test", 5);
        for raw in system
            .mdcrd_iter("test_files/traj_box.mdcrd")
            .unwrap()
            .with_skip(1)
            .print_progress(printer)
        {
            raw.unwrap();
        }

        let expected = "[ RUNNING ]   Read            2 | Frame            2\n\
                        [ RUNNING ]   Read            4 | Frame            4\n\
                        [COMPLETED]   Read            5 | Frame            5\n\n";

        assert_eq!(std::fs::read_to_string(path_to_output).unwrap(), expected);
    }
}
