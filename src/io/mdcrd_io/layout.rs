// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Detection of the frame layout of an mdcrd file.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use getset::CopyGetters;
use serde::{Deserialize, Serialize};

use super::stream::{parse_box_line, Field, FrameRead, MdcrdStream};
use crate::errors::{LayoutCacheError, ParseMdcrdError};
use crate::structures::{simbox::SimBox, vector3d::Vector3D};

/// Byte layout of the frames of an mdcrd file.
///
/// The layout is determined once, when the trajectory is opened, and never changes afterwards.
/// All frames of the trajectory are expected to occupy the same number of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, CopyGetters)]
#[serde(deny_unknown_fields)]
pub struct MdcrdLayout {
    /// Number of atoms in each frame.
    #[getset(get_copy = "pub")]
    n_atoms: usize,
    /// Position of the first frame in the file (in bytes).
    #[getset(get_copy = "pub")]
    frame_offset: u64,
    /// Number of bytes occupied by one frame including the box line.
    #[getset(get_copy = "pub")]
    frame_stride: u64,
    /// Number of bytes from the start of a frame to the end of its last number.
    #[getset(get_copy = "pub")]
    frame_span: u64,
    /// Does each frame contain a periodic box?
    #[getset(get_copy = "pub")]
    has_box: bool,
    /// Number of complete frames in the file.
    #[getset(get_copy = "pub")]
    n_frames: usize,
}

impl MdcrdLayout {
    /// Get the position of the frame with the given index (in bytes).
    #[inline(always)]
    pub fn frame_position(&self, index: usize) -> u64 {
        self.frame_offset + index as u64 * self.frame_stride
    }

    /// Check whether a file of length `len` contains the complete frame with the given index.
    #[inline(always)]
    fn contains_frame(&self, index: usize, len: u64) -> bool {
        self.frame_position(index) + self.frame_span <= len
    }

    /// Read a layout from a yaml file.
    ///
    /// ## Example
    /// Reuse a layout determined in a previous run.
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    ///
    /// let layout = MdcrdLayout::read_yaml("trajectory.layout.yaml").unwrap();
    /// let mut mdcrd = MdcrdFile::open_with_layout("trajectory.mdcrd", 2048, layout).unwrap();
    /// ```
    pub fn read_yaml(filename: impl AsRef<Path>) -> Result<Self, LayoutCacheError> {
        let file = File::open(&filename)
            .map_err(|_| LayoutCacheError::FileNotFound(Box::from(filename.as_ref())))?;

        serde_yaml::from_reader(BufReader::new(file)).map_err(LayoutCacheError::CouldNotParseYaml)
    }

    /// Write the layout into a yaml file.
    ///
    /// ## Example
    /// ```no_run
    /// use mdcrd_rs::prelude::*;
    ///
    /// let mdcrd = MdcrdFile::open("trajectory.mdcrd", 2048).unwrap();
    /// mdcrd.get_layout().write_yaml("trajectory.layout.yaml").unwrap();
    /// ```
    pub fn write_yaml(&self, filename: impl AsRef<Path>) -> Result<(), LayoutCacheError> {
        let string = serde_yaml::to_string(self).map_err(LayoutCacheError::CouldNotSerialize)?;

        let file = File::create(&filename)
            .map_err(|_| LayoutCacheError::CouldNotWrite(Box::from(filename.as_ref())))?;
        let mut writer = BufWriter::new(file);

        writer
            .write_all(string.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|_| LayoutCacheError::CouldNotWrite(Box::from(filename.as_ref())))
    }

    /// Check that the layout can describe the provided stream.
    pub(super) fn validate<R: Read + Seek>(
        &self,
        stream: &mut MdcrdStream<R>,
        n_atoms: usize,
    ) -> Result<(), ParseMdcrdError> {
        if self.n_atoms != n_atoms {
            return Err(ParseMdcrdError::LayoutAtomsMismatch(self.n_atoms, n_atoms));
        }

        if self.n_atoms == 0 {
            return Err(ParseMdcrdError::NoAtoms);
        }

        if self.n_frames == 0 || self.frame_stride == 0 || self.frame_span > self.frame_stride {
            return Err(ParseMdcrdError::LayoutNotDetermined);
        }

        let len = stream
            .stream_len()
            .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?;

        if !self.contains_frame(self.n_frames - 1, len) {
            return Err(ParseMdcrdError::LayoutNotDetermined);
        }

        Ok(())
    }
}

/// Data of the first frame obtained while probing.
#[derive(Debug)]
pub(super) struct ProbeResult {
    pub(super) layout: MdcrdLayout,
    pub(super) simbox: Option<SimBox>,
}

/// Convert the outcome of reading the first frame into an error, if needed.
pub(super) fn first_frame_check(result: FrameRead) -> Result<(), ParseMdcrdError> {
    match result {
        FrameRead::Complete => Ok(()),
        FrameRead::Exhausted(n) => Err(ParseMdcrdError::IncompleteFrame(n)),
        FrameRead::Invalid(string) => Err(ParseMdcrdError::InvalidNumber(string)),
    }
}

/// Determine the frame layout of an mdcrd trajectory.
///
/// The first frame is read into `positions` which must contain exactly `n_atoms` items.
/// On success, the stream is positioned at the start of the second frame.
pub(super) fn probe<R: Read + Seek>(
    stream: &mut MdcrdStream<R>,
    positions: &mut [Vector3D],
) -> Result<ProbeResult, ParseMdcrdError> {
    let n_atoms = positions.len();
    if n_atoms == 0 {
        return Err(ParseMdcrdError::NoAtoms);
    }

    // title
    match stream.skip_line() {
        Ok(0) | Err(_) => return Err(ParseMdcrdError::TitleNotFound),
        Ok(_) => (),
    }

    let frame_offset = stream.position();

    first_frame_check(
        stream
            .read_coordinates(positions)
            .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?,
    )?;

    let mut data_end = stream.position();

    stream
        .skip_line()
        .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?;
    let mut frame_end = stream.position();

    // the line following the coordinates is either a box or the start of the next frame
    let mut line = Vec::new();
    stream
        .read_line(&mut line)
        .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?;

    let simbox = parse_box_line(&line).map(|(dimensions, end)| {
        data_end = frame_end + end as u64;
        frame_end = stream.position();
        SimBox::from(dimensions)
    });

    let mut layout = MdcrdLayout {
        n_atoms,
        frame_offset,
        frame_stride: frame_end - frame_offset,
        frame_span: data_end - frame_offset,
        has_box: simbox.is_some(),
        n_frames: 0,
    };

    layout.n_frames = count_frames(stream, &layout)?;

    // position the stream at the start of the second frame
    stream
        .seek(layout.frame_position(1))
        .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?;

    Ok(ProbeResult { layout, simbox })
}

/// Count the complete frames of the trajectory.
fn count_frames<R: Read + Seek>(
    stream: &mut MdcrdStream<R>,
    layout: &MdcrdLayout,
) -> Result<usize, ParseMdcrdError> {
    let len = stream
        .stream_len()
        .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?;

    let mut n_frames = 0;
    while layout.contains_frame(n_frames, len) {
        stream
            .seek(layout.frame_position(n_frames))
            .map_err(|_| ParseMdcrdError::LayoutNotDetermined)?;

        match stream.read_number() {
            Ok(Field::Number(_)) => n_frames += 1,
            Ok(Field::End) | Ok(Field::Invalid(_)) => break,
            Err(_) => return Err(ParseMdcrdError::LayoutNotDetermined),
        }
    }

    Ok(n_frames)
}

/******************************/
/*         UNIT TESTS         */
/******************************/
