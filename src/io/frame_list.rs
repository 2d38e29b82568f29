// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of lists of trajectory frames selected for reading.

use crate::errors::FrameListError;

/// Ordered list of indices of trajectory frames.
///
/// ## Example
/// Select every other frame of a trajectory with 10 frames, skipping the first three frames.
/// ```
/// use mdcrd_rs::prelude::*;
///
/// let frames = FrameList::new(10).with_skip(3).with_stride(2).unwrap();
///
/// assert_eq!(frames.len(), 4);
/// assert_eq!(frames.frame_number(0), Some(3));
/// assert_eq!(frames.frame_number(-1), Some(9));
/// assert_eq!(frames.iter().collect::<Vec<usize>>(), vec![3, 5, 7, 9]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameList {
    /// Indices of the selected frames.
    frames: Vec<usize>,
    /// Number of frames in the trajectory.
    n_frames: usize,
}

impl FrameList {
    /// Select all frames of a trajectory containing `n_frames` frames.
    pub fn new(n_frames: usize) -> Self {
        FrameList {
            frames: (0..n_frames).collect(),
            n_frames,
        }
    }

    /// Select an explicit list of frames. The frames are read in the provided order
    /// and may repeat.
    ///
    /// ## Returns
    /// `FrameList` if all indices are valid.
    /// `FrameListError::FrameOutOfRange` if any index does not correspond to an existing frame.
    pub fn from_indices(indices: Vec<usize>, n_frames: usize) -> Result<Self, FrameListError> {
        if let Some(&index) = indices.iter().find(|&&index| index >= n_frames) {
            return Err(FrameListError::FrameOutOfRange(index, n_frames));
        }

        Ok(FrameList {
            frames: indices,
            n_frames,
        })
    }

    /// Remove the first `skip` selected frames.
    /// Skipping more frames than selected results in an empty list.
    pub fn with_skip(mut self, skip: usize) -> Self {
        let skip = skip.min(self.frames.len());
        self.frames.drain(..skip);
        self
    }

    /// Keep only every `stride`th selected frame, starting with the first one.
    ///
    /// ## Returns
    /// `FrameList` if successful. `FrameListError::InvalidStride` if `stride` is zero.
    pub fn with_stride(mut self, stride: usize) -> Result<Self, FrameListError> {
        if stride == 0 {
            return Err(FrameListError::InvalidStride(stride));
        }

        self.frames = self.frames.into_iter().step_by(stride).collect();
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

    /// Get the number of frames of the underlying trajectory.
    pub fn get_n_frames(&self) -> usize {
        self.n_frames
    }

    /// Get the index of the trajectory frame at position `index` in the list.
    /// Negative `index` counts from the end of the list.
    ///
    /// Returns `None` if the position is outside of the list.
    pub fn frame_number(&self, index: isize) -> Option<usize> {
        let position = if index < 0 {
            self.frames.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };

        self.frames.get(position).copied()
    }

    /// Iterate over the indices of the selected frames.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames.iter().copied()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_frames() {
        let frames = FrameList::new(5);

        assert_eq!(frames.len(), 5);
        assert!(!frames.is_empty());
        assert_eq!(frames.get_n_frames(), 5);
        assert_eq!(frames.iter().collect::<Vec<usize>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn skip() {
        let frames = FrameList::new(5).with_skip(2);
        assert_eq!(frames.iter().collect::<Vec<usize>>(), vec![2, 3, 4]);

        let frames = FrameList::new(5).with_skip(7);
        assert!(frames.is_empty());
        assert_eq!(frames.frame_number(0), None);
        assert_eq!(frames.frame_number(-1), None);
    }

    #[test]
    fn stride() {
        let frames = FrameList::new(10).with_stride(3).unwrap();
        assert_eq!(frames.iter().collect::<Vec<usize>>(), vec![0, 3, 6, 9]);

        let frames = FrameList::new(10).with_stride(1).unwrap();
        assert_eq!(frames.len(), 10);
    }

    #[test]
    fn stride_zero() {
        assert_eq!(
            FrameList::new(10).with_stride(0).unwrap_err(),
            FrameListError::InvalidStride(0)
        );
    }

    #[test]
    fn skip_then_stride() {
        let frames = FrameList::new(10).with_skip(1).with_stride(4).unwrap();
        assert_eq!(frames.iter().collect::<Vec<usize>>(), vec![1, 5, 9]);
    }

    #[test]
    fn stride_then_skip() {
        let frames = FrameList::new(10).with_stride(4).unwrap().with_skip(1);
        assert_eq!(frames.iter().collect::<Vec<usize>>(), vec![4, 8]);
    }

    #[test]
    fn from_indices() {
        let frames = FrameList::from_indices(vec![4, 0, 4, 2], 5).unwrap();

        assert_eq!(frames.len(), 4);
        assert_eq!(frames.frame_number(0), Some(4));
        assert_eq!(frames.frame_number(1), Some(0));
        assert_eq!(frames.frame_number(3), Some(2));
        assert_eq!(frames.frame_number(4), None);
    }

    #[test]
    fn from_indices_out_of_range() {
        assert_eq!(
            FrameList::from_indices(vec![1, 5, 2], 5).unwrap_err(),
            FrameListError::FrameOutOfRange(5, 5)
        );
    }

    #[test]
    fn negative_indices() {
        let frames = FrameList::new(6).with_stride(2).unwrap();

        assert_eq!(frames.frame_number(-1), Some(4));
        assert_eq!(frames.frame_number(-2), Some(2));
        assert_eq!(frames.frame_number(-3), Some(0));
        assert_eq!(frames.frame_number(-4), None);
        assert_eq!(frames.frame_number(isize::MIN), None);
    }
}
