// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Small functions for testing purposes.

#[cfg(test)]
pub(crate) mod utilities {
    use crate::structures::{atom::Atom, simbox::SimBox, vector3d::Vector3D};
    use float_cmp::assert_approx_eq;

    /// Position of an atom in the generated test trajectories (`test_files/traj_*.mdcrd`).
    /// Each coordinate is `1.5 * frame + 0.125 * (3 * atom + dim) - 2.0 + shift`.
    pub(crate) fn expected_position(frame: usize, atom: usize, shift: f32) -> Vector3D {
        let base = 1.5 * frame as f32 + 0.375 * atom as f32 - 2.0 + shift;
        Vector3D::new(base, base + 0.125, base + 0.25)
    }

    /// Box of a frame in the generated test trajectories.
    pub(crate) fn expected_box(frame: usize) -> SimBox {
        let half = 0.5 * frame as f32;
        SimBox::from([30.0 + half, 31.0 + half, 32.0 + half])
    }

    /// Check that the atoms of the target have the positions of the specified trajectory frame.
    pub(crate) fn assert_atoms_frame(atoms: &[Atom], frame: usize) {
        for atom in atoms {
            let position = atom
                .get_position()
                .expect("FATAL MDCRD ERROR | assert_atoms_frame | Atom has no position.");
            let expected = expected_position(frame, atom.get_atom_number() - 1, 0.0);

            assert_approx_eq!(f32, position.x, expected.x);
            assert_approx_eq!(f32, position.y, expected.y);
            assert_approx_eq!(f32, position.z, expected.z);
        }
    }
}
