// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of the Atom structure and its methods.

use crate::structures::vector3d::Vector3D;

/// Handle for a single atom receiving coordinates from trajectory frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Number of the atom as provided by the topology. Numbering starts at 1.
    atom_number: usize,
    /// Name of the atom.
    atom_name: String,
    /// Position of the atom. `None` until the atom is updated from a frame.
    position: Option<Vector3D>,
}

impl Atom {
    /// Create new Atom structure with the specified properties.
    ///
    /// ## Notes
    /// - By default, `Atom` structure is constructed without a position.
    /// You can provide the position using `Atom::with_position`.
    pub fn new(atom_number: usize, atom_name: &str) -> Self {
        Atom {
            atom_number,
            atom_name: atom_name.to_string(),
            position: None,
        }
    }

    /// Add position to the target atom.
    ///
    /// ## Example
    /// ```
    /// use mdcrd_rs::prelude::*;
    ///
    /// let atom = Atom::new(1, "CA").with_position([1.4, 1.5, 1.7].into());
    /// assert_eq!(atom.get_position().unwrap().x, 1.4);
    /// ```
    pub fn with_position(mut self, position: Vector3D) -> Self {
        self.set_position(position);
        self
    }

    /// Get the number of the atom as presented in the topology.
    pub fn get_atom_number(&self) -> usize {
        self.atom_number
    }

    /// Set the number of the atom.
    pub fn set_atom_number(&mut self, atomnum: usize) {
        self.atom_number = atomnum;
    }

    /// Get the name of the atom.
    pub fn get_atom_name(&self) -> &str {
        &self.atom_name
    }

    /// Set the name of the atom.
    pub fn set_atom_name(&mut self, atomname: &str) {
        self.atom_name = atomname.to_string();
    }

    /// Get the position of the atom. Returns `None` if the position is unknown.
    pub fn get_position(&self) -> Option<&Vector3D> {
        self.position.as_ref()
    }

    /// Set the position of the atom.
    pub fn set_position(&mut self, position: Vector3D) {
        self.position = Some(position);
    }

    /// Remove the position of the atom.
    pub fn reset_position(&mut self) {
        self.position = None;
    }

    /// Check whether the atom has a position.
    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let atom = Atom::new(17, "CB");

        assert_eq!(atom.get_atom_number(), 17);
        assert_eq!(atom.get_atom_name(), "CB");
        assert!(!atom.has_position());
    }

    #[test]
    fn set_reset_position() {
        let mut atom = Atom::new(1, "N");

        atom.set_position(Vector3D::new(1.0, 2.0, 3.0));
        assert_eq!(atom.get_position(), Some(&Vector3D::new(1.0, 2.0, 3.0)));

        atom.reset_position();
        assert!(atom.get_position().is_none());
    }

    #[test]
    fn setters() {
        let mut atom = Atom::new(1, "N");
        atom.set_atom_number(42);
        atom.set_atom_name("OW");

        assert_eq!(atom.get_atom_number(), 42);
        assert_eq!(atom.get_atom_name(), "OW");
    }
}
