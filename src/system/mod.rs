// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of the System structure and its methods.

use crate::io::traj_io::CoordinateTarget;
use crate::structures::{atom::Atom, simbox::SimBox};

/// Collection of atoms receiving coordinates from trajectory frames.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    /// Name of the molecular system.
    name: String,
    /// Vector of atoms in the system.
    atoms: Vec<Atom>,
    /// Size of the simulation box. (Optional.)
    simulation_box: Option<SimBox>,
}

impl System {
    /// Create new System from the provided atoms.
    ///
    /// ## Example
    /// ```
    /// use mdcrd_rs::prelude::*;
    ///
    /// let atoms = vec![Atom::new(1, "N"), Atom::new(2, "CA"), Atom::new(3, "C")];
    /// let system = System::new("Backbone", atoms, None);
    ///
    /// assert_eq!(system.get_n_atoms(), 3);
    /// ```
    pub fn new(name: &str, atoms: Vec<Atom>, simulation_box: Option<SimBox>) -> Self {
        System {
            name: name.to_string(),
            atoms,
            simulation_box,
        }
    }

    /// Create new System containing `n_atoms` atoms numbered from 1 to `n_atoms`.
    /// The atoms have no names and no positions.
    pub fn from_n_atoms(name: &str, n_atoms: usize) -> Self {
        let atoms = (1..=n_atoms).map(|number| Atom::new(number, "")).collect();
        System::new(name, atoms, None)
    }

    /// Get the name of the molecular system.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Get immutable reference to the atoms in the system.
    pub fn get_atoms_as_ref(&self) -> &Vec<Atom> {
        &self.atoms
    }

    /// Get mutable reference to the atoms in the system.
    pub fn get_atoms_as_ref_mut(&mut self) -> &mut Vec<Atom> {
        &mut self.atoms
    }

    /// Get the number of atoms in the system.
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Get the highest atom number of the system.
    /// Returns `None` if the system contains no atoms.
    pub fn get_max_atom_number(&self) -> Option<usize> {
        self.atoms.iter().map(|atom| atom.get_atom_number()).max()
    }

    /// Get immutable reference to the simulation box.
    pub fn get_box_as_ref(&self) -> Option<&SimBox> {
        self.simulation_box.as_ref()
    }

    /// Check whether the system has a simulation box.
    pub fn has_box(&self) -> bool {
        self.simulation_box.is_some()
    }

    /// Set simulation box.
    pub fn set_box(&mut self, sim_box: SimBox) {
        self.simulation_box = Some(sim_box);
    }

    /// Remove simulation box.
    pub fn reset_box(&mut self) {
        self.simulation_box = None;
    }
}

impl CoordinateTarget for System {
    fn target_atoms_mut(&mut self) -> std::slice::IterMut<'_, Atom> {
        self.atoms.iter_mut()
    }

    fn set_target_box(&mut self, simbox: SimBox) {
        self.set_box(simbox);
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_n_atoms() {
        let system = System::from_n_atoms("Test", 4);

        assert_eq!(system.get_name(), "Test");
        assert_eq!(system.get_n_atoms(), 4);
        assert_eq!(system.get_max_atom_number(), Some(4));

        for (i, atom) in system.get_atoms_as_ref().iter().enumerate() {
            assert_eq!(atom.get_atom_number(), i + 1);
            assert!(!atom.has_position());
        }

        assert!(!system.has_box());
    }

    #[test]
    fn empty() {
        let system = System::from_n_atoms("Empty", 0);
        assert_eq!(system.get_n_atoms(), 0);
        assert_eq!(system.get_max_atom_number(), None);
    }

    #[test]
    fn set_reset_box() {
        let mut system = System::new("Test", vec![Atom::new(3, "P")], None);

        system.set_box(SimBox::from([5.0, 6.0, 7.0]));
        assert_eq!(system.get_box_as_ref(), Some(&SimBox::from([5.0, 6.0, 7.0])));

        system.reset_box();
        assert!(system.get_box_as_ref().is_none());
    }

    #[test]
    fn coordinate_target() {
        let mut system = System::from_n_atoms("Test", 2);

        for atom in system.target_atoms_mut() {
            atom.set_position([1.0, 2.0, 3.0].into());
        }
        system.set_target_box(SimBox::from([4.0, 4.0, 4.0]));

        assert!(system.get_atoms_as_ref().iter().all(|atom| atom.has_position()));
        assert!(system.has_box());
    }
}
