// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of the SimBox structure and its methods.

/// Rectangular periodic simulation box.
///
/// Amber ASCII trajectories only store the three edge lengths of the box,
/// so the box is always orthogonal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct SimBox {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<[f32; 3]> for SimBox {
    /// Convert 3-member array of edge lengths to SimBox structure.
    fn from(arr: [f32; 3]) -> Self {
        SimBox {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/


#[cfg(test)]
#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;

    #[test]
    fn simbox_to_yaml() {
        let simbox = SimBox::from([10.0, 20.0, 30.5]);
        let string = serde_yaml::to_string(&simbox).unwrap();

        assert_eq!(string, "x: 10.0\ny: 20.0\nz: 30.5\n");
    }

    #[test]
    fn simbox_from_yaml_unknown_field() {
        let string = "x: 10.0\ny: 20.0\nz: 30.5\nw: 1.0\n";
        assert!(serde_yaml::from_str::<SimBox>(string).is_err());
    }
}
