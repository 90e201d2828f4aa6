//! # Block Side Module
//!
//! This module defines the six faces of a voxel block together with the
//! geometry each face contributes to a mesh: its outward normal, the offset of
//! the neighbouring cell that can hide it and the unit-cube corners of the quad.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK], i.e. ±X, ±Y, ±Z.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face pointing towards positive X
    Right = 0,

    /// The face pointing towards negative X
    Left = 1,

    /// The face pointing towards positive Y
    Top = 2,

    /// The face pointing towards negative Y
    Bottom = 3,

    /// The face pointing towards positive Z
    Front = 4,

    /// The face pointing towards negative Z
    Back = 5,
}

/// Corners of each face on the unit cube, counter-clockwise when seen from
/// outside the block. Indexed by `BlockSide as usize`.
#[rustfmt::skip]
const FACE_CORNERS: [[[i32; 3]; 4]; 6] = [
    [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]], // RIGHT
    [[0, 0, 1], [0, 1, 1], [0, 1, 0], [0, 0, 0]], // LEFT
    [[0, 1, 1], [1, 1, 1], [1, 1, 0], [0, 1, 0]], // TOP
    [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]], // BOTTOM
    [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]], // FRONT
    [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]], // BACK
];

impl BlockSide {
    /// Returns all six block faces in a consistent order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::Right,
            BlockSide::Left,
            BlockSide::Top,
            BlockSide::Bottom,
            BlockSide::Front,
            BlockSide::Back,
        ]
    }

    /// Offset from a block to the neighbour that shares this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::Right => Vector3::new(1, 0, 0),
            BlockSide::Left => Vector3::new(-1, 0, 0),
            BlockSide::Top => Vector3::new(0, 1, 0),
            BlockSide::Bottom => Vector3::new(0, -1, 0),
            BlockSide::Front => Vector3::new(0, 0, 1),
            BlockSide::Back => Vector3::new(0, 0, -1),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or(Vector3::new(0.0, 0.0, 0.0))
    }

    /// The two axes spanning the plane of this face, as unit offsets.
    ///
    /// These are the directions in which ambient occlusion looks for occluders.
    pub fn tangents(self) -> [Vector3<i32>; 2] {
        match self {
            BlockSide::Right | BlockSide::Left => [Vector3::new(0, 1, 0), Vector3::new(0, 0, 1)],
            BlockSide::Top | BlockSide::Bottom => [Vector3::new(1, 0, 0), Vector3::new(0, 0, 1)],
            BlockSide::Front | BlockSide::Back => [Vector3::new(1, 0, 0), Vector3::new(0, 1, 0)],
        }
    }

    /// Unit-cube corners of the quad for this face, counter-clockwise from outside.
    pub fn corners(self) -> &'static [[i32; 3]; 4] {
        &FACE_CORNERS[self as usize]
    }
}
