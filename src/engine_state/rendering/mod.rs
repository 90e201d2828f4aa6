//! # Rendering Module
//!
//! The voxel core does not draw anything itself. It hands finished chunk meshes
//! to a [`Scene`], the narrow interface through which an external rendering
//! engine receives renderables, and asks the scene to release them again.
//!
//! ## Key Components
//! - [`Scene`]: attach, detach and release renderables
//! - [`Renderable`]: one chunk mesh with its geometry and material settings
//! - [`MeshGeometry`]: position / normal / colour buffers plus quad indices
//! - [`HeadlessScene`]: an in-process scene that only keeps bookkeeping, used by
//!   the demo binary and the tests
//! - `meshing`: turns chunk block data into `MeshGeometry`

use std::sync::atomic::{AtomicU64, Ordering};

mod headless;
pub mod meshing;

pub use headless::HeadlessScene;

/// The interface an external rendering engine exposes to the voxel core.
///
/// Detaching (`remove`) and freeing GPU resources (`release`) are separate
/// steps. A chunk always performs both when it replaces or drops its mesh.
pub trait Scene {
    /// Attaches a renderable to the scene graph.
    fn add(&mut self, renderable: &Renderable);

    /// Detaches a renderable from the scene graph.
    fn remove(&mut self, renderable: &Renderable);

    /// Frees the geometry buffers and material state behind a renderable.
    fn release(&mut self, renderable: Renderable);
}

/// Identifies a renderable across `add` / `remove` / `release` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableId(u64);

static NEXT_RENDERABLE_ID: AtomicU64 = AtomicU64::new(1);

impl RenderableId {
    fn next() -> Self {
        RenderableId(NEXT_RENDERABLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Which faces of a triangle the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSide {
    /// Counter-clockwise (front) faces only
    Front,
    /// Both faces
    Double,
}

/// Material state that accompanies a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialSettings {
    /// Which triangle faces to draw
    pub side: RenderSide,
    /// Whether the colour buffer should be used as vertex colours
    pub vertex_colors: bool,
    /// Whether the mesh casts shadows
    pub cast_shadow: bool,
    /// Whether the mesh receives shadows
    pub receive_shadow: bool,
}

impl MaterialSettings {
    /// Settings used for terrain chunks: front faces only, vertex coloured,
    /// casting and receiving shadows.
    pub const TERRAIN: MaterialSettings = MaterialSettings {
        side: RenderSide::Front,
        vertex_colors: true,
        cast_shadow: true,
        receive_shadow: true,
    };
}

/// Vertex buffers of a chunk mesh.
///
/// Every vertex has three floats in each of `positions`, `normals` and `colors`.
/// Every quad owns four consecutive vertices and six indices; no vertex is
/// shared between quads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    /// World-space vertex positions, `[x, y, z]` per vertex
    pub positions: Vec<f32>,
    /// Flat face normals, `[x, y, z]` per vertex
    pub normals: Vec<f32>,
    /// Linear vertex colours in `0.0..=1.0`, `[r, g, b]` per vertex
    pub colors: Vec<f32>,
    /// Triangle indices, six per quad
    pub indices: Vec<u32>,
}

impl MeshGeometry {
    /// Number of vertices in the geometry.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of quads (block faces) in the geometry.
    pub fn quad_count(&self) -> usize {
        self.vertex_count() / 4
    }

    /// Number of triangles in the geometry.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` when no face was emitted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position buffer as raw bytes, ready for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal buffer as raw bytes, ready for upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Colour buffer as raw bytes, ready for upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// A mesh handed to the scene: geometry, material and a unique id.
#[derive(Debug)]
pub struct Renderable {
    id: RenderableId,
    /// The vertex and index buffers
    pub geometry: MeshGeometry,
    /// The material settings
    pub material: MaterialSettings,
}

impl Renderable {
    /// Wraps geometry into a renderable with a fresh id.
    pub fn new(geometry: MeshGeometry, material: MaterialSettings) -> Self {
        Renderable {
            id: RenderableId::next(),
            geometry,
            material,
        }
    }

    /// This renderable's id.
    pub fn id(&self) -> RenderableId {
        self.id
    }
}
