//! An in-process [`Scene`] that keeps bookkeeping instead of GPU state.

use std::collections::HashMap;

use log::{debug, warn};

use super::{Renderable, RenderableId, Scene};

/// Scene implementation without a GPU behind it.
///
/// Tracks which renderables are attached and how much geometry they carry, and
/// counts anomalies such as a renderable attached twice or released while still
/// attached. The demo binary renders into it and the tests inspect it.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    /// Attached renderables and their triangle counts
    attached: HashMap<RenderableId, usize>,
    adds: usize,
    removes: usize,
    releases: usize,
    double_registrations: usize,
    released_while_attached: usize,
}

impl HeadlessScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the renderable with `id` is currently attached.
    pub fn is_attached(&self, id: RenderableId) -> bool {
        self.attached.contains_key(&id)
    }

    /// Number of renderables currently attached.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Total triangles across all attached renderables.
    pub fn attached_triangles(&self) -> usize {
        self.attached.values().sum()
    }

    /// Number of `add` calls so far.
    pub fn add_count(&self) -> usize {
        self.adds
    }

    /// Number of `remove` calls so far.
    pub fn remove_count(&self) -> usize {
        self.removes
    }

    /// Number of renderables released so far.
    pub fn release_count(&self) -> usize {
        self.releases
    }

    /// Number of times an already attached renderable was attached again.
    pub fn double_registrations(&self) -> usize {
        self.double_registrations
    }

    /// Number of renderables released without being detached first.
    pub fn released_while_attached(&self) -> usize {
        self.released_while_attached
    }
}

impl Scene for HeadlessScene {
    fn add(&mut self, renderable: &Renderable) {
        self.adds += 1;
        let triangles = renderable.geometry.triangle_count();
        if self.attached.insert(renderable.id(), triangles).is_some() {
            self.double_registrations += 1;
            warn!("Renderable {:?} attached twice", renderable.id());
        }
        debug!(
            "Attached renderable {:?} ({} triangles)",
            renderable.id(),
            triangles
        );
    }

    fn remove(&mut self, renderable: &Renderable) {
        self.removes += 1;
        if self.attached.remove(&renderable.id()).is_none() {
            debug!("Renderable {:?} was not attached", renderable.id());
        }
    }

    fn release(&mut self, renderable: Renderable) {
        self.releases += 1;
        if self.attached.remove(&renderable.id()).is_some() {
            self.released_while_attached += 1;
            warn!("Renderable {:?} released while attached", renderable.id());
        }
        debug!("Released renderable {:?}", renderable.id());
    }
}
