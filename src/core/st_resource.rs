use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// A single-threaded, reference-counted handle with interior mutability.
///
/// `StResource` is how the world hands out chunks: the world keeps one handle
/// in its chunk map and callers receive clones of it. Every clone points at the
/// same value, so a handle returned twice for the same chunk coordinate is the
/// same chunk, which [`StResource::ptr_eq`] can confirm.
///
/// # Type Parameters
/// - `T`: The type of the contained resource
///
/// # Examples
///
/// ```
/// use voxel_terrain::core::StResource;
///
/// let resource = StResource::new(vec![1, 2, 3]);
/// let clone = resource.clone();
///
/// clone.get_mut().push(4);
/// assert_eq!(resource.get().len(), 4);
/// assert!(StResource::ptr_eq(&resource, &clone));
/// ```
///
/// # Panics
/// - Panics if `get_mut` is called while any other borrow of the same value is alive
/// - Panics if `get` is called while a mutable borrow is alive
pub struct StResource<T> {
    resource: Rc<RefCell<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    ///
    /// # Arguments
    /// * `resource` - The value to be stored in the resource
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RefCell::new(resource)),
        }
    }

    /// Returns a guard that allows reading the contained value.
    pub fn get(&self) -> Ref<'_, T> {
        self.resource.borrow()
    }

    /// Returns a guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.resource.borrow_mut()
    }

    /// Returns `true` when both handles refer to the same underlying value.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.resource, &other.resource)
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
