//! CPU-side storage of a single ribbon vertex attribute.

use bytemuck::Pod;

/// A named array of per-vertex (or per-triangle) data, ready to be uploaded by a renderer.
///
/// The attribute keeps track of whether it changed since the host last uploaded it, and of how
/// many times its storage had to be reallocated. Rebuilding a ribbon with the same vertex count
/// overwrites the existing storage instead of allocating a new one.
#[derive(Clone, Debug)]
pub struct Attribute<T: Pod> {
    name: &'static str,
    item_size: usize,
    data: Vec<T>,
    needs_update: bool,
    version: u64,
    allocations: u64,
}

impl<T: Pod> Attribute<T> {
    /// Creates a new empty attribute.
    ///
    /// `item_size` is the number of scalar components of each element, as seen by the shader.
    pub fn new(name: &'static str, item_size: usize) -> Attribute<T> {
        Attribute {
            name,
            item_size,
            data: Vec::new(),
            needs_update: false,
            version: 0,
            allocations: 0,
        }
    }

    /// The attribute name, as consumed by the ribbon shader.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The number of scalar components per element.
    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// The number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Is this attribute empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Immutably accesses the attribute data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data[..]
    }

    /// Mutably accesses the attribute data.
    ///
    /// This method will mark this attribute as needing an update.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.touch();
        &mut self.data[..]
    }

    /// The attribute data as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Returns `true` if the data changed since the last call to `mark_uploaded`.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Tells this attribute that the host renderer uploaded its current content.
    #[inline]
    pub fn mark_uploaded(&mut self) {
        self.needs_update = false;
    }

    /// A counter incremented each time the data is written.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The number of times the storage of this attribute was (re)allocated.
    #[inline]
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Replaces the content of this attribute.
    ///
    /// If `reuse` is set and the lengths match, `data` is copied into the existing storage.
    /// Otherwise the storage is replaced. Returns `true` if the storage was reallocated.
    pub fn overwrite(&mut self, data: Vec<T>, reuse: bool) -> bool {
        let reallocated = if reuse && self.data.len() == data.len() {
            self.data.copy_from_slice(&data);
            false
        } else {
            self.data = data;
            self.allocations += 1;
            true
        };

        self.touch();
        reallocated
    }

    fn touch(&mut self) {
        self.needs_update = true;
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_reuses_storage() {
        let mut attr = Attribute::<f32>::new("side", 1);
        assert!(attr.overwrite(vec![1.0, -1.0], true));
        assert_eq!(attr.allocations(), 1);

        let ptr = attr.data().as_ptr();
        assert!(!attr.overwrite(vec![2.0, -2.0], true));
        assert_eq!(attr.data().as_ptr(), ptr);
        assert_eq!(attr.data(), &[2.0, -2.0]);
        assert_eq!(attr.allocations(), 1);

        assert!(attr.overwrite(vec![0.0; 4], true));
        assert_eq!(attr.allocations(), 2);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut attr = Attribute::<[f32; 3]>::new("position", 3);
        assert!(!attr.needs_update());

        let _ = attr.overwrite(vec![[1.0, 2.0, 3.0]], false);
        assert!(attr.needs_update());
        assert_eq!(attr.as_bytes().len(), 12);

        attr.mark_uploaded();
        assert!(!attr.needs_update());

        attr.data_mut()[0][1] = 5.0;
        assert!(attr.needs_update());
        assert_eq!(attr.version(), 2);
    }
}
