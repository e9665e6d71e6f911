/// A value paired with a "changed since last consumed" flag.
///
/// Checking the flag never clears it. Only the consumer that actually acts on
/// the change calls [`DirtyFlag::clean_flag`], so several sites may peek first.
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag<T> {
    is_dirty: bool,
    data: T,
}

impl<T> DirtyFlag<T> {
    pub fn new(data: T) -> Self {
        Self { is_dirty: false, data }
    }

    pub fn new_dirty(data: T) -> Self {
        Self { is_dirty: true, data }
    }

    pub fn read(&self) -> &T {
        &self.data
    }

    pub fn write(&mut self) -> &mut T {
        self.is_dirty = true;
        &mut self.data
    }

    /// Replaces the value and reports whether it differs from the old one.
    /// The flag is raised either way.
    pub fn replace(&mut self, data: T) -> bool
    where
        T: PartialEq,
    {
        let changed = self.data != data;
        self.data = data;
        self.is_dirty = true;
        changed
    }

    pub fn get_all(&mut self) -> (&mut T, &mut bool) {
        (&mut self.data, &mut self.is_dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn clean_flag(&mut self) {
        self.is_dirty = false;
    }

    pub fn set_dirty(&mut self) {
        self.is_dirty = true;
    }
}
