use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use super::handle::Handle;

#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    // Vacant slots form a singly-linked free list threaded through the slot vector.
    Vacant(Option<Handle>),
}

/// Slot storage for tree nodes.
///
/// Released slots are recycled most-recently-freed first, so handles stay dense and a
/// tree that shrinks and regrows does not reallocate.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    next_free: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_free: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            next_free: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, element: T) -> Handle {
        let handle = if let Some(handle) = self.next_free {
            let slot = &mut self.slots[handle.slot()];
            let Slot::Vacant(next) = *slot else {
                panic!("`Arena::insert()` - free list points at an occupied slot!");
            };
            self.next_free = next;
            *slot = Slot::Occupied(element);
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::insert()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot::Occupied(element));
            Handle::from_slot(self.slots.len() - 1)
        };
        self.len += 1;
        handle
    }

    /// Vacates the slot and hands back its element.
    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let slot = core::mem::replace(&mut self.slots[handle.slot()], Slot::Vacant(self.next_free));
        let Slot::Occupied(element) = slot else {
            panic!("`Arena::remove()` - `handle` is vacant!");
        };
        self.next_free = Some(handle);
        self.len -= 1;
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.next_free = None;
        self.len = 0;
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, handle: Handle) -> &T {
        match &self.slots[handle.slot()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::index()` - `handle` is vacant!"),
        }
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.slot()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::index_mut()` - `handle` is vacant!"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn capacity_is_preallocated() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn freed_slots_are_reused_last_in_first_out() {
        let mut arena = Arena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let _c = arena.insert('c');

        assert_eq!(arena.remove(a), 'a');
        assert_eq!(arena.remove(b), 'b');
        assert_eq!(arena.insert('d'), b);
        assert_eq!(arena.insert('e'), a);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[a], 'e');
    }

    #[test]
    #[should_panic(expected = "`Arena::index()` - `handle` is vacant!")]
    fn vacant_handle_panics() {
        let mut arena = Arena::new();
        let a = arena.insert(1u8);
        arena.remove(a);
        let _ = arena[a];
    }

    #[test]
    #[should_panic(expected = "`Arena::insert()` - arena is at maximum capacity")]
    fn full_arena_panics() {
        let mut arena = Arena::new();
        for _ in 0..=Handle::MAX + 1 {
            arena.insert(());
        }
    }

    proptest! {
        #[test]
        fn arena_tracks_a_model(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Insert(value) => {
                        let handle = arena.insert(value);
                        prop_assert!(model.iter().all(|&(live, _)| live != handle));
                        model.push((handle, value));
                    }
                    Operation::Overwrite(which, value) if !model.is_empty() => {
                        let index = which % model.len();
                        arena[model[index].0] = value;
                        model[index].1 = value;
                    }
                    Operation::Remove(which) if !model.is_empty() => {
                        let index = which % model.len();
                        let (handle, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.remove(handle), expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                    _ => {}
                }

                prop_assert_eq!(arena.len(), model.len());
                for &(handle, value) in &model {
                    prop_assert_eq!(arena[handle], value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Insert(u32),
        Overwrite(usize, u32),
        Remove(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Insert),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Overwrite(which, value)),
            8 => any::<usize>().prop_map(Operation::Remove),
            1 => Just(Operation::Clear),
        ]
    }
}
