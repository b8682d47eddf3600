use std::fmt;

/// Link value marking the absence of a neighbour.
const NIL: usize = usize::MAX;

/// An opaque position inside a [`RecencyList`].
///
/// Handles stay valid until the node they name is removed from the list. The
/// slot may then be reused by a later insertion, so a stale handle must never
/// be kept past removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle(usize);

/// A node in the arena.
///
/// `val` is `None` only while the slot sits on the free list.
struct Node<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
}

/// A doubly linked list stored in a `Vec` arena with index links.
///
/// The front holds the most recently used item, the back the least recently
/// used one. Removed slots are threaded onto a free list and reused, so a
/// steady-state cache does not allocate on insert.
///
/// This structure is internal infrastructure; the index stores its
/// [`Handle`]s so that moves and removals never scan.
pub(crate) struct RecencyList<T> {
    nodes: Vec<Node<T>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `cap` nodes before reallocating.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        RecencyList {
            nodes: Vec::with_capacity(cap),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    /// Returns the current number of items in the list.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Inserts `val` at the front and returns its handle.
    pub(crate) fn push_front(&mut self, val: T) -> Handle {
        let idx = self.alloc(val);
        self.attach_front(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Moves the node named by `handle` to the front.
    ///
    /// Returns `false` if the handle does not name a live node.
    pub(crate) fn move_to_front(&mut self, handle: Handle) -> bool {
        let idx = handle.0;
        if !self.is_live(idx) {
            return false;
        }
        if self.head != idx {
            self.detach(idx);
            self.attach_front(idx);
        }
        true
    }

    /// Unlinks the node named by `handle` and returns its value.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<T> {
        let idx = handle.0;
        if !self.is_live(idx) {
            return None;
        }
        self.detach(idx);
        self.len -= 1;
        self.release(idx)
    }

    /// Returns the handle of the back (least recently used) item.
    #[inline]
    pub(crate) fn back(&self) -> Option<Handle> {
        (self.tail != NIL).then_some(Handle(self.tail))
    }

    /// Returns the value stored at `handle`.
    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> Option<&T> {
        self.nodes.get(handle.0).and_then(|node| node.val.as_ref())
    }

    /// Returns the handle preceding `handle`, i.e. one step towards the front.
    #[inline]
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        let prev = self.nodes.get(handle.0)?.prev;
        (prev != NIL).then_some(Handle(prev))
    }

    /// Iterates from the front (MRU) to the back (LRU).
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            step: Step::Forward,
            remaining: self.len,
        }
    }

    /// Iterates from the back (LRU) to the front (MRU).
    pub(crate) fn iter_rev(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.tail,
            step: Step::Backward,
            remaining: self.len,
        }
    }

    /// Removes every item, keeping the arena allocation.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    #[inline]
    fn is_live(&self, idx: usize) -> bool {
        self.nodes.get(idx).is_some_and(|node| node.val.is_some())
    }

    fn alloc(&mut self, val: T) -> usize {
        if self.free != NIL {
            let idx = self.free;
            let node = &mut self.nodes[idx];
            self.free = node.next;
            node.val = Some(val);
            node.prev = NIL;
            node.next = NIL;
            idx
        } else {
            self.nodes.push(Node {
                val: Some(val),
                prev: NIL,
                next: NIL,
            });
            self.nodes.len() - 1
        }
    }

    fn release(&mut self, idx: usize) -> Option<T> {
        let node = &mut self.nodes[idx];
        let val = node.val.take();
        node.prev = NIL;
        node.next = self.free;
        self.free = idx;
        val
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[idx];
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head != NIL {
            self.nodes[old_head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };
        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }
        let node = &mut self.nodes[idx];
        node.prev = NIL;
        node.next = NIL;
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RecencyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(_, val)| val))
            .finish()
    }
}

#[derive(Clone, Copy)]
enum Step {
    Forward,
    Backward,
}

/// Iterator over `(Handle, &T)` pairs in one recency direction.
pub(crate) struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: usize,
    step: Step,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let idx = self.cursor;
        let node = &self.list.nodes[idx];
        self.cursor = match self.step {
            Step::Forward => node.next,
            Step::Backward => node.prev,
        };
        self.remaining = self.remaining.saturating_sub(1);
        node.val.as_ref().map(|val| (Handle(idx), val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
