use std::{
    fmt,
    io::{self, Write},
};

use tracing::{debug, trace};

use super::node::{Link, Node};
use crate::status::ListError;

/// Handle owning the head of a singly linked list.
///
/// The head transitively owns the whole chain, so dropping the list releases
/// every node. Positions are 1-based: the head is position 1.
#[derive(Debug, Default)]
pub struct SinglyLinkedList {
    head: Link,
    node_limit: Option<usize>,
    // Live nodes, kept so the budget check stays O(1).
    live: usize,
}

impl SinglyLinkedList {
    /// Create an empty list with no node budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list that refuses to hold more than `limit` nodes.
    pub fn with_node_limit(limit: usize) -> Self {
        let mut list = Self::default();
        list.node_limit = Some(limit);
        list
    }

    /// Node budget configured for this list, if any.
    pub fn node_limit(&self) -> Option<usize> {
        self.node_limit
    }

    /// Returns `true` when the list has no head.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Count the nodes by walking from the head to the end marker.
    pub fn length(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            count += 1;
            cursor = node.next.as_deref();
        }
        count
    }

    /// Prepend `value`; the previous head moves to position 2.
    pub fn insert_at_head(&mut self, value: u32) -> Result<(), ListError> {
        let mut node = self.allocate(value)?;
        node.next = self.head.take();
        self.head = Some(node);
        self.live += 1;
        trace!(value, "inserted at head");
        Ok(())
    }

    /// Append `value` after the last node.
    pub fn insert_at_tail(&mut self, value: u32) -> Result<(), ListError> {
        let node = self.allocate(value)?;
        let mut slot = &mut self.head;
        while let Some(current) = slot {
            slot = &mut current.next;
        }
        *slot = Some(node);
        self.live += 1;
        trace!(value, "inserted at tail");
        Ok(())
    }

    /// Splice `value` in directly after the node at `position`.
    ///
    /// An empty list takes the value as its sole head whatever the position.
    /// On a non-empty list, position `0` or a position past the last node is
    /// refused and the list is left unchanged.
    pub fn insert_after(&mut self, position: usize, value: u32) -> Result<(), ListError> {
        let mut node = self.allocate(value)?;
        if self.head.is_none() {
            self.head = Some(node);
            self.live += 1;
            trace!(value, position, "inserted into empty list");
            return Ok(());
        }

        let length = self.length();
        match self.node_at_mut(position) {
            Some(anchor) => {
                node.next = anchor.next.take();
                anchor.next = Some(node);
                self.live += 1;
                trace!(value, position, "inserted after position");
                Ok(())
            }
            None => {
                debug!(position, length, "insert_after rejected");
                Err(ListError::PositionOutOfRange { position, length })
            }
        }
    }

    /// Unlink and release the head, returning its value.
    pub fn delete_at_head(&mut self) -> Result<u32, ListError> {
        let mut removed = self.head.take().ok_or(ListError::Empty)?;
        self.head = removed.next.take();
        self.live -= 1;
        trace!(value = removed.value, "deleted head");
        Ok(removed.value)
    }

    /// Unlink and release the node at `position`, returning its value.
    pub fn delete_at_position(&mut self, position: usize) -> Result<u32, ListError> {
        if position == 1 {
            return self.delete_at_head();
        }

        let length = self.length();
        let out_of_range = ListError::PositionOutOfRange { position, length };
        if position == 0 || position > length {
            debug!(position, length, "delete_at_position rejected");
            return Err(out_of_range);
        }

        let predecessor = self
            .node_at_mut(position - 1)
            .ok_or_else(|| out_of_range.clone())?;
        let mut victim = predecessor.next.take().ok_or(out_of_range)?;
        predecessor.next = victim.next.take();
        self.live -= 1;
        trace!(value = victim.value, position, "deleted node");
        Ok(victim.value)
    }

    /// Print the list to standard output as `v1 -> v2 -> NULL `.
    pub fn display(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)?;
        handle.flush()
    }

    /// Write the display line, newline included, to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{self}")
    }

    /// Release every node, leaving the list empty.
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.live = 0;
    }

    fn allocate(&self, value: u32) -> Result<Box<Node>, ListError> {
        if let Some(limit) = self.node_limit {
            if self.live >= limit {
                debug!(limit, "node budget exhausted");
                return Err(ListError::AllocationFailed { limit });
            }
        }
        Ok(Node::boxed(value))
    }

    fn node_at_mut(&mut self, position: usize) -> Option<&mut Node> {
        if position == 0 {
            return None;
        }
        let mut cursor = self.head.as_deref_mut();
        for _ in 1..position {
            cursor = cursor?.next.as_deref_mut();
        }
        cursor
    }
}

impl fmt::Display for SinglyLinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            write!(f, "{} -> ", node.value)?;
            cursor = node.next.as_deref();
        }
        // Trailing space kept for byte-exact output.
        f.write_str("NULL ")
    }
}

impl Drop for SinglyLinkedList {
    fn drop(&mut self) {
        self.clear();
    }
}
