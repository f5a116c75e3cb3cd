//! Singly linked list of `u32` payloads.

/// Owned node chain and the list operations.
pub mod linked_list;
mod node;

pub use linked_list::SinglyLinkedList;
