//! Status-code interface over [`SinglyLinkedList`].
//!
//! Every function accepts optional handles so callers holding a possibly
//! absent list get `NodeStatus::NullPointer` instead of a panic, and every
//! outcome is folded into a [`NodeStatus`].

use tracing::warn;

use crate::{
    list::SinglyLinkedList,
    status::{ListError, NodeStatus},
};

fn require<T>(arg: Option<T>, name: &'static str) -> Result<T, ListError> {
    arg.ok_or_else(|| {
        warn!(argument = name, "required argument missing");
        ListError::NullArgument(name)
    })
}

fn settle<T>(outcome: Result<T, ListError>) -> NodeStatus {
    NodeStatus::from(&outcome)
}

fn with_value(
    list: Option<&mut SinglyLinkedList>,
    value: Option<u32>,
) -> Result<(&mut SinglyLinkedList, u32), ListError> {
    Ok((require(list, "list")?, require(value, "value")?))
}

/// Prepend `value` to `list`.
pub fn insert_at_head(list: Option<&mut SinglyLinkedList>, value: Option<u32>) -> NodeStatus {
    settle(with_value(list, value).and_then(|(list, value)| list.insert_at_head(value)))
}

/// Append `value` to `list`.
pub fn insert_at_tail(list: Option<&mut SinglyLinkedList>, value: Option<u32>) -> NodeStatus {
    settle(with_value(list, value).and_then(|(list, value)| list.insert_at_tail(value)))
}

/// Insert `value` after the node at `position`.
pub fn insert_after(
    list: Option<&mut SinglyLinkedList>,
    position: usize,
    value: Option<u32>,
) -> NodeStatus {
    settle(with_value(list, value).and_then(|(list, value)| list.insert_after(position, value)))
}

/// Remove the head of `list`. Reports `Empty` when there is nothing to remove.
pub fn delete_at_head(list: Option<&mut SinglyLinkedList>) -> NodeStatus {
    settle(require(list, "list").and_then(SinglyLinkedList::delete_at_head))
}

/// Remove the node at `position`.
pub fn delete_at_position(list: Option<&mut SinglyLinkedList>, position: usize) -> NodeStatus {
    settle(require(list, "list").and_then(|list| list.delete_at_position(position)))
}

/// Print `list` to standard output. An empty list is not an absent one.
pub fn display(list: Option<&SinglyLinkedList>) -> NodeStatus {
    match require(list, "list") {
        Ok(list) => match list.display() {
            Ok(()) => NodeStatus::Ok,
            Err(err) => {
                warn!(?err, "failed to write list to stdout");
                NodeStatus::Nok
            }
        },
        Err(err) => err.status(),
    }
}

/// Count the nodes of `list` into `out`.
pub fn length(list: Option<&SinglyLinkedList>, out: Option<&mut usize>) -> NodeStatus {
    settle(require(list, "list").and_then(|list| {
        let out = require(out, "length out-parameter")?;
        *out = list.length();
        Ok(())
    }))
}
