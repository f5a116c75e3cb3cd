#![warn(clippy::all, missing_docs)]

//! Core of the singly linked list manager.
//!
//! This crate hosts the owned node chain and its seven operations, the
//! status contract shared with frontends, and configuration handling
//! used by the interactive shell.

pub mod config;
pub mod handle;
pub mod list;
pub mod status;

pub use config::AppConfig;
pub use list::SinglyLinkedList;
pub use status::{ListError, NodeStatus};
