//! Operation outcomes for the list core.

use std::fmt;

use thiserror::Error;

/// Closed set of outcomes reported by every list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    /// Operation completed and the list invariants hold.
    Ok,
    /// Operation refused: allocation failure or an out-of-range position.
    Nok,
    /// Operation needs at least one node and found none.
    Empty,
    /// A required handle argument was absent.
    NullPointer,
}

impl NodeStatus {
    /// Whether the status reports a completed operation.
    pub fn is_ok(self) -> bool {
        self == NodeStatus::Ok
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeStatus::Ok => "OK",
            NodeStatus::Nok => "NOK",
            NodeStatus::Empty => "EMPTY",
            NodeStatus::NullPointer => "NULL_POINTER",
        };
        f.write_str(label)
    }
}

impl<T> From<&Result<T, ListError>> for NodeStatus {
    fn from(outcome: &Result<T, ListError>) -> Self {
        match outcome {
            Ok(_) => NodeStatus::Ok,
            Err(err) => err.status(),
        }
    }
}

/// Reasons a list operation was refused. The list is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The list holds no nodes.
    #[error("list is empty")]
    Empty,
    /// Position is zero or past the last node.
    #[error("position {position} is outside 1..={length}")]
    PositionOutOfRange {
        /// Requested 1-based position.
        position: usize,
        /// Length of the list when the request was made.
        length: usize,
    },
    /// No node could be allocated for the insert.
    #[error("node allocation failed (limit {limit})")]
    AllocationFailed {
        /// Node budget that was exhausted.
        limit: usize,
    },
    /// A required argument was not supplied.
    #[error("missing {0}")]
    NullArgument(&'static str),
}

impl ListError {
    /// Status code reported for this error.
    pub fn status(&self) -> NodeStatus {
        match self {
            ListError::Empty => NodeStatus::Empty,
            ListError::NullArgument(_) => NodeStatus::NullPointer,
            ListError::PositionOutOfRange { .. } | ListError::AllocationFailed { .. } => {
                NodeStatus::Nok
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(ListError::Empty.status(), NodeStatus::Empty);
        assert_eq!(ListError::NullArgument("list").status(), NodeStatus::NullPointer);
        assert_eq!(
            ListError::PositionOutOfRange {
                position: 0,
                length: 3
            }
            .status(),
            NodeStatus::Nok
        );
        assert_eq!(
            ListError::AllocationFailed { limit: 2 }.status(),
            NodeStatus::Nok
        );

        let outcome: Result<u32, ListError> = Ok(7);
        assert_eq!(NodeStatus::from(&outcome), NodeStatus::Ok);
    }

    #[test]
    fn status_labels_match_contract_names() {
        assert_eq!(NodeStatus::NullPointer.to_string(), "NULL_POINTER");
        assert_eq!(NodeStatus::Nok.to_string(), "NOK");
        assert!(NodeStatus::Ok.is_ok());
        assert!(!NodeStatus::Empty.is_ok());
    }
}
