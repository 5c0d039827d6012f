//! Error types for the tree edit engine
//!
//! Every variant is a structural precondition failure (`code -1`): the
//! operation was refused and nothing was changed.

use thiserror::Error;

use crate::models::ResultCode;
use crate::store::StoreError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("segment not found: {0}")]
    SegmentNotFound(String),

    #[error("cannot {op} the root node")]
    RootImmutable { op: &'static str },

    #[error("node {0} has no grandparent (its parent is the root)")]
    NoGrandparent(String),

    #[error("node {0} has no previous sibling")]
    NoPreviousSibling(String),

    #[error("node {0} has no next sibling")]
    NoNextSibling(String),

    #[error("previous sibling {0} is not a text node")]
    PreviousNotText(String),

    #[error("node {0} is not a text node")]
    NotTextNode(String),

    #[error("position {position} is past the end of node {node} (length {len})")]
    PositionOutOfRange {
        node: String,
        position: usize,
        len: usize,
    },

    #[error("node {0} still has children")]
    HasChildren(String),

    #[error("node {0} is not empty")]
    NotEmpty(String),

    #[error("no nodes selected")]
    EmptySelection,

    #[error("segment {segment} does not belong to node {node}")]
    ForeignSegment { segment: String, node: String },

    #[error("store inconsistency: {0}")]
    Store(#[from] StoreError),
}

impl EditError {
    pub fn code(&self) -> ResultCode {
        ResultCode::StructuralError
    }
}
