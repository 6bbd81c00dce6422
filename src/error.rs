use thiserror::Error;

/// Errors raised when an operation would break the shape of a workflow tree.
///
/// These are the only failures the engine surfaces to callers. Whenever one is
/// returned, the state the operation started from is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    #[error("Node id '{0}' is already used by another node in the workflow")]
    DuplicateId(String),

    #[error("Node '{node_id}' references parent '{parent_id}', which does not exist")]
    MissingParent { node_id: String, parent_id: String },

    #[error("Node '{node_id}' declares depth {declared}, but its position in the tree gives {expected}")]
    DepthMismatch {
        node_id: String,
        declared: usize,
        expected: usize,
    },

    #[error("Node '{0}' is the root of the workflow and cannot be removed")]
    RootRemoval(String),

    #[error("Root node '{node_id}' declares a parent '{parent_id}'")]
    RootHasParent { node_id: String, parent_id: String },

    #[error("Node '{0}' is an end node and cannot have children")]
    TerminalParent(String),

    #[error("Ghost node '{0}' is an affordance and cannot be part of the workflow")]
    GhostInTree(String),

    #[error("Node id '{0}' contains the reserved segment 'ghost'")]
    ReservedId(String),

    #[error("The snapshot contains no workflow nodes")]
    EmptySnapshot,

    #[error("The workflow has more than one root: '{first}' and '{second}'")]
    MultipleRoots { first: String, second: String },

    #[error("Node '{0}' cannot be reached from the root")]
    Unreachable(String),

    #[error("Edge '{edge_id}' references node '{node_id}', which does not exist")]
    DanglingEdge { edge_id: String, node_id: String },
}

/// Errors at the file boundary, when snapshots or layout options are read or written.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Could not access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when converting a custom user format into a workflow seed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    Invalid(String),

    #[error("Converted workflow is not a valid tree: {0}")]
    Structure(#[from] StructuralViolation),
}
