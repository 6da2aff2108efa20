use serde::{Deserialize, Serialize};

/// The authenticated caller, as produced by the identity verifier.
///
/// Only the numeric subject id survives verification; nothing about the
/// caller is persisted by the post workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
}
