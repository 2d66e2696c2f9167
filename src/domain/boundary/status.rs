//! Lifecycle of an error boundary.
//!
//! ```text
//! Healthy --[descendant render fails]--> Failed
//! ```
//!
//! Failed is terminal. A fresh boundary (full reload) is the only way out.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryStatus {
    /// Children render unmodified.
    #[default]
    Healthy,
    /// A descendant failed; only the fallback renders.
    Failed,
}

impl BoundaryStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, BoundaryStatus::Healthy)
    }
}

impl StateMachine for BoundaryStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (BoundaryStatus::Healthy, BoundaryStatus::Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            BoundaryStatus::Healthy => vec![BoundaryStatus::Failed],
            BoundaryStatus::Failed => vec![],
        }
    }
}
