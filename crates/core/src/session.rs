//! Explicit session context.
//!
//! The session is constructed once at startup and passed to every action
//! handler; nothing in this workspace reads identity or role from ambient
//! global state.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::UserId;

/// Role of the signed-in user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Storekeeper,
    Supervisor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Storekeeper => "storekeeper",
            Role::Supervisor => "supervisor",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "storekeeper" => Ok(Role::Storekeeper),
            "supervisor" => Ok(Role::Supervisor),
            other => Err(DomainError::validation(format!(
                "unknown role {other:?} (expected storekeeper or supervisor)"
            ))),
        }
    }
}

/// Identity and role threaded through action handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    display_name: String,
    role: Role,
}

impl Session {
    pub fn new(user_id: UserId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Approving pending entries is a supervisor action.
    pub fn can_approve(&self) -> bool {
        matches!(self.role, Role::Supervisor)
    }
}
