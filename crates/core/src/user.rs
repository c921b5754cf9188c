//! Signed-in user record.

use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// The session record kept in device storage under `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}
