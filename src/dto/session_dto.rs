use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::SessionUser;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "usuario")]
    pub user: SessionUser,
}
