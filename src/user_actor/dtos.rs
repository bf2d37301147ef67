use std::fmt;

use crate::domain::{Amount, User};
use crate::error::{ShopError, ShopResult};

#[derive(Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .finish()
    }
}

impl RegisterRequest {
    /// Every field is required and must not be blank.
    pub fn validate(&self) -> ShopResult<()> {
        let fields = [
            ("email", &self.email),
            ("password", &self.password),
            ("name", &self.name),
            ("phone", &self.phone),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ShopError::Validation(format!("{field} is required"))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub customer_uid: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub point_balance: Amount,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            customer_uid: user.customer_uid().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            phone: user.phone().to_string(),
            point_balance: user.point_balance(),
        }
    }
}
