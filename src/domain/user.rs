use std::fmt;

use crate::domain::{Amount, UserId};
use crate::error::{ShopError, ShopResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("USER"),
        }
    }
}

/// A registered customer and their loyalty-point account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub(crate) id: UserId,
    email: String,
    password_hash: String,
    name: String,
    phone: String,
    customer_uid: String,
    point_balance: Amount,
    role: Role,
}

impl User {
    /// Builds a new account. `password_hash` must already be a digest.
    pub fn register(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        signup_points: Amount,
    ) -> Self {
        let email = email.into();
        Self {
            id: UserId(0),
            customer_uid: customer_uid_for(&email),
            email,
            password_hash: password_hash.into(),
            name: name.into(),
            phone: phone.into(),
            point_balance: signup_points.max(0),
            role: Role::User,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn customer_uid(&self) -> &str {
        &self.customer_uid
    }

    pub fn point_balance(&self) -> Amount {
        self.point_balance
    }

    #[allow(dead_code)]
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn ensure_can_use_points(&self, points: Amount) -> ShopResult<()> {
        if points < 0 {
            return Err(ShopError::InvalidPoints(points));
        }
        if self.point_balance < points {
            return Err(ShopError::InsufficientPoints {
                requested: points,
                balance: self.point_balance,
            });
        }
        Ok(())
    }

    pub fn consume_points(&mut self, points: Amount) -> ShopResult<Amount> {
        self.ensure_can_use_points(points)?;
        self.point_balance -= points;
        Ok(self.point_balance)
    }

    /// Refunds are trusted to mirror an earlier consumption, so there is no
    /// upper bound.
    pub fn refund_points(&mut self, points: Amount) -> ShopResult<Amount> {
        if points < 0 {
            return Err(ShopError::InvalidPoints(points));
        }
        self.point_balance = self
            .point_balance
            .checked_add(points)
            .ok_or_else(|| ShopError::Validation("Point balance overflow".to_string()))?;
        Ok(self.point_balance)
    }
}

/// Stable customer identifier derived from the email address.
fn customer_uid_for(email: &str) -> String {
    let hash = email
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    format!("CUST_{}", hash.unsigned_abs())
}
