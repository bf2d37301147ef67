use tracing::{debug, info};

use crate::domain::User;
use crate::error::{ShopError, ShopResult};
use crate::store::{Repository, Transaction};
use crate::user_actor::UserProfile;

/// Resolves an authenticated email to its account.
pub fn find_by_email(tx: &Transaction<'_>, email: &str) -> ShopResult<User> {
    tx.find_user_by_email(email)
        .ok_or_else(|| ShopError::not_found("User", email))
}

/// Saves a new account; the email must not be taken yet.
pub fn register(tx: &mut Transaction<'_>, user: User) -> ShopResult<User> {
    if tx.find_user_by_email(user.email()).is_some() {
        debug!(email = %user.email(), "Email already registered");
        return Err(ShopError::AlreadyRegistered(user.email().to_string()));
    }
    let user = tx.save(user);
    info!(user_id = %user.id(), customer_uid = %user.customer_uid(), "User registered");
    Ok(user)
}

pub fn profile(tx: &Transaction<'_>, email: &str) -> ShopResult<UserProfile> {
    find_by_email(tx, email).map(|user| UserProfile::from(&user))
}
