use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::actor_framework::StoreClient;
use crate::credentials::CredentialHasher;
use crate::domain::{Amount, User, UserId};
use crate::error::{ShopError, ShopResult};
use crate::store::Repository;
use crate::user_actor::{actions, RegisterRequest, UserProfile};

/// Client for accounts.
///
/// Password hashing is CPU-bound, so it runs on the blocking pool before the
/// store is contacted and never inside the store task.
#[derive(Clone)]
pub struct UserClient {
    store: StoreClient,
    hasher: Arc<dyn CredentialHasher>,
    signup_points: Amount,
}

impl UserClient {
    pub fn new(store: StoreClient, hasher: Arc<dyn CredentialHasher>, signup_points: Amount) -> Self {
        Self {
            store,
            hasher,
            signup_points,
        }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ShopResult<UserId> {
        debug!("Sending request");
        request.validate()?;

        let RegisterRequest {
            email,
            password,
            name,
            phone,
        } = request;
        let hasher = Arc::clone(&self.hasher);
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ShopError::Credential(format!("hashing task failed: {e}")))??;

        let user = User::register(email, digest, name, phone, self.signup_points);
        self.store
            .transact("register", move |tx| {
                actions::register(tx, user).map(|user| user.id())
            })
            .await
    }

    /// Checks `password` against the stored digest. Unknown emails and wrong
    /// passwords fail the same way.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ShopResult<UserProfile> {
        debug!("Sending request");
        let lookup = email.to_string();
        let user = self
            .store
            .transact("login", move |tx| Ok(tx.find_user_by_email(&lookup)))
            .await?;
        let Some(user) = user else {
            warn!("Login attempt for unknown email");
            return Err(ShopError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let digest = user.password_hash().to_string();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| ShopError::Credential(format!("verify task failed: {e}")))??;

        if !verified {
            warn!(user_id = %user.id(), "Login rejected");
            return Err(ShopError::InvalidCredentials);
        }
        info!(user_id = %user.id(), "Login successful");
        Ok(UserProfile::from(&user))
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, email: &str) -> ShopResult<UserProfile> {
        debug!("Sending request");
        let email = email.to_string();
        self.store
            .transact("profile", move |tx| actions::profile(tx, &email))
            .await
    }
}
