//! User operations against the upstream shop API.

use marigold_core::UserId;
use tracing::instrument;

use super::{ApiError, Resource, ShopApiClient, User};

impl ShopApiClient {
    /// Get a user by id.
    ///
    /// Validates the id locally first: a non-positive id fails fast with a
    /// validation error and no network call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the user does not exist.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        if !id.is_valid() {
            return Err(ApiError::validation(
                "user_id",
                "user id must be a positive integer",
            ));
        }

        let not_found = || ApiError::NotFound {
            resource: Resource::User,
            id: id.get(),
        };

        match self.get_json::<Option<User>>(&format!("users/{id}")).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(not_found()),
            Err(ApiError::Http { status: 404, .. }) => Err(not_found()),
            Err(e) => Err(e),
        }
    }
}
