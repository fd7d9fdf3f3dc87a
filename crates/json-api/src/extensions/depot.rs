//! Depot helper extensions.

use std::any::Any;

use hamper_app::domain::users::UserUuid;
use salvo::prelude::Depot;
use tracing::error;

use crate::errors::ApiError;

/// Typed access to values that middleware leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_user_uuid(&mut self, user: UserUuid);

    fn user_uuid_or_401(&self) -> Result<UserUuid, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_missing| {
            error!(
                type_name = std::any::type_name::<T>(),
                "expected value missing from depot"
            );

            ApiError::internal()
        })
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.inject(user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, ApiError> {
        self.obtain::<UserUuid>()
            .copied()
            .map_err(|_missing| ApiError::unauthorized("Not authenticated"))
    }
}
