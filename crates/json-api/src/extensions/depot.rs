//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use crate::{auth::Caller, errors::ApiError};

/// Typed access to request-scoped values.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// Attach the caller resolved by the authentication middleware.
    fn insert_caller(&mut self, caller: Caller);

    /// The caller attached by the authentication middleware.
    ///
    /// # Panics
    ///
    /// Panics when called on a route the authentication middleware does not cover.
    fn caller(&self) -> &Caller;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| {
            tracing::error!(
                type_name = std::any::type_name::<T>(),
                "missing depot value"
            );

            ApiError::ServerError
        })
    }

    fn insert_caller(&mut self, caller: Caller) {
        self.inject(caller);
    }

    #[expect(
        clippy::panic,
        reason = "a route outside the authentication middleware is a wiring bug"
    )]
    fn caller(&self) -> &Caller {
        match self.obtain::<Caller>() {
            Ok(caller) => caller,
            Err(_missing) => panic!("caller requested before the authentication middleware ran"),
        }
    }
}
