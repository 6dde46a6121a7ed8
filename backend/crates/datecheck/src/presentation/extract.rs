//! Validating JSON Extractor

use axum::Json;
use axum::extract::{FromRef, FromRequest, Request};
use kernel::error::app_error::AppError;
use kernel::error::kind::FailureKind;
use kernel::validate::{Validate, Violations};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::application::validator::DateTimeValidator;
use crate::domain::target::DateTarget;

/// JSON body that passed its own [`Validate`] rules and its date rules
///
/// Rejections are `AppError`s, so a malformed body, a blank field and a
/// date-order failure all reach the exception mapper the same way. Field
/// and date violations are reported together in one error.
#[derive(Debug, Clone)]
pub struct DatedJson<T>(pub T);

impl<T, S> FromRequest<S> for DatedJson<T>
where
    T: DeserializeOwned + DateTarget + Validate + Send,
    S: Send + Sync,
    Arc<DateTimeValidator>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        let mut violations = Violations::new();
        if let Err(err) = value.validate() {
            if err.kind() != FailureKind::FieldValidation {
                return Err(err);
            }
            violations.extend(err.violations().iter().cloned());
        }

        let validator = Arc::<DateTimeValidator>::from_ref(state);
        validator.check_into(&value, &mut violations)?;
        violations.into_result(T::schema())?;

        Ok(Self(value))
    }
}
