mod done_flag;
pub mod todo;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::{error::AppError, response::JsonApiResponse};

pub use done_flag::DoneFlag;
pub use todo::{CreateTodoInput, TodoItemResponse, UpdateTodoInput};

/// Boundary check turning a raw request body into service input.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, AppError>;
}

/// JSON body extractor that rejects malformed or invalid input with
/// [`AppError::Validation`] before a handler runs. Transport-level rejections
/// (body too large, wrong content type) keep their own status.
pub struct ValidatedJson<T: Validate>(pub T::Output);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_response)?;
        body.validate()
            .map(ValidatedJson)
            .map_err(IntoResponse::into_response)
    }
}

fn rejection_response(rejection: JsonRejection) -> Response {
    match rejection.status() {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::validation(rejection.body_text()).into_response()
        }
        status => JsonApiResponse::failure(status, rejection.body_text()).into_response(),
    }
}
