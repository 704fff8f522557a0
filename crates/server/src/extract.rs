use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json, RequestExt,
};
use serde::de::DeserializeOwned;

/// Extractor accepting either a JSON body or a URL-encoded form, chosen by
/// the request's content type. Anything that is not JSON is handed to the
/// form parser.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(payload) = req
                .extract::<Json<T>, _>()
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self(payload));
        }

        let Form(payload) = req
            .extract::<Form<T>, _>()
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Self(payload))
    }
}
