//! Router - HTTP method + path → manager 呼び出し
//!
//! 1. パス構造の検証（不一致なら 404）
//! 2. pantry id の解決（未登録なら 400）
//! 3. method ごとの dispatch（該当なしなら 405）
//!
//! ストア障害は 500 に変換し、プロセスは止めません。

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;

use super::{ApiResponse, Method, Route};
use crate::app::App;
use crate::domain::{PantryError, RequestId, UpdatePantryDetails};
use crate::ports::{RequestIdGenerator, SystemClock, UlidRequestIds};

#[derive(Clone)]
pub struct Router {
    app: App,
    request_ids: Arc<dyn RequestIdGenerator>,
}

impl Router {
    pub fn new(app: App) -> Self {
        Self::with_request_ids(app, Arc::new(UlidRequestIds::new(SystemClock)))
    }

    pub fn with_request_ids(app: App, request_ids: Arc<dyn RequestIdGenerator>) -> Self {
        Self { app, request_ids }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Handle one request. `body` is only parsed for PUT/POST.
    pub async fn handle(
        &self,
        method: &Method,
        path: &str,
        body: &[u8],
    ) -> (RequestId, ApiResponse) {
        let request_id = self.request_ids.next_request_id();
        let span = tracing::info_span!("request", %request_id, %method, path);

        let response = async {
            let response = self.dispatch(method, path, body).await;
            match response.status {
                500.. => {}
                400.. => tracing::warn!(status = response.status, body = %response.body, "rejected"),
                _ => tracing::info!(status = response.status, "handled"),
            }
            response
        }
        .instrument(span)
        .await;

        (request_id, response)
    }

    async fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> ApiResponse {
        let Some(route) = Route::parse(path) else {
            return ApiResponse::not_found();
        };

        let pantry = route.pantry();
        let (Some(pantries), Some(baskets)) =
            (self.app.pantry_manager(pantry), self.app.basket_manager(pantry))
        else {
            let action = format!("get {}", route.resource());
            return failure(&action, PantryError::UnknownPantry(pantry.clone()));
        };

        match (&route, method) {
            (Route::Pantry { .. }, Method::Get) => match pantries.get_details().await {
                Ok(details) => match serde_json::to_string(&details) {
                    Ok(json) => ApiResponse::json(json),
                    Err(e) => failure("get pantry", PantryError::CorruptDetails(e)),
                },
                Err(e) => failure("get pantry", e),
            },
            (Route::Pantry { .. }, Method::Put) => {
                let update = match parse_details(body) {
                    Ok(update) => update,
                    Err(response) => return response,
                };
                respond("update pantry", pantries.set_details(&update).await)
            }
            (Route::Basket { basket, .. }, Method::Get) => match baskets.get(basket).await {
                Ok(Some(found)) => ApiResponse::json(found.raw),
                Ok(None) => failure("get basket", PantryError::BasketNotFound(basket.clone())),
                Err(e) => failure("get basket", e),
            },
            (Route::Basket { basket, .. }, Method::Post) => {
                let content: Value = match parse_body(body) {
                    Ok(content) => content,
                    Err(response) => return response,
                };
                respond("create basket", baskets.create_or_replace(basket, &content).await)
            }
            (Route::Basket { basket, .. }, Method::Put) => {
                let patch: Value = match parse_body(body) {
                    Ok(patch) => patch,
                    Err(response) => return response,
                };
                respond("update basket", baskets.update(basket, patch).await)
            }
            (Route::Basket { basket, .. }, Method::Delete) => {
                respond("delete basket", baskets.delete(basket).await)
            }
            _ => ApiResponse::method_not_allowed(),
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiResponse> {
    serde_json::from_slice(body)
        .map_err(|e| ApiResponse::bad_request(format!("Could not parse request body: {e}")))
}

// Structs also deserialize from JSON arrays; details must be an object.
// Field values themselves are stored as sent.
fn parse_details(body: &[u8]) -> Result<UpdatePantryDetails, ApiResponse> {
    let value: Value = parse_body(body)?;
    if !value.is_object() {
        return Err(ApiResponse::bad_request(
            "Could not parse request body: pantry details must be an object",
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| ApiResponse::bad_request(format!("Could not parse request body: {e}")))
}

fn respond(action: &str, result: Result<(), PantryError>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::ok(),
        Err(e) => failure(action, e),
    }
}

fn failure(action: &str, err: PantryError) -> ApiResponse {
    if err.is_client_error() {
        return ApiResponse::bad_request(format!("Could not {action}: {err}"));
    }
    tracing::error!(error = %err, action, "request failed");
    ApiResponse::internal_error()
}
