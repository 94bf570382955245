// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, ApiResponse, OpenApi};
use serde_json::Value;
use tracing::{debug, error};

use crate::auth::is_authenticated;
use crate::config::ConfigManager;
use crate::page::{PageResource, RequestContext};
use crate::types::{ApiError, ErrorResponse};

#[derive(ApiResponse)]
pub enum PageResponse {
    /// The page view, or `[]` when no page has this id.
    #[oai(status = 200, content_type = "application/json; charset=utf-8")]
    Ok(Json<Value>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl PageResponse {
    pub fn from_error(error: &ApiError) -> Self {
        let body = Json(ErrorResponse::from_api_error(error));
        match error.http_status() {
            401 => PageResponse::Unauthorized(body),
            403 => PageResponse::Forbidden(body),
            404 => PageResponse::NotFound(body),
            _ => PageResponse::InternalError(body),
        }
    }
}

impl From<Result<Value, ApiError>> for PageResponse {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(body) => PageResponse::Ok(Json(body)),
            Err(e) => PageResponse::from_error(&e),
        }
    }
}

pub struct Api {
    config: Arc<ConfigManager>,
    resource: Arc<PageResource>,
}

impl Api {
    pub fn new(config: Arc<ConfigManager>, resource: PageResource) -> Self {
        Self {
            config,
            resource: Arc::new(resource),
        }
    }

    /// Snapshot of the settings the permission check needs for this request.
    async fn request_context(&self, request: &Request) -> RequestContext {
        let config = self.config.get_config().await;
        RequestContext {
            read_gate_closed: config.api.close_json_pages,
            authenticated: is_authenticated(request, &config.auth.tokens),
        }
    }
}

#[OpenApi]
impl Api {
    /// Sanitized view of one page
    #[oai(path = "/pages/:id", method = "get")]
    async fn get_page(&self, request: &Request, Path(id): Path<String>) -> PageResponse {
        let result = async {
            let id = PageResource::parse_id(&id)?;
            let ctx = self.request_context(request).await;
            debug!(
                "GET page id={} gate_closed={} authenticated={}",
                id, ctx.read_gate_closed, ctx.authenticated
            );
            let page = self.resource.handle_get(&ctx, id).await?;
            Ok::<Value, ApiError>(page.into_json())
        }
        .await;

        if let Err(ApiError::Internal { message }) = &result {
            error!("Error serving page id={}: {}", id, message);
        }
        result.into()
    }

    /// JSON Schema of the page resource
    #[oai(path = "/pages/:id", method = "options")]
    async fn describe_page(&self, Path(id): Path<String>) -> PageResponse {
        PageResource::parse_id(&id)
            .map(|_| self.resource.describe_schema())
            .into()
    }
}
