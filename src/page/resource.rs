// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::page::filters::PageFilters;
use crate::page::sanitize::sanitize;
use crate::page::schema::{describe_schema, project, FieldSet};
use crate::page::types::{Page, PageView};
use crate::store::PageStore;
use crate::types::ApiError;

pub const RESOURCE_NAME: &str = "pages";

/// Per request inputs to the permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestContext {
    /// Value of `close_json_pages` when the request arrived.
    pub read_gate_closed: bool,
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageResult {
    Found(Map<String, Value>),
    Empty,
}

impl PageResult {
    /// JSON body: the projected view, or an empty array.
    pub fn into_json(self) -> Value {
        match self {
            PageResult::Found(data) => Value::Object(data),
            PageResult::Empty => Value::Array(Vec::new()),
        }
    }
}

/// Read-only page resource, sanitizing stored records into [`PageView`]s.
pub struct PageResource {
    store: Arc<dyn PageStore>,
    filters: PageFilters,
    fields: FieldSet,
}

impl PageResource {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self {
            store,
            filters: PageFilters::default(),
            fields: FieldSet::from_schema(&describe_schema()),
        }
    }

    pub fn with_filters(mut self, filters: PageFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Route pattern of the item endpoint, relative to the namespace.
    pub fn route() -> String {
        format!("/{}/:id", RESOURCE_NAME)
    }

    /// Matches the `id` path segment against `^[0-9]+$` and coerces it.
    ///
    /// Digit strings too large for `u64` saturate and then find no record.
    pub fn parse_id(raw: &str) -> Result<u64, ApiError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::NoRoute {
                path: format!("/{}/{}", RESOURCE_NAME, raw),
            });
        }
        Ok(raw.parse::<u64>().unwrap_or(u64::MAX))
    }

    pub fn check_read_permission(ctx: &RequestContext) -> Result<(), ApiError> {
        if ctx.read_gate_closed {
            info!(
                "Page resource closed, refusing read authenticated={}",
                ctx.authenticated
            );
            return Err(ApiError::forbidden(ctx.authenticated));
        }
        Ok(())
    }

    pub fn describe_schema(&self) -> Value {
        describe_schema()
    }

    /// Permission check, then lookup.
    pub async fn handle_get(&self, ctx: &RequestContext, id: u64) -> Result<PageResult, ApiError> {
        Self::check_read_permission(ctx)?;
        self.get_page(id).await
    }

    pub async fn get_page(&self, id: u64) -> Result<PageResult, ApiError> {
        let page = self.store.get_page(id).await.map_err(|e| {
            error!("Error loading page id={} store={}: {}", id, self.store.name(), e);
            ApiError::from(e)
        })?;

        let page = match page {
            Some(page) if page.is_page() => page,
            Some(page) => {
                debug!("Record id={} is kind={}, not a page", id, page.kind);
                return Ok(PageResult::Empty);
            }
            None => {
                debug!("No record for id={}", id);
                return Ok(PageResult::Empty);
            }
        };

        let view = self.shape_page(&page).await?;
        Ok(PageResult::Found(project(&view, &self.fields)))
    }

    pub async fn shape_page(&self, page: &Page) -> Result<PageView, ApiError> {
        let future_image = if self.fields.contains("future_image") {
            self.store.thumbnail_url(page.id).await.map_err(|e| {
                error!("Error resolving thumbnail id={}: {}", page.id, e);
                ApiError::from(e)
            })?
        } else {
            None
        };

        Ok(PageView {
            id: page.id,
            title: sanitize(&self.filters.title.apply(&page.title, page)),
            content: sanitize(&self.filters.content.apply(&page.content, page)),
            future_image,
        })
    }
}
