//! JSON-LD / Hydra response envelopes.
//!
//! Items carry `@context`, `@id` and `@type` next to their fields; nested
//! sub-objects carry `@id` and `@type`; collections wrap members in a
//! `hydra:Collection` with pagination metadata. Error bodies live here too
//! so every non-2xx response has the same shape.

use agora_core::iri::item_iri;
use agora_core::pagination::Page;
use agora_core::policy::ResourceKind;
use agora_core::types::DbId;
use agora_core::validation::ViolationList;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Media type of every JSON-LD body.
pub const JSON_LD: &str = "application/ld+json; charset=utf-8";

/// `hydra:title` of every error body.
pub const ERROR_TITLE: &str = "An error occurred";

/// Serialize `T` as JSON with the JSON-LD content type.
///
/// ```ignore
/// Ok((StatusCode::CREATED, JsonLd(Item::new(ResourceKind::Category, c.id, view))))
/// ```
#[derive(Debug)]
pub struct JsonLd<T>(pub T);

impl<T: Serialize> IntoResponse for JsonLd<T> {
    fn into_response(self) -> Response {
        let mut response = axum::Json(self.0).into_response();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_LD));
        response
    }
}

/// A resource embedded in another document: `@id`, `@type`, then fields.
#[derive(Debug, Serialize)]
pub struct Embedded<T: Serialize> {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Embedded<T> {
    pub fn new(kind: ResourceKind, id: DbId, data: T) -> Self {
        Self {
            id: item_iri(kind, id),
            kind: kind.short_name(),
            data,
        }
    }
}

/// A top-level item document.
#[derive(Debug, Serialize)]
pub struct Item<T: Serialize> {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(flatten)]
    pub body: Embedded<T>,
}

impl<T: Serialize> Item<T> {
    pub fn new(kind: ResourceKind, id: DbId, data: T) -> Self {
        Self {
            context: kind.context(),
            body: Embedded::new(kind, id, data),
        }
    }
}

/// `hydra:view` of a collection spanning several pages.
#[derive(Debug, Serialize)]
pub struct PartialView {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "hydra:first")]
    pub first: String,
    #[serde(rename = "hydra:last")]
    pub last: String,
    #[serde(rename = "hydra:previous", skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(rename = "hydra:next", skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PartialView {
    fn new(path: &str, page: &Page, total: i64) -> Self {
        let page_iri = |n: i64| format!("{path}?page={n}");
        Self {
            id: page_iri(page.number),
            kind: "hydra:PartialCollectionView",
            first: page_iri(1),
            last: page_iri(page.last_page(total)),
            previous: page.has_previous().then(|| page_iri(page.number - 1)),
            next: page.has_next(total).then(|| page_iri(page.number + 1)),
        }
    }
}

/// A paginated `hydra:Collection` document.
#[derive(Debug, Serialize)]
pub struct Collection<T: Serialize> {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@id")]
    pub id: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "hydra:member")]
    pub members: Vec<Embedded<T>>,
    #[serde(rename = "hydra:totalItems")]
    pub total_items: i64,
    #[serde(rename = "hydra:view", skip_serializing_if = "Option::is_none")]
    pub view: Option<PartialView>,
}

impl<T: Serialize> Collection<T> {
    /// Build a collection page; `hydra:view` is only present when the
    /// collection spans more than one page.
    pub fn new(kind: ResourceKind, members: Vec<Embedded<T>>, page: &Page, total: i64) -> Self {
        let path = kind.collection_path();
        Self {
            context: kind.context(),
            id: path,
            kind: "hydra:Collection",
            members,
            total_items: total,
            view: page
                .is_partial(total)
                .then(|| PartialView::new(path, page, total)),
        }
    }
}

/// Generic `hydra:Error` body.
#[derive(Debug, Serialize)]
pub struct HydraError {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "hydra:title")]
    pub title: &'static str,
    #[serde(rename = "hydra:description")]
    pub description: String,
}

impl HydraError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            context: "/contexts/Error",
            kind: "hydra:Error",
            title: ERROR_TITLE,
            description: description.into(),
        }
    }
}

/// `ConstraintViolationList` body for 422 responses.
#[derive(Debug, Serialize)]
pub struct ViolationListBody {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "hydra:title")]
    pub title: &'static str,
    #[serde(rename = "hydra:description")]
    pub description: String,
    pub violations: ViolationList,
}

impl From<&ViolationList> for ViolationListBody {
    fn from(list: &ViolationList) -> Self {
        Self {
            context: "/contexts/ConstraintViolationList",
            kind: "ConstraintViolationList",
            title: ERROR_TITLE,
            description: list.description(),
            violations: list.clone(),
        }
    }
}

/// Plain `{code, message}` body used for authentication failures.
#[derive(Debug, Serialize)]
pub struct AuthErrorBody {
    pub code: u16,
    pub message: String,
}
