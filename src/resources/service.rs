//! Request plumbing shared by the resource services.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::filters::QueryFilter;
use crate::resources::ResourceError;

/// Builds a list request, attaching the filter's query string when a filter is given.
pub(crate) fn list_request(
    path: impl Into<String>,
    filter: Option<&dyn QueryFilter>,
) -> Result<HttpRequest, ResourceError> {
    let mut builder = HttpRequest::builder(HttpMethod::Get, path);
    if let Some(filter) = filter {
        builder = builder.query(filter.query_string());
    }
    Ok(builder.build()?)
}

/// Builds a request carrying `details` as its JSON body.
pub(crate) fn body_request<B: Serialize>(
    method: HttpMethod,
    path: impl Into<String>,
    details: &B,
) -> Result<HttpRequest, ResourceError> {
    let body = serde_json::to_value(details)?;
    Ok(HttpRequest::builder(method, path).body(body).build()?)
}

/// Builds a request without body or query.
pub(crate) fn bare_request(
    method: HttpMethod,
    path: impl Into<String>,
) -> Result<HttpRequest, ResourceError> {
    Ok(HttpRequest::builder(method, path).build()?)
}

/// Dispatches `request` and decodes the response into a fresh `T`.
///
/// `T::default()` is returned when the response has no body.
pub(crate) async fn fetch<T: DeserializeOwned + Default>(
    client: &HttpClient,
    request: HttpRequest,
) -> Result<T, ResourceError> {
    let mut result = T::default();
    client.make_request(request, Some(&mut result)).await?;
    Ok(result)
}

/// Like [`fetch`], also returning the next-page cursor from the `Link` header.
pub(crate) async fn fetch_page<T: DeserializeOwned + Default>(
    client: &HttpClient,
    request: HttpRequest,
) -> Result<(T, Option<String>), ResourceError> {
    let mut result = T::default();
    let response = client.make_request(request, Some(&mut result)).await?;
    Ok((result, response.next_page()))
}

/// Dispatches `request`, expecting no meaningful response body.
pub(crate) async fn execute(client: &HttpClient, request: HttpRequest) -> Result<(), ResourceError> {
    client.send(request).await?;
    Ok(())
}
