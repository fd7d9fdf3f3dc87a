//! Route labels for spans and metrics.

use uuid::Uuid;

/// Label for any path that is not one of the served routes.
pub(super) const UNMATCHED_ROUTE: &str = "unmatched";

const ROUTES: &[&str] = &[
    "/",
    "/cart",
    "/cart/item/{id}",
    "/healthcheck",
    "/metrics",
    "/api-doc/openapi.json",
];

/// Swagger UI serves its assets below this prefix.
const DOCS_PREFIX: &str = "/docs";

/// Map a request path onto a bounded set of labels: identifier segments
/// collapse to `{id}`, docs assets share one label, and every other path is
/// [`UNMATCHED_ROUTE`].
pub(super) fn route_label(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    let label = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .fold(String::new(), |mut label, segment| {
            label.push('/');
            label.push_str(segment);
            label
        });

    let label = if label.is_empty() { "/" } else { label.as_str() };

    if ROUTES.contains(&label) {
        label.to_owned()
    } else if label == DOCS_PREFIX || label.starts_with("/docs/") {
        DOCS_PREFIX.to_owned()
    } else {
        UNMATCHED_ROUTE.to_owned()
    }
}
