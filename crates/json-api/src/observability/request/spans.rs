//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Segments followed by a path parameter, and the parameter's name.
const PARAMETERISED: [(&str, &str); 2] = [("items", "{product}"), ("orders", "{order}")];

/// Collapsed route and span name for one request.
#[derive(Debug, Clone)]
pub(super) struct RouteName {
    pub(super) route: String,
    pub(super) span_name: String,
}

impl RouteName {
    pub(super) fn new(method: &str, path: &str) -> Self {
        let route = route_template(path);
        let span_name = format!("{method} {route}");

        Self { route, span_name }
    }
}

/// Replace ids in `path` with their router parameter names, so that
/// `/orders/<uuid>/cancel` and `/orders/not-a-uuid/cancel` share one label.
fn route_template(path: &str) -> String {
    let mut route = String::new();
    let mut previous: Option<&str> = None;

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        route.push('/');

        let parameter = previous.and_then(|previous| {
            PARAMETERISED
                .iter()
                .find(|(resource, _)| *resource == previous)
                .map(|(_, name)| *name)
        });

        match parameter {
            Some(name) => route.push_str(name),
            None if Uuid::parse_str(segment).is_ok() => route.push_str("{uuid}"),
            None => route.push_str(segment),
        }

        // `/orders/{order}/status` must not treat `status` as a parameter.
        previous = parameter.map_or(Some(segment), |_| None);
    }

    if route.is_empty() {
        route.push('/');
    }

    route
}
