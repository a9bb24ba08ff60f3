//! HTTP span helpers.

use uuid::Uuid;

/// Collapse id segments so partner and limit paths group under one route.
pub(super) fn request_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut route = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            route.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            route.push_str("{uuid}");
        } else {
            route.push_str(segment);
        }
    }

    route
}
