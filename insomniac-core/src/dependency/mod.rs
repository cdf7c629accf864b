mod tags;

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Request;

pub use tags::extract_tags;

static REQUEST_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"req_[a-f0-9]+").expect("valid"));

/// Collect the ids of the requests that `request` references through
/// `{% ... %}` tags.
///
/// Fields are scanned in a fixed order: body text, url, description, then
/// every header value. Within each field tags are visited left to right and
/// only the first id-looking substring of a tag counts. The result is not
/// deduplicated and may contain `request.id` itself.
pub fn request_dependency_ids(request: &Request) -> Vec<String> {
    let fields = [
        request.body.text.as_deref(),
        Some(request.url.as_str()),
        request.description.as_deref(),
    ]
    .into_iter()
    .chain(request.headers.iter().map(|h| Some(h.value.as_str())));

    fields
        .flatten()
        .flat_map(extract_tags)
        .filter_map(referenced_id)
        .map(str::to_string)
        .collect()
}

fn referenced_id(tag: &str) -> Option<&str> {
    REQUEST_ID_RE.find(tag).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Header, RequestBody};

    fn request(url: &str) -> Request {
        Request {
            id: "req_self".to_string(),
            parent_id: "fld_1".to_string(),
            name: "r".to_string(),
            method: "GET".to_string(),
            url: url.to_string(),
            description: None,
            body: RequestBody::default(),
            headers: Vec::new(),
            parameters: Vec::new(),
            meta_sort_key: None,
            dependency_ids: Vec::new(),
        }
    }

    #[test]
    fn fields_are_visited_body_url_description_headers() {
        let mut r = request("{% response 'body', 'req_b2', '$.id' %}");
        r.body.text = Some("{% response 'body', 'req_a1', '$.x' %}".to_string());
        r.description = Some("see {% response 'raw', 'req_c3' %}".to_string());
        r.headers = vec![
            Header {
                name: "Authorization".to_string(),
                value: "Bearer {% response 'body', 'req_d4', '$.token' %}".to_string(),
                disabled: true,
            },
        ];

        assert_eq!(
            request_dependency_ids(&r),
            vec!["req_a1", "req_b2", "req_c3", "req_d4"]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let r = request("{% response 'req_aa' %}/{% response 'req_aa' %}");
        assert_eq!(request_dependency_ids(&r), vec!["req_aa", "req_aa"]);
    }

    #[test]
    fn tags_without_request_ids_are_dropped() {
        let r = request("{% now 'iso-8601' %}/{% uuid 'v4' %}");
        assert!(request_dependency_ids(&r).is_empty());
    }

    #[test]
    fn uppercase_hex_does_not_match() {
        let r = request("{% response 'req_ABC' %}");
        assert!(request_dependency_ids(&r).is_empty());
    }
}
