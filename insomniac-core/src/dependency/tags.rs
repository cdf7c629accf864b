const OPEN_DELIM: &str = "{%";
const CLOSE_DELIM: &str = "%}";

/// Split `text` into its `{% ... %}` tags, delimiters included.
///
/// Tags do not nest: a later `{%` replaces an earlier unmatched one. A `%}`
/// with no open tag before it is ignored, and a trailing `{%` that never
/// closes yields nothing.
pub fn extract_tags(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut tags = Vec::new();
    let mut start: Option<usize> = None;

    for i in 0..bytes.len().saturating_sub(1) {
        let view = &bytes[i..i + 2];
        if view == OPEN_DELIM.as_bytes() {
            start = Some(i);
        } else if view == CLOSE_DELIM.as_bytes() {
            if let Some(s) = start.take() {
                tags.push(&text[s..i + 2]);
            }
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::extract_tags;

    #[test]
    fn finds_each_tag_in_order() {
        assert_eq!(
            extract_tags("a {% one %} b {% two %}"),
            vec!["{% one %}", "{% two %}"]
        );
    }

    #[test]
    fn latest_open_delimiter_wins() {
        assert_eq!(extract_tags("{% outer {% inner %}"), vec!["{% inner %}"]);
    }

    #[test]
    fn stray_close_is_ignored() {
        assert_eq!(extract_tags("100%} then {% x %}"), vec!["{% x %}"]);
    }

    #[test]
    fn unclosed_open_yields_nothing() {
        assert!(extract_tags("{% response 'req_abc'").is_empty());
    }

    #[test]
    fn empty_and_tiny_inputs() {
        assert!(extract_tags("").is_empty());
        assert!(extract_tags("{").is_empty());
        assert_eq!(extract_tags("{%}"), vec!["{%}"]);
    }

    #[test]
    fn multibyte_text_around_tags() {
        assert_eq!(extract_tags("é{% ü %}ß"), vec!["{% ü %}"]);
    }
}
