use url::form_urlencoded;

// Element ids are percent-encoded only; a literal `+` is not a space.
fn decoded_pairs(element_id: &str) -> Vec<(String, String)> {
    let escaped = element_id.replace('+', "%2B");
    form_urlencoded::parse(escaped.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Chart window title: the decoded `key=value` pairs of an element id.
pub fn display_title(element_id: &str) -> String {
    decoded_pairs(element_id)
        .into_iter()
        .map(|(key, value)| {
            if value.is_empty() {
                key
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn short_label(element_id: &str) -> String {
    let pairs = decoded_pairs(element_id);
    let lookup = |wanted: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == wanted)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    };

    if let (Some(source), Some(target)) = (lookup("source_node"), lookup("target_node")) {
        return match lookup("identifier") {
            Some(topic) => format!("{source} -> {target} ({topic})"),
            None => format!("{source} -> {target}"),
        };
    }

    let parts = ["node", "interface", "topic"]
        .into_iter()
        .filter_map(lookup)
        .collect::<Vec<_>>();
    if parts.is_empty() {
        display_title(element_id)
    } else {
        parts.join(" ")
    }
}
