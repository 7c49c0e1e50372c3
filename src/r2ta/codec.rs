use super::element::{ElementKind, ElementRef, NodeSubKind};

pub const NODE_PREFIX: &str = "r2ta-node://";
pub const EDGE_PREFIX: &str = "r2ta-edge://";

/// Anything outside the two r2ta schemes, or a scheme with a blank body, yields
/// `None`. The body is kept verbatim; the tracer matches on it.
pub fn decode(raw: &str) -> Option<ElementRef> {
    let (element_kind, body) = if let Some(body) = raw.strip_prefix(NODE_PREFIX) {
        (ElementKind::Node, body)
    } else if let Some(body) = raw.strip_prefix(EDGE_PREFIX) {
        (ElementKind::Edge, body)
    } else {
        return None;
    };

    if body.trim().is_empty() {
        return None;
    }

    Some(ElementRef {
        identifier: body.to_owned(),
        element_kind,
        node_sub_kind: detect_sub_kind(body),
    })
}

pub fn detect_sub_kind(body: &str) -> Option<NodeSubKind> {
    NodeSubKind::DETECTION_ORDER
        .into_iter()
        .find(|sub_kind| body.contains(sub_kind.marker()))
}

pub fn is_r2ta_identifier(raw: &str) -> bool {
    raw.starts_with(NODE_PREFIX) || raw.starts_with(EDGE_PREFIX)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn decodes_callback_node() {
        let element = decode("r2ta-node://node42&interface_type=Callback").expect("node decodes");
        assert_eq!(element.identifier, "node42&interface_type=Callback");
        assert_eq!(element.element_kind, ElementKind::Node);
        assert_eq!(element.node_sub_kind, Some(NodeSubKind::Callback));
    }

    #[test]
    fn decodes_edge_without_marker() {
        let element = decode("r2ta-edge://source_node=%2Fa&target_node=%2Fb&identifier=%2Fchatter")
            .expect("edge decodes");
        assert_eq!(element.element_kind, ElementKind::Edge);
        assert_eq!(element.node_sub_kind, None);
        assert_eq!(
            element.identifier,
            "source_node=%2Fa&target_node=%2Fb&identifier=%2Fchatter"
        );
    }

    #[test]
    fn keeps_the_body_verbatim() {
        let element = decode("r2ta-node://  node=/a&interface_type=Timer \n").expect("decodes");
        assert_eq!(element.identifier, "  node=/a&interface_type=Timer \n");
        assert_eq!(element.node_sub_kind, Some(NodeSubKind::Timer));
    }

    #[test]
    fn rejects_foreign_and_malformed_input() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("http://example.org"), None);
        assert_eq!(decode("r2ta-node:/missing-slash"), None);
        assert_eq!(decode("r2ta-node://"), None);
        assert_eq!(decode("r2ta-edge://   "), None);
        assert_eq!(decode(" r2ta-node://leading-space"), None);
    }

    #[test]
    fn subscriber_marker_wins_over_callback() {
        let element = decode(
            "r2ta-node://interface_type=Callback&inner=interface_type=Subscriber",
        )
        .expect("decodes");
        assert_eq!(element.node_sub_kind, Some(NodeSubKind::Subscriber));
    }

    fn sub_kind_strategy() -> impl Strategy<Value = NodeSubKind> {
        prop::sample::select(NodeSubKind::DETECTION_ORDER.to_vec())
    }

    proptest! {
        #[test]
        fn foreign_prefixes_never_decode(raw in "\\PC*") {
            prop_assume!(!is_r2ta_identifier(&raw));
            prop_assert_eq!(decode(&raw), None);
        }

        #[test]
        fn single_marker_selects_sub_kind(
            sub_kind in sub_kind_strategy(),
            head in "[a-z0-9/_%]{0,16}",
            tail in "[a-z0-9/_%]{0,16}",
        ) {
            let raw = format!("{NODE_PREFIX}{head}&{}&{tail}", sub_kind.marker());
            let element = decode(&raw).expect("marked body decodes");
            prop_assert_eq!(element.node_sub_kind, Some(sub_kind));
            prop_assert_eq!(element.element_kind, ElementKind::Node);
        }
    }
}
