use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::codec::{decode, is_r2ta_identifier};
use super::element::ElementRef;
use crate::util::{display_title, short_label};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementEntry {
    pub raw: String,
    pub element: ElementRef,
    pub title: String,
    pub label: String,
}

pub fn load_elements(path: &Path) -> Result<Vec<ElementEntry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph description {}", path.display()))?;
    let entries = scan_elements(&text);
    info!(
        path = %path.display(),
        elements = entries.len(),
        "scanned graph description"
    );
    Ok(entries)
}

/// Collects the chartable elements named by quoted attribute values, in order
/// of first appearance.
pub fn scan_elements(text: &str) -> Vec<ElementEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for value in quoted_values(text) {
        let raw = value.trim();
        if !is_r2ta_identifier(raw) || seen.contains(raw) {
            continue;
        }
        let Some(element) = decode(raw) else {
            continue;
        };

        seen.insert(raw.to_owned());
        entries.push(ElementEntry {
            raw: raw.to_owned(),
            title: display_title(&element.identifier),
            label: short_label(&element.identifier),
            element,
        });
    }

    entries
}

fn quoted_values(text: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '"' {
            continue;
        }

        let mut value = String::new();
        let mut closed = false;
        while let Some(ch) = chars.next() {
            match ch {
                '"' => {
                    closed = true;
                    break;
                }
                '\\' => match chars.peek() {
                    Some('"') => {
                        value.push('"');
                        chars.next();
                    }
                    Some('\n') => {
                        chars.next();
                    }
                    Some('\r') => {
                        chars.next();
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                    }
                    _ => value.push('\\'),
                },
                _ => value.push(ch),
            }
        }

        if closed {
            values.push(value);
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::r2ta::element::{ElementKind, NodeSubKind};

    const GRAPH: &str = r#"digraph ros {
    "cb" [label="timer_callback", URL="r2ta-node://node=%2Ftalker&interface_type=Callback", tooltip="r2ta-node://node=%2Ftalker&interface_type=Callback"];
    "pub" [label="chatter", tooltip="r2ta-node://node=%2Ftalker&interface_type=Publisher&topic=%2Fchatter"];
    "plain" [label="not traced", tooltip="just a note"];
    "cb" -> "pub" [tooltip="r2ta-edge://source_node=%2Ftalker&target_node=%2Flistener&identifier=%2Fchatter"];
}"#;

    #[test]
    fn finds_nodes_and_edges_in_order() {
        let entries = scan_elements(GRAPH);
        let raws = entries.iter().map(|entry| entry.raw.as_str()).collect::<Vec<_>>();
        assert_eq!(
            raws,
            [
                "r2ta-node://node=%2Ftalker&interface_type=Callback",
                "r2ta-node://node=%2Ftalker&interface_type=Publisher&topic=%2Fchatter",
                "r2ta-edge://source_node=%2Ftalker&target_node=%2Flistener&identifier=%2Fchatter",
            ]
        );
        assert_eq!(entries[0].element.node_sub_kind, Some(NodeSubKind::Callback));
        assert_eq!(entries[1].element.node_sub_kind, Some(NodeSubKind::Publisher));
        assert_eq!(entries[2].element.element_kind, ElementKind::Edge);
        assert_eq!(entries[2].title, "source_node=/talker target_node=/listener identifier=/chatter");
    }

    #[test]
    fn unescapes_quotes_and_line_continuations() {
        let text = "a [tooltip=\"r2ta-node://interface=Callback(Subscriber(\\\"/clock\\\"))&node=/abc\\\n&interface_type=Callback\"];";
        let entries = scan_elements(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].element.identifier,
            "interface=Callback(Subscriber(\"/clock\"))&node=/abc&interface_type=Callback"
        );
    }

    #[test]
    fn padded_values_are_trimmed() {
        let entries = scan_elements("a [tooltip=\"  r2ta-node://node=/a&interface_type=Timer \"];");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].raw, "r2ta-node://node=/a&interface_type=Timer");
        assert_eq!(entries[0].element.identifier, "node=/a&interface_type=Timer");
    }

    #[test]
    fn unterminated_values_are_ignored() {
        assert!(scan_elements("x [URL=\"r2ta-node://node=/a").is_empty());
        assert!(scan_elements("").is_empty());
    }

    #[test]
    fn load_elements_reads_the_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{GRAPH}").unwrap();

        let entries = load_elements(file.path()).unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn load_elements_reports_missing_files() {
        let error = load_elements(Path::new("/nonexistent/graph.dot")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/graph.dot"));
    }
}
