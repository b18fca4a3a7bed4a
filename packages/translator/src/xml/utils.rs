//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::{Document, Node};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use report_translator::xml::get_tag_name;
///
/// let xml = r#"<Report><Section>text</Section></Report>"#;
/// let doc = Document::parse(xml).unwrap();
/// let section = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(section), "Section");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Get all element children of a node, skipping text and comments.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// All elements in the document with the given tag name, in document order.
pub fn descendants_with_tag<'a, 'input>(
    doc: &'a Document<'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.descendants().filter(move |n| has_tag(*n, tag))
}

/// Text of the node's first child, when that child is a text node.
///
/// Returns `None` for elements that are empty or start with a child element.
pub fn node_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.first_child()
        .filter(|child| child.is_text())
        .and_then(|child| child.text())
}

/// Get the text content of a node, trimmed.
///
/// # Returns
/// Trimmed text content, or empty string if no text
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:Report xmlns:ns="http://example.com"><ns:Title/></ns:Report>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "Report");
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<Row><Column>1</Column><Other/><Column>2</Column></Row>"#;
        let doc = Document::parse(xml).unwrap();
        let columns: Vec<_> = find_children(doc.root_element(), "Column").collect();
        assert_eq!(columns.len(), 2);
    }

    #[test]
    fn test_element_children_skips_text() {
        let xml = r#"<Section>text<SectionTitle/>more<SectionTable/></Section>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(element_children(doc.root_element()).count(), 2);
    }

    #[test]
    fn test_descendants_with_tag_spans_parents() {
        let xml = r#"<Report>
            <Section><SectionTitle_0>a</SectionTitle_0></Section>
            <Section><SectionTitle_0>b</SectionTitle_0></Section>
        </Report>"#;
        let doc = Document::parse(xml).unwrap();
        let texts: Vec<String> = descendants_with_tag(&doc, "SectionTitle_0")
            .map(get_text)
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_node_text() {
        let xml = r#"<Report><Title>Q1</Title><Empty/><Nested><B>x</B></Nested></Report>"#;
        let doc = Document::parse(xml).unwrap();
        let first = |tag: &'static str| descendants_with_tag(&doc, tag).next().and_then(node_text);

        assert_eq!(first("Title"), Some("Q1"));
        assert_eq!(first("Empty"), None);
        assert_eq!(first("Nested"), None);
    }

    #[test]
    fn test_get_text() {
        let xml = r#"<Title>  trimmed text  </Title>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_text(doc.root_element()), "trimmed text");
    }

    #[test]
    fn test_has_tag() {
        let xml = r#"<Section/>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(has_tag(doc.root_element(), "Section"));
        assert!(!has_tag(doc.root_element(), "Report"));
    }
}
