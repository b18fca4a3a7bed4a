//! Extraction of the tabular content of one `Section` element.
//!
//! Only direct children of the section are inspected:
//!
//! - `SectionTitle` starts a new overview entry
//! - `SectionDescription` describes the entry started last in this section
//! - `SectionTable` contributes `ColumnHeader` texts and `Row`s of `Column` texts
//!
//! Columns are laid out purely by encounter order; there is no schema.

use roxmltree::Node;

use crate::types::{OverviewEntry, SheetContent};
use crate::xml::{element_children, find_children, get_tag_name, get_text};

/// Extract the sheet content of a `Section` element.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use report_translator::table::extract_sheet_content;
///
/// let xml = r#"<Section>
///     <SectionTitle>Revenue</SectionTitle>
///     <SectionTable>
///         <ColumnHeader>Region</ColumnHeader>
///         <Row><Column>West</Column></Row>
///     </SectionTable>
/// </Section>"#;
/// let doc = Document::parse(xml).unwrap();
/// let sheet = extract_sheet_content(doc.root_element());
///
/// assert_eq!(sheet.sheet_title(), Some("Revenue"));
/// assert_eq!(sheet.column_headers, vec!["Region"]);
/// assert_eq!(sheet.rows, vec![vec!["West".to_string()]]);
/// ```
pub fn extract_sheet_content(section: Node<'_, '_>) -> SheetContent {
    let mut sheet = SheetContent::default();

    for child in element_children(section) {
        match get_tag_name(child) {
            "SectionTitle" => sheet.entries.push(OverviewEntry {
                title: get_text(child),
                description: None,
            }),
            "SectionDescription" => match sheet.entries.last_mut() {
                Some(entry) => entry.description = Some(get_text(child)),
                None => tracing::debug!("SectionDescription without preceding SectionTitle"),
            },
            "SectionTable" => extract_table(child, &mut sheet),
            _ => {}
        }
    }

    sheet
}

/// Walk a `SectionTable`, appending headers and rows to `sheet`.
fn extract_table(table: Node<'_, '_>, sheet: &mut SheetContent) {
    for child in element_children(table) {
        match get_tag_name(child) {
            "ColumnHeader" => sheet.column_headers.push(get_text(child)),
            "Row" => sheet
                .rows
                .push(find_children(child, "Column").map(get_text).collect()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn sheet_of(xml: &str) -> SheetContent {
        let doc = Document::parse(xml).unwrap();
        extract_sheet_content(doc.root_element())
    }

    #[test]
    fn test_three_headers_two_rows() {
        let sheet = sheet_of(
            r#"<Section>
                <SectionTitle>Jobs</SectionTitle>
                <SectionTable>
                    <ColumnHeader>A</ColumnHeader>
                    <ColumnHeader>B</ColumnHeader>
                    <ColumnHeader>C</ColumnHeader>
                    <Row><Column>1</Column><Column>2</Column><Column>3</Column></Row>
                    <Row><Column>4</Column><Column>5</Column><Column>6</Column></Row>
                </SectionTable>
            </Section>"#,
        );

        assert_eq!(sheet.column_headers, vec!["A", "B", "C"]);
        assert_eq!(
            sheet.rows,
            vec![
                vec!["1".to_string(), "2".to_string(), "3".to_string()],
                vec!["4".to_string(), "5".to_string(), "6".to_string()],
            ]
        );
    }

    #[test]
    fn test_description_follows_title() {
        let sheet = sheet_of(
            r#"<Section>
                <SectionTitle>Revenue</SectionTitle>
                <SectionDescription>Up 10%</SectionDescription>
            </Section>"#,
        );

        assert_eq!(
            sheet.entries,
            vec![OverviewEntry {
                title: "Revenue".to_string(),
                description: Some("Up 10%".to_string()),
            }]
        );
    }

    #[test]
    fn test_description_without_title_is_ignored() {
        let sheet = sheet_of(
            r#"<Section>
                <SectionDescription>Orphan</SectionDescription>
                <SectionTitle>Revenue</SectionTitle>
            </Section>"#,
        );

        assert_eq!(sheet.entries.len(), 1);
        assert_eq!(sheet.entries[0].description, None);
    }

    #[test]
    fn test_nested_tables_are_not_direct_children() {
        let sheet = sheet_of(
            r#"<Section>
                <Wrapper><SectionTable><ColumnHeader>X</ColumnHeader></SectionTable></Wrapper>
            </Section>"#,
        );

        assert!(sheet.is_empty());
    }

    #[test]
    fn test_multiple_tables_accumulate() {
        let sheet = sheet_of(
            r#"<Section>
                <SectionTable><ColumnHeader>A</ColumnHeader><Row><Column>1</Column></Row></SectionTable>
                <SectionTable><ColumnHeader>B</ColumnHeader><Row><Column>2</Column></Row></SectionTable>
            </Section>"#,
        );

        assert_eq!(sheet.column_headers, vec!["A", "B"]);
        assert_eq!(sheet.rows.len(), 2);
    }

    #[test]
    fn test_slot_tags_do_not_count_as_titles() {
        let sheet = sheet_of(
            r#"<Section>
                <SectionTitle_0>Slot title</SectionTitle_0>
                <SectionDescription_0>Slot description</SectionDescription_0>
            </Section>"#,
        );

        assert!(sheet.entries.is_empty());
    }
}
