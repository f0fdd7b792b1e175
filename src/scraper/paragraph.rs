use super::dom::{Element, Node};
use super::email::decode_email;

const EMAIL_ATTR: &str = "data-cfemail";

/// Every field paragraph on a detail page opens with an icon and a label.
const LABEL_NODES: usize = 2;

/// Text of a field paragraph, without its leading icon and label.
///
/// Only direct children are read: text as-is, `<br>` as a newline, and links
/// as their text (or decoded address, for protected emails) preceded by a
/// space. Anything else is dropped.
pub fn extract_text(paragraph: &Element, decode_emails: bool) -> String {
    let text: String = paragraph
        .children
        .iter()
        .skip(LABEL_NODES)
        .map(|node| node_text(node, decode_emails))
        .collect();

    text.trim().to_string()
}

fn node_text(node: &Node, decode_emails: bool) -> String {
    match node {
        Node::Text(text) => text.clone(),
        Node::Element(el) if el.is("br") => "\n".to_string(),
        Node::Element(el) if el.is("a") => {
            let protected = el
                .find_attr(EMAIL_ATTR)
                .filter(|encoded| decode_emails && !encoded.is_empty());

            match protected {
                Some(encoded) => format!(" {}", decode_email(encoded)),
                None => format!(" {}", el.rendered_text()),
            }
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::dom::Document;

    fn labelled(children: Vec<Node>) -> Element {
        let mut p = Element::new("p")
            .with_child(Element::new("i").with_attr("class", "icon"))
            .with_child(Element::new("strong").with_text("Label:"));
        p.children.extend(children);
        p
    }

    #[test]
    fn skips_icon_and_label() {
        let p = labelled(vec![Node::text("  Shelve books  ")]);
        assert_eq!(extract_text(&p, true), "Shelve books");
    }

    #[test]
    fn skips_first_two_children_of_any_type() {
        let p = Element::new("p")
            .with_text("first")
            .with_child(Node::Other)
            .with_text("kept");
        assert_eq!(extract_text(&p, true), "kept");

        let p = Element::new("p")
            .with_child(Element::new("br"))
            .with_text("second")
            .with_text("third");
        assert_eq!(extract_text(&p, true), "third");
    }

    #[test]
    fn too_few_children_is_empty() {
        let p = Element::new("p").with_text("only");
        assert_eq!(extract_text(&p, true), "");
        assert_eq!(extract_text(&Element::new("p"), true), "");
    }

    #[test]
    fn line_breaks_become_newlines() {
        let p = labelled(vec![
            Node::text("Line one"),
            Element::new("br").into(),
            Node::text("Line two"),
        ]);
        assert_eq!(extract_text(&p, true), "Line one\nLine two");
    }

    #[test]
    fn links_contribute_spaced_text() {
        let p = labelled(vec![
            Node::text("Apply at"),
            Element::new("a")
                .with_attr("href", "https://example.edu")
                .with_text("  example.edu ")
                .into(),
        ]);
        assert_eq!(extract_text(&p, true), "Apply at example.edu");
    }

    #[test]
    fn protected_email_is_decoded_with_space_prefix() {
        // key 0x5a, "a@b" => 3b 1a 38
        let p = Element::new("p")
            .with_child(Node::Other)
            .with_child(Node::Other)
            .with_child(
                Element::new("a")
                    .with_attr("data-cfemail", "5a3b1a38")
                    .with_text("[email protected]"),
            );
        assert_eq!(node_text(&p.children[2], true), " a@b");
        assert_eq!(extract_text(&p, true), "a@b");
    }

    #[test]
    fn protected_email_on_descendant_is_found() {
        let p = labelled(vec![Element::new("a")
            .with_attr("href", "/cdn-cgi/l/email-protection")
            .with_child(
                Element::new("span")
                    .with_attr("data-cfemail", "5a3b1a38")
                    .with_text("[email protected]"),
            )
            .into()]);
        assert_eq!(extract_text(&p, true), "a@b");
    }

    #[test]
    fn decoding_can_be_disabled() {
        let p = labelled(vec![Element::new("a")
            .with_attr("data-cfemail", "5a3b1a38")
            .with_text("[email protected]")
            .into()]);
        assert_eq!(extract_text(&p, false), "[email protected]");
    }

    #[test]
    fn other_elements_are_dropped() {
        let p = labelled(vec![
            Node::text("Kept"),
            Element::new("span").with_text(" dropped").into(),
        ]);
        assert_eq!(extract_text(&p, true), "Kept");
    }

    #[test]
    fn works_on_parsed_markup() {
        let doc = Document::parse(
            r#"<p><i class="fa fa-envelope"></i><b>Email:</b><a href="/cdn-cgi/l/email-protection" class="__cf_email__" data-cfemail="5a3b1a38">[email&#160;protected]</a></p>"#,
        );
        let p = doc.find_all("p")[0];
        assert_eq!(extract_text(p, true), "a@b");
    }
}
