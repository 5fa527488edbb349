//! Tag name to DOM interface name resolution.
//!
//! Known HTML tags map through a static table. Unknown tags are synthesized
//! from their name: `div` becomes `HTMLDivElement` and a custom element such as
//! `my-widget` becomes `MyWidgetElement`.

/// Tag name used for template definitions.
pub const TEMPLATE_TAG: &str = "template";

/// Interface used when a template has no tag name to resolve.
const TEMPLATE_ELEMENT: &str = "HTMLTemplateElement";

/// Prefix for synthesized interface names of plain (non custom-element) tags.
const HTML_PREFIX: &str = "HTML";

/// Resolve the element interface name for a tag.
///
/// `None` stands for an unnamed template definition and resolves to
/// `HTMLTemplateElement`. Non-empty `type_args` are appended verbatim as a
/// generic argument list, e.g. `List` with `["Item"]` gives
/// `HTMLListElement<Item>`.
///
/// # Examples
///
/// ```
/// use html_typings::core::tag_type::resolve_tag_type;
///
/// assert_eq!(resolve_tag_type(Some("h3"), &[]), "HTMLHeadingElement");
/// assert_eq!(resolve_tag_type(Some("div"), &[]), "HTMLDivElement");
/// assert_eq!(resolve_tag_type(Some("my-widget"), &[]), "MyWidgetElement");
/// assert_eq!(resolve_tag_type(None, &[]), "HTMLTemplateElement");
/// ```
pub fn resolve_tag_type(name: Option<&str>, type_args: &[String]) -> String {
    let base = match name {
        None => TEMPLATE_ELEMENT.to_string(),
        Some(name) => match known_tag_type(name) {
            Some(known) => known.to_string(),
            None => synthesize_type_name(name),
        },
    };

    if type_args.is_empty() {
        base
    } else {
        format!("{}<{}>", base, type_args.join(","))
    }
}

fn known_tag_type(name: &str) -> Option<&'static str> {
    let ty = match name {
        "svg" => "SVGElement",
        "textarea" => "HTMLTextAreaElement",
        "a" => "HTMLAnchorElement",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "HTMLHeadingElement",
        "br" => "HTMLBRElement",
        "img" => "HTMLImageElement",
        "hr" => "HTMLHRElement",
        "li" => "HTMLLIElement",
        "ol" => "HTMLOListElement",
        "p" => "HTMLParagraphElement",
        "ul" => "HTMLUListElement",
        "tbody" | "thead" | "td" => "HTMLTableDataCellElement",
        "tfoot" => "HTMLTableSectionElement",
        "th" => "HTMLTableHeaderCellElement",
        "tr" => "HTMLTableRowElement",
        "datalist" => "HTMLDataListElement",
        "fieldset" => "HTMLFieldSetElement",
        "optgroup" => "HTMLOptGroupElement",
        "frameset" => "HTMLFrameSetElement",
        "b" | "address" | "article" | "aside" | "footer" | "header" | "hgroup" | "nav"
        | "section" | "blockquote" | "dd" | "dl" | "dt" | "figcaption" | "figures" | "figure"
        | "main" | "abbr" | "bdi" | "cite" | "code" | "dfn" | "em" | "i" | "kbd" | "mark"
        | "q" | "rp" | "rt" | "rtc" | "ruby" | "s" | "samp" | "small" | "strong" | "sup"
        | "var" | "wbr" | "noscript" | "del" | "ins" | "caption" | "col" | "colgroup"
        | "details" | "dialog" | "menuitem" | "summary" | "content" | "element" | "shadw"
        | "acronym" | "basefront" | "big" | "blink" | "center" | "command" | "dir"
        | "isindex" | "key" | "listing" | "multicol" | "nextid" | "noembed" | "plaintext"
        | "spacer" | "strike" | "tt" | "xmp" | "shadow" | "sub" | "u" => "HTMLElement",
        _ => return None,
    };
    Some(ty)
}

/// Build `Prefix + PascalCase(name) + "Element"`.
///
/// Custom element names (those containing a hyphen) get no prefix.
fn synthesize_type_name(name: &str) -> String {
    let prefix = if name.contains('-') { "" } else { HTML_PREFIX };
    let pascal: String = name
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    format!("{}{}Element", prefix, pascal)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_entries() {
        assert_eq!(resolve_tag_type(Some("svg"), &[]), "SVGElement");
        assert_eq!(resolve_tag_type(Some("a"), &[]), "HTMLAnchorElement");
        assert_eq!(resolve_tag_type(Some("h1"), &[]), "HTMLHeadingElement");
        assert_eq!(resolve_tag_type(Some("h6"), &[]), "HTMLHeadingElement");
        assert_eq!(resolve_tag_type(Some("td"), &[]), "HTMLTableDataCellElement");
        assert_eq!(resolve_tag_type(Some("thead"), &[]), "HTMLTableDataCellElement");
        assert_eq!(resolve_tag_type(Some("tfoot"), &[]), "HTMLTableSectionElement");
        assert_eq!(resolve_tag_type(Some("th"), &[]), "HTMLTableHeaderCellElement");
        assert_eq!(resolve_tag_type(Some("fieldset"), &[]), "HTMLFieldSetElement");
    }

    #[test]
    fn test_generic_html_element_tags() {
        for tag in ["b", "article", "section", "em", "strong", "center", "u", "sub"] {
            assert_eq!(resolve_tag_type(Some(tag), &[]), "HTMLElement", "tag {tag}");
        }
    }

    #[test]
    fn test_unknown_tags_are_synthesized() {
        assert_eq!(resolve_tag_type(Some("div"), &[]), "HTMLDivElement");
        assert_eq!(resolve_tag_type(Some("span"), &[]), "HTMLSpanElement");
        assert_eq!(resolve_tag_type(Some("template"), &[]), "HTMLTemplateElement");
        assert_eq!(resolve_tag_type(Some("WebComponent"), &[]), "HTMLWebComponentElement");
    }

    #[test]
    fn test_custom_elements_drop_prefix() {
        assert_eq!(resolve_tag_type(Some("my-widget"), &[]), "MyWidgetElement");
        assert_eq!(resolve_tag_type(Some("my-el"), &[]), "MyElElement");
        assert_eq!(resolve_tag_type(Some("dom-module"), &[]), "DomModuleElement");
        assert_eq!(resolve_tag_type(Some("x--y"), &[]), "XYElement");
    }

    #[test]
    fn test_absent_name_is_template() {
        assert_eq!(resolve_tag_type(None, &[]), "HTMLTemplateElement");
    }

    #[test]
    fn test_type_arguments_are_appended() {
        let args = vec!["Item".to_string(), "string".to_string()];
        assert_eq!(resolve_tag_type(Some("List"), &args), "HTMLListElement<Item,string>");
        assert_eq!(
            resolve_tag_type(Some("h2"), &args[..1]),
            "HTMLHeadingElement<Item>"
        );
    }
}
