use std::collections::HashSet;

use ammonia::Builder;

/// Cleans rich-text editor HTML for blog content. Allows a safe subset of
/// formatting tags and strips all scripting capability (`onclick`,
/// `onerror`, inline scripts).
pub fn sanitize_rich_content(html_input: &str) -> String {
    let tags_to_allow = [
        "h1", "h2", "h3", "h4", "h5", "h6", "b", "strong", "i", "em", "p", "br", "a", "ul", "ol",
        "li", "blockquote", "code", "pre", "hr", "img", "s", "del",
    ];
    let safe_tags = tags_to_allow.iter().cloned().collect::<HashSet<_>>();

    let safe_attributes = ["src", "href", "alt", "title", "class", "width", "height"];
    let generic_attributes = safe_attributes.iter().cloned().collect::<HashSet<_>>();

    Builder::new()
        .tags(safe_tags)
        .generic_attributes(generic_attributes)
        .link_rel(Some("nofollow ugc"))
        .clean(html_input)
        .to_string()
}

/// Strips all HTML tags, leaving only text content. For single-line fields
/// like titles, authors, and excerpts.
pub fn strip_all_html(input: &str) -> String {
    Builder::new()
        .tags(HashSet::new())
        .clean(input)
        .to_string()
}
