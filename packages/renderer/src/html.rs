use potatopay_schema::StyleMap;

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `<div class=".." style="..">inner</div>`; empty attributes are omitted
pub(crate) fn container(class_name: Option<&str>, style: &StyleMap, inner: &str) -> String {
    container_with(&[], class_name, style, inner)
}

/// Container with extra leading attributes (already-trusted names)
pub(crate) fn container_with(
    attributes: &[(&str, &str)],
    class_name: Option<&str>,
    style: &StyleMap,
    inner: &str,
) -> String {
    let mut html = String::from("<div");

    for (name, value) in attributes {
        html.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if let Some(class_name) = class_name.map(str::trim).filter(|c| !c.is_empty()) {
        html.push_str(&format!(" class=\"{}\"", escape_html(class_name)));
    }

    let inline = style.to_inline();
    if !inline.is_empty() {
        html.push_str(&format!(" style=\"{}\"", escape_html(&inline)));
    }

    html.push('>');
    html.push_str(inner);
    html.push_str("</div>");
    html
}
