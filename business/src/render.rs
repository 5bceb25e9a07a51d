//! Document cards as HTML fragments.

use std::borrow::Cow;

use serde::Deserialize;

use crate::Document;

/// How untrusted text is placed into markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupPolicy {
    /// HTML-escape every interpolated value.
    #[default]
    Escaped,
    /// Insert values as-is. Only for content from a trusted source.
    Raw,
}

impl MarkupPolicy {
    pub fn text<'a>(&self, input: &'a str) -> Cow<'a, str> {
        match self {
            Self::Escaped => html_escape(input),
            Self::Raw => Cow::Borrowed(input),
        }
    }
}

pub fn html_escape(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// The two header controls of a card, keyed by their `data-action` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Removes the card from the page.
    Dismiss,
    /// Shows or hides the card body.
    Collapse,
}

impl CardAction {
    pub const ATTRIBUTE: &'static str = "data-action";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dismiss => "dismiss",
            Self::Collapse => "collapse",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "dismiss" => Some(Self::Dismiss),
            "collapse" => Some(Self::Collapse),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Dismiss => "&times;",
            Self::Collapse => "^",
        }
    }

    fn button(&self) -> String {
        format!(
            r#"<button class="close" {}="{}">{}</button>"#,
            Self::ATTRIBUTE,
            self.as_str(),
            self.label()
        )
    }
}

/// Renders the body of a card: a link for `url` documents, the content
/// itself for every other type.
pub fn render_content(doc: &Document, policy: MarkupPolicy) -> String {
    let content = policy.text(&doc.content);
    if doc.kind.is_url() {
        format!(r#"<a href="{content}">{content}</a>"#)
    } else {
        content.into_owned()
    }
}

/// Renders one document as a card fragment.
pub fn render_document(doc: &Document, policy: MarkupPolicy) -> String {
    let mut html = String::from(r#"<div class="doc panel">"#);

    html.push_str(r#"<div class="panel-heading">"#);
    html.push_str(&format!(
        r#"<span class="name">{}</span>"#,
        policy.text(&doc.name)
    ));
    html.push_str(&CardAction::Dismiss.button());
    html.push_str(&CardAction::Collapse.button());
    html.push_str(&format!(
        r#"<div class="tags">{}</div>"#,
        policy.text(&doc.joined_tags())
    ));
    html.push_str("</div>");

    html.push_str(r#"<div class="panel-body">"#);
    html.push_str(&render_content(doc, policy));
    html.push_str("</div>");

    html.push_str("</div>");
    html
}
