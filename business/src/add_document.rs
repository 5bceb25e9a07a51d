//! The editable template card used to add documents.
//!
//! The page shows a regular card whose name, tags and body are editable in
//! place. Submitting reads the three regions back into a [`Document`] of type
//! `text` and hands it to a [`DocumentSink`].

use std::fmt;

use log::info;
use serde::Deserialize;

use crate::document::split_tags;
use crate::http::Client;
use crate::render::{MarkupPolicy, render_document};
use crate::{BusinessConfig, DocType, Document, Error};

pub const TEMPLATE_NAME: &str = "Name of the doc";
pub const TEMPLATE_CONTENT: &str = "Content";
pub const TEMPLATE_TAG: &str = "private";

/// How the edited tags text becomes the record's tag list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    /// The whole text is a single tag; the server splits it.
    #[default]
    Raw,
    /// Split with the server's separators before submission.
    Split,
}

/// Built-in checks run before a record leaves the flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitCheck {
    #[default]
    AcceptAll,
    /// Refuse a record identical to the untouched template.
    RejectUnmodified,
}

/// Text read back from the editable regions of the template card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditedFields {
    pub name: String,
    pub content: String,
    pub tags: String,
}

type SubmitHook = Box<dyn Fn(&Document) -> Result<(), String>>;

pub struct AddDocumentFlow {
    template: Document,
    tag_mode: TagMode,
    check: SubmitCheck,
    hook: Option<SubmitHook>,
}

impl fmt::Debug for AddDocumentFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddDocumentFlow")
            .field("template", &self.template)
            .field("tag_mode", &self.tag_mode)
            .field("check", &self.check)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl AddDocumentFlow {
    pub fn new(tag_mode: TagMode, check: SubmitCheck) -> Self {
        Self {
            template: Document::new(TEMPLATE_NAME, DocType::Text, TEMPLATE_CONTENT, [TEMPLATE_TAG]),
            tag_mode,
            check,
            hook: None,
        }
    }

    pub fn from_config(config: &BusinessConfig) -> Self {
        Self::new(config.tag_mode, config.submit_check)
    }

    /// Adds a custom check that runs after the built-in one.
    pub fn with_hook(mut self, hook: impl Fn(&Document) -> Result<(), String> + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn template(&self) -> &Document {
        &self.template
    }

    pub fn template_markup(&self, policy: MarkupPolicy) -> String {
        render_document(&self.template, policy)
    }

    /// Builds the record to submit from the edited regions.
    pub fn build(&self, fields: EditedFields) -> Result<Document, Error> {
        let tags = match self.tag_mode {
            TagMode::Raw => vec![fields.tags],
            TagMode::Split => split_tags(&fields.tags),
        };
        let doc = Document::new(fields.name, DocType::Text, fields.content, tags);

        if self.check == SubmitCheck::RejectUnmodified && self.is_unmodified(&doc) {
            return Err(Error::Rejected("the template was not edited".to_owned()));
        }
        if let Some(hook) = &self.hook {
            hook(&doc).map_err(Error::Rejected)?;
        }

        Ok(doc)
    }

    fn is_unmodified(&self, doc: &Document) -> bool {
        doc.name == self.template.name
            && doc.content == self.template.content
            && doc.tags == self.template.tags
    }
}

/// Receives records produced by the add-document flow.
pub trait DocumentSink {
    /// Hands `doc` over; returns the stored record when the receiver sends
    /// one back.
    fn submit(&self, doc: Document) -> impl Future<Output = Result<Option<Document>, Error>>;
}

/// Logs the record and keeps it nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DocumentSink for LogSink {
    fn submit(&self, doc: Document) -> impl Future<Output = Result<Option<Document>, Error>> {
        info!("new document: {doc:?}");
        std::future::ready(Ok(None))
    }
}

/// Posts the record as JSON to the API's create route.
#[derive(Debug, Clone)]
pub struct ApiSink {
    url: String,
}

impl ApiSink {
    pub fn new(config: &BusinessConfig) -> Self {
        Self {
            url: format!("{}/", config.api_url()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DocumentSink for ApiSink {
    async fn submit(&self, doc: Document) -> Result<Option<Document>, Error> {
        let response = Client::post(&self.url).json(&doc)?.send().await?;
        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.text().unwrap_or_default(),
            });
        }

        let stored: Document = response.json()?;
        info!("stored document {:?} ({})", stored.id, stored.name);
        Ok(Some(stored))
    }
}

/// Where submitted records go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitTarget {
    #[default]
    Log,
    Api,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, content: &str, tags: &str) -> EditedFields {
        EditedFields {
            name: name.to_owned(),
            content: content.to_owned(),
            tags: tags.to_owned(),
        }
    }

    #[test]
    fn template_placeholder_values() {
        let flow = AddDocumentFlow::new(TagMode::Raw, SubmitCheck::AcceptAll);
        let template = flow.template();

        assert_eq!(template.name, "Name of the doc");
        assert_eq!(template.kind, DocType::Text);
        assert_eq!(template.content, "Content");
        assert_eq!(template.tags, vec!["private"]);
        assert!(
            flow.template_markup(MarkupPolicy::Escaped)
                .contains(r#"<div class="tags">private</div>"#)
        );
    }

    #[test]
    fn raw_tags_stay_one_string() {
        let flow = AddDocumentFlow::new(TagMode::Raw, SubmitCheck::AcceptAll);
        let doc = flow.build(fields("Notes", "body", "rust, web")).unwrap();

        assert_eq!(doc.kind, DocType::Text);
        assert_eq!(doc.tags, vec!["rust, web"]);
    }

    #[test]
    fn split_mode_uses_server_separators() {
        let flow = AddDocumentFlow::new(TagMode::Split, SubmitCheck::AcceptAll);
        let doc = flow.build(fields("Notes", "body", "rust, web")).unwrap();
        assert_eq!(doc.tags, vec!["rust", "web"]);
    }

    #[test]
    fn unmodified_template_passes_by_default() {
        let flow = AddDocumentFlow::new(TagMode::Raw, SubmitCheck::AcceptAll);
        let doc = flow
            .build(fields(TEMPLATE_NAME, TEMPLATE_CONTENT, TEMPLATE_TAG))
            .unwrap();
        assert_eq!(&doc, flow.template());
    }

    #[test]
    fn unmodified_template_can_be_rejected() {
        let flow = AddDocumentFlow::new(TagMode::Raw, SubmitCheck::RejectUnmodified);

        let result = flow.build(fields(TEMPLATE_NAME, TEMPLATE_CONTENT, TEMPLATE_TAG));
        assert!(matches!(result, Err(Error::Rejected(_))));

        assert!(
            flow.build(fields("Edited", TEMPLATE_CONTENT, TEMPLATE_TAG))
                .is_ok()
        );
    }

    #[test]
    fn custom_hook_runs() {
        let flow = AddDocumentFlow::new(TagMode::Raw, SubmitCheck::AcceptAll).with_hook(|doc| {
            if doc.content.trim().is_empty() {
                Err("empty content".to_owned())
            } else {
                Ok(())
            }
        });

        assert!(flow.build(fields("n", "  ", "t")).is_err());
        assert!(flow.build(fields("n", "x", "t")).is_ok());
    }

    #[test]
    fn api_sink_targets_create_route() {
        let sink = ApiSink::new(&BusinessConfig::new("http://tags.local"));
        assert_eq!(sink.url(), "http://tags.local/api/");
    }
}
