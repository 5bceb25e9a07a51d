use std::env::vars;

use log::info;
use serde::Deserialize;

use crate::add_document::{SubmitCheck, SubmitTarget, TagMode};
use crate::flash::FLASH_COOKIE;
use crate::render::MarkupPolicy;
use crate::Error;

/// Element ids the page controller expects in the surrounding page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageIds {
    /// Mount point of the add-document template card.
    pub add_template: String,
    /// Control that submits the template card.
    pub add_button: String,
    /// Free-text search input.
    pub search_input: String,
    /// Control that starts a search.
    pub search_button: String,
    /// Mount point of search results.
    pub results: String,
    /// Mount point of the flash banner.
    pub info: String,
}

impl Default for PageIds {
    fn default() -> Self {
        Self {
            add_template: "adddoc".to_owned(),
            add_button: "addb".to_owned(),
            search_input: "searchq".to_owned(),
            search_button: "searchb".to_owned(),
            results: "docs".to_owned(),
            info: "info".to_owned(),
        }
    }
}

/// A form whose rich-text region is copied, as plain text, into a hidden
/// field when the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormBinding {
    pub form: String,
    pub editable: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// Origin of the tags API; empty means same origin.
    pub api_base_url: String,
    pub markup: MarkupPolicy,
    pub flash_cookie: String,
    pub tag_mode: TagMode,
    pub submit_check: SubmitCheck,
    pub submit_target: SubmitTarget,
    pub page: PageIds,
    pub forms: Vec<FormBinding>,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            markup: MarkupPolicy::default(),
            flash_cookie: FLASH_COOKIE.to_owned(),
            tag_mode: TagMode::default(),
            submit_check: SubmitCheck::default(),
            submit_target: SubmitTarget::default(),
            page: PageIds::default(),
            forms: Vec::new(),
        }
    }
}

// Flat view of the `TAGS_*` environment variables.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    markup: Option<MarkupPolicy>,
    flash_cookie: Option<String>,
    tag_mode: Option<TagMode>,
    submit_check: Option<SubmitCheck>,
    submit_target: Option<SubmitTarget>,
}

impl BusinessConfig {
    pub const ENV_PREFIX: &'static str = "TAGS_";

    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Builds a configuration from `TAGS_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(vars())
    }

    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, Error>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let prefixed: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_ref()
                    .strip_prefix(Self::ENV_PREFIX)
                    .map(|key| (key.to_owned(), value.as_ref().to_owned()))
            })
            .collect();

        let raw: RawConfig = serde_env::from_iter(prefixed)
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Parses the JSON blob a page embeds for configuration.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let RawConfig {
            api_base_url,
            markup,
            flash_cookie,
            tag_mode,
            submit_check,
            submit_target,
        } = raw;
        let defaults = Self::default();

        let config = Self {
            api_base_url: api_base_url.unwrap_or(defaults.api_base_url),
            markup: markup.unwrap_or(defaults.markup),
            flash_cookie: flash_cookie.unwrap_or(defaults.flash_cookie),
            tag_mode: tag_mode.unwrap_or(defaults.tag_mode),
            submit_check: submit_check.unwrap_or(defaults.submit_check),
            submit_target: submit_target.unwrap_or(defaults.submit_target),
            ..defaults
        };
        info!(
            "api at {:?}, markup {:?}, flash cookie {}",
            config.api_url(),
            config.markup,
            config.flash_cookie
        );
        config
    }

    pub fn api_url(&self) -> String {
        if self.api_base_url.is_empty() {
            "/api".to_owned()
        } else {
            format!("{}/api", self.api_base_url.trim_end_matches('/'))
        }
    }
}
