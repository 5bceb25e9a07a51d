//! An in-memory page for driving the controller without a browser.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use regex::Regex;
use tags_business::{
    BusinessConfig, CardRegion, CookieStore, MemoryCookies, Page, PageView, init_page,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Element contents keyed by id. Region reads come from the first card's
/// markup unless the test typed something into the region.
#[derive(Debug, Default)]
pub struct FakeView {
    pub html: HashMap<String, String>,
    pub inputs: HashMap<String, String>,
    pub editable: HashSet<(String, CardRegion)>,
    typed: HashMap<(String, CardRegion), String>,
}

impl FakeView {
    /// A view holding the given (empty) element ids.
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            html: ids
                .iter()
                .map(|id| ((*id).to_owned(), String::new()))
                .collect(),
            ..Self::default()
        }
    }

    /// Every element the default page layout needs.
    pub fn standard() -> Self {
        Self::with_ids(&["adddoc", "addb", "searchq", "searchb", "docs", "info"])
    }

    pub fn html_of(&self, id: &str) -> &str {
        self.html.get(id).map(String::as_str).unwrap_or_default()
    }

    pub fn input_value_of(&self, id: &str) -> Option<&str> {
        self.inputs.get(id).map(String::as_str)
    }

    /// Simulates the user editing a region in place.
    pub fn type_into(&mut self, id: &str, region: CardRegion, text: &str) {
        assert!(
            self.editable.contains(&(id.to_owned(), region)),
            "{region:?} of #{id} is not editable"
        );
        self.typed.insert((id.to_owned(), region), text.to_owned());
    }

    fn region_pattern(region: CardRegion) -> Regex {
        let pattern = match region {
            CardRegion::Name => r#"<span class="name">(.*?)</span>"#,
            CardRegion::Tags => r#"<div class="tags">(.*?)</div>"#,
            CardRegion::Body => r#"<div class="panel-body">(.*?)</div></div>"#,
        };
        Regex::new(pattern).unwrap()
    }
}

impl PageView for FakeView {
    fn set_html(&mut self, id: &str, html: &str) {
        if let Some(slot) = self.html.get_mut(id) {
            *slot = html.to_owned();
        }
    }

    fn append_html(&mut self, id: &str, html: &str) {
        if let Some(slot) = self.html.get_mut(id) {
            slot.push_str(html);
        }
    }

    fn prepend_html(&mut self, id: &str, html: &str) {
        if let Some(slot) = self.html.get_mut(id) {
            slot.insert_str(0, html);
        }
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.html.get(id).cloned()
    }

    fn set_editable(&mut self, id: &str, region: CardRegion) {
        if self.html.contains_key(id) {
            self.editable.insert((id.to_owned(), region));
        }
    }

    fn region_text(&self, id: &str, region: CardRegion) -> Option<String> {
        if let Some(text) = self.typed.get(&(id.to_owned(), region)) {
            return Some(text.clone());
        }
        let html = self.html.get(id)?;
        Self::region_pattern(region)
            .captures(html)
            .map(|caps| caps[1].to_owned())
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.inputs.get(id).cloned()
    }

    fn set_input_value(&mut self, id: &str, value: &str) {
        self.inputs.insert(id.to_owned(), value.to_owned());
    }
}

pub fn page_with(
    config: BusinessConfig,
    view: FakeView,
    cookie_header: &str,
) -> Page<FakeView, MemoryCookies> {
    init_logger();
    init_page(
        config,
        view,
        CookieStore::new(MemoryCookies::from_header(cookie_header)),
    )
}

pub fn default_page() -> Page<FakeView, MemoryCookies> {
    page_with(BusinessConfig::default(), FakeView::standard(), "")
}
