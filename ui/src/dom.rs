//! [`PageView`] over the live document.

use log::warn;
use tags_business::{CardRegion, PageView};
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlInputElement};

pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            warn!("no element #{id} on the page");
        }
        element
    }

    fn region(&self, id: &str, region: CardRegion) -> Option<Element> {
        self.element(id)?
            .query_selector(region.selector())
            .ok()
            .flatten()
    }

    fn insert(&self, id: &str, position: &str, html: &str) {
        if let Some(element) = self.element(id) {
            if let Err(e) = element.insert_adjacent_html(position, html) {
                warn!("cannot insert into #{id}: {e:?}");
            }
        }
    }

    fn input(&self, id: &str) -> Option<HtmlInputElement> {
        self.element(id)?.dyn_into::<HtmlInputElement>().ok()
    }
}

impl PageView for DomView {
    fn set_html(&mut self, id: &str, html: &str) {
        if let Some(element) = self.element(id) {
            element.set_inner_html(html);
        }
    }

    fn append_html(&mut self, id: &str, html: &str) {
        self.insert(id, "beforeend", html);
    }

    fn prepend_html(&mut self, id: &str, html: &str) {
        self.insert(id, "afterbegin", html);
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.element(id).map(|element| element.inner_html())
    }

    fn set_editable(&mut self, id: &str, region: CardRegion) {
        match self.region(id, region) {
            Some(element) => {
                if let Err(e) = element.set_attribute("contenteditable", "true") {
                    warn!("cannot make {region:?} of #{id} editable: {e:?}");
                }
            }
            None => warn!("#{id} has no {region:?} region"),
        }
    }

    fn region_text(&self, id: &str, region: CardRegion) -> Option<String> {
        self.region(id, region)?.text_content()
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.input(id).map(|input| input.value())
    }

    fn set_input_value(&mut self, id: &str, value: &str) {
        match self.input(id) {
            Some(input) => input.set_value(value),
            None => warn!("#{id} is not an input"),
        }
    }
}
