//! Module entry point: builds the page controller and wires DOM events to it.
//!
//! The controller lives in an `Rc<RefCell<..>>` shared by every listener.
//! Borrows never span an `.await`, so listeners and spawned requests cannot
//! overlap.

use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, debug, error, info, warn};
use tags_business::{
    ApiSink, BusinessConfig, CardAction, CookieStore, Document, DocumentSink, LogSink, Page,
    SearchRequest, SubmitTarget, init_page,
};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget, HtmlDocument, KeyboardEvent};

use crate::boot::{CONFIG_SCRIPT_ID, anchor_api, config_from_script};
use crate::cookies::DocumentCookies;
use crate::dom::DomView;

type SharedPage = Rc<RefCell<Page<DomView, DocumentCookies>>>;

#[wasm_bindgen(start)]
pub fn start() {
    if let Err(e) = console_log::init_with_level(Level::Debug) {
        warn!("console logger not installed: {e}");
    }

    if let Err(e) = run() {
        error!("tags page failed to start: {e:?}");
    }
}

fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let script = document.get_element_by_id(CONFIG_SCRIPT_ID);
    let config = anchor_api(
        config_from_script(script.and_then(|s| s.text_content()).as_deref()),
        &window.location().origin()?,
    );

    let cookies = DocumentCookies::new(document.clone().dyn_into::<HtmlDocument>()?);
    let page: SharedPage = Rc::new(RefCell::new(init_page(
        config.clone(),
        DomView::new(document.clone()),
        CookieStore::new(cookies),
    )));

    wire_add_document(&document, &config, &page)?;
    wire_search(&document, &config, &page)?;
    wire_forms(&document, &config, &page)?;
    let template = config.page.add_template.clone();
    listen(&document, "click", move |event| on_card_click(event, &template))?;

    info!("tags page ready");
    Ok(())
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_on_id(
    document: &web_sys::Document,
    id: &str,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    match document.get_element_by_id(id) {
        Some(element) => listen(&element, event, handler),
        None => {
            warn!("no #{id}, {event} is not handled");
            Ok(())
        }
    }
}

fn wire_add_document(
    document: &web_sys::Document,
    config: &BusinessConfig,
    page: &SharedPage,
) -> Result<(), JsValue> {
    let page = Rc::clone(page);
    let target = config.submit_target;
    let sink = ApiSink::new(config);

    listen_on_id(document, &config.page.add_button, "click", move |_| {
        let built = page.borrow_mut().submit_template();
        match built {
            Ok(doc) => spawn_local(hand_off(target, sink.clone(), doc)),
            Err(e) => warn!("document not submitted: {e}"),
        }
    })
}

async fn hand_off(target: SubmitTarget, api: ApiSink, doc: Document) {
    let result = match target {
        SubmitTarget::Log => LogSink.submit(doc).await,
        SubmitTarget::Api => api.submit(doc).await,
    };
    match result {
        Ok(Some(stored)) => info!("document {:?} stored", stored.id),
        Ok(None) => debug!("document handed off"),
        Err(e) => error!("document submission failed: {e}"),
    }
}

fn wire_search(
    document: &web_sys::Document,
    config: &BusinessConfig,
    page: &SharedPage,
) -> Result<(), JsValue> {
    let on_click = Rc::clone(page);
    listen_on_id(document, &config.page.search_button, "click", move |_| {
        let request = on_click.borrow_mut().search();
        spawn_search(&on_click, request);
    })?;

    let on_key = Rc::clone(page);
    listen_on_id(document, &config.page.search_input, "keypress", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let request = on_key.borrow_mut().search_key(key.key_code());
        if let Some(request) = request {
            spawn_search(&on_key, request);
        }
    })
}

fn spawn_search(page: &SharedPage, request: SearchRequest) {
    let page = Rc::clone(page);
    spawn_local(async move {
        let Some(result) = request.execute().await else {
            debug!("search {} cancelled", request.id());
            return;
        };
        page.borrow_mut().finish_search(request.id(), result);
    });
}

fn wire_forms(
    document: &web_sys::Document,
    config: &BusinessConfig,
    page: &SharedPage,
) -> Result<(), JsValue> {
    let mut forms: Vec<&str> = config.forms.iter().map(|b| b.form.as_str()).collect();
    forms.sort_unstable();
    forms.dedup();

    for form in forms {
        let page = Rc::clone(page);
        let name = form.to_owned();
        listen_on_id(document, form, "submit", move |_| {
            page.borrow_mut().on_form_submit(&name);
        })?;
    }
    Ok(())
}

/// Delegated handler for the card header buttons and banner close buttons.
///
/// The add-document template under `#template` can be collapsed but never
/// dismissed.
fn on_card_click(event: Event, template: &str) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    if let Ok(Some(close)) = target.closest(r#"[data-dismiss="alert"]"#) {
        if let Ok(Some(banner)) = close.closest(".alert") {
            banner.remove();
        }
        return;
    }

    let Ok(Some(button)) = target.closest(&format!("[{}]", CardAction::ATTRIBUTE)) else {
        return;
    };
    let action = button
        .get_attribute(CardAction::ATTRIBUTE)
        .and_then(|value| CardAction::from_attr(&value));
    let Some(action) = action else {
        return;
    };
    let Ok(Some(card)) = button.closest(".doc") else {
        return;
    };

    match action {
        CardAction::Dismiss => {
            let in_template = card
                .parent_element()
                .is_some_and(|parent| parent.id() == template);
            if in_template {
                debug!("the add-document template stays on the page");
            } else {
                card.remove();
            }
        }
        CardAction::Collapse => {
            if let Ok(Some(body)) = card.query_selector(".panel-body") {
                if let Err(e) = body.toggle_attribute("hidden") {
                    warn!("cannot collapse card: {e:?}");
                }
            }
        }
    }
}
