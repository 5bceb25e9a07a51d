use log::warn;
use tags_business::CookieBackend;
use web_sys::HtmlDocument;

/// `document.cookie` of the live page.
pub struct DocumentCookies {
    document: HtmlDocument,
}

impl DocumentCookies {
    pub fn new(document: HtmlDocument) -> Self {
        Self { document }
    }
}

impl CookieBackend for DocumentCookies {
    fn read(&self) -> String {
        self.document.cookie().unwrap_or_else(|e| {
            warn!("document.cookie is not readable: {e:?}");
            String::new()
        })
    }

    fn write(&mut self, assignment: &str) {
        if let Err(e) = self.document.set_cookie(assignment) {
            warn!("document.cookie is not writable: {e:?}");
        }
    }
}
