//! The page controller: one explicit entry point that owns the view, the
//! cookies and every flow, and that each UI event is routed through.

use log::{debug, info, warn};

use crate::add_document::{AddDocumentFlow, EditedFields};
use crate::cookie::{CookieBackend, CookieStore};
use crate::flash::{FlashLifecycle, FlashMessage};
use crate::normalize::normalize;
use crate::render::render_document;
use crate::search::{SearchFlow, SearchRequest, SearchView};
use crate::{BusinessConfig, Document, Error};
use tags_states::TaskId;

/// Key code of the Enter key.
pub const ENTER_KEY: u32 = 13;

/// Regions of a card that the add-document template makes editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardRegion {
    Name,
    Tags,
    Body,
}

impl CardRegion {
    pub const ALL: [Self; 3] = [Self::Name, Self::Tags, Self::Body];

    /// Selector of the region relative to the card's mount point.
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Name => ".doc > .panel-heading > .name",
            Self::Tags => ".doc > .panel-heading > .tags",
            Self::Body => ".doc > .panel-body",
        }
    }
}

/// The slice of the DOM the controller works on. Elements are addressed by
/// id; a missing element turns writes into no-ops and reads into `None`.
pub trait PageView {
    fn set_html(&mut self, id: &str, html: &str);
    fn append_html(&mut self, id: &str, html: &str);
    fn prepend_html(&mut self, id: &str, html: &str);
    fn inner_html(&self, id: &str) -> Option<String>;

    /// Marks `region` of the first card under `id` as editable in place.
    fn set_editable(&mut self, id: &str, region: CardRegion);
    /// Current text of `region` of the first card under `id`.
    fn region_text(&self, id: &str, region: CardRegion) -> Option<String>;

    fn input_value(&self, id: &str) -> Option<String>;
    fn set_input_value(&mut self, id: &str, value: &str);
}

pub struct Page<V, B> {
    config: BusinessConfig,
    view: V,
    cookies: CookieStore<B>,
    flash: FlashLifecycle,
    add: AddDocumentFlow,
    search: SearchFlow,
}

/// Builds the page controller and runs the page-load work: the flash banner
/// and the add-document template.
pub fn init_page<V, B>(config: BusinessConfig, view: V, cookies: CookieStore<B>) -> Page<V, B>
where
    V: PageView,
    B: CookieBackend,
{
    let flash = FlashLifecycle::load(&config.flash_cookie, &cookies);
    let add = AddDocumentFlow::from_config(&config);
    let mut page = Page {
        config,
        view,
        cookies,
        flash,
        add,
        search: SearchFlow::new(),
    };

    page.show_flash();
    page.seed_template();
    page
}

impl<V: PageView, B: CookieBackend> Page<V, B> {
    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn cookies(&self) -> &CookieStore<B> {
        &self.cookies
    }

    /// Replaces the default add-document flow, e.g. to install a hook.
    pub fn set_add_flow(&mut self, flow: AddDocumentFlow) {
        self.add = flow;
    }

    /// Shows the pending flash message, if any. Later calls do nothing.
    pub fn show_flash(&mut self) -> Option<FlashMessage> {
        let message = self.flash.consume(&mut self.cookies)?;
        let banner = message.render(self.config.markup);
        self.view.prepend_html(&self.config.page.info, &banner);
        Some(message)
    }

    fn seed_template(&mut self) {
        let mount = &self.config.page.add_template;
        let markup = self.add.template_markup(self.config.markup);
        self.view.prepend_html(mount, &markup);
        for region in CardRegion::ALL {
            self.view.set_editable(mount, region);
        }
        debug!("add-document template mounted in #{mount}");
    }

    /// Reads the template card back into a record ready for submission.
    ///
    /// Fails with [`Error::MissingElement`] when the template card or one of
    /// its regions is no longer on the page.
    pub fn submit_template(&mut self) -> Result<Document, Error> {
        let mount = &self.config.page.add_template;
        let read = |region| {
            self.view
                .region_text(mount, region)
                .ok_or_else(|| Error::MissingElement { id: mount.clone() })
        };
        let fields = EditedFields {
            name: read(CardRegion::Name)?,
            content: read(CardRegion::Body)?,
            tags: read(CardRegion::Tags)?,
        };

        let doc = self.add.build(fields)?;
        info!("document ready for submission: {}", doc.name);
        Ok(doc)
    }

    /// Starts a search for the current query input.
    ///
    /// The results mount shows the loading text before this returns; the
    /// caller runs the request and passes its outcome to
    /// [`Page::finish_search`].
    pub fn search(&mut self) -> SearchRequest {
        let query = self
            .view
            .input_value(&self.config.page.search_input)
            .unwrap_or_default();

        self.view.set_html(
            &self.config.page.results,
            &SearchView::Loading.render(self.config.markup),
        );
        self.search.begin(&self.config, &query)
    }

    /// Keypress in the query input; only Enter starts a search.
    pub fn search_key(&mut self, key_code: u32) -> Option<SearchRequest> {
        (key_code == ENTER_KEY).then(|| self.search())
    }

    /// Applies a finished search. Returns `false` when the result was stale
    /// and the page was left alone.
    pub fn finish_search(&mut self, id: TaskId, result: Result<Vec<Document>, Error>) -> bool {
        let Some(view) = self.search.complete(id, result) else {
            return false;
        };

        let results = &self.config.page.results;
        match &view {
            SearchView::Results(docs) => {
                self.view.set_html(results, "");
                for doc in docs {
                    let card = render_document(doc, self.config.markup);
                    self.view.append_html(results, &card);
                }
            }
            other => self.view.set_html(results, &other.render(self.config.markup)),
        }
        true
    }

    /// Copies the plain text of the form's editable region into its hidden
    /// field. Never prevents the submission itself.
    pub fn on_form_submit(&mut self, form: &str) {
        for binding in self.config.forms.iter().filter(|b| b.form == form) {
            match self.view.inner_html(&binding.editable) {
                Some(markup) => {
                    let text = normalize(&markup);
                    self.view.set_input_value(&binding.field, &text);
                }
                None => warn!("form {form}: no editable #{}", binding.editable),
            }
        }
    }
}
