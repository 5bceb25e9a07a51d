//! Client-side logic of the tags document page.
//!
//! Everything here is platform independent: the DOM, the cookie jar and the
//! network sit behind [`PageView`], [`CookieBackend`] and the [`http`] client,
//! so the whole page can be driven from native tests.

mod add_document;
mod config;
mod cookie;
mod document;
mod error;
mod flash;
pub mod http;
mod normalize;
mod page;
mod render;
mod search;

pub use add_document::{
    AddDocumentFlow, ApiSink, DocumentSink, EditedFields, LogSink, SubmitCheck, SubmitTarget,
    TEMPLATE_CONTENT, TEMPLATE_NAME, TEMPLATE_TAG, TagMode,
};
pub use config::{BusinessConfig, FormBinding, PageIds};
pub use cookie::{CookieBackend, CookieStore, EXPIRES_FORMAT, MemoryCookies};
pub use document::{DocType, Document, TAG_SEP, split_tags};
pub use error::Error;
pub use flash::{FLASH_COOKIE, FlashLevel, FlashLifecycle, FlashMessage, FlashState};
pub use normalize::normalize;
pub use page::{CardRegion, ENTER_KEY, Page, PageView, init_page};
pub use render::{CardAction, MarkupPolicy, html_escape, render_content, render_document};
pub use search::{
    FAILED_TEXT, LOADING_TEXT, NO_RESULTS_TEXT, SearchFlow, SearchRequest, SearchView,
    collapse_first_whitespace, decode_documents, fetch_documents, search_path, search_url,
};

pub use tags_states::TaskId;
