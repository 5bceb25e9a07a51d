//! One-shot flash messages carried by the `tags-info` cookie.
//!
//! The server stores the message with spaces turned into underscores; errors
//! are prefixed with `Error:`. The page shows the message once as a banner and
//! erases the cookie.

use log::{debug, info};

use crate::cookie::{CookieBackend, CookieStore};
use crate::render::MarkupPolicy;

pub const FLASH_COOKIE: &str = "tags-info";

const ERROR_PREFIX: &str = "Error:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Error,
}

impl FlashLevel {
    /// Banner class for this level.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Info => "alert alert-info",
            Self::Error => "alert alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    level: FlashLevel,
    text: String,
}

impl FlashMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            text: text.into(),
        }
    }

    /// An error message; the text is shown after an `Error: ` prefix.
    pub fn error(text: impl AsRef<str>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: format!("{ERROR_PREFIX} {}", text.as_ref()),
        }
    }

    /// Decodes a stored cookie value.
    pub fn decode(raw: &str) -> Self {
        let text = raw.replace('_', " ");
        let level = if text.starts_with(ERROR_PREFIX) {
            FlashLevel::Error
        } else {
            FlashLevel::Info
        };
        Self { level, text }
    }

    /// The cookie value for this message.
    pub fn encode(&self) -> String {
        self.text.replace(' ', "_")
    }

    pub fn level(&self) -> FlashLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// A dismissible banner.
    pub fn render(&self, policy: MarkupPolicy) -> String {
        format!(
            r#"<div class="{}"><button type="button" class="close" data-dismiss="alert">&times;</button>{}</div>"#,
            self.level.class(),
            policy.text(&self.text)
        )
    }
}

/// Where the page is with its flash message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashState {
    /// No message was waiting when the page loaded.
    Absent,
    /// A message is stored and has not been shown yet.
    Pending(String),
    /// The message was shown and its cookie erased.
    Consumed,
}

/// Shows the stored flash message at most once per page load.
#[derive(Debug)]
pub struct FlashLifecycle {
    cookie: String,
    state: FlashState,
}

impl FlashLifecycle {
    /// Reads the cookie; an absent or empty value leaves nothing to show.
    pub fn load<B: CookieBackend>(cookie: &str, store: &CookieStore<B>) -> Self {
        let state = match store.get(cookie) {
            Some(raw) if !raw.is_empty() => FlashState::Pending(raw),
            _ => FlashState::Absent,
        };
        debug!("flash cookie {cookie}: {state:?}");
        Self {
            cookie: cookie.to_owned(),
            state,
        }
    }

    pub fn state(&self) -> &FlashState {
        &self.state
    }

    /// Takes the pending message and erases its cookie. An empty cookie is
    /// erased too, without a message.
    ///
    /// Returns `None` when there was no message or it was already consumed.
    pub fn consume<B: CookieBackend>(&mut self, store: &mut CookieStore<B>) -> Option<FlashMessage> {
        match std::mem::replace(&mut self.state, FlashState::Consumed) {
            FlashState::Pending(raw) => {
                let message = FlashMessage::decode(&raw);
                store.erase(&self.cookie);
                info!("flash message ({:?}): {}", message.level(), message.text());
                Some(message)
            }
            FlashState::Absent => {
                self.state = FlashState::Absent;
                // An empty leftover carries no message but is cleared all the same.
                if store.get(&self.cookie).is_some() {
                    store.erase(&self.cookie);
                }
                None
            }
            FlashState::Consumed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::MemoryCookies;

    fn store_with(value: &str) -> CookieStore<MemoryCookies> {
        let mut store = CookieStore::new(MemoryCookies::new());
        store.set(FLASH_COOKIE, value, None);
        store
    }

    #[test]
    fn decode_error_message() {
        let message = FlashMessage::decode("Error:_bad_thing");
        assert_eq!(message.text(), "Error: bad thing");
        assert_eq!(message.level(), FlashLevel::Error);
    }

    #[test]
    fn decode_info_message() {
        let message = FlashMessage::decode("Saved_ok");
        assert_eq!(message.text(), "Saved ok");
        assert_eq!(message.level(), FlashLevel::Info);
    }

    #[test]
    fn error_prefix_must_lead() {
        let message = FlashMessage::decode("Not_an_Error:_really");
        assert_eq!(message.level(), FlashLevel::Info);
    }

    #[test]
    fn encode_matches_server_format() {
        assert_eq!(
            FlashMessage::error("Wrong token/email/name").encode(),
            "Error:_Wrong_token/email/name"
        );
        assert_eq!(
            FlashMessage::info("Check your AAS account!").encode(),
            "Check_your_AAS_account!"
        );
        assert_eq!(
            FlashMessage::decode(&FlashMessage::error("x y").encode()).level(),
            FlashLevel::Error
        );
    }

    #[test]
    fn render_uses_level_class_and_escapes() {
        let html = FlashMessage::decode("Error:_<b>").render(MarkupPolicy::Escaped);
        assert!(html.starts_with(r#"<div class="alert alert-danger">"#));
        assert!(html.contains(r#"class="close""#));
        assert!(html.ends_with("Error: &lt;b&gt;</div>"));

        let html = FlashMessage::decode("Saved_ok").render(MarkupPolicy::Escaped);
        assert!(html.starts_with(r#"<div class="alert alert-info">"#));
    }

    #[test]
    fn lifecycle_consumes_once_and_erases_cookie() {
        let mut store = store_with("Error:_bad_thing");
        let mut flash = FlashLifecycle::load(FLASH_COOKIE, &store);
        assert_eq!(
            flash.state(),
            &FlashState::Pending("Error:_bad_thing".to_owned())
        );

        let message = flash.consume(&mut store).unwrap();
        assert_eq!(message.text(), "Error: bad thing");
        assert_eq!(flash.state(), &FlashState::Consumed);
        assert_eq!(store.get(FLASH_COOKIE), None);

        assert_eq!(flash.consume(&mut store), None);

        // next page load
        let mut reloaded = FlashLifecycle::load(FLASH_COOKIE, &store);
        assert_eq!(reloaded.state(), &FlashState::Absent);
        assert_eq!(reloaded.consume(&mut store), None);
        assert_eq!(reloaded.state(), &FlashState::Absent);
    }

    #[test]
    fn empty_cookie_is_absent_and_cleared() {
        let mut store = store_with("");
        assert_eq!(store.get(FLASH_COOKIE).as_deref(), Some(""));

        let mut flash = FlashLifecycle::load(FLASH_COOKIE, &store);
        assert_eq!(flash.state(), &FlashState::Absent);

        assert_eq!(flash.consume(&mut store), None);
        assert_eq!(flash.state(), &FlashState::Absent);
        assert_eq!(store.get(FLASH_COOKIE), None);
        assert!(store.backend().is_empty());
    }
}
