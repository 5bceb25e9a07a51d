//! Reading and writing single cookies through a raw `document.cookie`-like
//! string interface.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use log::{debug, warn};

/// Format of the `expires` attribute (`Thu, 01 Jan 1970 00:00:00 GMT`).
pub const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const SECONDS_PER_DAY: i64 = 86_400;

/// Raw cookie storage.
///
/// `read` returns every visible cookie as `a=1; b=2`, `write` takes one
/// `Set-Cookie`-style assignment, exactly like `document.cookie`.
pub trait CookieBackend {
    fn read(&self) -> String;
    fn write(&mut self, assignment: &str);
}

/// Site-wide cookie access over a [`CookieBackend`].
#[derive(Debug, Default)]
pub struct CookieStore<B> {
    backend: B,
}

impl<B: CookieBackend> CookieStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Writes `name=value` for path `/`.
    ///
    /// With `days` of `None` or `Some(0)` the cookie lasts for the session;
    /// otherwise it expires `days` days from now (in the past for negative
    /// values).
    pub fn set(&mut self, name: &str, value: &str, days: Option<i64>) {
        let assignment = match days.filter(|days| *days != 0) {
            Some(days) => format!(
                "{name}={value}; expires={}; path=/",
                expiry(days).format(EXPIRES_FORMAT)
            ),
            None => format!("{name}={value}; path=/"),
        };
        debug!("set cookie {name}");
        self.backend.write(&assignment);
    }

    /// Value of the first cookie called `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.backend
            .read()
            .split(';')
            .map(|segment| segment.trim_start_matches(' '))
            .find_map(|segment| segment.strip_prefix(prefix.as_str()))
            .map(str::to_owned)
    }

    /// Expires `name` immediately.
    pub fn erase(&mut self, name: &str) {
        self.set(name, "", Some(-1));
    }
}

/// In-memory cookie jar with browser semantics.
///
/// Assignments replace a cookie of the same name, and an `expires` date that
/// is not in the future removes it. Only `expires` is interpreted.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookies {
    jar: Vec<(String, String)>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a jar from a `a=1; b=2` header, as a browser would present it.
    pub fn from_header(header: &str) -> Self {
        let jar = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect();
        Self { jar }
    }

    pub fn len(&self) -> usize {
        self.jar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jar.is_empty()
    }
}

impl CookieBackend for MemoryCookies {
    fn read(&self) -> String {
        self.jar
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&mut self, assignment: &str) {
        let mut parts = assignment.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.trim().split_once('='))
        else {
            warn!("ignoring malformed cookie assignment");
            return;
        };

        let expired = parts
            .filter_map(|attr| attr.trim().split_once('='))
            .filter(|(key, _)| key.eq_ignore_ascii_case("expires"))
            .filter_map(|(_, date)| parse_expires(date))
            .any(|expires| expires <= Utc::now());

        self.jar.retain(|(existing, _)| existing != name);
        if !expired {
            self.jar.push((name.to_owned(), value.to_owned()));
        }
    }
}

/// `days` days from now, clamped to the range an `expires` attribute can
/// carry: the epoch for the past, the end of year 9999 for the future.
fn expiry(days: i64) -> DateTime<Utc> {
    let latest = latest_expiry();
    days.checked_mul(SECONDS_PER_DAY)
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .filter(|at| *at >= DateTime::<Utc>::default() && *at <= latest)
        .unwrap_or_else(|| {
            warn!("cookie expiry of {days} days is out of range, clamping");
            if days < 0 {
                DateTime::<Utc>::default()
            } else {
                latest
            }
        })
}

fn latest_expiry() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn parse_expires(date: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(date, EXPIRES_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
