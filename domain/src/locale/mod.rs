//! Locale identifiers and inheritance

pub mod fallback;
pub mod locale_id;

pub use fallback::LocaleFallback;
pub use locale_id::{LocaleId, LocaleParts};
