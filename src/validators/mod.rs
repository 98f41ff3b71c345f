//! The built-in validator catalog.
//!
//! Every built-in follows the [`Validator`] contract and is registered under
//! the name of the matching chain method on [`Rule`](crate::Rule). Custom
//! and private validators registered under the same name shadow these.
//!
//! # Example
//!
//! ```rust
//! use shiver::validators::builtins;
//!
//! assert!(builtins().contains_key("existence"));
//! assert!(builtins().contains_key("starts_with"));
//! ```

#[cfg(feature = "temporal")]
pub mod date;
pub mod mixed;
pub mod number;
pub mod string;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::registry::{validator, Validator};

static BUILTINS: Lazy<IndexMap<&'static str, Validator>> = Lazy::new(|| {
    let mut map: IndexMap<&'static str, Validator> = IndexMap::new();

    map.insert("accordance", validator(mixed::accordance));
    map.insert("difference", validator(mixed::difference));
    map.insert("existence", validator(mixed::existence));
    map.insert("inside", validator(mixed::inside));
    map.insert("empty", validator(mixed::empty));
    map.insert("falsy", validator(mixed::falsy));
    map.insert("truthy", validator(mixed::truthy));
    map.insert("matches", validator(mixed::matches));

    map.insert("starts_with", validator(string::starts_with));
    map.insert("ends_with", validator(string::ends_with));
    map.insert("ascii", validator(string::ascii));
    map.insert("chinese", validator(string::chinese));
    map.insert("md5", validator(string::md5));
    map.insert("lowercase", validator(string::lowercase));
    map.insert("uppercase", validator(string::uppercase));
    map.insert("ip", validator(string::ip));
    map.insert("phone", validator(string::phone));
    map.insert("mail", validator(string::mail));
    map.insert("data_uri", validator(string::data_uri));
    map.insert("base64", validator(string::base64));

    map.insert("numeric", validator(number::numeric));
    map.insert("int", validator(number::int));
    map.insert("safe_int", validator(number::safe_int));

    #[cfg(feature = "temporal")]
    {
        map.insert("yesterday", validator(date::yesterday));
        map.insert("today", validator(date::today));
        map.insert("tomorrow", validator(date::tomorrow));
        map.insert("before", validator(date::before));
        map.insert("after", validator(date::after));
    }

    map
});

/// Returns the built-in validators in catalog order.
pub fn builtins() -> &'static IndexMap<&'static str, Validator> {
    &BUILTINS
}
