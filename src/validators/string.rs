//! String format validators.
//!
//! Every validator here first guards that the value is a string; a
//! non-string soft-fails unless the check carries a message.

use std::net::{Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::arg::Arg;
use crate::assert::Assert;
use crate::error::RuleError;

static ASCII: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\x00-\x7F]+$").unwrap());
static CHINESE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\x{4e00}-\x{9fa5}]+$").unwrap());
static MD5: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]{32}$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|86|17951)?(13[0-9]|15[012356789]|17[678]|18[0-9]|14[57])[0-9]{8}$").unwrap()
});
static MAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+([-+.]\w+)*@\w+([-.]\w+)*\.\w+([-.]\w+)*$").unwrap());
static MEDIA_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-z]+/[a-z0-9\-+]+$").unwrap());
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-z\-]+=[a-z0-9\-]+$").unwrap());
static DATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z0-9!$&'()*+,;=\-._~:@/?%\s]*$").unwrap());

fn string_check(
    assert: &Assert<'_>,
    value: Option<&Value>,
    predicate: impl FnOnce(&str) -> bool,
) -> Result<bool, RuleError> {
    match value.and_then(Value::as_str) {
        Some(s) => assert.that(predicate(s)),
        None => assert.expect(false, &["string"]),
    }
}

fn affix_check(
    assert: &Assert<'_>,
    value: Option<&Value>,
    args: &[Arg],
    predicate: impl FnOnce(&str, &str) -> bool,
) -> Result<bool, RuleError> {
    let Some(affix) = args.first().and_then(Arg::as_str) else {
        return assert.expect_param(false, &["string"], args.first());
    };
    string_check(assert, value, |s| predicate(s, affix))
}

/// Passes when the value starts with the string argument.
pub fn starts_with(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    affix_check(assert, value, args, |s, prefix| s.starts_with(prefix))
}

/// Passes when the value ends with the string argument.
pub fn ends_with(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    affix_check(assert, value, args, |s, suffix| s.ends_with(suffix))
}

/// Passes for non-empty strings of ASCII characters.
pub fn ascii(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, |s| ASCII.is_match(s))
}

/// Passes for non-empty strings of CJK unified ideographs.
pub fn chinese(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, |s| CHINESE.is_match(s))
}

/// Passes for 32 lowercase hex digits.
pub fn md5(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, |s| MD5.is_match(s))
}

pub fn lowercase(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, |s| s == s.to_lowercase())
}

pub fn uppercase(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, |s| s == s.to_uppercase())
}

/// Passes for IP addresses; an argument of `4` or `6` restricts the version.
pub fn ip(assert: &Assert<'_>, value: Option<&Value>, args: &[Arg]) -> Result<bool, RuleError> {
    let version = args.first().and_then(|a| match a.as_str() {
        Some("4") => Some(4),
        Some("6") => Some(6),
        Some(_) => None,
        None => a.as_f64().filter(|v| *v == 4.0 || *v == 6.0).map(|v| v as u8),
    });
    string_check(assert, value, |s| match version {
        Some(4) => is_ipv4(s),
        Some(6) => is_ipv6(s),
        _ => is_ipv4(s) || is_ipv6(s),
    })
}

/// Passes for mainland China mobile numbers.
pub fn phone(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, |s| PHONE.is_match(s))
}

pub fn mail(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, |s| MAIL.is_match(s))
}

/// Passes for `data:` URIs with an optional media type, attributes and an
/// optional trailing `base64` marker.
pub fn data_uri(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, is_data_uri)
}

/// Passes for padded base64 text.
pub fn base64(assert: &Assert<'_>, value: Option<&Value>, _args: &[Arg]) -> Result<bool, RuleError> {
    string_check(assert, value, is_base64)
}

pub fn is_ipv4(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

pub fn is_data_uri(s: &str) -> bool {
    let mut chunks = s.split(',');
    let Some(head) = chunks.next() else {
        return false;
    };
    let data: Vec<&str> = chunks.collect();
    if data.is_empty() {
        return false;
    }

    let mut attributes = head.trim().split(';');
    let Some(media_type) = attributes.next().and_then(|scheme| scheme.strip_prefix("data:")) else {
        return false;
    };
    if !media_type.is_empty() && !MEDIA_TYPE.is_match(media_type) {
        return false;
    }

    let attributes: Vec<&str> = attributes.collect();
    let last = attributes.len().saturating_sub(1);
    let attributes_ok = attributes.iter().enumerate().all(|(i, attribute)| {
        (i == last && attribute.eq_ignore_ascii_case("base64")) || ATTRIBUTE.is_match(attribute)
    });

    attributes_ok && data.iter().all(|chunk| DATA.is_match(chunk))
}

pub fn is_base64(s: &str) -> bool {
    let len = s.len();
    if len == 0 || len % 4 != 0 {
        return false;
    }
    if !s.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')) {
        return false;
    }
    match s.find('=') {
        None => true,
        Some(i) if i == len - 1 => true,
        Some(i) => i == len - 2 && s.ends_with('='),
    }
}
