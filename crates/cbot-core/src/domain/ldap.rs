use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ldaps?://(?:[^\s/:\[\]]+|\[[0-9A-Fa-f:.]+\])(:\d{1,5})?(/\S*)?$")
        .expect("hard-coded regex is valid")
});

static ATTRIBUTE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9-]*|\d+(?:\.\d+)*)$").expect("hard-coded regex is valid")
});

/// Error returned when LDAP connection details are malformed.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LdapError {
    /// The URL does not use the `ldap://` or `ldaps://` scheme with a host.
    #[error("invalid LDAP URL '{0}': expected ldap://host[:port] or ldaps://host[:port], IPv6 hosts in brackets")]
    Url(String),

    /// A distinguished name is not a comma-separated list of `attr=value`.
    #[error("invalid {field} '{value}': expected comma-separated attr=value pairs")]
    DistinguishedName {
        /// Which field failed, e.g. "bind DN".
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The search filter is not a parenthesised, balanced expression.
    #[error("invalid search filter '{0}': expected a balanced, parenthesised expression")]
    SearchFilter(String),

    /// A field contains a line break or another control character.
    #[error("invalid {0}: control characters are not allowed")]
    ControlCharacter(&'static str),
}

/// Directory-service connection parameters.
///
/// Each field may be left empty, in which case the report marks it as not
/// specified. Non-empty values are syntax-checked on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapDetails {
    url: String,
    bind_dn: String,
    search_base: String,
    search_filter: String,
}

impl LdapDetails {
    /// Validates and builds a set of LDAP details. Surrounding whitespace is
    /// trimmed from every field.
    ///
    /// # Errors
    ///
    /// Returns an [`LdapError`] naming the first malformed field.
    pub fn new(
        url: &str,
        bind_dn: &str,
        search_base: &str,
        search_filter: &str,
    ) -> Result<Self, LdapError> {
        let url = url.trim();
        let bind_dn = bind_dn.trim();
        let search_base = search_base.trim();
        let search_filter = search_filter.trim();

        for (field, value) in [
            ("URL", url),
            ("bind DN", bind_dn),
            ("search base", search_base),
            ("search filter", search_filter),
        ] {
            if value.chars().any(char::is_control) {
                return Err(LdapError::ControlCharacter(field));
            }
        }
        if !url.is_empty() && !URL.is_match(url) {
            return Err(LdapError::Url(url.to_string()));
        }
        check_dn("bind DN", bind_dn)?;
        check_dn("search base", search_base)?;
        if !search_filter.is_empty() && !is_balanced_filter(search_filter) {
            return Err(LdapError::SearchFilter(search_filter.to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            bind_dn: bind_dn.to_string(),
            search_base: search_base.to_string(),
            search_filter: search_filter.to_string(),
        })
    }

    /// The directory URL, if given.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    /// The bind DN, if given.
    #[must_use]
    pub fn bind_dn(&self) -> Option<&str> {
        non_empty(&self.bind_dn)
    }

    /// The search base, if given.
    #[must_use]
    pub fn search_base(&self) -> Option<&str> {
        non_empty(&self.search_base)
    }

    /// The search filter, if given.
    #[must_use]
    pub fn search_filter(&self) -> Option<&str> {
        non_empty(&self.search_filter)
    }
}

fn check_dn(field: &'static str, value: &str) -> Result<(), LdapError> {
    if value.is_empty() || is_distinguished_name(value) {
        Ok(())
    } else {
        Err(LdapError::DistinguishedName {
            field,
            value: value.to_string(),
        })
    }
}

/// A comma-separated list of `attr=value` pairs. Values may contain
/// backslash escapes, so `CN=Doe\, John` is a single pair.
fn is_distinguished_name(dn: &str) -> bool {
    split_unescaped(dn, ',').is_some_and(|rdns| rdns.into_iter().all(is_rdn))
}

/// One or more `attr=value` pairs joined by unescaped `+`.
fn is_rdn(rdn: &str) -> bool {
    split_unescaped(rdn, '+').is_some_and(|pairs| {
        pairs.into_iter().all(|pair| {
            pair.split_once('=').is_some_and(|(attribute, value)| {
                ATTRIBUTE_TYPE.is_match(attribute.trim()) && !value.trim().is_empty()
            })
        })
    })
}

/// Splits on separators not preceded by a backslash. `None` if the text ends
/// in a dangling escape.
fn split_unescaped(text: &str, separator: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next()?;
        } else if c == separator {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    Some(parts)
}

fn is_balanced_filter(filter: &str) -> bool {
    if !(filter.starts_with('(') && filter.ends_with(')')) {
        return false;
    }
    let mut depth = 0usize;
    for c in filter.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
