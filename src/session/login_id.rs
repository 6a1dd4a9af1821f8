// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login identifier classification.

use std::fmt;

/// Country code prepended to bare 10-digit phone numbers.
const DEFAULT_COUNTRY_CODE: &str = "+91";

/// An account identifier, tagged by kind.
///
/// The cloud expects each kind under a different field of the login body,
/// so the identifier is classified once, up front.
///
/// # Examples
///
/// ```
/// use miraie_lib::session::LoginId;
///
/// assert_eq!(LoginId::classify("98765 43210"), LoginId::Mobile("+919876543210".into()));
/// assert_eq!(LoginId::classify("me@example.com"), LoginId::Email("me@example.com".into()));
/// assert_eq!(LoginId::classify("living_room_admin"), LoginId::Username("living_room_admin".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoginId {
    /// Phone number in international format.
    Mobile(String),
    /// Email address.
    Email(String),
    /// Plain username.
    Username(String),
}

impl LoginId {
    /// Classifies a raw identifier.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        if is_email(raw) {
            return Self::Email(raw.to_string());
        }
        if let Some(mobile) = normalize_mobile(raw) {
            return Self::Mobile(mobile);
        }
        Self::Username(raw.to_string())
    }

    /// Returns the kind as a lowercase word, safe for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Mobile(_) => "mobile",
            Self::Email(_) => "email",
            Self::Username(_) => "username",
        }
    }

    /// Returns the (normalized) identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Mobile(v) | Self::Email(v) | Self::Username(v) => v,
        }
    }

    /// Login body field carrying this identifier.
    pub(crate) const fn wire_field(&self) -> &'static str {
        match self {
            Self::Mobile(_) => "mobile",
            Self::Email(_) => "email",
            Self::Username(_) => "userId",
        }
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.value())
    }
}

fn is_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn normalize_mobile(raw: &str) -> Option<String> {
    let compact: String = raw.chars().filter(|c| *c != ' ' && *c != '-').collect();
    let (plus, digits) = match compact.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };

    if !(10..=15).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(if !plus && digits.len() == 10 {
        format!("{DEFAULT_COUNTRY_CODE}{digits}")
    } else {
        format!("+{digits}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_ten_digits_get_country_code() {
        assert_eq!(
            LoginId::classify("9876543210"),
            LoginId::Mobile("+919876543210".into())
        );
    }

    #[test]
    fn international_numbers_keep_their_code() {
        assert_eq!(
            LoginId::classify("+44 7700-900123"),
            LoginId::Mobile("+447700900123".into())
        );
        assert_eq!(
            LoginId::classify("919876543210"),
            LoginId::Mobile("+919876543210".into())
        );
    }

    #[test]
    fn too_short_or_long_is_username() {
        assert_eq!(LoginId::classify("12345").kind(), "username");
        assert_eq!(LoginId::classify("1234567890123456").kind(), "username");
    }

    #[test]
    fn email_detection() {
        assert_eq!(LoginId::classify(" a@b.co ").kind(), "email");
        assert_eq!(LoginId::classify("a@b").kind(), "username");
        assert_eq!(LoginId::classify("@b.co").kind(), "username");
        assert_eq!(LoginId::classify("a@@b.co").kind(), "username");
        assert_eq!(LoginId::classify("a@b@c.co").kind(), "username");
    }

    #[test]
    fn wire_fields() {
        assert_eq!(LoginId::classify("9876543210").wire_field(), "mobile");
        assert_eq!(LoginId::classify("a@b.co").wire_field(), "email");
        assert_eq!(LoginId::classify("admin").wire_field(), "userId");
    }
}
