// dkimlint – diagnostics for DKIM tag-lists and key records
// Copyright © 2022–2023 David Bürgin <dbuergin@gluet.ch>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.

//! Diagnostic annotations.
//!
//! An [`Annotation`] pairs a [`Severity`] with a [`Message`]. Messages are
//! either plain text or trusted markup (typically containing links to the
//! relevant RFC sections). Rendering is left to the caller; the single render
//! path [`Message::to_html`] escapes plain text and passes markup through.

use crate::util::CanonicalStr;
use std::fmt::{self, Display, Formatter};

/// Severity of an annotation, ordered from least to most severe.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    /// Advisory.
    Info,
    /// Deprecated or weak, but not invalid.
    Warning,
    /// Protocol violation.
    Danger,
}

impl CanonicalStr for Severity {
    fn canonical_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Message {
    Plain(String),
    Markup(String),
}

impl Message {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Trusted markup, used as-is when rendering.
    pub fn markup(markup: impl Into<String>) -> Self {
        Self::Markup(markup.into())
    }

    /// Fills the `{}` placeholders in a markup template with the given
    /// arguments, escaping each of them.
    ///
    /// A template whose placeholder count does not match the number of
    /// arguments yields a plain internal error message.
    pub fn template(template: &str, args: &[&str]) -> Self {
        let mut parts = template.split("{}");
        let placeholders = template.matches("{}").count();

        if placeholders != args.len() {
            return Self::Plain(format!(
                "Internal error in annotation {template:?}: expected {placeholders} arguments, got {}",
                args.len()
            ));
        }

        let mut result = String::with_capacity(template.len());
        if let Some(first) = parts.next() {
            result.push_str(first);
        }
        for (part, arg) in parts.zip(args) {
            result.push_str(&escape_html(arg));
            result.push_str(part);
        }

        Self::Markup(result)
    }

    /// The raw message text, markup included.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Markup(s) => s,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Plain(s) => escape_html(s),
            Self::Markup(s) => s.clone(),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Annotation {
    pub severity: Severity,
    pub message: Message,
}

impl Display for Annotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&#34;"),
            '\'' => result.push_str("&#39;"),
            c => result.push(c),
        }
    }
    result
}
