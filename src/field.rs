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

//! Tag fields, keyed by tag name.

use crate::{
    annotation::{Annotation, Message, Severity},
    tag_list::{parse_tag_list, Item, ParseError},
};
use std::collections::HashMap;
use tracing::trace;

/// A tag of a tag-list, together with its diagnostics.
///
/// The default value is the *undefined* field, standing in for a tag that did
/// not occur in the input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Field {
    pub tag: String,
    pub value: String,
    pub tag_pos: usize,
    pub value_pos: usize,
    /// Ordinal position among all tag-specs of the input, starting at 0.
    pub index: usize,
    /// Whether the tag occurred more than once. The field then holds the last
    /// occurrence.
    pub duplicate: bool,
    /// Whether the tag occurred at all.
    pub defined: bool,
    annotations: Vec<Annotation>,
}

impl Field {
    fn from_item(item: &Item<'_>, index: usize, duplicate: bool) -> Self {
        Self {
            tag: item.tag.into(),
            value: item.value.into(),
            tag_pos: item.tag_pos,
            value_pos: item.value_pos,
            index,
            duplicate,
            defined: true,
            annotations: vec![],
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The most severe annotation on this field, if any.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.annotations.iter().map(|a| a.severity).max()
    }

    /// Appends an annotation of severity [`Severity::Danger`].
    ///
    /// Annotations can only be added, never removed, so that rules of your
    /// own can be applied after the built-in ones.
    pub fn add_error(&mut self, message: impl Into<Message>) {
        self.annotate(Severity::Danger, message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<Message>) {
        self.annotate(Severity::Warning, message.into());
    }

    pub fn add_info(&mut self, message: impl Into<Message>) {
        self.annotate(Severity::Info, message.into());
    }

    fn annotate(&mut self, severity: Severity, message: Message) {
        self.annotations.push(Annotation { severity, message });
    }
}

/// Mapping from tag name to field.
///
/// Map iteration order is unspecified; use [`Field::index`] to recover input
/// order.
pub type FieldMap = HashMap<String, Field>;

/// Folds parsed tag-specs into a field map.
///
/// When a tag name occurs more than once, the last occurrence replaces the
/// earlier ones and is marked as duplicate.
pub fn field_map(items: &[Item<'_>]) -> FieldMap {
    let mut fields = FieldMap::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let seen = fields.contains_key(item.tag);
        if seen {
            trace!(tag = item.tag, index = i, "duplicate tag");
        }
        fields.insert(item.tag.into(), Field::from_item(item, i, seen));
    }

    fields
}

/// Parses a tag-list and folds it into a field map.
pub fn parse_field_map(input: &str) -> Result<FieldMap, ParseError> {
    let items = parse_tag_list(input)?;
    Ok(field_map(&items))
}
