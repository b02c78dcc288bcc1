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

//! Character cursor over tag-list input.

/// A single-use cursor over an input string.
///
/// The scanner hands out one `char` at a time and can step back exactly one
/// character. It tracks the start of the pending token separately from the
/// read position, so that callers can slice out what they consumed since the
/// last [`ignore`][Scanner::ignore].
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    start: usize,
    pos: usize,
    // width of the last char returned by `next`; `None` once backed up
    width: Option<usize>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            width: None,
        }
    }

    /// Returns the next char and advances, or `None` at end of input.
    pub fn next(&mut self) -> Option<char> {
        match self.input[self.pos..].chars().next() {
            Some(c) => {
                let width = c.len_utf8();
                self.pos += width;
                self.width = Some(width);
                Some(c)
            }
            None => {
                self.width = Some(0);
                None
            }
        }
    }

    /// Steps back over the char last returned by `next`.
    ///
    /// May be called only once per call of `next`.
    pub fn backup(&mut self) {
        let width = self.width.take();
        debug_assert!(width.is_some(), "backup without preceding next");
        self.pos -= width.unwrap_or(0);
    }

    /// Returns but does not consume the next char.
    pub fn peek(&mut self) -> Option<char> {
        let c = self.next();
        self.backup();
        c
    }

    /// Consumes the next char if it is in the valid set.
    pub fn accept(&mut self, valid: impl Fn(char) -> bool) -> bool {
        match self.next() {
            Some(c) if valid(c) => true,
            _ => {
                self.backup();
                false
            }
        }
    }

    /// Consumes a run of chars from the valid set, returns whether any were
    /// consumed.
    pub fn accept_run(&mut self, valid: impl Fn(char) -> bool) -> bool {
        let pos = self.pos;
        while self.accept(&valid) {}
        self.pos > pos
    }

    /// Consumes `s` if the remaining input starts with it.
    pub fn accept_str(&mut self, s: &str) -> bool {
        if self.input[self.pos..].starts_with(s) {
            self.pos += s.len();
            self.width = None;
            true
        } else {
            false
        }
    }

    /// Skips over the pending input before this point.
    pub fn ignore(&mut self) {
        self.start = self.pos;
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        &self.input[from..to]
    }

    /// The input consumed since the last `ignore`.
    pub fn pending(&self) -> &'a str {
        self.slice(self.start, self.pos)
    }
}
