// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead: focus resolution from accumulated printable keystrokes.
//!
//! Characters typed within a 500 ms window accumulate into a search buffer
//! that is prefix-matched (ASCII case-insensitive) against the enabled item
//! labels. Repeating a single character instead cycles through the items
//! starting with it, which is the platform convention for quickly stepping
//! through `"Apple"`, `"Apricot"`, … with repeated presses of `a`.
//!
//! The buffer owns no timer. It records an expiry deadline; the host
//! schedules a wake-up for [`TypeaheadBuffer::next_deadline`] and calls
//! [`TypeaheadBuffer::on_timer`], and every entry point lazily expires stale
//! state first, so a missed wake-up never produces a stale match.

use alloc::string::String;

/// Window within which consecutive characters extend the same search buffer.
pub const TYPEAHEAD_TIMEOUT_MS: u64 = 500;

/// Accumulates printable-character input and resolves it against item labels.
#[derive(Clone, Debug, Default)]
pub struct TypeaheadBuffer<K> {
    buffer: String,
    deadline: Option<u64>,
    current_match: Option<K>,
}

impl<K: Copy + Eq> TypeaheadBuffer<K> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            deadline: None,
            current_match: None,
        }
    }

    /// Feed one printable character and resolve it against `candidates`
    /// (enabled items as `(id, label)` in document order).
    ///
    /// Returns the item to focus, or `None` when nothing matches — the
    /// buffer still updates in that case so a later character can complete a
    /// valid prefix, and the caller keeps the prior focus.
    pub fn on_character(&mut self, ch: char, now: u64, candidates: &[(K, &str)]) -> Option<K> {
        self.expire(now);
        self.deadline = Some(now + TYPEAHEAD_TIMEOUT_MS);

        if candidates.is_empty() {
            self.buffer.push(ch);
            self.current_match = None;
            return None;
        }

        // A repeated single character cycles through its matches rather than
        // narrowing the prefix (pressing `aa` means "next item starting with
        // a", not "item starting with aa").
        let mut chars = self.buffer.chars();
        if let (Some(only), None) = (chars.next(), chars.next())
            && chars_fold_eq(only, ch)
        {
            let matched = self.cycle(only, candidates);
            self.current_match = matched;
            return matched;
        }

        self.buffer.push(ch);
        let matched = candidates
            .iter()
            .find(|(_, label)| starts_with_fold(label, &self.buffer))
            .map(|&(id, _)| id);
        if matched.is_some() {
            self.current_match = matched;
        }
        matched
    }

    /// Advance circularly through the candidates starting with `ch`.
    fn cycle(&self, ch: char, candidates: &[(K, &str)]) -> Option<K> {
        let matches: alloc::vec::Vec<K> = candidates
            .iter()
            .filter(|(_, label)| label.chars().next().is_some_and(|f| chars_fold_eq(f, ch)))
            .map(|&(id, _)| id)
            .collect();
        if matches.is_empty() {
            return None;
        }
        let next = self
            .current_match
            .and_then(|cur| matches.iter().position(|&m| m == cur))
            .map(|pos| (pos + 1) % matches.len())
            .unwrap_or(0);
        Some(matches[next])
    }

    /// Deadline at which the buffer should be expired, if armed.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Host wake-up entry point; clears the buffer once the window elapsed.
    pub fn on_timer(&mut self, now: u64) {
        self.expire(now);
    }

    /// Drop all buffered state immediately (panel close/unmount).
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deadline = None;
        self.current_match = None;
    }

    /// The current search string (empty when expired).
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn expire(&mut self, now: u64) {
        if self.deadline.is_some_and(|d| now > d) {
            self.clear();
        }
    }
}

fn chars_fold_eq(a: char, b: char) -> bool {
    a.eq_ignore_ascii_case(&b)
}

fn starts_with_fold(label: &str, prefix: &str) -> bool {
    let mut label_chars = label.chars();
    for p in prefix.chars() {
        match label_chars.next() {
            Some(l) if chars_fold_eq(l, p) => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> [(u32, &'static str); 3] {
        [(1, "Apple"), (2, "Apricot"), (3, "Banana")]
    }

    #[test]
    fn repeated_character_cycles_through_matches() {
        let mut buf = TypeaheadBuffer::new();
        assert_eq!(buf.on_character('a', 0, &fruit()), Some(1));
        assert_eq!(buf.on_character('a', 100, &fruit()), Some(2));
        // Cycling is circular.
        assert_eq!(buf.on_character('a', 200, &fruit()), Some(1));
    }

    #[test]
    fn multi_character_prefix_narrows() {
        let mut buf = TypeaheadBuffer::new();
        assert_eq!(buf.on_character('a', 0, &fruit()), Some(1));
        assert_eq!(buf.on_character('p', 100, &fruit()), Some(1));
        assert_eq!(buf.on_character('r', 200, &fruit()), Some(2));
    }

    #[test]
    fn expired_window_restarts_the_buffer() {
        let mut buf = TypeaheadBuffer::new();
        assert_eq!(buf.on_character('a', 0, &fruit()), Some(1));
        assert_eq!(buf.on_character('p', 100, &fruit()), Some(1));
        // 501 ms after the last character: the buffer resets, so this is a
        // fresh single `a` and matches "Apple" again, not prefix "apa".
        assert_eq!(buf.on_character('a', 601, &fruit()), Some(1));
    }

    #[test]
    fn boundary_of_the_window_still_extends() {
        let mut buf = TypeaheadBuffer::new();
        assert_eq!(buf.on_character('a', 0, &fruit()), Some(1));
        assert_eq!(buf.on_character('p', 500, &fruit()), Some(1));
        assert_eq!(buf.as_str(), "ap");
    }

    #[test]
    fn miss_updates_buffer_without_match() {
        let mut buf = TypeaheadBuffer::new();
        assert_eq!(buf.on_character('a', 0, &fruit()), Some(1));
        assert_eq!(buf.on_character('z', 100, &fruit()), None);
        assert_eq!(buf.as_str(), "az");
        // A later character cannot rescue an impossible prefix…
        assert_eq!(buf.on_character('p', 200, &fruit()), None);
        // …but after expiry matching works again.
        assert_eq!(buf.on_character('b', 1000, &fruit()), Some(3));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let mut buf = TypeaheadBuffer::new();
        assert_eq!(buf.on_character('A', 0, &fruit()), Some(1));
        assert_eq!(buf.on_character('P', 100, &fruit()), Some(1));
    }

    #[test]
    fn empty_candidates_never_match() {
        let mut buf: TypeaheadBuffer<u32> = TypeaheadBuffer::new();
        assert_eq!(buf.on_character('a', 0, &[]), None);
        assert_eq!(buf.as_str(), "a");
    }

    #[test]
    fn timer_clears_only_after_the_window() {
        let mut buf = TypeaheadBuffer::new();
        let _ = buf.on_character('a', 0, &fruit());
        assert_eq!(buf.next_deadline(), Some(TYPEAHEAD_TIMEOUT_MS));
        buf.on_timer(400);
        assert_eq!(buf.as_str(), "a");
        buf.on_timer(501);
        assert_eq!(buf.as_str(), "");
        assert_eq!(buf.next_deadline(), None);
    }

    #[test]
    fn rearming_replaces_the_previous_deadline() {
        let mut buf = TypeaheadBuffer::new();
        let _ = buf.on_character('a', 0, &fruit());
        let _ = buf.on_character('p', 300, &fruit());
        assert_eq!(buf.next_deadline(), Some(300 + TYPEAHEAD_TIMEOUT_MS));
    }

    #[test]
    fn cycling_skips_to_first_when_current_focus_left_the_group() {
        let mut buf = TypeaheadBuffer::new();
        assert_eq!(buf.on_character('b', 0, &fruit()), Some(3));
        // Repeat `b` with only one match keeps cycling to itself.
        assert_eq!(buf.on_character('b', 100, &fruit()), Some(3));
    }
}
