//! The mutable token stream (spec §4.1) and its construction services
//! (spec §2.3).
//!
//! Per the design note in spec §9, this is *not* the source design's
//! doubly-linked list of owning raw pointers. It is a `Vec<TokenSlot>`
//! addressed by stable [`TokenId`] indices, with `next`/`prev` stored as
//! `Option<TokenId>` rather than pointers. Deletion is logical
//! (`tombstoned`) until [`TokenList::compact`] is called, which must only
//! run between passes — never while a pass holds `TokenId`s it expects to
//! stay valid mid-splice.

use crate::error::{PassError, PassResult};
use crate::files::FileId;
use crate::token::{Classification, Location, Token, TokenId};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TokenSlot {
    token: Token,
    next: Option<TokenId>,
    prev: Option<TokenId>,
    tombstoned: bool,
}

/// A single `(file, line, column, lexeme)` tuple as produced by the
/// preprocessor (spec §6 Input item 1).
#[derive(Debug, Clone)]
pub struct PreprocessedToken {
    pub file: FileId,
    pub line: u32,
    pub column: u32,
    pub lexeme: String,
    pub classification: Classification,
}

/// The mutable token stream for one translation unit.
pub struct TokenList {
    slots: Vec<TokenSlot>,
    head: Option<TokenId>,
    tail: Option<TokenId>,
    indexes_assigned: bool,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { slots: Vec::new(), head: None, tail: None, indexes_assigned: false }
    }

    /// Builds a stream from preprocessor output, in order (spec §2.3
    /// "construction from preprocessor output").
    pub fn from_preprocessed(tokens: impl IntoIterator<Item = PreprocessedToken>) -> Self {
        let mut list = TokenList::new();
        for t in tokens {
            let location = Location::new(t.file, t.line, t.column);
            let tok = Token::new(t.lexeme, t.classification, location);
            list.push_back(tok);
        }
        list
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<TokenId> {
        self.head
    }

    pub fn tail(&self) -> Option<TokenId> {
        self.tail
    }

    /// Number of live (non-tombstoned) tokens.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    fn slot(&self, id: TokenId) -> &TokenSlot {
        &self.slots[id.0 as usize]
    }

    fn slot_mut(&mut self, id: TokenId) -> &mut TokenSlot {
        &mut self.slots[id.0 as usize]
    }

    pub fn get(&self, id: TokenId) -> &Token {
        &self.slot(id).token
    }

    pub fn get_mut(&mut self, id: TokenId) -> &mut Token {
        &mut self.slot_mut(id).token
    }

    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        self.slot(id).next
    }

    pub fn prev(&self, id: TokenId) -> Option<TokenId> {
        self.slot(id).prev
    }

    pub fn is_tombstoned(&self, id: TokenId) -> bool {
        self.slot(id).tombstoned
    }

    /// Appends a token to the end of the stream.
    pub fn push_back(&mut self, token: Token) -> TokenId {
        let id = TokenId(self.slots.len() as u32);
        let prev = self.tail;
        self.slots.push(TokenSlot { token, next: None, prev, tombstoned: false });
        if let Some(prev) = prev {
            self.slot_mut(prev).next = Some(id);
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        id
    }

    /// Splices a new token immediately after `at`, copying `at`'s
    /// file/line/column. Returns the new token's id.
    pub fn insert_after(&mut self, at: TokenId, lexeme: impl Into<String>, classification: Classification) -> TokenId {
        let location = self.get(at).location;
        let mut tok = Token::new(lexeme, classification, location);
        tok.progress = self.get(at).progress;
        let id = TokenId(self.slots.len() as u32);
        let next = self.slot(at).next;
        self.slots.push(TokenSlot { token: tok, next, prev: Some(at), tombstoned: false });
        self.slot_mut(at).next = Some(id);
        if let Some(next) = next {
            self.slot_mut(next).prev = Some(id);
        } else {
            self.tail = Some(id);
        }
        id
    }

    /// Splices a new token immediately before `at`, copying `at`'s
    /// file/line/column. Returns the new token's id.
    pub fn insert_before(&mut self, at: TokenId, lexeme: impl Into<String>, classification: Classification) -> TokenId {
        let location = self.get(at).location;
        let mut tok = Token::new(lexeme, classification, location);
        tok.progress = self.get(at).progress;
        let id = TokenId(self.slots.len() as u32);
        let prev = self.slot(at).prev;
        self.slots.push(TokenSlot { token: tok, next: Some(at), prev, tombstoned: false });
        self.slot_mut(at).prev = Some(id);
        if let Some(prev) = prev {
            self.slot_mut(prev).next = Some(id);
        } else {
            self.head = Some(id);
        }
        id
    }

    /// Removes the half-open range `[from, to_exclusive)`. If `to_exclusive`
    /// is `None`, erases to the end of the stream.
    ///
    /// Fails if any bracket token in the range has its partner outside the
    /// range: erasing it would orphan the partner, violating the bracket
    /// reciprocity invariant (spec §4.1 "Failure semantics").
    pub fn erase(&mut self, from: TokenId, to_exclusive: Option<TokenId>) -> PassResult<()> {
        let mut cursor = Some(from);
        let mut in_range = Vec::new();
        while let Some(id) = cursor {
            if Some(id) == to_exclusive {
                break;
            }
            in_range.push(id);
            cursor = self.next(id);
        }
        let range_set: std::collections::HashSet<TokenId> = in_range.iter().copied().collect();
        for &id in &in_range {
            if let Some(partner) = self.get(id).links.bracket {
                if !range_set.contains(&partner) {
                    return Err(PassError::fatal(
                        Some(id),
                        format!("erase would orphan bracket partner of token {}", id.0),
                    ));
                }
            }
        }

        let before = self.prev(from);
        let after = to_exclusive;

        for &id in &in_range {
            self.slot_mut(id).tombstoned = true;
        }

        match (before, after) {
            (Some(b), Some(a)) => {
                self.slot_mut(b).next = Some(a);
                self.slot_mut(a).prev = Some(b);
            }
            (Some(b), None) => {
                self.slot_mut(b).next = None;
                self.tail = Some(b);
            }
            (None, Some(a)) => {
                self.slot_mut(a).prev = None;
                self.head = Some(a);
            }
            (None, None) => {
                self.head = None;
                self.tail = None;
            }
        }
        Ok(())
    }

    /// Duplicates the lexemes and metadata of `[from, to_inclusive]`,
    /// inserting the copies after `dest`. Returns the id of the last copy.
    /// Cross-links (bracket/AST/scope/...) are **not** copied; callers
    /// relink brackets manually via [`TokenList::create_mutual_link`].
    pub fn copy_range(&mut self, dest: TokenId, from: TokenId, to_inclusive: TokenId) -> TokenId {
        let mut source_ids = Vec::new();
        let mut cursor = Some(from);
        loop {
            let id = cursor.expect("to_inclusive must be reachable from from");
            source_ids.push(id);
            if id == to_inclusive {
                break;
            }
            cursor = self.next(id);
        }

        let mut anchor = dest;
        let mut last = dest;
        for &src in &source_ids {
            let mut tok = self.get(src).clone();
            tok.links = Default::default();
            tok.index = 0;
            let classification = tok.classification;
            let new_id = self.insert_after(anchor, tok.lexeme.clone(), classification);
            *self.get_mut(new_id) = tok;
            anchor = new_id;
            last = new_id;
        }
        last
    }

    /// Relocates `[first, last]` to just after `after`, in O(1): unlinks the
    /// range from its current position and splices it back in elsewhere
    /// without touching any token's contents.
    pub fn move_range(&mut self, first: TokenId, last: TokenId, after: TokenId) {
        let before = self.prev(first);
        let past = self.next(last);

        match (before, past) {
            (Some(b), Some(p)) => {
                self.slot_mut(b).next = Some(p);
                self.slot_mut(p).prev = Some(b);
            }
            (Some(b), None) => {
                self.slot_mut(b).next = None;
                self.tail = Some(b);
            }
            (None, Some(p)) => {
                self.slot_mut(p).prev = None;
                self.head = Some(p);
            }
            (None, None) => {
                self.head = None;
                self.tail = None;
            }
        }

        let after_next = self.next(after);
        self.slot_mut(after).next = Some(first);
        self.slot_mut(first).prev = Some(after);
        self.slot_mut(last).next = after_next;
        if let Some(n) = after_next {
            self.slot_mut(n).prev = Some(last);
        } else {
            self.tail = Some(last);
        }
    }

    /// Links two bracket tokens as reciprocal partners. Fails if their
    /// lexemes are not a matching open/close pair of the same kind (spec §3
    /// "never of mixed kind").
    pub fn create_mutual_link(&mut self, a: TokenId, b: TokenId) -> PassResult<()> {
        let (open, close) = if self.get(a).is_open_bracket() { (a, b) } else { (b, a) };
        let open_lex = self.get(open).lexeme.as_str();
        let close_lex = self.get(close).lexeme.as_str();
        let expected_close = match open_lex {
            "(" => ")",
            "[" => "]",
            "{" => "}",
            "<" => ">",
            _ => return Err(PassError::fatal(Some(a), "create_mutual_link: not a bracket token")),
        };
        if close_lex != expected_close {
            return Err(PassError::fatal(
                Some(a),
                format!("create_mutual_link: mismatched bracket kinds '{open_lex}' / '{close_lex}'"),
            ));
        }
        self.get_mut(open).links.bracket = Some(close);
        self.get_mut(close).links.bracket = Some(open);
        Ok(())
    }

    pub fn clear_link(&mut self, t: TokenId) {
        if let Some(partner) = self.get(t).links.bracket {
            self.get_mut(partner).links.bracket = None;
        }
        self.get_mut(t).links.bracket = None;
    }

    /// Scans forward from `start` (inclusive) for the first live token
    /// matching `pred`, stopping before `limit` if given.
    pub fn find(&self, start: TokenId, limit: Option<TokenId>, pred: impl Fn(&Token) -> bool) -> Option<TokenId> {
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if Some(id) == limit {
                return None;
            }
            if !self.is_tombstoned(id) && pred(self.get(id)) {
                return Some(id);
            }
            cursor = self.next(id);
        }
        None
    }

    /// Finds the closing bracket for `open`, honoring nesting of the same
    /// bracket kind. Uses the existing link if present.
    pub fn find_closing_bracket(&self, open: TokenId) -> Option<TokenId> {
        if let Some(link) = self.get(open).links.bracket {
            return Some(link);
        }
        let open_lex = self.get(open).lexeme.clone();
        let close_lex = match open_lex.as_str() {
            "(" => ")",
            "[" => "]",
            "{" => "}",
            "<" => ">",
            _ => return None,
        };
        let mut depth = 0i32;
        let mut cursor = self.next(open);
        while let Some(id) = cursor {
            if !self.is_tombstoned(id) {
                let lex = self.get(id).lexeme.as_str();
                if lex == open_lex {
                    depth += 1;
                } else if lex == close_lex {
                    if depth == 0 {
                        return Some(id);
                    }
                    depth -= 1;
                }
            }
            cursor = self.next(id);
        }
        None
    }

    /// Finds the opening bracket for `close`, honoring nesting.
    pub fn find_opening_bracket(&self, close: TokenId) -> Option<TokenId> {
        if let Some(link) = self.get(close).links.bracket {
            return Some(link);
        }
        let close_lex = self.get(close).lexeme.clone();
        let open_lex = match close_lex.as_str() {
            ")" => "(",
            "]" => "[",
            "}" => "{",
            ">" => "<",
            _ => return None,
        };
        let mut depth = 0i32;
        let mut cursor = self.prev(close);
        while let Some(id) = cursor {
            if !self.is_tombstoned(id) {
                let lex = self.get(id).lexeme.as_str();
                if lex == close_lex {
                    depth += 1;
                } else if lex == open_lex {
                    if depth == 0 {
                        return Some(id);
                    }
                    depth -= 1;
                }
            }
            cursor = self.prev(id);
        }
        None
    }

    /// Iterates live tokens head to tail.
    pub fn iter(&self) -> TokenIter<'_> {
        TokenIter { list: self, cursor: self.head }
    }

    /// Stamps every live token with a strictly non-decreasing integer,
    /// in stream order. Run after every bulk rewrite that may have
    /// inserted tokens without explicit ordering (spec §4.1).
    pub fn assign_progress_values(&mut self) {
        let ids: Vec<TokenId> = self.iter().map(|(id, _)| id).collect();
        for (progress, id) in ids.into_iter().enumerate() {
            self.get_mut(id).progress = progress as u64;
        }
    }

    /// Stamps a dense, unique index on every live token, once, after the
    /// pipeline completes (spec §4.1).
    pub fn assign_indexes(&mut self) {
        let ids: Vec<TokenId> = self.iter().map(|(id, _)| id).collect();
        for (index, id) in ids.into_iter().enumerate() {
            self.get_mut(id).index = index as u32;
        }
        self.indexes_assigned = true;
    }

    pub fn indexes_assigned(&self) -> bool {
        self.indexes_assigned
    }

    /// Physically drops tombstoned slots and remaps every `TokenId` stored
    /// in surviving tokens' links. Only safe to call between passes.
    pub fn compact(&mut self) {
        let mut remap: HashMap<u32, u32> = HashMap::new();
        let mut new_slots = Vec::with_capacity(self.slots.len());
        for (old_idx, slot) in self.slots.iter().enumerate() {
            if !slot.tombstoned {
                remap.insert(old_idx as u32, new_slots.len() as u32);
                new_slots.push(slot.clone());
            }
        }
        let remap_id = |id: Option<TokenId>| id.and_then(|t| remap.get(&t.0).map(|&n| TokenId(n)));
        for slot in &mut new_slots {
            slot.next = remap_id(slot.next);
            slot.prev = remap_id(slot.prev);
            slot.token.links.bracket = remap_id(slot.token.links.bracket);
            slot.token.links.ast_parent = remap_id(slot.token.links.ast_parent);
            slot.token.links.ast_op1 = remap_id(slot.token.links.ast_op1);
            slot.token.links.ast_op2 = remap_id(slot.token.links.ast_op2);
        }
        self.head = remap_id(self.head);
        self.tail = remap_id(self.tail);
        self.slots = new_slots;
    }

    /// Validates the stream invariants from spec §3 and §8. Intended to be
    /// run after every pass in debug builds / tests.
    pub fn validate_invariants(&self) -> PassResult<()> {
        let mut last_progress: Option<u64> = None;
        for (id, tok) in self.iter() {
            if let Some(last) = last_progress {
                if tok.progress < last {
                    return Err(PassError::fatal(Some(id), "progress values are not monotone non-decreasing"));
                }
            }
            last_progress = Some(tok.progress);

            if let Some(partner) = tok.links.bracket {
                if self.is_tombstoned(partner) {
                    return Err(PassError::fatal(Some(id), "bracket partner is tombstoned"));
                }
                let reciprocal = self.get(partner).links.bracket;
                if reciprocal != Some(id) {
                    return Err(PassError::fatal(Some(id), "bracket link is not reciprocal"));
                }
                let a = tok.lexeme.as_str();
                let b = self.get(partner).lexeme.as_str();
                let consistent = matches!((a, b), ("(", ")") | (")", "(") | ("[", "]") | ("]", "[") | ("{", "}") | ("}", "{") | ("<", ">") | (">", "<"));
                if !consistent {
                    return Err(PassError::fatal(Some(id), "bracket link mixes kinds"));
                }
            }
        }

        if self.indexes_assigned {
            let mut seen = std::collections::HashSet::new();
            let mut count = 0usize;
            for (id, tok) in self.iter() {
                if !seen.insert(tok.index) {
                    return Err(PassError::fatal(Some(id), "assigned indexes are not unique"));
                }
                count += 1;
            }
            if seen.len() != count {
                return Err(PassError::fatal(None, "assigned indexes are not dense"));
            }
        }

        Ok(())
    }
}

impl Default for TokenList {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TokenIter<'a> {
    list: &'a TokenList,
    cursor: Option<TokenId>,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = (TokenId, &'a Token);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.cursor {
            self.cursor = self.list.next(id);
            if !self.list.is_tombstoned(id) {
                return Some((id, self.list.get(id)));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(lexeme: &str, classification: Classification) -> PreprocessedToken {
        PreprocessedToken { file: FileId(0), line: 1, column: 1, lexeme: lexeme.to_string(), classification }
    }

    fn sample() -> TokenList {
        TokenList::from_preprocessed(vec![
            tok("int", Classification::Keyword),
            tok("f", Classification::Name),
            tok("(", Classification::Bracket),
            tok(")", Classification::Bracket),
            tok(";", Classification::Other),
        ])
    }

    #[test]
    fn push_back_links_head_and_tail() {
        let list = sample();
        let lexemes: Vec<_> = list.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "f", "(", ")", ";"]);
    }

    #[test]
    fn insert_after_splices_one_token() {
        let mut list = sample();
        let f = list.find(list.head().unwrap(), None, |t| t.lexeme == "f").unwrap();
        list.insert_after(f, "g", Classification::Name);
        let lexemes: Vec<_> = list.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "f", "g", "(", ")", ";"]);
    }

    #[test]
    fn erase_range_relinks_neighbors() {
        let mut list = sample();
        let open = list.find(list.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let semi = list.find(list.head().unwrap(), None, |t| t.lexeme == ";").unwrap();
        list.erase(open, Some(semi)).unwrap();
        let lexemes: Vec<_> = list.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "f", ";"]);
    }

    #[test]
    fn erase_refuses_to_orphan_a_bracket_partner() {
        let mut list = sample();
        let open = list.find(list.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = list.find(list.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        list.create_mutual_link(open, close).unwrap();
        let semi = list.find(list.head().unwrap(), None, |t| t.lexeme == ";").unwrap();
        // erasing [open, semi) would tombstone `(` but not its partner `)`.
        let result = list.erase(open, Some(semi));
        assert!(result.is_err());
    }

    #[test]
    fn create_mutual_link_rejects_mixed_kinds() {
        let mut list = sample();
        let open = list.find(list.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        // no `]` in this stream; use `;` to exercise the mismatch path via a
        // synthetic bracket-classified token instead.
        let fake_close = list.insert_after(open, "]", Classification::Bracket);
        assert!(list.create_mutual_link(open, fake_close).is_err());
    }

    #[test]
    fn find_closing_bracket_honors_nesting() {
        let mut list = TokenList::from_preprocessed(vec![
            tok("(", Classification::Bracket),
            tok("(", Classification::Bracket),
            tok(")", Classification::Bracket),
            tok(")", Classification::Bracket),
        ]);
        let outer = list.head().unwrap();
        let close = list.find_closing_bracket(outer).unwrap();
        assert_eq!(list.get(close).lexeme, ")");
        assert_eq!(list.next(close), None);
        // and the opening search is the inverse
        assert_eq!(list.find_opening_bracket(close), Some(outer));
    }

    #[test]
    fn move_range_relocates_without_losing_tokens() {
        let mut list = sample();
        let open = list.find(list.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = list.find(list.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        let semi = list.find(list.head().unwrap(), None, |t| t.lexeme == ";").unwrap();
        list.move_range(open, close, semi);
        let lexemes: Vec<_> = list.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["int", "f", ";", "(", ")"]);
    }

    #[test]
    fn copy_range_duplicates_without_cross_links() {
        let mut list = sample();
        let open = list.find(list.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = list.find(list.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        let tail = list.tail().unwrap();
        let last_copy = list.copy_range(tail, open, close);
        assert_eq!(list.get(last_copy).lexeme, ")");
        assert!(list.get(last_copy).links.bracket.is_none());
    }

    #[test]
    fn assign_progress_values_is_monotone() {
        let mut list = sample();
        list.assign_progress_values();
        list.validate_invariants().unwrap();
    }

    #[test]
    fn assign_indexes_is_dense_and_unique() {
        let mut list = sample();
        list.assign_indexes();
        list.validate_invariants().unwrap();
    }

    #[test]
    fn compact_remaps_bracket_links() {
        let mut list = sample();
        let open = list.find(list.head().unwrap(), None, |t| t.lexeme == "(").unwrap();
        let close = list.find(list.head().unwrap(), None, |t| t.lexeme == ")").unwrap();
        list.create_mutual_link(open, close).unwrap();
        let int_tok = list.head().unwrap();
        let f = list.next(int_tok).unwrap();
        list.erase(int_tok, Some(f)).unwrap();
        list.compact();
        list.validate_invariants().unwrap();
        let lexemes: Vec<_> = list.iter().map(|(_, t)| t.lexeme.clone()).collect();
        assert_eq!(lexemes, vec!["f", "(", ")", ";"]);
    }
}
