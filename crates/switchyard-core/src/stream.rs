//! The mutable token stream processors pop arguments from.
//!
//! See the module-level invariants in the crate docs: `remaining` is a
//! strictly increasing sequence of indices into the backing token array;
//! pops only remove indices from `remaining`, never from the array itself,
//! so popped tokens stay recoverable via [`TokenStream::used`].

use crate::data::Data;
use crate::token::{BoxedBreaker, Token};

/// A mutable view over parsed arguments: snapshots, push-back, and
/// user-defined breakers on top of a plain token array.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Indices into `tokens` that have not yet been popped, in order.
    remaining: Vec<usize>,
    /// Cursor into `remaining`: everything before `offset` has already
    /// been consumed by `PopAt`-style offsetting from prior calls that
    /// chose not to advance the base (branches re-peek without popping).
    offset: usize,
    terminal_quote: Option<char>,
    next_snapshot_id: u64,
    breaker_stack: Vec<BoxedBreaker>,
}

impl TokenStream {
    pub fn new(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let tokens: Vec<Token> = values.into_iter().map(|v| Token::new(v.into())).collect();
        let remaining = (0..tokens.len()).collect();
        Self {
            tokens,
            remaining,
            offset: 0,
            terminal_quote: None,
            next_snapshot_id: 0,
            breaker_stack: Vec::new(),
        }
    }

    pub fn terminal_quote(&self) -> Option<char> {
        self.terminal_quote
    }

    pub fn set_terminal_quote(&mut self, c: Option<char>) {
        self.terminal_quote = c;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Non-destructive read of the next token.
    pub fn peek(&self) -> Option<&str> {
        self.peek_at(0)
    }

    /// Non-destructive read of the token `k` positions ahead of the cursor.
    pub fn peek_at(&self, k: usize) -> Option<&str> {
        let idx = *self.remaining.get(self.offset + k)?;
        Some(self.tokens[idx].value())
    }

    /// Removes and returns the token at `remaining[offset + offset_param]`.
    pub fn pop_at(&mut self, offset_param: usize, _data: &Data) -> Option<String> {
        let pos = self.offset + offset_param;
        if pos >= self.remaining.len() {
            return None;
        }
        let idx = self.remaining.remove(pos);
        Some(self.tokens[idx].value().to_string())
    }

    pub fn pop(&mut self, data: &Data) -> Option<String> {
        self.pop_at(0, data)
    }

    /// Pops up to `n + opt_n` tokens (or all remaining if `opt_n` is
    /// `None`, i.e. unbounded), stopping early at the first token for
    /// which a breaker in `extra` or the active stack fires. Returns
    /// `(values, enough)` where `enough` is whether at least `n` tokens
    /// were obtained.
    pub fn pop_n(
        &mut self,
        n: usize,
        opt_n: Option<usize>,
        extra: &[BoxedBreaker],
        data: &Data,
    ) -> (Vec<String>, bool) {
        let limit = opt_n.map(|o| n + o);
        let mut popped = Vec::new();

        loop {
            if let Some(limit) = limit {
                if popped.len() >= limit {
                    break;
                }
            }
            let pos = self.offset;
            let Some(&idx) = self.remaining.get(pos) else {
                break;
            };
            let tok = &self.tokens[idx];
            let mut signal = None;
            for b in extra.iter().chain(self.breaker_stack.iter()) {
                let s = b.check(tok, data);
                if s.should_break {
                    signal = Some(s);
                    break;
                }
            }
            if let Some(sig) = signal {
                if sig.discard {
                    self.remaining.remove(pos);
                }
                break;
            }
            let idx = self.remaining.remove(pos);
            popped.push(self.tokens[idx].value().to_string());
        }

        let enough = popped.len() >= n;
        (popped, enough)
    }

    /// Inserts `values` at the front of the remaining window (position 0).
    pub fn push_front(&mut self, values: impl IntoIterator<Item = impl Into<String>>) {
        self.push_front_at(0, values);
    }

    /// Inserts `values` at `remaining[offset + k]`. New tokens inherit
    /// membership in every snapshot the token currently at
    /// `remaining[offset]` belongs to, if any, so snapshots keep seeing
    /// exactly the "remaining at moment X" view.
    pub fn push_front_at(&mut self, k: usize, values: impl IntoIterator<Item = impl Into<String>>) {
        let inherited = self
            .remaining
            .get(self.offset)
            .map(|&idx| self.tokens[idx].snapshots.clone())
            .unwrap_or_default();

        let insert_remaining_pos = self.offset + k;
        // Backing-array insertion point: right where the token currently
        // occupying that remaining slot lives, so textual order in the
        // array tracks textual order in the stream. Appending past the end
        // falls back to the array's own end.
        let array_pos = self
            .remaining
            .get(insert_remaining_pos)
            .copied()
            .unwrap_or(self.tokens.len());

        let mut new_tokens: Vec<Token> = values
            .into_iter()
            .map(|v| {
                let mut t = Token::new(v.into());
                t.snapshots = inherited.clone();
                t
            })
            .collect();
        let count = new_tokens.len();
        if count == 0 {
            return;
        }

        // Shift every remaining index at or past the insertion point.
        for idx in self.remaining.iter_mut() {
            if *idx >= array_pos {
                *idx += count;
            }
        }

        let tail = self.tokens.split_off(array_pos);
        self.tokens.append(&mut new_tokens);
        self.tokens.extend(tail);

        let new_indices: Vec<usize> = (array_pos..array_pos + count).collect();
        self.remaining
            .splice(insert_remaining_pos..insert_remaining_pos, new_indices);
    }

    /// Takes a new snapshot id, tagging every currently-remaining token.
    pub fn snapshot(&mut self) -> u64 {
        let id = self.next_snapshot_id;
        self.next_snapshot_id += 1;
        for &idx in &self.remaining[self.offset..] {
            self.tokens[idx].snapshots.insert(id);
        }
        id
    }

    /// Retrieves the values of every token tagged with `id`, in original
    /// (backing-array) order.
    pub fn get_snapshot(&self, id: u64) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| t.in_snapshot(id))
            .map(|t| t.value().to_string())
            .collect()
    }

    /// Pushes breakers onto the active stack; they apply to every
    /// subsequent bounded pop until popped back off.
    pub fn push_breakers(&mut self, breakers: impl IntoIterator<Item = BoxedBreaker>) -> usize {
        let mut count = 0;
        for b in breakers {
            self.breaker_stack.push(b);
            count += 1;
        }
        count
    }

    /// Pops `n` breakers off the stack. `n` must match the count pushed by
    /// the corresponding `push_breakers` call.
    pub fn pop_breakers(&mut self, n: usize) {
        let new_len = self.breaker_stack.len().saturating_sub(n);
        self.breaker_stack.truncate(new_len);
    }

    /// The values still unconsumed, in order.
    pub fn remaining(&self) -> Vec<String> {
        self.remaining[self.offset..]
            .iter()
            .map(|&idx| self.tokens[idx].value().to_string())
            .collect()
    }

    /// The values already consumed by pops, in original order.
    pub fn used(&self) -> Vec<String> {
        let remaining_set: std::collections::HashSet<usize> =
            self.remaining.iter().copied().collect();
        self.tokens
            .iter()
            .enumerate()
            .filter(|(i, _)| !remaining_set.contains(i))
            .map(|(_, t)| t.value().to_string())
            .collect()
    }

    pub fn num_remaining(&self) -> usize {
        self.remaining.len() - self.offset
    }

    pub fn fully_processed(&self) -> bool {
        self.num_remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Data {
        Data::new()
    }

    #[test]
    fn round_trip_pop_all() {
        let mut s = TokenStream::new(["a", "b", "c"]);
        assert_eq!(s.remaining(), vec!["a", "b", "c"]);
        let d = data();
        let (vals, enough) = s.pop_n(3, Some(0), &[], &d);
        assert!(enough);
        assert_eq!(vals, vec!["a", "b", "c"]);
        assert_eq!(s.used(), vec!["a", "b", "c"]);
        assert_eq!(s.remaining(), Vec::<String>::new());
        assert!(s.fully_processed());
    }

    #[test]
    fn pop_not_enough_reports_false() {
        let mut s = TokenStream::new(["a"]);
        let d = data();
        let (vals, enough) = s.pop_n(3, Some(0), &[], &d);
        assert!(!enough);
        assert_eq!(vals, vec!["a"]);
    }

    #[test]
    fn snapshot_includes_later_popped_excludes_later_pushed() {
        let mut s = TokenStream::new(["a", "b", "c"]);
        let id = s.snapshot();
        let d = data();
        s.pop(&d); // pop "a"
        s.push_front(["z"]);
        assert_eq!(s.get_snapshot(id), vec!["a", "b", "c"]);
    }

    #[test]
    fn push_inherits_snapshot_membership_of_current_front() {
        let mut s = TokenStream::new(["a", "b"]);
        let id = s.snapshot();
        s.push_front(["z"]);
        // "z" now sits in front of "a", which was a member of `id`, so "z"
        // inherits membership too.
        let mut snap = s.get_snapshot(id);
        snap.sort();
        let mut expect = vec!["a".to_string(), "b".to_string(), "z".to_string()];
        expect.sort();
        assert_eq!(snap, expect);
    }

    #[test]
    fn breaker_discard_stops_and_consumes_breaking_token() {
        use crate::token::breaker_on_prefix;
        let mut s = TokenStream::new(["a", "b", "--flag", "c"]);
        let d = data();
        let breaker = crate::token::breaker_from_fn(|t, _d| {
            if t.value() == "--flag" {
                crate::token::BreakSignal::stop(true)
            } else {
                crate::token::BreakSignal::CONTINUE
            }
        });
        let _ = breaker_on_prefix; // silence unused import in some configs
        let (vals, _) = s.pop_n(0, None, &[breaker], &d);
        assert_eq!(vals, vec!["a", "b"]);
        assert_eq!(s.used(), vec!["a", "b", "--flag"]);
        assert_eq!(s.remaining(), vec!["c"]);
    }

    #[test]
    fn pushed_tokens_land_at_requested_position() {
        let mut s = TokenStream::new(["a", "c"]);
        s.push_front_at(1, ["b"]);
        assert_eq!(s.remaining(), vec!["a", "b", "c"]);
    }
}
