//! Disambiguation engine for the Ouroboros tokenizer
//!
//! One operation: resolve which rule wins at a cursor position. Rules are
//! tried in registry order and the first accepted rule wins outright: order
//! strictly dominates match length, so a later rule never gets the chance to
//! offer a longer match. Acceptance means the pattern matched anchored
//! exactly at the cursor (inside the scan window) and the rule's context
//! predicates held over the full input. Already-emitted text is only ever
//! inspected by lookbehinds, never re-tokenized.

use crate::ouro::rules::Registry;
use crate::ouro::token::TokenCategory;
use std::ops::Range;

/// An accepted rule match at a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub category: TokenCategory,
    /// Matched span length in bytes
    pub length: usize,
}

/// Resolve the best match at `cursor`.
///
/// `window` bounds what the pattern may consume (`0..input.len()` for
/// top-level scans, the parent span for nested ones); predicates always see
/// the whole input, so a lookahead inside a member span can still inspect
/// the `(` beyond the span end.
pub fn best_match_at(
    registry: &Registry,
    input: &str,
    window: Range<usize>,
    cursor: usize,
) -> Option<RuleMatch> {
    let haystack = &input[cursor..window.end];
    for rule in registry.rules_in_priority_order() {
        if let Some(lookbehind) = rule.lookbehind {
            if !lookbehind(input, window.start, cursor) {
                continue;
            }
        }
        let Some(found) = rule.matcher.find(haystack) else {
            continue;
        };
        if let Some(lookahead) = rule.lookahead {
            if !lookahead(input, window.start, cursor + found.end()) {
                continue;
            }
        }
        return Some(RuleMatch {
            category: rule.category,
            length: found.end(),
        });
    }
    None
}
