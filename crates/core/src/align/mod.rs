#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::hash::Hash;

use crate::types::{Alignment, MatchingBlock};

/// Ratcliff/Obershelp alignment of two sequences.
///
/// Finds the longest common run, then recurses into the pieces left and right of it.
/// Every element takes part in matching; there is no junk or popularity heuristic.
/// Blocks come back sorted by their position in `a`, non-overlapping, with adjacent runs
/// merged.
pub fn align<T>(a: &[T], b: &[T]) -> Alignment
where
    T: Eq + Hash,
{
    let matcher = SequenceMatcher::new(a, b);
    let blocks = matcher.matching_blocks();
    let matched: usize = blocks.iter().map(|block| block.len).sum();
    Alignment {
        ratio: similarity_ratio(matched, a.len() + b.len()),
        blocks,
    }
}

/// `2 * matched / total`, where two empty sequences count as identical.
pub fn similarity_ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (2.0 * matched as f64 / total as f64).clamp(0.0, 1.0)
}

struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T> SequenceMatcher<'a, T>
where
    T: Eq + Hash,
{
    fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, item) in b.iter().enumerate() {
            b2j.entry(item).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest run with `a[alo..ahi]` and `b[blo..bhi]`; ties go to the run starting
    /// earliest in `a`, then earliest in `b`. Zero length when nothing matches.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let mut best = MatchingBlock {
            a: alo,
            b: blo,
            len: 0,
        };
        // j2len[j] = length of the run ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            next_j2len.clear();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best.len {
                        best = MatchingBlock {
                            a: i + 1 - k,
                            b: j + 1 - k,
                            len: k,
                        };
                    }
                }
            }
            std::mem::swap(&mut j2len, &mut next_j2len);
        }

        best
    }

    fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.len == 0 {
                continue;
            }
            found.push(block);
            if alo < block.a && blo < block.b {
                pending.push((alo, block.a, blo, block.b));
            }
            if block.a + block.len < ahi && block.b + block.len < bhi {
                pending.push((block.a + block.len, ahi, block.b + block.len, bhi));
            }
        }

        found.sort_unstable();
        merge_adjacent(found)
    }
}

fn merge_adjacent(blocks: Vec<MatchingBlock>) -> Vec<MatchingBlock> {
    let mut out: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let Some(last) = out.last_mut()
            && last.a + last.len == block.a
            && last.b + last.len == block.b
        {
            last.len += block.len;
            continue;
        }
        out.push(block);
    }
    out
}
