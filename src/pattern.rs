use std::collections::HashMap;

/// A repeated substring found by [`find_patterns`], with its occurrence count.
pub type Pattern = (String, usize);

/// Finds the most valuable repeated fixed-length substrings of `text`.
///
/// For each length from `max_len` down to `min_len`, the text is chunked into
/// non-overlapping substrings of that length (the last partial chunk
/// included) and occurrences are tallied per distinct chunk value. All
/// lengths are merged into one table, sorted descending by
/// `occurrences * length`, then restricted to entries whose length equals the
/// top entry's length and whose count exceeds 1.
///
/// This deliberately biases toward the single longest length that has any
/// repeats rather than a global optimum: the condenser's savings arithmetic
/// assumes candidates of uniform length.
pub fn find_patterns(text: &str, max_len: usize, min_len: usize) -> Vec<Pattern> {
    let chars: Vec<char> = text.chars().collect();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for len in (min_len..=max_len).rev() {
        if len == 0 {
            continue;
        }
        let mut n = 0;
        while n < chars.len() {
            let end = (n + len).min(chars.len());
            let chunk: String = chars[n..end].iter().collect();
            if !counts.contains_key(&chunk) {
                order.push(chunk.clone());
            }
            *counts.entry(chunk).or_insert(0) += 1;
            n += len;
        }
    }

    let mut entries: Vec<Pattern> = order
        .into_iter()
        .map(|chunk| {
            let count = counts[&chunk];
            (chunk, count)
        })
        .collect();
    // Stable sort keeps first-seen order between equal scores.
    entries.sort_by_key(|(chunk, count)| std::cmp::Reverse(count * chunk.chars().count()));

    let top_len = match entries.first() {
        Some((chunk, _)) => chunk.chars().count(),
        None => return Vec::new(),
    };
    entries.retain(|(chunk, count)| *count > 1 && chunk.chars().count() == top_len);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_repeating_length_wins() {
        let patterns = find_patterns("aaabbbaaabbb", 4, 3);
        assert_eq!(
            patterns,
            vec![("aaa".to_string(), 2), ("bbb".to_string(), 2)]
        );
    }

    #[test]
    fn stable_across_repeated_calls() {
        let first = find_patterns("010010010010", 4, 3);
        for _ in 0..10 {
            assert_eq!(find_patterns("010010010010", 4, 3), first);
        }
    }

    #[test]
    fn no_repeats_yields_empty() {
        assert!(find_patterns("abcdefgh", 4, 3).is_empty());
        assert!(find_patterns("", 4, 3).is_empty());
    }

    #[test]
    fn partial_tail_chunk_is_tallied() {
        // "ab" appears as the tail chunk of the length-4 pass and twice in
        // the length-3 pass tail; the filter still works on merged counts.
        let patterns = find_patterns("ababab", 4, 3);
        for (chunk, count) in &patterns {
            assert!(*count > 1, "{chunk} counted once");
        }
    }
}
