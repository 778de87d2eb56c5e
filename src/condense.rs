use crate::pattern::find_patterns;

/// A common-replacer pair: a short binary pattern and the single placeholder
/// symbol it is rewritten to before glyph translation.
pub type Replacer = (&'static str, char);

/// The two fixed common-replacer substitutions applied after run-length
/// encoding. Charsets reserve a glyph slot for each placeholder.
pub const COMMON_REPLACERS: [Replacer; 2] = [("100", '_'), ("110", '+')];

/// Compacts a binary digit string.
///
/// Three passes:
/// 1. Run-length: each maximal run of an identical digit is emitted either
///    literally (short runs) or as the digit followed by the decimal run
///    counter. The counter is `run length - 1`, and the final run is always
///    written in counter form regardless of length. Output compatibility
///    with existing condensed data depends on this exact representation.
/// 2. The two common-replacer substitutions, in order.
/// 3. Pattern substitution: decimal digits absent from the pass-2 output are
///    repurposed as tokens for the most frequent 3-4 character substrings,
///    but only when the aggregate characters saved strictly exceed the
///    aggregate cost of writing the `token pattern` directory. When applied,
///    the directory entries are joined with `.` and prefixed, terminated by
///    `:`.
pub fn condense(binary: &str, replacers: &[Replacer; 2]) -> String {
    let mut out = String::with_capacity(binary.len());
    let mut last: Option<char> = None;
    let mut count: usize = 0;

    for c in binary.chars() {
        if Some(c) == last {
            count += 1;
            continue;
        }
        match last {
            Some(prev) if count >= 2 => {
                out.push(prev);
                out.push_str(&count.to_string());
            }
            Some(prev) => {
                for _ in 0..=count {
                    out.push(prev);
                }
            }
            None => {}
        }
        last = Some(c);
        count = 0;
    }
    // The final run is always digit + counter, even when short.
    if let Some(prev) = last {
        out.push(prev);
    }
    out.push_str(&count.to_string());

    for (pattern, placeholder) in replacers {
        out = out.replace(pattern, &placeholder.to_string());
    }

    let spares: Vec<char> = ('0'..='9').filter(|d| !out.contains(*d)).collect();
    let patterns = find_patterns(&out, 4, 3);

    struct Substitution {
        token: char,
        replaces: String,
        uses: usize,
        saves: usize,
    }

    let mut saved = 0usize;
    // The ':' terminator is spent even before any directory entry.
    let mut spent = 1usize;
    let mut substitutions = Vec::new();
    for (i, &token) in spares.iter().enumerate() {
        let Some((chunk, occurrences)) = patterns.get(i) else {
            continue;
        };
        let len = chunk.chars().count();
        let substitution = Substitution {
            token,
            replaces: chunk.clone(),
            uses: 1 + len,
            saves: len * occurrences,
        };
        saved += substitution.saves;
        spent += substitution.uses;
        substitutions.push(substitution);
    }

    if saved > spent {
        let mut directory = Vec::with_capacity(substitutions.len());
        for substitution in &substitutions {
            directory.push(format!("{}{}", substitution.token, substitution.replaces));
            out = out.replace(&substitution.replaces, &substitution.token.to_string());
        }
        out = format!("{}:{}", directory.join("."), out);
    }

    out
}

/// Reverses [`condense`].
///
/// Splits off the directory at the first `:` (when present) and undoes token
/// substitutions, undoes the common-replacer substitutions, then expands each
/// `digit counter` pair back into `counter + 1` repetitions of the digit.
/// The final reconstructed character is re-appended once; callers regrouping
/// into fixed-width chunks drop the surplus bit.
///
/// Input that was not produced by [`condense`] with the same replacer
/// configuration degrades to garbage silently rather than failing.
pub fn decondense(condensed: &str, replacers: &[Replacer; 2]) -> String {
    let mut text = match condensed.split_once(':') {
        Some((directory, body)) => {
            let mut body = body.to_string();
            for entry in directory.split('.') {
                let mut symbols = entry.chars();
                if let Some(token) = symbols.next() {
                    let replaces: String = symbols.collect();
                    body = body.replace(token, &replaces);
                }
            }
            body
        }
        None => condensed.to_string(),
    };

    for (pattern, placeholder) in replacers {
        text = text.replace(*placeholder, pattern);
    }

    let symbols: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in symbols.iter().enumerate() {
        if let Some(counter) = c.to_digit(10) {
            if counter >= 2 {
                if i > 0 {
                    for _ in 0..=counter {
                        out.push(symbols[i - 1]);
                    }
                }
                continue;
            }
        }
        // A digit directly followed by a run counter is consumed by the
        // counter's expansion, not emitted on its own.
        match symbols.get(i + 1).and_then(|next| next.to_digit(10)) {
            Some(next) if next <= 1 => out.push(c),
            _ => {}
        }
    }

    if let Some(tail) = out.chars().last() {
        out.push(tail);
    }
    out
}
