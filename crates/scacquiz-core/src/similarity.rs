//! String normalization and similarity primitives.
//!
//! Shared by question generation (detecting near-duplicate carrier names)
//! and answer evaluation (the last-resort fuzzy match). All functions are
//! pure and operate on chars, not bytes.

/// Lowercase and trim.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// [`normalize`], then drop whitespace, hyphens, and underscores.
///
/// Collapses code-like variants: "Con-way" and "conway" compare equal.
pub fn tight_normalize(s: &str) -> String {
    normalize(s)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect()
}

/// Remove every parenthesized segment and collapse the remaining
/// whitespace.
///
/// "Estes Express Lines (Midwest)" becomes "Estes Express Lines".
pub fn strip_parenthetical(s: &str) -> String {
    let mut kept = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => kept.push(c),
            _ => {}
        }
    }
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Symmetric similarity ratio in `[0.0, 1.0]`.
///
/// Ratcliff/Obershelp: find the longest common substring, recurse on the
/// pieces to its left and right, and score twice the matched char count
/// over the combined length. Two empty strings compare equal; an empty
/// string never matches a non-empty one.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let matched = matched_len(&a, &b);
    (2.0 * matched as f64) / ((a.len() + b.len()) as f64)
}

fn matched_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (start_a, start_b, len) = longest_common_run(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..start_a], &b[..start_b])
        + matched_len(&a[start_a + len..], &b[start_b + len..])
}

/// Longest common substring as `(start_a, start_b, len)`, len 0 when the
/// inputs share no character. Rolling-row dynamic table, O(|a| * |b|).
fn longest_common_run(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    let mut prev = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                row[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = row;
    }
    best
}
