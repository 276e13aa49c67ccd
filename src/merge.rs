use crate::vocab::Symbol;

/// Replace every non-overlapping occurrence of `(left, right)` with `result`,
/// scanning left to right. Returns the number of merges made.
///
/// Compacts in place: a merged position is never re-examined, so `a a a`
/// merged on `(a, a)` becomes `aa a`.
pub fn merge_pair(symbols: &mut Vec<Symbol>, left: &str, right: &str, result: &Symbol) -> usize {
    if symbols.len() < 2 {
        return 0;
    }

    let mut merges = 0;
    let mut write_pos = 0;
    let mut read_pos = 0;
    while read_pos + 1 < symbols.len() {
        if *symbols[read_pos] == *left && *symbols[read_pos + 1] == *right {
            symbols[write_pos] = result.clone();
            read_pos += 2;
            merges += 1;
        } else {
            symbols.swap(write_pos, read_pos);
            read_pos += 1;
        }
        write_pos += 1;
    }
    if read_pos < symbols.len() {
        symbols.swap(write_pos, read_pos);
        write_pos += 1;
    }
    symbols.truncate(write_pos);
    merges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(parts: &[&str]) -> Vec<Symbol> {
        parts.iter().map(|&s| Symbol::from(s)).collect()
    }

    fn as_strs(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(|s| &**s).collect()
    }

    #[test]
    fn test_merge_single() {
        let mut word = symbols(&["l", "o", "w", " "]);
        let n = merge_pair(&mut word, "l", "o", &Symbol::from("lo"));
        assert_eq!(n, 1);
        assert_eq!(as_strs(&word), vec!["lo", "w", " "]);
    }

    #[test]
    fn test_merge_multiple() {
        let mut word = symbols(&["a", "b", "c", "a", "b"]);
        let n = merge_pair(&mut word, "a", "b", &Symbol::from("ab"));
        assert_eq!(n, 2);
        assert_eq!(as_strs(&word), vec!["ab", "c", "ab"]);
    }

    #[test]
    fn test_merge_overlap_is_greedy() {
        let mut word = symbols(&["a", "a", "a"]);
        let n = merge_pair(&mut word, "a", "a", &Symbol::from("aa"));
        assert_eq!(n, 1);
        assert_eq!(as_strs(&word), vec!["aa", "a"]);

        let mut word = symbols(&["a", "a", "a", "a"]);
        let n = merge_pair(&mut word, "a", "a", &Symbol::from("aa"));
        assert_eq!(n, 2);
        assert_eq!(as_strs(&word), vec!["aa", "aa"]);
    }

    #[test]
    fn test_merge_no_match() {
        let mut word = symbols(&["x", "y", " "]);
        let n = merge_pair(&mut word, "y", "x", &Symbol::from("yx"));
        assert_eq!(n, 0);
        assert_eq!(as_strs(&word), vec!["x", "y", " "]);

        let mut single = symbols(&["x"]);
        assert_eq!(merge_pair(&mut single, "x", "x", &Symbol::from("xx")), 0);
        assert_eq!(as_strs(&single), vec!["x"]);
    }

    #[test]
    fn test_merge_at_end() {
        let mut word = symbols(&["l", "o", "w", " "]);
        let n = merge_pair(&mut word, "w", " ", &Symbol::from("w "));
        assert_eq!(n, 1);
        assert_eq!(as_strs(&word), vec!["l", "o", "w "]);
    }
}
