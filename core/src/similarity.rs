use std::collections::HashMap;

/// Dice coefficient over character bigrams, whitespace ignored. Always in `[0, 1]`.
pub fn compare_two_strings(first: &str, second: &str) -> f64 {
    let first: Vec<char> = first.chars().filter(|c| !c.is_whitespace()).collect();
    let second: Vec<char> = second.chars().filter(|c| !c.is_whitespace()).collect();

    if first == second {
        return 1.0;
    }
    if first.len() < 2 || second.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for w in first.windows(2) {
        *bigrams.entry((w[0], w[1])).or_insert(0) += 1;
    }

    let mut intersection = 0usize;
    for w in second.windows(2) {
        if let Some(count) = bigrams.get_mut(&(w[0], w[1])) {
            if *count > 0 {
                *count -= 1;
                intersection += 1;
            }
        }
    }

    (2 * intersection) as f64 / (first.len() + second.len() - 2) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings() {
        assert_eq!(compare_two_strings("two-sum", "two-sum"), 1.0);
        assert_eq!(compare_two_strings("two sum", "twosum"), 1.0);
        assert_eq!(compare_two_strings("", ""), 1.0);
    }

    #[test]
    fn disjoint_and_short_strings() {
        assert_eq!(compare_two_strings("abc", "xyz"), 0.0);
        assert_eq!(compare_two_strings("a", "abc"), 0.0);
    }

    #[test]
    fn partial_overlap() {
        // tw wo o- -s su um  vs  tw wo os su um
        let sim = compare_two_strings("two-sum", "two sum");
        assert!((sim - 8.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_bigrams_count_once_each() {
        // aa aa  vs  aa aa aa
        assert!((compare_two_strings("aaa", "aaaa") - 0.8).abs() < 1e-12);
    }
}
