//! English number words in both directions, as used by query normalization.

use lazy_static::lazy_static;
use std::collections::HashMap;

const LESS_THAN_TWENTY: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = ["", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety"];

const SCALES: [(u64, &str); 5] = [
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

lazy_static! {
    static ref WORD_VALUES: HashMap<&'static str, u64> = {
        let mut m = HashMap::new();
        for (i, w) in LESS_THAN_TWENTY.iter().enumerate() {
            m.insert(*w, i as u64);
        }
        for (i, w) in TENS.iter().enumerate().skip(2) {
            m.insert(*w, i as u64 * 10);
        }
        m.insert("hundred", 100);
        for (value, w) in SCALES {
            m.insert(w, value);
        }
        m
    };
}

/// Spell out `n`: `42` becomes `"forty-two"`, `1234` becomes
/// `"one thousand, two hundred thirty-four"`.
pub fn to_words(n: u64) -> String {
    if n == 0 {
        return LESS_THAN_TWENTY[0].to_string();
    }
    let mut words = Vec::new();
    push_words(n, &mut words);
    let joined = words.join(" ");
    joined.strip_suffix(',').map(str::to_string).unwrap_or(joined)
}

fn push_words(mut n: u64, words: &mut Vec<String>) {
    while n > 0 {
        if n < 20 {
            words.push(LESS_THAN_TWENTY[n as usize].to_string());
            n = 0;
        } else if n < 100 {
            let mut word = TENS[(n / 10) as usize].to_string();
            if n % 10 != 0 {
                word.push('-');
                word.push_str(LESS_THAN_TWENTY[(n % 10) as usize]);
            }
            words.push(word);
            n = 0;
        } else if n < 1_000 {
            words.push(format!("{} hundred", to_words(n / 100)));
            n %= 100;
        } else {
            let (scale, name) = SCALES
                .iter()
                .copied()
                .find(|(value, _)| n >= *value)
                .unwrap_or(SCALES[SCALES.len() - 1]);
            words.push(format!("{} {name},", to_words(n / scale)));
            n %= scale;
        }
    }
}

/// Parse a single spelled-out number word (`"seven"`, `"hundred"`).
/// Multi-word phrases are not reconstructed.
pub fn word_to_number(word: &str) -> Option<u64> {
    WORD_VALUES.get(word).copied()
}
