//! Spelling aid: one memorable word per password character.
//!
//! Matching is exact on the first letter, so an uppercase character can only
//! hit [`UPPER_WORDS`] and a lowercase one only [`LOWER_WORDS`]. Characters
//! without a word are spelled as themselves.

pub const UPPER_WORDS: [&str; 26] = [
    "Apache", "Beach", "Colorado", "Dalton", "East", "Friend", "Glad", "Hipopotamus",
    "Illinois", "Jack", "Kilos", "Light", "March", "North", "Octal", "Pint", "Quantum",
    "Rare", "South", "Tim", "Upper", "Vibe", "West", "Xeno", "Yes", "Zebra",
];

pub const LOWER_WORDS: [&str; 26] = [
    "alabama", "bike", "cat", "done", "epic", "fail", "grocery", "high", "itchy", "john",
    "koala", "low", "man", "new", "off", "plural", "queue", "rich", "slow", "tiny", "use",
    "view", "wear", "xeno", "youth", "zebra",
];

fn word_for(c: char) -> Option<&'static str> {
    UPPER_WORDS
        .iter()
        .chain(LOWER_WORDS.iter())
        .find(|word| word.starts_with(c))
        .copied()
}

/// Spell `password` as space separated words.
pub fn spell_password(password: &str) -> String {
    let mut spelled = String::new();
    for c in password.chars() {
        if !spelled.is_empty() {
            spelled.push(' ');
        }
        match word_for(c) {
            Some(word) => spelled.push_str(word),
            None => spelled.push(c),
        }
    }
    spelled
}

// ------------------ TESTS ------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_uppercase() {
        assert_eq!(spell_password("A"), "Apache");
    }

    #[test]
    fn test_mixed_password() {
        assert_eq!(spell_password("aB3"), "alabama Beach 3");
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(spell_password(""), "");
    }

    #[test]
    fn test_symbols_and_multibyte_pass_through() {
        assert_eq!(spell_password("€x!"), "€ xeno !");
    }

    #[test]
    fn test_deterministic() {
        let pwd = "Zz9&Qq";
        assert_eq!(spell_password(pwd), spell_password(pwd));
    }

    #[test]
    fn test_case_sensitive_lookup() {
        assert_eq!(spell_password("x"), "xeno");
        assert_eq!(spell_password("X"), "Xeno");
        assert_eq!(spell_password("h"), "high");
        assert_eq!(spell_password("H"), "Hipopotamus");
    }

    #[test]
    fn test_every_letter_has_a_word() {
        for c in ('a'..='z').chain('A'..='Z') {
            assert_ne!(spell_password(&c.to_string()), c.to_string());
        }
    }

    #[test]
    fn test_one_token_per_char() {
        let pwd = "a1 b";
        // The space itself is spelled as a space token
        assert_eq!(spell_password(pwd), "alabama 1   bike");
    }
}
