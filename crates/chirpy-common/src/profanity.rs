//! Chirp profanity filter.
//!
//! Matching is literal and per word: the body is split on single spaces and
//! a word is masked only when its lowercase form is on the list. Words with
//! punctuation attached (`"Sharbert!"`) are left alone.

/// Words that never make it into a stored chirp.
pub const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replacement for a masked word.
pub const MASK: &str = "****";

/// Replace every profane word in `body` with [`MASK`].
pub fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if is_profane(word) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_profane(word: &str) -> bool {
    let lowered = word.to_lowercase();
    PROFANE_WORDS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_listed_words_case_insensitively() {
        assert_eq!(
            clean_body("This is a kerfuffle opinion I need to share with the world"),
            "This is a **** opinion I need to share with the world"
        );
        assert_eq!(clean_body("I hear Mastodon is better than Chirpy. sharbert I need to migrate"),
            "I hear Mastodon is better than Chirpy. **** I need to migrate");
        assert_eq!(clean_body("FORNAX Fornax fornax"), "**** **** ****");
    }

    #[test]
    fn punctuation_keeps_word_unmasked() {
        assert_eq!(clean_body("Sharbert! kerfuffle."), "Sharbert! kerfuffle.");
    }

    #[test]
    fn spacing_is_preserved() {
        assert_eq!(clean_body("  kerfuffle  "), "  ****  ");
        assert_eq!(clean_body(""), "");
    }
}
