//! Named word pools
//!
//! Enemy types reference a pool by name. All words are lowercase ASCII.

/// Every pool, keyed by name
pub const WORD_POOLS: &[(&str, &[&str])] = &[
    (
        "common",
        &[
            "cat", "dog", "run", "jump", "word", "type", "fast", "game", "time", "hand", "light",
            "water", "house", "green", "stone", "river", "paper", "table",
        ],
    ),
    (
        "short",
        &[
            "uh", "um", "er", "ah", "oh", "so", "and", "but", "well", "like", "hmm", "erm",
        ],
    ),
    (
        "quiet",
        &[
            "hush", "psst", "shh", "soft", "low", "calm", "still", "muted", "faint", "gentle",
        ],
    ),
    (
        "loud",
        &[
            "boom", "crash", "bang", "roar", "yell", "blast", "thunder", "scream", "clamor",
            "racket",
        ],
    ),
    (
        "tiny",
        &[
            "a", "i", "an", "at", "be", "by", "do", "go", "if", "in", "is", "it", "of", "on", "to",
        ],
    ),
    (
        "compound",
        &[
            "gonna", "wanna", "gotta", "kinda", "sorta", "dunno", "lemme", "gimme", "outta",
            "whatcha",
        ],
    ),
    (
        "jargon",
        &[
            "synergy", "leverage", "paradigm", "bandwidth", "deliverable", "stakeholder",
            "onboarding", "actionable", "roadmap", "scalable",
        ],
    ),
    (
        "palindromes",
        &[
            "level", "radar", "civic", "kayak", "refer", "rotor", "madam", "racecar", "stats",
            "noon", "tenet", "redder",
        ],
    ),
    (
        "typos",
        &[
            "teh", "adn", "hte", "taht", "wrod", "thier", "recieve", "seperate", "occured",
            "definately",
        ],
    ),
    (
        "censored",
        &[
            "redacted", "classified", "withheld", "blocked", "removed", "banned", "silenced",
            "hidden",
        ],
    ),
    (
        "quotes",
        &[
            "nevermore", "eureka", "carpe", "diem", "veni", "vidi", "vici", "cogito", "ergo",
            "sum",
        ],
    ),
    (
        "academic",
        &[
            "epistemology", "hermeneutics", "dialectical", "ontological", "methodology",
            "phenomenology", "historiography", "paradigmatic",
        ],
    ),
    (
        "citations",
        &[
            "source", "reference", "ibid", "citation", "footnote", "appendix", "bibliography",
            "verify", "proof", "evidence",
        ],
    ),
    (
        "misspellings",
        &[
            "accomodate", "embarass", "goverment", "neccessary", "occassion", "tommorow",
            "wierd", "untill", "begining", "beleive",
        ],
    ),
];

/// Pool used by the echo type before any word has been defeated
pub const ECHO_FALLBACK_POOL: &str = "common";

/// Look up a pool by name
pub fn word_pool(name: &str) -> Option<&'static [&'static str]> {
    WORD_POOLS
        .iter()
        .find(|(pool, _)| *pool == name)
        .map(|(_, words)| *words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_are_lowercase_ascii() {
        for (name, words) in WORD_POOLS {
            assert!(!words.is_empty(), "pool {} is empty", name);
            for word in *words {
                assert!(
                    !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase()),
                    "pool {} has bad word {:?}",
                    name,
                    word
                );
            }
        }
    }

    #[test]
    fn test_fallback_pool_exists() {
        assert!(word_pool(ECHO_FALLBACK_POOL).is_some());
        assert!(word_pool("nonexistent").is_none());
    }
}
