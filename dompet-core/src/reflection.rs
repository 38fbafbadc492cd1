//! Pronoun reflection for echoing a user's sentence back at them
//! ("saya punya uang" -> "kamu punya uang").

/// Reflect a sentence: lower-case, swap first/second person pronouns, and
/// re-join tokens with single spaces.
pub fn reflect(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .map(reflect_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn reflect_word(word: &str) -> &str {
    match reflect_pronoun(word).or_else(|| reflect_verb(word)) {
        Some(mapped) => mapped,
        None => word,
    }
}

fn reflect_pronoun(word: &str) -> Option<&'static str> {
    let out = match word {
        "saya" => "kamu",
        "aku" => "kamu",
        "gue" | "gw" => "lu",
        "kamu" => "saya",
        "lu" => "gue",
        "anda" => "saya",
        "my" => "your",
        "mine" => "yours",
        "i" | "me" => "you",
        "you" => "me",
        "your" => "my",
        "yours" => "mine",
        _ => return None,
    };
    Some(out)
}

// Verbs map to themselves for now; person agreement would hook in here.
fn reflect_verb(word: &str) -> Option<&'static str> {
    let out = match word {
        "punya" => "punya",
        "adalah" => "adalah",
        "ingin" => "ingin",
        "mau" => "mau",
        "bisa" => "bisa",
        "akan" => "akan",
        "sudah" => "sudah",
        "belum" => "belum",
        _ => return None,
    };
    Some(out)
}
