// Static phrase denylist, checked before any quota is spent or provider is called

// Phrases are matched as lower-case substrings
pub const RED_FLAGS: &[&str] = &[
    // self-harm
    "kill myself",
    "end my life",
    "suicide",
    "self-harm",
    "self harm",
    "hurt myself",
    // violence / weapons
    "hurt other people",
    "kill someone",
    "murder",
    "shooting",
    "bomb",
    "explosive",
    // medical diagnosis
    "diagnose me",
    "what medication should i take",
    // legal representation
    "legal advice",
    "should i plead",
    "defend me in court",
];

/// Returns true when `text` contains any denylisted phrase, ignoring case.
pub fn is_unsafe(text: &str) -> bool {
    let lowered = text.to_lowercase();
    RED_FLAGS.iter().any(|phrase| lowered.contains(phrase))
}
