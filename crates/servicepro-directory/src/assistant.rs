//! Canned help replies for the chat box.

const RULES: &[(&[&str], &str)] = &[
    (&["plumber"], "I can filter for Plumbers! Use the dropdown on the left."),
    (&["mechanic"], "Looking for Mechanics? Check the 'Service Type' filter."),
    (&["voice"], "Click the Speaker icon on the map to enable Voice Navigation."),
    (&["admin"], "Login as 'admin' to see the Admin Panel."),
    (&["hello", "hi"], "Hi there! I am ServiceBot. How can I help?"),
];

const FALLBACK: &str =
    "I can help with shops, voice nav, or filters. Try asking 'Where are plumbers?'";

/// First matching rule wins; keywords match as case-insensitive substrings.
#[must_use]
pub fn reply(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map_or(FALLBACK, |(_, answer)| answer)
}
