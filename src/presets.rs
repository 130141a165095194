//! The four canned datasets offered next to the input form.

pub const PRESETS: [&str; 4] = [
    include_str!("../presets/preset1.csv"),
    include_str!("../presets/preset2.csv"),
    include_str!("../presets/preset3.csv"),
    include_str!("../presets/preset4.csv"),
];

/// One-based, like the buttons on the page.
pub fn preset(number: usize) -> Option<&'static str> {
    number.checked_sub(1).and_then(|i| PRESETS.get(i)).copied()
}
