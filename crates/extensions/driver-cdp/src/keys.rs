//! Keyboard vocabulary for CDP key events.

/// One physical key as CDP wants it described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDef {
    pub key: &'static str,
    pub code: &'static str,
    pub key_code: u32,
    /// Text the key inserts, if any.
    pub text: Option<&'static str>,
}

const NAMED_KEYS: &[KeyDef] = &[
    KeyDef { key: "Enter", code: "Enter", key_code: 13, text: Some("\r") },
    KeyDef { key: "Tab", code: "Tab", key_code: 9, text: None },
    KeyDef { key: "Escape", code: "Escape", key_code: 27, text: None },
    KeyDef { key: "Backspace", code: "Backspace", key_code: 8, text: None },
    KeyDef { key: "Delete", code: "Delete", key_code: 46, text: None },
    KeyDef { key: "ArrowDown", code: "ArrowDown", key_code: 40, text: None },
    KeyDef { key: "ArrowUp", code: "ArrowUp", key_code: 38, text: None },
];

/// Look up a named key, case-insensitively.
pub fn named_key(name: &str) -> Option<KeyDef> {
    NAMED_KEYS
        .iter()
        .find(|k| k.key.eq_ignore_ascii_case(name))
        .copied()
}

/// Modifier bit flags from modifier names.
pub fn modifier_flags(modifiers: &[&str]) -> i32 {
    let mut flags = 0;
    for m in modifiers {
        match m.to_lowercase().as_str() {
            "alt" => flags |= 1,
            "control" | "ctrl" => flags |= 2,
            "meta" | "command" | "cmd" => flags |= 4,
            "shift" => flags |= 8,
            _ => {}
        }
    }
    flags
}

/// Modifier for the platform's select-all shortcut.
pub fn select_all_modifier() -> i32 {
    if cfg!(target_os = "macos") {
        modifier_flags(&["Meta"])
    } else {
        modifier_flags(&["Control"])
    }
}

/// A single step of keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keystroke {
    SelectAll,
    Key(KeyDef),
    Char(char),
}

/// Keystrokes that replace a focused field's content with `text`.
pub fn replace_text_plan(text: &str) -> Vec<Keystroke> {
    let mut plan = Vec::with_capacity(text.chars().count() + 2);
    plan.push(Keystroke::SelectAll);
    if let Some(backspace) = named_key("Backspace") {
        plan.push(Keystroke::Key(backspace));
    }
    plan.extend(text.chars().map(Keystroke::Char));
    plan
}
