use crossterm::event::{KeyModifiers, ModifierKeyCode};

/// A modifier key, left/right agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    Meta,
}

impl Modifier {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "shift" => Some(Modifier::Shift),
            "control" | "ctrl" => Some(Modifier::Control),
            "alt" => Some(Modifier::Alt),
            "meta" | "cmd" | "super" => Some(Modifier::Meta),
            _ => None,
        }
    }

    /// Does a pressed modifier key match this setting?
    pub fn matches_key(self, code: ModifierKeyCode) -> bool {
        use ModifierKeyCode::*;
        match self {
            Modifier::Shift => matches!(code, LeftShift | RightShift),
            Modifier::Control => matches!(code, LeftControl | RightControl),
            Modifier::Alt => matches!(code, LeftAlt | RightAlt),
            Modifier::Meta => matches!(code, LeftMeta | RightMeta | LeftSuper | RightSuper),
        }
    }

    /// Is this modifier held, according to an event's modifier flags?
    pub fn matches_flags(self, flags: KeyModifiers) -> bool {
        match self {
            Modifier::Shift => flags.contains(KeyModifiers::SHIFT),
            Modifier::Control => flags.contains(KeyModifiers::CONTROL),
            Modifier::Alt => flags.contains(KeyModifiers::ALT),
            Modifier::Meta => {
                flags.intersects(KeyModifiers::META | KeyModifiers::SUPER)
            }
        }
    }
}

/// Editor settings that can be customized via the Rhai config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Held to scrub a numeric literal.
    pub slider_modifier: Modifier,
    /// Held while moving the mouse to inspect call expressions.
    pub hover_modifier: Modifier,
}

impl Default for Settings {
    fn default() -> Self {
        // Cmd on Macs, Shift elsewhere, matching what users of each
        // platform expect to be free.
        let slider_modifier = if cfg!(target_os = "macos") {
            Modifier::Meta
        } else {
            Modifier::Shift
        };
        Self {
            slider_modifier,
            hover_modifier: Modifier::Control,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Modifier::from_name("Shift"), Some(Modifier::Shift));
        assert_eq!(Modifier::from_name("ctrl"), Some(Modifier::Control));
        assert_eq!(Modifier::from_name("cmd"), Some(Modifier::Meta));
        assert_eq!(Modifier::from_name("hyper"), None);
    }

    #[test]
    fn either_side_of_a_modifier_matches() {
        assert!(Modifier::Shift.matches_key(ModifierKeyCode::LeftShift));
        assert!(Modifier::Shift.matches_key(ModifierKeyCode::RightShift));
        assert!(!Modifier::Shift.matches_key(ModifierKeyCode::LeftControl));
    }

    #[test]
    fn flags_match_their_modifier() {
        assert!(Modifier::Control.matches_flags(KeyModifiers::CONTROL));
        assert!(!Modifier::Control.matches_flags(KeyModifiers::ALT));
        assert!(Modifier::Meta.matches_flags(KeyModifiers::SUPER));
    }

    #[test]
    fn default_hover_modifier_is_control() {
        assert_eq!(Settings::default().hover_modifier, Modifier::Control);
    }
}
