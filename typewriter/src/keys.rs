use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Something the user asked the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Type(char),
    Backspace,
    /// Add the extend preset at this index
    Extend(usize),
    Restart,
    Quit,
}

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;

    /// Returns true if the keyevent matches the given character, and is being pressed with CTRL as
    /// a modifier.
    fn is_ctrl_press_char(&self, character: char) -> bool;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.contains(mods)
    }

    fn is_ctrl_press_char(&self, character: char) -> bool {
        self.is_press()
            && self.has_mods(KeyModifiers::CONTROL)
            && self.code == KeyCode::Char(character)
    }
}

/// Map a key press to an [Action].
///
/// `F1`, `F2`, ... pick the extend presets in order; keys past `presets` do nothing.
pub fn action_for(key: &KeyEvent, presets: usize) -> Option<Action> {
    if !key.is_press() {
        return None;
    }

    if key.is_ctrl_press_char('q') {
        return Some(Action::Quit);
    }
    if key.is_ctrl_press_char('r') {
        return Some(Action::Restart);
    }
    if key.has_mods(KeyModifiers::CONTROL) || key.has_mods(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(char) => Some(Action::Type(char)),
        KeyCode::F(number) => {
            let index = usize::from(number).checked_sub(1)?;
            (index < presets).then_some(Action::Extend(index))
        }
        _ => None,
    }
}
