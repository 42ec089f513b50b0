//! User-facing operations, shared by the menu buttons and the keyboard.

use crate::rules::Pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Kill every cell
    Clear,
    /// Random fill
    Randomize,
    /// Advance one generation
    Step,
    /// Start stepping on a timer
    Run,
    /// Stop the timer
    Stop,
    /// Run if idle, stop if running
    ToggleRun,
    /// Export the grid to a file
    Save,
    /// Load a preset and start running
    LoadPreset(Pattern),
    /// Reallocate the grid to fill the window
    FitToWindow,
    /// Show or hide the side menu
    ToggleMenu,
}

impl Command {
    /// Keyboard shortcut for a key's text (case-insensitive). Digits select
    /// presets in menu order.
    pub fn for_key(key: &str) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        let command = match key.as_str() {
            "c" => Command::Clear,
            "r" => Command::Randomize,
            "n" => Command::Step,
            "s" => Command::Save,
            "f" => Command::FitToWindow,
            digit => {
                let index = digit.parse::<usize>().ok()?.checked_sub(1)?;
                Command::LoadPreset(*Pattern::ALL.get(index)?)
            }
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_case_insensitively() {
        assert_eq!(Command::for_key("c"), Some(Command::Clear));
        assert_eq!(Command::for_key("R"), Some(Command::Randomize));
        // Space arrives as a named key and is mapped by the window shell
        assert_eq!(Command::for_key(" "), None);
        assert_eq!(Command::for_key("q"), None);
    }

    #[test]
    fn digits_select_presets() {
        assert_eq!(Command::for_key("1"), Some(Command::LoadPreset(Pattern::Glider)));
        assert_eq!(Command::for_key("2"), Some(Command::LoadPreset(Pattern::Puffer)));
        assert_eq!(Command::for_key("0"), None);
        assert_eq!(Command::for_key("9"), None);
    }
}
