//! Maps symbolic key tokens to session bindings.

use crate::models::Direction;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyMapError {
    #[error("unknown binding `{0}`")]
    UnknownBinding(String),
    #[error("label binding for key `{0}` has no label")]
    EmptyLabel(String),
    #[error("empty key token")]
    EmptyToken,
}

/// A key press as seen by the session, independent of any terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    pub fn token(&self) -> String {
        match self {
            Key::Char(' ') => "space".to_string(),
            Key::Char(c) => c.to_lowercase().collect(),
            Key::Enter => "enter".to_string(),
            Key::Esc => "esc".to_string(),
            Key::Backspace => "backspace".to_string(),
            Key::Tab => "tab".to_string(),
            Key::Left => "left".to_string(),
            Key::Right => "right".to_string(),
            Key::Up => "up".to_string(),
            Key::Down => "down".to_string(),
        }
    }
}

/// Canonical form of a configured key name.
pub fn normalize_token(raw: &str) -> Result<String, KeyMapError> {
    if raw == " " {
        return Ok("space".to_string());
    }
    let token = raw.trim().to_lowercase();
    let token = match token.as_str() {
        "" => return Err(KeyMapError::EmptyToken),
        "return" => "enter".to_string(),
        "escape" => "esc".to_string(),
        "backslash" => "\\".to_string(),
        _ => token,
    };
    Ok(token)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Quit,
    Label(String),
    Comment,
    Goto,
    Step(Direction),
    Jump(Direction),
    Save,
    View,
}

impl Binding {
    pub fn describe(&self) -> String {
        match self {
            Binding::Quit => "Quit".to_string(),
            Binding::Label(label) => label.clone(),
            Binding::Comment => "Custom comment".to_string(),
            Binding::Goto => "Go to record".to_string(),
            Binding::Step(Direction::Backward) => "Previous".to_string(),
            Binding::Step(Direction::Forward) => "Next".to_string(),
            Binding::Jump(Direction::Backward) => "Previous unclassified".to_string(),
            Binding::Jump(Direction::Forward) => "Next unclassified".to_string(),
            Binding::Save => "Save now".to_string(),
            Binding::View => "View image".to_string(),
        }
    }

    /// Direction of a navigation binding, if it is one.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Binding::Step(d) | Binding::Jump(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromStr for Binding {
    type Err = KeyMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(label) = s.strip_prefix("label:") {
            return Ok(Binding::Label(label.to_string()));
        }
        match s.trim().to_lowercase().as_str() {
            "quit" => Ok(Binding::Quit),
            "comment" => Ok(Binding::Comment),
            "goto" => Ok(Binding::Goto),
            "prev" => Ok(Binding::Step(Direction::Backward)),
            "next" => Ok(Binding::Step(Direction::Forward)),
            "prev-unclassified" => Ok(Binding::Jump(Direction::Backward)),
            "next-unclassified" => Ok(Binding::Jump(Direction::Forward)),
            "save" => Ok(Binding::Save),
            "view" => Ok(Binding::View),
            _ => Err(KeyMapError::UnknownBinding(s.to_string())),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Quit => f.write_str("quit"),
            Binding::Label(label) => write!(f, "label:{label}"),
            Binding::Comment => f.write_str("comment"),
            Binding::Goto => f.write_str("goto"),
            Binding::Step(Direction::Backward) => f.write_str("prev"),
            Binding::Step(Direction::Forward) => f.write_str("next"),
            Binding::Jump(Direction::Backward) => f.write_str("prev-unclassified"),
            Binding::Jump(Direction::Forward) => f.write_str("next-unclassified"),
            Binding::Save => f.write_str("save"),
            Binding::View => f.write_str("view"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    pub key: String,
    pub action: String,
}

/// Ordered token → binding table. Insertion order is the display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<(String, Binding)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();
        let defaults = [
            ("q", Binding::Quit),
            ("left", Binding::Step(Direction::Backward)),
            ("down", Binding::Jump(Direction::Backward)),
            ("right", Binding::Step(Direction::Forward)),
            ("up", Binding::Jump(Direction::Forward)),
            ("enter", Binding::Label("Correct".into())),
            ("space", Binding::Label("SNRtooLow".into())),
            ("d", Binding::Label("DontKnow".into())),
            ("a", Binding::Label("DA".into())),
            ("b", Binding::Label("DB".into())),
            ("c", Binding::Label("DC".into())),
            ("z", Binding::Label("DZ".into())),
            ("\\", Binding::Comment),
            ("g", Binding::Goto),
            ("s", Binding::Save),
            ("v", Binding::View),
        ];
        for (token, binding) in defaults {
            map.bindings.push((token.to_string(), binding));
        }
        map
    }
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds `token`, replacing any earlier binding for it in place.
    pub fn bind(&mut self, token: &str, binding: Binding) -> Result<(), KeyMapError> {
        let token = normalize_token(token)?;
        if let Binding::Label(label) = &binding {
            if label.is_empty() {
                return Err(KeyMapError::EmptyLabel(token));
            }
        }
        match self.bindings.iter_mut().find(|(t, _)| *t == token) {
            Some(slot) => slot.1 = binding,
            None => self.bindings.push((token, binding)),
        }
        Ok(())
    }

    pub fn unbind(&mut self, token: &str) -> Result<(), KeyMapError> {
        let token = normalize_token(token)?;
        self.bindings.retain(|(t, _)| *t != token);
        Ok(())
    }

    /// Applies `token = binding` overrides; the value `none` removes a key.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Result<Self, KeyMapError> {
        let mut tokens: Vec<&String> = overrides.keys().collect();
        tokens.sort();
        for token in tokens {
            let value = &overrides[token];
            if value.trim().eq_ignore_ascii_case("none") {
                self.unbind(token)?;
            } else {
                self.bind(token, value.parse()?)?;
            }
        }
        Ok(self)
    }

    pub fn lookup(&self, key: &Key) -> Option<&Binding> {
        let token = key.token();
        self.bindings
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, b)| b)
    }

    /// Instruction lines; navigation that cannot move is left out.
    pub fn help_lines(&self, has_previous: bool, has_next: bool) -> Vec<HelpLine> {
        self.bindings
            .iter()
            .filter(|(_, b)| match b.direction() {
                Some(Direction::Backward) => has_previous,
                Some(Direction::Forward) => has_next,
                None => true,
            })
            .map(|(token, binding)| HelpLine {
                key: display_token(token),
                action: binding.describe(),
            })
            .collect()
    }
}

fn display_token(token: &str) -> String {
    match token {
        "left" => "←".to_string(),
        "right" => "→".to_string(),
        "up" => "↑".to_string(),
        "down" => "↓".to_string(),
        "enter" => "Enter".to_string(),
        "space" => "Space".to_string(),
        "esc" => "Esc".to_string(),
        "tab" => "Tab".to_string(),
        "backspace" => "Backspace".to_string(),
        other => other.to_uppercase(),
    }
}
