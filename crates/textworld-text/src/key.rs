//! Key table and commands.
//!
//! ## Learning: Making Invalid States Unrepresentable
//!
//! Only 63 glyphs can be typed. Rather than passing a raw `char` around
//! and checking it at every keystroke, [`Glyph`] can only be built from
//! the table, so "unknown key code" simply cannot reach the state machine.

use serde::{Deserialize, Serialize};

use crate::{TextError, TextResult};

/// Printable glyphs in key-code order.
pub const GLYPHS: [char; 63] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', //
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', //
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', //
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', //
    '-', '+', '_', '=', '[', '{', ']', '}', ' ', ',', '.', '/', //
    '<', '>', '?', '\\', '|',
];

/// A typeable glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Glyph(char);

impl Glyph {
    /// Looks a glyph up by key code.
    pub fn from_code(code: usize) -> Option<Self> {
        GLYPHS.get(code).copied().map(Glyph)
    }

    /// Returns the glyph for `c` if it is typeable.
    pub fn from_char(c: char) -> Option<Self> {
        GLYPHS.contains(&c).then_some(Glyph(c))
    }

    /// Iterates over every glyph in key-code order.
    pub fn all() -> impl Iterator<Item = Glyph> {
        GLYPHS.iter().copied().map(Glyph)
    }

    /// Returns the key code.
    pub fn code(self) -> usize {
        GLYPHS.iter().position(|&c| c == self.0).unwrap_or_default()
    }

    /// Returns the glyph character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Glyph {
    type Error = TextError;

    fn try_from(c: char) -> TextResult<Self> {
        Glyph::from_char(c).ok_or_else(|| TextError::UnknownKey(c.to_string()))
    }
}

impl From<Glyph> for char {
    fn from(g: Glyph) -> char {
        g.0
    }
}

/// Non-printing editing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKey {
    Backspace,
    Enter,
    Up,
    Down,
    Left,
    Right,
}

impl SpecialKey {
    /// All special keys in key-code order.
    pub const ALL: [SpecialKey; 6] = [
        SpecialKey::Backspace,
        SpecialKey::Enter,
        SpecialKey::Up,
        SpecialKey::Down,
        SpecialKey::Left,
        SpecialKey::Right,
    ];

    /// Looks a special key up by key code; codes follow the glyph table.
    pub fn from_code(code: usize) -> Option<Self> {
        code.checked_sub(GLYPHS.len())
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Returns the action name.
    pub fn name(self) -> &'static str {
        match self {
            SpecialKey::Backspace => "backspace",
            SpecialKey::Enter => "enter",
            SpecialKey::Up => "up",
            SpecialKey::Down => "down",
            SpecialKey::Left => "left",
            SpecialKey::Right => "right",
        }
    }
}

/// Item-navigation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCommand {
    Up,
    Down,
    Enter,
    /// Reserved slot. Never ready and never part of a catalog.
    Exec,
}

impl ItemCommand {
    /// Commands that materialize in an actor's catalog.
    pub const CATALOG: [ItemCommand; 3] = [ItemCommand::Up, ItemCommand::Down, ItemCommand::Enter];

    /// Returns the action name.
    pub fn name(self) -> &'static str {
        match self {
            ItemCommand::Up => "itemUp",
            ItemCommand::Down => "itemDown",
            ItemCommand::Enter => "itemEnter",
            ItemCommand::Exec => "itemExec",
        }
    }
}

/// Everything an actor can ask the text world to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Item(ItemCommand),
    Press(Glyph),
    Special(SpecialKey),
}

impl Command {
    /// Returns the action name: `itemDown`, `keya`, `backspace`, ...
    pub fn name(&self) -> String {
        match self {
            Command::Item(cmd) => cmd.name().to_string(),
            Command::Press(glyph) => format!("key{}", glyph.as_char()),
            Command::Special(key) => key.name().to_string(),
        }
    }

    /// Parses a key name.
    ///
    /// Accepts action names (`itemEnter`, `backspace`, `keyx`), bare
    /// glyphs (`x`), and `space`.
    pub fn parse(s: &str) -> TextResult<Self> {
        let unknown = || TextError::UnknownKey(s.to_string());

        let item = [
            ItemCommand::Up,
            ItemCommand::Down,
            ItemCommand::Enter,
            ItemCommand::Exec,
        ]
        .into_iter()
        .find(|cmd| cmd.name().eq_ignore_ascii_case(s));
        if let Some(cmd) = item {
            return Ok(Command::Item(cmd));
        }

        let lower = s.to_lowercase();
        if let Some(key) = SpecialKey::ALL.into_iter().find(|k| k.name() == lower) {
            return Ok(Command::Special(key));
        }

        let chars: Vec<char> = s.chars().collect();
        let glyph = match chars.as_slice() {
            [c] => Some(*c),
            [k, e, y, c]
                if k.eq_ignore_ascii_case(&'k')
                    && e.eq_ignore_ascii_case(&'e')
                    && y.eq_ignore_ascii_case(&'y') =>
            {
                Some(*c)
            }
            _ if lower == "space" || lower == "keyspace" => Some(' '),
            _ => None,
        };
        glyph
            .and_then(Glyph::from_char)
            .map(Command::Press)
            .ok_or_else(unknown)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
