//! Character ramp definitions for ASCII rendering.

use std::fmt;
use std::str::FromStr;

/// Default ramp (8 levels).
/// Dense glyphs first: dark pixels map to `@`, bright pixels to space.
pub const DEFAULT_RAMP: &[char] = &['@', '#', '%', '/', '-', '\'', '.', ' '];

/// Fewest glyphs a ramp can have and still express a brightness difference.
pub const MIN_RAMP_LEN: usize = 2;

/// Errors produced when building or parsing a [`CharacterRamp`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RampError {
    #[error("Invalid character ramp: no characters given")]
    Empty,

    #[error("Invalid character ramp: need at least 2 characters, got {len}")]
    TooShort { len: usize },

    #[error("Invalid character ramp: must be [char,char,...]")]
    MissingBrackets,

    #[error(
        "Invalid character ramp: expected ',' or ']' at position {position}, found '{found}'"
    )]
    ExpectedSeparator { position: usize, found: char },
}

/// Ordered glyphs used to represent brightness levels.
///
/// Index 0 is used for the darkest pixels and the last index for the
/// brightest. Always holds at least [`MIN_RAMP_LEN`] glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRamp {
    glyphs: Vec<char>,
}

impl CharacterRamp {
    pub fn new(glyphs: Vec<char>) -> Result<Self, RampError> {
        match glyphs.len() {
            0 => Err(RampError::Empty),
            len if len < MIN_RAMP_LEN => Err(RampError::TooShort { len }),
            _ => Ok(Self { glyphs }),
        }
    }

    /// Parse a ramp written as `[c,c,...]`.
    ///
    /// Each entry is exactly one character, so a comma can itself be a glyph:
    /// `[,,a]` is the two-glyph ramp `,` `a`.
    pub fn parse(input: &str) -> Result<Self, RampError> {
        // Positions in errors count from the start of `input`, before trimming
        let leading = input.chars().take_while(|c| c.is_whitespace()).count();
        let inner = input
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or(RampError::MissingBrackets)?;

        let mut glyphs = Vec::new();
        let mut chars = inner.chars().enumerate();

        while let Some((_, glyph)) = chars.next() {
            glyphs.push(glyph);
            match chars.next() {
                None | Some((_, ',')) => {}
                // +1 accounts for the opening bracket
                Some((i, found)) => {
                    return Err(RampError::ExpectedSeparator {
                        position: leading + i + 1,
                        found,
                    })
                }
            }
        }

        Self::new(glyphs)
    }

    /// The same glyphs in the opposite order.
    pub fn reversed(&self) -> Self {
        Self {
            glyphs: self.glyphs.iter().rev().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Never true for a validated ramp.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Highest valid index.
    pub fn last_index(&self) -> usize {
        self.glyphs.len() - 1
    }

    pub fn glyph(&self, index: usize) -> Option<char> {
        self.glyphs.get(index).copied()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for CharacterRamp {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_RAMP.to_vec(),
        }
    }
}

impl FromStr for CharacterRamp {
    type Err = RampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CharacterRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, glyph) in self.glyphs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", glyph)?;
        }
        write!(f, "]")
    }
}
