//! The notation alphabet: which characters denote which layers, turns and
//! modifiers, and which way the middle layers turn.
//!
//! [`AlphabetConfig`] is the plain, serializable description handed in by the
//! caller. [`Notation`] is built from it once, validated, and holds the
//! character lookup and the display text of every step.

use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    step::{Axis, Layer, Modifier, Movement, Step},
    stickers::Face,
};

/// Characters with a fixed meaning in every alphabet.
pub const RESERVED: [char; 4] = ['2', '\'', '(', ')'];

/// Which outer layer each middle layer turns along with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConvention {
    /// E turns like D (standard) or like U.
    pub e_follows_d: bool,
    /// S turns like F (standard) or like B.
    pub s_follows_f: bool,
    /// M turns like L (standard) or like R.
    pub m_follows_l: bool,
}

impl Default for RotationConvention {
    fn default() -> Self {
        RotationConvention {
            e_follows_d: true,
            s_follows_f: true,
            m_follows_l: true,
        }
    }
}

impl RotationConvention {
    /// The face whose clockwise direction the middle layer of `axis` follows.
    #[must_use]
    pub fn follows(self, axis: Axis) -> Face {
        match axis {
            Axis::X if self.m_follows_l => Face::L,
            Axis::X => Face::R,
            Axis::Y if self.e_follows_d => Face::D,
            Axis::Y => Face::U,
            Axis::Z if self.s_follows_f => Face::F,
            Axis::Z => Face::B,
        }
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.e_follows_d)
            | usize::from(self.s_follows_f) << 1
            | usize::from(self.m_follows_l) << 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct LayerLetters {
    pub U: char,
    pub D: char,
    pub F: char,
    pub B: char,
    pub R: char,
    pub L: char,
    pub E: char,
    pub S: char,
    pub M: char,
}

impl Default for LayerLetters {
    fn default() -> Self {
        LayerLetters {
            U: 'U',
            D: 'D',
            F: 'F',
            B: 'B',
            R: 'R',
            L: 'L',
            E: 'E',
            S: 'S',
            M: 'M',
        }
    }
}

impl LayerLetters {
    fn get(&self, layer: Layer) -> char {
        match layer {
            Layer::U => self.U,
            Layer::D => self.D,
            Layer::F => self.F,
            Layer::B => self.B,
            Layer::R => self.R,
            Layer::L => self.L,
            Layer::E => self.E,
            Layer::S => self.S,
            Layer::M => self.M,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnLetters {
    pub x: char,
    pub y: char,
    pub z: char,
}

impl Default for TurnLetters {
    fn default() -> Self {
        TurnLetters {
            x: 'x',
            y: 'y',
            z: 'z',
        }
    }
}

/// Single letters standing for a wide move, `r` for `Rw`. A missing letter
/// disables the shortcut for that face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct WideLetters {
    pub U: Option<char>,
    pub D: Option<char>,
    pub F: Option<char>,
    pub B: Option<char>,
    pub R: Option<char>,
    pub L: Option<char>,
}

impl Default for WideLetters {
    fn default() -> Self {
        WideLetters {
            U: Some('u'),
            D: Some('d'),
            F: Some('f'),
            B: Some('b'),
            R: Some('r'),
            L: Some('l'),
        }
    }
}

impl WideLetters {
    fn get(&self, face: Face) -> Option<char> {
        match face {
            Face::U => self.U,
            Face::D => self.D,
            Face::F => self.F,
            Face::B => self.B,
            Face::R => self.R,
            Face::L => self.L,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierLetters {
    pub wide: char,
    pub wide_opposite: char,
    pub slice: char,
    pub slice_opposite: char,
}

impl Default for ModifierLetters {
    fn default() -> Self {
        ModifierLetters {
            wide: 'w',
            wide_opposite: 'o',
            slice: 's',
            slice_opposite: 'a',
        }
    }
}

/// The notation alphabet as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphabetConfig {
    pub layers: LayerLetters,
    pub turns: TurnLetters,
    pub wide_letters: WideLetters,
    pub modifiers: ModifierLetters,
    pub convention: RotationConvention,
}

impl AlphabetConfig {
    /// Decode an alphabet from TOML. Missing tables take their defaults.
    ///
    /// # Errors
    ///
    /// If the document is not a valid alphabet description
    pub fn from_toml_str(text: &str) -> Result<AlphabetConfig, AlphabetError> {
        Ok(toml::from_str(text)?)
    }
}

/// What a character of the alphabet stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharRole {
    Layer(Layer),
    Turn(Axis),
    WideLetter(Face),
    Modifier(Modifier),
}

#[derive(Error, Debug)]
pub enum AlphabetError {
    #[error("The character {0:?} is reserved by the notation and cannot be assigned")]
    Reserved(char),
    #[error("The character {character:?} is assigned to both {first:?} and {second:?}")]
    Duplicate {
        character: char,
        first: CharRole,
        second: CharRole,
    },
    #[error("Could not decode the alphabet configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A validated alphabet with its derived lookups.
#[derive(Debug, Clone)]
pub struct Notation {
    config: AlphabetConfig,
    roles: HashMap<char, CharRole>,
    texts: Box<[String]>,
}

static STANDARD: LazyLock<Notation> = LazyLock::new(|| {
    Notation::new(AlphabetConfig::default()).expect("The default alphabet is valid")
});

impl Notation {
    /// Validate `config` and derive the lookup tables.
    ///
    /// # Errors
    ///
    /// If a character is reserved or assigned twice
    pub fn new(config: AlphabetConfig) -> Result<Notation, AlphabetError> {
        let mut assignments = vec![];

        for layer in Layer::ALL {
            assignments.push((config.layers.get(layer), CharRole::Layer(layer)));
        }
        assignments.push((config.turns.x, CharRole::Turn(Axis::X)));
        assignments.push((config.turns.y, CharRole::Turn(Axis::Y)));
        assignments.push((config.turns.z, CharRole::Turn(Axis::Z)));
        for face in Face::ALL {
            if let Some(letter) = config.wide_letters.get(face) {
                assignments.push((letter, CharRole::WideLetter(face)));
            }
        }
        let modifiers = &config.modifiers;
        assignments.push((modifiers.wide, CharRole::Modifier(Modifier::Wide)));
        assignments.push((
            modifiers.wide_opposite,
            CharRole::Modifier(Modifier::WideOpposite),
        ));
        assignments.push((modifiers.slice, CharRole::Modifier(Modifier::Slice)));
        assignments.push((
            modifiers.slice_opposite,
            CharRole::Modifier(Modifier::SliceOpposite),
        ));

        let mut roles = HashMap::new();
        for (character, role) in assignments {
            if RESERVED.contains(&character)
                || character.is_ascii_digit()
                || character.is_whitespace()
            {
                return Err(AlphabetError::Reserved(character));
            }
            if let Some(&first) = roles.get(&character) {
                return Err(AlphabetError::Duplicate {
                    character,
                    first,
                    second: role,
                });
            }
            roles.insert(character, role);
        }

        let texts = Step::ALL.map(|step| step_text(&config, step)).into();

        Ok(Notation {
            config,
            roles,
            texts,
        })
    }

    /// The notation of the default alphabet.
    #[must_use]
    pub fn standard() -> &'static Notation {
        &STANDARD
    }

    #[must_use]
    pub fn config(&self) -> &AlphabetConfig {
        &self.config
    }

    #[must_use]
    pub fn convention(&self) -> RotationConvention {
        self.config.convention
    }

    /// The display text of a step.
    #[must_use]
    pub fn text(&self, step: Step) -> &str {
        &self.texts[step as usize]
    }

    #[must_use]
    pub fn role(&self, character: char) -> Option<CharRole> {
        self.roles.get(&character).copied()
    }

    /// Whether the character takes part in the notation at all. Everything
    /// else is discarded before tokenizing.
    #[must_use]
    pub fn is_known(&self, character: char) -> bool {
        RESERVED.contains(&character)
            || character.is_ascii_digit()
            || self.roles.contains_key(&character)
    }
}

fn movement_suffix(movement: Movement) -> &'static str {
    match movement {
        Movement::Cw => "",
        Movement::Ccw => "'",
        Movement::Half => "2",
        Movement::HalfCcw => "2'",
    }
}

fn step_text(config: &AlphabetConfig, step: Step) -> String {
    let parts = step.parts();
    let (Some(layer), Some(movement)) = (parts.layer, parts.movement) else {
        return match parts.modifier {
            Modifier::Close(1) => ")".to_owned(),
            Modifier::Close(n) => format!("){n}"),
            _ => "(".to_owned(),
        };
    };

    let mut text = String::new();
    match parts.modifier {
        Modifier::Turn => text.push(match layer.axis() {
            Axis::X => config.turns.x,
            Axis::Y => config.turns.y,
            Axis::Z => config.turns.z,
        }),
        Modifier::Single => text.push(config.layers.get(layer)),
        modifier => {
            text.push(config.layers.get(layer));
            text.push(match modifier {
                Modifier::Wide => config.modifiers.wide,
                Modifier::WideOpposite => config.modifiers.wide_opposite,
                Modifier::Slice => config.modifiers.slice,
                _ => config.modifiers.slice_opposite,
            });
        }
    }
    text.push_str(movement_suffix(movement));
    text
}
