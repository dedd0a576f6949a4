#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

//! A 3x3x3 cube modelled as the positions of its 54 stickers, together with a
//! scramble notation that can be parsed, printed, and rewritten without
//! changing what it does to the cube.

pub mod alphabet;
pub mod cube;
pub mod scramble;
pub mod spin;
pub mod step;
pub mod step_tables;
pub mod stickers;

pub use alphabet::{AlphabetConfig, AlphabetError, Notation, RotationConvention};
pub use cube::CubeState;
pub use scramble::{Metric, Scramble, ScrambleError};
pub use spin::Spin;
pub use step::{Axis, Layer, Modifier, Movement, Step, join_movements};
pub use step_tables::StepTables;
pub use stickers::{Face, Piece, StickerPosition};
