//! The closed set of notation steps and the convention independent parts of
//! their algebra.
//!
//! A [`Step`] is never built from its parts by callers; every derived property
//! comes from a table computed once from the [`StepParts`] listed here.

use std::{collections::HashMap, sync::LazyLock};

use crate::{alphabet::Notation, stickers::Face};

/// Number of distinct steps, parenthesis markers included.
pub const STEP_COUNT: usize = 154;

/// One of the nine addressable layers of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    U,
    D,
    F,
    B,
    R,
    L,
    E,
    S,
    M,
}

/// One of the three rotation axes. The positive direction of an axis is the
/// clockwise direction of its positive face (`R`, `U` and `F`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The face whose clockwise direction a positive turn about this axis
    /// follows.
    #[must_use]
    pub fn face(self) -> Face {
        match self {
            Axis::X => Face::R,
            Axis::Y => Face::U,
            Axis::Z => Face::F,
        }
    }

    /// The whole cube turn about this axis.
    #[must_use]
    pub fn turn(self, movement: Movement) -> Step {
        Step::from_parts(StepParts::new(
            Layer::from(self.face()),
            Modifier::Turn,
            movement,
        ))
        .expect("Every axis has a turn for every movement")
    }
}

impl Layer {
    pub const ALL: [Self; 9] = [
        Layer::U,
        Layer::D,
        Layer::F,
        Layer::B,
        Layer::R,
        Layer::L,
        Layer::E,
        Layer::S,
        Layer::M,
    ];

    /// The face of an outer layer, `None` for the middle layers.
    #[must_use]
    pub fn face(self) -> Option<Face> {
        match self {
            Layer::U => Some(Face::U),
            Layer::D => Some(Face::D),
            Layer::F => Some(Face::F),
            Layer::B => Some(Face::B),
            Layer::R => Some(Face::R),
            Layer::L => Some(Face::L),
            Layer::E | Layer::S | Layer::M => None,
        }
    }

    #[must_use]
    pub fn is_middle(self) -> bool {
        self.face().is_none()
    }

    /// The outer layer on the other side of the cube, `None` for the middle
    /// layers.
    #[must_use]
    pub fn opposite(self) -> Option<Layer> {
        self.face().map(|face| Layer::from(face.opposite()))
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Layer::R | Layer::L | Layer::M => Axis::X,
            Layer::U | Layer::D | Layer::E => Axis::Y,
            Layer::F | Layer::B | Layer::S => Axis::Z,
        }
    }

    /// The middle layer sitting between the two faces of an axis.
    #[must_use]
    pub fn middle_of(axis: Axis) -> Layer {
        match axis {
            Axis::X => Layer::M,
            Axis::Y => Layer::E,
            Axis::Z => Layer::S,
        }
    }
}

impl From<Face> for Layer {
    fn from(face: Face) -> Self {
        match face {
            Face::U => Layer::U,
            Face::D => Layer::D,
            Face::F => Layer::F,
            Face::B => Layer::B,
            Face::R => Layer::R,
            Face::L => Layer::L,
        }
    }
}

/// How far a step turns its layers. The two half turn spellings have the same
/// effect on the cube but are kept apart until a step is simplified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// +90°
    Cw,
    /// +180°
    Half,
    /// -90°
    Ccw,
    /// -180°
    HalfCcw,
}

impl Movement {
    pub const ALL: [Self; 4] = [
        Movement::Cw,
        Movement::Half,
        Movement::Ccw,
        Movement::HalfCcw,
    ];

    /// Signed number of clockwise quarter turns.
    #[must_use]
    pub fn quarters(self) -> i32 {
        match self {
            Movement::Cw => 1,
            Movement::Half => 2,
            Movement::Ccw => -1,
            Movement::HalfCcw => -2,
        }
    }

    /// The movement of a signed amount of quarter turns. A half turn keeps the
    /// direction of the sign, full turns are `None`.
    #[must_use]
    pub fn from_quarters(quarters: i32) -> Option<Movement> {
        match quarters.rem_euclid(4) {
            0 => None,
            1 => Some(Movement::Cw),
            3 => Some(Movement::Ccw),
            _ if quarters < 0 => Some(Movement::HalfCcw),
            _ => Some(Movement::Half),
        }
    }

    #[must_use]
    pub fn inverse(self) -> Movement {
        match self {
            Movement::Cw => Movement::Ccw,
            Movement::Ccw => Movement::Cw,
            Movement::Half => Movement::HalfCcw,
            Movement::HalfCcw => Movement::Half,
        }
    }

    #[must_use]
    pub fn is_half(self) -> bool {
        matches!(self, Movement::Half | Movement::HalfCcw)
    }
}

/// Merge two movements of the same layer into one, e.g. `+90° +90°` into
/// `+180°` and `+90° +180°` into `-90°`. Returns `None` when they cancel.
#[must_use]
pub fn join_movements(first: Movement, second: Movement) -> Option<Movement> {
    Movement::from_quarters(first.quarters() + second.quarters())
}

/// The structural class of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// A single layer.
    Single,
    /// An outer layer and the adjacent middle layer turning together (`Uw`).
    Wide,
    /// An outer layer and the adjacent middle layer turning in opposite
    /// directions (`Uo`).
    WideOpposite,
    /// Both outer layers of an axis turning the same spatial direction, `Us`
    /// is `U D'`.
    Slice,
    /// Both outer layers of an axis turning opposite spatial directions, `Ua`
    /// is `U D`.
    SliceOpposite,
    /// The whole cube.
    Turn,
    Open,
    /// A group closer repeating the group 1 to 9 times.
    Close(u8),
}

impl Modifier {
    /// The modifiers that combine with an outer layer.
    pub const FACE_MODIFIERS: [Self; 5] = [
        Modifier::Single,
        Modifier::Wide,
        Modifier::WideOpposite,
        Modifier::Slice,
        Modifier::SliceOpposite,
    ];

    #[must_use]
    pub fn is_parenthesis(self) -> bool {
        matches!(self, Modifier::Open | Modifier::Close(_))
    }
}

/// The decomposition of a step into layer, modifier and movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepParts {
    pub layer: Option<Layer>,
    pub modifier: Modifier,
    pub movement: Option<Movement>,
}

impl StepParts {
    #[must_use]
    pub const fn new(layer: Layer, modifier: Modifier, movement: Movement) -> StepParts {
        StepParts {
            layer: Some(layer),
            modifier,
            movement: Some(movement),
        }
    }

    const fn parenthesis(modifier: Modifier) -> StepParts {
        StepParts {
            layer: None,
            modifier,
            movement: None,
        }
    }
}

macro_rules! steps {
    ($($name:ident => $parts:expr),* $(,)?) => {
        /// A notation step: a layer move, a whole cube turn, or a parenthesis
        /// marker.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Step {
            $($name),*
        }

        impl Step {
            pub const ALL: [Step; STEP_COUNT] = [$(Step::$name),*];

            const PARTS: [StepParts; STEP_COUNT] = [$($parts),*];
        }
    };
}

const fn mv(layer: Layer, modifier: Modifier, movement: Movement) -> StepParts {
    StepParts::new(layer, modifier, movement)
}

use Layer as Ly;
use Modifier::{Single, Slice, SliceOpposite, Turn, Wide, WideOpposite};
use Movement::{Ccw, Cw, Half, HalfCcw};

steps! {
    U => mv(Ly::U, Single, Cw), Up => mv(Ly::U, Single, Ccw),
    U2 => mv(Ly::U, Single, Half), U2p => mv(Ly::U, Single, HalfCcw),
    D => mv(Ly::D, Single, Cw), Dp => mv(Ly::D, Single, Ccw),
    D2 => mv(Ly::D, Single, Half), D2p => mv(Ly::D, Single, HalfCcw),
    F => mv(Ly::F, Single, Cw), Fp => mv(Ly::F, Single, Ccw),
    F2 => mv(Ly::F, Single, Half), F2p => mv(Ly::F, Single, HalfCcw),
    B => mv(Ly::B, Single, Cw), Bp => mv(Ly::B, Single, Ccw),
    B2 => mv(Ly::B, Single, Half), B2p => mv(Ly::B, Single, HalfCcw),
    R => mv(Ly::R, Single, Cw), Rp => mv(Ly::R, Single, Ccw),
    R2 => mv(Ly::R, Single, Half), R2p => mv(Ly::R, Single, HalfCcw),
    L => mv(Ly::L, Single, Cw), Lp => mv(Ly::L, Single, Ccw),
    L2 => mv(Ly::L, Single, Half), L2p => mv(Ly::L, Single, HalfCcw),

    Uw => mv(Ly::U, Wide, Cw), Uwp => mv(Ly::U, Wide, Ccw),
    Uw2 => mv(Ly::U, Wide, Half), Uw2p => mv(Ly::U, Wide, HalfCcw),
    Dw => mv(Ly::D, Wide, Cw), Dwp => mv(Ly::D, Wide, Ccw),
    Dw2 => mv(Ly::D, Wide, Half), Dw2p => mv(Ly::D, Wide, HalfCcw),
    Fw => mv(Ly::F, Wide, Cw), Fwp => mv(Ly::F, Wide, Ccw),
    Fw2 => mv(Ly::F, Wide, Half), Fw2p => mv(Ly::F, Wide, HalfCcw),
    Bw => mv(Ly::B, Wide, Cw), Bwp => mv(Ly::B, Wide, Ccw),
    Bw2 => mv(Ly::B, Wide, Half), Bw2p => mv(Ly::B, Wide, HalfCcw),
    Rw => mv(Ly::R, Wide, Cw), Rwp => mv(Ly::R, Wide, Ccw),
    Rw2 => mv(Ly::R, Wide, Half), Rw2p => mv(Ly::R, Wide, HalfCcw),
    Lw => mv(Ly::L, Wide, Cw), Lwp => mv(Ly::L, Wide, Ccw),
    Lw2 => mv(Ly::L, Wide, Half), Lw2p => mv(Ly::L, Wide, HalfCcw),

    Uo => mv(Ly::U, WideOpposite, Cw), Uop => mv(Ly::U, WideOpposite, Ccw),
    Uo2 => mv(Ly::U, WideOpposite, Half), Uo2p => mv(Ly::U, WideOpposite, HalfCcw),
    Do => mv(Ly::D, WideOpposite, Cw), Dop => mv(Ly::D, WideOpposite, Ccw),
    Do2 => mv(Ly::D, WideOpposite, Half), Do2p => mv(Ly::D, WideOpposite, HalfCcw),
    Fo => mv(Ly::F, WideOpposite, Cw), Fop => mv(Ly::F, WideOpposite, Ccw),
    Fo2 => mv(Ly::F, WideOpposite, Half), Fo2p => mv(Ly::F, WideOpposite, HalfCcw),
    Bo => mv(Ly::B, WideOpposite, Cw), Bop => mv(Ly::B, WideOpposite, Ccw),
    Bo2 => mv(Ly::B, WideOpposite, Half), Bo2p => mv(Ly::B, WideOpposite, HalfCcw),
    Ro => mv(Ly::R, WideOpposite, Cw), Rop => mv(Ly::R, WideOpposite, Ccw),
    Ro2 => mv(Ly::R, WideOpposite, Half), Ro2p => mv(Ly::R, WideOpposite, HalfCcw),
    Lo => mv(Ly::L, WideOpposite, Cw), Lop => mv(Ly::L, WideOpposite, Ccw),
    Lo2 => mv(Ly::L, WideOpposite, Half), Lo2p => mv(Ly::L, WideOpposite, HalfCcw),

    Us => mv(Ly::U, Slice, Cw), Usp => mv(Ly::U, Slice, Ccw),
    Us2 => mv(Ly::U, Slice, Half), Us2p => mv(Ly::U, Slice, HalfCcw),
    Ds => mv(Ly::D, Slice, Cw), Dsp => mv(Ly::D, Slice, Ccw),
    Ds2 => mv(Ly::D, Slice, Half), Ds2p => mv(Ly::D, Slice, HalfCcw),
    Fs => mv(Ly::F, Slice, Cw), Fsp => mv(Ly::F, Slice, Ccw),
    Fs2 => mv(Ly::F, Slice, Half), Fs2p => mv(Ly::F, Slice, HalfCcw),
    Bs => mv(Ly::B, Slice, Cw), Bsp => mv(Ly::B, Slice, Ccw),
    Bs2 => mv(Ly::B, Slice, Half), Bs2p => mv(Ly::B, Slice, HalfCcw),
    Rs => mv(Ly::R, Slice, Cw), Rsp => mv(Ly::R, Slice, Ccw),
    Rs2 => mv(Ly::R, Slice, Half), Rs2p => mv(Ly::R, Slice, HalfCcw),
    Ls => mv(Ly::L, Slice, Cw), Lsp => mv(Ly::L, Slice, Ccw),
    Ls2 => mv(Ly::L, Slice, Half), Ls2p => mv(Ly::L, Slice, HalfCcw),

    Ua => mv(Ly::U, SliceOpposite, Cw), Uap => mv(Ly::U, SliceOpposite, Ccw),
    Ua2 => mv(Ly::U, SliceOpposite, Half), Ua2p => mv(Ly::U, SliceOpposite, HalfCcw),
    Da => mv(Ly::D, SliceOpposite, Cw), Dap => mv(Ly::D, SliceOpposite, Ccw),
    Da2 => mv(Ly::D, SliceOpposite, Half), Da2p => mv(Ly::D, SliceOpposite, HalfCcw),
    Fa => mv(Ly::F, SliceOpposite, Cw), Fap => mv(Ly::F, SliceOpposite, Ccw),
    Fa2 => mv(Ly::F, SliceOpposite, Half), Fa2p => mv(Ly::F, SliceOpposite, HalfCcw),
    Ba => mv(Ly::B, SliceOpposite, Cw), Bap => mv(Ly::B, SliceOpposite, Ccw),
    Ba2 => mv(Ly::B, SliceOpposite, Half), Ba2p => mv(Ly::B, SliceOpposite, HalfCcw),
    Ra => mv(Ly::R, SliceOpposite, Cw), Rap => mv(Ly::R, SliceOpposite, Ccw),
    Ra2 => mv(Ly::R, SliceOpposite, Half), Ra2p => mv(Ly::R, SliceOpposite, HalfCcw),
    La => mv(Ly::L, SliceOpposite, Cw), Lap => mv(Ly::L, SliceOpposite, Ccw),
    La2 => mv(Ly::L, SliceOpposite, Half), La2p => mv(Ly::L, SliceOpposite, HalfCcw),

    E => mv(Ly::E, Single, Cw), Ep => mv(Ly::E, Single, Ccw),
    E2 => mv(Ly::E, Single, Half), E2p => mv(Ly::E, Single, HalfCcw),
    S => mv(Ly::S, Single, Cw), Sp => mv(Ly::S, Single, Ccw),
    S2 => mv(Ly::S, Single, Half), S2p => mv(Ly::S, Single, HalfCcw),
    M => mv(Ly::M, Single, Cw), Mp => mv(Ly::M, Single, Ccw),
    M2 => mv(Ly::M, Single, Half), M2p => mv(Ly::M, Single, HalfCcw),

    X => mv(Ly::R, Turn, Cw), Xp => mv(Ly::R, Turn, Ccw),
    X2 => mv(Ly::R, Turn, Half), X2p => mv(Ly::R, Turn, HalfCcw),
    Y => mv(Ly::U, Turn, Cw), Yp => mv(Ly::U, Turn, Ccw),
    Y2 => mv(Ly::U, Turn, Half), Y2p => mv(Ly::U, Turn, HalfCcw),
    Z => mv(Ly::F, Turn, Cw), Zp => mv(Ly::F, Turn, Ccw),
    Z2 => mv(Ly::F, Turn, Half), Z2p => mv(Ly::F, Turn, HalfCcw),

    Open => StepParts::parenthesis(Modifier::Open),
    Close1 => StepParts::parenthesis(Modifier::Close(1)),
    Close2 => StepParts::parenthesis(Modifier::Close(2)),
    Close3 => StepParts::parenthesis(Modifier::Close(3)),
    Close4 => StepParts::parenthesis(Modifier::Close(4)),
    Close5 => StepParts::parenthesis(Modifier::Close(5)),
    Close6 => StepParts::parenthesis(Modifier::Close(6)),
    Close7 => StepParts::parenthesis(Modifier::Close(7)),
    Close8 => StepParts::parenthesis(Modifier::Close(8)),
    Close9 => StepParts::parenthesis(Modifier::Close(9)),
}

static BY_PARTS: LazyLock<HashMap<StepParts, Step>> = LazyLock::new(|| {
    Step::ALL
        .into_iter()
        .map(|step| (step.parts(), step))
        .collect()
});

static INVERSE: LazyLock<[Step; STEP_COUNT]> = LazyLock::new(|| {
    Step::ALL.map(|step| {
        let parts = step.parts();
        match parts.movement {
            Some(movement) => Step::from_parts(StepParts {
                movement: Some(movement.inverse()),
                ..parts
            })
            .expect("Every step has an inverse"),
            None => step,
        }
    })
});

static SIMPLE: LazyLock<[Step; STEP_COUNT]> = LazyLock::new(|| {
    Step::ALL.map(|step| {
        let StepParts {
            layer: Some(mut layer),
            mut modifier,
            movement: Some(mut movement),
        } = step.parts()
        else {
            return step;
        };

        // Ds is Us' and Da is Ua
        if matches!(modifier, Slice | SliceOpposite)
            && layer.face().is_some_and(|face| !face.is_positive())
        {
            layer = layer.opposite().unwrap_or(layer);
            if modifier == Slice {
                movement = movement.inverse();
            }
        }

        if movement == HalfCcw {
            movement = Half;
        }

        // U2 D2 and U2 E2 read the same in either direction
        if movement == Half {
            modifier = match modifier {
                SliceOpposite => Slice,
                WideOpposite => Wide,
                other => other,
            };
        }

        Step::from_parts(StepParts::new(layer, modifier, movement))
            .expect("Every simplified step exists")
    })
});

impl Step {
    #[must_use]
    pub fn parts(self) -> StepParts {
        Step::PARTS[self as usize]
    }

    /// Look up the step made of the given parts, if there is one.
    #[must_use]
    pub fn from_parts(parts: StepParts) -> Option<Step> {
        BY_PARTS.get(&parts).copied()
    }

    /// The group closer repeating its group `repetitions` times.
    #[must_use]
    pub fn close(repetitions: u8) -> Option<Step> {
        Step::from_parts(StepParts::parenthesis(Modifier::Close(repetitions)))
    }

    #[must_use]
    pub fn layer(self) -> Option<Layer> {
        self.parts().layer
    }

    #[must_use]
    pub fn movement(self) -> Option<Movement> {
        self.parts().movement
    }

    #[must_use]
    pub fn modifier(self) -> Modifier {
        self.parts().modifier
    }

    #[must_use]
    pub fn is_parenthesis(self) -> bool {
        self.modifier().is_parenthesis()
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self == Step::Open
    }

    #[must_use]
    pub fn is_close(self) -> bool {
        matches!(self.modifier(), Modifier::Close(_))
    }

    /// How many times the group ended by this closer is repeated.
    #[must_use]
    pub fn repetitions(self) -> Option<u8> {
        match self.modifier() {
            Modifier::Close(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_turn(self) -> bool {
        self.modifier() == Turn
    }

    /// The axis of a whole cube turn.
    #[must_use]
    pub fn turn_axis(self) -> Option<Axis> {
        if self.is_turn() {
            self.layer().map(Layer::axis)
        } else {
            None
        }
    }

    /// The step undoing this one. Parenthesis markers are their own inverse.
    #[must_use]
    pub fn inverse(self) -> Step {
        INVERSE[self as usize]
    }

    /// The canonical spelling of this step.
    #[must_use]
    pub fn simple(self) -> Step {
        SIMPLE[self as usize]
    }

    /// The same step with a different movement. `None` for parenthesis
    /// markers.
    #[must_use]
    pub fn with_movement(self, movement: Movement) -> Option<Step> {
        if self.is_parenthesis() {
            return None;
        }
        Step::from_parts(StepParts {
            movement: Some(movement),
            ..self.parts()
        })
    }

    /// Whether two steps act on the same layers in the same way, differing at
    /// most in movement.
    #[must_use]
    pub fn same_kind(self, other: Step) -> bool {
        !self.is_parenthesis()
            && self.layer() == other.layer()
            && self.modifier() == other.modifier()
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Notation::standard().text(*self))
    }
}
