//! Sticker identities, the pieces that own them, and the quarter-turn
//! permutations of the six base faces.
//!
//! Every sticker is described geometrically by the position vector of its
//! piece and the outward normal of the face it lies on, using `R = +x`,
//! `U = +y`, `F = +z`. The face turn permutations are generated from that
//! description once and the half and inverse turns are derived by composing
//! the quarter turn with itself.

use std::sync::LazyLock;

use crate::step::Layer;

/// Number of stickers on a 3x3x3 cube.
pub const STICKER_COUNT: usize = 54;

/// The six faces of the cube. The face a sticker sits on when the cube is
/// solved doubles as its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    D,
    F,
    B,
    R,
    L,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, D, F, B, R, L];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
            Face::R => Face::L,
            Face::L => Face::R,
        }
    }

    /// Whether the outward normal of this face points along a positive axis.
    /// The positive faces are the ones whose clockwise direction the x, y and
    /// z turns follow.
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, Face::U | Face::F | Face::R)
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::R => 'R',
            Face::L => 'L',
        }
    }

    pub(crate) fn vector(self) -> [i8; 3] {
        match self {
            Face::U => [0, 1, 0],
            Face::D => [0, -1, 0],
            Face::F => [0, 0, 1],
            Face::B => [0, 0, -1],
            Face::R => [1, 0, 0],
            Face::L => [-1, 0, 0],
        }
    }

    pub(crate) fn from_vector(vector: [i8; 3]) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.vector() == vector)
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Whether a piece is a center, an edge or a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Center,
    Edge,
    Corner,
}

/// The 26 visible pieces of the cube, named by the faces they touch.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Piece {
    U,
    D,
    F,
    B,
    R,
    L,
    UF,
    UB,
    UR,
    UL,
    DF,
    DB,
    DR,
    DL,
    FR,
    FL,
    BR,
    BL,
    UFR,
    UFL,
    UBR,
    UBL,
    DFR,
    DFL,
    DBR,
    DBL,
}

impl Piece {
    pub const ALL: [Self; 26] = {
        use Piece::*;
        [
            U, D, F, B, R, L, UF, UB, UR, UL, DF, DB, DR, DL, FR, FL, BR, BL, UFR, UFL, UBR, UBL,
            DFR, DFL, DBR, DBL,
        ]
    };

    /// The faces this piece touches, which are also the faces of its
    /// stickers.
    #[must_use]
    pub fn faces(self) -> &'static [Face] {
        use Face as F;
        match self {
            Piece::U => &[F::U],
            Piece::D => &[F::D],
            Piece::F => &[F::F],
            Piece::B => &[F::B],
            Piece::R => &[F::R],
            Piece::L => &[F::L],
            Piece::UF => &[F::U, F::F],
            Piece::UB => &[F::U, F::B],
            Piece::UR => &[F::U, F::R],
            Piece::UL => &[F::U, F::L],
            Piece::DF => &[F::D, F::F],
            Piece::DB => &[F::D, F::B],
            Piece::DR => &[F::D, F::R],
            Piece::DL => &[F::D, F::L],
            Piece::FR => &[F::F, F::R],
            Piece::FL => &[F::F, F::L],
            Piece::BR => &[F::B, F::R],
            Piece::BL => &[F::B, F::L],
            Piece::UFR => &[F::U, F::F, F::R],
            Piece::UFL => &[F::U, F::F, F::L],
            Piece::UBR => &[F::U, F::B, F::R],
            Piece::UBL => &[F::U, F::B, F::L],
            Piece::DFR => &[F::D, F::F, F::R],
            Piece::DFL => &[F::D, F::F, F::L],
            Piece::DBR => &[F::D, F::B, F::R],
            Piece::DBL => &[F::D, F::B, F::L],
        }
    }

    #[must_use]
    pub fn kind(self) -> PieceKind {
        match self.faces().len() {
            1 => PieceKind::Center,
            2 => PieceKind::Edge,
            _ => PieceKind::Corner,
        }
    }

    /// The stickers owned by this piece.
    pub fn stickers(self) -> impl Iterator<Item = StickerPosition> {
        StickerPosition::ALL
            .into_iter()
            .filter(move |sticker| sticker.piece() == self)
    }

    /// Whether this piece belongs to the given layer.
    #[must_use]
    pub fn in_layer(self, layer: Layer) -> bool {
        let position = self.position();
        match layer {
            Layer::E => position[1] == 0,
            Layer::S => position[2] == 0,
            Layer::M => position[0] == 0,
            _ => layer
                .face()
                .is_some_and(|face| dot(position, face.vector()) == 1),
        }
    }

    pub(crate) fn position(self) -> [i8; 3] {
        self.faces().iter().fold([0; 3], |acc, face| {
            let v = face.vector();
            [acc[0] + v[0], acc[1] + v[1], acc[2] + v[2]]
        })
    }

    pub(crate) fn from_position(position: [i8; 3]) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|piece| piece.position() == position)
    }
}

macro_rules! sticker_positions {
    ($($name:ident => ($piece:ident, $face:ident)),* $(,)?) => {
        /// The 54 sticker positions. The identity of a sticker is the
        /// position it occupies on a solved cube.
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StickerPosition {
            $($name),*
        }

        impl StickerPosition {
            pub const ALL: [StickerPosition; STICKER_COUNT] = [$(StickerPosition::$name),*];

            /// The piece owning this sticker.
            #[must_use]
            pub fn piece(self) -> Piece {
                match self {
                    $(StickerPosition::$name => Piece::$piece),*
                }
            }

            /// The face this sticker lies on, which is also its colour.
            #[must_use]
            pub fn face(self) -> Face {
                match self {
                    $(StickerPosition::$name => Face::$face),*
                }
            }
        }
    };
}

sticker_positions! {
    U => (U, U),
    D => (D, D),
    F => (F, F),
    B => (B, B),
    R => (R, R),
    L => (L, L),
    UF_U => (UF, U),
    UF_F => (UF, F),
    UB_U => (UB, U),
    UB_B => (UB, B),
    UR_U => (UR, U),
    UR_R => (UR, R),
    UL_U => (UL, U),
    UL_L => (UL, L),
    DF_D => (DF, D),
    DF_F => (DF, F),
    DB_D => (DB, D),
    DB_B => (DB, B),
    DR_D => (DR, D),
    DR_R => (DR, R),
    DL_D => (DL, D),
    DL_L => (DL, L),
    FR_F => (FR, F),
    FR_R => (FR, R),
    FL_F => (FL, F),
    FL_L => (FL, L),
    BR_B => (BR, B),
    BR_R => (BR, R),
    BL_B => (BL, B),
    BL_L => (BL, L),
    UFR_U => (UFR, U),
    UFR_F => (UFR, F),
    UFR_R => (UFR, R),
    UFL_U => (UFL, U),
    UFL_F => (UFL, F),
    UFL_L => (UFL, L),
    UBR_U => (UBR, U),
    UBR_B => (UBR, B),
    UBR_R => (UBR, R),
    UBL_U => (UBL, U),
    UBL_B => (UBL, B),
    UBL_L => (UBL, L),
    DFR_D => (DFR, D),
    DFR_F => (DFR, F),
    DFR_R => (DFR, R),
    DFL_D => (DFL, D),
    DFL_F => (DFL, F),
    DFL_L => (DFL, L),
    DBR_D => (DBR, D),
    DBR_B => (DBR, B),
    DBR_R => (DBR, R),
    DBL_D => (DBL, D),
    DBL_B => (DBL, B),
    DBL_L => (DBL, L),
}

impl StickerPosition {
    /// # Panics
    ///
    /// If `index` is not in `0..54`.
    #[must_use]
    pub fn from_index(index: usize) -> StickerPosition {
        assert!(
            index < STICKER_COUNT,
            "Sticker position {index} is out of range"
        );
        StickerPosition::ALL[index]
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn in_layer(self, layer: Layer) -> bool {
        self.piece().in_layer(layer)
    }

    /// Find the sticker of the piece at `position` that faces along `normal`.
    pub(crate) fn from_geometry(position: [i8; 3], normal: [i8; 3]) -> Option<StickerPosition> {
        let piece = Piece::from_position(position)?;
        let face = Face::from_vector(normal)?;
        piece.stickers().find(|sticker| sticker.face() == face)
    }
}

fn dot(a: [i8; 3], b: [i8; 3]) -> i8 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Rotate `v` a quarter turn clockwise, as seen from outside the cube
/// looking at the face whose outward normal is `axis`.
pub(crate) fn rotate_clockwise(v: [i8; 3], axis: [i8; 3]) -> [i8; 3] {
    let cross = [
        axis[1] * v[2] - axis[2] * v[1],
        axis[2] * v[0] - axis[0] * v[2],
        axis[0] * v[1] - axis[1] * v[0],
    ];
    let d = dot(axis, v);
    [
        axis[0] * d - cross[0],
        axis[1] * d - cross[1],
        axis[2] * d - cross[2],
    ]
}

/// A permutation of the sticker positions. `image(s)` is the position the
/// sticker currently at `s` moves to.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct StickerPermutation([u8; STICKER_COUNT]);

impl std::fmt::Debug for StickerPermutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl StickerPermutation {
    pub const IDENTITY: StickerPermutation = StickerPermutation(const {
        let mut arr = [0; STICKER_COUNT];
        let mut i = 0;
        while i < STICKER_COUNT {
            arr[i] = i as u8;
            i += 1;
        }
        arr
    });

    #[must_use]
    pub fn image(&self, sticker: StickerPosition) -> StickerPosition {
        StickerPosition::from_index(self.0[sticker.index()] as usize)
    }

    /// The permutation applying `self` first and then `other`.
    #[must_use]
    pub fn then(&self, other: &StickerPermutation) -> StickerPermutation {
        let mut out = [0; STICKER_COUNT];
        for (i, &image) in self.0.iter().enumerate() {
            out[i] = other.0[image as usize];
        }
        StickerPermutation(out)
    }

    /// Whether every position appears exactly once as an image.
    #[must_use]
    pub fn is_bijection(&self) -> bool {
        let mut seen = [false; STICKER_COUNT];
        for &image in &self.0 {
            match seen.get_mut(image as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    fn quarter_turn(face: Face) -> StickerPermutation {
        let axis = face.vector();
        let mut out = StickerPermutation::IDENTITY.0;

        for sticker in StickerPosition::ALL {
            let position = sticker.piece().position();
            if dot(position, axis) != 1 {
                continue;
            }

            let moved = StickerPosition::from_geometry(
                rotate_clockwise(position, axis),
                rotate_clockwise(sticker.face().vector(), axis),
            )
            .expect("A face turn maps every sticker of the layer onto another sticker");
            out[sticker.index()] = moved as u8;
        }

        StickerPermutation(out)
    }
}

/// Indexed by `[face][quarters - 1]` for one, two and three clockwise
/// quarter turns.
static FACE_TURNS: LazyLock<[[StickerPermutation; 3]; 6]> = LazyLock::new(|| {
    Face::ALL.map(|face| {
        let quarter = StickerPermutation::quarter_turn(face);
        let double = quarter.then(&quarter);
        let inverse = double.then(&quarter);
        [quarter, double, inverse]
    })
});

/// The permutation of `quarters` clockwise quarter turns of `face`, with
/// `quarters` taken modulo 4. Returns `None` for a multiple of four.
#[must_use]
pub fn face_turn(face: Face, quarters: i32) -> Option<&'static StickerPermutation> {
    match quarters.rem_euclid(4) {
        0 => None,
        n => Some(&FACE_TURNS[face as usize][n as usize - 1]),
    }
}

/// The stickers of a face in reading order, as seen from outside with the
/// cube held in its canonical orientation. The order is the one used by
/// facelet strings.
pub(crate) fn face_reading_order(face: Face) -> [[i8; 3]; 9] {
    // (up, right) directions on the face as seen from outside
    let (up, right) = match face {
        Face::U => (Face::B, Face::R),
        Face::D => (Face::F, Face::R),
        Face::F => (Face::U, Face::R),
        Face::B => (Face::U, Face::L),
        Face::R => (Face::U, Face::B),
        Face::L => (Face::U, Face::F),
    };
    let (n, up, right) = (face.vector(), up.vector(), right.vector());

    let mut out = [[0; 3]; 9];
    for row in 0..3_i8 {
        for col in 0..3_i8 {
            let (r, c) = (1 - row, col - 1);
            out[(row * 3 + col) as usize] = [
                n[0] + r * up[0] + c * right[0],
                n[1] + r * up[1] + c * right[1],
                n[2] + r * up[2] + c * right[2],
            ];
        }
    }
    out
}
