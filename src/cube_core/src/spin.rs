//! The orientation of the whole cube.
//!
//! Turning the whole cube never moves sticker trackers, it only changes the
//! [`Spin`]. Relative moves are resolved through the spin to the physical
//! face that currently sits in the named position.

use std::sync::LazyLock;

use crate::{
    alphabet::RotationConvention,
    step::{Axis, Layer},
    stickers::Face,
};

/// One of the 24 orientations of the cube, named by the faces currently
/// reading up and front. The faces are named by their solved colour.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Spin {
    #[default]
    UF,
    UR,
    UB,
    UL,
    DF,
    DR,
    DB,
    DL,
    FU,
    FR,
    FD,
    FL,
    BU,
    BR,
    BD,
    BL,
    RU,
    RF,
    RD,
    RB,
    LU,
    LF,
    LD,
    LB,
}

const SPIN_FACES: [(Face, Face); 24] = {
    use Face::*;
    [
        (U, F),
        (U, R),
        (U, B),
        (U, L),
        (D, F),
        (D, R),
        (D, B),
        (D, L),
        (F, U),
        (F, R),
        (F, D),
        (F, L),
        (B, U),
        (B, R),
        (B, D),
        (B, L),
        (R, U),
        (R, F),
        (R, D),
        (R, B),
        (L, U),
        (L, F),
        (L, D),
        (L, B),
    ]
};

/// `[spin][position]`: the physical face sitting at each position.
static FACE_AT: LazyLock<[[Face; 6]; 24]> = LazyLock::new(|| {
    Spin::ALL.map(|spin| {
        let (up, front) = SPIN_FACES[spin as usize];
        let (u, f) = (up.vector(), front.vector());
        let right = Face::from_vector([
            u[1] * f[2] - u[2] * f[1],
            u[2] * f[0] - u[0] * f[2],
            u[0] * f[1] - u[1] * f[0],
        ])
        .expect("Up and front of a valid spin are perpendicular");

        Face::ALL.map(|position| match position {
            Face::U => up,
            Face::D => up.opposite(),
            Face::F => front,
            Face::B => front.opposite(),
            Face::R => right,
            Face::L => right.opposite(),
        })
    })
});

/// `[spin][axis * 3 + quarters - 1]`: the spin after turning the whole cube.
static TRANSITIONS: LazyLock<[[Spin; 9]; 24]> = LazyLock::new(|| {
    let quarter = |spin: Spin, axis: Axis| {
        let (up, front) = match axis {
            Axis::X => (spin.face_at(Face::F), spin.face_at(Face::D)),
            Axis::Y => (spin.face_at(Face::U), spin.face_at(Face::R)),
            Axis::Z => (spin.face_at(Face::L), spin.face_at(Face::F)),
        };
        Spin::new(up, front).expect("A quarter turn keeps up and front perpendicular")
    };

    Spin::ALL.map(|spin| {
        let mut row = [spin; 9];
        for (a, axis) in Axis::ALL.into_iter().enumerate() {
            let once = quarter(spin, axis);
            let twice = quarter(once, axis);
            row[a * 3] = once;
            row[a * 3 + 1] = twice;
            row[a * 3 + 2] = quarter(twice, axis);
        }
        row
    })
});

impl Spin {
    pub const ALL: [Self; 24] = {
        use Spin::*;
        let v = [
            UF, UR, UB, UL, DF, DR, DB, DL, FU, FR, FD, FL, BU, BR, BD, BL, RU, RF, RD, RB, LU, LF,
            LD, LB,
        ];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The spin with `up` reading up and `front` reading front, `None` if the
    /// two faces are equal or opposite.
    #[must_use]
    pub fn new(up: Face, front: Face) -> Option<Spin> {
        Spin::ALL
            .into_iter()
            .find(|&spin| SPIN_FACES[spin as usize] == (up, front))
    }

    #[must_use]
    pub fn up(self) -> Face {
        SPIN_FACES[self as usize].0
    }

    #[must_use]
    pub fn front(self) -> Face {
        SPIN_FACES[self as usize].1
    }

    /// The physical face currently in `position`.
    #[must_use]
    pub fn face_at(self, position: Face) -> Face {
        FACE_AT[self as usize][position as usize]
    }

    /// The position the physical face `face` currently occupies.
    #[must_use]
    pub fn position_of(self, face: Face) -> Face {
        Face::ALL
            .into_iter()
            .find(|&position| self.face_at(position) == face)
            .expect("Every face occupies a position")
    }

    /// The spin after turning the whole cube `quarters` times about `axis`.
    /// `quarters` is taken modulo 4.
    #[must_use]
    pub fn turned(self, axis: Axis, quarters: i32) -> Spin {
        match quarters.rem_euclid(4) {
            0 => self,
            n => TRANSITIONS[self as usize][axis as usize * 3 + n as usize - 1],
        }
    }

    /// The physical face turned by a relative face move.
    #[must_use]
    pub fn resolve_face(self, face: Face) -> Face {
        self.face_at(face)
    }

    /// Resolve a relative layer to the physical layer it moves. The flag is
    /// set when the physical layer turns against its own positive direction.
    /// Outer layers are never reversed.
    #[must_use]
    pub fn resolve_layer(self, layer: Layer, convention: RotationConvention) -> (Layer, bool) {
        match layer.face() {
            Some(face) => (Layer::from(self.face_at(face)), false),
            None => {
                let followed = self.face_at(convention.follows(layer.axis()));
                let axis = Layer::from(followed).axis();
                (
                    Layer::middle_of(axis),
                    convention.follows(axis) != followed,
                )
            }
        }
    }

    /// Express a vector given in the current view in physical coordinates.
    pub(crate) fn to_physical(self, v: [i8; 3]) -> [i8; 3] {
        let (r, u, f) = (
            self.face_at(Face::R).vector(),
            self.face_at(Face::U).vector(),
            self.face_at(Face::F).vector(),
        );
        [
            v[0] * r[0] + v[1] * u[0] + v[2] * f[0],
            v[0] * r[1] + v[1] * u[1] + v[2] * f[1],
            v[0] * r[2] + v[1] * u[2] + v[2] * f[2],
        ]
    }
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.up(), self.front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_spins() {
        let mut count = 0;
        for up in Face::ALL {
            for front in Face::ALL {
                let valid = up != front && up != front.opposite();
                assert_eq!(Spin::new(up, front).is_some(), valid);
                count += usize::from(valid);
            }
        }
        assert_eq!(count, 24);

        for spin in Spin::ALL {
            let mut faces = Face::ALL.map(|position| spin.face_at(position));
            faces.sort();
            assert_eq!(faces, Face::ALL);
            for position in Face::ALL {
                assert_eq!(spin.position_of(spin.face_at(position)), position);
            }
        }
    }

    #[test]
    fn test_turns() {
        let spin = Spin::UF;
        // x brings the front face up, y brings the right face to the front,
        // z brings the left face up
        assert_eq!(spin.turned(Axis::X, 1), Spin::FD);
        assert_eq!(spin.turned(Axis::Y, 1), Spin::UR);
        assert_eq!(spin.turned(Axis::Z, 1), Spin::LF);
        assert_eq!(spin.turned(Axis::X, -1), Spin::BU);
        assert_eq!(spin.turned(Axis::Y, 2), Spin::UB);

        for spin in Spin::ALL {
            for axis in Axis::ALL {
                assert_eq!(spin.turned(axis, 4), spin);
                assert_eq!(spin.turned(axis, 1).turned(axis, 3), spin);
                assert_eq!(spin.turned(axis, 2), spin.turned(axis, 1).turned(axis, 1));
            }
        }
    }

    #[test]
    fn test_turn_closure() {
        // every orientation is reachable from the canonical one
        let mut seen = vec![Spin::UF];
        let mut i = 0;
        while i < seen.len() {
            for axis in Axis::ALL {
                let next = seen[i].turned(axis, 1);
                if !seen.contains(&next) {
                    seen.push(next);
                }
            }
            i += 1;
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_resolve_layer() {
        let convention = RotationConvention::default();
        let upside_down = Spin::UF.turned(Axis::X, 2);
        assert_eq!(upside_down.resolve_face(Face::U), Face::D);
        assert_eq!(
            upside_down.resolve_layer(Layer::E, convention),
            (Layer::E, true)
        );
        assert_eq!(
            upside_down.resolve_layer(Layer::M, convention),
            (Layer::M, false)
        );
        assert_eq!(
            Spin::UF.turned(Axis::X, 1).resolve_layer(Layer::E, convention),
            (Layer::S, true)
        );
        assert_eq!(
            Spin::UF.resolve_layer(Layer::R, convention),
            (Layer::R, false)
        );
    }
}
