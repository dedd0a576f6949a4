use crate::{
    step::{Layer, Modifier, Movement, Step, StepParts},
    stickers::Face,
};

use super::Scramble;

const MOVEMENTS: [Movement; 3] = [Movement::Cw, Movement::Half, Movement::Ccw];

impl Scramble {
    /// A random sequence of `length` face moves. No face is turned twice in a
    /// row, and two moves of the same axis are never followed by a third.
    #[must_use]
    pub fn random(length: usize, rng: &mut fastrand::Rng) -> Scramble {
        let mut faces: Vec<Face> = Vec::with_capacity(length);

        while faces.len() < length {
            let face = Face::ALL[rng.usize(..Face::ALL.len())];
            let axis = Layer::from(face).axis();
            let same_axis = |other: &Face| Layer::from(*other).axis() == axis;

            let allowed = match faces.as_slice() {
                [] => true,
                [.., last] if *last == face => false,
                [.., before, last] => !(same_axis(before) && same_axis(last)),
                [_] => true,
            };
            if allowed {
                faces.push(face);
            }
        }

        let scramble: Scramble = faces
            .into_iter()
            .filter_map(|face| {
                let movement = MOVEMENTS[rng.usize(..MOVEMENTS.len())];
                Step::from_parts(StepParts::new(Layer::from(face), Modifier::Single, movement))
            })
            .collect();
        log::debug!("Generated random scramble {scramble}");
        scramble
    }
}
