//! The step tables that depend on the rotation convention of the middle
//! layers: conjugation by whole cube turns and decomposition into basic steps.

use std::sync::OnceLock;

use crate::{
    alphabet::RotationConvention,
    spin::Spin,
    step::{Axis, Layer, Modifier, Movement, STEP_COUNT, Step, StepParts},
    stickers::Face,
};

/// Up to three basic steps, applied left to right.
pub type BasicSequence = [Option<Step>; 3];

/// Conjugation and decomposition tables for one rotation convention.
#[derive(Debug)]
pub struct StepTables {
    convention: RotationConvention,
    /// `[axis * 3 + quarters - 1][step]`
    conjugates: [[Step; STEP_COUNT]; 9],
    basics: [BasicSequence; STEP_COUNT],
}

static TABLES: [OnceLock<StepTables>; 8] = [const { OnceLock::new() }; 8];

/// A face move, `None` when the quarters add up to a full turn.
fn face_step(face: Face, quarters: i32) -> Option<Step> {
    let movement = Movement::from_quarters(quarters)?;
    Step::from_parts(StepParts::new(
        Layer::from(face),
        Modifier::Single,
        movement,
    ))
}

/// The whole cube turn following the clockwise direction of `face`.
fn turn_like(face: Face, quarters: i32) -> Option<Step> {
    let axis = Layer::from(face).axis();
    let quarters = if face.is_positive() {
        quarters
    } else {
        -quarters
    };
    Movement::from_quarters(quarters).map(|movement| axis.turn(movement))
}

fn conjugate_once(step: Step, axis: Axis, convention: RotationConvention) -> Step {
    let parts = step.parts();
    let (Some(layer), Some(movement)) = (parts.layer, parts.movement) else {
        return step;
    };
    let spin = Spin::UF.turned(axis, 1);

    let (layer, reversed) = match parts.modifier {
        Modifier::Turn => {
            // turns carry the positive face of their axis
            let face = spin.face_at(layer.axis().face());
            (
                Layer::from(Layer::from(face).axis().face()),
                !face.is_positive(),
            )
        }
        _ => spin.resolve_layer(layer, convention),
    };
    let movement = if reversed {
        movement.inverse()
    } else {
        movement
    };

    Step::from_parts(StepParts::new(layer, parts.modifier, movement))
        .expect("Conjugating a step by a turn gives another step")
}

fn basic_sequence(step: Step, convention: RotationConvention) -> BasicSequence {
    let parts = step.parts();
    let (Some(layer), Some(movement)) = (parts.layer, parts.movement) else {
        return [Some(step), None, None];
    };
    let a = movement.quarters();

    let Some(face) = layer.face() else {
        // a middle layer is the whole cube turning like the face it follows,
        // with both outer layers turned back
        let followed = convention.follows(layer.axis());
        let (positive, negative) = if followed.is_positive() {
            (face_step(followed, -a), face_step(followed.opposite(), a))
        } else {
            (face_step(followed.opposite(), a), face_step(followed, -a))
        };
        return [positive, negative, turn_like(followed, a)];
    };
    let opposite = face.opposite();

    match parts.modifier {
        Modifier::Single | Modifier::Turn => [Some(step), None, None],
        Modifier::Wide => [face_step(opposite, a), turn_like(face, a), None],
        Modifier::WideOpposite => [
            face_step(face, 2 * a),
            face_step(opposite, -a),
            turn_like(face, -a),
        ],
        Modifier::Slice => [face_step(face, a), face_step(opposite, -a), None],
        Modifier::SliceOpposite => [face_step(face, a), face_step(opposite, a), None],
        Modifier::Open | Modifier::Close(_) => [Some(step), None, None],
    }
}

impl StepTables {
    fn build(convention: RotationConvention) -> StepTables {
        log::debug!("Building step tables for {convention:?}");

        let mut conjugates = [Step::ALL; 9];
        for axis in Axis::ALL {
            let base = axis as usize * 3;
            let once = Step::ALL.map(|step| conjugate_once(step, axis, convention));
            conjugates[base] = once;
            conjugates[base + 1] = once.map(|step| once[step as usize]);
            conjugates[base + 2] = conjugates[base + 1].map(|step| once[step as usize]);
        }

        StepTables {
            convention,
            conjugates,
            basics: Step::ALL.map(|step| basic_sequence(step, convention)),
        }
    }

    /// The tables of `convention`, built on first use.
    #[must_use]
    pub fn get(convention: RotationConvention) -> &'static StepTables {
        TABLES[convention.index()].get_or_init(|| StepTables::build(convention))
    }

    /// The tables of the standard convention.
    #[must_use]
    pub fn standard() -> &'static StepTables {
        StepTables::get(RotationConvention::default())
    }

    #[must_use]
    pub fn convention(&self) -> RotationConvention {
        self.convention
    }

    /// The step `step` becomes once the whole cube has been turned by `turn`,
    /// so that `turn step` and `conjugate(step, turn)` move the same stickers.
    /// Steps that are not whole cube turns leave `step` unchanged.
    #[must_use]
    pub fn conjugate(&self, step: Step, turn: Step) -> Step {
        match (turn.turn_axis(), turn.movement()) {
            (Some(axis), Some(movement)) => self.conjugate_by(step, axis, movement.quarters()),
            _ => step,
        }
    }

    /// Conjugate by `quarters` quarter turns about `axis`.
    #[must_use]
    pub fn conjugate_by(&self, step: Step, axis: Axis, quarters: i32) -> Step {
        match quarters.rem_euclid(4) {
            0 => step,
            n => self.conjugates[axis as usize * 3 + n as usize - 1][step as usize],
        }
    }

    /// The basic steps reproducing `step`. Face moves, whole cube turns and
    /// parenthesis markers are their own sequence.
    #[must_use]
    pub fn basic_steps(&self, step: Step) -> BasicSequence {
        self.basics[step as usize]
    }
}
