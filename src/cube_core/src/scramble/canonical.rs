//! Rewrites of a scramble that keep what it does to the cube.

use std::slice::SliceIndex;

use log::debug;

use crate::{
    alphabet::RotationConvention,
    step::{Modifier, Step, join_movements},
    step_tables::StepTables,
};

use super::{Scramble, ScrambleError, matching_close};

fn develop(steps: &[Step], allow_simple: bool, out: &mut Vec<Step>) {
    let mut i = 0;
    while i < steps.len() {
        let step = steps[i];

        if step.is_open() {
            let close = matching_close(steps, i);
            let (inner, repetitions) = match close {
                Some(close) => (&steps[i + 1..close], steps[close].repetitions().unwrap_or(1)),
                None => (&steps[i + 1..], 1),
            };

            let mut body = vec![];
            develop(inner, allow_simple, &mut body);
            if allow_simple && repetitions == 1 {
                out.push(Step::Open);
                out.extend(body);
                out.push(Step::Close1);
            } else {
                for _ in 0..repetitions {
                    out.extend_from_slice(&body);
                }
            }

            i = close.map_or(steps.len(), |close| close + 1);
            continue;
        }

        // closers reached here do not close anything
        if !step.is_close() {
            out.push(step);
        }
        i += 1;
    }
}

/// Whether `step` is a single layer move of an outer face.
fn is_face_move(step: Step) -> bool {
    step.modifier() == Modifier::Single && step.layer().is_some_and(|layer| !layer.is_middle())
}

impl Scramble {
    /// Repeat every group in place. With `allow_simple`, groups repeated once
    /// keep their parentheses.
    pub fn develop_parentheses(&mut self, allow_simple: bool) {
        let mut out = Vec::with_capacity(self.steps.len());
        develop(&self.steps, allow_simple, &mut out);
        self.steps = out;
    }

    /// Try one reduction, returning whether something changed.
    fn shrink_once(&mut self) -> bool {
        let steps = &mut self.steps;

        for i in 0..steps.len() {
            // ()
            if steps[i].is_open() && steps.get(i + 1).is_some_and(|next| next.is_close()) {
                steps.drain(i..i + 2);
                return true;
            }

            // U U2 → U'
            if let Some(&next) = steps.get(i + 1)
                && steps[i].same_kind(next)
            {
                let joined = steps[i]
                    .movement()
                    .zip(next.movement())
                    .and_then(|(a, b)| join_movements(a, b))
                    .and_then(|movement| steps[i].with_movement(movement));
                match joined {
                    Some(joined) => {
                        steps[i] = joined;
                        steps.remove(i + 1);
                    }
                    None => {
                        steps.drain(i..i + 2);
                    }
                }
                return true;
            }

            // U D U → U2 D
            if let (Some(&middle), Some(&last)) = (steps.get(i + 1), steps.get(i + 2))
                && is_face_move(steps[i])
                && steps[i].same_kind(last)
                && is_face_move(middle)
                && middle.layer() == steps[i].layer().and_then(|layer| layer.opposite())
            {
                let joined = steps[i]
                    .movement()
                    .zip(last.movement())
                    .and_then(|(a, b)| join_movements(a, b))
                    .and_then(|movement| steps[i].with_movement(movement));
                steps.remove(i + 2);
                match joined {
                    Some(joined) => steps[i] = joined,
                    None => {
                        steps.remove(i);
                    }
                }
                return true;
            }
        }

        false
    }

    /// Merge steps that can be written as fewer steps until nothing changes:
    /// empty groups go away, consecutive moves of the same kind are joined,
    /// and a face move separated from its twin by the opposite face is joined
    /// with it. Parenthesis markers are never crossed.
    pub fn shrink(&mut self) {
        let before = self.steps.len();
        while self.shrink_once() {}
        debug!("Shrunk {before} steps to {}", self.steps.len());
    }

    /// Replace every step by its canonical spelling.
    pub fn simplify(&mut self) {
        for step in &mut self.steps {
            *step = step.simple();
        }
    }

    /// Remove every whole cube turn, rewriting the steps after each turn so
    /// the stickers end up in the same places. Groups repeated more than once
    /// are developed first.
    ///
    /// # Errors
    ///
    /// If there is no turn to remove
    pub fn remove_turns(&mut self, convention: RotationConvention) -> Result<(), ScrambleError> {
        if !self.has_turns() {
            return Err(ScrambleError::NoTurns);
        }

        self.develop_parentheses(true);
        let tables = StepTables::get(convention);

        let mut removed = 0;
        for i in (0..self.steps.len()).rev() {
            let turn = self.steps[i];
            if !turn.is_turn() {
                continue;
            }
            for step in &mut self.steps[i + 1..] {
                *step = tables.conjugate(*step, turn);
            }
            self.steps.remove(i);
            removed += 1;
        }

        debug!("Removed {removed} turns");
        Ok(())
    }

    /// Replace every step by the face moves and turns it is made of.
    pub fn to_basic_steps(&mut self, convention: RotationConvention) {
        let tables = StepTables::get(convention);
        self.steps = self
            .steps
            .iter()
            .flat_map(|&step| tables.basic_steps(step).into_iter().flatten())
            .collect();
    }

    /// Reverse the order of the steps. Groups keep their parentheses the
    /// right way around and groups left open are closed first.
    ///
    /// # Errors
    ///
    /// If a closer does not close any group
    pub fn reverse(&mut self) -> Result<(), ScrambleError> {
        self.check_parentheses()?;
        self.complete_parentheses();
        self.steps.reverse();

        let mut closers = vec![];
        for i in 0..self.steps.len() {
            if self.steps[i].is_close() {
                closers.push(i);
            } else if self.steps[i].is_open()
                && let Some(close) = closers.pop()
            {
                self.steps.swap(close, i);
            }
        }
        Ok(())
    }

    /// Invert every step in `range`.
    ///
    /// # Panics
    ///
    /// If `range` is out of bounds.
    pub fn invert<R: SliceIndex<[Step], Output = [Step]>>(&mut self, range: R) {
        for step in &mut self.steps[range] {
            *step = step.inverse();
        }
    }

    /// Turn the scramble into the one undoing it.
    ///
    /// # Errors
    ///
    /// If a closer does not close any group
    pub fn invert_and_reverse(&mut self) -> Result<(), ScrambleError> {
        self.reverse()?;
        self.invert(..);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Notation;
    use Step::*;

    fn steps(steps: &[Step]) -> Scramble {
        Scramble::from_steps(steps.to_vec())
    }

    #[test]
    fn test_develop() {
        let mut scramble = steps(&[Open, R, Open, U, Close2, Close1, F, Close3]);
        let mut simple = scramble.clone();

        scramble.develop_parentheses(false);
        assert_eq!(scramble.steps(), [R, U, U, F]);

        simple.develop_parentheses(true);
        assert_eq!(simple.steps(), [Open, R, U, U, Close1, F]);
    }

    #[test]
    fn test_shrink() {
        let shrunk = |input: &[Step]| {
            let mut scramble = steps(input);
            scramble.shrink();
            scramble.into_steps()
        };

        assert_eq!(shrunk(&[U, U]), [U2]);
        assert_eq!(shrunk(&[U, Dp]), [U, Dp]);
        assert_eq!(shrunk(&[U, U2]), [Up]);
        assert!(shrunk(&[R, U, Up, Rp]).is_empty());
        assert_eq!(shrunk(&[U, D, U]), [U2, D]);
        assert_eq!(shrunk(&[U, D, Up, F]), [D, F]);
        assert_eq!(shrunk(&[Rw, Rw2]), [Rwp]);
        assert_eq!(shrunk(&[R, Open, Close3, R]), [R2]);
        assert_eq!(shrunk(&[R, Open, R, Close2]), [R, Open, R, Close2]);
        assert!(shrunk(&[X, X, X, X]).is_empty());
        assert_eq!(shrunk(&[U, E, U]), [U, E, U]);
    }

    #[test]
    fn test_remove_turns() {
        let convention = RotationConvention::default();

        let mut scramble = steps(&[X, U]);
        scramble.remove_turns(convention).unwrap();
        assert_eq!(scramble.steps(), [F]);

        let mut scramble = steps(&[R, X, Y, U, Open, E, Close2]);
        let original = scramble.clone();
        scramble.remove_turns(convention).unwrap();
        assert!(!scramble.has_turns());
        assert_eq!(scramble.steps(), [R, F, Sp, Sp]);
        assert!(scramble.is_equivalent(&original, convention));

        let mut none = steps(&[R, U]);
        assert_eq!(none.remove_turns(convention), Err(ScrambleError::NoTurns));
        assert_eq!(none.steps(), [R, U]);
    }

    #[test]
    fn test_to_basic_steps() {
        let convention = RotationConvention::default();
        let mut scramble = steps(&[Rw]);
        scramble.to_basic_steps(convention);
        assert_eq!(scramble.steps(), [L, X]);

        let mut scramble = steps(&[Open, M, Us, Close2]);
        let original = scramble.clone();
        scramble.to_basic_steps(convention);
        assert_eq!(scramble.steps(), [Open, R, Lp, Xp, U, Dp, Close2]);
        assert!(scramble.is_equivalent(&original, convention));
    }

    #[test]
    fn test_reverse() {
        let mut scramble = steps(&[R, Open, U, F, Close2, Open, B, Open, L]);
        scramble.reverse().unwrap();
        assert_eq!(
            scramble.steps(),
            [Open, Open, L, Close1, B, Close1, Open, F, U, Close2, R]
        );
        assert!(scramble.parentheses_ok());

        let mut twice = scramble.clone();
        twice.reverse().unwrap();
        twice.reverse().unwrap();
        assert_eq!(twice, scramble);

        let mut stray = steps(&[R, Close1]);
        assert_eq!(
            stray.reverse(),
            Err(ScrambleError::UnmatchedCloser { index: 1 })
        );
    }

    #[test]
    fn test_invert() {
        let mut scramble = steps(&[R, U2, Fp, Open, Dw, Close3]);
        scramble.invert(1..=2);
        assert_eq!(scramble.steps(), [R, U2p, F, Open, Dw, Close3]);

        let notation = Notation::standard();
        let mut scramble = Scramble::read("(R U)2 F'", notation);
        let original = scramble.clone();
        scramble.invert_and_reverse().unwrap();
        assert_eq!(scramble.text(notation, " "), "F (U' R')2");

        let mut both = original.clone();
        both.extend(scramble);
        assert!(both.is_equivalent(&Scramble::new(), RotationConvention::default()));
    }

    #[test]
    fn test_simplify() {
        let mut scramble = steps(&[U2p, Ds, Ua2, Open, Lo2p, Close2]);
        scramble.simplify();
        assert_eq!(scramble.steps(), [U2, Usp, Us2, Open, Lw2, Close2]);
    }
}
