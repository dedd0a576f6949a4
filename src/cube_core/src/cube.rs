use crate::{
    alphabet::RotationConvention,
    scramble::Scramble,
    spin::Spin,
    step::{Axis, Layer, Step},
    step_tables::StepTables,
    stickers::{
        Face, Piece, STICKER_COUNT, StickerPosition, face_reading_order, face_turn,
    },
};

/// Facelet strings list the faces in this order.
pub const FACELET_ORDER: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

/// Follows one sticker around the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickerTracker {
    solved: StickerPosition,
    current: StickerPosition,
}

impl StickerTracker {
    /// The position this sticker occupies on a solved cube, which is also its
    /// identity.
    #[must_use]
    pub fn solved(self) -> StickerPosition {
        self.solved
    }

    #[must_use]
    pub fn current(self) -> StickerPosition {
        self.current
    }

    #[must_use]
    pub fn is_home(self) -> bool {
        self.solved == self.current
    }
}

/// A 3x3x3 cube: where every sticker is, and how the whole cube is held.
///
/// Sticker positions are physical, so whole cube turns only change the
/// [`Spin`]. Every relative move is resolved through the spin before it is
/// applied.
#[derive(Clone)]
pub struct CubeState {
    trackers: [StickerTracker; STICKER_COUNT],
    spin: Spin,
    tables: &'static StepTables,
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::new()
    }
}

impl std::fmt::Debug for CubeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CubeState")
            .field("spin", &self.spin)
            .field("facelets", &self.facelets())
            .finish_non_exhaustive()
    }
}

impl CubeState {
    /// A solved cube using the standard middle layer convention.
    #[must_use]
    pub fn new() -> CubeState {
        CubeState::with_convention(RotationConvention::default())
    }

    /// A solved cube decomposing middle layer moves with `convention`.
    #[must_use]
    pub fn with_convention(convention: RotationConvention) -> CubeState {
        CubeState {
            trackers: StickerPosition::ALL.map(|sticker| StickerTracker {
                solved: sticker,
                current: sticker,
            }),
            spin: Spin::UF,
            tables: StepTables::get(convention),
        }
    }

    #[must_use]
    pub fn convention(&self) -> RotationConvention {
        self.tables.convention()
    }

    #[must_use]
    pub fn spin(&self) -> Spin {
        self.spin
    }

    #[must_use]
    pub fn trackers(&self) -> &[StickerTracker; STICKER_COUNT] {
        &self.trackers
    }

    /// Put every sticker back home and hold the cube with U up and F front.
    pub fn reset(&mut self) {
        for tracker in &mut self.trackers {
            tracker.current = tracker.solved;
        }
        self.spin = Spin::UF;
    }

    /// Apply one step. Parenthesis markers do nothing.
    pub fn apply(&mut self, step: Step) {
        for basic in self.tables.basic_steps(step).into_iter().flatten() {
            self.apply_basic(basic);
        }
        debug_assert!(self.is_consistent(), "Applying {step:?} broke the cube");
    }

    /// Apply `step` `times` times. Only `times` modulo 4 matters.
    pub fn apply_times(&mut self, step: Step, times: i32) {
        for _ in 0..times.rem_euclid(4) {
            self.apply(step);
        }
    }

    /// Apply a sequence of steps, repeating its groups.
    pub fn apply_steps(&mut self, steps: impl IntoIterator<Item = Step>) {
        let scramble: Scramble = steps.into_iter().collect();
        self.apply_scramble(&scramble);
    }

    /// Apply a scramble, repeating its groups.
    pub fn apply_scramble(&mut self, scramble: &Scramble) {
        let mut developed = scramble.clone();
        developed.develop_parentheses(false);
        for step in developed {
            self.apply(step);
        }
    }

    /// Turn the whole cube `quarters` times about `axis`. Stickers stay put.
    pub fn turn(&mut self, axis: Axis, quarters: i32) {
        self.spin = self.spin.turned(axis, quarters);
    }

    fn apply_basic(&mut self, step: Step) {
        let (Some(layer), Some(movement)) = (step.layer(), step.movement()) else {
            return;
        };

        if let Some(axis) = step.turn_axis() {
            self.turn(axis, movement.quarters());
            return;
        }

        let Some(face) = layer.face() else {
            unreachable!("Basic steps never turn a middle layer alone");
        };
        let physical = self.spin.resolve_face(face);
        if let Some(permutation) = face_turn(physical, movement.quarters()) {
            for tracker in &mut self.trackers {
                tracker.current = permutation.image(tracker.current);
            }
        }
    }

    /// Whether both cubes have every sticker in the same place, however they
    /// are held.
    #[must_use]
    pub fn matches(&self, other: &CubeState) -> bool {
        self.trackers
            .iter()
            .zip(&other.trackers)
            .all(|(a, b)| a.current == b.current)
    }

    /// The sticker currently sitting at the physical `position`.
    #[must_use]
    pub fn sticker_at(&self, position: StickerPosition) -> StickerPosition {
        self.trackers
            .iter()
            .find(|tracker| tracker.current == position)
            .map(|tracker| tracker.solved)
            .expect("Every position holds exactly one sticker")
    }

    /// The colour seen at `position`, where `position` is named relative to
    /// the way the cube is currently held.
    #[must_use]
    pub fn color_at(&self, position: StickerPosition) -> Face {
        let physical = StickerPosition::from_geometry(
            self.spin.to_physical(position.piece().position()),
            self.spin.to_physical(position.face().vector()),
        )
        .expect("Rotating the cube maps stickers onto stickers");
        self.sticker_at(physical).face()
    }

    /// The colours of all 54 stickers as seen from the current orientation,
    /// nine per face in `URFDLB` order, each face read row by row.
    #[must_use]
    pub fn facelets(&self) -> String {
        FACELET_ORDER
            .into_iter()
            .flat_map(|face| {
                face_reading_order(face).map(|position| {
                    let sticker = StickerPosition::from_geometry(position, face.vector())
                        .expect("Every facelet is a sticker");
                    self.color_at(sticker).letter()
                })
            })
            .collect()
    }

    /// Every sticker is home. The orientation of the cube is ignored.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.trackers.iter().all(|tracker| tracker.is_home())
    }

    #[must_use]
    pub fn is_piece_solved(&self, piece: Piece) -> bool {
        piece
            .stickers()
            .all(|sticker| self.trackers[sticker.index()].is_home())
    }

    /// Every piece of the layer named relative to the current orientation is
    /// home.
    #[must_use]
    pub fn is_layer_solved(&self, layer: Layer) -> bool {
        let (physical, _) = self.spin.resolve_layer(layer, self.convention());
        Piece::ALL
            .into_iter()
            .filter(|piece| piece.in_layer(physical))
            .all(|piece| self.is_piece_solved(piece))
    }

    /// Whether the current positions form a bijection onto the sticker
    /// positions.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = [false; STICKER_COUNT];
        for tracker in &self.trackers {
            let slot = &mut seen[tracker.current.index()];
            if *slot {
                return false;
            }
            *slot = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    fn scrambled() -> CubeState {
        let mut cube = CubeState::new();
        cube.apply_steps([Step::R, Step::U, Step::Fp, Step::L2, Step::D, Step::Bw]);
        cube
    }

    #[test]
    fn test_solved() {
        let cube = CubeState::new();
        assert!(cube.is_solved());
        assert!(cube.is_consistent());
        assert_eq!(cube.facelets(), SOLVED);
        assert_eq!(cube.spin(), Spin::UF);
    }

    #[test]
    fn test_inverse_restores() {
        for step in Step::ALL {
            let mut cube = scrambled();
            let before = cube.clone();
            cube.apply(step);
            cube.apply(step.inverse());
            assert!(cube.matches(&before), "{step:?}");
            assert_eq!(cube.spin(), before.spin(), "{step:?}");
        }
    }

    #[test]
    fn test_quarter_turn_order() {
        for step in Step::ALL {
            let mut cube = scrambled();
            let before = cube.clone();
            for _ in 0..4 {
                cube.apply(step);
            }
            assert!(cube.matches(&before), "{step:?}");
            assert_eq!(cube.spin(), before.spin(), "{step:?}");

            let mut once = CubeState::new();
            once.apply(step);
            let mut five = CubeState::new();
            five.apply_times(step, 5);
            assert!(once.matches(&five));
            assert_eq!(once.spin(), five.spin());
        }
    }

    #[test]
    fn test_conjugation_moves_the_same_stickers() {
        let tables = StepTables::standard();
        for turn in [Step::X, Step::Y, Step::Z, Step::Xp, Step::Y2, Step::Z2p] {
            for step in Step::ALL {
                let mut turned = scrambled();
                turned.apply(turn);
                turned.apply(step);

                let mut direct = scrambled();
                direct.apply(tables.conjugate(step, turn));

                assert!(turned.matches(&direct), "{turn:?} {step:?}");
            }
        }
    }

    #[test]
    fn test_compound_equivalences() {
        let check = |a: &[Step], b: &[Step]| {
            let mut left = CubeState::new();
            left.apply_steps(a.iter().copied());
            let mut right = CubeState::new();
            right.apply_steps(b.iter().copied());
            assert!(left.matches(&right), "{a:?} {b:?}");
            assert_eq!(left.spin(), right.spin(), "{a:?} {b:?}");
        };

        check(&[Step::Rw], &[Step::R, Step::Mp]);
        check(&[Step::X], &[Step::R, Step::Mp, Step::Lp]);
        check(&[Step::Uw], &[Step::U, Step::Ep]);
        check(&[Step::Fw], &[Step::F, Step::S]);
        check(&[Step::Us], &[Step::U, Step::Dp]);
        check(&[Step::Ua], &[Step::U, Step::D]);
        check(&[Step::Ro], &[Step::R, Step::M]);
        check(&[Step::Ds], &[Step::Usp]);
        check(&[Step::Ua2], &[Step::Us2]);
        check(&[Step::Uo2p], &[Step::Uw2]);
    }

    #[test]
    fn test_sexy_move_order() {
        let sexy = [Step::R, Step::U, Step::Rp, Step::Up];
        let mut cube = CubeState::new();
        for _ in 0..6 {
            cube.apply_steps(sexy);
        }
        assert!(cube.is_solved());

        cube.apply_steps(sexy);
        assert!(!cube.is_solved());
        assert!(!cube.is_layer_solved(Layer::D));
        assert!(cube.is_piece_solved(Piece::DFL));
        assert!(cube.is_piece_solved(Piece::UL));
        assert!(!cube.is_piece_solved(Piece::UFR));
    }

    #[test]
    fn test_layer_solved() {
        let mut cube = CubeState::new();
        cube.apply(Step::R);
        assert!(cube.is_layer_solved(Layer::L));
        assert!(cube.is_layer_solved(Layer::M));
        assert!(!cube.is_layer_solved(Layer::R));
        assert!(!cube.is_layer_solved(Layer::U));

        // layers are named relative to the current orientation
        cube.turn(Axis::Y, 1);
        assert!(!cube.is_layer_solved(Layer::F));
        assert!(cube.is_layer_solved(Layer::B));
    }

    #[test]
    fn test_turns_only_move_the_view() {
        let mut cube = CubeState::new();
        cube.apply(Step::Y);
        assert!(cube.is_solved());
        assert_eq!(&cube.facelets()[18..27], "RRRRRRRRR");
        assert_eq!(&cube.facelets()[..9], "UUUUUUUUU");

        cube.reset();
        cube.turn(Axis::X, 1);
        assert_eq!(cube.color_at(StickerPosition::U), Face::F);
        assert_eq!(&cube.facelets()[..9], "FFFFFFFFF");

        cube.reset();
        assert_eq!(cube.facelets(), SOLVED);
    }

    #[test]
    fn test_relative_moves() {
        // after x the relative U face is the physical F face
        let mut turned = CubeState::new();
        turned.apply_steps([Step::X, Step::U]);
        let mut direct = CubeState::new();
        direct.apply(Step::F);
        assert!(turned.matches(&direct));

        let mut cube = CubeState::new();
        cube.apply(Step::R);
        assert_eq!(cube.sticker_at(StickerPosition::UBR_U), StickerPosition::UFR_F);
        assert_eq!(cube.color_at(StickerPosition::UBR_U), Face::F);
        assert_eq!(&cube.facelets()[..9], "UUFUUFUUF");
    }

    #[test]
    fn test_middle_convention() {
        let flipped = RotationConvention {
            e_follows_d: false,
            ..RotationConvention::default()
        };
        let mut cube = CubeState::with_convention(flipped);
        cube.apply(Step::E);
        let mut standard = CubeState::new();
        standard.apply(Step::Ep);
        assert!(cube.matches(&standard));
        assert_eq!(cube.spin(), standard.spin());
        assert_eq!(cube.convention(), flipped);
    }
}
