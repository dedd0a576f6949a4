use cube_core::{
    Axis, CubeState, Face, Layer, Notation, Piece, RotationConvention, Scramble, Spin, Step,
    StepTables, StickerPosition,
};

fn cube_after(text: &str) -> CubeState {
    let mut cube = CubeState::new();
    cube.apply_scramble(&Scramble::parse(text, Notation::standard()));
    cube
}

#[test_log::test]
fn test_facelets() {
    assert_eq!(
        cube_after("R").facelets(),
        "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLUBBUBBUBB"
    );
    assert_eq!(
        cube_after("R U R' U'").facelets(),
        "UULUUFUUFRRUBRRURRFFDFFUFFFDDRDDDDDDBLLLLLLLLBRRBBBBBB"
    );
    assert_eq!(
        cube_after("F R2 D' L B2").facelets(),
        "DDRBUDBLDRRBRRFFBFUFBUFBLRUFULFDDRUDBLLULLUDDULLRBFRBF"
    );
}

#[test_log::test]
fn test_facelets_follow_the_view() {
    let cube = cube_after("R x");
    assert_eq!(cube.spin(), Spin::FD);
    assert_eq!(
        cube.facelets(),
        "FFDFFDFFDRRRRRRRRRDDBDDBDDBBBUBBUBBULLLLLLLLLFUUFUUFUU"
    );

    let cube = cube_after("F R2 D' L B2 y");
    assert_eq!(
        cube.facelets(),
        "BBDLUDDDRULLRBFRBFRRBRRFFBFLDDUDUFFRUFBUFBLRUBLLULLUDD"
    );
    assert!(cube.matches(&cube_after("F R2 D' L B2")));
}

#[test_log::test]
fn test_conjugation_for_every_turn() {
    let convention = RotationConvention {
        s_follows_f: false,
        ..RotationConvention::default()
    };
    let tables = StepTables::get(convention);
    let prefix = Scramble::parse("L2 F' U Rw Dw' B", Notation::standard());
    let turns = Step::ALL.into_iter().filter(|step| step.is_turn());

    for turn in turns {
        for step in Step::ALL {
            let mut turned = CubeState::with_convention(convention);
            turned.apply_scramble(&prefix);
            turned.apply(turn);
            turned.apply(step);

            let mut direct = CubeState::with_convention(convention);
            direct.apply_scramble(&prefix);
            direct.apply(tables.conjugate(step, turn));

            assert!(turned.matches(&direct), "{turn} {step}");
        }
    }
}

#[test_log::test]
fn test_basic_steps_reproduce_every_step() {
    let tables = StepTables::standard();
    for step in Step::ALL {
        let mut direct = cube_after("D2 R' F L");
        direct.apply(step);

        let mut basic = cube_after("D2 R' F L");
        for part in tables.basic_steps(step).into_iter().flatten() {
            basic.apply(part);
        }

        assert!(direct.matches(&basic), "{step}");
        assert_eq!(direct.spin(), basic.spin(), "{step}");
    }
}

#[test_log::test]
fn test_pieces_and_layers() {
    let mut cube = cube_after("R U R' U' R' F R2 U' R' U' R U R' F'");
    // the T permutation only swaps two edges and two corners of the top layer
    assert!(!cube.is_solved());
    for layer in [Face::D, Face::F, Face::B, Face::L].map(Layer::from) {
        let solved = cube.is_layer_solved(layer);
        assert_eq!(solved, layer == Layer::D, "{layer:?}");
    }
    assert!(!cube.is_piece_solved(Piece::UL));
    assert!(!cube.is_piece_solved(Piece::UR));
    assert!(cube.is_piece_solved(Piece::UF));
    assert!(cube.is_piece_solved(Piece::UFL));

    cube.turn(Axis::Z, 2);
    assert!(cube.is_layer_solved(Layer::U));
    assert_eq!(cube.color_at(StickerPosition::U), Face::D);

    cube.reset();
    assert!(cube.is_solved());
    assert_eq!(cube.spin(), Spin::UF);
}
