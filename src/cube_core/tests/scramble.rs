use cube_core::{
    AlphabetConfig, CubeState, Metric, Notation, RotationConvention, Scramble, ScrambleError,
    Step,
};
use itertools::Itertools;
use log::info;

fn random_steps(rng: &mut fastrand::Rng, len: usize, turns: bool) -> Scramble {
    let candidates = Step::ALL
        .into_iter()
        .filter(|step| !step.is_parenthesis() && (turns || !step.is_turn()))
        .collect_vec();
    (0..len)
        .map(|_| candidates[rng.usize(..candidates.len())])
        .collect()
}

fn standard() -> &'static Notation {
    Notation::standard()
}

#[test_log::test]
fn test_scenarios() {
    let notation = standard();
    let convention = RotationConvention::default();

    let scramble = Scramble::parse("R U R' U'", notation);
    assert_eq!(scramble.steps(), [Step::R, Step::U, Step::Rp, Step::Up]);
    assert_eq!(scramble.text(notation, " "), "R U R' U'");

    let scramble = Scramble::parse("(R U)2", notation);
    assert_eq!(scramble.steps(), [Step::R, Step::U, Step::R, Step::U]);

    let mut scramble = Scramble::from_steps(vec![Step::U, Step::U]);
    scramble.shrink();
    assert_eq!(scramble.steps(), [Step::U2]);

    let mut scramble = Scramble::from_steps(vec![Step::U, Step::Dp]);
    scramble.shrink();
    assert_eq!(scramble.steps(), [Step::U, Step::Dp]);

    let mut scramble = Scramble::from_steps(vec![Step::Rw]);
    scramble.to_basic_steps(convention);
    assert_eq!(scramble.steps(), [Step::L, Step::X]);

    let mut scramble = Scramble::from_steps(vec![Step::X, Step::U]);
    scramble.remove_turns(convention).unwrap();
    assert_eq!(scramble.steps(), [Step::F]);
}

#[test_log::test]
fn test_every_step_reads_back() {
    let notation = standard();
    let all = Scramble::from_steps(Step::ALL.to_vec());
    for separator in [" ", "", "  ,"] {
        let text = all.text(notation, separator);
        assert_eq!(Scramble::read(&text, notation), all, "{text}");
    }
}

#[test_log::test]
fn test_text_round_trip() {
    let notation = standard();
    let convention = RotationConvention::default();
    let mut rng = fastrand::Rng::with_seed(0x5eed);

    for _ in 0..50 {
        let scramble = random_steps(&mut rng, 30, true);
        let text = scramble.text(notation, " ");
        let parsed = Scramble::parse(&text, notation);
        assert_eq!(parsed, scramble);
        assert!(parsed.is_equivalent(&scramble, convention));
    }

    let grouped = Scramble::read("(R U (F' Rw)2 x)3 M2 (E", notation);
    let parsed = Scramble::parse(&grouped.text(notation, " "), notation);
    assert!(!parsed.steps().iter().any(|step| step.is_parenthesis()));
    assert!(parsed.is_equivalent(&grouped, convention));
}

#[test_log::test]
fn test_canonical_passes_keep_the_cube() {
    let convention = RotationConvention::default();
    let mut rng = fastrand::Rng::with_seed(42);

    for round in 0..100 {
        let original = random_steps(&mut rng, 25, true);

        let mut shrunk = original.clone();
        shrunk.shrink();
        assert!(shrunk.is_equivalent(&original, convention), "{original}");
        assert!(shrunk.len() <= original.len());
        let mut again = shrunk.clone();
        again.shrink();
        assert_eq!(again, shrunk);

        let mut simplified = original.clone();
        simplified.simplify();
        assert!(simplified.is_equivalent(&original, convention), "{original}");

        let mut basic = original.clone();
        basic.to_basic_steps(convention);
        assert!(basic.is_equivalent(&original, convention), "{original}");

        if original.has_turns() {
            let mut without_turns = original.clone();
            without_turns.remove_turns(convention).unwrap();
            assert!(!without_turns.has_turns());
            assert!(without_turns.is_equivalent(&original, convention), "{original}");
        }

        let mut reversed = original.clone();
        reversed.reverse().unwrap();
        reversed.reverse().unwrap();
        assert_eq!(reversed, original);

        let mut undo = original.clone();
        undo.invert_and_reverse().unwrap();
        let mut both = original.clone();
        both.extend(undo);
        assert!(both.is_equivalent(&Scramble::new(), convention), "{original}");

        if round % 25 == 0 {
            info!("Round {round}: {original}");
        }
    }
}

#[test_log::test]
fn test_grouped_passes() {
    let notation = standard();
    let convention = RotationConvention::default();

    let original = Scramble::read("(R x U)2 (F y)3 (Rw) x'", notation);
    let mut without_turns = original.clone();
    without_turns.remove_turns(convention).unwrap();
    assert!(!without_turns.has_turns());
    assert!(!without_turns.has_repetitions());
    assert!(without_turns.is_equivalent(&original, convention));
    // the group repeated once keeps its parentheses
    assert!(without_turns.steps().contains(&Step::Open));

    let mut undo = original.clone();
    undo.invert_and_reverse().unwrap();
    assert_eq!(
        undo.text(notation, " "),
        "x (Rw') (y' F')3 (U' x' R')2"
    );

    let mut no_turns = Scramble::parse("R U", notation);
    assert_eq!(
        no_turns.remove_turns(convention),
        Err(ScrambleError::NoTurns)
    );
}

#[test_log::test]
fn test_custom_convention() {
    let config = AlphabetConfig::from_toml_str(
        r#"
        [convention]
        e_follows_d = false
        m_follows_l = false
        "#,
    )
    .unwrap();
    let notation = Notation::new(config).unwrap();
    let convention = notation.convention();

    let flipped = Scramble::parse("E M2 S", &notation);
    let standard = Scramble::parse("E' M2' S", standard());
    let mut flipped_cube = CubeState::with_convention(convention);
    flipped_cube.apply_scramble(&flipped);
    let mut standard_cube = CubeState::new();
    standard_cube.apply_scramble(&standard);
    assert!(flipped_cube.matches(&standard_cube));

    let mut turned = Scramble::parse("x E y M", &notation);
    let original = turned.clone();
    turned.remove_turns(convention).unwrap();
    assert!(turned.is_equivalent(&original, convention));
}

#[test_log::test]
fn test_metrics_of_random_scrambles() {
    let mut rng = fastrand::Rng::with_seed(9);
    let scramble = Scramble::random(25, &mut rng);
    assert_eq!(scramble.metric(Metric::Htm), 25);
    assert_eq!(scramble.metric(Metric::Stm), 25);
    let halves = scramble
        .iter()
        .filter(|step| step.movement().is_some_and(|movement| movement.is_half()))
        .count();
    assert_eq!(scramble.metric(Metric::Qtm), 25 + halves);

    let mut cube = CubeState::new();
    cube.apply_scramble(&scramble);
    assert!(!cube.is_solved());
}
