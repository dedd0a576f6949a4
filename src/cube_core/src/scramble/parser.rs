use std::iter::Peekable;

use log::trace;

use crate::{
    alphabet::{CharRole, Notation},
    step::{Layer, Modifier, Movement, Step, StepParts},
};

use super::Scramble;

/// Reads the movement following a main character: `2`, `2'`, `'` or nothing.
fn read_movement(chars: &mut Peekable<impl Iterator<Item = char>>) -> Movement {
    match chars.peek() {
        Some('2') => {
            chars.next();
            if chars.next_if_eq(&'\'').is_some() {
                Movement::HalfCcw
            } else {
                Movement::Half
            }
        }
        Some('\'') => {
            chars.next();
            Movement::Ccw
        }
        _ => Movement::Cw,
    }
}

fn tokenize(text: &str, notation: &Notation) -> Vec<Step> {
    let mut steps = vec![];
    let mut chars = text.chars().filter(|&c| notation.is_known(c)).peekable();

    while let Some(c) = chars.next() {
        if c == '(' {
            steps.push(Step::Open);
            continue;
        }

        if c == ')' {
            let repetitions = chars
                .next_if(char::is_ascii_digit)
                .and_then(|digit| digit.to_digit(10))
                .and_then(|digit| u8::try_from(digit).ok())
                .map_or(1, |digit| digit.max(1));
            steps.extend(Step::close(repetitions));
            continue;
        }

        let (layer, mut modifier) = match notation.role(c) {
            Some(CharRole::Layer(layer)) => (layer, Modifier::Single),
            Some(CharRole::Turn(axis)) => (Layer::from(axis.face()), Modifier::Turn),
            Some(CharRole::WideLetter(face)) => (Layer::from(face), Modifier::Wide),
            Some(CharRole::Modifier(_)) | None => {
                trace!("Skipping stray {c:?}");
                continue;
            }
        };

        let mut combined = true;
        if let Some(CharRole::Modifier(extra)) = chars.peek().and_then(|&n| notation.role(n)) {
            chars.next();
            if modifier == Modifier::Single {
                modifier = extra;
            } else {
                combined = false;
            }
        }

        let movement = read_movement(&mut chars);
        let step = combined
            .then(|| Step::from_parts(StepParts::new(layer, modifier, movement)))
            .flatten();
        match step {
            Some(step) => steps.push(step),
            None => trace!("Dropping {c:?}, its modifier does not combine with it"),
        }
    }

    steps
}

impl Scramble {
    /// Tokenize `text` without developing its groups. Characters outside the
    /// alphabet are ignored and malformed tokens are dropped, so reading never
    /// fails.
    #[must_use]
    pub fn read(text: &str, notation: &Notation) -> Scramble {
        Scramble::from_steps(tokenize(text, notation))
    }

    /// Tokenize `text`, repair its parentheses and repeat every group in
    /// place.
    #[must_use]
    pub fn parse(text: &str, notation: &Notation) -> Scramble {
        let mut scramble = Scramble::read(text, notation);
        scramble.repair_parentheses();
        scramble.develop_parentheses(false);
        log::debug!("Parsed {} steps from {text:?}", scramble.len());
        scramble
    }

    /// The notation of every step joined by `separator`. Nothing is inserted
    /// right after an opener or right before a closer.
    #[must_use]
    pub fn text(&self, notation: &Notation, separator: &str) -> String {
        let mut out = String::new();
        let mut previous: Option<Step> = None;
        for step in self {
            if previous.is_some_and(|previous| !previous.is_open()) && !step.is_close() {
                out.push_str(separator);
            }
            out.push_str(notation.text(step));
            previous = Some(step);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AlphabetConfig;
    use Step::*;

    fn read(text: &str) -> Vec<Step> {
        Scramble::read(text, Notation::standard()).into_steps()
    }

    #[test]
    fn test_read_moves() {
        assert_eq!(read("R U R' U'"), [R, U, Rp, Up]);
        assert_eq!(read("R2 U2' x y' z2"), [R2, U2p, X, Yp, Z2]);
        assert_eq!(read("Rw r' Ro2 Us Da'"), [Rw, Rwp, Ro2, Us, Dap]);
        assert_eq!(read("M E' S2"), [M, Ep, S2]);
        assert_eq!(read("RUR'U'"), [R, U, Rp, Up]);
    }

    #[test]
    fn test_read_groups() {
        assert_eq!(read("(R U)2"), [Open, R, U, Close2]);
        assert_eq!(read("(R (U)3)"), [Open, R, Open, U, Close3, Close1]);
        assert_eq!(read("(R)1 (U)0"), [Open, R, Close1, Open, U, Close1]);
        assert_eq!(read(")R"), [Close1, R]);
    }

    #[test]
    fn test_read_malformed() {
        // modifiers do not combine with middle layers or turns
        assert_eq!(read("Mw R"), [R]);
        assert_eq!(read("xw U"), [U]);
        assert_eq!(read("rw U"), [U]);
        // stray characters are skipped
        assert_eq!(read("w 2 ' R ? 7 U"), [R, U]);
        assert_eq!(read("R'2"), [Rp]);
        assert!(read("Q").is_empty());
    }

    #[test]
    fn test_parse() {
        let parse = |text| Scramble::parse(text, Notation::standard()).into_steps();
        assert_eq!(parse("(R U)2"), [R, U, R, U]);
        assert_eq!(parse("(R (U)2)2"), [R, U, U, R, U, U]);
        assert_eq!(parse("R) (U"), [R, U]);
        assert_eq!(parse("(R U"), [R, U]);
    }

    #[test]
    fn test_text() {
        let notation = Notation::standard();
        let scramble = Scramble::read("R U R' U'", notation);
        assert_eq!(scramble.text(notation, " "), "R U R' U'");
        assert_eq!(scramble.text(notation, ""), "RUR'U'");

        let grouped = Scramble::read("(R U)2 (F)", notation);
        assert_eq!(grouped.text(notation, " "), "(R U)2 (F)");
        assert_eq!(grouped.text(notation, ", "), "(R, U)2, (F)");
    }

    #[test]
    fn test_custom_alphabet() {
        let mut config = AlphabetConfig::default();
        config.layers.U = 'T';
        config.turns.y = 'Y';
        config.wide_letters.U = None;
        let notation = Notation::new(config).unwrap();

        let scramble = Scramble::read("T Y' Tw2 U u", &notation);
        assert_eq!(scramble.steps(), [U, Yp, Uw2]);
        assert_eq!(scramble.text(&notation, " "), "T Y' Tw2");
    }
}
