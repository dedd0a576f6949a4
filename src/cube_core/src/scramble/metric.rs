use crate::{step::Step, step_tables::StepTables};

use super::Scramble;

/// The ways of counting the length of a scramble. Whole cube turns are free
/// in all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Half turn metric: every face move counts once, whatever its angle.
    Htm,
    /// Quarter turn metric: half turns of a face count twice.
    Qtm,
    /// Slice turn metric: every step moving layers counts once.
    Stm,
}

impl Metric {
    pub const ALL: [Self; 3] = [Metric::Htm, Metric::Qtm, Metric::Stm];

    fn count(self, step: Step) -> usize {
        if step.is_parenthesis() || step.is_turn() {
            return 0;
        }
        if self == Metric::Stm {
            return 1;
        }

        // the basic sequences do not depend on the convention beyond the
        // direction of their face moves
        StepTables::standard()
            .basic_steps(step)
            .into_iter()
            .flatten()
            .filter(|basic| !basic.is_turn())
            .filter_map(Step::movement)
            .map(|movement| match self {
                Metric::Qtm => movement.quarters().unsigned_abs() as usize,
                _ => 1,
            })
            .sum()
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Metric::Htm => "HTM",
            Metric::Qtm => "QTM",
            Metric::Stm => "STM",
        })
    }
}

impl Scramble {
    /// The length of the scramble in `metric`, with every group repeated.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> usize {
        let mut developed = self.clone();
        developed.develop_parentheses(false);
        developed.iter().map(|step| metric.count(step)).sum()
    }
}
