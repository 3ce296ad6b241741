//! Arithmetic problems interleaved between memory items.

use crate::config::{LevelConfig, MathType};
use crate::trial::StimulusGenerator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }
}

/// `a op b = answer`, with a non-negative integer answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    pub a: u32,
    pub b: u32,
    pub operator: Operator,
    pub answer: u32,
}

impl fmt::Display for MathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.a, self.operator.symbol(), self.b)
    }
}

/// Second operand range for multiplication and division.
const FACTOR: RangeInclusive<u32> = 2..=11;
/// First operand range for multiplication on the hardest tier.
const MASTER_FACTOR: RangeInclusive<u32> = 2..=16;
/// Quotient range for division.
const QUOTIENT: RangeInclusive<u32> = 1..=20;

/// Generates problems for one level's math type and operand range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemGenerator {
    math_type: MathType,
    min: u32,
    max: u32,
}

impl ProblemGenerator {
    /// `range` is inclusive; a reversed range is treated as its sorted form.
    pub fn new(math_type: MathType, range: (u32, u32)) -> Self {
        let (min, max) = range;
        Self {
            math_type,
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn for_level(level: &LevelConfig) -> Self {
        Self::new(level.math_type, level.math_range)
    }

    pub fn math_type(&self) -> MathType {
        self.math_type
    }

    /// Largest number a generated problem can contain, or `None` when the
    /// range is too wide for `u32` arithmetic.
    pub fn largest_value(&self) -> Option<u32> {
        let sum = self.max.checked_add(self.max);
        match self.math_type {
            MathType::Addition | MathType::MixedBasic => sum,
            MathType::Multiplication => self.max.checked_mul(*FACTOR.end()),
            MathType::All => sum.map(|sum| {
                sum.max(MASTER_FACTOR.end() * FACTOR.end())
                    .max(FACTOR.end() * QUOTIENT.end())
            }),
        }
    }

    fn operand<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }

    fn add<R: Rng + ?Sized>(&self, rng: &mut R) -> MathProblem {
        let (a, b) = (self.operand(rng), self.operand(rng));
        MathProblem {
            a,
            b,
            operator: Operator::Add,
            answer: a + b,
        }
    }

    fn subtract<R: Rng + ?Sized>(&self, rng: &mut R) -> MathProblem {
        let (x, y) = (self.operand(rng), self.operand(rng));
        let (a, b) = (x.max(y), x.min(y));
        MathProblem {
            a,
            b,
            operator: Operator::Subtract,
            answer: a - b,
        }
    }

    fn multiply<R: Rng + ?Sized>(rng: &mut R, first: RangeInclusive<u32>) -> MathProblem {
        let a = rng.gen_range(first);
        let b = rng.gen_range(FACTOR);
        MathProblem {
            a,
            b,
            operator: Operator::Multiply,
            answer: a * b,
        }
    }

    fn divide<R: Rng + ?Sized>(rng: &mut R) -> MathProblem {
        let b = rng.gen_range(FACTOR);
        let answer = rng.gen_range(QUOTIENT);
        MathProblem {
            a: b * answer,
            b,
            operator: Operator::Divide,
            answer,
        }
    }
}

impl Default for ProblemGenerator {
    fn default() -> Self {
        Self::new(MathType::Addition, (1, 10))
    }
}

impl StimulusGenerator for ProblemGenerator {
    type Stimulus = MathProblem;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MathProblem {
        match self.math_type {
            MathType::Addition => self.add(rng),
            MathType::MixedBasic => {
                if rng.gen_bool(0.5) {
                    self.add(rng)
                } else {
                    self.subtract(rng)
                }
            }
            MathType::Multiplication => Self::multiply(rng, self.min..=self.max),
            // The dividend is not clamped to the level range.
            MathType::All => match Operator::ALL[rng.gen_range(0..Operator::ALL.len())] {
                Operator::Add => self.add(rng),
                Operator::Subtract => self.subtract(rng),
                Operator::Multiply => Self::multiply(rng, MASTER_FACTOR),
                Operator::Divide => Self::divide(rng),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LEVELS;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn draw(generator: &ProblemGenerator, n: usize) -> Vec<MathProblem> {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        (0..n).map(|_| generator.generate(&mut rng)).collect()
    }

    #[test]
    fn addition_stays_in_range() {
        let generator = ProblemGenerator::for_level(&LEVELS[1]);
        for p in draw(&generator, 500) {
            assert_eq!(p.operator, Operator::Add);
            assert!((5..=20).contains(&p.a) && (5..=20).contains(&p.b));
            assert_eq!(p.answer, p.a + p.b);
        }
    }

    #[test]
    fn mixed_basic_never_goes_negative() {
        let generator = ProblemGenerator::for_level(&LEVELS[2]);
        let problems = draw(&generator, 500);
        let operators: HashSet<Operator> = problems.iter().map(|p| p.operator).collect();

        assert_eq!(operators.len(), 2);
        for p in problems.iter().filter(|p| p.operator == Operator::Subtract) {
            assert!(p.a >= p.b);
            assert_eq!(p.answer, p.a - p.b);
        }
    }

    #[test]
    fn multiplication_uses_small_second_factor() {
        let generator = ProblemGenerator::for_level(&LEVELS[4]);
        for p in draw(&generator, 500) {
            assert!((2..=12).contains(&p.a));
            assert!(FACTOR.contains(&p.b));
            assert_eq!(p.answer, p.a * p.b);
        }
    }

    #[test]
    fn all_type_divides_exactly() {
        let generator = ProblemGenerator::for_level(&LEVELS[5]);
        let problems = draw(&generator, 1000);
        let operators: HashSet<Operator> = problems.iter().map(|p| p.operator).collect();
        assert_eq!(operators.len(), 4);

        for p in &problems {
            match p.operator {
                Operator::Divide => {
                    assert_eq!(p.a, p.b * p.answer);
                    assert!(QUOTIENT.contains(&p.answer));
                }
                Operator::Multiply => assert!(MASTER_FACTOR.contains(&p.a)),
                Operator::Add | Operator::Subtract => {
                    assert!((10..=100).contains(&p.a) && (10..=100).contains(&p.b))
                }
            }
        }
    }

    #[test]
    fn largest_value_bounds_every_problem() {
        for level in &LEVELS {
            let generator = ProblemGenerator::for_level(level);
            let largest = generator.largest_value().unwrap();
            for p in draw(&generator, 300) {
                assert!(p.a <= largest && p.b <= largest && p.answer <= largest);
            }
        }
    }

    #[test]
    fn largest_value_detects_overflowing_ranges() {
        let half = u32::MAX / 2;
        assert_eq!(
            ProblemGenerator::new(MathType::Addition, (1, half)).largest_value(),
            Some(half * 2)
        );
        assert!(ProblemGenerator::new(MathType::Addition, (1, half + 1))
            .largest_value()
            .is_none());
        assert!(ProblemGenerator::new(MathType::Multiplication, (2, u32::MAX / 11 + 1))
            .largest_value()
            .is_none());
        assert!(ProblemGenerator::new(MathType::All, (1, u32::MAX))
            .largest_value()
            .is_none());
    }

    #[test]
    fn display_reads_like_a_question() {
        let p = MathProblem {
            a: 12,
            b: 4,
            operator: Operator::Divide,
            answer: 3,
        };
        assert_eq!(p.to_string(), "12 ÷ 4 = ?");
    }
}
