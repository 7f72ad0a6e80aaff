//! Bounded-range sampling: mapping uniform 32-bit draws onto `[0, range)`.
//!
//! A plain `draw % range` or multiply-high is biased whenever `2^32` is not a
//! multiple of `range`, because the excess tail maps onto a subset of the
//! outputs. Every strategy here rejects draws that land in that tail and
//! tries again; they differ in which arithmetic they use to detect the tail
//! and in how they replace a rejected draw.
//!
//! | Strategy      | Acceptance test                          | On rejection            |
//! |---------------|------------------------------------------|-------------------------|
//! | `Mult`        | `lo(d * r) <= floor(2^32 / r) * r - 1`   | fresh draw              |
//! | `MultLazy`    | as `Mult`, threshold computed on demand  | fresh draw              |
//! | `Mod`         | `d - d % r <= 2^32 - r`                  | fresh draw              |
//! | `RecycleMult` | as `Mult`                                | rotate right, 31 max    |
//! | `RecycleMod`  | as `Mod`                                 | rotate right, 31 max    |
//! | `Delegated`   | PCG's own bounded mapping                | opaque                  |

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::RangedRandError;
use crate::random::engine::UniformEngine;
use crate::random::pcg32;
use crate::utils::bits::{lazy_bound, mod_limit, mul_hi_lo, mult_threshold};

/// Consecutive rotations of one draw before a fresh draw is taken.
pub const MAX_ROTATIONS: u32 = 31;

/// Fresh draws allowed inside one call before the loop gives up.
///
/// A uniform engine is rejected with probability below 1/2 per fresh draw,
/// so reaching this bound means the engine is degenerate.
pub const MAX_FRESH_DRAWS: u32 = 1024;

/// Debiasing strategy used to reduce a draw into `[0, range)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Multiply-high with a precomputed rejection threshold.
    Mult,
    /// Multiply-high; the threshold is only computed when a cheap bound fails.
    MultLazy,
    /// Modulo reduction, rejecting draws in the top partial block.
    Mod,
    /// `Mult` that rotates a rejected draw instead of drawing again.
    ///
    /// Unbiased only while rejections are rare: near `range = 2^31 + 1` the
    /// rotated rejects skew the output toward the middle of the range.
    RecycleMult,
    /// `Mod` that rotates a rejected draw instead of drawing again.
    ///
    /// Not proven fair: a rotated reject is correlated with the draw it came
    /// from, and for ranges with a large rejection tail the output is
    /// measurably skewed.
    RecycleMod,
    /// PCG32's bounded mapping, see [`pcg32::bounded_rand`]. Subject to the
    /// same [`MAX_FRESH_DRAWS`] budget as the other strategies.
    Delegated,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 6] = [
        Strategy::Mult,
        Strategy::MultLazy,
        Strategy::Mod,
        Strategy::RecycleMult,
        Strategy::RecycleMod,
        Strategy::Delegated,
    ];

    /// Reference name of the strategy.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Mult => "mult",
            Strategy::MultLazy => "mult_lazy",
            Strategy::Mod => "mod",
            Strategy::RecycleMult => "recycle_mult",
            Strategy::RecycleMod => "recycle_mod",
            Strategy::Delegated => "pcg32_boundedrand",
        }
    }

    /// Returns false only for [`Strategy::RecycleMod`].
    pub fn is_unbiased(self) -> bool {
        !matches!(self, Strategy::RecycleMod)
    }

    /// Returns true for the strategies that rotate rejected draws.
    pub fn recycles(self) -> bool {
        matches!(self, Strategy::RecycleMult | Strategy::RecycleMod)
    }

    /// The rejection test run by the shared loop, or `None` when delegated.
    fn rejection_test(self) -> Option<RejectionTest> {
        match self {
            Strategy::Mult | Strategy::RecycleMult => Some(RejectionTest::Mult),
            Strategy::MultLazy => Some(RejectionTest::MultLazy),
            Strategy::Mod | Strategy::RecycleMod => Some(RejectionTest::Mod),
            Strategy::Delegated => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RejectionTest {
    Mult,
    MultLazy,
    Mod,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = RangedRandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mult" => Ok(Strategy::Mult),
            "mult_lazy" => Ok(Strategy::MultLazy),
            "mod" => Ok(Strategy::Mod),
            "recycle_mult" => Ok(Strategy::RecycleMult),
            "recycle_mod" => Ok(Strategy::RecycleMod),
            "pcg32_boundedrand" | "pcg32" | "delegated" => Ok(Strategy::Delegated),
            other => Err(RangedRandError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Outcome of one bounded draw together with its entropy cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleReport {
    /// The accepted value, in `[0, range)`.
    pub value: u32,
    /// Fresh draws pulled from the engine.
    pub draws: u32,
    /// Rotations applied to rejected draws.
    pub rotations: u32,
}

/// Draws a value in `[0, range)` from `engine` using `strategy`.
///
/// # Errors
/// - [`RangedRandError::ZeroRange`] if `range == 0`; no draw is made.
/// - [`RangedRandError::UnboundedRetry`] if the engine keeps producing
///   rejected draws past [`MAX_FRESH_DRAWS`].
///
/// # Examples
///
/// ```
/// use rangedrand::{sample, MersenneTwister, Strategy};
///
/// let mut mt = MersenneTwister::with_seed(4357);
/// let die = sample(&mut mt, 6, Strategy::Mult).unwrap();
/// assert!(die < 6);
/// ```
pub fn sample<E>(engine: &mut E, range: u32, strategy: Strategy) -> Result<u32, RangedRandError>
where
    E: UniformEngine + ?Sized,
{
    sample_with_report(engine, range, strategy).map(|report| report.value)
}

/// Like [`sample`], but also reports how many draws and rotations were used.
pub fn sample_with_report<E>(
    engine: &mut E,
    range: u32,
    strategy: Strategy,
) -> Result<SampleReport, RangedRandError>
where
    E: UniformEngine + ?Sized,
{
    if range == 0 {
        return Err(RangedRandError::ZeroRange);
    }

    let mut metered = Metered { engine, draws: 0 };
    let Some(test) = strategy.rejection_test() else {
        return match pcg32::bounded_rand_within(&mut metered, range, MAX_FRESH_DRAWS) {
            Some(value) => Ok(SampleReport {
                value,
                draws: metered.draws,
                rotations: 0,
            }),
            None => {
                warn!(
                    "{} rejected {} consecutive draws for range {}",
                    strategy, metered.draws, range
                );
                Err(RangedRandError::UnboundedRetry {
                    draws: metered.draws,
                })
            }
        };
    };

    let mut threshold = match test {
        RejectionTest::Mult => Some(mult_threshold(range)),
        _ => None,
    };

    let mut draw = metered.next_u32();
    let mut consecutive = 0u32;
    let mut rotations = 0u32;
    loop {
        if let Some(value) = accept(test, draw, range, &mut threshold) {
            return Ok(SampleReport {
                value,
                draws: metered.draws,
                rotations,
            });
        }

        if strategy.recycles() && consecutive < MAX_ROTATIONS {
            draw = draw.rotate_right(1);
            consecutive += 1;
            rotations += 1;
            continue;
        }

        if metered.draws >= MAX_FRESH_DRAWS {
            warn!(
                "{} rejected {} consecutive draws for range {}",
                strategy, metered.draws, range
            );
            return Err(RangedRandError::UnboundedRetry {
                draws: metered.draws,
            });
        }
        consecutive = 0;
        draw = metered.next_u32();
    }
}

/// Applies a rejection test to `draw`.
///
/// Returns the candidate if it is accepted. `threshold` caches the
/// multiplicative threshold; `MultLazy` fills it on first need.
#[inline]
fn accept(test: RejectionTest, draw: u32, range: u32, threshold: &mut Option<u32>) -> Option<u32> {
    match test {
        RejectionTest::Mult => {
            let (candidate, leftover) = mul_hi_lo(draw, range);
            let limit = *threshold.get_or_insert_with(|| mult_threshold(range));
            (leftover <= limit).then_some(candidate)
        }
        RejectionTest::MultLazy => {
            let (candidate, leftover) = mul_hi_lo(draw, range);
            if leftover <= lazy_bound(range) {
                return Some(candidate);
            }
            let limit = *threshold.get_or_insert_with(|| mult_threshold(range));
            (leftover <= limit).then_some(candidate)
        }
        RejectionTest::Mod => {
            let candidate = draw % range;
            ((draw - candidate) as u64 <= mod_limit(range)).then_some(candidate)
        }
    }
}

/// Counts fresh draws taken from the wrapped engine.
struct Metered<'a, E: ?Sized> {
    engine: &'a mut E,
    draws: u32,
}

impl<E: UniformEngine + ?Sized> UniformEngine for Metered<'_, E> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.engine.next_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::mersenne_twister::MersenneTwister;
    use std::collections::VecDeque;

    /// Engine replaying a fixed list of draws; panics when exhausted.
    struct Scripted(VecDeque<u32>);

    impl Scripted {
        fn new(draws: &[u32]) -> Self {
            Scripted(draws.iter().copied().collect())
        }
    }

    impl UniformEngine for Scripted {
        fn next_u32(&mut self) -> u32 {
            self.0.pop_front().expect("scripted engine exhausted")
        }
    }

    struct Constant(u32);

    impl UniformEngine for Constant {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    /// Range with q = 1: almost half of all draws fall in the rejection tail.
    const WIDE_RANGE: u32 = 0x8000_0001;

    #[test]
    fn test_zero_range_fails_before_drawing() {
        for strategy in Strategy::ALL {
            let mut engine = Scripted::new(&[]);
            assert_eq!(
                sample(&mut engine, 0, strategy),
                Err(RangedRandError::ZeroRange),
                "strategy={}",
                strategy
            );
        }
    }

    #[test]
    fn test_range_one_single_draw() {
        let mut mt = MersenneTwister::with_seed(4357);
        for strategy in Strategy::ALL {
            for _ in 0..100 {
                let report = sample_with_report(&mut mt, 1, strategy).unwrap();
                assert_eq!(report.value, 0, "strategy={}", strategy);
                assert_eq!(report.draws, 1, "strategy={}", strategy);
                assert_eq!(report.rotations, 0, "strategy={}", strategy);
            }
        }
    }

    #[test]
    fn test_power_of_two_never_rejects() {
        let mut mt = MersenneTwister::with_seed(99);
        for strategy in Strategy::ALL {
            for shift in [1u32, 3, 16, 31] {
                let range = 1u32 << shift;
                for _ in 0..200 {
                    let report = sample_with_report(&mut mt, range, strategy).unwrap();
                    assert!(report.value < range);
                    assert_eq!(report.draws, 1, "strategy={} range={}", strategy, range);
                    assert_eq!(report.rotations, 0);
                }
            }
        }
    }

    #[test]
    fn test_mult_rejects_excess_tail() {
        // 0x2AAAAAAA * 6 leaves 0xFFFFFFFC, above the threshold 0xFFFFFFFB.
        let mut engine = Scripted::new(&[0x2AAA_AAAA, 0x8000_0000]);
        let report = sample_with_report(&mut engine, 6, Strategy::Mult).unwrap();
        assert_eq!(report.value, 3);
        assert_eq!(report.draws, 2);
    }

    #[test]
    fn test_mod_rejects_top_partial_block() {
        // 4294967292 = 6 * 715827882 starts the incomplete block.
        let mut engine = Scripted::new(&[4_294_967_292, 13]);
        let report = sample_with_report(&mut engine, 6, Strategy::Mod).unwrap();
        assert_eq!(report.value, 1);
        assert_eq!(report.draws, 2);

        let mut engine = Scripted::new(&[4_294_967_291]);
        let report = sample_with_report(&mut engine, 6, Strategy::Mod).unwrap();
        assert_eq!(report.value, 4_294_967_291 % 6);
        assert_eq!(report.draws, 1);
    }

    #[test]
    fn test_mult_lazy_accepts_between_bound_and_threshold() {
        // For range 7 the cheap bound is 0xFFFFFFF9 and the threshold is
        // 0xFFFFFFFB; both leftovers below sit in between.
        for (draw, expected) in [(0xB6DB_6DB6u32, 4u32), (0x6DB6_DB6D, 2)] {
            let mut engine = Scripted::new(&[draw]);
            let report = sample_with_report(&mut engine, 7, Strategy::MultLazy).unwrap();
            assert_eq!(report.value, expected);
            assert_eq!(report.draws, 1);
        }
    }

    #[test]
    fn test_mult_lazy_matches_mult() {
        let mut a = MersenneTwister::with_seed(2024);
        let mut b = MersenneTwister::with_seed(2024);
        for range in [3u32, 7, 1000, WIDE_RANGE, u32::MAX] {
            for _ in 0..500 {
                assert_eq!(
                    sample(&mut a, range, Strategy::Mult),
                    sample(&mut b, range, Strategy::MultLazy),
                    "range={}",
                    range
                );
            }
        }
    }

    #[test]
    fn test_recycle_mult_rotates_31_times_then_draws() {
        // Every rotation of 0x55555555 is rejected for WIDE_RANGE.
        let mut engine = Scripted::new(&[0x5555_5555, 0]);
        let report = sample_with_report(&mut engine, WIDE_RANGE, Strategy::RecycleMult).unwrap();
        assert_eq!(report.value, 0);
        assert_eq!(report.draws, 2);
        assert_eq!(report.rotations, MAX_ROTATIONS);
    }

    #[test]
    fn test_recycle_mult_resets_rotation_count_per_draw() {
        let mut engine = Scripted::new(&[0x5555_5555, 0xAAAA_AAAA, 2]);
        let report = sample_with_report(&mut engine, WIDE_RANGE, Strategy::RecycleMult).unwrap();
        assert_eq!(report.value, 1);
        assert_eq!(report.draws, 3);
        assert_eq!(report.rotations, 2 * MAX_ROTATIONS);
    }

    #[test]
    fn test_mult_does_not_rotate() {
        let mut engine = Scripted::new(&[0x5555_5555, 0]);
        let report = sample_with_report(&mut engine, WIDE_RANGE, Strategy::Mult).unwrap();
        assert_eq!(report.value, 0);
        assert_eq!(report.draws, 2);
        assert_eq!(report.rotations, 0);
    }

    #[test]
    fn test_recycle_mult_accepts_rotated_draw() {
        // 0x80000004 leaves 0x80000004 and is rejected; rotated once it
        // becomes 0x40000002, which leaves 0x40000002 and is accepted.
        let mut engine = Scripted::new(&[0x8000_0004]);
        let report = sample_with_report(&mut engine, WIDE_RANGE, Strategy::RecycleMult).unwrap();
        assert_eq!(report.draws, 1);
        assert_eq!(report.rotations, 1);
        assert_eq!(report.value, 0x2000_0001);
    }

    #[test]
    fn test_recycle_mod_rotation_cap() {
        // All ones is rejected under every rotation.
        let mut engine = Scripted::new(&[u32::MAX, 7]);
        let report = sample_with_report(&mut engine, WIDE_RANGE, Strategy::RecycleMod).unwrap();
        assert_eq!(report.value, 7);
        assert_eq!(report.draws, 2);
        assert_eq!(report.rotations, MAX_ROTATIONS);
    }

    #[test]
    fn test_degenerate_engine_reports_unbounded_retry() {
        for strategy in [Strategy::Mult, Strategy::MultLazy, Strategy::RecycleMult] {
            let mut engine = Constant(0x5555_5555);
            assert_eq!(
                sample(&mut engine, WIDE_RANGE, strategy),
                Err(RangedRandError::UnboundedRetry {
                    draws: MAX_FRESH_DRAWS
                }),
                "strategy={}",
                strategy
            );
        }
        for strategy in [Strategy::Mod, Strategy::RecycleMod] {
            let mut engine = Constant(u32::MAX);
            assert!(matches!(
                sample(&mut engine, WIDE_RANGE, strategy),
                Err(RangedRandError::UnboundedRetry { .. })
            ));
        }
        // PCG's threshold for range 3 is 1; a zero stream never clears it.
        let mut engine = Constant(0);
        assert_eq!(
            sample_with_report(&mut engine, 3, Strategy::Delegated),
            Err(RangedRandError::UnboundedRetry {
                draws: MAX_FRESH_DRAWS
            })
        );
    }

    #[test]
    fn test_delegated_gives_up_on_31_bit_engine_for_wide_range() {
        // The LCG never reaches the 0x7FFFFFFF threshold within the budget.
        let mut lcg = crate::random::lcg::Lcg::new();
        assert_eq!(
            sample(&mut lcg, WIDE_RANGE, Strategy::Delegated),
            Err(RangedRandError::UnboundedRetry {
                draws: MAX_FRESH_DRAWS
            })
        );
    }

    #[test]
    fn test_delegated_matches_pcg_bounded() {
        let mut a = crate::random::pcg32::Pcg32::with_seed(42, 54);
        let mut b = crate::random::pcg32::Pcg32::with_seed(42, 54);
        for range in [2u32, 6, 100, WIDE_RANGE] {
            for _ in 0..100 {
                assert_eq!(
                    sample(&mut a, range, Strategy::Delegated).unwrap(),
                    b.bounded_rand(range)
                );
            }
        }
    }

    #[test]
    fn test_delegated_counts_rejected_draws() {
        // Threshold for WIDE_RANGE is 0x7FFFFFFF; 5 is below it.
        let mut engine = Scripted::new(&[5, 0x9000_0000]);
        let report = sample_with_report(&mut engine, WIDE_RANGE, Strategy::Delegated).unwrap();
        assert_eq!(report.value, 0x9000_0000 - WIDE_RANGE);
        assert_eq!(report.draws, 2);
    }

    #[test]
    fn test_values_within_range_near_max() {
        let mut mt = MersenneTwister::with_seed(5);
        for strategy in Strategy::ALL {
            for range in [u32::MAX, u32::MAX - 1, WIDE_RANGE, 0x7FFF_FFFF] {
                for _ in 0..200 {
                    let v = sample(&mut mt, range, strategy).unwrap();
                    assert!(v < range, "strategy={} range={} v={}", strategy, range, v);
                }
            }
        }
    }

    #[test]
    fn test_strategy_names_parse_back() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
            assert_eq!(strategy.to_string(), strategy.name());
        }
        assert_eq!(
            "div".parse::<Strategy>(),
            Err(RangedRandError::UnknownStrategy("div".into()))
        );
    }

    #[test]
    fn test_only_recycle_mod_flagged_biased() {
        let biased: Vec<Strategy> = Strategy::ALL
            .into_iter()
            .filter(|s| !s.is_unbiased())
            .collect();
        assert_eq!(biased, vec![Strategy::RecycleMod]);
    }
}
