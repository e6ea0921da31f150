//! 占位评分
//!
//! 分数只是固定区间内的随机数，不是真正的评估。

use rand::Rng;
use rand::rngs::ThreadRng;

/// 闭区间分数段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    pub min: u8,
    pub max: u8,
}

impl ScoreBand {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    #[cfg(test)]
    pub fn contains(&self, score: u8) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

pub const OVERALL_BAND: ScoreBand = ScoreBand::new(70, 95);
pub const TECHNICAL_BAND: ScoreBand = ScoreBand::new(65, 95);
pub const COMMUNICATION_BAND: ScoreBand = ScoreBand::new(75, 95);
pub const PROBLEM_SOLVING_BAND: ScoreBand = ScoreBand::new(70, 95);

pub const FEEDBACKS: [&str; 5] = [
    "Good answer! You covered the key points well.",
    "Nice explanation! Consider adding more specific examples.",
    "Solid response! You could elaborate on the implementation details.",
    "Well structured answer! The technical depth is appropriate.",
    "Great insight! Your practical experience shows through.",
];

pub const STRENGTHS: [&str; 3] = [
    "Clear communication",
    "Good technical knowledge",
    "Structured thinking",
];

pub const IMPROVEMENTS: [&str; 3] = [
    "Add more examples",
    "Consider edge cases",
    "Elaborate on solutions",
];

/// 分数与反馈的来源，测试中可替换为确定性的实现
pub trait Scorer {
    /// 在分数段内取一个分数
    fn score(&mut self, band: ScoreBand) -> u8;

    /// 在 `[0, len)` 中选一个反馈下标，`len` 必须大于 0
    fn pick(&mut self, len: usize) -> usize;
}

/// 均匀随机评分
pub struct RandomScorer {
    rng: ThreadRng,
}

impl RandomScorer {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for RandomScorer {
    fn score(&mut self, band: ScoreBand) -> u8 {
        self.rng.gen_range(band.min..=band.max)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// 取一条随机反馈
pub fn pick_feedback(scorer: &mut dyn Scorer) -> &'static str {
    let index = scorer.pick(FEEDBACKS.len()).min(FEEDBACKS.len() - 1);
    FEEDBACKS[index]
}
