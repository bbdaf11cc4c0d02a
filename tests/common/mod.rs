use std::collections::VecDeque;
use title_lab::Randomness;

/// Replays a fixed list of draws; exhausted scripts fall back to the low end.
pub struct ScriptedRandom {
    values: VecDeque<i64>,
}

impl ScriptedRandom {
    pub fn new(values: &[i64]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }
}

impl Randomness for ScriptedRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        let value = self.values.pop_front().unwrap_or(0).max(0) as usize;
        value % len.max(1)
    }

    fn int_in_range(&mut self, low: i64, high: i64) -> i64 {
        self.values.pop_front().unwrap_or(low).clamp(low, high.max(low))
    }
}
