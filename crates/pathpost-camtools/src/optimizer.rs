//! G-Code line optimizer
//!
//! Removes redundant laser-off and positioning-mode lines from generated
//! output. Opt-in: the generator only runs it when asked to.

/// G-code optimization strategies
#[derive(Debug)]
pub struct GCodeOptimizer;

impl GCodeOptimizer {
    /// Remove consecutive duplicate M5 commands
    pub fn remove_redundant_m5(lines: &[String]) -> Vec<String> {
        let mut result = Vec::with_capacity(lines.len());
        let mut last_was_m5 = false;

        for line in lines {
            let is_m5 = line.trim() == "M5";
            if !(is_m5 && last_was_m5) {
                result.push(line.clone());
            }
            last_was_m5 = is_m5;
        }

        result
    }

    /// Remove a `G90`/`G91` line that repeats the mode already in effect
    /// from the line directly before it
    pub fn remove_redundant_positioning(lines: &[String]) -> Vec<String> {
        let mut result: Vec<String> = Vec::with_capacity(lines.len());

        for line in lines {
            let trimmed = line.trim();
            if matches!(trimmed, "G90" | "G91")
                && result.last().is_some_and(|prev| prev.trim() == trimmed)
            {
                continue;
            }
            result.push(line.clone());
        }

        result
    }

    /// Optimize G-code
    pub fn optimize(lines: &[String]) -> Vec<String> {
        let optimized = Self::remove_redundant_m5(lines);
        Self::remove_redundant_positioning(&optimized)
    }
}
