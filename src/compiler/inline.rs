//! Label allocation and the rewrites applied when a stored word is inlined.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::compiler::LOOP_REGISTERS;

lazy_static! {
    static ref LABEL: Regex = Regex::new(r"\.L(\d+)").unwrap();
    static ref LOOP_REGISTER: Regex = Regex::new(r"\bt([3-6])\b").unwrap();
}

/// Hands out label numbers, never the same one twice.
#[derive(Debug, Default, Clone)]
pub struct LabelAllocator {
    next: usize,
}

impl LabelAllocator {
    pub fn new() -> Self {
        LabelAllocator { next: 0 }
    }

    /// Returns a label number not handed out before.
    pub fn fresh(&mut self) -> usize {
        let label = self.next;
        self.next += 1;
        label
    }

    /// How many labels have been handed out so far.
    pub fn allocated(&self) -> usize {
        self.next
    }
}

/// Formats label `n` with an optional suffix, e.g. `.L4_else`.
pub fn label(n: usize, suffix: &str) -> String {
    if suffix.is_empty() {
        format!(".L{}", n)
    } else {
        format!(".L{}_{}", n, suffix)
    }
}

/// Renumbers every `.L<n>` label in `text` to fresh numbers.
///
/// Occurrences of the same old number map to the same new number, so a
/// branch and its target stay paired.
pub fn relabel(text: &str, labels: &mut LabelAllocator) -> String {
    let mut renamed: HashMap<String, usize> = HashMap::new();

    LABEL
        .replace_all(text, |captures: &Captures| {
            let new = *renamed
                .entry(captures[1].to_string())
                .or_insert_with(|| labels.fresh());
            format!(".L{}", new)
        })
        .into_owned()
}

/// Moves the loop registers in `text` `shift` pairs inward.
///
/// Text generated at loop depth zero uses pairs from the outermost one up;
/// inlined inside `shift` active loops it has to use the pairs after them.
/// The caller guarantees the shifted pairs exist.
pub fn rebase_loop_registers(text: &str, shift: usize) -> String {
    if shift == 0 {
        return text.to_string();
    }

    LOOP_REGISTER
        .replace_all(text, |captures: &Captures| {
            let register = &captures[0];
            LOOP_REGISTERS
                .iter()
                .position(|pair| pair.index == register || pair.limit == register)
                .and_then(|level| {
                    let target = LOOP_REGISTERS.get(level + shift)?;
                    Some(if LOOP_REGISTERS[level].index == register {
                        target.index.to_string()
                    } else {
                        target.limit.to_string()
                    })
                })
                .unwrap_or_else(|| register.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_labels_are_unique() {
        let mut labels = LabelAllocator::new();
        let first = labels.fresh();
        let second = labels.fresh();
        assert_ne!(first, second);
    }

    #[test]
    fn test_label_formatting() {
        assert_eq!(label(3, ""), ".L3");
        assert_eq!(label(3, "else"), ".L3_else");
    }

    #[test]
    fn test_relabel_keeps_pairs_together() {
        let mut labels = LabelAllocator::new();
        for _ in 0..10 {
            labels.fresh();
        }

        let text = "beqz t0, .L2_else\nj .L2_end\n.L2_else:\n.L2_end:\nbne t5, t6, .L12\n";
        let relabelled = relabel(text, &mut labels);

        assert_eq!(
            relabelled,
            "beqz t0, .L10_else\nj .L10_end\n.L10_else:\n.L10_end:\nbne t5, t6, .L11\n"
        );
    }

    #[test]
    fn test_relabel_twice_never_collides() {
        let mut labels = LabelAllocator::new();
        let text = ".L0:\nj .L0\n";
        assert_ne!(relabel(text, &mut labels), relabel(text, &mut labels));
    }

    #[test]
    fn test_rebase_loop_registers() {
        let text = "lw t6, 0(sp)\nlw t5, 0(sp)\nbne t5, t6, .L0\nadd t0, t1, t2\n";
        assert_eq!(
            rebase_loop_registers(text, 1),
            "lw t4, 0(sp)\nlw t3, 0(sp)\nbne t3, t4, .L0\nadd t0, t1, t2\n"
        );
        assert_eq!(rebase_loop_registers(text, 0), text);
    }
}
