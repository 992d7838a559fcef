//! Built-in stack words.
//!
//! These are bound before any user code is generated and are inlined like
//! any other word, so a user definition of the same name replaces them.

use std::collections::HashMap;

use super::environment::Binding;

/// ( a -- a a )
pub const DUP: &str = "addi sp, sp, -0x4
lw t0, 0(sp)
addi sp, sp, 0x4
sw t0, 0(sp)
addi sp, sp, 0x4
";

/// ( a b -- b a )
pub const SWAP: &str = "addi sp, sp, -0x4
lw t0, 0(sp)
addi sp, sp, -0x4
lw t1, 0(sp)
sw t0, 0(sp)
addi sp, sp, 0x4
sw t1, 0(sp)
addi sp, sp, 0x4
";

/// ( a -- )
pub const DROP: &str = "addi sp, sp, -0x4
";

pub fn builtin_words() -> HashMap<String, Binding> {
    let mut words = HashMap::new();
    words.insert(String::from("dup"), Binding::word(DUP));
    words.insert(String::from("swap"), Binding::word(SWAP));
    words.insert(String::from("drop"), Binding::word(DROP));
    words
}
