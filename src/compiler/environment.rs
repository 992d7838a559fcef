//! The word environment: what each name expands to at a reference site.

use std::collections::HashMap;

use super::stdlib::builtin_words;

/// What a name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Generated instructions, inlined at every reference.
    ///
    /// `loop_levels` is how many counted-loop register pairs the text uses,
    /// always counted from the outermost pair.
    Word { text: String, loop_levels: usize },
    /// A heap cell, referenced through an accessor that pushes its address.
    Variable { offset: u32, accessor: String },
}

impl Binding {
    pub fn word(text: impl Into<String>) -> Self {
        Binding::Word { text: text.into(), loop_levels: 0 }
    }
}

/// Name bindings for one compilation.
///
/// Permanent bindings come from definitions and declarations, in program
/// order. Loop indices live in a stack of frames layered on top, pushed
/// right before a loop body is generated and popped right after.
#[derive(Debug, Clone)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
    frames: Vec<(String, Binding)>,
}

impl Environment {
    /// An environment holding only the built-in words.
    pub fn new() -> Self {
        Environment {
            bindings: builtin_words(),
            frames: vec![],
        }
    }

    /// Looks `name` up, innermost frame first.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.frames
            .iter()
            .rev()
            .find(|(frame_name, _)| frame_name == name)
            .map(|(_, binding)| binding)
            .or_else(|| self.bindings.get(name))
    }

    /// Binds `name`, replacing whatever it was bound to before.
    pub fn define(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn push_frame(&mut self, name: impl Into<String>, binding: Binding) {
        self.frames.push((name.into(), binding));
    }

    pub fn pop_frame(&mut self) -> Option<(String, Binding)> {
        self.frames.pop()
    }

    /// Number of loop frames currently active.
    pub fn loop_depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
