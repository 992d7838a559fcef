//! Main compiler module.
//!
//! Holds the `Compiler` state for one compilation and drives generation
//! from a parsed `Program` to RISC-V assembly text.
//!
//! Every generated block follows the same stack discipline: operands are
//! popped by decrementing `sp` and loading, results are pushed by storing
//! and incrementing `sp`. Any two blocks can therefore follow each other.

use std::fmt::Write;

use log::{debug, trace};

use crate::{
    ast::{
        ast::{DefinitionExpression, Program},
        expressions::WordDefinitionExpr,
    },
    errors::errors::Error,
};

use super::{
    body::gen_definition_expression,
    environment::{Binding, Environment},
    expr::gen_expression,
    inline::LabelAllocator,
};

/// Register holding the heap base for the whole program.
pub const HEAP_REGISTER: &str = "s0";

/// Registers dedicated to one level of counted loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopRegisters {
    /// Name the loop index is visible as inside the body
    pub name: &'static str,
    pub index: &'static str,
    pub limit: &'static str,
}

/// Outermost loop first. Its length is the nesting limit.
pub const LOOP_REGISTERS: [LoopRegisters; 2] = [
    LoopRegisters { name: "i", index: "t6", limit: "t5" },
    LoopRegisters { name: "j", index: "t4", limit: "t3" },
];

/// Memory layout of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Address the operand stack starts at, growing upward
    pub stack_base: u32,
    /// Address the first declared variable lives at
    pub heap_base: u32,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            stack_base: 0x10010000,
            heap_base: 0x10040000,
        }
    }
}

/// The compiler state for a single program.
///
/// A compiler is consumed by `compile_program`; each program gets a fresh
/// one, so bindings and labels never leak between compilations.
pub struct Compiler {
    pub options: CompilerOptions,
    /// Words, variables and active loop indices
    pub environment: Environment,
    /// Source of label numbers, unique across the whole output
    pub labels: LabelAllocator,
    /// Byte offset from the heap base of the next declared variable
    pub heap_offset: u32,
    /// Deepest loop nesting reached while generating the current definition
    pub deepest_loop: usize,
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        Compiler {
            options,
            environment: Environment::new(),
            labels: LabelAllocator::new(),
            heap_offset: 0,
            deepest_loop: 0,
        }
    }

    /// Sets up `sp` and the heap base, then jumps to the program body.
    pub fn preamble(&self) -> String {
        format!(
            "j .init\n.init:\nli sp, 0x{:x}\nli {}, 0x{:x}\nj .main\n\n.main:\n",
            self.options.stack_base, HEAP_REGISTER, self.options.heap_base
        )
    }

    /// Writes the preamble and then every top-level expression to `out`.
    ///
    /// Stops at the first error. Whatever was written to `out` by then is
    /// incomplete and should be discarded.
    pub fn compile_program(mut self, program: &Program, out: &mut dyn Write) -> Result<(), Error> {
        out.write_str(&self.preamble())?;

        for expression in &program.expressions {
            trace!("generating {:?}", expression.get_span().start);
            gen_expression(&mut self, expression, out)?;
        }

        debug!(
            "compiled {} expressions, {} labels, {} heap bytes",
            program.expressions.len(),
            self.labels.allocated(),
            self.heap_offset
        );
        Ok(())
    }

    /// Generates `body` into its own buffer.
    pub fn gen_body(&mut self, body: &[DefinitionExpression]) -> Result<String, Error> {
        let mut buffer = String::new();
        for expression in body {
            gen_definition_expression(self, expression, &mut buffer)?;
        }
        Ok(buffer)
    }

    /// Records that generation has reached `depth` nested loops.
    pub fn reach_loop_depth(&mut self, depth: usize) {
        self.deepest_loop = self.deepest_loop.max(depth);
    }
}

/// Generates a definition body and binds the text to its name.
///
/// The name is bound only after the body is complete, so a word can never
/// refer to itself. Nothing is written at the definition site.
pub fn gen_word_definition(
    compiler: &mut Compiler,
    definition: &WordDefinitionExpr,
) -> Result<(), Error> {
    let outer_deepest = std::mem::replace(&mut compiler.deepest_loop, 0);
    let depth_before = compiler.environment.loop_depth();

    let body = compiler.gen_body(&definition.body);

    let loop_levels = compiler.deepest_loop.saturating_sub(depth_before);
    compiler.deepest_loop = outer_deepest;
    let text = body?;

    debug!(
        "defined word `{}` ({} bytes, {} loop levels)",
        definition.name,
        text.len(),
        loop_levels
    );

    compiler
        .environment
        .define(definition.name.clone(), Binding::Word { text, loop_levels });
    Ok(())
}
