use std::fmt::Write;

use crate::{
    ast::{
        ast::Expression,
        expressions::{
            BinaryExpr, BinaryOperator, IntegerExpr, SymbolExpr, UnaryExpr, UnaryOperator,
        },
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::{gen_word_definition, Compiler, LOOP_REGISTERS},
    environment::Binding,
    inline::{label, rebase_loop_registers, relabel},
};

/// Writes the pop of the top of stack into `register`.
pub fn pop(out: &mut dyn Write, register: &str) -> Result<(), Error> {
    writeln!(out, "addi sp, sp, -0x4")?;
    writeln!(out, "lw {}, 0(sp)", register)?;
    Ok(())
}

/// Writes the push of `register` onto the stack.
pub fn push(out: &mut dyn Write, register: &str) -> Result<(), Error> {
    writeln!(out, "sw {}, 0(sp)", register)?;
    writeln!(out, "addi sp, sp, 0x4")?;
    Ok(())
}

/// Generates one top-level expression.
pub fn gen_expression(
    compiler: &mut Compiler,
    expression: &Expression,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match expression {
        Expression::Integer(integer) => gen_integer(integer, out),
        Expression::Symbol(symbol) => gen_symbol(compiler, symbol, out),
        Expression::Binary(binary) => gen_binary(compiler, binary, out),
        Expression::Unary(unary) => gen_unary(compiler, unary, out),
        Expression::WordDefinition(definition) => gen_word_definition(compiler, definition),
    }
}

pub fn gen_integer(integer: &IntegerExpr, out: &mut dyn Write) -> Result<(), Error> {
    if integer.value < 0 {
        writeln!(out, "li t0, -0x{:x}", integer.value.unsigned_abs())?;
    } else {
        writeln!(out, "li t0, 0x{:x}", integer.value)?;
    }
    push(out, "t0")
}

/// Pops the right operand into `t2`, the left into `t1`, and pushes `t0`.
///
/// Comparisons and `and`/`or` first compute 0 or 1, then negate it so true
/// is all bits set.
pub fn gen_binary(
    compiler: &mut Compiler,
    binary: &BinaryExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    pop(out, "t2")?;
    pop(out, "t1")?;

    let skip = match binary.operator {
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Less
        | BinaryOperator::Greater => String::new(),
        _ => label(compiler.labels.fresh(), ""),
    };

    match binary.operator {
        BinaryOperator::Add => writeln!(out, "add t0, t1, t2")?,
        BinaryOperator::Subtract => writeln!(out, "sub t0, t1, t2")?,
        BinaryOperator::Multiply => writeln!(out, "mul t0, t1, t2")?,
        BinaryOperator::Divide => writeln!(out, "div t0, t1, t2")?,
        BinaryOperator::Less => writeln!(out, "slt t0, t1, t2")?,
        BinaryOperator::Greater => writeln!(out, "slt t0, t2, t1")?,
        BinaryOperator::LessEquals => {
            writeln!(out, "li t0, 1")?;
            writeln!(out, "beq t1, t2, {}", skip)?;
            writeln!(out, "slt t0, t1, t2")?;
            writeln!(out, "{}:", skip)?;
        }
        BinaryOperator::GreaterEquals => {
            writeln!(out, "li t0, 1")?;
            writeln!(out, "beq t1, t2, {}", skip)?;
            writeln!(out, "slt t0, t2, t1")?;
            writeln!(out, "{}:", skip)?;
        }
        BinaryOperator::Equals => {
            writeln!(out, "li t0, 1")?;
            writeln!(out, "beq t1, t2, {}", skip)?;
            writeln!(out, "li t0, 0")?;
            writeln!(out, "{}:", skip)?;
        }
        BinaryOperator::NotEquals => {
            writeln!(out, "li t0, 1")?;
            writeln!(out, "bne t1, t2, {}", skip)?;
            writeln!(out, "li t0, 0")?;
            writeln!(out, "{}:", skip)?;
        }
        BinaryOperator::And => {
            writeln!(out, "li t0, 0")?;
            writeln!(out, "beqz t1, {}", skip)?;
            writeln!(out, "beqz t2, {}", skip)?;
            writeln!(out, "li t0, 1")?;
            writeln!(out, "{}:", skip)?;
        }
        BinaryOperator::Or => {
            writeln!(out, "li t0, 1")?;
            writeln!(out, "bnez t1, {}", skip)?;
            writeln!(out, "bnez t2, {}", skip)?;
            writeln!(out, "li t0, 0")?;
            writeln!(out, "{}:", skip)?;
        }
    }

    if binary.operator.is_boolean() {
        writeln!(out, "neg t0, t0")?;
    }
    push(out, "t0")
}

pub fn gen_unary(
    compiler: &mut Compiler,
    unary: &UnaryExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    pop(out, "t1")?;

    match unary.operator {
        UnaryOperator::Invert => {
            let skip = label(compiler.labels.fresh(), "");
            writeln!(out, "li t0, 1")?;
            writeln!(out, "beqz t1, {}", skip)?;
            writeln!(out, "li t0, 0")?;
            writeln!(out, "{}:", skip)?;
            writeln!(out, "neg t0, t0")?;
        }
    }

    push(out, "t0")
}

/// Re-emits whatever `symbol` is bound to.
///
/// Word text gets fresh labels at every reference, and its loop registers
/// are moved past any loops already active here.
pub fn gen_symbol(
    compiler: &mut Compiler,
    symbol: &SymbolExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let binding = compiler.environment.get(&symbol.name).cloned().ok_or_else(|| {
        Error::new(
            ErrorImpl::UndefinedSymbol { symbol: symbol.name.clone() },
            symbol.span.start.clone(),
        )
    })?;

    match binding {
        Binding::Word { text, loop_levels } => {
            let depth = compiler.environment.loop_depth();

            if loop_levels > 0 {
                if depth + loop_levels > LOOP_REGISTERS.len() {
                    return Err(Error::new(
                        ErrorImpl::LoopNestingTooDeep { limit: LOOP_REGISTERS.len() },
                        symbol.span.start.clone(),
                    ));
                }
                compiler.reach_loop_depth(depth + loop_levels);
            }

            let text = if loop_levels > 0 {
                rebase_loop_registers(&text, depth)
            } else {
                text
            };
            out.write_str(&relabel(&text, &mut compiler.labels))?;
        }
        Binding::Variable { accessor, .. } => out.write_str(&accessor)?,
    }

    Ok(())
}
