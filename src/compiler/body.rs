//! Generation of definition-body expressions: control flow and memory.

use std::fmt::Write;

use log::debug;

use crate::{
    ast::{
        ast::DefinitionExpression,
        expressions::{
            AddressAssignExpr, AddressReceiveExpr, BlockCopyExpr, ConditionalExpr, CountedLoopExpr,
            IndefiniteLoopExpr, VariableDeclExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    compiler::{Compiler, HEAP_REGISTER, LOOP_REGISTERS},
    environment::Binding,
    expr::{gen_binary, gen_integer, gen_symbol, gen_unary, pop, push},
    inline::label,
};

pub fn gen_definition_expression(
    compiler: &mut Compiler,
    expression: &DefinitionExpression,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match expression {
        DefinitionExpression::Integer(integer) => gen_integer(integer, out),
        DefinitionExpression::Symbol(symbol) => gen_symbol(compiler, symbol, out),
        DefinitionExpression::Binary(binary) => gen_binary(compiler, binary, out),
        DefinitionExpression::Unary(unary) => gen_unary(compiler, unary, out),
        DefinitionExpression::Conditional(conditional) => {
            gen_conditional(compiler, conditional, out)
        }
        DefinitionExpression::CountedLoop(counted) => gen_counted_loop(compiler, counted, out),
        DefinitionExpression::IndefiniteLoop(indefinite) => {
            gen_indefinite_loop(compiler, indefinite, out)
        }
        DefinitionExpression::VariableDecl(declaration) => gen_variable_decl(compiler, declaration),
        DefinitionExpression::AddressAssign(assign) => gen_address_assign(compiler, assign, out),
        DefinitionExpression::AddressReceive(receive) => {
            gen_address_receive(compiler, receive, out)
        }
        DefinitionExpression::BlockCopy(copy) => gen_block_copy(compiler, copy, out),
    }
}

// CONTROL FLOW

/// Pops the condition and runs the then-body unless it is zero.
pub fn gen_conditional(
    compiler: &mut Compiler,
    conditional: &ConditionalExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let then_body = compiler.gen_body(&conditional.then_body)?;
    let else_body = compiler.gen_body(&conditional.else_body)?;

    let n = compiler.labels.fresh();
    let else_label = label(n, "else");
    let end_label = label(n, "end");

    pop(out, "t0")?;
    writeln!(out, "beqz t0, {}", else_label)?;
    out.write_str(&then_body)?;
    writeln!(out, "j {}", end_label)?;
    writeln!(out, "{}:", else_label)?;
    out.write_str(&else_body)?;
    writeln!(out, "{}:", end_label)?;
    Ok(())
}

/// `limit index do ... loop`, with the index on top of the stack.
///
/// The index name is bound for the body only. The body runs before the
/// first test, then the index is incremented and the loop exits only once
/// it equals the limit. A start at or past the limit therefore never exits
/// until the index wraps around.
pub fn gen_counted_loop(
    compiler: &mut Compiler,
    counted: &CountedLoopExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let depth = compiler.environment.loop_depth();
    let Some(registers) = LOOP_REGISTERS.get(depth).copied() else {
        return Err(Error::new(
            ErrorImpl::LoopNestingTooDeep { limit: LOOP_REGISTERS.len() },
            counted.span.start.clone(),
        ));
    };

    let mut index_push = String::new();
    push(&mut index_push, registers.index)?;

    compiler
        .environment
        .push_frame(registers.name, Binding::word(index_push));
    compiler.reach_loop_depth(depth + 1);

    let body = compiler.gen_body(&counted.body);
    compiler.environment.pop_frame();
    let body = body?;

    let top = label(compiler.labels.fresh(), "");

    pop(out, registers.index)?;
    pop(out, registers.limit)?;
    writeln!(out, "{}:", top)?;
    out.write_str(&body)?;
    writeln!(out, "addi {}, {}, 0x1", registers.index, registers.index)?;
    writeln!(out, "bne {}, {}, {}", registers.limit, registers.index, top)?;
    Ok(())
}

/// `begin ... until`, repeats while the flag left by the body is zero.
pub fn gen_indefinite_loop(
    compiler: &mut Compiler,
    indefinite: &IndefiniteLoopExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let body = compiler.gen_body(&indefinite.body)?;
    let top = label(compiler.labels.fresh(), "");

    writeln!(out, "{}:", top)?;
    out.write_str(&body)?;
    pop(out, "t0")?;
    writeln!(out, "beqz t0, {}", top)?;
    Ok(())
}

// MEMORY

/// Binds `name` to the next heap cell. Nothing is emitted here.
pub fn gen_variable_decl(
    compiler: &mut Compiler,
    declaration: &VariableDeclExpr,
) -> Result<(), Error> {
    let offset = compiler.heap_offset;

    let mut accessor = String::new();
    writeln!(accessor, "li t0, 0x{:x}", offset)?;
    writeln!(accessor, "add t0, {}, t0", HEAP_REGISTER)?;
    push(&mut accessor, "t0")?;

    compiler
        .environment
        .define(declaration.name.clone(), Binding::Variable { offset, accessor });
    compiler.heap_offset += 4;

    debug!("declared variable `{}` at heap offset {}", declaration.name, offset);
    Ok(())
}

fn variable_accessor(
    compiler: &Compiler,
    name: &str,
    position: &Position,
) -> Result<String, Error> {
    match compiler.environment.get(name) {
        Some(Binding::Variable { accessor, .. }) => Ok(accessor.clone()),
        _ => Err(Error::new(
            ErrorImpl::UndefinedVariable { variable: name.to_string() },
            position.clone(),
        )),
    }
}

/// `name @`: pushes the value stored in the variable.
pub fn gen_address_receive(
    compiler: &mut Compiler,
    receive: &AddressReceiveExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let accessor = variable_accessor(compiler, &receive.name, &receive.span.start)?;

    out.write_str(&accessor)?;
    pop(out, "t0")?;
    writeln!(out, "lw t0, 0(t0)")?;
    push(out, "t0")
}

/// `value name !`: stores the value below the address into the variable.
pub fn gen_address_assign(
    compiler: &mut Compiler,
    assign: &AddressAssignExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let accessor = variable_accessor(compiler, &assign.name, &assign.span.start)?;

    out.write_str(&accessor)?;
    pop(out, "t0")?;
    pop(out, "t1")?;
    writeln!(out, "sw t1, 0(t0)")?;
    Ok(())
}

/// `source destination count cmove`, with the count on top.
///
/// Copies `count` cells one at a time. A count of zero or less copies
/// nothing.
pub fn gen_block_copy(
    compiler: &mut Compiler,
    _copy: &BlockCopyExpr,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let n = compiler.labels.fresh();
    let top = label(n, "");
    let end = label(n, "end");

    pop(out, "t0")?;
    pop(out, "t1")?;
    pop(out, "t2")?;
    writeln!(out, "blez t0, {}", end)?;
    writeln!(out, "{}:", top)?;
    writeln!(out, "lw a0, 0(t2)")?;
    writeln!(out, "sw a0, 0(t1)")?;
    writeln!(out, "addi t0, t0, -0x1")?;
    writeln!(out, "addi t1, t1, 0x4")?;
    writeln!(out, "addi t2, t2, 0x4")?;
    writeln!(out, "bgtz t0, {}", top)?;
    writeln!(out, "{}:", end)?;
    Ok(())
}
