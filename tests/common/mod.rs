//! A small interpreter for the RISC-V subset the compiler emits.
//!
//! Good enough to run generated programs and read the operand stack back.

#![allow(dead_code)]

use std::collections::HashMap;

use forthc::{compile, compiler::compiler::CompilerOptions, errors::errors::Error};

const STEP_LIMIT: usize = 1_000_000;

#[derive(Debug, Clone)]
enum Line {
    Label(String),
    Instruction(String, Vec<String>),
}

#[derive(Debug)]
pub struct Machine {
    registers: HashMap<String, i32>,
    memory: HashMap<u32, i32>,
    stack_base: u32,
}

impl Machine {
    pub fn register(&self, name: &str) -> i32 {
        if name == "zero" {
            return 0;
        }
        *self.registers.get(name).unwrap_or(&0)
    }

    fn set(&mut self, name: &str, value: i32) {
        assert!(is_register(name), "unknown register `{}`", name);
        if name != "zero" {
            self.registers.insert(name.to_string(), value);
        }
    }

    pub fn load(&self, address: u32) -> i32 {
        assert_eq!(address % 4, 0, "misaligned load at {:#x}", address);
        *self.memory.get(&address).unwrap_or(&0)
    }

    fn store(&mut self, address: u32, value: i32) {
        assert_eq!(address % 4, 0, "misaligned store at {:#x}", address);
        self.memory.insert(address, value);
    }

    /// Cells between the stack base and `sp`, bottom first.
    pub fn stack(&self) -> Vec<i32> {
        let sp = self.register("sp") as u32;
        assert!(sp >= self.stack_base, "stack underflow, sp = {:#x}", sp);
        (self.stack_base..sp).step_by(4).map(|address| self.load(address)).collect()
    }

    fn memory_operand(&self, operand: &str) -> u32 {
        let (offset, rest) = operand.split_once('(').expect("memory operand");
        let base = rest.trim_end_matches(')');
        (self.register(base) as u32).wrapping_add(parse_immediate(offset) as u32)
    }
}

fn is_register(name: &str) -> bool {
    matches!(
        name,
        "zero" | "sp" | "s0" | "a0" | "t0" | "t1" | "t2" | "t3" | "t4" | "t5" | "t6"
    )
}

fn parse_immediate(text: &str) -> i32 {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let magnitude = match digits.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => digits.parse::<i64>(),
    }
    .unwrap_or_else(|_| panic!("bad immediate `{}`", text));

    let value = if negative { -magnitude } else { magnitude };
    value as i32
}

fn parse_lines(assembly: &str) -> Vec<Line> {
    assembly
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if let Some(label) = line.strip_suffix(':') {
                return Line::Label(label.to_string());
            }

            let (op, operands) = line.split_once(' ').unwrap_or((line, ""));
            let operands = operands
                .split(',')
                .map(str::trim)
                .filter(|operand| !operand.is_empty())
                .map(String::from)
                .collect();
            Line::Instruction(op.to_string(), operands)
        })
        .collect()
}

/// Executes `assembly` from its first line until it runs off the end.
pub fn run(assembly: &str, options: CompilerOptions) -> Machine {
    let lines = parse_lines(assembly);

    let mut labels = HashMap::new();
    for (index, line) in lines.iter().enumerate() {
        if let Line::Label(name) = line {
            assert!(labels.insert(name.clone(), index).is_none(), "duplicate label `{}`", name);
        }
    }

    let mut machine = Machine {
        registers: HashMap::new(),
        memory: HashMap::new(),
        stack_base: options.stack_base,
    };

    let target = |name: &String| -> usize {
        *labels.get(name).unwrap_or_else(|| panic!("undefined label `{}`", name))
    };

    let mut pc = 0;
    let mut steps = 0;

    while pc < lines.len() {
        steps += 1;
        assert!(steps < STEP_LIMIT, "program did not terminate");

        let Line::Instruction(op, args) = &lines[pc] else {
            pc += 1;
            continue;
        };
        pc += 1;

        let reg = |i: usize| machine.register(&args[i]);

        match op.as_str() {
            "li" => {
                let value = parse_immediate(&args[1]);
                machine.set(&args[0], value);
            }
            "addi" => {
                let value = reg(1).wrapping_add(parse_immediate(&args[2]));
                machine.set(&args[0], value);
            }
            "add" => {
                let value = reg(1).wrapping_add(reg(2));
                machine.set(&args[0], value);
            }
            "sub" => {
                let value = reg(1).wrapping_sub(reg(2));
                machine.set(&args[0], value);
            }
            "mul" => {
                let value = reg(1).wrapping_mul(reg(2));
                machine.set(&args[0], value);
            }
            "div" => {
                let value = if reg(2) == 0 { -1 } else { reg(1).wrapping_div(reg(2)) };
                machine.set(&args[0], value);
            }
            "slt" => {
                let value = (reg(1) < reg(2)) as i32;
                machine.set(&args[0], value);
            }
            "neg" => {
                let value = reg(1).wrapping_neg();
                machine.set(&args[0], value);
            }
            "lw" => {
                let value = machine.load(machine.memory_operand(&args[1]));
                machine.set(&args[0], value);
            }
            "sw" => {
                let address = machine.memory_operand(&args[1]);
                let value = reg(0);
                machine.store(address, value);
            }
            "j" => pc = target(&args[0]),
            "beq" if reg(0) == reg(1) => pc = target(&args[2]),
            "bne" if reg(0) != reg(1) => pc = target(&args[2]),
            "beqz" if reg(0) == 0 => pc = target(&args[1]),
            "bnez" if reg(0) != 0 => pc = target(&args[1]),
            "blez" if reg(0) <= 0 => pc = target(&args[1]),
            "bgtz" if reg(0) > 0 => pc = target(&args[1]),
            "beq" | "bne" | "beqz" | "bnez" | "blez" | "bgtz" => {}
            _ => panic!("unsupported instruction `{}`", op),
        }
    }

    machine
}

pub fn compile_source(source: &str) -> Result<String, Error> {
    compile(source, Some("test.fth".to_string()), CompilerOptions::default())
}

/// Compiles and runs `source`, returning the final machine.
pub fn execute(source: &str) -> Machine {
    let assembly = compile_source(source).unwrap_or_else(|error| panic!("{}: {:?}", source, error));
    run(&assembly, CompilerOptions::default())
}

/// Compiles and runs `source`, returning the operand stack.
pub fn stack_after(source: &str) -> Vec<i32> {
    execute(source).stack()
}
