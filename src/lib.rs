#![allow(clippy::module_inception)]

use std::rc::Rc;

use log::debug;

use crate::{
    compiler::compiler::{Compiler, CompilerOptions},
    errors::errors::{Error, ErrorTip},
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the whole pipeline over `source` and returns the generated assembly.
///
/// The output is built in memory, so on error nothing partial escapes.
pub fn compile(
    source: &str,
    file: Option<String>,
    options: CompilerOptions,
) -> Result<String, Error> {
    let file_name = Rc::new(file.clone().unwrap_or_else(|| String::from("shell")));

    let tokens = lexer::lexer::tokenize(source.to_string(), file)?;
    debug!("tokenized {} tokens", tokens.len());

    let program = parser::parser::parse(tokens, file_name)?;
    debug!("parsed {} top-level expressions", program.expressions.len());

    let mut output = String::new();
    Compiler::new(options).compile_program(&program, &mut output)?;
    debug!("generated {} bytes of assembly", output.len());

    Ok(output)
}

/// Finds the line holding byte offset `position`.
///
/// Returns the 1-based line number, the line's text and the offset within it.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // End of input, point just past the last character
    if pos == content.len() {
        let last = content.split_inclusive('\n').last().unwrap_or("");
        let line_number = content.split_inclusive('\n').count().max(1);
        return Some((line_number, last.to_string(), last.trim_end_matches('\n').len()));
    }

    None
}


/// Renders an error against its source as a caret diagnostic.
pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: message
        -> main.fth
           |
        20 | : w if 1 ;
           | ---------^
    */

    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
