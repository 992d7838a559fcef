//! Integration tests for end-to-end compilation.
//!
//! Programs are compiled with the public `compile` entry point and the
//! resulting assembly is executed by the interpreter in `common`, so these
//! check what the generated code does rather than how it is spelled.

mod common;

use common::{compile_source, run, stack_after};
use forthc::{compile, compiler::compiler::CompilerOptions, errors::errors::ErrorKind, format_error};

const TRUE: i32 = -1;
const FALSE: i32 = 0;

#[test]
fn test_empty_program() {
    assert_eq!(stack_after(""), Vec::<i32>::new());
    assert_eq!(stack_after("\\ nothing but a comment\n"), Vec::<i32>::new());
}

#[test]
fn test_literals() {
    assert_eq!(stack_after("1 2 3"), vec![1, 2, 3]);
    assert_eq!(stack_after("-5 0 2147483647"), vec![-5, 0, i32::MAX]);
    assert_eq!(stack_after("-2147483648"), vec![i32::MIN]);
}

#[test]
fn test_addition() {
    assert_eq!(stack_after("5 10 +"), vec![15]);
}

#[test]
fn test_arithmetic() {
    assert_eq!(stack_after("10 3 -"), vec![7]);
    assert_eq!(stack_after("6 7 *"), vec![42]);
    assert_eq!(stack_after("20 4 /"), vec![5]);
    assert_eq!(stack_after("-7 2 /"), vec![-3]);
    assert_eq!(stack_after("-5 3 +"), vec![-2]);
    assert_eq!(stack_after("1 2 3 * +"), vec![7]);
}

#[test]
fn test_comparisons() {
    assert_eq!(stack_after("1 2 <"), vec![TRUE]);
    assert_eq!(stack_after("2 1 <"), vec![FALSE]);
    assert_eq!(stack_after("2 1 >"), vec![TRUE]);
    assert_eq!(stack_after("1 2 >"), vec![FALSE]);
    assert_eq!(stack_after("2 2 <="), vec![TRUE]);
    assert_eq!(stack_after("1 2 <="), vec![TRUE]);
    assert_eq!(stack_after("3 2 <="), vec![FALSE]);
    assert_eq!(stack_after("2 2 >="), vec![TRUE]);
    assert_eq!(stack_after("3 2 >="), vec![TRUE]);
    assert_eq!(stack_after("1 2 >="), vec![FALSE]);
    assert_eq!(stack_after("3 3 ="), vec![TRUE]);
    assert_eq!(stack_after("3 4 ="), vec![FALSE]);
    assert_eq!(stack_after("3 4 <>"), vec![TRUE]);
    assert_eq!(stack_after("3 3 <>"), vec![FALSE]);
    assert_eq!(stack_after("-3 2 <"), vec![TRUE]);
}

#[test]
fn test_logic() {
    assert_eq!(stack_after("-1 5 and"), vec![TRUE]);
    assert_eq!(stack_after("1 0 and"), vec![FALSE]);
    assert_eq!(stack_after("0 3 or"), vec![TRUE]);
    assert_eq!(stack_after("0 0 or"), vec![FALSE]);
    assert_eq!(stack_after("0 invert"), vec![TRUE]);
    assert_eq!(stack_after("5 invert"), vec![FALSE]);
    assert_eq!(stack_after("1 2 < invert"), vec![FALSE]);
}

#[test]
fn test_builtin_words() {
    assert_eq!(stack_after("3 dup"), vec![3, 3]);
    assert_eq!(stack_after("1 2 swap"), vec![2, 1]);
    assert_eq!(stack_after("1 2 drop"), vec![1]);
}

#[test]
fn test_comments() {
    assert_eq!(stack_after("1 \\ the first\n( and the second ) 2 +"), vec![3]);
}

#[test]
fn test_word_composition() {
    let source = ": add3 + + ; : add3_mul2 add3 2 * ; 1 2 3 add3_mul2";
    assert_eq!(stack_after(source), vec![12]);
}

#[test]
fn test_redefinition_uses_latest() {
    assert_eq!(stack_after(": w 1 ; : w 2 ; w"), vec![2]);
}

#[test]
fn test_earlier_words_keep_their_expansion() {
    // `b` was generated while `a` meant 1
    assert_eq!(stack_after(": a 1 ; : b a ; : a 2 ; b a"), vec![1, 2]);
}

#[test]
fn test_conditional() {
    let source = ": choose if 10 else 20 then ; 1 choose 0 choose -1 choose";
    assert_eq!(stack_after(source), vec![10, 20, 10]);

    assert_eq!(stack_after(": w if 5 then ; 0 w 1 w"), vec![5]);
}

#[test]
fn test_repeated_inlining_with_branches() {
    let source = ": abs dup 0 < if -1 * then ; -5 abs 3 abs 0 abs";
    assert_eq!(stack_after(source), vec![5, 3, 0]);
}

#[test]
fn test_nested_conditionals() {
    let source = ": sign dup 0 < if drop -1 else 0 > if 1 else 0 then then ; -4 sign 0 sign 9 sign";
    assert_eq!(stack_after(source), vec![-1, 0, 1]);
}

#[test]
fn test_counted_loop() {
    assert_eq!(stack_after(": w 5 0 do i loop ; w"), vec![0, 1, 2, 3, 4]);
    assert_eq!(stack_after(": w 7 5 do i loop ; w"), vec![5, 6]);
}

#[test]
fn test_counted_loop_exits_when_index_reaches_limit() {
    assert_eq!(stack_after(": w 4 3 do 9 loop ; w"), vec![9]);
    assert_eq!(stack_after(": w 2 0 do i 10 * loop ; w"), vec![0, 10]);
}

#[test]
fn test_factorial() {
    let source = ": fact 1 swap 1 + 1 do i * loop ; 5 fact 1 fact";
    assert_eq!(stack_after(source), vec![120, 1]);
}

#[test]
fn test_nested_loops() {
    let source = ": w 3 0 do 2 0 do i j loop loop ; w";
    assert_eq!(
        stack_after(source),
        vec![0, 0, 0, 1, 1, 0, 1, 1, 2, 0, 2, 1]
    );
}

#[test]
fn test_word_with_loop_inside_loop() {
    let source = ": inner 2 0 do i loop ; : outer 3 0 do inner loop ; outer";
    assert_eq!(stack_after(source), vec![0, 1, 0, 1, 0, 1]);
}

#[test]
fn test_indefinite_loop_runs_once_on_true() {
    assert_eq!(stack_after(": once begin 7 1 until ; once"), vec![7]);
}

#[test]
fn test_indefinite_loop_counts() {
    let source = ": w variable n 0 n ! begin n @ 1 + n ! n @ 5 = until n @ ; w";
    assert_eq!(stack_after(source), vec![5]);
}

#[test]
fn test_variables() {
    assert_eq!(stack_after(": w variable x 42 x ! x @ ; w"), vec![42]);

    let source = ": w variable x variable y 1 x ! 2 y ! y @ x @ ; w";
    assert_eq!(stack_after(source), vec![2, 1]);
}

#[test]
fn test_variable_pushes_its_address() {
    let options = CompilerOptions::default();
    let source = ": w variable x variable y x y ; w";
    assert_eq!(
        stack_after(source),
        vec![options.heap_base as i32, options.heap_base as i32 + 4]
    );
}

#[test]
fn test_variable_shared_between_inlinings() {
    // `c` is bound once, when `w` is defined, so every word sees the same cell
    let source = ": w variable c 0 c ! ; : bump c @ 1 + c ! ; : get c @ ; w bump bump bump get";
    assert_eq!(stack_after(source), vec![3]);
}

#[test]
fn test_block_copy() {
    let source = "\
        : w variable a variable b variable c variable d \
        1 a ! 2 b ! \
        a c 2 cmove \
        c @ d @ ; w";
    assert_eq!(stack_after(source), vec![1, 2]);
}

#[test]
fn test_block_copy_stops_at_count() {
    let source = "\
        : w variable a variable b variable c variable d variable e variable f \
        1 a ! 2 b ! 3 c ! 0 f ! \
        a d 2 cmove \
        d @ e @ f @ ; w";
    assert_eq!(stack_after(source), vec![1, 2, 0]);
}

#[test]
fn test_block_copy_with_zero_count() {
    let source = ": w variable a variable b 9 a ! 5 b ! a b 0 cmove b @ ; w";
    assert_eq!(stack_after(source), vec![5]);

    let source = ": w variable a variable b 9 a ! 5 b ! a b -3 cmove b @ ; w";
    assert_eq!(stack_after(source), vec![5]);
}

#[test]
fn test_custom_memory_layout() {
    let options = CompilerOptions { stack_base: 0x2000, heap_base: 0x8000 };
    let assembly = compile(": w variable x 7 x ! x x @ ; w", None, options).unwrap();

    let machine = run(&assembly, options);
    assert_eq!(machine.stack(), vec![0x8000, 7]);
    assert_eq!(machine.load(0x8000), 7);
}

#[test]
fn test_undefined_name_is_semantic_error() {
    let error = compile_source("1 frob").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Semantic);
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_unmatched_if_is_syntax_error() {
    let error = compile_source(": w 1 if 2 ;").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(error.get_position().0, 11);
}

#[test]
fn test_unknown_character_is_lexical_error() {
    let error = compile_source("1 2 $").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_error_diagnostic() {
    let source = ": w 1 if 2 ;";
    let error = compile_source(source).unwrap_err();
    let rendered = format_error(&error, source);

    assert!(rendered.starts_with("Error: "));
    assert!(rendered.contains("-> test.fth\n"));
    assert!(rendered.contains("1 | : w 1 if 2 ;\n"));
    assert!(rendered.ends_with("  | -----------^\n"));
}

#[test]
fn test_compilation_is_deterministic() {
    let source = ": sq dup * ; : w 4 0 do i sq loop ; w w";
    assert_eq!(compile_source(source).unwrap(), compile_source(source).unwrap());
    assert_eq!(stack_after(source), vec![0, 1, 4, 9, 0, 1, 4, 9]);
}
