use std::{env, fs, path::PathBuf, process, time::Instant};

use env_logger::Env;
use forthc::{compile, compiler::compiler::CompilerOptions, format_error};
use log::info;

const USAGE: &str = "\
Usage: forthc [--src <file>] [--out <file>] [--stack-base <hex>] [--heap-base <hex>]

  --src <file>         source file to compile (default: main.fth)
  --out <file>         where to write the assembly (default: main.asm)
  --stack-base <hex>   initial stack pointer (default: 0x10010000)
  --heap-base <hex>    address of the first variable (default: 0x10040000)
  --help               print this message
";

struct Args {
    src: PathBuf,
    out: PathBuf,
    options: CompilerOptions,
}

fn parse_address(flag: &str, value: &str) -> Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    u32::from_str_radix(digits, 16)
        .map_err(|_| format!("invalid address for {}: `{}`", flag, value))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>, String> {
    let mut parsed = Args {
        src: PathBuf::from("main.fth"),
        out: PathBuf::from("main.asm"),
        options: CompilerOptions::default(),
    };

    while let Some(flag) = args.next() {
        if flag == "--help" || flag == "-h" {
            return Ok(None);
        }

        let value = args
            .next()
            .ok_or_else(|| format!("missing value for {}", flag))?;

        match flag.as_str() {
            "--src" => parsed.src = PathBuf::from(value),
            "--out" => parsed.out = PathBuf::from(value),
            "--stack-base" => parsed.options.stack_base = parse_address(&flag, &value)?,
            "--heap-base" => parsed.options.heap_base = parse_address(&flag, &value)?,
            _ => return Err(format!("unknown argument `{}`", flag)),
        }
    }

    Ok(Some(parsed))
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{}", USAGE);
            return;
        }
        Err(message) => {
            eprintln!("Error: {}\n\n{}", message, USAGE);
            process::exit(2);
        }
    };

    let start = Instant::now();

    let source = match fs::read_to_string(&args.src) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", args.src.display(), error);
            process::exit(1);
        }
    };

    let file_name = args.src.to_string_lossy().into_owned();

    let assembly = match compile(&source, Some(file_name), args.options) {
        Ok(assembly) => assembly,
        Err(error) => {
            eprint!("{}", format_error(&error, &source));
            process::exit(1);
        }
    };

    if let Err(error) = fs::write(&args.out, assembly) {
        eprintln!("Error: failed to write {}: {}", args.out.display(), error);
        process::exit(1);
    }

    info!("compiled {} in {:?}", args.src.display(), start.elapsed());
}
