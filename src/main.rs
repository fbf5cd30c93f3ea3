//! startlang driver
//!
//! Command-line front for the lexer, parser, interpreter and compiler.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::info;

use startlang::feedback::ErrorReport;
use startlang::frontend::tree_printer::print_tree;
use startlang::{Backend, Error, Interpreter, LexMode, LexemeStream, Lexer, Program, X86CodeGen};

/// startlang compiler
#[derive(Parser, Debug)]
#[command(name = "startc")]
#[command(version = "0.1.0")]
#[command(about = "Lexer, parser, interpreter and x86-64 compiler for startlang")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// How source text is split into lexemes
    #[arg(long, value_enum, default_value = "pattern", global = true)]
    mode: LexMode,

    /// Print failures as JSON reports
    #[arg(long, global = true)]
    json_errors: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the lexemes of a source file
    Lex {
        input: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the parse tree of a source file
    Parse {
        input: PathBuf,
        /// Emit the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interpret a source file
    Run { input: PathBuf },
    /// Compile a source file to assembly, and optionally to an executable
    Build {
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop after writing the assembly listing
        #[arg(long)]
        emit_asm: bool,
    },
    /// Check a source file for errors
    Check { input: PathBuf },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Lex { input, json } => {
            let source = read_source(input)?;
            let lexemes = report(cli, input, &source, Lexer::new(cli.mode).analyze(&source))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&lexemes)?);
            } else {
                for (i, lexeme) in lexemes.iter().enumerate() {
                    println!("{:>4}  {:<20} {}", i + 1, lexeme.kind, lexeme.source);
                }
            }
        }
        Commands::Parse { input, json } => {
            let program = front_end(cli, input)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&program)?);
            } else {
                print!("{}", print_tree(&program));
            }
        }
        Commands::Run { input } => {
            let program = front_end(cli, input)?;
            print!("{}", Interpreter::new().run(&program));
        }
        Commands::Build {
            input,
            output,
            emit_asm,
        } => {
            let program = front_end(cli, input)?;
            build(cli, input, output.clone(), *emit_asm, &program)?;
        }
        Commands::Check { input } => {
            let program = front_end(cli, input)?;
            println!("✅ No errors found ({} statements)", program.statements.len());
        }
    }
    Ok(())
}

fn read_source(input: &Path) -> anyhow::Result<String> {
    fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
}

/// Lex and parse `input`
fn front_end(cli: &Cli, input: &Path) -> anyhow::Result<Program> {
    let source = read_source(input)?;
    let lexemes = report(cli, input, &source, Lexer::new(cli.mode).analyze(&source))?;
    let mut stream = LexemeStream::new(lexemes);
    let program = report(cli, input, &source, startlang::parse(&mut stream))?;
    info!("parsed {} ({} statements)", input.display(), program.statements.len());
    Ok(program)
}

/// Print a pipeline failure the way the user asked for, then bail
fn report<T>(
    cli: &Cli,
    input: &Path,
    source: &str,
    result: Result<T, Error>,
) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            let report = ErrorReport::from_error(&err, &input.display().to_string(), source);
            if cli.json_errors {
                println!("{}", report.to_json());
                process::exit(1);
            }
            bail!("{}", report.to_human())
        }
    }
}

/// Pick the assembly and executable paths for `build`.
///
/// With `emit_asm` the explicit output names the assembly file; otherwise it
/// names the executable. Neither may be the input itself.
fn output_paths(
    input: &Path,
    output: Option<PathBuf>,
    emit_asm: bool,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    let default_asm = input.with_extension("s");
    let (asm_path, exe_path) = match output {
        Some(out) if emit_asm => (out, input.with_extension("out")),
        Some(out) => (default_asm, out),
        None => (default_asm, input.with_extension("out")),
    };

    if asm_path == input {
        bail!("assembly output {} would overwrite the input", asm_path.display());
    }
    if !emit_asm && exe_path == input {
        bail!("executable output {} would overwrite the input", exe_path.display());
    }
    Ok((asm_path, exe_path))
}

fn build(
    cli: &Cli,
    input: &Path,
    output: Option<PathBuf>,
    emit_asm: bool,
    program: &Program,
) -> anyhow::Result<()> {
    let asm = X86CodeGen::new().run(program);

    let (asm_path, exe_path) = output_paths(input, output, emit_asm)?;

    fs::write(&asm_path, &asm).with_context(|| format!("writing {}", asm_path.display()))?;
    if emit_asm {
        println!("  [✓] Generated assembly: {}", asm_path.display());
        return Ok(());
    }

    // Assemble and link with whichever system compiler driver is present
    let compilers = ["cc", "gcc", "clang"];
    let mut compiled = None;
    for compiler in &compilers {
        let result = process::Command::new(compiler)
            .arg("-no-pie")
            .arg("-o")
            .arg(&exe_path)
            .arg(&asm_path)
            .output();

        if let Ok(out) = result {
            if out.status.success() {
                compiled = Some(*compiler);
                break;
            }
            info!("{} failed: {}", compiler, String::from_utf8_lossy(&out.stderr));
        }
    }

    // Cleanup temp assembly file
    let _ = fs::remove_file(&asm_path);

    match compiled {
        Some(compiler) => {
            println!("  [✓] Assembled with {}", compiler);
            println!("\n✅ Output: {}", exe_path.display());
            Ok(())
        }
        None => {
            let err = Error::Assembler("could not assemble with cc, gcc or clang".to_string());
            report(cli, input, "", Err::<(), _>(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_outputs_never_clobber_input() {
        let (asm, exe) = output_paths(Path::new("prog"), None, false).unwrap();
        assert_eq!(asm, PathBuf::from("prog.s"));
        assert_eq!(exe, PathBuf::from("prog.out"));

        let (asm, exe) = output_paths(Path::new("demo.start"), None, false).unwrap();
        assert_eq!(asm, PathBuf::from("demo.s"));
        assert_eq!(exe, PathBuf::from("demo.out"));
    }

    #[test]
    fn test_assembly_named_like_input_is_refused() {
        assert!(output_paths(Path::new("foo.s"), None, false).is_err());
        assert!(output_paths(Path::new("foo.s"), None, true).is_err());
    }

    #[test]
    fn test_explicit_output_equal_to_input_is_refused() {
        let input = Path::new("prog.start");
        assert!(output_paths(input, Some(PathBuf::from("prog.start")), false).is_err());
        assert!(output_paths(input, Some(PathBuf::from("prog.start")), true).is_err());

        let (asm, exe) = output_paths(input, Some(PathBuf::from("bin/prog")), false).unwrap();
        assert_eq!(asm, PathBuf::from("prog.s"));
        assert_eq!(exe, PathBuf::from("bin/prog"));
    }
}
