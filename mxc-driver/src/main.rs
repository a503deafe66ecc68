//! Mx* Compiler Driver
//!
//! Reads a resolved, type-annotated program (JSON) and lowers it to IR.
//! The IR is written as JSON for the register allocator, or as a short
//! per-function summary.

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use mxc_common::CompilerError;
use mxc_frontend::ir::Module;
use mxc_frontend::{CodegenOptions, Frontend};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mxc")]
#[command(about = "Mx* Compiler - IR construction")]
#[command(version = "0.1.0")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower a typed program to IR
    Compile {
        /// Typed program in JSON form
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to write
        #[arg(long, value_enum, default_value_t = Emit::Ir)]
        emit: Emit,

        /// Function that runs the global initializers first
        #[arg(long, default_value = "main")]
        entry: String,

        /// Lower `print(toString(n))` as a plain string print
        #[arg(long)]
        no_print_int_fast_path: bool,
    },

    /// List the runtime built-ins and their linkage symbols
    Builtins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The whole module as JSON
    Ir,
    /// Per-function block and register counts
    Summary,
}

#[derive(Serialize)]
struct ModuleSummary<'m> {
    name: &'m str,
    static_strings: usize,
    static_data: usize,
    has_div_shift: bool,
    functions: Vec<FunctionSummary<'m>>,
}

#[derive(Serialize)]
struct FunctionSummary<'m> {
    name: &'m str,
    blocks: usize,
    registers: usize,
    parameters: usize,
    callees: Vec<&'m str>,
    recursive: bool,
}

fn summarize(module: &Module) -> ModuleSummary<'_> {
    let functions = module
        .user_functions()
        .map(|function| FunctionSummary {
            name: &function.name,
            blocks: function.blocks.len(),
            registers: function.registers.len(),
            parameters: function.parameters.len(),
            callees: function
                .callees
                .iter()
                .map(|&id| module.function(id).linkage_name())
                .collect(),
            recursive: function.is_recursive(),
        })
        .collect();

    ModuleSummary {
        name: &module.name,
        static_strings: module.static_strings.len(),
        static_data: module.static_data.len(),
        has_div_shift: module.has_div_shift,
        functions,
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Compile {
            input,
            output,
            emit,
            entry,
            no_print_int_fast_path,
        } => {
            let options = CodegenOptions {
                entry_point: entry,
                print_int_fast_path: !no_print_int_fast_path,
            };
            if let Err(e) = compile_file(&input, output.as_deref(), emit, options) {
                eprintln!("Error compiling {}: {}", input.display(), e);
                std::process::exit(1);
            }
        }
        Commands::Builtins => {
            for (name, symbol) in Module::new(String::new()).builtin_table() {
                println!("{name:<22} {symbol}");
            }
        }
    }
}

fn compile_file(
    input_path: &Path,
    output_path: Option<&Path>,
    emit: Emit,
    options: CodegenOptions,
) -> Result<(), CompilerError> {
    info!("compiling {}", input_path.display());

    let source = fs::read_to_string(input_path)?;
    let program = Frontend::load_program(&source)?;
    debug!("loaded {} top-level item(s)", program.items.len());

    let module_name = input_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("module");
    let module = Frontend::compile_to_ir_with_options(&program, module_name, options)?;

    let rendered = match emit {
        Emit::Ir => serde_json::to_string_pretty(&module),
        Emit::Summary => serde_json::to_string_pretty(&summarize(&module)),
    }
    .map_err(|e| CompilerError::internal_error(format!("failed to serialize output: {e}")))?;

    match output_path {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("output written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
