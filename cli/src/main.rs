mod compile;
mod test_runner;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use compile::CompileError;

const SUBCOMMANDS: &[&str] = &["compile", "test", "help"];

const BANNER: &str = "LAZY PAGE MAKER LANG";

#[derive(Parser)]
#[command(name = "lpml", version, about = "Lazy Page Maker Lang to HTML compiler")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile an .lpml file to HTML
    Compile(CompileArgs),

    /// Run .test.lpml test files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct CompileArgs {
    /// LPML source file
    input: String,

    /// Output file (defaults to the input with an .html extension)
    output: Option<String>,

    /// Parse only, don't generate (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump parsed AST
    #[arg(long)]
    ast: bool,

    /// Print the parsed document back as canonical LPML
    #[arg(long)]
    format: bool,

    /// List all labels declared in the document
    #[arg(long)]
    list_labels: bool,

    /// Print the HTML instead of writing a file
    #[arg(long)]
    stdout: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.lpml file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    env_logger::init();

    // `lpml page.lpml` works like `lpml compile page.lpml`.
    let mut args: Vec<String> = std::env::args().collect();
    let first_pos = args
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, a)| !a.starts_with('-'))
        .map(|(pos, a)| (pos, a.clone()));
    if let Some((pos, first)) = first_pos {
        if !SUBCOMMANDS.contains(&first.as_str()) {
            args.insert(pos, "compile".to_string());
        }
    }

    let cli = Cli::parse_from(&args);

    match cli.command {
        Command::Compile(compile_args) => {
            if let Err(e) = do_compile(compile_args, cli.no_color) {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn do_compile(args: CompileArgs, no_color: bool) -> Result<(), CompileError> {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    if !args.stdout {
        println!("{}", BANNER);
    }

    let source = compile::read_source(&args.input)?;

    // Set up codespan file database
    let mut files = SimpleFiles::new();
    let file_id = files.add(args.input.clone(), source.clone());

    let parser = lpml::Parser::new(source, file_id);
    let document = match parser.parse() {
        Ok(document) => document,
        Err(errors) => {
            eprintln!("Parsing errors:");
            let writer = StandardStream::stderr(color_choice);
            let config = term::Config::default();
            for error in &errors {
                let diagnostic = error.to_diagnostic();
                let _ =
                    term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
            }
            return Err(CompileError::Parse(errors.len()));
        }
    };

    // --check: parse succeeded, stop
    if args.check {
        eprintln!("ok: {} parsed successfully", args.input);
        return Ok(());
    }

    if args.ast {
        println!("{:#?}", document);
        return Ok(());
    }

    if args.format {
        print!("{}", document);
        return Ok(());
    }

    let generator = generator::Generator::new(&document);

    if args.list_labels {
        for name in generator.labels().names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let html = generator.generate();

    if args.stdout {
        print!("{}", html);
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| compile::default_output_path(&args.input));
    compile::write_output(&output, &html)?;
    println!("Successfully generated: {}", output);
    Ok(())
}
