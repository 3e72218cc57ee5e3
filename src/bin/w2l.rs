//! w2l CLI - Wikisource transcription markup to LaTeX converter

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, Read, Write};
use w2l::{
    check_markup, convert_section, diagnostics::format_diagnostics, tokenize, Diagnostics, Page,
    W2LOptions,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "w2l")]
#[command(version)]
#[command(about = "w2l - Wikisource transcription markup to LaTeX converter", long_about = None)]
struct Cli {
    /// Page files, converted in order (reads one page from stdin if none given)
    inputs: Vec<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Check mode - report lexer diagnostics without converting
    #[arg(long)]
    check: bool,

    /// Dump each page's tokens as JSON instead of converting
    #[arg(long)]
    tokens: bool,

    /// Print the page-quality tally after converting
    #[arg(long)]
    stats: bool,

    /// Drop running headers and join pages without a blank line
    #[arg(long)]
    compact: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Strict mode: exit with error if any error diagnostic was produced
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress diagnostic output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Raise the log level (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[cfg(feature = "cli")]
fn level_filter(verbose: u8, quiet: bool) -> log::LevelFilter {
    match (quiet, verbose) {
        (true, _) | (false, 0) => log::LevelFilter::Off,
        (false, 1) => log::LevelFilter::Warn,
        (false, 2) => log::LevelFilter::Info,
        (false, 3) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

#[cfg(feature = "cli")]
fn init_logger(verbose: u8, quiet: bool) {
    env_logger::Builder::from_default_env()
        .filter_level(level_filter(verbose, quiet))
        .init();
}

#[cfg(feature = "cli")]
fn read_pages(inputs: &[String]) -> io::Result<Vec<Page>> {
    if inputs.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(vec![Page::new(buffer)]);
    }
    inputs
        .iter()
        .map(|path| fs::read_to_string(path).map(Page::new))
        .collect()
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, text: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(text.as_bytes())?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);
    let use_color = !cli.no_color;

    let pages = read_pages(&cli.inputs)?;

    // If check mode, lex every page and report issues
    if cli.check {
        let mut has_errors = false;
        for (index, page) in pages.iter().enumerate() {
            let result = check_markup(&page.text);
            has_errors |= result.has_errors();
            if pages.len() > 1 {
                println!("== page {} ==", index + 1);
            }
            println!("{}", format_diagnostics(&result, use_color));
        }
        if has_errors {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut diags = Diagnostics::new();

    if cli.tokens {
        let dumped: Vec<_> = pages
            .iter()
            .map(|page| tokenize(&page.text, &mut diags))
            .collect();
        let json = serde_json::to_string_pretty(&dumped)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        write_output(cli.output.as_deref(), &format!("{}\n", json))?;
        return Ok(());
    }

    let options = if cli.compact {
        W2LOptions::compact()
    } else {
        W2LOptions::default()
    };
    let section = convert_section(&pages, &options, &mut diags);

    // Print diagnostics to stderr (unless quiet mode)
    if !cli.quiet && !diags.is_empty() {
        eprintln!("{}", format_diagnostics(&diags, use_color));
    }

    write_output(cli.output.as_deref(), &section.content)?;

    if cli.stats {
        eprintln!("{}", section.tally);
    }

    let abandoned = section.fragments.iter().filter(|f| !f.is_complete()).count();
    if abandoned > 0 && !cli.quiet {
        eprintln!("⚠ {} page(s) abandoned; their output is partial", abandoned);
    }

    // Check strict mode
    if cli.strict && diags.has_errors() {
        eprintln!("Error: {} error(s) in strict mode", diags.errors);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install w2l --features cli");
    eprintln!("  w2l [OPTIONS] [PAGES]...");
}
