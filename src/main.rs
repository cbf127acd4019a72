// tricheck: three-pass analyzer for a toy C-like language

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use tricheck::analysis::Stage;
use tricheck::config::AnalyzerConfig;
use tricheck::logging::{init_logging, LogTarget};
use tricheck::pipeline::Session;
use tricheck::report::{self, ReportLine};
use tricheck::ui::App;

/// Exit status when an analysis stage failed in plain mode
const EXIT_ANALYSIS_FAILED: i32 = 2;

#[derive(Debug, Default)]
struct Options {
    plain: bool,
    strict: bool,
    log_file: Option<PathBuf>,
    file: Option<String>,
}

fn usage(program_name: &str) {
    eprintln!(
        "Usage: {} [--plain] [--strict] [--log-file PATH] [file]",
        program_name
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --plain           Run all three stages and print the reports to stdout");
    eprintln!("  --strict          Fail lexical analysis on any unexpected token");
    eprintln!("  --log-file PATH   Write logs to PATH (filter with RUST_LOG)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} demos/valid.txt", program_name);
    eprintln!("  {} --plain demos/type_mismatch.txt", program_name);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--plain" => options.plain = true,
            "--strict" => options.strict = true,
            "--log-file" => match iter.next() {
                Some(path) => options.log_file = Some(PathBuf::from(path)),
                None => return Err("--log-file requires a path".to_string()),
            },
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option '{}'", flag));
            }
            file => {
                if options.file.is_some() {
                    return Err("only one input file may be given".to_string());
                }
                options.file = Some(file.to_string());
            }
        }
    }

    if options.plain && options.file.is_none() {
        return Err("--plain requires an input file".to_string());
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("tricheck");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            process::exit(1);
        }
    };

    match &options.log_file {
        Some(path) => init_logging(LogTarget::File(path))?,
        // Stderr belongs to the TUI's terminal otherwise
        None if options.plain => init_logging(LogTarget::Stderr)?,
        None => {}
    }

    let source = match &options.file {
        Some(file) => {
            if !Path::new(file).exists() {
                eprintln!("Error: File '{}' not found", file);
                usage(program_name);
                process::exit(1);
            }
            fs::read_to_string(file)?
        }
        None => String::new(),
    };

    let config = if options.strict {
        AnalyzerConfig::strict()
    } else {
        AnalyzerConfig::default()
    };
    let session = Session::with_source(config, source);

    if options.plain {
        let all_passed = run_plain(session);
        if !all_passed {
            process::exit(EXIT_ANALYSIS_FAILED);
        }
        return Ok(());
    }

    run_tui(session, options.file)
}

/// Run every stage in order and print each report. Returns whether all passed.
fn run_plain(mut session: Session) -> bool {
    let mut all_passed = true;

    let lines = match session.analyze_lexical() {
        Ok(result) => {
            all_passed &= result.success;
            report::lexical_report(result)
        }
        Err(err) => {
            all_passed = false;
            report::refusal_report(Stage::Lexical, &err)
        }
    };
    print_section("Lexical Analysis", &lines);

    let lines = match session.analyze_syntax() {
        Ok(result) => {
            all_passed &= result.success;
            report::syntax_report(result)
        }
        Err(err) => {
            all_passed = false;
            report::refusal_report(Stage::Syntax, &err)
        }
    };
    print_section("Syntax Analysis", &lines);

    let lines = match session.analyze_semantic() {
        Ok(result) => {
            all_passed &= result.success;
            report::semantic_report(result)
        }
        Err(err) => {
            all_passed = false;
            report::refusal_report(Stage::Semantic, &err)
        }
    };
    print_section("Semantic Analysis", &lines);

    info!(all_passed, "plain run finished");
    all_passed
}

fn print_section(title: &str, lines: &[ReportLine]) {
    print!("{}", section_text(title, lines));
}

/// A titled report followed by one blank line.
fn section_text(title: &str, lines: &[ReportLine]) -> String {
    format!("== {} ==\n{}\n", title, report::to_text(lines))
}

fn run_tui(session: Session, source_name: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session, source_name);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("tricheck")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_flags() {
        let options = parse_args(&args(&["--plain", "--strict", "--log-file", "out.log", "a.txt"]))
            .unwrap();
        assert!(options.plain);
        assert!(options.strict);
        assert_eq!(options.log_file, Some(PathBuf::from("out.log")));
        assert_eq!(options.file.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--plain"])).is_err());
        assert!(parse_args(&args(&["--log-file"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["a.txt", "b.txt"])).is_err());
    }

    #[test]
    fn test_section_ends_with_one_blank_line() {
        let result = tricheck::analysis::syntax::validate("return x;");
        let text = section_text("Syntax Analysis", &report::syntax_report(&result));
        assert!(text.starts_with("== Syntax Analysis ==\nreturn x;\n"));
        assert!(text.ends_with("Syntax Analysis Successful.\n\n"));
        assert!(!text.ends_with("\n\n\n"));
    }

    #[test]
    fn test_run_plain_exit_status() {
        let valid = Session::with_source(AnalyzerConfig::default(), "int x = 5;\nreturn x;");
        assert!(run_plain(valid));

        let mismatch = Session::with_source(AnalyzerConfig::default(), "int x = 5.5;");
        assert!(!run_plain(mismatch));
    }
}
