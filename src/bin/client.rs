//! Command-line front-end for the `packrat` binary.
//!
//! The front-end is deliberately thin: filter flags are pulled out of the
//! raw token list by [`FilterCollector`] (their order determines rule
//! precedence, so they cannot go through position-ignorant option
//! handling), the handful of remaining switches are matched by hand, and
//! the traversal is delegated to [`walk`].

use std::io::{self, Write};
use std::process::ExitCode;

use filters::{CaseSensitivity, EnumerationGate, FilterCollector};
use walk::WalkBuilder;

/// Exit code reported when the traversal fails partway through.
const PARTIAL_TRAVERSAL_CODE: u8 = 23;

/// Deterministic help text describing the CLI surface supported by this build.
const HELP_TEXT: &str = concat!(
    "packrat ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "https://github.com/packrat-dev/packrat\n",
    "\n",
    "Usage: packrat [OPTIONS] ROOT\n",
    "\n",
    "Walks ROOT depth-first and prints the relative path of every entry\n",
    "selected by the filter flags, one per line. Rules are matched against\n",
    "the entry path prefixed with a leading directory separator; the first\n",
    "matching rule wins and unmatched entries pass through.\n",
    "\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Output version information and exit.\n",
    "      --include=PATTERN  Include entries matching the glob PATTERN.\n",
    "      --exclude=PATTERN  Exclude entries matching the glob PATTERN.\n",
    "      --include-regexp=EXPR  Include entries matching the regex EXPR.\n",
    "      --exclude-regexp=EXPR  Exclude entries matching the regex EXPR.\n",
    "      --show-hash        Print the filter's identity hash and exit.\n",
    "      --case-insensitive Match patterns without regard to case.\n",
);

/// Runs the CLI against the provided argument iterator and output handles.
pub(crate) fn run_with<I>(
    args: I,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> ExitCode
where
    I: IntoIterator<Item = String>,
{
    init_tracing();

    let mut tokens: Vec<String> = args.into_iter().skip(1).collect();

    let mut help = false;
    let mut version = false;
    let mut show_hash = false;
    let mut case_insensitive = false;
    tokens.retain(|token| match token.as_str() {
        "-h" | "--help" => {
            help = true;
            false
        }
        "-V" | "--version" => {
            version = true;
            false
        }
        "--show-hash" => {
            show_hash = true;
            false
        }
        "--case-insensitive" => {
            case_insensitive = true;
            false
        }
        _ => true,
    });

    if help {
        return emit(stdout, HELP_TEXT);
    }
    if version {
        return emit(stdout, concat!("packrat ", env!("CARGO_PKG_VERSION"), "\n"));
    }

    let case = if case_insensitive {
        CaseSensitivity::Insensitive
    } else {
        CaseSensitivity::host_default()
    };

    let collected = match FilterCollector::new(case).collect(&mut tokens, None) {
        Ok(collected) => collected,
        Err(error) => return usage_error(stderr, &format!("{error}")),
    };

    if let Some((key, value)) = collected.options.iter().next() {
        return usage_error(stderr, &format!("unrecognized option '--{key}={value}'"));
    }
    if let Some(flag) = tokens.iter().find(|token| token.starts_with("--")) {
        return usage_error(stderr, &format!("unrecognized option '{flag}'"));
    }

    let gate = EnumerationGate::new(collected.filter);

    if show_hash {
        return emit(stdout, &format!("{}\n", gate.identity_hash()));
    }

    let root = match tokens.as_slice() {
        [root] => root.clone(),
        [] => return usage_error(stderr, "missing ROOT operand"),
        _ => return usage_error(stderr, "more than one ROOT operand"),
    };

    let walker = match WalkBuilder::new(root).gate(gate).include_root(false).build() {
        Ok(walker) => walker,
        Err(error) => return traversal_error(stderr, &format!("{error}")),
    };

    for entry in walker {
        match entry {
            Ok(entry) => {
                if writeln!(stdout, "{}", entry.relative_path().display()).is_err() {
                    return ExitCode::FAILURE;
                }
            }
            Err(error) => return traversal_error(stderr, &format!("{error}")),
        }
    }

    ExitCode::SUCCESS
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn emit(stdout: &mut impl Write, text: &str) -> ExitCode {
    if stdout.write_all(text.as_bytes()).is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn usage_error(stderr: &mut impl Write, message: &str) -> ExitCode {
    let _ = writeln!(stderr, "packrat: {message}");
    let _ = writeln!(stderr, "packrat: try 'packrat --help' for more information");
    ExitCode::FAILURE
}

fn traversal_error(stderr: &mut impl Write, message: &str) -> ExitCode {
    let _ = writeln!(stderr, "packrat: {message}");
    ExitCode::from(PARTIAL_TRAVERSAL_CODE)
}
