use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use bytejson::{DecodeOptions, NonAscii, Token};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "bytejson", version, about = "Strict JSON scanner and parser")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Print the token sequence instead of the parsed value.
    #[arg(long, conflicts_with = "check")]
    tokens: bool,

    /// Only validate the input.
    #[arg(long)]
    check: bool,

    /// Indentation size for printed JSON, 0 for compact output (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Maximum nesting depth of objects and arrays (default: 256).
    #[arg(long = "max-depth", value_name = "number", conflicts_with = "no_depth_limit")]
    max_depth: Option<usize>,

    /// Disable the nesting depth limit.
    #[arg(long = "no-depth-limit")]
    no_depth_limit: bool,

    /// Accept UTF-8 encoded characters inside strings.
    #[arg(long)]
    utf8: bool,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    fn label(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => display_path(path),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn")).init();

    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let (input, input_source) = read_input(args.input.as_deref())?;
    log::debug!("read {} bytes from {}", input.len(), input_source.label());
    let options = decode_options(&args);

    if args.check {
        bytejson::validate_slice_with_options(&input, &options)?;
        println!("✔ valid JSON ({})", input_source.label());
        return Ok(());
    }

    let output_target = OutputTarget::from_arg(args.output.as_deref());

    if args.tokens {
        let tokens = bytejson::tokenize_with_options(&input, &options)?;
        with_output_writer(output_target.path(), |writer| write_tokens(writer, &tokens))?;
    } else {
        let value: Value = bytejson::from_slice_with_options(&input, &options)?.into();
        with_output_writer(output_target.path(), |writer| {
            write_json(writer, &value, args.indent)
        })?;
    }

    if let OutputTarget::File(path) = &output_target {
        report_status(&input_source, path);
    }
    Ok(())
}

fn decode_options(args: &Args) -> DecodeOptions {
    let mut options = DecodeOptions::new();
    if args.no_depth_limit {
        options = options.with_max_depth(None);
    } else if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(Some(max_depth));
    }
    if args.utf8 {
        options = options.with_non_ascii(NonAscii::Utf8);
    }
    options
}

fn read_input(input: Option<&str>) -> Result<(Vec<u8>, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read(path).map_err(|err| format!("failed to read {path}: {err}"))?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_json(writer: &mut dyn Write, value: &Value, indent: usize) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(&mut *writer, value)?;
    } else {
        let indent_bytes = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
        let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        value.serialize(&mut serializer)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_tokens(writer: &mut dyn Write, tokens: &[Token]) -> Result<(), Box<dyn Error>> {
    for token in tokens {
        writeln!(writer, "{}", format_token(token))?;
    }
    Ok(())
}

fn format_token(token: &Token) -> String {
    let location = token.location;
    if token.text.is_empty() {
        format!("{:?} @{}:{}", token.kind, location.line, location.column)
    } else {
        format!(
            "{:?} {} @{}:{}",
            token.kind, token.text, location.line, location.column
        )
    }
}

fn report_status(input_source: &InputSource, output_path: &str) {
    println!("✔ Parsed {} → {}", input_source.label(), display_path(output_path));
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    match path.strip_prefix(&cwd) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
