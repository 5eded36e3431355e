//! chatfmt CLI - chatbot answer formatting tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use chatfmt::{
    process_batch, process_with_options, render, tables_from_json, AnswerInput, ContentFeatures,
    ContentStats, DocumentMeta, JsonFormat, ProcessOptions, ProcessedContent, RenderOptions,
    TableData, TableStyle,
};

#[derive(Parser)]
#[command(name = "chatfmt")]
#[command(version)]
#[command(about = "Render chatbot answers to safe HTML, JSON, and text", long_about = None)]
struct Cli {
    /// Input answer file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    process: ProcessArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags shared by every command that runs the pipeline.
#[derive(Args, Clone, Default)]
struct ProcessArgs {
    /// JSON file with the table dataset
    #[arg(long, value_name = "FILE", global = true)]
    tables: Option<PathBuf>,

    /// Use dark-theme classes
    #[arg(long, env = "CHATFMT_DARK", global = true)]
    dark: bool,

    /// Do not decorate contact labels with icons
    #[arg(long, global = true)]
    no_keywords: bool,

    /// Reject answers larger than this many bytes (0 = unlimited)
    #[arg(long, env = "CHATFMT_MAX_BYTES", value_name = "BYTES", global = true)]
    max_bytes: Option<usize>,
}

impl ProcessArgs {
    fn options(&self) -> ProcessOptions {
        let mut options = ProcessOptions::new()
            .with_dark_mode(self.dark)
            .with_keywords(!self.no_keywords);
        if let Some(limit) = self.max_bytes {
            options = options.with_max_input_bytes(limit);
        }
        options
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions::new().with_dark_mode(self.dark)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert answers to HTML and JSON files
    Convert {
        /// Input answer files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Render an answer to HTML
    Html {
        /// Input answer file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Wrap the fragment in a standalone HTML page
        #[arg(long)]
        document: bool,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "themed")]
        table_mode: TableMode,

        /// Leave out the image gallery
        #[arg(long)]
        no_images: bool,
    },

    /// Render an answer to JSON
    Json {
        /// Input answer file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render an answer to plain text
    Text {
        /// Input answer file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave out image references
        #[arg(long)]
        no_images: bool,
    },

    /// Show answer statistics and detected features
    Info {
        /// Input answer file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List images referenced by an answer
    Images {
        /// Input answer file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the image list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// Styled HTML tables
    Themed,
    /// Preformatted text tables
    Plain,
}

impl From<TableMode> for TableStyle {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Themed => TableStyle::Themed,
            TableMode::Plain => TableStyle::Plain,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let args = cli.process;

    let result = match cli.command {
        Some(Commands::Convert { inputs, output }) => cmd_convert(&inputs, output.as_deref(), &args),
        Some(Commands::Html {
            input,
            output,
            document,
            table_mode,
            no_images,
        }) => cmd_html(&input, output.as_deref(), document, table_mode, no_images, &args),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &args),
        Some(Commands::Text {
            input,
            output,
            no_images,
        }) => cmd_text(&input, output.as_deref(), no_images, &args),
        Some(Commands::Info { input }) => cmd_info(&input, &args),
        Some(Commands::Images { input, json }) => cmd_images(&input, json, &args),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print HTML if input is provided
            if let Some(input) = cli.input {
                cmd_html(&input, None, false, TableMode::Themed, false, &args)
            } else {
                println!("{}", "Usage: chatfmt <FILE>".yellow());
                println!("       chatfmt --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read an answer from a file, or from stdin when the path is `-`.
fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(path)
    }
}

fn load_tables(path: Option<&Path>) -> chatfmt::Result<Vec<TableData>> {
    match path {
        Some(path) => tables_from_json(&fs::read_to_string(path)?),
        None => Ok(Vec::new()),
    }
}

fn load_content(input: &Path, args: &ProcessArgs) -> Result<ProcessedContent, Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let tables = load_tables(args.tables.as_deref())?;
    log::debug!("Read {} bytes from {}, {} tables", raw.len(), input.display(), tables.len());
    let content = process_with_options(&raw, &tables, &args.options())?;

    for title in &content.unresolved_tables {
        eprintln!("{} no table named {:?}", "Warning:".yellow(), title);
    }

    Ok(content)
}

fn write_output(output: Option<&Path>, content: &str) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn output_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty() && s != "-")
        .unwrap_or_else(|| "answer".to_string())
}

fn cmd_convert(inputs: &[PathBuf], output: Option<&Path>, args: &ProcessArgs) -> CliResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("chatfmt_output"));
    fs::create_dir_all(&output_dir)?;

    let tables = load_tables(args.tables.as_deref())?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading answers...");
    let mut answers = Vec::with_capacity(inputs.len());
    for path in inputs {
        answers.push(AnswerInput::new(read_input(path)?).with_tables(tables.clone()));
        pb.inc(1);
    }

    pb.set_message("Processing...");
    let results = process_batch(&answers, &args.options());
    let render_options = args.render_options();

    let mut written = Vec::new();
    let mut failed = 0usize;
    for (path, result) in inputs.iter().zip(results) {
        let stem = output_stem(path);
        match result {
            Ok(content) => {
                let html = render::to_html(&content, &render_options)?;
                fs::write(output_dir.join(format!("{}.html", stem)), html)?;
                let json = render::to_json(&content, JsonFormat::Pretty)?;
                fs::write(output_dir.join(format!("{}.json", stem)), json)?;
                written.push(stem);
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Skipped".yellow(), path.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    log::info!("Wrote {} answers to {}", written.len(), output_dir.display());

    println!("\n{}", "Output files:".green().bold());
    for (i, stem) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}.html, {}.json", branch.dimmed(), stem, stem);
    }
    if failed > 0 {
        println!("{} {} answers failed", "Warning:".yellow(), failed);
    }

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    document: bool,
    table_mode: TableMode,
    no_images: bool,
    args: &ProcessArgs,
) -> CliResult {
    let content = load_content(input, args)?;
    let options = args
        .render_options()
        .with_table_style(table_mode.into())
        .with_images(!no_images);

    let html = if document {
        let meta = DocumentMeta::now().with_title(output_stem(input));
        render::to_html_document(&content, &options, &meta)?
    } else {
        render::to_html(&content, &options)?
    };

    write_output(output, &html)?;
    Ok(())
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, args: &ProcessArgs) -> CliResult {
    let content = load_content(input, args)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&content, format)?;
    write_output(output, &json)?;
    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>, no_images: bool, args: &ProcessArgs) -> CliResult {
    let content = load_content(input, args)?;
    let options = args.render_options().with_images(!no_images);

    let text = render::to_text(&content, &options)?;
    write_output(output, &text)?;
    Ok(())
}

fn cmd_info(input: &Path, args: &ProcessArgs) -> CliResult {
    let raw = read_input(input)?;
    let features = ContentFeatures::detect(&raw);
    let content = load_content(input, args)?;
    let stats = ContentStats::from_content(&content);

    println!("{}", "Answer Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} bytes", "Size".bold(), raw.len());
    let detected = features.names();
    println!(
        "{}: {}",
        "Features".bold(),
        if detected.is_empty() {
            "plain text".to_string()
        } else {
            detected.join(", ")
        }
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Prose blocks".bold(), stats.prose_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Rules".bold(), stats.rule_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if stats.unresolved_table_count > 0 {
        println!(
            "{}: {}",
            "Unresolved tables".bold(),
            content.unresolved_tables.join(", ").yellow()
        );
    }

    Ok(())
}

fn cmd_images(input: &Path, json: bool, args: &ProcessArgs) -> CliResult {
    let content = load_content(input, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&content.extracted_images)?);
        return Ok(());
    }

    for image in &content.extracted_images {
        println!("{} {} {}", "Image".green(), image.url, format!("({})", image.alt_text).dimmed());
    }

    println!(
        "\n{} {} images found",
        "Done!".green().bold(),
        content.extracted_images.len()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "chatfmt".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Chatbot answer formatting tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answer.txt");
        fs::write(&path, "**Hi**").unwrap();

        assert_eq!(read_input(&path).unwrap(), "**Hi**");
    }

    #[test]
    fn test_load_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        fs::write(&path, r#"[{"title": "Hours", "headers": ["Day"], "rows": [["Mon"]]}]"#).unwrap();

        let tables = load_tables(Some(&path)).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, "Hours");
        assert!(load_tables(None).unwrap().is_empty());
    }

    #[test]
    fn test_load_tables_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            load_tables(Some(&path)),
            Err(chatfmt::Error::InvalidTables(_))
        ));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_output(Some(&path), "<p>x</p>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem(Path::new("answers/reply.txt")), "reply");
        assert_eq!(output_stem(Path::new("-")), "answer");
    }

    #[test]
    fn test_process_args_options() {
        let args = ProcessArgs {
            dark: true,
            no_keywords: true,
            max_bytes: Some(10),
            ..Default::default()
        };
        let options = args.options();

        assert!(options.theme.is_dark());
        assert!(!options.decorate_keywords);
        assert_eq!(options.max_input_bytes, 10);
        assert!(args.render_options().theme.is_dark());
    }
}
