//! EduBreezy template preview CLI
//!
//! Usage:
//!   edubreezy-templates [OPTIONS] [FILE]
//!
//! Options:
//!   -t, --theme <FILE>        Theme file applied on top of the layout style (TOML)
//!   -d, --data <FILE>         Field values to fill into placeholders (JSON object)
//!   -l, --lint                Print lint warnings to stderr
//!   --no-hints                Leave unresolved image placeholders blank
//!   --seed                    Print the default admit-card layout JSON
//!   --kinds                   List template kinds
//!   --canvas-width <PX>       Canvas width when the layout has no canvasSize
//!   --canvas-height <PX>      Canvas height when the layout has no canvasSize
//!   -h, --help                Print help

use std::collections::HashMap;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use serde_json::Value;

use edubreezy_templates::layout::seed;
use edubreezy_templates::{
    render_with_config, CanvasConfig, FieldValues, LayoutDocument, RenderConfig, RenderError,
    SvgConfig, TemplateKind, Theme,
};

#[derive(Parser)]
#[command(name = "edubreezy-templates")]
#[command(about = "Preview EduBreezy certificate, ID-card and admit-card layouts as SVG")]
struct Cli {
    /// Layout JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Theme file applied on top of the layout style (TOML format)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Field values to substitute into placeholders (JSON object)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print lint warnings to stderr
    #[arg(short, long)]
    lint: bool,

    /// Leave unresolved image placeholders blank instead of labelling them
    #[arg(long)]
    no_hints: bool,

    /// Print the default admit-card layout JSON
    #[arg(long)]
    seed: bool,

    /// List template kinds
    #[arg(long)]
    kinds: bool,

    #[arg(long, default_value_t = CanvasConfig::default().width)]
    canvas_width: i32,

    #[arg(long, default_value_t = CanvasConfig::default().height)]
    canvas_height: i32,
}

fn main() {
    let cli = Cli::parse();

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    if cli.seed {
        let doc = LayoutDocument::with_elements(
            TemplateKind::AdmitCard.default_style(),
            seed::default_admit_card(),
        );
        println!("{}", doc.to_json_pretty());
        return;
    }

    if cli.kinds {
        print_kinds();
        return;
    }

    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let mut config = RenderConfig::new()
        .with_canvas(CanvasConfig::new().with_size(cli.canvas_width, cli.canvas_height))
        .with_svg(SvgConfig::new().with_placeholder_hints(!cli.no_hints))
        .with_lint(cli.lint);

    if let Some(path) = &cli.theme {
        match Theme::from_file(path) {
            Ok(theme) => config = config.with_theme(theme),
            Err(e) => {
                eprintln!("Error loading theme '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    if let Some(path) = &cli.data {
        match load_values(path) {
            Ok(values) => {
                info!("loaded {} field value(s)", values.len());
                config = config.with_values(values);
            }
            Err(e) => {
                eprintln!("Error loading data '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match render_with_config(&source, &config) {
        Ok(svg) => {
            println!("{}", svg);
        }
        Err(RenderError::Document(e)) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Read a JSON object of field values. Numbers and booleans are stringified;
/// nulls, arrays and objects are skipped.
fn load_values(path: &Path) -> Result<FieldValues, RenderError> {
    let content = fs::read_to_string(path)?;
    let raw: HashMap<String, Value> = serde_json::from_str(&content)
        .map_err(|e| edubreezy_templates::DocumentError::from_json(&e, &content))?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            Value::Number(n) => Some((k, n.to_string())),
            Value::Bool(b) => Some((k, b.to_string())),
            _ => None,
        })
        .collect())
}

fn print_kinds() {
    for kind in TemplateKind::all() {
        let size = kind.page_size();
        println!(
            "{:<12} {:<22} {}x{:<6} {:<10} {}",
            kind.as_str(),
            kind.api_endpoint(),
            size.width,
            size.height,
            if kind.use_drag_drop() { "canvas" } else { "form" },
            kind.subtypes().join(", ")
        );
    }
}

fn print_intro() {
    println!(
        r#"EduBreezy Templates - SVG previews of document template layouts

USAGE:
    edubreezy-templates [OPTIONS] [FILE]
    cat layout.json | edubreezy-templates

OPTIONS:
    -t, --theme        Theme file (TOML) applied on top of the layout style
    -d, --data         Field values (JSON object) to fill into {{{{placeholders}}}}
    -l, --lint         Print lint warnings
    --no-hints         Leave unresolved image placeholders blank
    --seed             Print the default admit-card layout
    --kinds            List template kinds
    -h, --help         Print help

QUICK START:
    edubreezy-templates --seed > admit.json
    edubreezy-templates admit.json > admit.svg"#
    );
}
