use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use penplot::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(
    name = "penplot",
    version,
    about = "Compile text into pen plotter G-code",
    long_about = "penplot lays out text with a TrueType font, flattens every glyph outline and writes a pen-up/pen-down G-code program for a pen plotter."
)]
struct Cli {
    /// Preset library (defaults to ~/.penplot/presets.json)
    #[clap(long, global = true)]
    presets: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile text into a motion program
    Compile(CompileArgs),
    /// List or save named presets
    Presets(PresetsArgs),
}

#[derive(Args, Debug)]
struct PresetsArgs {
    #[clap(subcommand)]
    action: Option<PresetsAction>,
}

#[derive(Subcommand, Debug)]
enum PresetsAction {
    /// List the style and machine presets that can be selected by name (default)
    List,
    /// Store a style preset built from the style flags
    Save {
        /// Preset name
        name: String,

        #[clap(flatten)]
        style: StyleArgs,
    },
}

/// Style selection shared by `compile` and `presets save`.
#[derive(Args, Debug)]
struct StyleArgs {
    /// Style preset to start from
    #[clap(long, default_value = "default")]
    style: String,

    /// Registered font name, resolved inside --font-dir
    #[clap(long)]
    font: Option<String>,

    /// Explicit font file
    #[clap(long)]
    font_path: Option<PathBuf>,

    #[clap(long)]
    font_size: Option<f64>,

    #[clap(long)]
    margin_x: Option<f64>,

    #[clap(long)]
    margin_y: Option<f64>,

    /// Absolute line pitch
    #[clap(long)]
    line_height: Option<f64>,

    #[clap(long)]
    letter_spacing: Option<f64>,
}

impl StyleArgs {
    fn resolve(self, library: &PresetLibrary) -> Result<StyleProfile> {
        let mut style = library.style(&self.style)?;
        if let Some(font) = self.font {
            style = style.with_font(font);
        }
        if let Some(path) = self.font_path {
            style = style.with_font_path(path);
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(x) = self.margin_x {
            style.margin_x = x;
        }
        if let Some(y) = self.margin_y {
            style.margin_y = y;
        }
        if self.line_height.is_some() {
            style.line_height = self.line_height;
        }
        if let Some(spacing) = self.letter_spacing {
            style.letter_spacing = spacing;
        }
        Ok(style)
    }
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Text to draw; use \n in the shell string for line breaks
    #[clap(long, short = 't', conflicts_with = "input")]
    text: Option<String>,

    /// Read the text (or template) from a file
    #[clap(long, short = 'i')]
    input: Option<PathBuf>,

    /// Treat the text as a template and fill {key} placeholders
    #[clap(long)]
    template: bool,

    /// Template field as key=value (repeatable)
    #[clap(long = "field", short = 'f', requires = "template")]
    fields: Vec<String>,

    #[clap(flatten)]
    style: StyleArgs,

    /// Machine profile
    #[clap(long, short = 'm', default_value = "plotter")]
    machine: String,

    /// Directory holding registered fonts
    #[clap(long, default_value = "fonts")]
    font_dir: PathBuf,

    /// Font load timeout in seconds
    #[clap(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Write the program here instead of stdout
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,

    /// Print a JSON response body ({"gcode": ...} or {"stage", "error"})
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let presets_path = match cli.presets {
        Some(path) => path,
        None => PresetLibrary::default_library_path()?,
    };
    let mut library = PresetLibrary::load_from_path(&presets_path)?;

    match cli.command {
        Command::Compile(args) => run_compile(args, &library).await,
        Command::Presets(args) => match args.action.unwrap_or(PresetsAction::List) {
            PresetsAction::List => {
                println!("styles:");
                for name in library.style_names() {
                    println!("  {name}");
                }
                println!("machines:");
                for name in library.machine_names() {
                    println!("  {name}");
                }
                Ok(())
            }
            PresetsAction::Save { name, style } => {
                let style = style.resolve(&library)?;
                library.store_style(&name, style)?;
                library.save_to_path(&presets_path)?;
                info!(preset = %name, path = %presets_path.display(), "saved style preset");
                Ok(())
            }
        },
    }
}

async fn run_compile(args: CompileArgs, library: &PresetLibrary) -> Result<()> {
    let mut text = match (&args.text, &args.input) {
        (Some(text), _) => text.replace("\\n", "\n"),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read text from {}", path.display()))?,
        (None, None) => return Err(anyhow!("either --text or --input is required")),
    };
    if args.template {
        let fields = parse_fields(&args.fields).map_err(|err| anyhow!(err))?;
        text = fill_template(&text, &fields);
    }

    let style = args.style.resolve(library)?;
    let machine = library.machine(&args.machine)?;

    let provider = FileFontProvider::new(&args.font_dir)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let request = CompileRequest::new(text, style);

    let result = compile(&request, &provider, &machine).await;
    let rendered = match (&result, args.json) {
        (Ok(program), false) => program.to_text(),
        (Ok(program), true) => serde_json::to_string_pretty(&CompileResponse::from(program))? + "\n",
        (Err(err), true) => serde_json::to_string_pretty(&ErrorResponse::from(err))? + "\n",
        (Err(_), false) => String::new(),
    };

    if !rendered.is_empty() {
        match &args.output {
            Some(path) => {
                std::fs::write(path, &rendered)
                    .with_context(|| format!("write program to {}", path.display()))?;
                info!(path = %path.display(), "wrote program");
            }
            None => print!("{rendered}"),
        }
    }

    result.map(|_| ()).map_err(anyhow::Error::from)
}
