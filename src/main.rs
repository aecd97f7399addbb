use clap::{Args, Parser, Subcommand};
use resgen::config::{self, GeneratorConfig};
use resgen::{generate, output, scan};
use std::path::PathBuf;

/// Flags narrowing which resource kinds a command touches.
#[derive(Args, Clone)]
struct SelectionArgs {
    /// Skip localized string tables
    #[arg(long)]
    skip_strings: bool,
    /// Skip image assets
    #[arg(long)]
    skip_images: bool,
    /// Skip storyboards (implies --skip-segues)
    #[arg(long)]
    skip_storyboards: bool,
    /// Skip segue accessors on storyboard classes
    #[arg(long)]
    skip_segues: bool,
}

impl SelectionArgs {
    fn apply(&self, config: &mut GeneratorConfig) {
        if self.skip_strings {
            config.resources.strings = false;
        }
        if self.skip_images {
            config.resources.images = false;
        }
        if self.skip_storyboards {
            config.resources.storyboards = false;
        }
        if self.skip_segues {
            config.resources.segues = false;
        }
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "resgen")]
#[command(about = "Typed resource accessor generator for Objective-C projects")]
#[command(long_about = "\
Typed resource accessor generator for Objective-C projects

Scans a project for resources and generates one strongly-typed accessor
class per kind, so client code never names a resource by string literal:

  [R.string.localizable keyA]                 // .strings tables
  [R.string.localizable keyFormat:3.14 value2:@\"x\"]
  [R.image testImage]                         // asset catalogs + loose images
  [[R.storyboard main] instantiateInitialViewController]

Discovered resources:

  project/
  ├── Base.lproj/Localizable.strings   # tables, per-locale values
  ├── en.lproj/Localizable.strings
  ├── Assets.xcassets/                 # *.imageset directories
  ├── icon@2x.png                      # loose images (scale suffix stripped)
  └── Main.storyboard                  # scenes and segues

Output is injected into template files through placeholder tokens, so
hand-written code around the tokens survives regeneration. Entries that
cannot be generated (unsupported format specifiers, unresolvable name
collisions, malformed lines) are skipped and reported; they never abort
the run.

Run 'resgen gen-config' to print a documented resgen.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project directory (overrides base_path from resgen.toml)
    #[arg(long, global = true)]
    base: Option<PathBuf>,

    /// Show per-entry detail
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan resources and write the generated accessor files
    Generate(GenerateArgs),
    /// Print the discovered resource inventory without generating
    Scan(ScanArgs),
    /// Validate that the project yields something to generate
    Check(SelectionArgs),
    /// Print a stock resgen.toml with all options documented
    GenConfig,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Output directory for the generated files (overrides resgen.toml)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Name of the generated aggregate class (overrides resgen.toml)
    #[arg(long)]
    class_name: Option<String>,
}

#[derive(Args)]
struct ScanArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Emit the inventory as JSON instead of the tree display
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => {
            let mut config = resolve_config(&cli.base)?;
            args.selection.apply(&mut config);
            if let Some(output_dir) = &args.output {
                config.output_dir = output_dir.display().to_string();
            }
            if let Some(class_name) = &args.class_name {
                config.class_name = class_name.clone();
            }
            config.validate()?;

            println!("==> Scanning {}", config.base_path);
            let resources = scan::scan(&config)?;
            output::print_scan_output(&resources, cli.verbose);

            println!("==> Generating {}.h / {}.m", config.class_name, config.class_name);
            let result = generate::generate(&config, &resources)?;
            output::print_generate_output(&result);
        }
        Command::Scan(args) => {
            let mut config = resolve_config(&cli.base)?;
            args.selection.apply(&mut config);

            let resources = scan::scan(&config)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&resources)?);
            } else {
                output::print_scan_output(&resources, cli.verbose);
            }
        }
        Command::Check(selection) => {
            let mut config = resolve_config(&cli.base)?;
            selection.apply(&mut config);

            println!("==> Checking {}", config.base_path);
            let resources = scan::scan(&config)?;
            output::print_scan_output(&resources, cli.verbose);
            if resources.is_empty() {
                return Err("no usable resources for any enabled kind".into());
            }
            println!("==> Resources are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `resgen.toml` from the effective base directory; an explicit
/// `--base` wins over the file's own `base_path`.
fn resolve_config(base: &Option<PathBuf>) -> Result<GeneratorConfig, config::ConfigError> {
    let dir = base.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut config = config::load_config(&dir)?;
    if base.is_some() {
        config.base_path = dir.display().to_string();
    }
    Ok(config)
}
