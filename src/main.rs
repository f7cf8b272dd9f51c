use clap::{Parser, Subcommand};
use simple_blog::{config, generate, output};
use std::path::PathBuf;

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
#[command(name = "simple-blog")]
#[command(about = "Static site generator for category-organized blogs")]
#[command(long_about = "\
Static site generator for category-organized blogs

Your filesystem is the data source. First-level directories under the
content root are categories; markdown files anywhere beneath them are posts.

Content structure:

  content/
  ├── tech/                        # Category
  │   ├── first-post.md            # Post (slug: first-post)
  │   ├── rust-tips/               # Assets dir named after the post
  │   │   ├── rust-tips.md         # ...which may hold the post itself
  │   │   └── diagram.png
  │   └── benchmarks.md
  └── life/                        # Another category
      └── hiking.md

Posts start with a metadata block; title and date are required:

  Title: My First Post
  Date: 2024/01/03
  Author: Jane Doe

  The **markdown** body starts after the first blank line.

Output: one page per post at /<slug>/, paginated listings per category at
/<category>/, and a paginated home feed at /, plus mirrored theme and post
assets. The output directory is cleared and rebuilt on every run.

Run 'simple-blog gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Path to the site config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full site into the output directory
    Build,
    /// Validate content (load + index) without writing any output
    Check,
    /// Clear the output directory
    Clean,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            println!("==> Building site from {}", config.content_dir);
            let summary = generate::generate(&config)?;
            output::print_generate_summary(&summary);
            println!("==> Site generated at {}", config.output_dir);
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            println!("==> Checking {}", config.content_dir);
            let index = generate::build_index(&config)?;
            output::print_inventory(&index);
            println!("==> Content is valid");
        }
        Command::Clean => {
            let config = config::load_config(&cli.config)?;
            let output_dir = PathBuf::from(&config.output_dir);
            if output_dir.is_dir() {
                std::fs::remove_dir_all(&output_dir)?;
            }
            println!("==> Cleared {}", config.output_dir);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
