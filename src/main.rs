use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use md2docx::Config;

#[derive(Parser)]
#[command(name = "md2docx")]
#[command(about = "Convert Markdown files to Word documents")]
struct Cli {
    /// Input Markdown file, or a directory of .md files
    input: PathBuf,

    /// Output file (defaults to input name with .docx extension),
    /// or output directory when converting a directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Word template (.docx) supplying the styles
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Style-name configuration file
    #[arg(short, long, default_value = "md2docx.toml")]
    config: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config);

    let results = if cli.input.is_dir() {
        if let Some(out_dir) = &cli.output
            && let Err(e) = std::fs::create_dir_all(out_dir)
        {
            eprintln!("Error creating {}: {}", out_dir.display(), e);
            std::process::exit(1);
        }
        md2docx::convert_dir(
            &cli.input,
            cli.output.as_deref(),
            cli.template.as_deref(),
            &config,
        )
    } else {
        // An existing directory as -o means "put the document in there".
        let output = match &cli.output {
            Some(path) if path.is_dir() => Some(
                path.join(cli.input.file_name().unwrap_or_default())
                    .with_extension("docx"),
            ),
            other => other.clone(),
        };
        vec![md2docx::convert(
            &cli.input,
            output.as_deref(),
            cli.template.as_deref(),
            &config,
        )]
    };

    let mut failed = false;
    for result in &results {
        match &result.outcome {
            Ok(output) => println!("Created {}", output.display()),
            Err(e) => {
                eprintln!("Error converting {}: {}", result.input.display(), e);
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
}
