use clap::{Parser, Subcommand};
use pixelveil::cli::{embed_file, extract_file, EmbedOptions, ExtractOptions, OutputOptions};
use pixelveil::container::{ContentType, KEY_DEFAULT};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("PIXELVEIL_VERSION");
const BUILD: &str = env!("PIXELVEIL_BUILD");
const PROFILE: &str = env!("PIXELVEIL_PROFILE");
const GIT_HASH: &str = env!("PIXELVEIL_GIT_HASH");

/// Combined version string (compile-time concatenation not possible, so we build at runtime)
fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "pixelveil")]
#[command(author, about = "Hide data in the relative pixel differences between images", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a file into a carrier image
    #[command(alias = "e")]
    Embed {
        /// Carrier image to hide the data in
        carrier: PathBuf,

        /// File containing the data to embed
        data: PathBuf,

        /// Output image path (lossless format, e.g. PNG)
        output: PathBuf,

        /// Encryption key; pass an empty string to embed unencrypted
        #[arg(short, long)]
        key: Option<String>,

        /// Content type tag: 'file', 'text' or 'data'
        #[arg(short, long, default_value = "file", value_parser = parse_content_type)]
        content: ContentType,

        /// Offset in the data file to start reading at
        #[arg(short, long, default_value = "0")]
        offset: u64,

        /// Number of bytes to read; 0 reads everything after the offset
        #[arg(short, long, default_value = "0")]
        length: u64,

        /// Print verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Do not print any output
        #[arg(short, long)]
        silent: bool,
    },

    /// Extract embedded data by diffing an image against its original
    #[command(alias = "x")]
    Extract {
        /// Modified image containing embedded data
        input: PathBuf,

        /// Original, untouched carrier image
        reference: PathBuf,

        /// Output file for the extracted data
        output: Option<PathBuf>,

        /// Decryption key; pass an empty string for unencrypted data
        #[arg(short, long)]
        key: Option<String>,

        /// Extract another image against the same reference and append it (repeatable)
        #[arg(short, long)]
        append: Vec<PathBuf>,

        /// Print the embedded text to stdout instead of writing a file
        #[arg(short, long)]
        print: bool,

        /// Print verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Do not print any output other than --print output
        #[arg(short, long)]
        silent: bool,
    },
}

fn parse_content_type(s: &str) -> Result<ContentType, String> {
    s.parse().map_err(|e| format!("{}", e))
}

/// Absent --key means the built-in default; only an explicit empty string
/// disables encryption.
fn resolve_key(key: Option<String>, output: OutputOptions) -> String {
    match key {
        Some(key) => {
            output.detail(&format!("Using specified key: '{}'", key));
            key
        }
        None => {
            output.detail(&format!(
                "No key specified, using default: '{}'",
                KEY_DEFAULT
            ));
            KEY_DEFAULT.into()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("pixelveil {}", get_version());
        return ExitCode::SUCCESS;
    }

    // Require a command if not showing version
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Show help when no command provided
            use clap::CommandFactory;
            Cli::command().print_help().unwrap();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Embed {
            carrier,
            data,
            output,
            key,
            content,
            offset,
            length,
            verbose,
            silent,
        } => {
            let out = OutputOptions { verbose, silent };
            let options = EmbedOptions {
                key: resolve_key(key, out),
                content_type: content,
                offset,
                length,
                output: out,
            };

            match embed_file(&carrier, &data, &output, &options) {
                Ok(()) => {
                    out.status(&format!(
                        "Successfully embedded file '{}' into '{}' and exported the result as '{}'.",
                        data.display(),
                        carrier.display(),
                        output.display()
                    ));
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }

        Commands::Extract {
            input,
            reference,
            output,
            key,
            append,
            print,
            verbose,
            silent,
        } => {
            let out = OutputOptions { verbose, silent };
            let options = ExtractOptions {
                key: resolve_key(key, out),
                append,
                print,
                output: out,
            };

            extract_file(&input, &reference, output.as_deref(), &options)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
