use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use yptr::config::Config;
use yptr::document::node::YamlNode;
use yptr::document::{parse_yaml, to_yaml_stream_string, to_yaml_string};
use yptr::file::{load_yaml_source, load_yaml_stream_source, save_yaml_documents};
use yptr::pointer::{find, find_all, insert, validate_json_pointer};

/// yptr - extended JSON Pointer for YAML files
#[derive(Parser)]
#[command(name = "yptr")]
#[command(version)]
#[command(about = "Find and insert YAML nodes with extended JSON Pointers", long_about = None)]
struct Cli {
    /// Indentation width for YAML output (default: from config, 4)
    #[arg(long, global = true)]
    indent: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the node a pointer refers to
    Find {
        /// YAML file to read, or `-` for stdin
        file: String,
        /// Pointer such as /spec/containers/~{"name":"app"}/image
        pointer: String,
        /// Print every match instead of requiring exactly one
        #[arg(short, long)]
        all: bool,
        /// Prefix each match with its line:column in the source
        #[arg(short, long)]
        position: bool,
        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Insert a YAML value at a pointer without overwriting existing content
    ///
    /// The value goes into the first document; later documents of a
    /// multi-document file are written back unchanged.
    Insert {
        /// YAML file to read, or `-` for stdin
        file: String,
        /// Pointer to the insertion point
        pointer: String,
        /// Value to insert, parsed as YAML
        value: String,
        /// Write the result back to FILE
        #[arg(short, long, conflicts_with = "output")]
        in_place: bool,
        /// Write the result to PATH instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<String>,
    },
    /// Check pointer syntax
    Validate {
        pointer: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    if let Some(indent) = cli.indent {
        config.indent_size = indent;
    }

    match cli.command {
        Command::Find {
            file,
            pointer,
            all,
            position,
            json,
        } => {
            let doc = load_yaml_source(&file)?;
            let matches = if all {
                find_all(&doc, &pointer)?
            } else {
                vec![find(&doc, &pointer)?]
            };
            print_matches(&matches, all, position, json, &config)
        }
        Command::Insert {
            file,
            pointer,
            value,
            in_place,
            output,
        } => {
            if in_place && file == "-" {
                bail!("--in-place needs a file, not stdin");
            }
            let mut docs = load_yaml_stream_source(&file)?;
            let value = parse_yaml(&value).context("Failed to parse value")?;
            let first = docs
                .first_mut()
                .with_context(|| format!("No YAML document found in {}", file))?;
            insert(first, &pointer, value)?;

            if in_place {
                save_yaml_documents(&file, &docs, &config)
            } else if let Some(path) = output {
                save_yaml_documents(&path, &docs, &config)
            } else {
                print!("{}", to_yaml_stream_string(&docs, config.indent_size));
                Ok(())
            }
        }
        Command::Validate { pointer } => {
            validate_json_pointer(&pointer)?;
            println!("valid");
            Ok(())
        }
    }
}

fn print_matches(matches: &[&YamlNode], all: bool, position: bool, json: bool, config: &Config) -> Result<()> {
    if json {
        let values: Vec<serde_yaml::Value> = matches.iter().map(|n| serde_yaml::Value::from(*n)).collect();
        let text = if all {
            serde_json::to_string_pretty(&values)
        } else {
            serde_json::to_string_pretty(&values[0])
        }
        .context("Failed to convert match to JSON")?;
        println!("{}", text);
        return Ok(());
    }

    for node in matches {
        let text = to_yaml_string(node, config.indent_size);
        if position {
            let at = node
                .position()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("{} {}", at, text.trim_end());
        } else {
            print!("{}", text);
        }
    }
    Ok(())
}
