use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spdlog::error;

use postmatter::config::Config;
use postmatter::logger::configure_logger;
use postmatter::FrontmatterFormat;

use crate::check::check_cmd;
use crate::config::open_config;
use crate::convert::convert_cmd;
use crate::list::list_cmd;
use crate::new::new_cmd;

mod check;
mod config;
mod convert;
mod list;
mod new;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to postmatter.toml in the current or user config dir
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Posts directory, overriding the configuration
    #[arg(short, long, global = true)]
    posts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Loads every publishable post and reports the broken ones
    Check,
    /// Lists publishable posts
    List(ListArgs),
    /// Creates a new draft post
    New(NewArgs),
    /// Writes a post again using another frontmatter format
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Also list drafts
    #[arg(short, long)]
    drafts: bool,
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    author: Option<String>,

    /// Frontmatter format. Defaults to the configured one
    #[arg(short, long)]
    format: Option<FrontmatterFormat>,

    /// Tags, repeated or comma separated
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Categories, repeated or comma separated
    #[arg(long = "category")]
    categories: Vec<String>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Post to convert
    path: PathBuf,

    /// Target frontmatter format
    #[arg(short, long)]
    to: FrontmatterFormat,

    /// Delete the original file after writing the new one
    #[arg(long)]
    remove: bool,
}

fn main() {
    let cli = Cli::parse();

    let config: Config = match open_config(cli.config.clone(), cli.posts_dir.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = configure_logger(&config) {
        eprintln!("Error configuring log: {}", e);
    }

    let res = match cli.command {
        Command::Check => check_cmd(&config),
        Command::List(args) => list_cmd(&config, args),
        Command::New(args) => new_cmd(&config, args),
        Command::Convert(args) => convert_cmd(&config, args),
    };

    if let Err(e) = res {
        error!("{:#}", e);
        spdlog::default_logger().flush();
        std::process::exit(1);
    }
    spdlog::default_logger().flush();
}
