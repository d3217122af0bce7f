mod commands;
mod prompter;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use dq5save_core::{EditorConfig, Section};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::hex_utils::{parse_hex_address, parse_number};

#[derive(Parser)]
#[command(name = "dq5save")]
#[command(version, about = "DQ5 save editor")]
struct Cli {
    #[arg(short, long, default_value = "dq5save.toml")]
    config: PathBuf,

    /// Mask table, overriding the config
    #[arg(long, env = "DQ5SAVE_KEYS")]
    keys: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that writes the save
#[derive(clap::Args)]
struct WriteArgs {
    /// Write to this path instead of overwriting the save
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Do not keep a timestamped backup
    #[arg(long)]
    no_backup: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List decoded fields
    Show {
        save: PathBuf,
        #[arg(short, long, value_enum)]
        section: Option<SectionArg>,
        #[arg(long)]
        json: bool,
    },
    /// Set one or more fields (`<hex address>=<value>`)
    Set {
        save: PathBuf,
        #[arg(required = true)]
        assignments: Vec<String>,
        /// Nudge this field afterwards to bring the diff back to zero
        #[arg(short, long, value_parser = parse_hex_address)]
        adjust: Option<usize>,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Delete a bag slot and shift the rest up
    DeleteSlot {
        save: PathBuf,
        slot: usize,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Rename a party member (up to 4 characters)
    Rename {
        save: PathBuf,
        member: usize,
        name: String,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Decode a raw region to look for unknown fields
    Scan {
        save: PathBuf,
        #[arg(long, value_parser = parse_hex_address)]
        from: usize,
        #[arg(long, value_parser = parse_hex_address)]
        to: usize,
        #[arg(short, long, default_value_t = 1)]
        width: usize,
        #[arg(long, value_parser = parse_number, default_value = "0")]
        lower: u32,
        #[arg(long, value_parser = parse_number)]
        upper: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Dump mask keys from a save whose plaintext is all 0xFF
    DumpKeys {
        save: PathBuf,
        #[arg(short, long, default_value = "Keys.txt")]
        output: PathBuf,
    },
    /// Hexdump raw or decoded save bytes
    Hexdump {
        save: PathBuf,
        #[arg(value_parser = parse_hex_address)]
        address: usize,
        #[arg(short, long, default_value_t = 256)]
        size: usize,
        /// Remove masks before printing
        #[arg(short, long)]
        decoded: bool,
        #[arg(long)]
        ascii: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    Money,
    Bag,
    Party,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Money => Section::Money,
            SectionArg::Bag => Section::Bag,
            SectionArg::Party => Section::Party,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("dq5save=info".parse()?)
                .add_directive("dq5save_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = EditorConfig::load_or_default(&cli.config);
    if let Some(keys) = cli.keys {
        config.keys = keys;
    }

    match cli.command {
        Command::Show {
            save,
            section,
            json,
        } => commands::show::run(&config, &save, section.map(Section::from), json),
        Command::Set {
            save,
            assignments,
            adjust,
            write,
        } => commands::set::run(&config, &save, &assignments, adjust, &write.into()),
        Command::DeleteSlot { save, slot, write } => {
            commands::delete_slot::run(&config, &save, slot, &write.into())
        }
        Command::Rename {
            save,
            member,
            name,
            write,
        } => commands::rename::run(&config, &save, member, &name, &write.into()),
        Command::Scan {
            save,
            from,
            to,
            width,
            lower,
            upper,
            json,
        } => commands::scan::run(&config, &save, from, to, width, (lower, upper), json),
        Command::DumpKeys { save, output } => commands::dump_keys::run(&save, &output),
        Command::Hexdump {
            save,
            address,
            size,
            decoded,
            ascii,
        } => commands::hexdump::run(&config, &save, address, size, decoded, ascii),
    }
}

impl From<WriteArgs> for commands::WriteOptions {
    fn from(args: WriteArgs) -> Self {
        Self {
            out: args.out,
            assume_yes: args.yes,
            no_backup: args.no_backup,
        }
    }
}
