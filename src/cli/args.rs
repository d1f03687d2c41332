//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::ProcessingOptions;

/// Internationalized domain name conversion: UTS-46 mapping, label validation and Punycode
#[derive(Parser, Debug)]
#[command(name = "idnconv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Print one JSON object per domain
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory searched for .idnconv.toml (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert domains to ASCII (xn-- labels)
    ToAscii(ConvertArgs),

    /// Convert domains to Unicode
    ToUnicode(ConvertArgs),

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Domains to convert (read from stdin, one per line, when omitted)
    pub domains: Vec<String>,

    #[command(flatten)]
    pub flags: OptionFlags,
}

/// Processing flags overriding the configured options.
#[derive(Args, Debug, Default, Clone)]
pub struct OptionFlags {
    /// Use transitional mapping for ß, ς, ZWJ and ZWNJ
    #[arg(long, conflicts_with = "nontransitional")]
    pub transitional: bool,

    /// Use nontransitional mapping (the default)
    #[arg(long)]
    pub nontransitional: bool,

    /// Allow ASCII characters outside [a-z0-9-]
    #[arg(long)]
    pub no_std3: bool,

    /// Skip the hyphen placement rules
    #[arg(long)]
    pub no_check_hyphens: bool,

    /// Skip the bidi rule
    #[arg(long)]
    pub no_check_bidi: bool,

    /// Skip the joiner context rules
    #[arg(long)]
    pub no_check_joiners: bool,

    /// Allow ASCII domains longer than 253 octets
    #[arg(long)]
    pub no_verify_dns_length: bool,
}

impl OptionFlags {
    /// Apply the flags that were given on top of `base`.
    pub fn apply(&self, base: ProcessingOptions) -> ProcessingOptions {
        let mut options = base;
        if self.transitional {
            options = options.transitional(true);
        }
        if self.nontransitional {
            options = options.transitional(false);
        }
        if self.no_std3 {
            options = options.use_std3_ascii_rules(false);
        }
        if self.no_check_hyphens {
            options = options.check_hyphens(false);
        }
        if self.no_check_bidi {
            options = options.check_bidi(false);
        }
        if self.no_check_joiners {
            options = options.check_joiners(false);
        }
        if self.no_verify_dns_length {
            options = options.verify_dns_length(false);
        }
        options
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
