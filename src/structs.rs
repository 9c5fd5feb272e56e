use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Create the configuration file if it does not exist or is broken.
    #[arg(long)]
    pub create_config: bool,

    /// Path of the configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: String,
}
