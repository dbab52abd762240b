use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct SwatchArgs {
    #[command(subcommand)]
    pub command: Option<CommandsEnum>,

    /// Logging filter, in `env_logger` syntax. Overrides `RUST_LOG`.
    #[clap(long, global = true)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Rasterize a swatch and write it to a PNG file.
    Render(ParameterFilePath),
    /// Rasterize a swatch and print the color at one point.
    Sample(SampleArgs),
}

#[derive(Debug, Args)]
pub struct ParameterFilePath {
    pub params_path: String,

    #[clap(long, short)]
    pub date_time_out: bool,
}

#[derive(Debug, Args)]
pub struct SampleArgs {
    pub params_path: String,

    /// Horizontal position along the row, on [0,1].
    #[clap(long, short)]
    pub value: f32,

    /// Row index, counting from the top.
    #[clap(long, short, default_value_t = 0)]
    pub row: usize,
}
