use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "staffdir",
    version,
    about = "searchable employee directory",
    long_about = "Staffdir fetches a batch of generated employee profiles and lets you search the gallery, open a profile and step through the visible profiles.\n\nExamples:\n  staffdir\n  staffdir -n 24 --nat us,gb\n  staffdir -x 'search an' -x 'open 1' -x next -o page.html\n  staffdir --from-file users.json\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the final page to a file (format inferred from extension)."
    )]
    pub output: Option<String>,

    #[arg(
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output file format (text, json or html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.staffdir/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'F',
        long = "ff",
        visible_alias = "from-file",
        value_name = "FILE",
        help_heading = "Input",
        help = "Load records from a saved provider response instead of the network."
    )]
    pub from_file: Option<String>,

    #[arg(
        short = 'e',
        long = "ep",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Provider",
        help = "Random User Generator endpoint."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'n',
        long = "rs",
        visible_alias = "results",
        value_name = "N",
        help_heading = "Provider",
        help = "Number of records to request (1-5000)."
    )]
    pub results: Option<u32>,

    #[arg(
        long = "nat",
        visible_alias = "nationalities",
        value_name = "CODES",
        help_heading = "Provider",
        help = "Nationality codes to request (comma-separated, e.g. us,gb)."
    )]
    pub nationalities: Option<String>,

    #[arg(
        short = 't',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'x',
        long = "cmd",
        visible_alias = "command",
        value_name = "COMMAND",
        action = ArgAction::Append,
        help_heading = "Session",
        help = "Run a directory command instead of reading stdin (repeatable, e.g. -x 'search an' -x 'open 1')."
    )]
    pub command: Vec<String>,
}
