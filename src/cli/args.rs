use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "userfetch",
    version,
    about = "random-user API fetching and browsing tool",
    long_about = "Userfetch pulls randomly generated user records from the randomuser.me demo API and renders them as a table, with an interactive session for viewing, editing, and deleting records in memory.\n\nExamples:\n  userfetch -c 25\n  userfetch -c 100 --nat us,gb,ca,au --nd full\n  userfetch -c 50 -o users.html\n  userfetch -I\n\nTip: Use --config to persist fetch settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'c',
        long = "cnt",
        visible_alias = "count",
        value_name = "N",
        help_heading = "Fetch",
        help = "Number of records to fetch (0-1000, 0 clears)."
    )]
    pub count: Option<u32>,

    #[arg(
        long = "nat",
        visible_alias = "nationalities",
        value_name = "CSV",
        help_heading = "Fetch",
        help = "Nationality filter, comma-separated (e.g. us,gb,ca,au)."
    )]
    pub nat: Option<String>,

    #[arg(
        short = 'N',
        long = "nd",
        visible_alias = "name-display",
        value_name = "MODE",
        help_heading = "Fetch",
        help = "Name column mode (first, last, or full)."
    )]
    pub name_display: Option<String>,

    #[arg(
        long = "seed",
        value_name = "STR",
        help_heading = "Fetch",
        help = "Seed for a reproducible result set."
    )]
    pub seed: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        long = "api",
        visible_alias = "api-url",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Override the API endpoint (mirrors, tests)."
    )]
    pub api_url: Option<String>,

    #[arg(
        short = 'I',
        long = "it",
        visible_alias = "interactive",
        help_heading = "Session",
        help = "Start the interactive browse/edit session."
    )]
    pub interactive: bool,

    #[arg(
        long = "db",
        visible_alias = "debounce-ms",
        value_name = "MS",
        help_heading = "Session",
        help = "Debounce window for count input in milliseconds."
    )]
    pub debounce_ms: Option<u64>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.userfetch/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write fetched records to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, csv, or html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,
}
