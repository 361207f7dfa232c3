use clap::{Parser, ValueEnum};

// Some defaults; some of which can be overriden via CLI args
const CONFIG_FILE_PATH: &str = "./detector.json";

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum InputFormat {
    Json,
    Msgpack,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to load detector config
    #[arg(long="configPath",default_value_t=String::from(CONFIG_FILE_PATH))]
    pub config_path: String,

    /// Pose frames produced by an external pose-estimation run, in time order
    #[arg(long = "input")]
    pub input: String,

    #[arg(long = "format", value_enum, default_value_t = InputFormat::Json)]
    pub format: InputFormat,

    /// Override the stability threshold (px/s) from the config file
    #[arg(long = "threshold")]
    pub threshold: Option<f64>,

    /// Write detected cut points here as JSON; otherwise print them to stdout
    #[arg(long = "output")]
    pub output: Option<String>,

    /// Write the effective config back to the config path
    #[arg(long = "saveConfig")]
    pub save_config: bool,

    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,
}
