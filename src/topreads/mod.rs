/**
this module handles parameters, logging and the run of topqual
**/

use clap::{load_yaml, App, ArgMatches};
use log::{info, LevelFilter};
use serde_derive::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{Result, TopqError};
use crate::fastq_io::{read_records, write_records};
use crate::quality::PhredEncoding;
use crate::select::{select_top_summarized, SelectionSummary};

pub const DEFAULT_TOP_N: i64 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub input: String,
    pub output: String,
    pub top_n: i64,
    pub encoding: PhredEncoding,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl Params {
    pub fn new(input: &str, output: &str) -> Self {
        Params {
            input: input.to_string(),
            output: output.to_string(),
            top_n: DEFAULT_TOP_N,
            encoding: PhredEncoding::default(),
            verbose: true,
            log_file: None,
        }
    }

    /// Number of reads to keep; anything at or below zero keeps none.
    pub fn limit(&self) -> usize {
        usize::try_from(self.top_n).unwrap_or(0)
    }
}

/// Keys accepted in a `--config` TOML file.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    input: Option<String>,
    output: Option<String>,
    top_n: Option<i64>,
    encoding: Option<String>,
    log_file: Option<PathBuf>,
    quiet: Option<bool>,
}

fn read_config(path: &Path) -> Result<ConfigFile> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

fn parse_top_n(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| TopqError::Config(format!("top_n must be an integer, got '{}'", value)))
}

/// Builds `Params` from parsed flags, layered over an optional config file.
pub fn params_from_matches(matches: &ArgMatches) -> Result<Params> {
    let config = match matches.value_of("config") {
        Some(path) => read_config(Path::new(path))?,
        None => ConfigFile::default(),
    };

    let input = matches
        .value_of("input")
        .map(str::to_string)
        .or(config.input);
    let output = matches
        .value_of("output")
        .map(str::to_string)
        .or(config.output);
    let top_n = match matches.value_of("top_n") {
        Some(n) => parse_top_n(n)?,
        None => config.top_n.unwrap_or(DEFAULT_TOP_N),
    };
    let encoding = match matches.value_of("encoding").map(str::to_string).or(config.encoding) {
        Some(e) => e.parse::<PhredEncoding>()?,
        None => PhredEncoding::default(),
    };
    let log_file = matches.value_of("log").map(PathBuf::from).or(config.log_file);
    let verbose = !(matches.is_present("quiet") || config.quiet.unwrap_or(false));

    let params = Params {
        input: input.ok_or_else(|| TopqError::Config("no input file given (--input)".to_string()))?,
        output: output
            .ok_or_else(|| TopqError::Config("no output file given (--output)".to_string()))?,
        top_n,
        encoding,
        verbose,
        log_file,
    };
    check_params(params)
}

/// Parses an explicit argument list, first element being the program name.
pub fn params_from_args<I, T>(args: I) -> Result<Params>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let yaml = load_yaml!("../cli.yml");
    let matches = App::from_yaml(yaml).get_matches_from_safe(args)?;
    params_from_matches(&matches)
}

pub fn load_params() -> Result<Params> {
    let yaml = load_yaml!("../cli.yml");
    let matches = App::from_yaml(yaml).get_matches();
    params_from_matches(&matches)
}

pub fn check_params(params: Params) -> Result<Params> {
    if params.input.trim().is_empty() {
        return Err(TopqError::Config("input path is empty".to_string()));
    }
    if params.output.trim().is_empty() {
        return Err(TopqError::Config("output path is empty".to_string()));
    }
    if params.input != "-" && !Path::new(&params.input).exists() {
        return Err(TopqError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input file '{}' does not exist", params.input),
        )));
    }
    Ok(params)
}

fn same_file(a: &str, b: &str) -> bool {
    if a == "-" || b == "-" {
        return false;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn init_logging(params: &Params) -> Result<()> {
    let term_level = if params.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(log_file) = &params.log_file {
        loggers.push(WriteLogger::new(
            LevelFilter::Info,
            Config::default(),
            File::create(log_file)?,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

/// Reads all of `params.input`, keeps the best reads and writes them.
///
/// Input and output may name the same file: the input is fully read and
/// closed before the output is opened.
pub fn run(params: &Params) -> Result<SelectionSummary> {
    if same_file(&params.input, &params.output) {
        info!("Output replaces input '{}'", params.input);
    }
    info!(
        "Reading '{}' ({}), keeping top {}",
        params.input,
        params.encoding,
        params.limit()
    );
    let records = read_records(&params.input, params.encoding)?;
    let (top, summary) = select_top_summarized(records, params.limit());
    info!("Writing {} reads to '{}'", top.len(), params.output);
    write_records(&top, &params.output)?;
    Ok(summary)
}

pub fn topreads_run() -> Result<()> {
    let start = Instant::now();
    let params = load_params()?;
    init_logging(&params)?;
    let summary = run(&params)?;
    info!("{}", summary);
    info!("Time elapsed is: {:?}", start.elapsed());
    Ok(())
}
