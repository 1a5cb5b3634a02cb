use anyhow::{Context, Result, bail};
use std::{env, fs, path::PathBuf, process};
use unicode_preview_config::Config;
use unicode_preview_engine::{
    Aligner, Cursor, Mapper, MatchTuning, StructuralLcsAligner, create_mapping_with,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Query {
    Cursor(Cursor),
    Line(usize),
    Lines,
    Sourcemap,
}

#[derive(Debug, PartialEq)]
struct Options {
    source: PathBuf,
    rendered: PathBuf,
    query: Query,
    structural: bool,
}

fn usage(program_name: &str) -> String {
    format!(
        "Usage: {program_name} <source-file> <rendered-file> \
         [--cursor LINE:COL | --line N | --lines | --sourcemap] [--structural]"
    )
}

fn parse_cursor(value: &str) -> Result<Cursor> {
    let Some((line, column)) = value.split_once(':') else {
        bail!("Expected LINE:COL for --cursor, got '{value}'");
    };
    let line = line
        .parse()
        .with_context(|| format!("Invalid cursor line '{line}'"))?;
    let column = column
        .parse()
        .with_context(|| format!("Invalid cursor column '{column}'"))?;
    Ok(Cursor::new(line, column))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options> {
    let mut args = args.into_iter();
    let mut positional = Vec::new();
    let mut query = None;
    let mut structural = false;

    while let Some(arg) = args.next() {
        let parsed = match arg.as_str() {
            "--cursor" => {
                let value = args.next().context("--cursor needs a LINE:COL value")?;
                Some(Query::Cursor(parse_cursor(&value)?))
            }
            "--line" => {
                let value = args.next().context("--line needs a line number")?;
                let line = value
                    .parse()
                    .with_context(|| format!("Invalid line number '{value}'"))?;
                Some(Query::Line(line))
            }
            "--lines" => Some(Query::Lines),
            "--sourcemap" => Some(Query::Sourcemap),
            "--structural" => {
                structural = true;
                None
            }
            flag if flag.starts_with("--") => bail!("Unknown option '{flag}'"),
            _ => {
                positional.push(PathBuf::from(arg));
                None
            }
        };

        if let Some(parsed) = parsed {
            if query.is_some() {
                bail!("Only one of --cursor, --line, --lines or --sourcemap may be given");
            }
            query = Some(parsed);
        }
    }

    let [source, rendered]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| anyhow::anyhow!("Expected exactly two files: <source-file> <rendered-file>"))?;

    Ok(Options {
        source,
        rendered,
        query: query.unwrap_or(Query::Lines),
        structural,
    })
}

fn load_tuning() -> Result<MatchTuning> {
    let config_path = Config::config_path();
    log::debug!("Config path: {}", config_path.display());
    match Config::load()? {
        Some(config) => {
            log::info!("Loaded matching tuning from {}", config_path.display());
            Ok(config.matching)
        }
        None => Ok(MatchTuning::default()),
    }
}

fn answer<A: Aligner>(mapper: &mut Mapper<A>, query: Query) -> Result<String> {
    let json = match query {
        Query::Cursor(cursor) => serde_json::to_string_pretty(&mapper.map_cursor(cursor))?,
        Query::Line(line) => serde_json::to_string_pretty(&mapper.map_line(line))?,
        Query::Lines => serde_json::to_string_pretty(&mapper.map_lines())?,
        Query::Sourcemap => serde_json::to_string_pretty(&mapper.sourcemap())?,
    };
    Ok(json)
}

fn run(options: &Options, tuning: MatchTuning) -> Result<String> {
    let source = fs::read_to_string(&options.source)
        .with_context(|| format!("Failed to read source file {}", options.source.display()))?;
    let rendered = fs::read_to_string(&options.rendered).with_context(|| {
        format!(
            "Failed to read rendered file {}",
            options.rendered.display()
        )
    })?;

    if options.structural {
        let aligner = StructuralLcsAligner::from_markdown(&source, &rendered);
        let mut mapper = Mapper::with_aligner(&source, &rendered, aligner, tuning);
        if options.query == Query::Sourcemap {
            let data = mapper.aligner().sourcemap(mapper.source(), mapper.target());
            return Ok(serde_json::to_string_pretty(&data)?);
        }
        answer(&mut mapper, options.query)
    } else {
        let mut mapper = create_mapping_with(&source, &rendered, tuning);
        answer(&mut mapper, options.query)
    }
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let program_name = env::args()
        .next()
        .unwrap_or_else(|| "unicode-preview-cli".to_string());

    if env::args().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", usage(&program_name));
        return;
    }

    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("{}", usage(&program_name));
            process::exit(1);
        }
    };
    log::debug!("{options:?}");

    match load_tuning().and_then(|tuning| run(&options, tuning)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Mapping failed: {e:#}");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
