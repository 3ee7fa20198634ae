use clap::Parser;
use rosquery::{MemoryTransport, MenuQuery, QueryConfig, QueryError};
use std::path::PathBuf;
use std::sync::Arc;

/// Compile a menu query and print the sentence it would send. Nothing is sent to a device.
///
/// Steps are applied in order, each written as `[op:]name[=value]`:
/// `where` (default), `and`, `or`, `not`, `and-not`, `or-not`, `gt`, `lt`,
/// `exists`, `empty`, `opt`, `raw`.
#[derive(Parser, Debug)]
#[command(name = "rosq", version, about = "Compile device menu queries into API sentences", long_about = None)]
struct Cli {
    #[arg(help = "Menu path, e.g. /interface or \"ip address\"")]
    path: String,
    #[arg(help = "Filter steps, e.g. type=ether and:running=yes or-not:disabled=yes")]
    steps: Vec<String>,
    #[arg(long, default_value = "/print", help = "Action appended to the path (empty for none)")]
    action: String,
    #[arg(long, value_delimiter = ',', help = "Comma-separated fields to return")]
    select: Option<Vec<String>>,
    #[arg(long, help = "Print the sentence as a JSON array")]
    json: bool,
    #[arg(long, help = "Reject filter expressions whose operators lack operands")]
    strict: bool,
    #[arg(long, help = "Path to a config file (TOML). If omitted, defaults and environment are used.")]
    config: Option<PathBuf>,
    #[arg(long, help = "Path to a log4rs YAML config")]
    log_config: Option<PathBuf>,
}

fn split_value(body: &str) -> (&str, &str) {
    body.split_once('=').unwrap_or((body, ""))
}

fn apply_step<T>(q: MenuQuery<T>, step: &str) -> Result<MenuQuery<T>, QueryError> {
    let (op, body) = match step.split_once(':') {
        Some((op, rest)) if !op.contains('=') => (op, rest),
        _ => ("where", step),
    };
    let (name, value) = split_value(body);
    let q = match op {
        "where" => q.where_((name, value)),
        "and" => q.and_where((name, value)),
        "or" => q.or_where((name, value)),
        "not" => q.where_not((name, value)),
        "and-not" => q.and_where_not((name, value)),
        "or-not" => q.or_where_not((name, value)),
        "gt" => q.where_higher(name, value),
        "lt" => q.where_lower(name, value),
        "exists" => q.where_exists(name),
        "empty" => q.where_empty(name),
        "opt" => q.option(name),
        "raw" => q.where_raw([body]),
        other => return Err(QueryError::Config(format!("unknown step operator: {other}"))),
    };
    Ok(q)
}

fn run(cli: Cli) -> Result<(), QueryError> {
    let mut cfg = match &cli.config {
        Some(p) => QueryConfig::from_file(p)?.with_env(),
        None => QueryConfig::from_env(),
    };
    if cli.strict {
        cfg.strict_expressions = true;
    }
    let strict = cfg.strict_expressions;
    let mut q = MenuQuery::with_config(Arc::new(MemoryTransport::new()), &cli.path, cfg);
    if let Some(fields) = cli.select {
        q = q.select(fields);
    }
    for step in &cli.steps {
        q = apply_step(q, step)?;
    }
    if strict {
        q.validate()?;
    }
    let words = q.full_query(&cli.action).into_words();
    if cli.json {
        println!("{}", serde_json::to_string(&words)?);
    } else {
        for w in words {
            println!("{w}");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Some(p) = &cli.log_config {
        let _ = rosquery::logger::init_path(p);
    } else if std::env::var_os("ROSQUERY_LOG_DIR").is_some() {
        let _ = rosquery::logger::configure_from_env();
    }
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(2);
    }
}
