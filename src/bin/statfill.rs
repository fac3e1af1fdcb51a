use anyhow::{Context, Result};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use statfill::cli::{self, ApplyArgs, Command};
use statfill::config::Preferences;
use statfill::context::{AppContext, StandardContext};
use statfill::controller::FilterController;
use statfill::sink::JsonLinesSink;
use std::io::Read;

fn main() -> Result<()> {
    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\nRun 'statfill --help' for usage.", e);
            std::process::exit(2);
        }
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let ctx = StandardContext::new(args.root);
    match args.command {
        Command::Help => {
            cli::print_help("statfill");
            Ok(())
        }
        Command::ShowPrefs => show_prefs(&ctx),
        Command::SetPref { key, value } => {
            let mut prefs = Preferences::load(&ctx)?;
            prefs.set(&key, &value)?;
            prefs.save(&ctx)?;
            eprintln!("Saved {} = {}", key, value);
            Ok(())
        }
        Command::Apply(apply) => run_apply(&ctx, &apply),
    }
}

fn show_prefs(ctx: &dyn AppContext) -> Result<()> {
    let prefs = Preferences::load(ctx)?;
    println!("# {}", Preferences::get_path_string(ctx)?);
    print!("{}", toml::to_string_pretty(&prefs)?);
    Ok(())
}

fn run_apply(ctx: &dyn AppContext, apply: &ApplyArgs) -> Result<()> {
    let text = read_input(apply)?;
    let prefs = apply.overlay(&Preferences::load(ctx)?);

    let outcome = prefs.pipeline_options().and_then(|options| {
        let controller = FilterController::new(options);
        let mut sink = JsonLinesSink::new(std::io::stdout().lock());
        controller.apply(&text, &mut sink)
    });

    match outcome {
        Ok(outcome) => {
            eprintln!("{}", outcome);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn read_input(apply: &ApplyArgs) -> Result<String> {
    if apply.reads_stdin() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read item text from stdin")?;
        return Ok(text);
    }
    let path = apply.input.as_deref().unwrap_or(std::path::Path::new("-"));
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read item text from '{}'", path.display()))
}
