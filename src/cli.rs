// File: ./src/cli.rs
//! Command-line parsing and help text for the `statfill` binary.
use crate::config::Preferences;
use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyArgs {
    /// `None` or `-` reads stdin.
    pub input: Option<PathBuf>,
    pub buffer: Option<String>,
    pub attributes: bool,
    pub resists: bool,
    pub clear: bool,
}

impl ApplyArgs {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref().is_none_or(|p| p.as_os_str() == "-")
    }

    /// Command-line flags switch features on over the stored preferences;
    /// they never switch a stored feature off.
    pub fn overlay(&self, prefs: &Preferences) -> Preferences {
        let mut merged = prefs.clone();
        if let Some(buffer) = &self.buffer {
            merged.min_buffer = buffer.clone();
        }
        merged.generic_attributes |= self.attributes;
        merged.generic_elemental_resists |= self.resists;
        merged.clear_before_apply |= self.clear;
        merged
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    ShowPrefs,
    SetPref { key: String, value: String },
    Apply(ApplyArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

/// Parses arguments, excluding the binary name.
pub fn parse_args<I, S>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut root = None;
    let mut verbose = false;
    let mut apply = ApplyArgs::default();
    let mut positional: Vec<String> = Vec::new();

    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" if positional.is_empty() => {
                return Ok(CliArgs {
                    root,
                    verbose,
                    command: Command::Help,
                });
            }
            "-r" | "--root" => match args.next() {
                Some(path) => root = Some(PathBuf::from(path)),
                None => bail!("--root expects a directory"),
            },
            "-v" | "--verbose" => verbose = true,
            "-b" | "--buffer" => match args.next() {
                Some(value) => apply.buffer = Some(value),
                None => bail!("--buffer expects a percentage"),
            },
            "-a" | "--attributes" => apply.attributes = true,
            "-e" | "--resists" => apply.resists = true,
            "-c" | "--clear" => apply.clear = true,
            flag if flag.starts_with('-') && flag != "-" => bail!("Unknown option '{}'", flag),
            other => positional.push(other.to_string()),
        }
    }

    let command = match positional.first().map(String::as_str) {
        Some("prefs") => match &positional[1..] {
            [] => Command::ShowPrefs,
            [set, key, value] if set == "set" => Command::SetPref {
                key: key.clone(),
                value: value.clone(),
            },
            _ => bail!("Usage: statfill prefs [set <key> <value>]"),
        },
        Some(_) if positional.len() > 1 => bail!("Expected at most one input file"),
        Some(path) => {
            apply.input = Some(PathBuf::from(path));
            Command::Apply(apply)
        }
        None => Command::Apply(apply),
    };

    Ok(CliArgs {
        root,
        verbose,
        command,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Statfill v{} - Turn pasted item text into trade search stat filters",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [<file>|-]", binary_name);
    println!("    {} prefs", binary_name);
    println!("    {} prefs set <key> <value>", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for preferences.");
    println!("    -b, --buffer <pct>    Lower every minimum by this percentage (0-100).");
    println!("    -a, --attributes      Group Strength/Dexterity/Intelligence stats.");
    println!("    -e, --resists         Group Fire/Cold/Lightning resistance stats.");
    println!("    -c, --clear           Clear the search form before applying filters.");
    println!("    -v, --verbose         Log each pipeline stage to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("Flags switch features on over the stored preferences.");
    println!("Events are printed to stdout as JSON lines; the status goes to stderr.");
    println!();
    println!("PREFERENCES:");
    for key in Preferences::KEYS {
        println!("    {}", key);
    }
    println!();
    println!("EXAMPLES:");
    println!("    {} item.txt", binary_name);
    println!("    xclip -o | {} --attributes --buffer 10", binary_name);
    println!("    {} prefs set generic_elemental_resists true", binary_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_reads_stdin() {
        let args = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(args.command, Command::Apply(ApplyArgs::default()));
        match args.command {
            Command::Apply(apply) => assert!(apply.reads_stdin()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn apply_flags_and_file() {
        let args = parse_args([
            "--root", "/tmp/sf", "-a", "--buffer", "12.5", "-v", "item.txt",
        ])
        .unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/tmp/sf")));
        assert!(args.verbose);
        let Command::Apply(apply) = args.command else {
            panic!("expected apply");
        };
        assert!(apply.attributes);
        assert!(!apply.resists);
        assert_eq!(apply.buffer.as_deref(), Some("12.5"));
        assert_eq!(apply.input, Some(PathBuf::from("item.txt")));
        assert!(!apply.reads_stdin());
    }

    #[test]
    fn dash_means_stdin() {
        let args = parse_args(["-"]).unwrap();
        let Command::Apply(apply) = args.command else {
            panic!("expected apply");
        };
        assert!(apply.reads_stdin());
    }

    #[test]
    fn prefs_subcommands() {
        assert_eq!(parse_args(["prefs"]).unwrap().command, Command::ShowPrefs);
        assert_eq!(
            parse_args(["prefs", "set", "min_buffer", "10"]).unwrap().command,
            Command::SetPref {
                key: "min_buffer".into(),
                value: "10".into()
            }
        );
        assert!(parse_args(["prefs", "set", "min_buffer"]).is_err());
    }

    #[test]
    fn rejects_unknown_and_incomplete_options() {
        assert!(parse_args(["--frobnicate"]).is_err());
        assert!(parse_args(["-x"]).is_err());
        assert!(parse_args(["--buffer"]).is_err());
        assert!(parse_args(["a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn overlay_only_turns_features_on() {
        let stored = Preferences {
            min_buffer: "5".into(),
            generic_elemental_resists: true,
            ..Default::default()
        };
        let flags = ApplyArgs {
            attributes: true,
            ..Default::default()
        };
        let merged = flags.overlay(&stored);
        assert_eq!(merged.min_buffer, "5");
        assert!(merged.generic_attributes);
        assert!(merged.generic_elemental_resists);
        assert!(!merged.clear_before_apply);

        let flags = ApplyArgs {
            buffer: Some("20".into()),
            ..Default::default()
        };
        assert_eq!(flags.overlay(&stored).min_buffer, "20");
    }
}
