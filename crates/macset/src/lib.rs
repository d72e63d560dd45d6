//! Set algebra over JSON lists of MAC addresses.
//!
//! Every input file holds a JSON array of address strings, e.g.
//! `["78:4f:43:87:9e:f4","de:ad:be:ef:aa:bb"]`. A path of `-` reads stdin.
//! Results are written to stdout as the same kind of array; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use macs::{MacAddress, MacSet};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// MAC address set tool
#[derive(Parser, Debug)]
#[command(name = "macset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(short = 'l', long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical form of an address
    Parse { mac: String },

    /// Print a set file with duplicates removed and addresses canonicalized
    Normalize { file: PathBuf },

    /// Print every address found in either file
    Union { a: PathBuf, b: PathBuf },

    /// Print the addresses found in both files
    Intersect { a: PathBuf, b: PathBuf },

    /// Report whether a file holds an address (exit status 1 if not)
    Contains { file: PathBuf, mac: String },

    /// Print the number of distinct addresses in a file
    Count { file: PathBuf },
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// `contains` did not find the address.
    NotFound,
}

/// Runs `cli.command`, writing results to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Outcome> {
    match &cli.command {
        Command::Parse { mac } => {
            let mac = parse_arg(mac)?;
            writeln!(out, "{mac}")?;
        }
        Command::Normalize { file } => {
            let set = load_set(file)?;
            write_set(out, &set, cli.pretty)?;
        }
        Command::Union { a, b } => {
            let set = MacSet::union(&load_set(a)?, &load_set(b)?);
            write_set(out, &set, cli.pretty)?;
        }
        Command::Intersect { a, b } => {
            let set = MacSet::intersection(&load_set(a)?, &load_set(b)?);
            write_set(out, &set, cli.pretty)?;
        }
        Command::Contains { file, mac } => {
            let mac = parse_arg(mac)?;
            let found = load_set(file)?.contains(&mac);
            writeln!(out, "{found}")?;
            if !found {
                return Ok(Outcome::NotFound);
            }
        }
        Command::Count { file } => {
            writeln!(out, "{}", load_set(file)?.len())?;
        }
    }
    Ok(Outcome::Done)
}

fn parse_arg(mac: &str) -> Result<MacAddress> {
    MacAddress::parse(mac).with_context(|| format!("invalid address argument {mac:?}"))
}

/// Reads and decodes a set file, or stdin when `path` is `-`.
pub fn load_set(path: &Path) -> Result<MacSet> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    let set = MacSet::from_json(&json)
        .with_context(|| format!("failed to decode MAC set from {}", path.display()))?;
    info!(path = %path.display(), len = set.len(), "loaded MAC set");
    Ok(set)
}

fn write_set<W: Write>(out: &mut W, set: &MacSet, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(set)?
    } else {
        set.to_json()
    };
    debug!(len = set.len(), "writing MAC set");
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn set_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{json}").unwrap();
        file
    }

    fn run_args(args: &[&str]) -> Result<(Outcome, String)> {
        let cli = Cli::try_parse_from(std::iter::once("macset").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        let outcome = run(&cli, &mut out)?;
        Ok((outcome, String::from_utf8(out)?))
    }

    fn path(file: &NamedTempFile) -> &str {
        file.path().to_str().unwrap()
    }

    #[test]
    fn test_parse() {
        let (outcome, out) = run_args(&["parse", "78-4F-43-87-9E-F4"]).unwrap();
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(out, "78:4f:43:87:9e:f4\n");
    }

    #[test]
    fn test_parse_invalid() {
        let err = run_args(&["parse", "foo:bar"]).unwrap_err();
        assert_eq!(format!("{err:#}"), "invalid address argument \"foo:bar\": invalid MAC address format: foo:bar");
    }

    #[test]
    fn test_normalize() {
        let file = set_file(r#"["DE:AD:BE:EF:AA:BB","78:4f:43:87:9e:f4","de-ad-be-ef-aa-bb"]"#);
        let (_, out) = run_args(&["normalize", path(&file)]).unwrap();
        assert_eq!(out, "[\"78:4f:43:87:9e:f4\",\"de:ad:be:ef:aa:bb\"]\n");
    }

    #[test]
    fn test_normalize_pretty() {
        let file = set_file(r#"["de:ad:be:ef:aa:bb"]"#);
        let (_, out) = run_args(&["--pretty", "normalize", path(&file)]).unwrap();
        assert_eq!(out, "[\n  \"de:ad:be:ef:aa:bb\"\n]\n");
    }

    #[test]
    fn test_union_and_intersect() {
        let a = set_file(r#"["78:4f:43:87:9e:f4","de:ad:be:ef:aa:bb"]"#);
        let b = set_file(r#"["de:ad:be:ef:aa:bb","00:11:22:33:22:11"]"#);

        let (_, out) = run_args(&["union", path(&a), path(&b)]).unwrap();
        assert_eq!(
            out,
            "[\"00:11:22:33:22:11\",\"78:4f:43:87:9e:f4\",\"de:ad:be:ef:aa:bb\"]\n"
        );

        let (_, out) = run_args(&["intersect", path(&a), path(&b)]).unwrap();
        assert_eq!(out, "[\"de:ad:be:ef:aa:bb\"]\n");
    }

    #[test]
    fn test_contains() {
        let file = set_file(r#"["78:4f:43:87:9e:f4"]"#);

        let (outcome, out) = run_args(&["contains", path(&file), "78:4F:43:87:9E:F4"]).unwrap();
        assert_eq!((outcome, out.as_str()), (Outcome::Done, "true\n"));

        let (outcome, out) = run_args(&["contains", path(&file), "00:11:22:33:22:11"]).unwrap();
        assert_eq!((outcome, out.as_str()), (Outcome::NotFound, "false\n"));
    }

    #[test]
    fn test_count_empty() {
        let file = set_file("[]");
        let (_, out) = run_args(&["count", path(&file)]).unwrap();
        assert_eq!(out, "0\n");
    }

    #[test]
    fn test_bad_member_names_the_file() {
        let file = set_file(r#"["78:4f:43:87:9e:f4","foo:bar"]"#);
        let err = run_args(&["count", path(&file)]).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(path(&file)));
        assert!(message.ends_with("invalid MAC address format: foo:bar"));
    }

    #[test]
    fn test_missing_file() {
        let err = run_args(&["count", "/nonexistent/macs.json"]).unwrap_err();
        assert!(err.to_string().contains("failed to read /nonexistent/macs.json"));
    }
}
