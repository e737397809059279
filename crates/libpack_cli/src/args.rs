use std::path::PathBuf;

use clap::{ArgAction, Parser};
use libpack::{OutputFormat, Platform};

#[derive(Parser)]
#[command(name = "libpack", version, about = "Bundle a library into es, cjs, umd and iife files", long_about = None)]
pub struct Commands {
  /// Path of the configuration file. Defaults to `libpack.config.json` in the project root.
  #[clap(long, short = 'c')]
  pub config: Option<PathBuf>,

  /// Project root. Relative paths in the configuration are resolved against it.
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, short = 'e')]
  pub entry: Option<String>,

  /// Library name, used for `[name]` in file names and as the umd/iife global.
  #[clap(long, short = 'n')]
  pub name: Option<String>,

  /// File name template, e.g. `[name].[format].js`.
  #[clap(long)]
  pub file_name: Option<String>,

  #[clap(long, short = 'f', action = ArgAction::Append)]
  pub format: Vec<OutputFormat>,

  #[clap(long, action = ArgAction::Append)]
  pub external: Vec<String>,

  /// Global variable of an external, e.g. `--global vue=Vue`.
  #[clap(long = "global", short = 'g', action = ArgAction::Append, value_parser = parse_global)]
  pub globals: Vec<(String, String)>,

  #[clap(long, short = 'd')]
  pub out_dir: Option<String>,

  /// Directory copied verbatim into the output directory.
  #[clap(long)]
  pub public_dir: Option<String>,

  #[clap(long, short = 'm')]
  pub minify: bool,

  #[clap(long)]
  pub platform: Option<Platform>,

  /// `-v` for debug logs, `-vv` for trace logs.
  #[clap(long, short = 'v', action = ArgAction::Count)]
  pub verbose: u8,

  /// Only print errors.
  #[clap(long, short = 's')]
  pub silent: bool,
}

fn parse_global(value: &str) -> Result<(String, String), String> {
  match value.split_once('=') {
    Some((module, global)) if !module.is_empty() && !global.is_empty() => {
      Ok((module.to_string(), global.to_string()))
    }
    _ => Err(format!("expected `<module>=<global>`, got `{value}`")),
  }
}

#[test]
fn test_parse_global() {
  assert_eq!(parse_global("vue=Vue"), Ok(("vue".to_string(), "Vue".to_string())));
  assert_eq!(
    parse_global("@acme/ui=Acme.Ui"),
    Ok(("@acme/ui".to_string(), "Acme.Ui".to_string()))
  );
  assert!(parse_global("vue").is_err());
}
