mod args;
mod config;
mod logging;

use std::{path::PathBuf, process::ExitCode, time::Instant};

use ansi_term::Colour;
use clap::Parser;
use libpack::{BuildError, BundleOutput, Bundler, OutputAsset, OutputAssetKind};

use crate::{
  args::Commands,
  config::{load_config, merge_args, resolve_plugins},
};

#[allow(clippy::cast_precision_loss)]
fn print_output_assets(out_dir: &str, outputs: &[OutputAsset]) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content_as_bytes().len() as f64 / 1024.0);

    right = right.max(size.len());
    left = left.max(output.filename.len());

    assets.push((output.filename.as_str(), size, output.kind));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (filename, size, kind) in assets {
    let asset_type = match kind {
      OutputAssetKind::Chunk(format) => format.as_str(),
      OutputAssetKind::Public => "public",
    };
    let filename_len = filename.len();

    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint(format!("{out_dir}/")),
      color.paint(filename),
      "",
      dim.paint(format!("{asset_type:<6}")),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    );
  }
}

fn print_errors(errors: &BuildError) {
  for error in errors.iter() {
    eprintln!("{} [{}] {}", Colour::Red.paint("Error:"), error.stage(), error);
  }
}

async fn run(args: Commands) -> Result<(BundleOutput, String), BuildError> {
  let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let root = args.cwd.as_ref().map_or_else(|| current_dir.clone(), |cwd| current_dir.join(cwd));

  let config = load_config(&root, args.config.as_deref())?;
  let plugins = resolve_plugins(&config.plugins)?;
  let options = merge_args(config.options, args, root);

  let bundler = Bundler::with_plugins(options, plugins)?;
  let out_dir = bundler
    .options()
    .out_dir
    .strip_prefix(&bundler.options().cwd)
    .map_or_else(|_| bundler.options().out_dir.display().to_string(), |dir| dir.display().to_string());
  let output = bundler.write().await?;
  Ok((output, out_dir))
}

#[tokio::main]
async fn main() -> ExitCode {
  let args = Commands::parse();
  let silent = args.silent;
  logging::init(args.verbose, silent);

  let start = Instant::now();
  match run(args).await {
    Ok((output, out_dir)) => {
      if !silent {
        for warning in &output.warnings {
          eprintln!("{} {}", Colour::Yellow.paint("Warning:"), warning);
        }

        print_output_assets(&out_dir, &output.assets);

        let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
        println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
      }
      ExitCode::SUCCESS
    }
    Err(errors) => {
      print_errors(&errors);
      ExitCode::FAILURE
    }
  }
}
