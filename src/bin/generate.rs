//! Synthetic 7-segment dataset generator.
//!
//! Writes a noisy inputs file and an aligned one-hot outputs file. Existing
//! files are never overwritten unless `--overwrite` is given; a free name is
//! chosen instead. With `--manifest` the run parameters are saved so the same
//! files can be regenerated later with `--replay`.

use anyhow::{Context, Result};
use clap::Parser;
use sevenseg::cli::{fail, parse_args, positive_count};
use sevenseg::core::noise::validate_epsilon;
use sevenseg::data::{digit_histogram, seeded_rng};
use sevenseg::manifest::{load_manifest, save_manifest, DatasetManifest};
use sevenseg::prompt::prompt_value;
use sevenseg::telemetry::init_tracing;
use sevenseg::{generate, write_dataset, DatasetFormat, FilenameResolver, GeneratorConfig};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "sevenseg-generate",
    about = "Generate a noisy 7-segment LED dataset with one-hot labels"
)]
struct Args {
    /// Number of records to generate
    #[arg(long, allow_negative_numbers = true, required_unless_present_any = ["interactive", "replay"])]
    size: Option<i64>,

    /// Maximum noise added to each segment, in [0.0, 0.5)
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    epsilon: f32,

    /// Network inputs file (default depends on --format)
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Expected outputs file (default depends on --format)
    #[arg(long)]
    outputs: Option<PathBuf>,

    /// File layout
    #[arg(long, value_enum, default_value_t = DatasetFormat::Comma)]
    format: DatasetFormat,

    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Write to the exact paths even if they exist
    #[arg(long)]
    overwrite: bool,

    /// Save the run parameters to this JSON file
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Regenerate a dataset from a saved manifest
    #[arg(long, conflicts_with_all = ["size", "epsilon", "format", "seed", "interactive"])]
    replay: Option<PathBuf>,

    /// Prompt for the parameters on stdin
    #[arg(long)]
    interactive: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Fully resolved request: what to generate and where to put it.
struct Plan {
    config: GeneratorConfig,
    inputs: Option<PathBuf>,
    outputs: Option<PathBuf>,
}

fn main() {
    let args: Args = parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        fail(format!("{e:#}"));
    }
}

fn run(args: &Args) -> Result<()> {
    let plan = if let Some(path) = &args.replay {
        replay_plan(path)?
    } else if args.interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        interactive_plan(args, &mut stdin.lock(), &mut stdout)?
    } else {
        flag_plan(args)
    };
    plan.config.validate()?;

    let format = plan.config.format;
    let (inputs_path, outputs_path) = if args.overwrite {
        (
            plan.inputs.unwrap_or_else(|| format.default_inputs()),
            plan.outputs.unwrap_or_else(|| format.default_outputs()),
        )
    } else {
        let mut resolver = FilenameResolver::new(format.extension());
        (
            resolver.resolve(plan.inputs.as_deref(), &format.default_inputs())?,
            resolver.resolve(plan.outputs.as_deref(), &format.default_outputs())?,
        )
    };

    let (mut rng, seed) = seeded_rng(plan.config.seed);
    info!(
        size = plan.config.size,
        epsilon = plan.config.epsilon,
        seed,
        ?format,
        "generating dataset"
    );
    let records = generate(plan.config.size, plan.config.epsilon, &mut rng)?;
    write_dataset(&records, &inputs_path, &outputs_path, format)?;

    println!(
        "Wrote {} records to '{}' and '{}' (seed {seed})",
        records.len(),
        inputs_path.display(),
        outputs_path.display()
    );

    if let Some(manifest_path) = &args.manifest {
        let manifest = DatasetManifest {
            size: plan.config.size,
            epsilon: plan.config.epsilon,
            seed,
            format,
            inputs: inputs_path,
            outputs: outputs_path,
            digit_counts: digit_histogram(&records).to_vec(),
        };
        save_manifest(&manifest, manifest_path)
            .with_context(|| format!("saving manifest to {}", manifest_path.display()))?;
        println!("Manifest saved to '{}'", manifest_path.display());
    }

    Ok(())
}

fn flag_plan(args: &Args) -> Plan {
    let size = match args.size.map(|s| positive_count(s, "Dataset size")) {
        Some(Ok(size)) => size,
        Some(Err(msg)) => fail(msg),
        None => fail("--size is required"),
    };
    Plan {
        config: GeneratorConfig {
            size,
            epsilon: args.epsilon,
            format: args.format,
            seed: args.seed,
        },
        inputs: args.inputs.clone(),
        outputs: args.outputs.clone(),
    }
}

fn replay_plan(path: &Path) -> Result<Plan> {
    let manifest = load_manifest(path)
        .with_context(|| format!("loading manifest from {}", path.display()))?;
    info!(path = %path.display(), seed = manifest.seed, "replaying manifest");
    Ok(Plan {
        config: manifest.config(),
        inputs: Some(manifest.inputs),
        outputs: Some(manifest.outputs),
    })
}

fn interactive_plan<R: BufRead, W: Write>(args: &Args, input: &mut R, output: &mut W) -> Result<Plan> {
    let format = args.format;
    let defaults = GeneratorConfig::default();

    let size = prompt_value(
        input,
        output,
        "Dataset size",
        args.size.unwrap_or(defaults.size as i64),
        |&v| positive_count(v, "Dataset size").map(|_| ()),
    )?;
    let epsilon = prompt_value(input, output, "Maximum noise (epsilon)", args.epsilon, |&v| {
        validate_epsilon(v).map(|_| ()).map_err(|e| e.to_string())
    })?;
    let inputs = prompt_value(
        input,
        output,
        "Inputs file",
        path_default(args.inputs.as_deref(), &format.default_inputs()),
        |_| Ok(()),
    )?;
    let outputs = prompt_value(
        input,
        output,
        "Outputs file",
        path_default(args.outputs.as_deref(), &format.default_outputs()),
        |_| Ok(()),
    )?;

    Ok(Plan {
        config: GeneratorConfig {
            size: positive_count(size, "Dataset size").map_err(anyhow::Error::msg)?,
            epsilon,
            format,
            seed: args.seed,
        },
        inputs: Some(PathBuf::from(inputs)),
        outputs: Some(PathBuf::from(outputs)),
    })
}

fn path_default(requested: Option<&Path>, fallback: &Path) -> String {
    requested
        .unwrap_or(fallback)
        .to_string_lossy()
        .into_owned()
}
