//=====================================================================
// CLI entry point: parse the input document, resolve every referenced
// ACE table through xsdir, assemble materials and geometry, and run
// the criticality simulation. One positional argument, the input file
// path; exit 0 on success, 1 on any setup or I/O failure, matching the
// original engine's command-line contract.
//=====================================================================
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use kcode_mc::config::InputSpec;
use kcode_mc::{build_geometry, setup_materials, Isotope, KeffSimulation, Logger, Material, Settings, Source};

#[derive(Parser, Debug)]
#[command(author, version, about = "Continuous-energy Monte Carlo neutron transport and k-eff estimation")]
struct Args {
    /// Input document describing materials, geometry, source and settings (JSON).
    input: PathBuf,

    /// Duplicate every logged message to this file as well as the console.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let logger = match &args.log_file {
        Some(path) => Logger::with_output_file(path).unwrap_or_else(|_| Logger::new()),
        None => Logger::new(),
    };

    if let Err(err) = run(&args, &logger).await {
        logger.error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn run(args: &Args, logger: &Logger) -> Result<()> {
    logger.bmsg("kcode-mc starting");

    let text = std::fs::read_to_string(&args.input).with_context(|| format!("reading input file {}", args.input.display()))?;
    let input: InputSpec = serde_json::from_str(&text).context("parsing input document")?;

    let table_names: HashSet<&str> = input.materials.iter().flat_map(|m| m.isotopes.keys()).map(String::as_str).collect();
    logger.msg(&format!(" - {} materials reference {} distinct isotopes", input.materials.len(), table_names.len()));

    let xsdir = kcode_mc::Xsdir::load_default(logger).context("loading xsdir")?;
    let mut isotopes: HashMap<String, Arc<Isotope>> = HashMap::with_capacity(table_names.len());
    for table_name in table_names {
        let path = xsdir.resolve(table_name).with_context(|| format!("resolving table {table_name}"))?;
        let isotope = Isotope::from_PACE(&path).await.with_context(|| format!("loading ACE table {table_name}"))?;
        isotopes.insert(table_name.to_string(), Arc::new(isotope));
    }
    logger.ok(&format!(" - loaded {} isotopes", isotopes.len()));

    let mut materials = Vec::with_capacity(input.materials.len());
    let mut material_index = HashMap::with_capacity(input.materials.len());
    for spec in &input.materials {
        let material = Material::from_spec(spec, &isotopes).with_context(|| format!("building material {}", spec.id))?;
        material_index.insert(spec.id.clone(), materials.len());
        materials.push(material);
    }

    let (mut geometry, geometry_index) = build_geometry(&input.geometry).context("building geometry")?;
    setup_materials(&mut geometry, &geometry_index, &material_index).context("resolving cell materials")?;
    logger.ok(&format!(" - geometry: {} surfaces, {} cells, {} universes", geometry.surfaces.len(), geometry.cells.len(), geometry.universes.len()));

    let source = Source::from_spec(&input.source).context("building source")?;
    let settings = Settings::from_spec(&input.settings);

    let simulation = KeffSimulation::new(&geometry, &materials, &source, settings, logger.clone());
    let estimate = simulation.run();

    logger.bok(&format!(
        "k-eff = {:.5} +/- {:.5} over {} active batches",
        estimate.mean, estimate.std_dev, estimate.active_batches
    ));
    let lost = simulation.diagnostics.domain_errors.load(std::sync::atomic::Ordering::Relaxed);
    if lost > 0 {
        logger.warn(&format!("{lost} histories were abandoned on a domain error"));
    }

    Ok(())
}
