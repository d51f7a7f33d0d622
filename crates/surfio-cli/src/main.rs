//! Command-line frontend for surfio.
//!
//! Exports JSON surface sets to STEP or IGES (the output extension
//! picks the format) and prints summaries of OBJ/STL mesh files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use surfio::NurbsSurface;

#[derive(Parser)]
#[command(name = "surfio")]
#[command(about = "NURBS surface export and mesh inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a JSON array of NURBS surfaces to STEP or IGES
    Export {
        /// Input JSON file holding an array of surfaces
        input: PathBuf,
        /// Output file; .step/.stp writes STEP, .igs/.iges writes IGES
        output: PathBuf,
    },
    /// Print a summary of a mesh file
    Info {
        /// Mesh file to inspect (.obj or .stl)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Export { input, output } => export(&input, &output),
        Commands::Info { file } => info(&file),
    }
}

fn export(input: &Path, output: &Path) -> Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let surfaces: Vec<NurbsSurface> =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", input.display()))?;

    let report = match extension(output).as_str() {
        "step" | "stp" => surfio::export_step(&surfaces, output)?,
        "igs" | "iges" => surfio::export_iges(&surfaces, output)?,
        other => bail!("unsupported output format: {other:?}"),
    };

    println!(
        "Wrote {} face(s) to {}",
        report.faces_written,
        output.display()
    );
    if !report.skipped.is_empty() {
        println!("Skipped surface indices: {:?}", report.skipped);
    }
    Ok(())
}

fn info(file: &Path) -> Result<()> {
    let mesh = match extension(file).as_str() {
        "obj" => surfio::import_obj(file)?,
        "stl" => surfio::import_stl(file)?,
        other => bail!("unsupported mesh format: {other:?}"),
    };

    println!("Mesh: {}", file.display());
    println!("  Vertices:       {}", mesh.vertices.len());
    println!("  UVs:            {}", mesh.uvs.len());
    println!("  Normals:        {}", mesh.normals.len());
    println!("  Faces:          {}", mesh.faces.len());
    println!("  UV indices:     {}", mesh.uv_indices.len());
    println!("  Normal indices: {}", mesh.normal_indices.len());
    Ok(())
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}
