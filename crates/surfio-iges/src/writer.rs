//! Fixed-width IGES record assembly.

use std::fs;
use std::path::Path;

use surfio_brep::{BsplineSurface, Compound};

use crate::error::{IgesError, Result};

const FILE_DATE: &str = "20260101.000000";
const ENTITY_BSPLINE_SURFACE: u32 = 128;

/// Settings written into the global section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IgesSettings {
    /// Units flag (2 = millimeters).
    pub units_flag: u32,
    /// Units name matching the flag.
    pub units_name: &'static str,
    /// Model space scale.
    pub scale: f64,
    /// Minimum model-space resolution.
    pub resolution: f64,
}

impl Default for IgesSettings {
    fn default() -> Self {
        Self {
            units_flag: 2,
            units_name: "MM",
            scale: 1.0,
            resolution: 1e-7,
        }
    }
}

/// Write a compound to an IGES file at `path`.
///
/// The model is assembled in memory first; nothing is written when the
/// compound holds no faces.
pub fn write_iges(
    compound: &Compound,
    settings: &IgesSettings,
    path: impl AsRef<Path>,
) -> Result<()> {
    let text = write_iges_to_buffer(compound, settings)?;
    fs::write(path, text)?;
    Ok(())
}

/// Build the IGES 5.3 text for a compound.
///
/// Fails with [`IgesError::EmptyCompound`] when there are no faces to
/// add to the model.
pub fn write_iges_to_buffer(compound: &Compound, settings: &IgesSettings) -> Result<String> {
    if compound.is_empty() {
        return Err(IgesError::EmptyCompound);
    }

    let start = ["surfio IGES 5.3 surface export".to_string()];
    let global = wrap_tokens(&global_parameters(settings), 72);

    let mut directory = Vec::with_capacity(compound.len() * 2);
    let mut parameter_chunks = Vec::new();
    for face in compound.faces() {
        let de_pointer = directory.len() + 1;
        let pd_pointer = parameter_chunks.len() + 1;
        let chunks = wrap_tokens(&surface_parameters(face.surface()), 64);
        directory.push(directory_record_one(pd_pointer));
        directory.push(directory_record_two(chunks.len()));
        for chunk in chunks {
            parameter_chunks.push((chunk, de_pointer));
        }
    }

    let mut out = String::new();
    for (index, content) in start.iter().enumerate() {
        out.push_str(&format!("{content:<72}S{:>7}\n", index + 1));
    }
    for (index, content) in global.iter().enumerate() {
        out.push_str(&format!("{content:<72}G{:>7}\n", index + 1));
    }
    for (index, content) in directory.iter().enumerate() {
        out.push_str(&format!("{content:<72}D{:>7}\n", index + 1));
    }
    for (index, (content, de_pointer)) in parameter_chunks.iter().enumerate() {
        out.push_str(&format!("{content:<64}{de_pointer:>8}P{:>7}\n", index + 1));
    }
    let totals = format!(
        "S{:>7}G{:>7}D{:>7}P{:>7}",
        start.len(),
        global.len(),
        directory.len(),
        parameter_chunks.len()
    );
    out.push_str(&format!("{totals:<72}T{:>7}\n", 1));
    Ok(out)
}

/// The 26 global-section parameters of IGES 5.3.
fn global_parameters(settings: &IgesSettings) -> Vec<String> {
    vec![
        "1H,".to_string(),
        "1H;".to_string(),
        hollerith("surfio"),
        hollerith("surfaces.igs"),
        hollerith("surfio"),
        hollerith("surfio 0.3"),
        "32".to_string(),
        "38".to_string(),
        "6".to_string(),
        "308".to_string(),
        "15".to_string(),
        hollerith("surfio"),
        format_real(settings.scale),
        settings.units_flag.to_string(),
        hollerith(settings.units_name),
        "1".to_string(),
        format_real(1.0),
        hollerith(FILE_DATE),
        format_real(settings.resolution),
        format_real(0.0),
        String::new(),
        String::new(),
        "11".to_string(),
        "0".to_string(),
        hollerith(FILE_DATE),
        String::new(),
    ]
}

/// Parameter data for one type 128 surface entity.
///
/// Layout follows the entity definition: counts and flags, both
/// expanded knot vectors, the weight grid, the pole grid (first
/// subscript changing fastest), then the parameter ranges.
fn surface_parameters(surface: &BsplineSurface) -> Vec<String> {
    let k1 = surface.n_u() - 1;
    let k2 = surface.n_v() - 1;
    let m1 = surface.degree_u();
    let m2 = surface.degree_v();
    let prop3 = if surface.is_polynomial() { 1 } else { 0 };

    let mut params = vec![
        ENTITY_BSPLINE_SURFACE.to_string(),
        k1.to_string(),
        k2.to_string(),
        m1.to_string(),
        m2.to_string(),
        "0".to_string(),
        "0".to_string(),
        prop3.to_string(),
        "0".to_string(),
        "0".to_string(),
    ];
    for &knot in surface.knots_expanded_u() {
        params.push(format_real(knot));
    }
    for &knot in surface.knots_expanded_v() {
        params.push(format_real(knot));
    }
    for v in 0..surface.n_v() {
        for u in 0..surface.n_u() {
            params.push(format_real(surface.weight(u, v)));
        }
    }
    for v in 0..surface.n_v() {
        for u in 0..surface.n_u() {
            let pole = surface.pole(u, v);
            params.push(format_real(pole.x));
            params.push(format_real(pole.y));
            params.push(format_real(pole.z));
        }
    }
    let (u0, u1, v0, v1) = surface.domain();
    params.push(format_real(u0));
    params.push(format_real(u1));
    params.push(format_real(v0));
    params.push(format_real(v1));
    params
}

fn directory_record_one(pd_pointer: usize) -> String {
    format!(
        "{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}",
        ENTITY_BSPLINE_SURFACE, pd_pointer, 0, 0, 0, 0, 0, 0, "00000000"
    )
}

fn directory_record_two(line_count: usize) -> String {
    format!(
        "{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}{:>8}",
        ENTITY_BSPLINE_SURFACE, 0, 0, line_count, 0, "", "", "SURF", 0
    )
}

/// Join parameters with the comma delimiter (semicolon last) and wrap
/// into lines of at most `width` columns, never splitting a value.
fn wrap_tokens(params: &[String], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for (index, param) in params.iter().enumerate() {
        let delimiter = if index + 1 == params.len() { ';' } else { ',' };
        let token = format!("{param}{delimiter}");
        if !current.is_empty() && current.len() + token.len() > width {
            lines.push(current);
            current = String::new();
        }
        current.push_str(&token);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn hollerith(value: &str) -> String {
    format!("{}H{}", value.len(), value)
}

fn format_real(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-4 {
        format!("{value:.1E}")
    } else {
        format!("{value:.6}")
    }
}
