//! Part 21 file assembly.

use std::fs;
use std::path::Path;

use surfio_brep::{BsplineSurface, Compound};
use surfio_math::Tolerance;

use crate::error::{Result, StepError};

const FILE_NAME: &str = "surfaces.stp";
const FILE_DATE: &str = "2026-01-01T00:00:00";

/// Monotonically increasing entity id allocator.
struct EntityCounter(u64);

impl EntityCounter {
    fn new() -> Self {
        EntityCounter(0)
    }

    fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// Write a compound to a STEP file at `path`.
///
/// The entity graph is built in memory first; nothing is written when
/// the transfer fails.
pub fn write_step(compound: &Compound, path: impl AsRef<Path>) -> Result<()> {
    let text = write_step_to_buffer(compound)?;
    fs::write(path, text)?;
    Ok(())
}

/// Build the Part 21 text for a compound.
///
/// Fails with [`StepError::EmptyCompound`] when there are no faces to
/// transfer.
pub fn write_step_to_buffer(compound: &Compound) -> Result<String> {
    if compound.is_empty() {
        return Err(StepError::EmptyCompound);
    }

    let mut buf = String::new();
    let mut eid = EntityCounter::new();

    buf.push_str("ISO-10303-21;\n");
    buf.push_str("HEADER;\n");
    buf.push_str("FILE_DESCRIPTION((''),'2;1');\n");
    buf.push_str(&format!(
        "FILE_NAME('{FILE_NAME}','{FILE_DATE}',(''),(''),'surfio','','');\n"
    ));
    buf.push_str("FILE_SCHEMA(('AUTOMOTIVE_DESIGN { 1 0 10303 214 1 1 1 1 }'));\n");
    buf.push_str("ENDSEC;\n");
    buf.push_str("DATA;\n");

    let mut face_ids = Vec::with_capacity(compound.len());
    for face in compound.faces() {
        let surface_id = write_surface(&mut buf, &mut eid, face.surface());
        let face_id = eid.next();
        buf.push_str(&format!(
            "#{face_id}=ADVANCED_FACE('',(),#{surface_id},.T.);\n"
        ));
        face_ids.push(face_id);
    }

    let shell = eid.next();
    buf.push_str(&format!("#{shell}=OPEN_SHELL('',({}));\n", id_list(&face_ids)));
    let model = eid.next();
    buf.push_str(&format!(
        "#{model}=SHELL_BASED_SURFACE_MODEL('',(#{shell}));\n"
    ));

    // Units and the uncertainty that anchors coincidence decisions.
    let confusion = compound
        .faces()
        .first()
        .map_or(Tolerance::DEFAULT.confusion, |face| face.tolerance());
    let length_unit = eid.next();
    buf.push_str(&format!(
        "#{length_unit}=(LENGTH_UNIT()NAMED_UNIT(*)SI_UNIT(.MILLI.,.METRE.));\n"
    ));
    let angle_unit = eid.next();
    buf.push_str(&format!(
        "#{angle_unit}=(NAMED_UNIT(*)PLANE_ANGLE_UNIT()SI_UNIT($,.RADIAN.));\n"
    ));
    let solid_angle_unit = eid.next();
    buf.push_str(&format!(
        "#{solid_angle_unit}=(NAMED_UNIT(*)SI_UNIT($,.STERADIAN.)SOLID_ANGLE_UNIT());\n"
    ));
    let uncertainty = eid.next();
    buf.push_str(&format!(
        "#{uncertainty}=UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE({confusion:.1E}),#{length_unit},'distance_accuracy_value','confusion accuracy');\n"
    ));
    let context = eid.next();
    buf.push_str(&format!(
        "#{context}=(GEOMETRIC_REPRESENTATION_CONTEXT(3)GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT((#{uncertainty}))GLOBAL_UNIT_ASSIGNED_CONTEXT((#{length_unit},#{angle_unit},#{solid_angle_unit}))REPRESENTATION_CONTEXT('Context #1','3D'));\n"
    ));
    let representation = eid.next();
    buf.push_str(&format!(
        "#{representation}=MANIFOLD_SURFACE_SHAPE_REPRESENTATION('',(#{model}),#{context});\n"
    ));

    // Product scaffolding anchoring the shape representation.
    let application = eid.next();
    buf.push_str(&format!(
        "#{application}=APPLICATION_CONTEXT('core data for automotive mechanical design processes');\n"
    ));
    let protocol = eid.next();
    buf.push_str(&format!(
        "#{protocol}=APPLICATION_PROTOCOL_DEFINITION('international standard','automotive_design',2000,#{application});\n"
    ));
    let product_context = eid.next();
    buf.push_str(&format!(
        "#{product_context}=PRODUCT_CONTEXT('',#{application},'mechanical');\n"
    ));
    let product = eid.next();
    buf.push_str(&format!(
        "#{product}=PRODUCT('Surfaces','Surfaces','',(#{product_context}));\n"
    ));
    let formation = eid.next();
    buf.push_str(&format!(
        "#{formation}=PRODUCT_DEFINITION_FORMATION('','',#{product});\n"
    ));
    let definition_context = eid.next();
    buf.push_str(&format!(
        "#{definition_context}=PRODUCT_DEFINITION_CONTEXT('part definition',#{application},'design');\n"
    ));
    let definition = eid.next();
    buf.push_str(&format!(
        "#{definition}=PRODUCT_DEFINITION('design','',#{formation},#{definition_context});\n"
    ));
    let shape = eid.next();
    buf.push_str(&format!(
        "#{shape}=PRODUCT_DEFINITION_SHAPE('','',#{definition});\n"
    ));
    let shape_representation = eid.next();
    buf.push_str(&format!(
        "#{shape_representation}=SHAPE_DEFINITION_REPRESENTATION(#{shape},#{representation});\n"
    ));

    buf.push_str("ENDSEC;\n");
    buf.push_str("END-ISO-10303-21;\n");
    Ok(buf)
}

/// Emit the pole grid and the surface entity, returning the surface id.
///
/// Polynomial surfaces (all weights equal) become a plain
/// `B_SPLINE_SURFACE_WITH_KNOTS`; rational ones need the Part 21 complex
/// entity carrying `RATIONAL_B_SPLINE_SURFACE` with the weight grid.
fn write_surface(buf: &mut String, eid: &mut EntityCounter, surface: &BsplineSurface) -> u64 {
    let mut rows = Vec::with_capacity(surface.n_u());
    for u in 0..surface.n_u() {
        let mut row = Vec::with_capacity(surface.n_v());
        for v in 0..surface.n_v() {
            let pole = surface.pole(u, v);
            let point_id = eid.next();
            buf.push_str(&format!(
                "#{point_id}=CARTESIAN_POINT('',({:.6},{:.6},{:.6}));\n",
                pole.x, pole.y, pole.z
            ));
            row.push(point_id);
        }
        rows.push(format!("({})", id_list(&row)));
    }
    let points = rows.join(",");
    let mults_u = int_list(surface.mults_u());
    let mults_v = int_list(surface.mults_v());
    let knots_u = real_list(surface.knots_u());
    let knots_v = real_list(surface.knots_v());
    let du = surface.degree_u();
    let dv = surface.degree_v();

    let surface_id = eid.next();
    if surface.is_polynomial() {
        buf.push_str(&format!(
            "#{surface_id}=B_SPLINE_SURFACE_WITH_KNOTS('',{du},{dv},({points}),.UNSPECIFIED.,.F.,.F.,.F.,({mults_u}),({mults_v}),({knots_u}),({knots_v}),.UNSPECIFIED.);\n"
        ));
    } else {
        let weights = weight_rows(surface);
        buf.push_str(&format!(
            "#{surface_id}=(BOUNDED_SURFACE()B_SPLINE_SURFACE({du},{dv},({points}),.UNSPECIFIED.,.F.,.F.,.F.)B_SPLINE_SURFACE_WITH_KNOTS(({mults_u}),({mults_v}),({knots_u}),({knots_v}),.UNSPECIFIED.)GEOMETRIC_REPRESENTATION_ITEM()RATIONAL_B_SPLINE_SURFACE(({weights}))REPRESENTATION_ITEM('')SURFACE());\n"
        ));
    }
    surface_id
}

fn id_list(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn int_list(values: &[usize]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn real_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format!("{value:.6}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn weight_rows(surface: &BsplineSurface) -> String {
    (0..surface.n_u())
        .map(|u| {
            let row = (0..surface.n_v())
                .map(|v| format!("{:.6}", surface.weight(u, v)))
                .collect::<Vec<_>>()
                .join(",");
            format!("({row})")
        })
        .collect::<Vec<_>>()
        .join(",")
}
