use super::grammar;
use super::*;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Leading comment of written files.
pub const HEADER: &str = "C Generated by sinusx";

/// Writer configuration.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Fractional digits of written coordinates.
    pub precision: usize,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { precision: 12 }
    }
}

/// An entity can be saved if it is a curve, or a group holding curves.
pub fn can_save(entity: &Entity) -> bool {
    match entity {
        Entity::Curve(_) => true,
        Entity::Group(g) => g.curves().next().is_some(),
        Entity::Vertices(_) => false,
    }
}

/// Save the curves of `entity` to a SinusX file at `path`.
///
/// The file is only created if there is at least one curve to consider.
/// See [`write_sinusx`].
pub fn save_file<P, D>(
    entity: &Entity,
    path: P,
    options: &SaveOptions,
    diagnostics: &mut D,
) -> Result<()>
where
    P: AsRef<Path>,
    D: Diagnostics + ?Sized,
{
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::BadArgument("destination path is empty"));
    }

    let curves = collect_curves(entity)?;
    if curves.is_empty() {
        return Err(Error::NoDataToSave);
    }

    let file = File::create(path).map_err(Error::WriteFailure)?;
    let mut wtr = BufWriter::new(file);
    let r = write_curves(&curves, &mut wtr, options, diagnostics);
    wtr.flush().map_err(Error::WriteFailure)?;

    r
}

/// Write the curves of `entity` as SinusX.
///
/// The curves are `entity` itself, or the direct children of a group which are curves.
/// Curves with less than 2 points are skipped with a warning. If no curve gets written
/// [`Error::NoDataToSave`] is returned.
pub fn write_sinusx<W, D>(
    entity: &Entity,
    wtr: W,
    options: &SaveOptions,
    diagnostics: &mut D,
) -> Result<()>
where
    W: Write,
    D: Diagnostics + ?Sized,
{
    let curves = collect_curves(entity)?;
    if curves.is_empty() {
        return Err(Error::NoDataToSave);
    }

    write_curves(&curves, wtr, options, diagnostics)
}

/// Serialize the curves of `entity` with the default options, warnings go to the [`log`]
/// facade.
pub fn to_sinusx(entity: &Entity) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_sinusx(entity, &mut buf, &SaveOptions::default(), &mut LogDiagnostics)?;
    Ok(buf)
}

fn collect_curves(entity: &Entity) -> Result<Vec<&Curve>> {
    let mut curves = Vec::new();

    match entity {
        Entity::Curve(c) => {
            curves.try_reserve_exact(1).map_err(|_| Error::OutOfMemory)?;
            curves.push(c);
        }
        Entity::Group(g) => {
            curves
                .try_reserve_exact(g.curves().count())
                .map_err(|_| Error::OutOfMemory)?;
            curves.extend(g.curves());
        }
        Entity::Vertices(_) => (),
    }

    Ok(curves)
}

fn write_curves<W, D>(
    curves: &[&Curve],
    mut wtr: W,
    options: &SaveOptions,
    diagnostics: &mut D,
) -> Result<()>
where
    W: Write,
    D: Diagnostics + ?Sized,
{
    writeln!(wtr, "{}", HEADER).map_err(Error::WriteFailure)?;

    let mut written = 0;
    for curve in curves {
        if curve.len() < 2 {
            diagnostics.warn(&format!(
                "[SinusX] Polyline '{}' does not have enough vertices",
                curve.name()
            ));
            continue;
        }

        write_curve(curve, &mut wtr, options.precision).map_err(Error::WriteFailure)?;
        written += 1;
    }

    log::debug!("wrote {} of {} curves", written, curves.len());

    if written == 0 {
        Err(Error::NoDataToSave)
    } else {
        Ok(())
    }
}

fn write_curve<W: Write>(curve: &Curve, mut wtr: W, precision: usize) -> std::io::Result<()> {
    let up_dir = if curve.is_2d() {
        curve.up_dir()
    } else {
        UpDir::Z
    };
    // a name cannot span lines
    let name = curve.name().replace(|c: char| c == '\r' || c == '\n', " ");

    writeln!(wtr, "{} S", grammar::BLOCK)?;
    writeln!(wtr, "{} {}", grammar::NAME, name)?;
    writeln!(wtr, "{} 1 {}", grammar::PARAM, u8::from(curve.is_closed()))?;
    writeln!(wtr, "{} {}", grammar::PARAM, grammar::plane_code(up_dir))?;

    for local in curve.points() {
        let global = curve.to_global(local);
        // the sign flag follows the local coordinate
        for (l, g) in local.into_iter().zip(global) {
            // adding zero folds -0.0 into 0.0 so it is never written as "+-0"
            let (l, g) = (l + 0.0, g + 0.0);
            let plus = if l >= 0.0 { "+" } else { "" };
            write!(wtr, " {}{}", plus, grammar::fmt_sci(g, precision))?;
        }
        writeln!(wtr, " {}", grammar::VERTEX_KEY)?;
    }

    Ok(())
}
