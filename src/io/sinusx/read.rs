use super::grammar::{self, CurveType};
use super::*;
use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind},
    path::Path,
};

/// Load the SinusX file at `path`, adding each curve read to `container`.
///
/// See [`read_sinusx`].
pub fn load_file<P, C, S, D>(
    path: P,
    container: &mut C,
    shift: &mut S,
    diagnostics: &mut D,
) -> Result<()>
where
    P: AsRef<Path>,
    C: Container + ?Sized,
    S: CoordinateShift + ?Sized,
    D: Diagnostics + ?Sized,
{
    let file = File::open(path).map_err(Error::ReadFailure)?;
    read_sinusx(BufReader::new(file), container, shift, diagnostics)
}

/// Read SinusX text, adding each complete curve to `container`.
///
/// Reading recovers from malformed lines: the offending line is skipped, a warning is raised,
/// and the _last_ such fault is returned as [`Error::MalformedFile`] once the input is
/// consumed. Curves committed to the container stay there regardless of the result.
///
/// The first point read is handed to `shift` and the proposed translation (if any) is applied
/// to every point of the input.
///
/// Running out of memory is fatal and stops reading immediately.
pub fn read_sinusx<R, C, S, D>(
    mut rdr: R,
    container: &mut C,
    shift: &mut S,
    diagnostics: &mut D,
) -> Result<()>
where
    R: BufRead,
    C: Container + ?Sized,
    S: CoordinateShift + ?Sized,
    D: Diagnostics + ?Sized,
{
    let mut reader = Reader::new(container, shift, diagnostics);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match rdr.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => (),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                reader.close_block();
                return Err(Error::ReadFailure(e));
            }
        }

        let line = String::from_utf8_lossy(&buf);
        reader.line(line.trim_end_matches(|c: char| c == '\n' || c == '\r'))?;
    }

    reader.finish()
}

/// Read SinusX bytes into curves.
///
/// Large coordinates are recentered with [`AutoShift`], warnings go to the [`log`] facade.
/// The curves are returned alongside the read result since a malformed file can still
/// produce curves.
pub fn from_sinusx(sx: &[u8]) -> (Vec<Curve>, Result<()>) {
    let mut curves: Vec<Curve> = Vec::new();
    let r = read_sinusx(sx, &mut curves, &mut AutoShift::default(), &mut LogDiagnostics);
    (curves, r)
}

enum State {
    AwaitingBlock,
    InBlock(Block),
}

/// The block being read.
struct Block {
    curve: Curve,
    kind: CurveType,
    /// Index of the next `CP` header line.
    header: usize,
    /// Type C frame values still to be skipped.
    pending_values: usize,
}

struct Reader<'a, C: ?Sized, S: ?Sized, D: ?Sized> {
    container: &'a mut C,
    shift: &'a mut S,
    diagnostics: &'a mut D,
    state: State,
    line_no: usize,
    first_vertex: bool,
    file_shift: Option<Point3>,
    /// Line of the last recoverable fault.
    fault: Option<usize>,
}

impl<'a, C, S, D> Reader<'a, C, S, D>
where
    C: Container + ?Sized,
    S: CoordinateShift + ?Sized,
    D: Diagnostics + ?Sized,
{
    fn new(container: &'a mut C, shift: &'a mut S, diagnostics: &'a mut D) -> Self {
        Self {
            container,
            shift,
            diagnostics,
            state: State::AwaitingBlock,
            line_no: 0,
            first_vertex: true,
            file_shift: None,
            fault: None,
        }
    }

    fn line(&mut self, line: &str) -> Result<()> {
        self.line_no += 1;

        if let State::InBlock(block) = &mut self.state {
            if block.pending_values > 0 {
                let n = grammar::tokens(line).len();
                block.pending_values = block.pending_values.saturating_sub(n);
                return Ok(());
            }
        }

        if line.starts_with(grammar::COMMENT) {
            return Ok(());
        }

        if line.starts_with(grammar::BLOCK) {
            self.close_block();
            self.open_block(line);
            return Ok(());
        }

        let State::InBlock(block) = &mut self.state else {
            log::trace!("line {} is outside of a block, ignoring", self.line_no);
            return Ok(());
        };

        let outcome = if line.starts_with(grammar::NAME) {
            if let Some(name) = line.get(3..).filter(|x| !x.is_empty()) {
                block.curve.set_name(name);
            }
            Ok(())
        } else if line.starts_with(grammar::PARAM) {
            block.header_line(&grammar::tokens(line))
        } else if line.trim().is_empty() {
            Ok(())
        } else {
            return self.vertex_line(line);
        };

        if let Err(expected) = outcome {
            self.corrupted(expected);
        }

        Ok(())
    }

    fn open_block(&mut self, line: &str) {
        let tokens = grammar::tokens(line);

        let shortcut = match tokens.as_slice() {
            [_, t, ..] if t.chars().count() == 1 => t.chars().next(),
            _ => None,
        };
        let Some(shortcut) = shortcut else {
            let msg = format!("[SinusX] Line {} is corrupted", self.line_no);
            self.record_fault(&msg);
            return;
        };

        let Some(kind) = CurveType::from_char(shortcut) else {
            let msg = format!(
                "[SinusX] Unhandled curve type '{}' on line '{}'!",
                shortcut, self.line_no
            );
            self.record_fault(&msg);
            return;
        };

        if tokens.len() > 2 {
            // local frame and scale
            log::trace!("ignoring {} trailing block fields", tokens.len() - 2);
        }

        let mut curve = Curve::new(Vertices::new());
        if let Some(s) = self.file_shift {
            curve.set_global_shift(s);
        }

        self.state = State::InBlock(Block {
            curve,
            kind,
            header: 0,
            pending_values: 0,
        });
    }

    fn vertex_line(&mut self, line: &str) -> Result<()> {
        let Some(raw) = grammar::vertex(line) else {
            self.corrupted("X Y Z Key ...");
            return Ok(());
        };

        let State::InBlock(block) = &mut self.state else {
            return Ok(());
        };

        if self.first_vertex {
            self.first_vertex = false;
            self.file_shift = self
                .shift
                .propose_shift(raw)
                .filter(|s| !s.is_zero() && s.is_finite());

            if let Some(s) = self.file_shift {
                block.curve.set_global_shift(s);
                let [x, y, z] = s;
                self.diagnostics.warn(&format!(
                    "[SinusX] Polyline has been recentered! Translation: ({:.2},{:.2},{:.2})",
                    x, y, z
                ));
            }
        }

        let p = match self.file_shift {
            Some(s) => raw.add(s),
            None => raw,
        };

        if block.curve.vertices_mut().try_push(p).is_err() {
            self.state = State::AwaitingBlock;
            return Err(Error::OutOfMemory);
        }

        Ok(())
    }

    /// Commit the live block to the container, or drop it if it has no vertices.
    fn close_block(&mut self) {
        let State::InBlock(block) = std::mem::replace(&mut self.state, State::AwaitingBlock)
        else {
            return;
        };

        match block.finish() {
            Ok(curve) => {
                log::debug!(
                    "committing curve '{}' with {} points",
                    curve.name(),
                    curve.len()
                );
                self.container.add_child(curve);
            }
            Err(reason) => log::debug!("discarding block: {}", reason),
        }
    }

    fn finish(mut self) -> Result<()> {
        self.close_block();
        match self.fault {
            Some(line) => Err(Error::MalformedFile { line }),
            None => Ok(()),
        }
    }

    fn corrupted(&mut self, expected: &str) {
        let msg = format!(
            "[SinusX] Line {} is corrupted (expected: '{}')",
            self.line_no, expected
        );
        self.record_fault(&msg);
    }

    fn record_fault(&mut self, message: &str) {
        self.diagnostics.warn(message);
        self.fault = Some(self.line_no);
    }
}

impl Block {
    /// Handle a `CP` line.
    ///
    /// The header index advances whether or not the line is well formed. On a malformed
    /// line the expected layout is returned.
    fn header_line(&mut self, tokens: &[&str]) -> std::result::Result<(), &'static str> {
        let index = self.header;
        self.header += 1;

        match index {
            0 => self.connectivity(tokens),
            1 => match self.kind {
                // S has no second line, this one is already the base plane
                CurveType::S => {
                    self.header += 1;
                    self.base_plane(tokens)
                }
                // profile data is not kept
                CurveType::P => Ok(()),
                CurveType::N => self.constant_altitude(tokens),
                CurveType::C => {
                    let values = tokens.len().saturating_sub(1);
                    self.pending_values = grammar::C_HEADER_VALUES.saturating_sub(values);
                    Ok(())
                }
            },
            2 => self.base_plane(tokens),
            _ => Ok(()),
        }
    }

    fn connectivity(&mut self, tokens: &[&str]) -> std::result::Result<(), &'static str> {
        const EXPECTED: &str = "CP connected_flag closed_flag";

        let [_, connected, closed] = tokens else {
            return Err(EXPECTED);
        };
        let (Some(connected), Some(closed)) = (grammar::int(connected), grammar::int(closed))
        else {
            return Err(EXPECTED);
        };

        if connected == 0 {
            // unconnected points are shown as a point set instead
            self.curve.set_visible(false);
            self.curve.vertices_mut().set_enabled(true);
        }
        self.curve.set_closed(closed != 0);

        Ok(())
    }

    fn constant_altitude(&mut self, tokens: &[&str]) -> std::result::Result<(), &'static str> {
        const EXPECTED: &str = "CP const_altitude";

        let [_, z] = tokens else {
            return Err(EXPECTED);
        };
        let z = grammar::float(z).ok_or(EXPECTED)?;
        self.curve.set_constant_altitude(z);

        Ok(())
    }

    fn base_plane(&mut self, tokens: &[&str]) -> std::result::Result<(), &'static str> {
        const EXPECTED: &str = "CP base_plane";

        let [_, code] = tokens else {
            return Err(EXPECTED);
        };
        let dir = code
            .chars()
            .next()
            .and_then(grammar::up_dir_from_code)
            .ok_or(EXPECTED)?;
        self.curve.set_up_dir(dir);

        Ok(())
    }

    fn finish(self) -> std::result::Result<Curve, &'static str> {
        let mut curve = self.curve;
        let n = curve.vertices().len();
        if n == 0 {
            return Err("block has no vertices");
        }

        curve.vertices_mut().shrink_to_fit();
        curve.bind_range(0..n)?;

        Ok(curve)
    }
}
