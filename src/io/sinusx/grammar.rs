//! Keywords and field encodings shared by the reader and writer.
use super::*;
use nom::{
    character::complete::i64 as integer, combinator::all_consuming, number::complete::double,
};

pub const COMMENT: &str = "C ";
pub const BLOCK: &str = "B";
pub const NAME: &str = "CN";
pub const PARAM: &str = "CP";

/// Trailing token of a written vertex line.
pub const VERTEX_KEY: &str = "A";

/// Fields of a vertex line: `x y z key`.
pub const VERTEX_TOKENS: usize = 4;

/// Values describing the local frame of a type C curve, spread over one or more lines.
pub const C_HEADER_VALUES: usize = 16;

/// The block curve type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CurveType {
    /// Set of 3D points.
    S,
    /// Profile.
    P,
    /// Level curve at a constant altitude.
    N,
    /// Curve described in a local frame.
    C,
}

impl CurveType {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'S' => Some(CurveType::S),
            'P' => Some(CurveType::P),
            'N' => Some(CurveType::N),
            'C' => Some(CurveType::C),
            _ => None,
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            CurveType::S => 'S',
            CurveType::P => 'P',
            CurveType::N => 'N',
            CurveType::C => 'C',
        }
    }
}

/// Base plane code of an up direction.
///
/// Codes name the _plane_: 0 = XY, 1 = YZ, 2 = ZX.
pub fn plane_code(dir: UpDir) -> char {
    match dir {
        UpDir::Z => '0',
        UpDir::X => '1',
        UpDir::Y => '2',
    }
}

/// Inverse of [`plane_code`].
pub fn up_dir_from_code(code: char) -> Option<UpDir> {
    match code {
        '0' => Some(UpDir::Z),
        '1' => Some(UpDir::X),
        '2' => Some(UpDir::Y),
        _ => None,
    }
}

/// Whitespace separated fields.
pub fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

pub fn float(token: &str) -> Option<f64> {
    all_consuming(double::<_, ()>)(token).ok().map(|(_, x)| x)
}

pub fn int(token: &str) -> Option<i64> {
    all_consuming(integer::<_, ()>)(token).ok().map(|(_, x)| x)
}

/// Parse a vertex line into its raw point.
///
/// The key field must be present but its value is not interpreted.
pub fn vertex(line: &str) -> Option<Point3> {
    let tokens = tokens(line);
    let [x, y, z, _key] = tokens.as_slice() else {
        return None;
    };
    Some([float(x)?, float(y)?, float(z)?])
}

/// Scientific notation with `precision` fractional digits and a signed exponent of at least
/// two digits, eg `-1.250000000000E+03`.
pub fn fmt_sci(x: f64, precision: usize) -> String {
    let s = format!("{:.*E}", precision, x);
    let Some((mantissa, exp)) = s.split_once('E') else {
        return s; // inf or NaN
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    format!("{}E{}{:0>2}", mantissa, sign, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_code_bijection() {
        for dir in [UpDir::X, UpDir::Y, UpDir::Z] {
            assert_eq!(up_dir_from_code(plane_code(dir)), Some(dir));
        }
        assert_eq!(plane_code(UpDir::Z), '0');
        assert_eq!(plane_code(UpDir::X), '1');
        assert_eq!(plane_code(UpDir::Y), '2');
        assert_eq!(up_dir_from_code('3'), None);
        assert_eq!(up_dir_from_code('Z'), None);
    }

    #[test]
    fn curve_type_shortcuts() {
        for t in [CurveType::S, CurveType::P, CurveType::N, CurveType::C] {
            assert_eq!(CurveType::from_char(t.shortcut()), Some(t));
        }
        assert_eq!(CurveType::from_char('X'), None);
        assert_eq!(CurveType::from_char('s'), None);
    }

    #[test]
    fn number_parsing() {
        assert_eq!(float("+1.500000000000E+00"), Some(1.5));
        assert_eq!(float("-2.5e-3"), Some(-0.0025));
        assert_eq!(float("42"), Some(42.0));
        assert_eq!(float("1.0x"), None);
        assert_eq!(float(""), None);
        assert_eq!(float("A"), None);

        assert_eq!(int("0"), Some(0));
        assert_eq!(int("1"), Some(1));
        assert_eq!(int("-3"), Some(-3));
        assert_eq!(int("1.0"), None);
        assert_eq!(int("yes"), None);
    }

    #[test]
    fn vertex_parsing() {
        assert_eq!(vertex("1 2 3 A"), Some([1.0, 2.0, 3.0]));
        assert_eq!(
            vertex(" +1.0E+02\t-2.0E+00  +3.5E-01 key"),
            Some([100.0, -2.0, 0.35])
        );
        assert_eq!(vertex("1 2 3"), None);
        assert_eq!(vertex("1 2 3 A B"), None);
        assert_eq!(vertex("1 two 3 A"), None);
    }

    #[test]
    fn scientific_formatting() {
        assert_eq!(fmt_sci(1.5, 12), "1.500000000000E+00");
        assert_eq!(fmt_sci(-1250.0, 12), "-1.250000000000E+03");
        assert_eq!(fmt_sci(0.0, 3), "0.000E+00");
        assert_eq!(fmt_sci(2.5e-7, 2), "2.50E-07");
        assert_eq!(fmt_sci(1e123, 1), "1.0E+123");
        assert_eq!(fmt_sci(2_000_001.0, 12), "2.000001000000E+06");
    }

    #[quickcheck]
    fn formatted_numbers_parse_back(x: f64) -> bool {
        if !x.is_finite() {
            return true;
        }
        let parsed = float(&fmt_sci(x, 12)).unwrap();
        (parsed - x).abs() <= x.abs() * 1e-12
    }
}
