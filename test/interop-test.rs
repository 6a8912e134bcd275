// Tests the interop of SinusX files to curves
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use sinusx::io::sinusx::*;
use sinusx::io::{Error, LogDiagnostics, Result};
use sinusx::*;
use std::path::{Path, PathBuf};

fn fixture(file: &str) -> PathBuf {
    Path::new("test").join("sinusx").join(file)
}

fn same(p1: Point3, p2: Point3) -> bool {
    p1.sub(p2).mag() < 1e-11
}

fn load(file: &str) -> (Vec<Curve>, Result<()>, Vec<String>) {
    let mut curves: Vec<Curve> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let r = load_file(
        fixture(file),
        &mut curves,
        &mut AutoShift::default(),
        &mut warnings,
    );
    (curves, r, warnings)
}

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sinusx-interop-{}-{}.sx", std::process::id(), name))
}

// 'profiles.sx' holds one block of each curve type, in georeferenced coordinates:
// - S: 3 points, open
// - N: level curve at 20m, closed
// - C: local frame spread over three lines, YZ base plane
// - P: unconnected points, ZX base plane
#[test]
fn test_profiles_import() {
    let (curves, r, warnings) = load("profiles.sx");
    r.unwrap();

    assert_eq!(curves.len(), 4);
    assert_eq!(
        warnings,
        vec![
            "[SinusX] Polyline has been recentered! Translation: (-651200.00,-6862100.00,0.00)"
                .to_string()
        ]
    );

    let shift = [-651_200.0, -6_862_100.0, 0.0];
    assert!(curves.iter().all(|c| c.global_shift() == shift));

    let s = &curves[0];
    assert_eq!(s.name(), "berge rive gauche");
    assert_eq!(s.len(), 3);
    assert!(!s.is_closed());
    assert_eq!(s.up_dir(), UpDir::Z);
    assert_eq!(s.point(0), Some([34.5, 0.0, 12.5]));
    let globals = s.global_points().collect::<Vec<_>>();
    assert!(same(globals[0], [651_234.5, 6_862_100.0, 12.5]));
    assert!(same(globals[1], [651_235.5, 6_862_110.0, 13.1]));
    assert!(same(globals[2], [651_236.5, 6_862_120.0, 12.75]));

    let n = &curves[1];
    assert_eq!(n.name(), "courbe 20m");
    assert!(n.is_closed());
    assert_eq!(n.constant_altitude(), Some(20.0));
    assert_eq!(n.len(), 3);

    let c = &curves[2];
    assert_eq!(c.name(), "section");
    assert_eq!(c.up_dir(), UpDir::X);
    assert_eq!(c.len(), 2);
    assert!(same(c.global_points().last().unwrap(), [651_200.0, 6_862_005.0, 4.5]));

    let p = &curves[3];
    assert_eq!(p.name(), "profil en travers");
    assert!(!p.is_visible());
    assert!(p.vertices().is_enabled());
    assert_eq!(p.up_dir(), UpDir::Y);
    assert_eq!(p.len(), 2);
}

#[test]
fn test_corrupted_import() {
    let (curves, r, warnings) = load("corrupted.sx");

    match r {
        Err(Error::MalformedFile { line }) => assert_eq!(line, 15),
        x => panic!("expecting a malformed file, got {:?}", x),
    }
    assert_eq!(warnings.len(), 3);

    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0].name(), "premier");
    assert_eq!(
        curves[0].points().collect::<Vec<_>>(),
        vec![[1.0, 2.0, 3.0], [7.0, 8.0, 9.0]]
    );
    assert_eq!(curves[1].name(), "second");
    assert!(curves[1].is_closed());
    assert_eq!(curves[1].up_dir(), UpDir::Z);
}

#[test]
fn test_comments_import() {
    let (curves, r, warnings) = load("comments.sx");
    r.unwrap();
    assert!(curves.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn test_profiles_export() {
    let (curves, r, _) = load("profiles.sx");
    r.unwrap();

    let mut doc = Group::new("profiles");
    for c in &curves {
        doc.push(c.clone());
    }
    let doc = Entity::Group(doc);
    assert!(can_save(&doc));

    let path = temp_file("profiles");
    save_file(&doc, &path, &SaveOptions::default(), &mut LogDiagnostics).unwrap();

    let mut reloaded = Group::new("reloaded");
    load_file(&path, &mut reloaded, &mut AutoShift::default(), &mut LogDiagnostics).unwrap();
    std::fs::remove_file(&path).ok();

    let reloaded = reloaded.curves().collect::<Vec<_>>();
    assert_eq!(reloaded.len(), curves.len());
    for (a, b) in curves.iter().zip(reloaded) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.len(), b.len());
        assert_eq!(a.is_closed(), b.is_closed());
        for (p, q) in a.global_points().zip(b.global_points()) {
            assert!(same(p, q));
        }
    }
}

#[test]
fn test_single_vertex_export() {
    let c = Curve::from_points([[1.0, 2.0, 3.0]]).with_name("dot");
    let path = temp_file("single");
    let mut warnings: Vec<String> = Vec::new();

    let r = save_file(&Entity::Curve(c), &path, &SaveOptions::default(), &mut warnings);
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(matches!(r, Err(Error::NoDataToSave)));
    assert_eq!(written, format!("{}\n", HEADER));
    assert_eq!(
        warnings,
        vec!["[SinusX] Polyline 'dot' does not have enough vertices".to_string()]
    );
}

#[test]
fn test_nothing_to_export_creates_no_file() {
    let path = temp_file("nothing");
    let r = save_file(
        &Entity::Group(Group::new("empty")),
        &path,
        &SaveOptions::default(),
        &mut LogDiagnostics,
    );
    assert!(matches!(r, Err(Error::NoDataToSave)));
    assert!(!path.exists());
}

#[quickcheck]
fn load_after_save_round_trip(pts: Vec<(i32, i32, i32)>, closed: bool) -> TestResult {
    if pts.len() < 2 {
        return TestResult::discard();
    }

    // eighths are exact in binary and fit the written precision
    let pts = pts
        .into_iter()
        .map(|(x, y, z)| [x, y, z].map(|v| v as f64 / 8.0))
        .collect::<Vec<_>>();
    let mut curve = Curve::from_points(pts.iter().copied()).with_name("prop");
    curve.set_closed(closed);

    let data = to_sinusx(&Entity::Curve(curve)).unwrap();
    let (curves, r) = from_sinusx(&data);
    if r.is_err() || curves.len() != 1 {
        return TestResult::failed();
    }

    let c = &curves[0];
    let ok = c.len() == pts.len()
        && c.is_closed() == closed
        && c
            .global_points()
            .zip(&pts)
            .all(|(p, &q)| p.sub(q).into_iter().all(|d| d.abs() <= 1e-12));

    TestResult::from_bool(ok)
}
