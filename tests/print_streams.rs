#![allow(non_snake_case)]

use qp_polish::{algebra::*, io::ConfigurablePrintTarget, solver::*};

fn test_print_workspace() -> Workspace<f64> {
    let P = CscMatrix::<f64>::identity(1);
    let q = [0.];
    let A = CscMatrix::<f64>::identity(1);
    let settings = PolishSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();
    let mut ws = Workspace::new(&P, &q, &A, &[1.], &[2.], settings).unwrap();
    ws.set_iterate(&[0.9, 0.9], &[-1.]).unwrap();
    ws
}

#[test]
fn test_print_to_stdout() {
    let mut ws = test_print_workspace();
    ws.print_to_stdout();
    assert_eq!(ws.polish(), Ok(PolishStatus::Succeeded));
}

#[test]
fn test_print_to_buffer() {
    let mut ws = test_print_workspace();
    ws.print_to_buffer();
    ws.polish().unwrap();
    let result = ws.get_print_buffer().unwrap();
    assert!(result.contains("polish: Succeeded"));
    assert!(result.contains("active rows   = 1 (lower 1, upper 0, free 0)"));
    assert!(!result.contains("polish time"));
}

#[test]
fn test_print_profiling() {
    let mut ws = test_print_workspace();
    ws.settings.profiling = true;
    ws.print_to_buffer();
    ws.polish().unwrap();
    let result = ws.get_print_buffer().unwrap();
    assert!(result.contains("polish time"));
    assert!(result.contains("kkt factor"));
}

#[test]
fn test_print_summary_bad_polish_time() {
    let mut ws = test_print_workspace();
    ws.settings.profiling = true;
    ws.print_to_buffer();

    for t in [-1., f64::NAN] {
        ws.info.polish_time = t;
        assert!(ws.print_polish_summary().is_ok());
    }
    let result = ws.get_print_buffer().unwrap();
    assert!(result.contains("-1.00e+00s"));
    assert!(result.contains(" NaNs"));
}

#[test]
fn test_print_nothing_on_rejection() {
    let mut ws = test_print_workspace();
    ws.set_best(&[1.], &[-1.], 0., 0., 0.5).unwrap();
    ws.print_to_buffer();
    assert_eq!(ws.polish(), Ok(PolishStatus::Rejected));
    assert_eq!(ws.get_print_buffer().unwrap(), "");
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let mut ws = test_print_workspace();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    ws.print_to_file(file.into_file());
    ws.polish().unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("polish: Succeeded"));
}

#[test]
fn test_print_to_stream() {
    use std::io::{Read, Seek};

    let mut ws = test_print_workspace();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    let stream = Box::new(file.into_file());

    ws.print_to_stream(stream);
    ws.polish().unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("polish: Succeeded"));
}

#[test]
fn test_print_to_sink() {
    let mut ws = test_print_workspace();
    ws.print_to_sink();
    ws.polish().unwrap();
    assert!(ws.get_print_buffer().is_err());
}
