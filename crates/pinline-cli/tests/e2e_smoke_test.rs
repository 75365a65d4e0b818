use std::fs;

use tempfile::tempdir;

use pinline::{PinlineError, symbol::SymbolKind};
use pinline_cli::{Args, run};

fn args(symbol: &str, output: &std::path::Path) -> Args {
    Args::new(symbol, &output.to_string_lossy())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn e2e_smoke_test_every_symbol() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut failed_symbols = Vec::new();

    for kind in SymbolKind::ALL {
        for (suffix, flip_h, flip_v) in [
            ("identity", false, false),
            ("flip_h", true, false),
            ("flip_v", false, true),
            ("flip_hv", true, true),
        ] {
            let output_path = temp_dir.path().join(format!("{}_{suffix}.svg", kind.name()));

            let mut args = args(kind.name(), &output_path);
            args.flip_h = flip_h;
            args.flip_v = flip_v;

            if let Err(e) = run(&args) {
                failed_symbols.push((kind, suffix, e));
                continue;
            }

            let svg = fs::read_to_string(&output_path).expect("Failed to read output");
            assert!(svg.contains("</svg>"), "{kind} {suffix}: incomplete document");
            assert!(
                svg.contains(&format!("data-kind=\"{kind}\"")),
                "{kind} {suffix}: missing kind attribute"
            );
        }
    }

    if !failed_symbols.is_empty() {
        eprintln!("\nSymbols that failed:");
        for (kind, suffix, err) in &failed_symbols {
            eprintln!("  - {kind} ({suffix}): {err}");
        }
        panic!("{} render(s) failed unexpectedly", failed_symbols.len());
    }
}

#[test]
fn e2e_params_and_live_values() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("ecu.svg");

    let mut args = args("ecu", &output_path);
    args.selected = true;
    args.params = strings(&["inputs=3", "outputs=2", "name=BCM"]);
    args.pin_state = strings(&["in0=12", "out1=0.5V"]);

    run(&args).expect("Render should succeed");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("BCM"));
    assert!(svg.contains("12.00 V"));
    assert!(svg.contains("0.50 V"));
    assert!(svg.contains("data-terminal=\"ecu::in2\""));
    assert!(!svg.contains("data-terminal=\"ecu::in3\""));
    assert!(svg.contains("data-selected"));
}

#[test]
fn e2e_harness_bundle_accepts_dashed_kind() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("bundle.svg");

    let mut args = args("harness-bundle", &output_path);
    args.params = strings(&["wire_count=20", "label=ENGINE"]);

    run(&args).expect("Render should succeed");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("data-terminal=\"harness_bundle::w11\""));
    assert!(!svg.contains("data-terminal=\"harness_bundle::w12\""));
    assert!(svg.contains("ENGINE"));
}

#[test]
fn e2e_error_cases() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.svg");

    let err = run(&args("flux_capacitor", &output_path)).unwrap_err();
    assert!(matches!(err, PinlineError::UnknownSymbol(_)));

    let mut bad_param = args("fuse", &output_path);
    bad_param.params = strings(&["amps=5"]);
    let err = run(&bad_param).unwrap_err();
    assert!(matches!(err, PinlineError::Params { kind: SymbolKind::Fuse, .. }));

    let mut bad_state = args("potentiometer", &output_path);
    bad_state.pin_state = strings(&["wiper"]);
    let err = run(&bad_state).unwrap_err();
    assert!(matches!(err, PinlineError::Args { .. }));

    let mut missing_config = args("battery", &output_path);
    missing_config.config = Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string());
    let err = run(&missing_config).unwrap_err();
    assert!(matches!(err, PinlineError::Config(_)));

    assert!(!output_path.exists(), "Failed runs must not write output");
}
