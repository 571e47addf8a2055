use super::*;
use std::cell::Cell;
use std::io::Write;
use tempfile::tempdir;

/// Writes `bit{i}` columns, emitting rows in reverse listing order.
struct ReversingGenerator {
    width: usize,
    skip_label: Option<&'static str>,
    garbage_cell: bool,
    calls: Cell<usize>,
}

impl ReversingGenerator {
    fn new(width: usize) -> Self {
        Self {
            width,
            skip_label: None,
            garbage_cell: false,
            calls: Cell::new(0),
        }
    }
}

impl DescriptorGenerator for ReversingGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<(), DescriptorError> {
        self.calls.set(self.calls.get() + 1);
        let entries = read_listing(request.listing)?;
        let mut out = std::fs::File::create(request.output)?;
        let header: Vec<String> = (0..self.width).map(|i| format!("bit{i}")).collect();
        writeln!(out, "Name,{}", header.join(","))?;
        for (row, entry) in entries.iter().enumerate().rev() {
            if Some(entry.label.as_str()) == self.skip_label {
                continue;
            }
            let mut cells: Vec<String> = (0..self.width).map(|c| ((row + c) % 2).to_string()).collect();
            if self.garbage_cell {
                cells[0] = "NaN?".to_string();
            }
            writeln!(out, "\"{}\",{}", entry.label, cells.join(","))?;
        }
        Ok(())
    }
}

fn entries() -> Vec<ListingEntry> {
    vec![
        ListingEntry::new("CCO", "mol_a"),
        ListingEntry::new("c1ccccc1", "mol_b"),
        ListingEntry::new("CC(=O)O", "mol_c"),
    ]
}

fn adapter<G: DescriptorGenerator>(generator: G, dir: &Path) -> DescriptorAdapter<G> {
    let registry = SchemeRegistry::new(dir);
    DescriptorAdapter::new(generator, registry)
}

#[test]
fn test_scheme_names_round_trip() {
    for scheme in FingerprintScheme::ALL {
        let parsed: FingerprintScheme = scheme.name().parse().unwrap();
        assert_eq!(parsed, scheme);
        assert_eq!(scheme.to_string(), scheme.name());
    }
    assert_eq!("pubchem".parse::<FingerprintScheme>().unwrap(), FingerprintScheme::PubChem);
    assert_eq!(FingerprintScheme::Cdk.config_file(), "Fingerprinter.xml");
    assert_eq!(FingerprintScheme::default(), FingerprintScheme::PubChem);
}

#[test]
fn test_unknown_scheme_is_rejected() {
    let err = "Morgan".parse::<FingerprintScheme>().unwrap_err();
    assert!(matches!(err, DescriptorError::UnknownScheme { ref name } if name == "Morgan"));
    assert!(err.to_string().contains("PubChem"));
}

#[test]
fn test_scheme_detected_from_columns() {
    assert_eq!(FingerprintScheme::of_column("KRFP12"), Some(FingerprintScheme::KlekotaRoth));
    assert_eq!(FingerprintScheme::of_column("KRFPC12"), Some(FingerprintScheme::KlekotaRothCount));
    assert_eq!(FingerprintScheme::of_column("ExtFP3"), Some(FingerprintScheme::CdkExtended));
    assert_eq!(FingerprintScheme::of_column("FP3"), Some(FingerprintScheme::Cdk));
    assert_eq!(FingerprintScheme::of_column("PubchemFP"), None);
    assert_eq!(FingerprintScheme::of_column("MW"), None);

    assert_eq!(
        FingerprintScheme::detect(&["SubFP1", "SubFP2", "SubFP307"]),
        Some(FingerprintScheme::Substructure)
    );
    assert_eq!(FingerprintScheme::detect(&["SubFP1", "SubFPC2"]), None);
    assert_eq!(FingerprintScheme::detect::<&str>(&[]), None);
}

#[test]
fn test_scheme_serde_uses_names() {
    let json = serde_json::to_string(&FingerprintScheme::CdkExtended).unwrap();
    assert_eq!(json, "\"CDKextended\"");
    let back: FingerprintScheme = serde_json::from_str("\"MACCS\"").unwrap();
    assert_eq!(back, FingerprintScheme::Maccs);
}

#[test]
fn test_registry_resolution() {
    let registry = SchemeRegistry::new("/opt/padel/xml");
    assert_eq!(
        registry.config_path(FingerprintScheme::PubChem).unwrap(),
        Path::new("/opt/padel/xml/PubchemFingerprinter.xml")
    );
    assert_eq!(registry.schemes().count(), 12);

    let partial = SchemeRegistry::empty().with_entry(FingerprintScheme::Maccs, "maccs.xml");
    assert_eq!(partial.resolve("MACCS").unwrap(), FingerprintScheme::Maccs);
    assert!(matches!(
        partial.resolve("PubChem"),
        Err(DescriptorError::Unregistered(FingerprintScheme::PubChem))
    ));
    assert!(matches!(partial.resolve("ECFP4"), Err(DescriptorError::UnknownScheme { .. })));
}

#[test]
fn test_listing_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("molecules.smi");
    write_listing(&path, &entries()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "CCO\tmol_a\nc1ccccc1\tmol_b\nCC(=O)O\tmol_c\n");
    assert_eq!(read_listing(&path).unwrap(), entries());
}

#[test]
fn test_physicochemical_skips_unparseable() {
    let mut batch = entries();
    batch.insert(1, ListingEntry::new("C1CC(", "broken"));

    let outcome = physicochemical_table(&batch).unwrap();
    assert_eq!(outcome.table.columns(), PHYSCHEM_COLUMNS.map(String::from).as_slice());
    assert_eq!(outcome.accepted(), ["mol_a", "mol_b", "mol_c"]);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].compound_id, "broken");
    assert_eq!(outcome.table.n_rows() + outcome.rejected.len(), batch.len());

    let ethanol = outcome.table.row(0);
    assert!((ethanol[0] - 46.069).abs() < 0.01);
    assert_eq!(ethanol[2], 1.0);
    assert_eq!(ethanol[3], 1.0);
}

#[test]
fn test_fingerprints_single_call_and_realigned() {
    let dir = tempdir().unwrap();
    let generator = ReversingGenerator::new(4);
    let adapter = adapter(&generator, dir.path());
    let listing = dir.path().join("molecules.smi");
    let output = dir.path().join(fingerprint_file_name(FingerprintScheme::PubChem));

    let table = adapter
        .fingerprints(&entries(), FingerprintScheme::PubChem, &listing, &output)
        .unwrap();

    assert_eq!(generator.calls.get(), 1);
    assert_eq!(table.labels(), ["mol_a", "mol_b", "mol_c"]);
    assert_eq!(table.columns(), ["bit0", "bit1", "bit2", "bit3"]);
    assert_eq!(table.row(0), &[0.0, 1.0, 0.0, 1.0]);
    assert_eq!(table.row(1), &[1.0, 0.0, 1.0, 0.0]);
    assert!(listing.exists());
}

#[test]
fn test_fingerprints_missing_row_fails_batch() {
    let dir = tempdir().unwrap();
    let mut generator = ReversingGenerator::new(3);
    generator.skip_label = Some("mol_b");
    let adapter = adapter(generator, dir.path());

    let err = adapter
        .fingerprints(
            &entries(),
            FingerprintScheme::Maccs,
            &dir.path().join("in.smi"),
            &dir.path().join("out.csv"),
        )
        .unwrap_err();
    match err {
        DescriptorError::Generation(msg) => assert!(msg.contains("mol_b"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fingerprints_non_numeric_cell_fails_batch() {
    let dir = tempdir().unwrap();
    let mut generator = ReversingGenerator::new(2);
    generator.garbage_cell = true;
    let adapter = adapter(generator, dir.path());

    let result = adapter.fingerprints(
        &entries(),
        FingerprintScheme::Maccs,
        &dir.path().join("in.smi"),
        &dir.path().join("out.csv"),
    );
    assert!(matches!(result, Err(DescriptorError::Generation(_))));
}

#[test]
fn test_fingerprints_requires_molecules_and_registered_scheme() {
    let dir = tempdir().unwrap();
    let adapter = DescriptorAdapter::new(ReversingGenerator::new(1), SchemeRegistry::empty());
    let listing = dir.path().join("in.smi");
    let output = dir.path().join("out.csv");

    assert!(matches!(
        adapter.fingerprints(&[], FingerprintScheme::PubChem, &listing, &output),
        Err(DescriptorError::Generation(_))
    ));
    assert!(matches!(
        adapter.fingerprints(&entries(), FingerprintScheme::PubChem, &listing, &output),
        Err(DescriptorError::Unregistered(FingerprintScheme::PubChem))
    ));
    assert_eq!(adapter.generator.calls.get(), 0);
}

#[test]
fn test_padel_arguments() {
    let padel = PadelDescriptor::new(PadelConfig {
        threads: 4,
        ..PadelConfig::default()
    });
    let request = GenerationRequest {
        listing: Path::new("in.smi"),
        output: Path::new("out.csv"),
        scheme: FingerprintScheme::PubChem,
        scheme_config: Path::new("padel_fp_xmls/PubchemFingerprinter.xml"),
    };
    let args: Vec<String> = padel
        .arguments(&request)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let dir = args.iter().position(|a| a == "-dir").unwrap();
    assert_eq!(args[dir + 1], "in.smi");
    let types = args.iter().position(|a| a == "-descriptortypes").unwrap();
    assert_eq!(args[types + 1], "padel_fp_xmls/PubchemFingerprinter.xml");
    for flag in [
        "-detectaromaticity",
        "-standardizenitro",
        "-standardizetautomers",
        "-removesalt",
        "-fingerprints",
        "-log",
    ] {
        assert!(args.iter().any(|a| a == flag), "missing {flag}");
    }
    let threads = args.iter().position(|a| a == "-threads").unwrap();
    assert_eq!(args[threads + 1], "4");
}

#[test]
fn test_padel_missing_scheme_file() {
    let dir = tempdir().unwrap();
    let padel = PadelDescriptor::default();
    let request = GenerationRequest {
        listing: &dir.path().join("in.smi"),
        output: &dir.path().join("out.csv"),
        scheme: FingerprintScheme::EState,
        scheme_config: &dir.path().join("missing.xml"),
    };
    assert!(matches!(padel.generate(&request), Err(DescriptorError::Generation(_))));
}

#[test]
fn test_table_column_operations() {
    let mut table = FeatureTable::new(vec!["a".into(), "b".into(), "pIC50".into()]);
    table.push_row("x", vec![1.0, 2.0, 6.5]).unwrap();
    table.push_row("y", vec![3.0, 4.0, 7.5]).unwrap();
    assert!(matches!(
        table.push_row("z", vec![1.0]),
        Err(DescriptorError::RowWidth { expected: 3, found: 1, .. })
    ));

    assert_eq!(table.take_column("pIC50"), Some(vec![6.5, 7.5]));
    assert_eq!(table.columns(), ["a", "b"]);
    assert_eq!(table.row(1), &[3.0, 4.0]);
    assert_eq!(table.take_column("pIC50"), None);

    let swapped = table.select(&[1, 0]);
    assert_eq!(swapped.columns(), ["b", "a"]);
    assert_eq!(swapped.row(0), &[2.0, 1.0]);
}

#[test]
fn test_table_align_with_duplicate_labels() {
    let mut table = FeatureTable::new(vec!["v".into()]);
    table.push_row("dup", vec![1.0]).unwrap();
    table.push_row("other", vec![2.0]).unwrap();
    table.push_row("dup", vec![3.0]).unwrap();

    let order = vec!["other".to_string(), "dup".to_string(), "dup".to_string()];
    let aligned = table.align_to(&order).unwrap();
    assert_eq!(aligned.column(0), vec![2.0, 1.0, 3.0]);

    let too_many = vec!["other".to_string(), "other".to_string()];
    assert!(table.align_to(&too_many).is_err());
}

#[test]
fn test_table_csv_round_trip_and_header_check() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.csv");
    let mut table = FeatureTable::new(vec!["PubchemFP0".into(), "PubchemFP1".into()]);
    table.push_row("CHEMBL1", vec![1.0, 0.0]).unwrap();
    table.write_csv(&path).unwrap();
    assert_eq!(FeatureTable::read_csv(&path).unwrap(), table);

    let bad = dir.path().join("bad.csv");
    std::fs::write(&bad, "id,PubchemFP0\nCHEMBL1,1\n").unwrap();
    assert!(matches!(FeatureTable::read_csv(&bad), Err(DescriptorError::Malformed { .. })));
}
