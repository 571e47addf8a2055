#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text must parse or fail with an error, never panic
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(mol) = pic50::chem::parse_smiles(text) {
        // Descriptors walk the whole graph, including ring detection
        let props = pic50::chem::Lipinski::compute(&mol);
        assert!(props.molecular_weight >= 0.0);
        let _ = mol.ring_atoms();
    }
});
