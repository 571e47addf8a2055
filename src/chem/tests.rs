use super::*;
use proptest::prelude::*;

fn hydrogens(smiles: &str) -> Vec<u8> {
    parse_smiles(smiles).unwrap().atoms().iter().map(|a| a.hydrogens).collect()
}

#[test]
fn test_parse_simple_chain() {
    let mol = parse_smiles("CCO").unwrap();
    assert_eq!(mol.atom_count(), 3);
    assert_eq!(mol.bond_count(), 2);
    assert_eq!(hydrogens("CCO"), vec![3, 2, 1]);
}

#[test]
fn test_parse_branches_and_double_bonds() {
    let mol = parse_smiles("CC(=O)O").unwrap();
    assert_eq!(mol.atom_count(), 4);
    assert_eq!(mol.bonds()[1].order, BondOrder::Double);
    assert_eq!(hydrogens("CC(=O)O"), vec![3, 0, 0, 1]);
}

#[test]
fn test_parse_aromatic_ring() {
    let mol = parse_smiles("c1ccccc1").unwrap();
    assert_eq!(mol.atom_count(), 6);
    assert_eq!(mol.bond_count(), 6);
    assert!(mol.bonds().iter().all(|b| b.order == BondOrder::Aromatic));
    assert!(mol.atoms().iter().all(|a| a.aromatic && a.hydrogens == 1));
}

#[test]
fn test_parse_bracket_atoms() {
    let mol = parse_smiles("[13CH4]").unwrap();
    assert_eq!(mol.atoms()[0].number, 6);
    assert_eq!(mol.atoms()[0].hydrogens, 4);

    let mol = parse_smiles("[O-]C").unwrap();
    assert_eq!(mol.atoms()[0].charge, -1);
    assert_eq!(mol.atoms()[0].hydrogens, 0);

    assert_eq!(parse_smiles("[Fe+++]").unwrap().atoms()[0].charge, 3);
    assert_eq!(parse_smiles("[Cu+2]").unwrap().atoms()[0].charge, 2);
    assert_eq!(parse_smiles("[CH3:7]C").unwrap().atoms()[0].hydrogens, 3);
}

#[test]
fn test_parse_chirality() {
    let mol = parse_smiles("N[C@@H](C)C(=O)O").unwrap();
    assert_eq!(mol.atom_count(), 6);
    assert_eq!(mol.atoms()[1].hydrogens, 1);
    assert!((molecular_weight(&mol) - 89.094).abs() < 0.01);

    assert!(parse_smiles("F[C@TH1](Cl)(Br)I").is_ok());
}

#[test]
fn test_parse_fragments_and_two_digit_rings() {
    let salt = parse_smiles("[Na+].[Cl-]").unwrap();
    assert_eq!(salt.atom_count(), 2);
    assert_eq!(salt.bond_count(), 0);

    let ring = parse_smiles("C%10CC%10").unwrap();
    assert_eq!(ring.bond_count(), 3);
}

#[test]
fn test_ring_atoms() {
    let mol = parse_smiles("C1CC1C").unwrap();
    assert_eq!(mol.ring_atoms(), vec![true, true, true, false]);
    assert!(parse_smiles("CCCC").unwrap().ring_atoms().iter().all(|&r| !r));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_smiles(""), Err(SmilesError::Empty));
    assert_eq!(parse_smiles("   "), Err(SmilesError::Empty));
    assert!(matches!(parse_smiles("C(C"), Err(SmilesError::UnbalancedBranch(_))));
    assert!(matches!(parse_smiles("C)"), Err(SmilesError::UnbalancedBranch(_))));
    assert_eq!(parse_smiles("C1CC"), Err(SmilesError::UnclosedRing(1)));
    assert!(matches!(parse_smiles("C="), Err(SmilesError::DanglingBond(_))));
    assert!(matches!(parse_smiles("[C"), Err(SmilesError::UnclosedBracket(0))));
    assert!(matches!(parse_smiles("CX"), Err(SmilesError::UnknownElement { .. })));
    assert!(matches!(
        parse_smiles("C C"),
        Err(SmilesError::UnexpectedChar { ch: ' ', position: 1 })
    ));
    assert!(matches!(
        parse_smiles("C(C)(C)(C)(C)C"),
        Err(SmilesError::Valence { atom: 0, .. })
    ));
    assert!(parse_smiles("not_a_smiles").is_err());
}

#[test]
fn test_molecular_weight() {
    let ethanol = parse_smiles("CCO").unwrap();
    assert!((molecular_weight(&ethanol) - 46.069).abs() < 0.01);

    let benzene = parse_smiles("c1ccccc1").unwrap();
    assert!((molecular_weight(&benzene) - 78.114).abs() < 0.01);

    let caffeine = parse_smiles("Cn1cnc2c1c(=O)n(C)c(=O)n2C").unwrap();
    assert!((molecular_weight(&caffeine) - 194.194).abs() < 0.01);
}

#[test]
fn test_hydrogen_bond_counts() {
    let caffeine = parse_smiles("Cn1cnc2c1c(=O)n(C)c(=O)n2C").unwrap();
    assert_eq!(h_bond_donors(&caffeine), 0);
    assert_eq!(h_bond_acceptors(&caffeine), 6);

    // The acid hydroxyl is a donor but not an acceptor.
    let aspirin = parse_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap();
    assert_eq!(h_bond_donors(&aspirin), 1);
    assert_eq!(h_bond_acceptors(&aspirin), 3);

    let pyrrole = parse_smiles("c1cc[nH]c1").unwrap();
    assert_eq!(h_bond_donors(&pyrrole), 1);
    assert_eq!(h_bond_acceptors(&pyrrole), 0);

    let pyridine = parse_smiles("c1ccncc1").unwrap();
    assert_eq!(h_bond_donors(&pyridine), 0);
    assert_eq!(h_bond_acceptors(&pyridine), 1);

    let ammonium = parse_smiles("[NH4+]").unwrap();
    assert_eq!(h_bond_donors(&ammonium), 1);
    assert_eq!(h_bond_acceptors(&ammonium), 0);
}

#[test]
fn test_amide_nitrogen_is_not_an_acceptor() {
    let imatinib = parse_smiles("Cc1ccc(NC(=O)c2ccc(CN3CCN(C)CC3)cc2)cc1Nc1nccc(-c2cccnc2)n1").unwrap();
    assert_eq!(h_bond_donors(&imatinib), 2);
    assert_eq!(h_bond_acceptors(&imatinib), 7);

    let fluoro = parse_smiles("FC(F)(F)CS").unwrap();
    assert_eq!(h_bond_donors(&fluoro), 1);
    assert_eq!(h_bond_acceptors(&fluoro), 4);
}

#[test]
fn test_ring_bonds() {
    let biphenyl = parse_smiles("c1ccccc1-c1ccccc1").unwrap();
    let ring = biphenyl.ring_bonds();
    let chain: Vec<_> = biphenyl.bonds().iter().zip(&ring).filter(|(_, &r)| !r).collect();
    assert_eq!(chain.len(), 1);
    assert_eq!((chain[0].0.a, chain[0].0.b), (5, 6));

    let toluene = parse_smiles("Cc1ccccc1").unwrap();
    assert_eq!(toluene.ring_bonds(), vec![false, true, true, true, true, true, true]);
}

#[test]
fn test_crippen_logp_reference_values() {
    let cases = [
        ("c1ccccc1", 1.6866),
        ("CCO", -0.0014),
        ("CC(=O)O", 0.0909),
        ("CC(C)=O", 0.5953),
        ("c1ccncc1", 1.0816),
        ("CC#N", 0.52988),
    ];
    for (smiles, expected) in cases {
        let logp = crippen_logp(&parse_smiles(smiles).unwrap());
        assert!((logp - expected).abs() < 1e-4, "{smiles}: logP {logp}, expected {expected}");
    }
}

#[test]
fn test_crippen_logp_nitro_aromatic_acid() {
    let logp = crippen_logp(&parse_smiles("O=[N+]([O-])c1ccc(/C=C/C(=O)O)cc1").unwrap());
    assert!((logp - 1.6926).abs() < 1e-4, "logP {logp}");
}

#[test]
fn test_lipinski_summary() {
    let props = Lipinski::compute(&parse_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap());
    assert!((props.molecular_weight - 180.159).abs() < 0.01);
    assert_eq!(props.h_bond_donors, 1);
    assert_eq!(props.h_bond_acceptors, 3);
    assert!((props.logp - 1.3101).abs() < 1e-4, "aspirin logP {}", props.logp);
}

proptest! {
    #[test]
    fn parser_never_panics(input in "[CNOcno()=#1-9\\[\\]+@H%.-]{0,24}") {
        let _ = parse_smiles(&input);
    }

    #[test]
    fn alkane_weight_is_linear(n in 1usize..40) {
        let smiles = "C".repeat(n);
        let mol = parse_smiles(&smiles).unwrap();
        let expected = n as f64 * 12.011 + (2 * n + 2) as f64 * 1.008;
        prop_assert!((molecular_weight(&mol) - expected).abs() < 1e-9);
    }
}
