use phf::{Map, Set, phf_map, phf_set};

static RESIDUE_ONE_LETTER: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLU" => 'E', "GLN" => 'Q', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    "HSD" => 'H', "HSE" => 'H', "HSP" => 'H', "HID" => 'H', "HIE" => 'H', "HIP" => 'H',
    "SEC" => 'U', "PYL" => 'O', "MSE" => 'M',
    "DA" => 'A', "DC" => 'C', "DG" => 'G', "DT" => 'T',
    "A" => 'A', "C" => 'C', "G" => 'G', "U" => 'U',
};

static SOLVENT_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "SOL", "TIP", "TIP3",
};

/// One-letter code for a residue name; anything unrecognized maps to `X`.
pub fn one_letter_code(residue_name: &str) -> char {
    RESIDUE_ONE_LETTER
        .get(residue_name.trim())
        .copied()
        .unwrap_or('X')
}

pub fn is_solvent(residue_name: &str) -> bool {
    SOLVENT_NAMES.contains(residue_name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_amino_acids_map_to_their_codes() {
        assert_eq!(one_letter_code("ALA"), 'A');
        assert_eq!(one_letter_code("TRP"), 'W');
        assert_eq!(one_letter_code(" GLY"), 'G');
    }

    #[test]
    fn histidine_variants_and_selenomethionine_are_recognized() {
        assert_eq!(one_letter_code("HSE"), 'H');
        assert_eq!(one_letter_code("MSE"), 'M');
    }

    #[test]
    fn unknown_residues_map_to_x() {
        assert_eq!(one_letter_code("LIG"), 'X');
        assert_eq!(one_letter_code(""), 'X');
    }

    #[test]
    fn water_is_solvent() {
        assert!(is_solvent("HOH"));
        assert!(!is_solvent("ALA"));
    }
}
