use super::residues::{is_solvent, one_letter_code};
use super::traits::{SequenceSource, SequenceSourceError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ResidueEntry {
    seq_num: isize,
    code: char,
}

fn slice(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end)
        .or_else(|| line.get(start..))
        .unwrap_or("")
}

/// Collects one entry per residue of the first model, in file order.
///
/// A residue is identified by columns 18-27 of its ATOM/HETATM records (name, chain, number
/// and insertion code). Solvent residues are skipped, as are records whose residue number does
/// not parse.
fn read_residues(reader: &mut impl BufRead) -> io::Result<Vec<ResidueEntry>> {
    let mut residues = Vec::new();
    let mut previous_uid = String::new();

    for line_res in reader.lines() {
        let line = line_res?;
        if line.starts_with("ENDMDL") {
            break;
        }
        if !(line.starts_with("ATOM") || line.starts_with("HETATM")) {
            continue;
        }
        let uid = slice(&line, 17, 27);
        if uid == previous_uid {
            continue;
        }
        previous_uid = uid.to_string();

        let residue_name = slice(&line, 17, 20).trim();
        if is_solvent(residue_name) {
            continue;
        }
        let Ok(seq_num) = slice(&line, 22, 26).trim().parse::<isize>() else {
            continue;
        };
        residues.push(ResidueEntry {
            seq_num,
            code: one_letter_code(residue_name),
        });
    }
    Ok(residues)
}

/// Reads sequences straight from the coordinate records of a PDB file.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomRecordSource;

impl AtomRecordSource {
    pub fn new() -> Self {
        Self
    }

    fn residues_or_warn(&self, path: &Path) -> Vec<ResidueEntry> {
        let result = File::open(path).and_then(|file| read_residues(&mut BufReader::new(file)));
        match result {
            Ok(residues) => {
                if residues.is_empty() {
                    warn!("No residues found in {}", path.display());
                }
                residues
            }
            Err(e) => {
                warn!("Error reading residues from {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}

impl SequenceSource for AtomRecordSource {
    fn full_sequence(&self, path: &Path) -> Result<String, SequenceSourceError> {
        Ok(self
            .residues_or_warn(path)
            .into_iter()
            .map(|residue| residue.code)
            .collect())
    }

    fn sub_sequence(
        &self,
        path: &Path,
        start: isize,
        end: isize,
    ) -> Result<String, SequenceSourceError> {
        Ok(self
            .residues_or_warn(path)
            .into_iter()
            .filter(|residue| (start..=end).contains(&residue.seq_num))
            .map(|residue| residue.code)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn atom_line(serial: usize, atom: &str, residue: &str, chain: char, seq_num: isize) -> String {
        format!(
            "ATOM  {:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           {}",
            serial,
            atom,
            residue,
            chain,
            seq_num,
            0.0,
            0.0,
            0.0,
            &atom[..1]
        )
    }

    fn sample_pdb() -> String {
        let mut lines = vec!["HEADER    TEST PROTEIN".to_string()];
        let residues = ["MET", "LYS", "VAL", "LEU", "ALA"];
        let mut serial = 1;
        for (i, name) in residues.iter().enumerate() {
            for atom in ["N", "CA", "C", "O"] {
                lines.push(atom_line(serial, atom, name, 'A', i as isize + 1));
                serial += 1;
            }
        }
        lines.push("HETATM   99  O   HOH A 101       0.000   0.000   0.000  1.00  0.00           O".into());
        lines.push("END".into());
        lines.join("\n")
    }

    #[test]
    fn read_residues_collapses_atoms_into_residues() {
        let residues = read_residues(&mut Cursor::new(sample_pdb())).unwrap();
        let codes: String = residues.iter().map(|r| r.code).collect();
        assert_eq!(codes, "MKVLA");
        assert_eq!(residues[0].seq_num, 1);
        assert_eq!(residues[4].seq_num, 5);
    }

    #[test]
    fn read_residues_stops_after_first_model() {
        let content = format!(
            "MODEL        1\n{}\nENDMDL\nMODEL        2\n{}\nENDMDL\n",
            atom_line(1, "CA", "GLY", 'A', 1),
            atom_line(2, "CA", "TRP", 'A', 2)
        );
        let residues = read_residues(&mut Cursor::new(content)).unwrap();
        assert_eq!(residues.len(), 1);
        assert_eq!(residues[0].code, 'G');
    }

    #[test]
    fn residues_in_different_chains_are_distinct() {
        let content = format!(
            "{}\n{}\n",
            atom_line(1, "CA", "GLY", 'A', 1),
            atom_line(2, "CA", "GLY", 'B', 1)
        );
        let residues = read_residues(&mut Cursor::new(content)).unwrap();
        assert_eq!(residues.len(), 2);
    }

    #[test]
    fn source_extracts_full_and_sub_sequences() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("1abc.pdb");
        fs::write(&path, sample_pdb()).unwrap();
        let source = AtomRecordSource::new();

        assert_eq!(source.full_sequence(&path).unwrap(), "MKVLA");
        assert_eq!(source.sub_sequence(&path, 2, 4).unwrap(), "KVL");
        assert_eq!(source.sub_sequence(&path, 5, 9).unwrap(), "A");
    }

    #[test]
    fn missing_file_degrades_to_empty_sequence() {
        let dir = tempdir().unwrap();
        let source = AtomRecordSource::new();
        let path = dir.path().join("missing.pdb");

        assert_eq!(source.full_sequence(&path).unwrap(), "");
        assert_eq!(source.sub_sequence(&path, 1, 3).unwrap(), "");
    }
}
