pub mod fasta;
pub mod run;
pub mod status;
