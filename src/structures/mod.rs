pub mod parse;
pub mod poly;
pub mod residue;
