pub mod fields;
pub mod predef;
