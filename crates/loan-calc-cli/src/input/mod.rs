pub mod file;
pub mod form;
pub mod stdin;
