pub mod check;
pub mod output;
pub mod run;
pub mod validate;
