pub mod form;
pub mod json;
pub mod multipart;
pub mod path;
