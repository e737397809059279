pub mod concat_string;
pub mod ecmascript;
pub mod indexmap;
pub mod line_index;
pub mod path_ext;
pub mod rayon;

pub use rustc_hash;
