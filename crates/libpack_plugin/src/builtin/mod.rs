pub mod sfc_script;
