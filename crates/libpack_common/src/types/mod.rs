pub mod entry_point;
pub mod import_kind;
pub mod import_record;
pub mod module_id;
pub mod module_table;
pub mod output_asset;
pub mod raw_idx;
pub mod resolved_id;
pub mod source;
pub mod source_joiner;
