pub mod ecma_view;
pub mod mutation;
