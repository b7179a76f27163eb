pub mod exported_name;
