pub mod export_dir;
