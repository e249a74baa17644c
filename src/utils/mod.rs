pub mod toml_config;
