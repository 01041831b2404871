mod cli;
mod configuration;
