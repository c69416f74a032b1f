pub mod cli;
pub mod config;
pub mod downloader;
pub mod intent;
pub mod interactive;
pub mod presenter;
pub mod session;
pub mod ytdlp;
