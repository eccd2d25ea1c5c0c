//! atlask - ask atlassian
//!
//! This is the main entry point for the CLI application.

#[tokio::main]
async fn main() {
  atlask::cli::run().await;
}
