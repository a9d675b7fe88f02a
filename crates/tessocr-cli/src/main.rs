use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tessocr_cli::run().await
}
