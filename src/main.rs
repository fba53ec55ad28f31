#[tokio::main]
async fn main() -> anyhow::Result<()> {
    devnet_api::serve().await
}
