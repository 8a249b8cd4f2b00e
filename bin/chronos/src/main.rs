#[tokio::main]
async fn main() -> eyre::Result<()> {
    chronos::run().await
}
