#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mixlingo_backend::run().await
}
