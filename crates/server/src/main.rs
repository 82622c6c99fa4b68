#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quipster_server::start().await
}
