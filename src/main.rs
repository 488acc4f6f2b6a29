#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dataset_inspector::app::run().await
}
