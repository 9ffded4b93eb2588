#[tokio::main]
async fn main() -> anyhow::Result<()> {
    klipper_configurator::run().await
}
