#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bisaya_desktop_lib::run().await
}
