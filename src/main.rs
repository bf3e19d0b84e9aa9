#[tokio::main]
async fn main() -> anyhow::Result<()> {
    food_e_lib::run().await
}
