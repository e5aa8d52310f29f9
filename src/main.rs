#[tokio::main]
async fn main() -> std::io::Result<()> {
    venue_booking::run().await
}
