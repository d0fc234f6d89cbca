#[actix_web::main]
async fn main() -> std::io::Result<()> {
    qa_testgen::app::run().await
}
