#[path = "static_server/files.rs"]
mod files;
#[path = "static_server/routes.rs"]
mod routes;
#[path = "static_server/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
