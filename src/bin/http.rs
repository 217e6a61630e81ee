#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use escala_tool::{SqliteEscalaStore, http_api};

    let addr: SocketAddr = std::env::var("ESCALA_TOOL_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()?;
    let db_path = std::env::var("ESCALA_TOOL_DB").unwrap_or_else(|_| "escalas.db".to_string());

    let store = Arc::new(SqliteEscalaStore::new(&db_path)?);
    println!("escala-core HTTP API listening on http://{addr} (db: {db_path})");
    http_api::serve(addr, store).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
