use person_directory::app::upload::TEMP_PREFIX;
use person_directory::app::wiring;
use person_directory::infra::{config, telemetry};
use person_directory::{BlobStore, FsBlobStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL (unless DIRECTORY_STORE=memory), HUGGING_FACE_ACCESS_TOKEN\n\
         Optional:\n\
           STORAGE_DIR, PUBLIC_STORAGE_URL, HF_INFERENCE_URL, EMBEDDING_MODEL,\n\
           IMAGE_SEARCH_GATEWAY_URL, BIND_ADDR, DB_MAX_CONNECTIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    println!("> Preflight:");
    println!("  DIRECTORY_STORE={:?}", config::store_backend()?);
    println!("  STORAGE_DIR={}", config::storage_dir());
    println!("  PUBLIC_STORAGE_URL={}", config::public_storage_url());
    println!("  EMBEDDING_MODEL={}", config::embedding_model());
    match config::image_search_gateway_url() {
        Some(url) => println!("  IMAGE_SEARCH_GATEWAY_URL={}", url),
        None => println!("  IMAGE_SEARCH_GATEWAY_URL unset (in-process gateway)"),
    }

    // Force-read secrets (nice error messages if missing)
    config::hugging_face_access_token()?;
    println!("  HUGGING_FACE_ACCESS_TOKEN is set.");

    // Store connectivity + schema
    let store = wiring::connect_store().await?;
    store.ping().await?;
    let persons = store.count_persons().await?;
    let searches = store.count_search_logs().await?;
    println!("  Store reachable: {} persons, {} search logs.", persons, searches);

    // Bucket writable
    let blobs = FsBlobStore::new(config::storage_dir(), config::public_storage_url())?;
    let probe = format!("{}/preflight-{}.txt", TEMP_PREFIX, std::process::id());
    blobs.upload(&probe, b"preflight", Some("text/plain")).await?;
    blobs.remove(&[probe]).await?;
    println!("  Photo bucket writable at {}.", blobs.root().display());

    println!("> Preflight OK.");
    Ok(())
}
