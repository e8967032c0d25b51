use std::env;
use std::fs;
use std::sync::Arc;

use genfuse::{
    BatchConfig, BatchOrchestrator, BatchRequest, CancelToken, FnObserver, FusionClient,
    GeminiClient, GeminiConfig, ImageFusionRequest, InputImage, RenderOptions, VideoClient,
    VideoJobRequest,
};

fn mime_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    genfuse::logger::init_with_config(
        genfuse::logger::LoggerConfig::development().with_level(log::LevelFilter::Debug),
    )?;

    log::info!("🔍 Checking Gemini environment...");
    match env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
        Ok(api_key) => {
            log::info!("✅ Gemini API key found in environment");
            log::debug!(
                "API key starts with: {}...",
                &api_key[..6.min(api_key.len())]
            );
        }
        Err(_) => {
            log::error!("❌ No GEMINI_API_KEY in environment, requests will fail");
        }
    }

    let mut args = env::args().skip(1);
    let image_path = match args.next() {
        Some(path) => path,
        None => {
            log::error!("Usage: genfuse <image-path> [prompt]");
            std::process::exit(2);
        }
    };
    let prompt = args
        .next()
        .unwrap_or_else(|| "Restyle this photo as a clean studio product shot".to_string());

    log::info!("🔄 Creating Gemini client...");
    let client = match GeminiClient::new(GeminiConfig::from_env()) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            Arc::new(client)
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    log::info!("🖼️  Available fusion models:");
    for (id, name, provider) in FusionClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, provider);
    }
    log::info!("🎬 Available video models:");
    for (id, name, provider) in VideoClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, provider);
    }

    let bytes = fs::read(&image_path)?;
    let source = InputImage::from_bytes(&bytes, mime_type_for(&image_path));
    log::info!(
        "📷 Loaded {} ({} bytes, {})",
        image_path,
        bytes.len(),
        source.mime_type
    );

    let orchestrator = BatchOrchestrator::new(
        client.clone(),
        Arc::new(client.downloader().clone()),
        BatchConfig::from_env(),
    );
    let observer = FnObserver(|message: &str| log::info!("📣 {}", message));
    let cancel = CancelToken::new();

    // Image fusion batch
    log::info!("🎨 Testing image fusion...");
    let count: u32 = env::var("GENFUSE_DEMO_COUNT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let request = BatchRequest::ImageFusion(
        ImageFusionRequest::new(source.clone(), prompt.as_str())
            .with_options(RenderOptions::default()),
    );

    let run = genfuse::logger::timer("image fusion batch");
    match orchestrator.run_batch(&request, count, &observer, &cancel).await {
        Ok(results) => {
            log::info!("✅ Fusion batch produced {} asset(s)", results.len());
            for (index, asset) in results.iter().enumerate() {
                let file_name = format!(
                    "gemini-fused-image-{}.{}",
                    index + 1,
                    asset.content.extension()
                );
                let (data, _) = asset.content.to_bytes()?;
                fs::write(&file_name, data)?;
                log::info!("💾 Image saved to: {}", file_name);
                if let Some(caption) = &asset.caption {
                    log::info!("📝 Caption: {}", caption);
                }
            }
        }
        Err(e) => {
            log::error!("❌ Fusion batch failed: {}", e);
            log::warn!("💬 User-facing message: {}", e.user_message());
        }
    }
    drop(run);

    // Video generation, opt-in because it takes minutes
    if env::var("GENFUSE_DEMO_VIDEO").ok().as_deref() == Some("true") {
        log::info!("🎬 Testing image-to-video generation...");
        let request = BatchRequest::Video(VideoJobRequest::new(
            source,
            "Make the clouds move and the water ripple",
        ));

        match orchestrator.run_batch(&request, 1, &observer, &cancel).await {
            Ok(results) => {
                for (index, asset) in results.iter().enumerate() {
                    let file_name = format!(
                        "gemini-generated-video-{}.{}",
                        index + 1,
                        asset.content.extension()
                    );
                    let (data, _) = asset.content.to_bytes()?;
                    fs::write(&file_name, data)?;
                    log::info!("💾 Video saved to: {}", file_name);
                }
            }
            Err(e) => {
                log::error!("❌ Video generation failed: {}", e);
                log::warn!("💬 User-facing message: {}", e.user_message());
            }
        }
    } else {
        log::info!("💡 Set GENFUSE_DEMO_VIDEO=true to also run video generation");
    }

    log::info!("🎉 Done!");
    Ok(())
}
