//! End-to-end walkthrough against a real Drive account
//!
//! Creates a file and a folder, copies, shares, exports, renames and finally
//! trashes everything it created.
//!
//! Run with:
//! ```bash
//! export REDRIVE_ACCESS_TOKEN=...   # token with the drive.file scope
//! export REDRIVE_USER_EMAIL=you@example.com
//!
//! cargo run -p redrive --example walkthrough -- viewer@example.com
//! ```

use bridge_desktop::StaticSession;
use bridge_traits::LogLevel;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::DriveConfig;
use redrive::{Access, CopyTarget, CreateFile, Permission, ReDriveApp};
use std::env;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);
    if let Err(e) = init_logging(config) {
        eprintln!("Failed to initialize logging: {}", e);
        return;
    }

    let viewer = env::args().nth(1);
    if let Err(e) = run(viewer).await {
        error!(error = %e, "Walkthrough failed");
        std::process::exit(1);
    }
}

async fn run(viewer: Option<String>) -> redrive::Result<()> {
    let session = StaticSession::from_env()?;
    let app = ReDriveApp::from_builder(
        DriveConfig::builder()
            .api_version(2)
            .session(Arc::new(session)),
    )?;

    let created = app
        .create_file(CreateFile::FromContent {
            name: "Test file".to_string(),
            content: "test test test".to_string(),
        })
        .await?;
    let mut file = app.get_file_by_id(created.get_id()).await?;
    info!(name = file.get_name(), url = ?file.get_url(), "Fetched created file");

    let mut folder = app.create_folder("Test folder").await?;
    let mut copy = file
        .make_copy(CopyTarget::NamedInto("new file name", &folder))
        .await?;
    info!(copy_id = copy.get_id(), "Copied into folder");

    if let Some(viewer) = viewer {
        file.add_viewer(&viewer).await?;
    }

    file.set_name("Test file (renamed)")
        .await?
        .set_description("Created by the redrive walkthrough")
        .await?;

    let doc = app
        .create_file(CreateFile::FromContentAndType {
            name: "Test doc".to_string(),
            content: "Hello from redrive".to_string(),
            mime_type: "application/vnd.google-apps.document".to_string(),
        })
        .await?;
    let pdf = app.get_file_by_id(doc.get_id()).await?.get_as("application/pdf").await;
    match pdf {
        Ok(blob) => info!(bytes = blob.bytes().len(), "Exported document as PDF"),
        Err(e) => info!(error = %e, "Export not available for this document"),
    }

    file.set_sharing(Access::AnyoneWithLink, Permission::View)
        .await?;
    file.set_sharing(Access::Anyone, Permission::None).await?;

    let mut doc = doc;
    for handle in [&mut file, &mut copy, &mut doc] {
        handle.set_trashed(true).await?;
    }
    folder.set_trashed(true).await?;

    info!("Walkthrough complete");
    Ok(())
}
