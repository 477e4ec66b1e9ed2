#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use tauri::Manager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tenderscan::{api, store, DbPool};

fn main() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let app_data_dir = app.path().app_data_dir()?;
            std::fs::create_dir_all(&app_data_dir)?;

            // Dated log files under the app data dir, plus stderr.
            let log_dir = app_data_dir.join("logs");
            std::fs::create_dir_all(&log_dir)?;
            let file_appender = tracing_appender::rolling::daily(&log_dir, "tenderscan.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "tenderscan=info".into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(file_writer),
                )
                .init();
            // The guard must live as long as the app or the file layer stops
            // flushing.
            app.manage(guard);

            let db_path = app_data_dir.join("tenderscan.sqlite");
            let manager = r2d2_sqlite::SqliteConnectionManager::file(db_path);
            let pool: DbPool = r2d2::Pool::new(manager)?;

            {
                let mut conn = pool.get()?;
                store::migrate_db(&mut conn)?;
            }

            app.manage(pool);
            app.manage(api::AppState::default());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            api::list_keywords,
            api::add_keywords,
            api::update_keyword,
            api::remove_keywords,
            api::clear_keywords,
            api::import_keywords,
            api::analyze_documents,
            api::export_results,
            api::list_batches,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
