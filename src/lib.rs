pub mod config;
pub mod core;
pub mod shared;

#[cfg(feature = "desktop")]
pub mod api;
#[cfg(feature = "desktop")]
pub mod logging;
#[cfg(feature = "desktop")]
pub mod system;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::Arc;

    use tauri::{App, Manager, Url, WebviewUrl, WebviewWindowBuilder, WindowEvent};
    use tauri_plugin_autostart::MacosLauncher;
    use tauri_plugin_opener::OpenerExt;
    use tauri_plugin_store::StoreExt;

    use crate::api::{commands, AppState};
    use crate::config::{AppConfig, WindowConfig};
    use crate::core::clipboard::ClipboardWatcher;
    use crate::core::features::translator::{
        DispatcherConfig, GoogleTranslator, TranslationDispatcher,
    };
    use crate::core::pipeline::ClipboardPipeline;
    use crate::core::window::{hide_instead_of_close, PopupWindow, WindowPresenter};
    use crate::logging;
    use crate::shared::emit::{EventSink, TauriEventSink};
    use crate::shared::settings::{JsonFileStore, MemoryStore, SettingsGate, SettingsStore};
    use crate::system::shortcut::register_present_shortcut;
    use crate::system::store::STORE_FILE;
    use crate::system::{TauriAutostart, TauriClipboard, TauriPopupWindow, TauriScreen, TauriStore};

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        tauri::Builder::default()
            .plugin(logging::builder().build())
            .plugin(tauri_plugin_opener::init())
            .plugin(tauri_plugin_store::Builder::default().build())
            .plugin(tauri_plugin_global_shortcut::Builder::new().build())
            .plugin(tauri_plugin_clipboard_manager::init())
            .plugin(tauri_plugin_autostart::init(MacosLauncher::LaunchAgent, None))
            .setup(|app| {
                let config = AppConfig::from_env();
                let handle = app.handle().clone();

                let settings = Arc::new(
                    SettingsGate::new(open_settings_store(app))
                        .with_autostart(Arc::new(TauriAutostart::new(handle.clone()))),
                );
                if let Err(e) = settings.apply_platform_overrides() {
                    log::warn!("[Settings] Failed to apply platform overrides: {}", e);
                }
                if let Err(e) = settings.sync_auto_start() {
                    log::warn!("[Settings] Failed to sync login item: {}", e);
                }

                build_popup_window(app, &config.window)?;

                let sink: Arc<dyn EventSink> = Arc::new(TauriEventSink::new(handle.clone()));
                let translator = Arc::new(GoogleTranslator::new(config.translate_endpoint.clone())?);
                let (dispatcher, dispatcher_handle) = TranslationDispatcher::new(
                    translator,
                    sink.clone(),
                    DispatcherConfig::from(&config),
                );

                let window: Arc<dyn PopupWindow> =
                    Arc::new(TauriPopupWindow::new(handle.clone(), config.window.label.clone()));
                let presenter = WindowPresenter::new(
                    window.clone(),
                    Arc::new(TauriScreen::new(handle.clone())),
                    settings.clone(),
                    config.attention_revert_delay,
                    config.cursor_offset,
                );
                if let Err(e) = presenter.show_initial(config.start_minimized) {
                    log::warn!("[WindowPresenter] Initial show failed: {}", e);
                }

                let watcher = ClipboardWatcher::new(
                    Arc::new(TauriClipboard::new(handle.clone())),
                    settings.clone(),
                    config.attention_cooldown,
                );
                let (pipeline, pipeline_handle) = ClipboardPipeline::new(
                    watcher,
                    presenter,
                    dispatcher_handle.clone(),
                    sink.clone(),
                    config.poll_interval,
                );

                tauri::async_runtime::spawn(dispatcher.run());
                tauri::async_runtime::spawn(pipeline.run());

                if let Err(e) = register_present_shortcut(&handle, &settings, pipeline_handle.clone()) {
                    // The popup still works from the clipboard without it.
                    log::warn!("[Shortcut] {}", e);
                }

                app.manage(AppState {
                    settings,
                    dispatcher: dispatcher_handle,
                    pipeline: pipeline_handle,
                    sink,
                    window,
                });

                log::info!("Clip Translate started");
                Ok(())
            })
            .on_window_event(|window, event| {
                if let WindowEvent::CloseRequested { api, .. } = event {
                    let Some(state) = window.try_state::<AppState>() else {
                        return;
                    };
                    if hide_instead_of_close(state.window.as_ref(), &state.settings) {
                        api.prevent_close();
                    }
                }
            })
            .invoke_handler(tauri::generate_handler![
                commands::settings::get_settings,
                commands::settings::set_setting,
                commands::settings::toggle_follow_cursor,
                commands::settings::toggle_clipboard_monitoring,
                commands::translation::source_text_edited,
                commands::translation::target_language_changed,
                commands::window::toggle_always_on_top,
                commands::window::show_window,
            ])
            .run(tauri::generate_context!())
            .unwrap_or_else(|e| {
                eprintln!("FATAL: Failed to start Tauri application: {}", e);
                std::process::exit(1);
            });
    }

    /// Plugin store first; the plain settings file if that cannot be opened,
    /// and memory as the last resort.
    fn open_settings_store(app: &App) -> Arc<dyn SettingsStore> {
        match app.store(STORE_FILE) {
            Ok(store) => Arc::new(TauriStore::new(store)),
            Err(e) => {
                log::warn!("[Settings] Plugin store unavailable: {}", e);
                match JsonFileStore::default_path() {
                    Ok(path) => Arc::new(JsonFileStore::open(path)),
                    Err(e) => {
                        log::error!("[Settings] {}; settings will not persist", e);
                        Arc::new(MemoryStore::new())
                    }
                }
            }
        }
    }

    fn build_popup_window(app: &App, window: &WindowConfig) -> tauri::Result<()> {
        let opener = app.handle().clone();
        WebviewWindowBuilder::new(app, &window.label, WebviewUrl::App("index.html".into()))
            .title(&window.title)
            .inner_size(window.width, window.height)
            .visible(false)
            .on_navigation(move |url| {
                if is_app_url(url) {
                    return true;
                }
                // Links leave the popup and open in the default browser.
                if let Err(e) = opener.opener().open_url(url.as_str(), None::<&str>) {
                    log::warn!("Failed to open {}: {}", url, e);
                }
                false
            })
            .build()?;
        Ok(())
    }

    fn is_app_url(url: &Url) -> bool {
        url.scheme() == "tauri"
            || matches!(url.host_str(), Some("localhost") | Some("tauri.localhost"))
    }
}
